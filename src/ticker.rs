use std::time::Duration;

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Fastest accepted tick interval in milliseconds
pub const MIN_TICK_MS: u64 = 50;

/// Tick duration for a configured interval, kept within MIN_TICK_MS..=DEFAULT_TICK_MS
pub fn tick_duration(tick_ms: u64) -> Duration {
    Duration::from_millis(tick_ms.clamp(MIN_TICK_MS, DEFAULT_TICK_MS))
}
