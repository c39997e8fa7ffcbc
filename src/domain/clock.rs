use super::enums::{DisplayMode, TimerStatus};
use super::task::Task;
use chrono::Utc;

/// Wall-clock instant in epoch milliseconds
pub type Timestamp = i64;

/// Current wall-clock instant. Capture once per operation and pass it down.
pub fn now_ms() -> Timestamp {
    Utc::now().timestamp_millis()
}

/// What the timer label shows for a task at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub mode: DisplayMode,
    pub seconds: u64,
}

impl Presentation {
    pub fn countdown(seconds: u64) -> Self {
        Self {
            mode: DisplayMode::Countdown,
            seconds,
        }
    }

    pub fn overtime(seconds: u64) -> Self {
        Self {
            mode: DisplayMode::Overtime,
            seconds,
        }
    }
}

/// Total elapsed milliseconds: banked time plus the open interval, if any.
/// A start time in the future (clock skew) contributes nothing.
pub fn elapsed_ms(task: &Task, now: Timestamp) -> u64 {
    let open = match task.timer_start_time {
        Some(started) => now.saturating_sub(started).max(0) as u64,
        None => 0,
    };
    task.accumulated_time.saturating_add(open)
}

/// Whole elapsed seconds, truncated
pub fn elapsed_secs(task: &Task, now: Timestamp) -> u64 {
    elapsed_ms(task, now) / 1000
}

/// Compute the countdown/overtime presentation of a task's timer
pub fn presentation(task: &Task, now: Timestamp) -> Presentation {
    let estimate = task.estimated_duration;

    // A fresh idle task shows its full estimate
    let fresh = task.timer_status == TimerStatus::Idle && task.accumulated_time == 0;
    if fresh && !task.is_completed {
        return Presentation::countdown(estimate);
    }

    let elapsed = elapsed_secs(task, now);
    if elapsed < estimate {
        Presentation::countdown(estimate - elapsed)
    } else {
        Presentation::overtime(elapsed - estimate)
    }
}

/// Format as "MM:SS" (countdown) or "+MM:SS" (overtime). Minutes are not wrapped at 60.
pub fn format_presentation(presentation: Presentation) -> String {
    let minutes = presentation.seconds / 60;
    let seconds = presentation.seconds % 60;
    match presentation.mode {
        DisplayMode::Countdown => format!("{:02}:{:02}", minutes, seconds),
        DisplayMode::Overtime => format!("+{:02}:{:02}", minutes, seconds),
    }
}

/// Formatted timer label for a task at `now`
pub fn timer_label(task: &Task, now: Timestamp) -> String {
    format_presentation(presentation(task, now))
}
