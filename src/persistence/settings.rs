use crate::ticker::{tick_duration, DEFAULT_TICK_MS};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How often running timers are checked against their estimate
    pub tick_ms: u64,
    /// Seconds before a notification banner dismisses itself
    pub banner_secs: u64,
    /// Ring the terminal bell when a timer runs out
    pub bell: bool,
    /// Send a desktop notification when a timer runs out (macOS only)
    pub desktop_notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            banner_secs: 5,
            bell: true,
            desktop_notifications: true,
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        tick_duration(self.tick_ms)
    }

    pub fn banner_duration(&self) -> Duration {
        Duration::from_secs(self.banner_secs)
    }
}

/// Load settings; a missing or unreadable file yields the defaults
pub fn load_settings<P: AsRef<Path>>(path: P) -> Settings {
    let path = path.as_ref();

    if !path.exists() {
        return Settings::default();
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|content| serde_json::from_str(&content).map_err(anyhow::Error::from));

    match parsed {
        Ok(settings) => settings,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Settings::default()
        }
    }
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
