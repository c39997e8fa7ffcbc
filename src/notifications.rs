//! "Time is up" side effects: terminal bell, desktop notification
//! (macOS only) and the in-app banner state.

use crate::domain::Notification;
use std::io::Write;
use std::time::{Duration, Instant};

#[cfg(target_os = "macos")]
use std::process::Command;

/// Ring the terminal bell
pub fn ring_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

/// Send a desktop notification when a task's estimate is reached
pub fn notify_time_up(notice: &Notification) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "Timebox - Time is up""#,
            notice.message.replace('"', "\\\"")
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = notice;
    }
}

/// The notification currently shown at the top of the screen
#[derive(Debug, Clone)]
pub struct Banner {
    pub notice: Notification,
    pub shown_at: Instant,
}

impl Banner {
    pub fn new(notice: Notification, shown_at: Instant) -> Self {
        Self { notice, shown_at }
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;

    #[test]
    fn test_banner_expiry() {
        let task = Task::with_id("t".to_string(), "Read".to_string(), 60);
        let shown_at = Instant::now();
        let banner = Banner::new(Notification::time_up(&task), shown_at);
        let ttl = Duration::from_secs(5);

        assert!(!banner.is_expired(shown_at + Duration::from_secs(4), ttl));
        assert!(banner.is_expired(shown_at + Duration::from_secs(5), ttl));
    }
}
