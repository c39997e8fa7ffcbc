use serde::{Deserialize, Serialize};

/// Timer state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Not started, or reset
    #[default]
    Idle,
    /// Counting down toward the estimate
    Running,
    /// Stopped with banked time
    Paused,
    /// Still running, past the estimate (overtime)
    Finished,
}

impl TimerStatus {
    /// Stored string form of the status
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }

    /// Whether an interval is open (a start time must be recorded)
    pub fn has_open_interval(&self) -> bool {
        matches!(self, Self::Running | Self::Finished)
    }
}

/// Whether the timer label counts down or shows overtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Countdown,
    Overtime,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    Dragging, // A task is grabbed and the cursor picks the drop slot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_status_serde_strings() {
        let json = serde_json::to_string(&TimerStatus::Finished).unwrap();
        assert_eq!(json, "\"finished\"");

        let status: TimerStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, TimerStatus::Paused);

        for status in [
            TimerStatus::Idle,
            TimerStatus::Running,
            TimerStatus::Paused,
            TimerStatus::Finished,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.to_tag()));
        }
    }

    #[test]
    fn test_has_open_interval() {
        assert!(!TimerStatus::Idle.has_open_interval());
        assert!(TimerStatus::Running.has_open_interval());
        assert!(!TimerStatus::Paused.has_open_interval());
        assert!(TimerStatus::Finished.has_open_interval());
    }
}
