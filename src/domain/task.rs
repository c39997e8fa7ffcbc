use super::clock::{elapsed_ms, Timestamp};
use super::enums::TimerStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single task with its timer fields.
///
/// Field names are serialized in camelCase and are part of the stored format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique ID, never changes
    pub id: String,
    /// Description
    pub text: String,
    /// Target duration in seconds (always >= 1)
    pub estimated_duration: u64,
    pub is_completed: bool,
    pub timer_status: TimerStatus,
    /// Milliseconds banked from closed intervals (excludes the open one)
    #[serde(default)]
    pub accumulated_time: u64,
    /// Start of the open interval; present only while Running or Finished
    #[serde(default)]
    pub timer_start_time: Option<Timestamp>,
}

impl Task {
    pub fn new(text: String, estimated_duration: u64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), text, estimated_duration)
    }

    pub fn with_id(id: String, text: String, estimated_duration: u64) -> Self {
        Self {
            id,
            text,
            estimated_duration: estimated_duration.max(1),
            is_completed: false,
            timer_status: TimerStatus::Idle,
            accumulated_time: 0,
            timer_start_time: None,
        }
    }

    /// Start or resume the timer. Completed tasks and open intervals are left alone.
    pub fn start(&mut self, now: Timestamp) -> bool {
        if self.is_completed {
            return false;
        }
        match self.timer_status {
            TimerStatus::Idle | TimerStatus::Paused => {
                self.timer_status = TimerStatus::Running;
                self.timer_start_time = Some(now);
                true
            }
            TimerStatus::Running | TimerStatus::Finished => false,
        }
    }

    /// Pause the timer, banking the open interval
    pub fn pause(&mut self, now: Timestamp) -> bool {
        match self.timer_status {
            TimerStatus::Running | TimerStatus::Finished => {
                self.close_interval(now);
                self.timer_status = TimerStatus::Paused;
                true
            }
            TimerStatus::Idle | TimerStatus::Paused => false,
        }
    }

    /// Clear all recorded time and return to Idle
    pub fn reset(&mut self) -> bool {
        let changed = self.timer_status != TimerStatus::Idle
            || self.accumulated_time != 0
            || self.timer_start_time.is_some();
        self.timer_status = TimerStatus::Idle;
        self.accumulated_time = 0;
        self.timer_start_time = None;
        changed
    }

    /// Mark complete. The open interval is banked, recorded time is kept.
    pub fn complete(&mut self, now: Timestamp) {
        self.close_interval(now);
        self.timer_status = TimerStatus::Idle;
        self.is_completed = true;
    }

    /// Mark incomplete. The task reopens Idle with its banked time intact.
    pub fn reopen(&mut self) {
        self.is_completed = false;
        self.timer_status = TimerStatus::Idle;
        self.timer_start_time = None;
    }

    pub fn toggle_complete(&mut self, now: Timestamp) {
        if self.is_completed {
            self.reopen();
        } else {
            self.complete(now);
        }
    }

    /// Running -> Finished once elapsed time reaches the estimate.
    /// Returns true only on the actual edge.
    pub fn finish_if_due(&mut self, now: Timestamp) -> bool {
        if self.timer_status != TimerStatus::Running {
            return false;
        }
        if elapsed_ms(self, now) >= self.estimate_ms() {
            self.timer_status = TimerStatus::Finished;
            return true;
        }
        false
    }

    pub fn estimate_ms(&self) -> u64 {
        self.estimated_duration.saturating_mul(1000)
    }

    fn close_interval(&mut self, now: Timestamp) {
        if let Some(started) = self.timer_start_time.take() {
            let interval = now.saturating_sub(started).max(0) as u64;
            self.accumulated_time = self.accumulated_time.saturating_add(interval);
        }
    }

    /// Check the record invariants
    #[cfg(test)]
    pub fn is_consistent(&self) -> bool {
        let start_matches_status =
            self.timer_start_time.is_some() == self.timer_status.has_open_interval();
        let completed_is_idle = !self.is_completed
            || (self.timer_status == TimerStatus::Idle && self.timer_start_time.is_none());
        start_matches_status && completed_is_idle && self.estimated_duration >= 1
    }

    /// Repair a record read from storage so the invariants hold
    pub fn normalize(&mut self) {
        if self.estimated_duration == 0 {
            self.estimated_duration = 1;
        }

        if self.is_completed {
            // Completed records must not carry an open interval
            self.timer_start_time = None;
            self.timer_status = TimerStatus::Idle;
            return;
        }

        match (self.timer_status.has_open_interval(), self.timer_start_time) {
            (true, None) => self.timer_status = TimerStatus::Paused,
            (false, Some(_)) => self.timer_start_time = None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const T0: Timestamp = 1_700_000_000_000;

    fn task(estimate: u64) -> Task {
        Task::with_id("t1".to_string(), "Write report".to_string(), estimate)
    }

    #[test]
    fn test_task_new() {
        let task = Task::new("Test".to_string(), 60);
        assert_eq!(task.text, "Test");
        assert_eq!(task.estimated_duration, 60);
        assert_eq!(task.timer_status, TimerStatus::Idle);
        assert_eq!(task.accumulated_time, 0);
        assert!(task.timer_start_time.is_none());
        assert!(!task.is_completed);
        assert!(!task.id.is_empty());
        assert!(task.is_consistent());
    }

    #[test]
    fn test_start_from_idle() {
        let mut task = task(60);
        assert!(task.start(T0));
        assert_eq!(task.timer_status, TimerStatus::Running);
        assert_eq!(task.timer_start_time, Some(T0));
        assert!(task.is_consistent());
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut task = task(60);
        task.start(T0);
        assert!(!task.start(T0 + 5_000));
        assert_eq!(task.timer_start_time, Some(T0));
    }

    #[test]
    fn test_start_completed_is_noop() {
        let mut task = task(60);
        task.complete(T0);
        assert!(!task.start(T0 + 1_000));
        assert_eq!(task.timer_status, TimerStatus::Idle);
        assert!(task.timer_start_time.is_none());
    }

    #[test]
    fn test_pause_resume_round_trip_is_exact() {
        let mut task = task(600);
        let (t0, t1, t2, t3) = (T0, T0 + 3_250, T0 + 10_000, T0 + 14_125);

        task.start(t0);
        task.pause(t1);
        assert_eq!(task.accumulated_time, 3_250);

        task.start(t2);
        assert_eq!(task.accumulated_time, 3_250);
        task.pause(t3);

        assert_eq!(task.accumulated_time, ((t1 - t0) + (t3 - t2)) as u64);
        assert_eq!(task.timer_status, TimerStatus::Paused);
        assert!(task.is_consistent());
    }

    #[test]
    fn test_pause_idle_is_noop() {
        let mut task = task(60);
        assert!(!task.pause(T0));
        assert_eq!(task.timer_status, TimerStatus::Idle);
    }

    #[test]
    fn test_pause_finished_banks_overtime() {
        let mut task = task(5);
        task.start(T0);
        assert!(task.finish_if_due(T0 + 6_000));
        assert!(task.pause(T0 + 8_000));
        assert_eq!(task.timer_status, TimerStatus::Paused);
        assert_eq!(task.accumulated_time, 8_000);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut task = task(60);
        task.start(T0);
        task.pause(T0 + 9_000);

        assert!(task.reset());
        let once = task.clone();
        assert!(!task.reset());

        assert_eq!(task, once);
        assert_eq!(task.accumulated_time, 0);
        assert_eq!(task.timer_status, TimerStatus::Idle);
        assert!(task.timer_start_time.is_none());
    }

    #[test]
    fn test_complete_folds_open_interval() {
        let mut task = task(60);
        task.accumulated_time = 10_000;
        task.start(T0);
        task.complete(T0 + 5_000);

        assert!(task.is_completed);
        assert_eq!(task.timer_status, TimerStatus::Idle);
        assert_eq!(task.accumulated_time, 15_000);
        assert!(task.timer_start_time.is_none());
        assert!(task.is_consistent());
    }

    #[test]
    fn test_complete_from_paused_forces_idle() {
        let mut task = task(60);
        task.start(T0);
        task.pause(T0 + 2_000);
        task.complete(T0 + 50_000);

        assert_eq!(task.timer_status, TimerStatus::Idle);
        assert_eq!(task.accumulated_time, 2_000);
    }

    #[test]
    fn test_reopen_preserves_banked_time() {
        let mut task = task(60);
        task.accumulated_time = 55_000;
        task.toggle_complete(T0);
        task.toggle_complete(T0 + 1_000);

        assert!(!task.is_completed);
        assert_eq!(task.timer_status, TimerStatus::Idle);
        assert_eq!(task.accumulated_time, 55_000);
    }

    #[test]
    fn test_finish_if_due_edge() {
        let mut task = task(5);
        task.start(T0);

        assert!(!task.finish_if_due(T0 + 4_999));
        assert_eq!(task.timer_status, TimerStatus::Running);

        assert!(task.finish_if_due(T0 + 6_000));
        assert_eq!(task.timer_status, TimerStatus::Finished);
        assert_eq!(task.timer_start_time, Some(T0));

        assert!(!task.finish_if_due(T0 + 7_000));
        assert_eq!(task.timer_status, TimerStatus::Finished);
    }

    #[test]
    fn test_finish_counts_banked_time() {
        let mut task = task(10);
        task.accumulated_time = 8_000;
        task.start(T0);
        assert!(task.finish_if_due(T0 + 2_000));
    }

    #[test]
    fn test_normalize_repairs_records() {
        let mut running_without_start = task(60);
        running_without_start.timer_status = TimerStatus::Running;
        running_without_start.normalize();
        assert_eq!(running_without_start.timer_status, TimerStatus::Paused);
        assert!(running_without_start.is_consistent());

        let mut paused_with_start = task(60);
        paused_with_start.timer_status = TimerStatus::Paused;
        paused_with_start.timer_start_time = Some(T0);
        paused_with_start.normalize();
        assert!(paused_with_start.timer_start_time.is_none());

        let mut completed_running = task(0);
        completed_running.estimated_duration = 0;
        completed_running.is_completed = true;
        completed_running.timer_status = TimerStatus::Running;
        completed_running.timer_start_time = Some(T0);
        completed_running.normalize();
        assert_eq!(completed_running.timer_status, TimerStatus::Idle);
        assert_eq!(completed_running.estimated_duration, 1);
        assert!(completed_running.is_consistent());
    }

    #[test]
    fn test_json_field_names() {
        let mut task = task(90);
        task.start(T0);
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["id"], "t1");
        assert_eq!(json["estimatedDuration"], 90);
        assert_eq!(json["isCompleted"], false);
        assert_eq!(json["timerStatus"], "running");
        assert_eq!(json["accumulatedTime"], 0);
        assert_eq!(json["timerStartTime"], T0);
    }
}
