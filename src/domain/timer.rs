use super::clock::Timestamp;
use super::list::TaskList;
use std::collections::HashMap;
use std::time::Duration;

/// Periodic check scheduled for one running task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickHandle {
    pub task_id: String,
    pub next_due: Timestamp,
}

/// Per-task tick handles, keyed by task ID.
///
/// A handle exists only while its task is Running. `sync` arms handles for
/// running tasks and cancels every other one, so a handle never outlives a
/// pause, reset, completion or deletion of its task.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    interval_ms: i64,
    handles: HashMap<String, TickHandle>,
}

impl TickSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: (interval.as_millis() as i64).max(1),
            handles: HashMap::new(),
        }
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    /// Arm a handle for `task_id`. Returns false if one is already armed.
    pub fn arm(&mut self, task_id: &str, now: Timestamp) -> bool {
        if self.handles.contains_key(task_id) {
            return false;
        }
        self.handles.insert(
            task_id.to_string(),
            TickHandle {
                task_id: task_id.to_string(),
                next_due: now + self.interval_ms,
            },
        );
        true
    }

    #[cfg(test)]
    pub fn is_armed(&self, task_id: &str) -> bool {
        self.handles.contains_key(task_id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Make the armed set match the running tasks in `list`
    pub fn sync(&mut self, list: &TaskList, now: Timestamp) {
        let running = list.running_ids();
        self.handles.retain(|id, _| running.contains(id));
        for id in &running {
            self.arm(id, now);
        }
    }

    /// IDs whose check is due at `now`; those handles are rescheduled one interval later
    pub fn due(&mut self, now: Timestamp) -> Vec<String> {
        let interval = self.interval_ms;
        let mut due: Vec<String> = self
            .handles
            .values_mut()
            .filter(|handle| handle.next_due <= now)
            .map(|handle| {
                handle.next_due = now + interval;
                handle.task_id.clone()
            })
            .collect();
        due.sort();
        due
    }

    /// Drop every handle (teardown)
    pub fn clear(&mut self) {
        self.handles.clear();
    }
}
