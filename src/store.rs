use crate::domain::list::{minutes_to_seconds, validate_text};
use crate::domain::{
    Notification, Task, TaskEdit, TaskList, TickSchedule, Timestamp, ValidationError,
};
use crate::persistence::TaskRepository;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, error, info};

/// Owns the current task snapshot, the tick handles of running tasks and the
/// repository. Every mutation replaces the snapshot, re-syncs the tick
/// handles and saves.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    list: TaskList,
    ticks: TickSchedule,
    /// Message from the most recent save, if it failed
    save_error: Option<String>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Load the stored list and arm ticks for tasks that were left running
    pub fn open(repo: R, tick_interval: Duration, now: Timestamp) -> Self {
        let list = repo.load();
        let mut ticks = TickSchedule::new(tick_interval);
        ticks.sync(&list, now);
        info!(
            tasks = list.len(),
            running = ticks.len(),
            tick_ms = ticks.interval_ms(),
            "task store opened"
        );

        Self {
            repo,
            list,
            ticks,
            save_error: None,
        }
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    #[cfg(test)]
    pub fn ticks(&self) -> &TickSchedule {
        &self.ticks
    }

    /// Add a task with an estimate in minutes. Returns the new task's ID.
    pub fn add_task(
        &mut self,
        text: &str,
        duration_minutes: i64,
        now: Timestamp,
    ) -> Result<String, ValidationError> {
        let next = validate_text(text)
            .and_then(|_| minutes_to_seconds(duration_minutes))
            .and_then(|seconds| self.list.add_task(text, seconds))
            .map_err(|e| {
                debug!(error = %e, "add rejected");
                e
            })?;

        let id = next.tasks()[0].id.clone();
        info!(task = %id, minutes = duration_minutes, "task added");
        self.commit(next, now);
        Ok(id)
    }

    pub fn edit_task(
        &mut self,
        id: &str,
        text: Option<String>,
        duration_minutes: Option<i64>,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        if let Some(text) = &text {
            validate_text(text)?;
        }
        let estimated_duration = duration_minutes.map(minutes_to_seconds).transpose()?;

        let edit = TaskEdit {
            text,
            estimated_duration,
        };
        let next = self.list.edit_task(id, &edit)?;
        debug!(task = %id, "task edited");
        self.commit(next, now);
        Ok(())
    }

    pub fn delete_task(&mut self, id: &str, now: Timestamp) {
        let next = self.list.delete_task(id);
        debug!(task = %id, "task deleted");
        self.commit(next, now);
    }

    pub fn toggle_complete(&mut self, id: &str, now: Timestamp) {
        let next = self.list.toggle_complete(id, now);
        self.commit(next, now);
    }

    pub fn start(&mut self, id: &str, now: Timestamp) {
        let next = self.list.start(id, now);
        self.commit(next, now);
    }

    pub fn pause(&mut self, id: &str, now: Timestamp) {
        let next = self.list.pause(id, now);
        self.commit(next, now);
    }

    pub fn reset(&mut self, id: &str, now: Timestamp) {
        let next = self.list.reset(id);
        self.commit(next, now);
    }

    pub fn reorder(&mut self, dragged_id: &str, target_id: Option<&str>, now: Timestamp) {
        let next = self.list.reorder(dragged_id, target_id);
        debug!(task = %dragged_id, target = ?target_id, "task reordered");
        self.commit(next, now);
    }

    /// Run the checks whose tick handles are due. Returns one notification per
    /// task that crossed its estimate on this tick.
    pub fn tick(&mut self, now: Timestamp) -> Vec<Notification> {
        if self.ticks.is_empty() {
            return Vec::new();
        }
        let due = self.ticks.due(now);
        if due.is_empty() {
            return Vec::new();
        }

        let mut next = self.list.clone();
        let mut notices = Vec::new();
        for id in &due {
            let (list, notice) = next.finish_if_due(id, now);
            next = list;
            if let Some(notice) = notice {
                info!(
                    task = %notice.task_id,
                    notice = %notice.id,
                    "estimate reached, tracking overtime"
                );
                notices.push(notice);
            }
        }

        self.commit(next, now);
        notices
    }

    /// Stop every tick handle and write the final snapshot
    pub fn shutdown(&mut self) -> Result<()> {
        self.ticks.clear();
        self.repo.save(&self.list)
    }

    /// Failure message of the latest save; None once a save succeeds again
    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    fn commit(&mut self, next: TaskList, now: Timestamp) {
        if next == self.list {
            return;
        }
        self.list = next;
        self.ticks.sync(&self.list, now);

        match self.repo.save(&self.list) {
            Ok(()) => {
                if self.save_error.take().is_some() {
                    info!("save recovered");
                }
            }
            Err(e) => {
                error!(error = %e, "failed to save tasks");
                self.save_error = Some(format!("Save failed: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{timer_label, TimerStatus};
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};

    const T0: Timestamp = 1_609_459_200_000;

    #[derive(Default)]
    struct MemoryRepository {
        initial: TaskList,
        saves: RefCell<Vec<TaskList>>,
        fail: Cell<bool>,
    }

    impl TaskRepository for MemoryRepository {
        fn load(&self) -> TaskList {
            self.initial.clone()
        }

        fn save(&self, list: &TaskList) -> Result<()> {
            if self.fail.get() {
                anyhow::bail!("disk full");
            }
            self.saves.borrow_mut().push(list.clone());
            Ok(())
        }
    }

    fn store_with(tasks: Vec<Task>) -> TaskStore<MemoryRepository> {
        let repo = MemoryRepository {
            initial: TaskList::new(tasks),
            ..Default::default()
        };
        TaskStore::open(repo, Duration::from_millis(250), T0)
    }

    fn abc() -> Vec<Task> {
        ["A", "B", "C"]
            .iter()
            .map(|id| Task::with_id(id.to_string(), format!("Task {}", id), 60))
            .collect()
    }

    fn ids<R: TaskRepository>(store: &TaskStore<R>) -> Vec<String> {
        store.tasks().iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_add_task_converts_minutes_and_saves() {
        let mut store = store_with(Vec::new());
        let id = store.add_task("Write tests", 2, T0).unwrap();

        let task = store.list().get(&id).unwrap();
        assert_eq!(task.estimated_duration, 120);
        assert_eq!(timer_label(task, T0), "02:00");
        assert_eq!(store.repo.saves.borrow().len(), 1);
    }

    #[test]
    fn test_add_task_validation_order() {
        let mut store = store_with(Vec::new());
        assert_eq!(
            store.add_task("", 5, T0),
            Err(ValidationError::EmptyDescription)
        );
        assert_eq!(
            store.add_task("", 0, T0),
            Err(ValidationError::EmptyDescription)
        );
        assert_eq!(
            store.add_task("Task", 0, T0),
            Err(ValidationError::InvalidDuration)
        );
        assert_eq!(
            store.add_task("Task", -5, T0),
            Err(ValidationError::InvalidDuration)
        );

        assert!(store.tasks().is_empty());
        assert!(store.repo.saves.borrow().is_empty());
    }

    #[test]
    fn test_edit_task_minutes() {
        let mut store = store_with(abc());
        store.edit_task("B", Some("Renamed".to_string()), Some(3), T0).unwrap();

        let task = store.list().get("B").unwrap();
        assert_eq!(task.text, "Renamed");
        assert_eq!(task.estimated_duration, 180);

        assert_eq!(
            store.edit_task("B", Some("".to_string()), Some(0), T0),
            Err(ValidationError::EmptyDescription)
        );
        assert_eq!(
            store.edit_task("B", None, Some(0), T0),
            Err(ValidationError::InvalidDuration)
        );
        assert_eq!(store.list().get("B").unwrap().text, "Renamed");
    }

    #[test]
    fn test_start_arms_tick_and_pause_cancels() {
        let mut store = store_with(abc());

        store.start("A", T0);
        assert!(store.ticks().is_armed("A"));

        store.pause("A", T0 + 1_000);
        assert!(!store.ticks().is_armed("A"));
        assert_eq!(store.list().get("A").unwrap().accumulated_time, 1_000);
    }

    #[test]
    fn test_reset_complete_delete_cancel_ticks() {
        let mut store = store_with(abc());
        store.start("A", T0);
        store.start("B", T0);
        store.start("C", T0);
        assert_eq!(store.ticks().len(), 3);

        store.reset("A", T0 + 10);
        store.toggle_complete("B", T0 + 10);
        store.delete_task("C", T0 + 10);

        assert!(store.ticks().is_empty());
        assert!(store.tick(T0 + 120_000).is_empty());
    }

    #[test]
    fn test_tick_emits_single_notification_on_edge() {
        let mut task = Task::with_id("T".to_string(), "Five seconds".to_string(), 5);
        task.start(T0);
        let mut store = store_with(vec![task]);
        assert!(store.ticks().is_armed("T"));

        let notices = store.tick(T0 + 6_000);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].task_id, "T");
        assert_eq!(store.list().get("T").unwrap().timer_status, TimerStatus::Finished);
        assert!(!store.ticks().is_armed("T"));

        let notices = store.tick(T0 + 7_000);
        assert!(notices.is_empty());
        assert_eq!(store.list().get("T").unwrap().timer_status, TimerStatus::Finished);
    }

    #[test]
    fn test_tick_before_estimate_is_quiet() {
        let mut store = store_with(abc());
        store.start("A", T0);
        let saves = store.repo.saves.borrow().len();

        assert!(store.tick(T0 + 250).is_empty());
        assert!(store.tick(T0 + 500).is_empty());
        assert_eq!(store.list().get("A").unwrap().timer_status, TimerStatus::Running);
        assert_eq!(store.repo.saves.borrow().len(), saves);
    }

    #[test]
    fn test_reorder_persists_new_order() {
        let mut store = store_with(abc());
        store.reorder("A", Some("C"), T0);
        assert_eq!(ids(&store), vec!["B", "A", "C"]);

        store.reorder("B", None, T0);
        assert_eq!(ids(&store), vec!["A", "C", "B"]);

        let saved = store.repo.saves.borrow().last().cloned().unwrap();
        assert_eq!(saved, store.list().clone());
    }

    #[test]
    fn test_unknown_ids_do_not_save() {
        let mut store = store_with(abc());
        store.start("Z", T0);
        store.delete_task("Z", T0);
        store.reorder("Z", None, T0);
        assert!(store.repo.saves.borrow().is_empty());
    }

    #[test]
    fn test_save_failure_is_reported_not_fatal() {
        let repo = MemoryRepository {
            initial: TaskList::new(abc()),
            fail: Cell::new(true),
            ..Default::default()
        };
        let mut store = TaskStore::open(repo, Duration::from_millis(250), T0);

        store.start("A", T0);
        assert_eq!(store.list().get("A").unwrap().timer_status, TimerStatus::Running);
        assert_eq!(store.save_error(), Some("Save failed: disk full"));

        // Still failing: the message stays
        store.pause("A", T0 + 1_000);
        assert_eq!(store.save_error(), Some("Save failed: disk full"));
    }

    #[test]
    fn test_successful_save_clears_save_error() {
        let repo = MemoryRepository {
            initial: TaskList::new(abc()),
            fail: Cell::new(true),
            ..Default::default()
        };
        let mut store = TaskStore::open(repo, Duration::from_millis(250), T0);

        store.start("A", T0);
        assert!(store.save_error().is_some());

        store.repo.fail.set(false);
        store.pause("A", T0 + 1_000);
        assert_eq!(store.save_error(), None);
        assert_eq!(store.repo.saves.borrow().len(), 1);
    }

    #[test]
    fn test_shutdown_clears_ticks() {
        let mut store = store_with(abc());
        store.start("A", T0);
        store.shutdown().unwrap();
        assert!(store.ticks().is_empty());
    }
}
