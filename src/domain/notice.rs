use super::task::Task;
use uuid::Uuid;

/// One-shot message emitted when a task's timer crosses its estimate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub task_id: String,
}

impl Notification {
    pub fn time_up(task: &Task) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            message: format!("Task \"{}\" time is up! Now tracking overtime.", task.text),
            task_id: task.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_up_message() {
        let task = Task::with_id("t9".to_string(), "Stretch".to_string(), 60);
        let notice = Notification::time_up(&task);
        assert_eq!(notice.task_id, "t9");
        assert_eq!(notice.message, "Task \"Stretch\" time is up! Now tracking overtime.");
        assert!(!notice.id.is_empty());
    }
}
