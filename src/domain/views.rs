use super::enums::TimerStatus;
use super::task::Task;

/// Get status badge text
pub fn status_badge(task: &Task) -> &'static str {
    if task.is_completed {
        return "✓ DONE";
    }
    match task.timer_status {
        TimerStatus::Running => "⏱ RUNNING",
        TimerStatus::Paused => "⏸ PAUSED",
        TimerStatus::Idle => "· IDLE",
        TimerStatus::Finished => "⏰ OVERTIME",
    }
}

/// Checkbox glyph for the completion column
pub fn check_glyph(task: &Task) -> &'static str {
    if task.is_completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Counts shown in the list title: (open, completed, running)
pub fn summary_counts(tasks: &[Task]) -> (usize, usize, usize) {
    let completed = tasks.iter().filter(|t| t.is_completed).count();
    let running = tasks
        .iter()
        .filter(|t| t.timer_status.has_open_interval())
        .count();
    (tasks.len() - completed, completed, running)
}
