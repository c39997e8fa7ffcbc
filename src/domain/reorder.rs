use super::task::Task;

/// Move `dragged_id` so it sits immediately before `target_id`.
///
/// The insertion index is looked up after the dragged task has been removed.
/// `None`, or a target that is not in the list, moves the task to the end.
/// An unknown dragged ID or dragging onto itself leaves the order unchanged.
pub fn reorder(tasks: &[Task], dragged_id: &str, target_id: Option<&str>) -> Vec<Task> {
    if target_id == Some(dragged_id) {
        return tasks.to_vec();
    }
    let Some(dragged_index) = tasks.iter().position(|t| t.id == dragged_id) else {
        return tasks.to_vec();
    };

    let mut reordered = tasks.to_vec();
    let dragged = reordered.remove(dragged_index);

    let insert_at = target_id
        .and_then(|target| reordered.iter().position(|t| t.id == target))
        .unwrap_or(reordered.len());
    reordered.insert(insert_at, dragged);
    reordered
}

/// Drop target that moves a task one slot up, if it can move
pub fn move_up_target(tasks: &[Task], id: &str) -> Option<Option<String>> {
    let index = tasks.iter().position(|t| t.id == id)?;
    if index == 0 {
        return None;
    }
    Some(Some(tasks[index - 1].id.clone()))
}

/// Drop target that moves a task one slot down, if it can move.
/// Moving past the second-to-last task means dropping at the end.
pub fn move_down_target(tasks: &[Task], id: &str) -> Option<Option<String>> {
    let index = tasks.iter().position(|t| t.id == id)?;
    if index + 1 >= tasks.len() {
        return None;
    }
    Some(tasks.get(index + 2).map(|t| t.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(ids: &[&str]) -> Vec<Task> {
        ids.iter()
            .map(|id| Task::with_id(id.to_string(), format!("Task {}", id), 60))
            .collect()
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_move_forward_before_target() {
        let tasks = list(&["A", "B", "C"]);
        assert_eq!(ids(&reorder(&tasks, "A", Some("C"))), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_move_backward_before_target() {
        let tasks = list(&["A", "B", "C"]);
        assert_eq!(ids(&reorder(&tasks, "C", Some("A"))), vec!["C", "A", "B"]);
        assert_eq!(ids(&reorder(&tasks, "C", Some("B"))), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_move_to_end() {
        let tasks = list(&["A", "B", "C"]);
        assert_eq!(ids(&reorder(&tasks, "A", None)), vec!["B", "C", "A"]);
        assert_eq!(ids(&reorder(&tasks, "C", None)), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_unknown_target_moves_to_end() {
        let tasks = list(&["A", "B", "C"]);
        assert_eq!(ids(&reorder(&tasks, "B", Some("Q"))), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_unknown_dragged_is_noop() {
        let tasks = list(&["A", "B", "C"]);
        assert_eq!(reorder(&tasks, "Z", Some("A")), tasks);
    }

    #[test]
    fn test_drag_onto_itself_is_noop() {
        let tasks = list(&["A", "B", "C"]);
        assert_eq!(reorder(&tasks, "B", Some("B")), tasks);
    }

    #[test]
    fn test_other_tasks_keep_relative_order() {
        let tasks = list(&["A", "B", "C", "D", "E"]);
        let moved = reorder(&tasks, "B", Some("E"));
        assert_eq!(ids(&moved), vec!["A", "C", "D", "B", "E"]);
    }

    #[test]
    fn test_reorder_keeps_task_state() {
        let mut tasks = list(&["A", "B"]);
        tasks[0].start(1_000);
        let moved = reorder(&tasks, "A", None);
        assert_eq!(moved[1], tasks[0]);
    }

    #[test]
    fn test_move_up_and_down_targets() {
        let tasks = list(&["A", "B", "C"]);

        assert_eq!(move_up_target(&tasks, "A"), None);
        assert_eq!(move_up_target(&tasks, "C"), Some(Some("B".to_string())));

        assert_eq!(move_down_target(&tasks, "A"), Some(Some("C".to_string())));
        assert_eq!(move_down_target(&tasks, "B"), Some(None));
        assert_eq!(move_down_target(&tasks, "C"), None);
        assert_eq!(move_down_target(&tasks, "Z"), None);

        let down = reorder(&tasks, "A", Some("C"));
        assert_eq!(ids(&down), vec!["B", "A", "C"]);
    }
}
