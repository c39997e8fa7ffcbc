use super::clock::Timestamp;
use super::enums::TimerStatus;
use super::notice::Notification;
use super::reorder::reorder;
use super::task::Task;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Rejected add/edit input. Nothing is changed when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task description cannot be empty")]
    EmptyDescription,
    #[error("Estimated duration must be a positive number of minutes")]
    InvalidDuration,
}

/// Optional changes applied by an edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub text: Option<String>,
    /// New estimate in seconds
    pub estimated_duration: Option<i64>,
}

/// Trimmed description, or an error if nothing is left
pub fn validate_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

pub fn validate_duration(seconds: i64) -> Result<u64, ValidationError> {
    if seconds <= 0 {
        return Err(ValidationError::InvalidDuration);
    }
    Ok(seconds as u64)
}

/// Parse a minutes field as typed by the user and convert to seconds
pub fn parse_minutes(input: &str) -> Result<i64, ValidationError> {
    let minutes: i64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidDuration)?;
    minutes_to_seconds(minutes)
}

pub fn minutes_to_seconds(minutes: i64) -> Result<i64, ValidationError> {
    if minutes <= 0 {
        return Err(ValidationError::InvalidDuration);
    }
    minutes.checked_mul(60).ok_or(ValidationError::InvalidDuration)
}

/// Ordered task snapshot. Every operation returns a new list; display order is list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    #[cfg(test)]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Build a list from stored records: repairs each record and drops repeated IDs
    pub fn from_stored(tasks: Vec<Task>) -> Self {
        let mut seen = HashSet::new();
        let tasks = tasks
            .into_iter()
            .filter(|t| seen.insert(t.id.clone()))
            .map(|mut t| {
                t.normalize();
                t
            })
            .collect();
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// IDs of tasks currently counting toward their estimate
    pub fn running_ids(&self) -> Vec<String> {
        self.tasks
            .iter()
            .filter(|t| t.timer_status == TimerStatus::Running)
            .map(|t| t.id.clone())
            .collect()
    }

    pub fn add_task(&self, text: &str, estimated_duration: i64) -> Result<Self, ValidationError> {
        let text = validate_text(text)?;
        let estimate = validate_duration(estimated_duration)?;
        Ok(self.prepend(Task::new(text, estimate)))
    }

    /// Put an already-built task at the top
    pub fn prepend(&self, task: Task) -> Self {
        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.push(task);
        tasks.extend(self.tasks.iter().cloned());
        Self { tasks }
    }

    pub fn delete_task(&self, id: &str) -> Self {
        Self {
            tasks: self.tasks.iter().filter(|t| t.id != id).cloned().collect(),
        }
    }

    /// Change text and/or estimate. Timer state is untouched, even if the new
    /// estimate is already exceeded.
    pub fn edit_task(&self, id: &str, edit: &TaskEdit) -> Result<Self, ValidationError> {
        let text = edit.text.as_deref().map(validate_text).transpose()?;
        let estimate = edit.estimated_duration.map(validate_duration).transpose()?;

        Ok(self.update(id, |task| {
            if let Some(text) = text {
                task.text = text;
            }
            if let Some(estimate) = estimate {
                task.estimated_duration = estimate;
            }
        }))
    }

    pub fn toggle_complete(&self, id: &str, now: Timestamp) -> Self {
        self.update(id, |task| task.toggle_complete(now))
    }

    pub fn start(&self, id: &str, now: Timestamp) -> Self {
        self.update(id, |task| {
            task.start(now);
        })
    }

    pub fn pause(&self, id: &str, now: Timestamp) -> Self {
        self.update(id, |task| {
            task.pause(now);
        })
    }

    pub fn reset(&self, id: &str) -> Self {
        self.update(id, |task| {
            task.reset();
        })
    }

    /// Apply the Running -> Finished check to one task. A notification is
    /// returned only when the transition actually happened.
    pub fn finish_if_due(&self, id: &str, now: Timestamp) -> (Self, Option<Notification>) {
        let mut notice = None;
        let list = self.update(id, |task| {
            if task.finish_if_due(now) {
                notice = Some(Notification::time_up(task));
            }
        });
        (list, notice)
    }

    pub fn reorder(&self, dragged_id: &str, target_id: Option<&str>) -> Self {
        Self {
            tasks: reorder(&self.tasks, dragged_id, target_id),
        }
    }

    fn update(&self, id: &str, apply: impl FnOnce(&mut Task)) -> Self {
        let mut tasks = self.tasks.clone();
        if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
            apply(task);
        }
        Self { tasks }
    }
}
