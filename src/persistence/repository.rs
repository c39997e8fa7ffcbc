use super::files::{atomic_write, read_file, tasks_file};
use crate::domain::{Task, TaskList};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where the task list is read from at startup and written to after every change
pub trait TaskRepository {
    /// Stored list, or an empty one if nothing usable is stored
    fn load(&self) -> TaskList;

    fn save(&self, list: &TaskList) -> Result<()>;
}

impl<T: TaskRepository + ?Sized> TaskRepository for Box<T> {
    fn load(&self) -> TaskList {
        (**self).load()
    }

    fn save(&self, list: &TaskList) -> Result<()> {
        (**self).save(list)
    }
}

/// Task list stored as a JSON array in tasks.json
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Repository for tasks.json inside a data directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(tasks_file(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskRepository for JsonFileRepository {
    fn load(&self) -> TaskList {
        let path = self.path();
        let content = match read_file(path) {
            Ok(Some(content)) => content,
            Ok(None) => {
                debug!(path = %path.display(), "no stored tasks");
                return TaskList::default();
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "could not read tasks, starting empty"
                );
                return TaskList::default();
            }
        };

        match serde_json::from_str::<Vec<Task>>(&content) {
            Ok(tasks) => {
                let list = TaskList::from_stored(tasks);
                debug!(count = list.len(), "loaded tasks");
                list
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "stored tasks are unreadable, starting empty"
                );
                TaskList::default()
            }
        }
    }

    fn save(&self, list: &TaskList) -> Result<()> {
        let json = serde_json::to_string_pretty(list).context("Failed to serialize tasks")?;
        atomic_write(self.path(), &json)
    }
}
