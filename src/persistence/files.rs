use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory (local or in the home directory)
pub const DATA_DIR_NAME: &str = ".timebox";

const TASKS_FILE: &str = "tasks.json";
const SETTINGS_FILE: &str = "settings.json";
const LOG_FILE: &str = "timebox.log";

/// Resolve the data directory: explicit override, then a local .timebox found
/// by walking up from the current directory, then ~/.timebox
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Find local .timebox directory by walking up the directory tree
fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(DATA_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Ensure the directory exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Initialize the data directory for `timebox init`: the explicit override
/// when given, else a local .timebox in `cwd`
pub fn init_data_dir(override_dir: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => init_dir(dir),
        None => init_local_dir(cwd),
    }
}

/// Initialize a local .timebox directory in `parent`
pub fn init_local_dir(parent: &Path) -> Result<PathBuf> {
    init_dir(&parent.join(DATA_DIR_NAME))
}

/// Create a fresh data directory at `dir`; fails if it already exists
fn init_dir(dir: &Path) -> Result<PathBuf> {
    if dir.exists() {
        anyhow::bail!("Data directory already exists: {}", dir.display());
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    Ok(dir.to_path_buf())
}

pub fn tasks_file(dir: &Path) -> PathBuf {
    dir.join(TASKS_FILE)
}

pub fn settings_file(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}

pub fn log_file(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return None if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
