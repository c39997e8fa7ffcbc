pub mod files;
pub mod repository;
pub mod settings;

pub use files::{
    atomic_write, ensure_dir, init_data_dir, log_file, resolve_data_dir, settings_file,
};
pub use repository::{JsonFileRepository, TaskRepository};
pub use settings::{load_settings, save_settings, Settings};
