//! Cross-platform filesystem and platform helpers.

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, find_project_root};
pub use platform::{OsFamily, get_app_data_dir, get_home_dir, is_windows};
