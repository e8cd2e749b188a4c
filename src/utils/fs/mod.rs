//! File system utilities.
//!
//! - **Atomic writes**: files are written to a sibling temp file and renamed into place
//! - **Directories**: parent directories are created on demand
//! - **Discovery**: locating the server's source checkout

pub mod atomic;
pub mod dirs;
pub mod paths;

pub use atomic::atomic_write;
pub use dirs::{ensure_dir, ensure_parent_dir};
pub use paths::find_project_root;
