//! Platform detection and per-user directory lookup.
//!
//! Target configuration files live in OS-conventional locations, so the installer
//! needs to know which OS family it is on and where the user's home and roaming
//! application-data directories are.

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Operating-system family, as far as configuration paths are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    /// Windows: per-user configs under `%APPDATA%` and `%USERPROFILE%`
    Windows,
    /// macOS: per-user configs under `~/Library/Application Support`
    MacOs,
    /// Linux and other Unix-likes: per-user configs under `~/.config`
    Linux,
}

impl OsFamily {
    /// The family this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }
}

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the home directory of the current user.
///
/// # Platform Behavior
///
/// - **Windows**: `%USERPROFILE%`
/// - **Unix/Linux/macOS**: `$HOME`
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Returns the roaming application-data directory (`%APPDATA%`) on Windows.
///
/// Only meaningful on Windows; other platforms derive their paths from the home
/// directory instead.
pub fn get_app_data_dir() -> Result<PathBuf> {
    dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine the application data directory.\n\n\
             On Windows: Check that the APPDATA environment variable is set"
        )
    })
}

/// Prefixes paths longer than 260 characters with `\\?\` so Windows APIs accept them.
#[cfg(windows)]
pub fn windows_long_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if path_str.len() > 260 && !path_str.starts_with(r"\\?\") {
        let absolute_path = if path.is_relative() {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(path)
        } else {
            path.to_path_buf()
        };

        let absolute_str = absolute_path.to_string_lossy();
        if absolute_str.len() > 260 {
            if let Some(stripped) = absolute_str.strip_prefix(r"\\") {
                PathBuf::from(format!(r"\\?\UNC\{stripped}"))
            } else {
                PathBuf::from(format!(r"\\?\{absolute_str}"))
            }
        } else {
            absolute_path
        }
    } else {
        path.to_path_buf()
    }
}

/// No-op on platforms without the 260-character path limit.
#[cfg(not(windows))]
#[must_use]
pub fn windows_long_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}
