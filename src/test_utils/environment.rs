//! Isolated home and project directories for tests.

use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::{DEFAULT_BINARY_NAME, PROJECT_MARKER};

/// A temporary `HOME` plus a server checkout (`go.mod`, `bin/<binary>`).
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub home_dir: PathBuf,
    pub project_dir: PathBuf,
}

impl TestEnvironment {
    /// Creates empty home and project directories.
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let home_dir = temp_dir.path().join("home");
        let project_dir = temp_dir.path().join("project");

        fs::create_dir_all(&home_dir)?;
        fs::create_dir_all(&project_dir)?;
        fs::write(project_dir.join(PROJECT_MARKER), "module gitlab-mcp-server\n")?;

        Ok(Self {
            temp_dir,
            home_dir,
            project_dir,
        })
    }

    /// Creates the environment with a built server binary.
    pub fn with_binary() -> Result<Self> {
        let env = Self::new()?;
        let bin = env.project_dir.join("bin");
        fs::create_dir_all(&bin)?;
        fs::write(bin.join(DEFAULT_BINARY_NAME), "#!/bin/sh\n")?;
        Ok(env)
    }

    /// Path of a file relative to the home directory.
    pub fn home_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.home_dir.join(relative)
    }

    /// Writes `content` below the home directory, creating parents.
    pub fn write_home_file(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.home_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Parses a JSON file.
    pub fn read_json(&self, path: impl AsRef<Path>) -> Result<Value> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}
