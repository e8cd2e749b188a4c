//! Supported editors and desktop apps, and where their configuration lives.
//!
//! Each [`Target`] resolves to one or two [`TargetDescriptor`]s: a file path plus
//! the [`TargetShape`] used inside it. VS Code has a workspace file with a
//! user-settings fallback; every other target has a single per-user file.
//!
//! | Target | Linux | macOS | Windows |
//! |---|---|---|---|
//! | VS Code (user) | `~/.config/Code/User/settings.json` | `~/Library/Application Support/Code/User/settings.json` | `%APPDATA%\Code\User\settings.json` |
//! | Claude Desktop | `~/.config/Claude/claude_desktop_config.json` | `~/Library/Application Support/Claude/claude_desktop_config.json` | `%APPDATA%\Claude\claude_desktop_config.json` |
//! | Claude Code | `~/.claude.json` | `~/.claude.json` | `%USERPROFILE%\.claude.json` |
//! | Cursor | `~/.cursor/mcp.json` | `~/.cursor/mcp.json` | `%APPDATA%\Cursor\mcp.json` |
//!
//! The VS Code workspace file is always `.vscode/mcp.json` under the working directory.

use crate::core::InstallerError;
use crate::mcp::TargetShape;
use crate::utils::platform::{OsFamily, get_app_data_dir, get_home_dir};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A configuration consumer the installer can update.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// Visual Studio Code
    #[value(name = "vscode", alias = "vs-code")]
    #[serde(rename = "vscode", alias = "vs-code")]
    VsCode,
    /// Claude Desktop app
    ClaudeDesktop,
    /// Claude Code CLI
    ClaudeCode,
    /// Cursor editor
    Cursor,
}

impl Target {
    /// Every target, in prompt order.
    pub const ALL: [Self; 4] = [Self::VsCode, Self::ClaudeDesktop, Self::ClaudeCode, Self::Cursor];

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::VsCode => "VS Code",
            Self::ClaudeDesktop => "Claude Desktop",
            Self::ClaudeCode => "Claude Code",
            Self::Cursor => "Cursor",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A resolved file plus the shape used inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Configuration file
    pub path: PathBuf,
    /// Where entries go within the file
    pub shape: TargetShape,
}

/// Where one target's entries are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPlan {
    /// Target being configured
    pub target: Target,
    /// First file to try
    pub primary: TargetDescriptor,
    /// Tried once if the primary write fails
    pub fallback: Option<TargetDescriptor>,
}

/// Base directories the per-target paths are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// OS family deciding the layout
    pub family: OsFamily,
    /// User home (`$HOME` / `%USERPROFILE%`)
    pub home: Option<PathBuf>,
    /// Roaming app data (`%APPDATA%`), used on Windows only
    pub app_data: Option<PathBuf>,
    /// Directory holding the workspace `.vscode` folder
    pub workspace: PathBuf,
}

impl PlatformDirs {
    /// Detects directories for the running platform.
    ///
    /// Lookup failures are kept as `None` so that only the affected targets fail.
    pub fn detect(workspace: &Path) -> Self {
        let family = OsFamily::current();
        let app_data = if family == OsFamily::Windows {
            get_app_data_dir()
                .map_err(|e| tracing::warn!("{e}"))
                .ok()
        } else {
            None
        };

        Self {
            family,
            home: get_home_dir().map_err(|e| tracing::warn!("{e}")).ok(),
            app_data,
            workspace: workspace.to_path_buf(),
        }
    }

    /// Plans the files written for `target`.
    pub fn plan(&self, target: Target) -> Result<TargetPlan, InstallerError> {
        let unavailable = || InstallerError::PathUnavailable {
            target: target.display_name().to_string(),
        };

        let (primary, fallback) = match target {
            Target::VsCode => {
                let workspace = TargetDescriptor {
                    path: self.workspace.join(".vscode").join("mcp.json"),
                    shape: TargetShape::WorkspaceNested,
                };
                let user = self.vscode_user_settings().map(|path| TargetDescriptor {
                    path,
                    shape: TargetShape::UserNested,
                });
                (workspace, user)
            }
            Target::ClaudeDesktop => (
                TargetDescriptor {
                    path: self.claude_desktop_config().ok_or_else(unavailable)?,
                    shape: TargetShape::FlatPlain,
                },
                None,
            ),
            Target::ClaudeCode => (
                TargetDescriptor {
                    path: self.home.as_ref().ok_or_else(unavailable)?.join(".claude.json"),
                    shape: TargetShape::FlatWithTypeTag,
                },
                None,
            ),
            Target::Cursor => (
                TargetDescriptor {
                    path: self.cursor_config().ok_or_else(unavailable)?,
                    shape: TargetShape::FlatPlain,
                },
                None,
            ),
        };

        Ok(TargetPlan {
            target,
            primary,
            fallback,
        })
    }

    /// Per-user application config root: `%APPDATA%`, `~/Library/Application Support`, `~/.config`.
    fn app_config_root(&self) -> Option<PathBuf> {
        match self.family {
            OsFamily::Windows => self.app_data.clone(),
            OsFamily::MacOs => {
                self.home.as_ref().map(|home| home.join("Library").join("Application Support"))
            }
            OsFamily::Linux => self.home.as_ref().map(|home| home.join(".config")),
        }
    }

    fn vscode_user_settings(&self) -> Option<PathBuf> {
        self.app_config_root().map(|root| root.join("Code").join("User").join("settings.json"))
    }

    fn claude_desktop_config(&self) -> Option<PathBuf> {
        self.app_config_root().map(|root| root.join("Claude").join("claude_desktop_config.json"))
    }

    fn cursor_config(&self) -> Option<PathBuf> {
        match self.family {
            OsFamily::Windows => self.app_data.as_ref().map(|root| root.join("Cursor").join("mcp.json")),
            OsFamily::MacOs | OsFamily::Linux => {
                self.home.as_ref().map(|home| home.join(".cursor").join("mcp.json"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs(family: OsFamily) -> PlatformDirs {
        PlatformDirs {
            family,
            home: Some(PathBuf::from("/home/u")),
            app_data: Some(PathBuf::from("/appdata")),
            workspace: PathBuf::from("/work/repo"),
        }
    }

    #[test]
    fn test_linux_paths() {
        let dirs = dirs(OsFamily::Linux);

        let vscode = dirs.plan(Target::VsCode).unwrap();
        assert_eq!(vscode.primary.path, PathBuf::from("/work/repo/.vscode/mcp.json"));
        assert_eq!(vscode.primary.shape, TargetShape::WorkspaceNested);
        let fallback = vscode.fallback.unwrap();
        assert_eq!(fallback.path, PathBuf::from("/home/u/.config/Code/User/settings.json"));
        assert_eq!(fallback.shape, TargetShape::UserNested);

        let desktop = dirs.plan(Target::ClaudeDesktop).unwrap();
        assert_eq!(
            desktop.primary.path,
            PathBuf::from("/home/u/.config/Claude/claude_desktop_config.json")
        );
        assert_eq!(desktop.primary.shape, TargetShape::FlatPlain);
        assert!(desktop.fallback.is_none());

        let code = dirs.plan(Target::ClaudeCode).unwrap();
        assert_eq!(code.primary.path, PathBuf::from("/home/u/.claude.json"));
        assert_eq!(code.primary.shape, TargetShape::FlatWithTypeTag);

        let cursor = dirs.plan(Target::Cursor).unwrap();
        assert_eq!(cursor.primary.path, PathBuf::from("/home/u/.cursor/mcp.json"));
        assert_eq!(cursor.primary.shape, TargetShape::FlatPlain);
    }

    #[test]
    fn test_macos_paths() {
        let dirs = dirs(OsFamily::MacOs);

        assert_eq!(
            dirs.plan(Target::VsCode).unwrap().fallback.unwrap().path,
            PathBuf::from("/home/u/Library/Application Support/Code/User/settings.json")
        );
        assert_eq!(
            dirs.plan(Target::ClaudeDesktop).unwrap().primary.path,
            PathBuf::from("/home/u/Library/Application Support/Claude/claude_desktop_config.json")
        );
        assert_eq!(
            dirs.plan(Target::Cursor).unwrap().primary.path,
            PathBuf::from("/home/u/.cursor/mcp.json")
        );
    }

    #[test]
    fn test_windows_paths_use_app_data() {
        let dirs = dirs(OsFamily::Windows);

        assert_eq!(
            dirs.plan(Target::ClaudeDesktop).unwrap().primary.path,
            Path::new("/appdata").join("Claude").join("claude_desktop_config.json")
        );
        assert_eq!(
            dirs.plan(Target::Cursor).unwrap().primary.path,
            Path::new("/appdata").join("Cursor").join("mcp.json")
        );
        assert_eq!(
            dirs.plan(Target::ClaudeCode).unwrap().primary.path,
            Path::new("/home/u").join(".claude.json")
        );
    }

    #[test]
    fn test_missing_home_only_affects_home_targets() {
        let dirs = PlatformDirs {
            home: None,
            ..dirs(OsFamily::Linux)
        };

        let vscode = dirs.plan(Target::VsCode).unwrap();
        assert!(vscode.fallback.is_none());
        assert!(matches!(
            dirs.plan(Target::ClaudeCode),
            Err(InstallerError::PathUnavailable { .. })
        ));
    }

    #[test]
    fn test_target_names() {
        assert_eq!(Target::VsCode.to_string(), "VS Code");
        let parsed: Target = serde_json::from_str("\"claude-code\"").unwrap();
        assert_eq!(parsed, Target::ClaudeCode);
        let parsed: Target = serde_json::from_str("\"vscode\"").unwrap();
        assert_eq!(parsed, Target::VsCode);
    }
}
