//! The server entry written into every target file.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Canonical MCP server entry: the object stored under a server's name.
///
/// Every supported target stores the same three fields; target-specific extras
/// (such as a `type` discriminator) are added by the shape adapters on a copy.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct McpServerEntry {
    /// Executable the editor launches
    pub command: String,

    /// Arguments passed to the command
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Environment variables set for the server process
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl McpServerEntry {
    /// Creates an entry with no arguments or environment.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    /// Renders the entry as a JSON object in `command`, `args`, `env` order.
    #[must_use]
    pub fn to_value(&self) -> Value {
        // Strings and string maps always serialize
        serde_json::to_value(self).unwrap_or_default()
    }
}

// Env values hold the access token, so only keys are shown.
impl fmt::Debug for McpServerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McpServerEntry")
            .field("command", &self.command)
            .field("args", &self.args)
            .field("env", &self.env.keys().collect::<Vec<_>>())
            .finish()
    }
}
