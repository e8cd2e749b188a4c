//! Target shape adapters.
//!
//! Each consumer reads MCP servers from a different place in its JSON document:
//!
//! | Shape | Container path | Extra entry field |
//! |---|---|---|
//! | [`TargetShape::WorkspaceNested`] | `servers` | none |
//! | [`TargetShape::UserNested`] | `mcp.servers` | none |
//! | [`TargetShape::FlatWithTypeTag`] | `mcpServers` | `"type": "stdio"` |
//! | [`TargetShape::FlatPlain`] | `mcpServers` | none |
//!
//! Adapters are pure: they create missing container objects, upsert the entry
//! under its name and leave every other key alone. They never replace a value
//! that exists but is not an object; that is reported as a [`ShapeError`] so the
//! file is left untouched.

use super::models::McpServerEntry;
use serde_json::{Map, Value};
use thiserror::Error;

/// Where and how a target stores its server entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetShape {
    /// Workspace `mcp.json`: `{"servers": {...}}`
    WorkspaceNested,
    /// Editor user settings: `{"mcp": {"servers": {...}}}`
    UserNested,
    /// `{"mcpServers": {...}}` with a `type` discriminator on each entry
    FlatWithTypeTag,
    /// `{"mcpServers": {...}}`
    FlatPlain,
}

/// A value on the adapter's path exists but is not a JSON object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{location}` is {found}, expected an object")]
pub struct ShapeError {
    /// Dotted path of the offending value, or "the document root"
    pub location: String,
    /// JSON type that was found there
    pub found: &'static str,
}

type Adapter = fn(&mut Value, &str, &McpServerEntry) -> Result<(), ShapeError>;

const WORKSPACE_PATH: &[&str] = &["servers"];
const USER_PATH: &[&str] = &["mcp", "servers"];
const FLAT_PATH: &[&str] = &["mcpServers"];

/// Discriminator the stdio-typed target requires on every entry.
const TYPE_TAG: (&str, &str) = ("type", "stdio");

impl TargetShape {
    /// Upserts `entry` under `name` in `document`.
    pub fn apply(
        self,
        document: &mut Value,
        name: &str,
        entry: &McpServerEntry,
    ) -> Result<(), ShapeError> {
        (self.adapter())(document, name, entry)
    }

    /// Keys leading from the document root to the server container.
    #[must_use]
    pub const fn container_path(self) -> &'static [&'static str] {
        match self {
            Self::WorkspaceNested => WORKSPACE_PATH,
            Self::UserNested => USER_PATH,
            Self::FlatWithTypeTag | Self::FlatPlain => FLAT_PATH,
        }
    }

    /// Server container of an existing document, if present and an object.
    #[must_use]
    pub fn servers(self, document: &Value) -> Option<&Map<String, Value>> {
        self.container_path()
            .iter()
            .try_fold(document, |current, key| current.get(*key))
            .and_then(Value::as_object)
    }

    const fn adapter(self) -> Adapter {
        match self {
            Self::WorkspaceNested => workspace_nested,
            Self::UserNested => user_nested,
            Self::FlatWithTypeTag => flat_with_type_tag,
            Self::FlatPlain => flat_plain,
        }
    }
}

fn workspace_nested(
    document: &mut Value,
    name: &str,
    entry: &McpServerEntry,
) -> Result<(), ShapeError> {
    upsert_at(document, WORKSPACE_PATH, name, entry.to_value())
}

fn user_nested(document: &mut Value, name: &str, entry: &McpServerEntry) -> Result<(), ShapeError> {
    upsert_at(document, USER_PATH, name, entry.to_value())
}

fn flat_with_type_tag(
    document: &mut Value,
    name: &str,
    entry: &McpServerEntry,
) -> Result<(), ShapeError> {
    let mut tagged = entry.to_value();
    if let Value::Object(fields) = &mut tagged {
        fields.insert(TYPE_TAG.0.to_string(), Value::String(TYPE_TAG.1.to_string()));
    }
    upsert_at(document, FLAT_PATH, name, tagged)
}

fn flat_plain(document: &mut Value, name: &str, entry: &McpServerEntry) -> Result<(), ShapeError> {
    upsert_at(document, FLAT_PATH, name, entry.to_value())
}

/// Walks `path` from the root, creating empty objects for missing (or null)
/// levels, then sets `name` in the innermost object.
fn upsert_at(
    document: &mut Value,
    path: &[&str],
    name: &str,
    entry: Value,
) -> Result<(), ShapeError> {
    let root_kind = json_kind(document);
    let Some(mut current) = document.as_object_mut() else {
        return Err(ShapeError {
            location: "the document root".to_string(),
            found: root_kind,
        });
    };

    for (depth, key) in path.iter().enumerate() {
        let slot = current
            .entry((*key).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if slot.is_null() {
            *slot = Value::Object(Map::new());
        }

        let kind = json_kind(slot);
        current = match slot.as_object_mut() {
            Some(object) => object,
            None => {
                return Err(ShapeError {
                    location: path[..=depth].join("."),
                    found: kind,
                });
            }
        };
    }

    current.insert(name.to_string(), entry);
    Ok(())
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
