use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tagdex_path_match::normalize_for_storage;
use uuid::Uuid;

/// Color given to tags created without an explicit one.
pub const DEFAULT_TAG_COLOR: &str = "#FF6B6B";

/// Opaque tag identifier. Hosts may supply any string; freshly created tags
/// get a random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(String);

impl TagId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TagId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TagId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// What a tag is meant for. Advisory only: never checked against the
/// filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    File,
    Folder,
    #[default]
    Both,
}

impl TargetType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
            Self::Both => "both",
        }
    }
}

impl FromStr for TargetType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "folder" => Ok(Self::Folder),
            "both" => Ok(Self::Both),
            other => Err(StoreError::InvalidTargetType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
    /// Older tag files predate this field.
    #[serde(default)]
    pub target_type: TargetType,
    pub paths: Vec<String>,
}

impl Tag {
    /// A new tag with a generated id and no paths.
    pub fn new(name: impl Into<String>, color: impl Into<String>, target_type: TargetType) -> Self {
        Self {
            id: TagId::generate(),
            name: name.into(),
            color: color.into(),
            target_type,
            paths: Vec::new(),
        }
    }

    /// Rewrites every path into its storage form.
    pub fn normalize_paths(&mut self) {
        for path in &mut self.paths {
            *path = normalize_for_storage(path);
        }
    }
}
