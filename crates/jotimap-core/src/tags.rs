//! User-assigned color tags for groups.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Marker color a user assigns to a group; groups sharing a tag form a
/// territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Orange,
    Blue,
    Red,
    Purple,
}

impl ColorTag {
    pub const ALL: [ColorTag; 4] = [
        ColorTag::Orange,
        ColorTag::Blue,
        ColorTag::Red,
        ColorTag::Purple,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ColorTag::Orange => "orange",
            ColorTag::Blue => "blue",
            ColorTag::Red => "red",
            ColorTag::Purple => "purple",
        }
    }
}

impl std::fmt::Display for ColorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color tag '{0}'; expected orange, blue, red or purple")]
pub struct UnknownColorTag(pub String);

impl FromStr for ColorTag {
    type Err = UnknownColorTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        ColorTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == lowered)
            .ok_or_else(|| UnknownColorTag(s.to_owned()))
    }
}

/// Group id → color tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagAssignments(BTreeMap<String, ColorTag>);

impl TagAssignments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag `id`, returning the tag it replaced.
    pub fn assign(&mut self, id: impl Into<String>, tag: ColorTag) -> Option<ColorTag> {
        self.0.insert(id.into(), tag)
    }

    pub fn remove(&mut self, id: &str) -> Option<ColorTag> {
        self.0.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<ColorTag> {
        self.0.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColorTag)> {
        self.0.iter().map(|(id, tag)| (id.as_str(), *tag))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ColorTag)> for TagAssignments {
    fn from_iter<I: IntoIterator<Item = (String, ColorTag)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Deserialize)]
struct TagsFile {
    #[serde(default)]
    tags: BTreeMap<String, ColorTag>,
}

/// Load initial tag assignments from a YAML file of the form
/// `tags: { <group id>: <color> }`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or holds an
/// empty group id.
pub fn load_tags(path: &Path) -> Result<TagAssignments, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TagsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_tags(&content)
}

fn parse_tags(content: &str) -> Result<TagAssignments, ConfigError> {
    let file: TagsFile = serde_yaml::from_str(content)?;

    if file.tags.keys().any(|id| id.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "group id must be non-empty".to_string(),
        ));
    }

    Ok(TagAssignments(file.tags))
}
