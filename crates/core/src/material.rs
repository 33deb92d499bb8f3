//! Block type identifiers (`minecraft:oak_door`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace assumed when a name omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaterialError {
    #[error("block type name is empty")]
    Empty,
    #[error("invalid block type `{0}` (expected lowercase `namespace:path`)")]
    Invalid(String),
}

/// A namespaced block type. Stored in its canonical `namespace:path` form,
/// which is also its serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Material {
    id: String,
    split: usize,
}

impl Material {
    /// Parse `namespace:path` or a bare `path` in [`DEFAULT_NAMESPACE`].
    pub fn parse(input: &str) -> Result<Self, MaterialError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(MaterialError::Empty);
        }
        let (namespace, path) = input.split_once(':').unwrap_or((DEFAULT_NAMESPACE, input));
        let namespace_ok = !namespace.is_empty()
            && namespace
                .chars()
                .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'));
        let path_ok = !path.is_empty()
            && path
                .chars()
                .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/'));
        if !namespace_ok || !path_ok {
            return Err(MaterialError::Invalid(input.to_string()));
        }
        Ok(Self {
            id: format!("{namespace}:{path}"),
            split: namespace.len(),
        })
    }

    /// The empty block type every cleared cell is set to.
    pub fn air() -> Self {
        Self {
            id: format!("{DEFAULT_NAMESPACE}:air"),
            split: DEFAULT_NAMESPACE.len(),
        }
    }

    pub fn is_air(&self) -> bool {
        self.namespace() == DEFAULT_NAMESPACE && self.path() == "air"
    }

    pub fn namespace(&self) -> &str {
        &self.id[..self.split]
    }

    pub fn path(&self) -> &str {
        &self.id[self.split + 1..]
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::air()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl FromStr for Material {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Material {
    type Error = MaterialError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Material> for String {
    fn from(material: Material) -> Self {
        material.id
    }
}
