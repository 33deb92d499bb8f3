//! Block descriptors: a block type plus its placement-dependent properties.
//!
//! A [`BlockData`] is an owned value. Reading it from a world store yields a
//! copy, so a captured descriptor never changes when the cell is rewritten.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::pos::Face;
use crate::material::{Material, MaterialError};

/// Errors produced while parsing a descriptor string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockDataError {
    #[error("invalid block type: {0}")]
    Material(#[from] MaterialError),
    #[error("unterminated property list in `{0}`")]
    Unterminated(String),
    #[error("malformed property `{0}` (expected name=value)")]
    Property(String),
}

/// Which cell of a two-tall door a block is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorHalf {
    Upper,
    Lower,
}

/// Orientation and shape descriptor of one block cell.
///
/// String form: `minecraft:oak_door[facing=north,half=lower,open=false]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockData {
    material: Material,
    properties: BTreeMap<String, String>,
}

impl BlockData {
    /// Descriptor with no properties set.
    pub fn new(material: Material) -> Self {
        Self {
            material,
            properties: BTreeMap::new(),
        }
    }

    /// The empty cell.
    pub fn air() -> Self {
        Self::new(Material::air())
    }

    /// Builder-style property assignment.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.properties.insert(name.to_string(), value.into());
    }

    /// The stored `facing` property, if it names a face.
    pub fn facing(&self) -> Option<Face> {
        self.get("facing").and_then(|v| v.parse().ok())
    }

    pub fn with_facing(self, face: Face) -> Self {
        self.with("facing", face.as_str())
    }

    /// Door bisection half (`half=upper|lower`).
    pub fn door_half(&self) -> Option<DoorHalf> {
        match self.get("half") {
            Some("upper") => Some(DoorHalf::Upper),
            Some("lower") => Some(DoorHalf::Lower),
            _ => None,
        }
    }

    /// True when the `open` property is set to `true`.
    pub fn is_open(&self) -> bool {
        self.get("open") == Some("true")
    }

    pub fn set_open(&mut self, open: bool) {
        self.set("open", if open { "true" } else { "false" });
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.set_open(open);
        self
    }

    /// Mounting surface for buttons and levers (`face=floor|wall|ceiling`).
    pub fn attach_face(&self) -> Option<&str> {
        self.get("face")
    }
}

impl fmt::Display for BlockData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.material)?;
        if self.properties.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, (name, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("]")
    }
}

impl FromStr for BlockData {
    type Err = BlockDataError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (head, props) = match input.split_once('[') {
            Some((head, rest)) => {
                let body = rest
                    .strip_suffix(']')
                    .ok_or_else(|| BlockDataError::Unterminated(input.to_string()))?;
                (head, Some(body))
            }
            None => (input, None),
        };

        let mut data = BlockData::new(Material::parse(head)?);
        if let Some(body) = props {
            for pair in body.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let (name, value) = pair
                    .split_once('=')
                    .ok_or_else(|| BlockDataError::Property(pair.to_string()))?;
                let (name, value) = (name.trim(), value.trim());
                if name.is_empty() || value.is_empty() {
                    return Err(BlockDataError::Property(pair.to_string()));
                }
                data.set(name, value);
            }
        }
        Ok(data)
    }
}

impl TryFrom<String> for BlockData {
    type Error = BlockDataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BlockData> for String {
    fn from(data: BlockData) -> Self {
        data.to_string()
    }
}
