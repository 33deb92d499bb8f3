//! World positions and block faces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six faces of a block.
///
/// North is -Z, South is +Z, East is +X, West is -X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Face {
    /// The four compass directions, in attachment probe order.
    pub const HORIZONTAL: [Face; 4] = [Face::North, Face::South, Face::East, Face::West];

    /// All six faces.
    pub const ALL: [Face; 6] = [
        Face::North,
        Face::South,
        Face::East,
        Face::West,
        Face::Up,
        Face::Down,
    ];

    /// Get the opposite face.
    pub fn opposite(self) -> Self {
        match self {
            Face::North => Face::South,
            Face::South => Face::North,
            Face::East => Face::West,
            Face::West => Face::East,
            Face::Up => Face::Down,
            Face::Down => Face::Up,
        }
    }

    /// True for the four compass directions.
    pub fn is_horizontal(self) -> bool {
        !matches!(self, Face::Up | Face::Down)
    }

    /// Get the unit offset vector for this face.
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::East => (1, 0, 0),
            Face::West => (-1, 0, 0),
            Face::Up => (0, 1, 0),
            Face::Down => (0, -1, 0),
        }
    }

    /// Lowercase name, as used in block descriptors.
    pub fn as_str(self) -> &'static str {
        match self {
            Face::North => "north",
            Face::South => "south",
            Face::East => "east",
            Face::West => "west",
            Face::Up => "up",
            Face::Down => "down",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a face name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown block face `{0}`")]
pub struct ParseFaceError(pub String);

impl FromStr for Face {
    type Err = ParseFaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Face::North),
            "south" => Ok(Face::South),
            "east" => Ok(Face::East),
            "west" => Ok(Face::West),
            "up" => Ok(Face::Up),
            "down" => Ok(Face::Down),
            other => Err(ParseFaceError(other.to_string())),
        }
    }
}

/// World position of a single block cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The neighboring cell across `face`.
    pub fn relative(self, face: Face) -> Self {
        self.relative_n(face, 1)
    }

    /// The cell `distance` steps away across `face`, clamped to the `i32`
    /// coordinate range.
    pub fn relative_n(self, face: Face, distance: i32) -> Self {
        let (dx, dy, dz) = face.offset();
        Self::new(
            self.x.saturating_add(dx.saturating_mul(distance)),
            self.y.saturating_add(dy.saturating_mul(distance)),
            self.z.saturating_add(dz.saturating_mul(distance)),
        )
    }

    pub fn up(self) -> Self {
        self.relative(Face::Up)
    }

    pub fn down(self) -> Self {
        self.relative(Face::Down)
    }

    /// Get adjacent positions (6 neighbors), in [`Face::ALL`] order.
    pub fn neighbors(self) -> [BlockPos; 6] {
        Face::ALL.map(|face| self.relative(face))
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{}]", self.x, self.y, self.z)
    }
}
