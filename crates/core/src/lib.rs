//! Core value types shared across the workspace: positions, faces, block
//! descriptors, sign text and the block classification table.

pub mod block_data;
pub mod catalog;
pub mod material;
pub mod pos;
pub mod sign;

use serde::{Deserialize, Serialize};

pub use block_data::{BlockData, BlockDataError, DoorHalf};
pub use catalog::{BlockCatalog, BlockTraits, CatalogError, CatalogEntry};
pub use material::{Material, MaterialError, DEFAULT_NAMESPACE};
pub use pos::{BlockPos, Face, ParseFaceError};
pub use sign::{SignText, SIGN_LINES};

/// Monotonic step counter for scripted interaction sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any scripted timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}
