//! The shared openable contract and block snapshots.

use std::fmt;

use secretdoors_core::{BlockCatalog, BlockData, BlockPos, Face, Material, SignText};
use secretdoors_world::{BlockStore, WorldError};

use crate::helper;

/// Which side of the structure the triggering interaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// The concealing block (or a fixture on it) was clicked.
    BlockFirst,
    /// The door itself was clicked.
    DoorFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenableKind {
    Door,
    Trapdoor,
}

impl fmt::Display for OpenableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpenableKind::Door => "door",
            OpenableKind::Trapdoor => "trapdoor",
        })
    }
}

/// A door or trapdoor structure that hides a passage.
///
/// Everything `close` needs is captured when the structure is built; the
/// live world is only written, never consulted for restore data.
pub trait SecretOpenable {
    /// Clear the concealing blocks and fixtures to reveal the passage.
    fn open(&self, world: &mut dyn BlockStore) -> Result<(), WorldError>;

    /// Restore every captured block and close the leaf.
    fn close(&self, world: &mut dyn BlockStore) -> Result<(), WorldError>;

    /// Stable identifying position used for registry lookup.
    fn key(&self) -> BlockPos;

    fn kind(&self) -> OpenableKind;
}

/// Captured state of one cell: type, an owned descriptor and, for signs,
/// the label text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSnapshot {
    pub pos: BlockPos,
    pub material: Material,
    pub data: BlockData,
    pub sign: Option<SignText>,
}

impl BlockSnapshot {
    pub fn capture<W: BlockStore + ?Sized>(world: &W, catalog: &BlockCatalog, pos: BlockPos) -> Self {
        let data = world.block_data(pos);
        let sign = if catalog.is_any_sign(data.material()) {
            world.sign_text(pos)
        } else {
            None
        };
        Self {
            pos,
            material: data.material().clone(),
            data,
            sign,
        }
    }

    pub fn clear<W: BlockStore + ?Sized>(&self, world: &mut W) {
        world.set_type(self.pos, Material::air());
    }

    /// Write back type, then descriptor, then label text if any was captured.
    ///
    /// Every write is attempted; the first failure is returned.
    pub fn restore<W: BlockStore + ?Sized>(&self, world: &mut W) -> Result<(), WorldError> {
        world.set_type(self.pos, self.material.clone());
        let mut status = world.set_block_data(self.pos, self.data.clone());
        if let Some(text) = &self.sign {
            status = status.and(world.update_sign(self.pos, text.clone()));
        }
        status
    }
}

/// Ordered fixture captures, kept disjoint from the concealing cells.
#[derive(Debug, Clone, Default)]
pub(crate) struct FixtureSet {
    concealing: Vec<BlockPos>,
    fixtures: Vec<BlockSnapshot>,
}

impl FixtureSet {
    pub(crate) fn new(concealing: &[BlockPos]) -> Self {
        Self {
            concealing: concealing.to_vec(),
            fixtures: Vec::new(),
        }
    }

    /// Capture `pos` unless it is already captured or is a concealing cell.
    pub(crate) fn push<W: BlockStore + ?Sized>(
        &mut self,
        world: &W,
        catalog: &BlockCatalog,
        pos: BlockPos,
    ) {
        if self.concealing.contains(&pos) || self.fixtures.iter().any(|f| f.pos == pos) {
            return;
        }
        let snapshot = BlockSnapshot::capture(world, catalog, pos);
        tracing::trace!(%pos, material = %snapshot.material, "captured fixture");
        self.fixtures.push(snapshot);
    }

    /// Probe the four compass neighbors of each concealing cell for fixtures
    /// mounted on it: a fixture counts only when its facing equals the probe
    /// direction.
    pub(crate) fn scan_sides<W: BlockStore + ?Sized>(&mut self, world: &W, catalog: &BlockCatalog) {
        let concealing = self.concealing.clone();
        for face in Face::HORIZONTAL {
            for &block in &concealing {
                let neighbor = block.relative(face);
                let facing = helper::attachable_facing(catalog, &world.block_data(neighbor));
                if facing == Some(face) {
                    self.push(world, catalog, neighbor);
                }
            }
        }
    }

    pub(crate) fn into_vec(self) -> Vec<BlockSnapshot> {
        self.fixtures
    }
}
