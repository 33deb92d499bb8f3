//! The block store surface consumed by the openable engine.

use secretdoors_core::{BlockData, BlockPos, Material, SignText};

/// Failures reported by a [`BlockStore`] write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// Descriptor written to a cell holding a different block type.
    #[error("descriptor for {expected} written to {pos}, which holds {found}")]
    DescriptorMismatch {
        pos: BlockPos,
        expected: Material,
        found: Material,
    },
    /// Label text written to a cell that carries no label.
    #[error("cell {0} has no sign label")]
    NotASign(BlockPos),
}

/// Sensory effects a store can play at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Door or trapdoor swing sound.
    DoorToggle,
}

/// Read/write access to world cells.
///
/// Reads always return owned copies; a descriptor obtained from the store
/// never observes later writes to the same cell.
pub trait BlockStore {
    /// Block type at `pos` (air when unset).
    fn block_type(&self, pos: BlockPos) -> Material {
        self.block_data(pos).material().clone()
    }

    /// Copy of the descriptor at `pos`.
    fn block_data(&self, pos: BlockPos) -> BlockData;

    /// Replace the block type, resetting the descriptor to the type's default.
    fn set_type(&mut self, pos: BlockPos, material: Material);

    /// Replace the descriptor. The descriptor's type must match the cell's.
    fn set_block_data(&mut self, pos: BlockPos, data: BlockData) -> Result<(), WorldError>;

    /// Copy of the label text, if the cell carries a label.
    fn sign_text(&self, pos: BlockPos) -> Option<SignText>;

    /// Write and commit all label lines.
    fn update_sign(&mut self, pos: BlockPos, text: SignText) -> Result<(), WorldError>;

    fn play_effect(&mut self, pos: BlockPos, effect: Effect);
}
