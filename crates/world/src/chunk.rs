use std::collections::BTreeMap;
use std::fmt;

use secretdoors_core::{BlockData, BlockPos};

/// Chunk width (X axis) in blocks.
pub const CHUNK_SIZE_X: i32 = 16;
/// Chunk depth (Z axis) in blocks.
pub const CHUNK_SIZE_Z: i32 = 16;

/// Chunk coordinate (X,Z) in chunk space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then z).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The column containing a world position.
    pub fn containing(pos: BlockPos) -> Self {
        Self::new(
            pos.x.div_euclid(CHUNK_SIZE_X),
            pos.z.div_euclid(CHUNK_SIZE_Z),
        )
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Column-local position. Y is unbounded; X and Z are in `0..16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalPos {
    pub x: u8,
    pub y: i32,
    pub z: u8,
}

impl LocalPos {
    pub fn from_world(pos: BlockPos) -> Self {
        Self {
            x: pos.x.rem_euclid(CHUNK_SIZE_X) as u8,
            y: pos.y,
            z: pos.z.rem_euclid(CHUNK_SIZE_Z) as u8,
        }
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Dirty flags set whenever chunk data changes.
    pub struct DirtyFlags: u8 {
        const BLOCKS = 0b0000_0001;
        const LABELS = 0b0000_0010;
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        DirtyFlags::empty()
    }
}

/// Sparse column of non-air cells plus dirty flags.
///
/// Cells absent from the map are air.
pub struct Chunk {
    position: ChunkPos,
    cells: BTreeMap<LocalPos, BlockData>,
    dirty: DirtyFlags,
}

impl Chunk {
    /// Allocate a fresh chunk filled with air.
    pub fn new(position: ChunkPos) -> Self {
        Self {
            position,
            cells: BTreeMap::new(),
            dirty: DirtyFlags::empty(),
        }
    }

    #[inline]
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    /// Fetch a copy of the cell's descriptor.
    pub fn cell(&self, local: LocalPos) -> BlockData {
        self.cells.get(&local).cloned().unwrap_or_else(BlockData::air)
    }

    /// Store a descriptor and mark the chunk dirty if anything changed.
    pub fn set_cell(&mut self, local: LocalPos, data: BlockData) {
        let changed = if data.material().is_air() {
            self.cells.remove(&local).is_some()
        } else {
            self.cells.insert(local, data.clone()).as_ref() != Some(&data)
        };
        if changed {
            self.dirty.insert(DirtyFlags::BLOCKS);
        }
    }

    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty.insert(flags);
    }

    /// Number of non-air cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Consume and return the current dirty flags.
    pub fn take_dirty_flags(&mut self) -> DirtyFlags {
        let flags = self.dirty;
        self.dirty = DirtyFlags::empty();
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stone() -> BlockData {
        "stone".parse().unwrap()
    }

    #[test]
    fn set_and_get_cell_marks_dirty() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        assert!(chunk.take_dirty_flags().is_empty());
        let local = LocalPos { x: 1, y: 2, z: 3 };
        chunk.set_cell(local, stone());
        assert_eq!(chunk.cell(local), stone());
        assert!(chunk.take_dirty_flags().contains(DirtyFlags::BLOCKS));
    }

    #[test]
    fn test_set_same_cell_no_dirty() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        let local = LocalPos { x: 0, y: 0, z: 0 };
        chunk.set_cell(local, BlockData::air());
        assert!(chunk.take_dirty_flags().is_empty());

        chunk.set_cell(local, stone());
        chunk.take_dirty_flags();
        chunk.set_cell(local, stone());
        assert!(chunk.take_dirty_flags().is_empty());
    }

    #[test]
    fn air_cells_are_not_stored() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        let local = LocalPos { x: 4, y: -10, z: 4 };
        chunk.set_cell(local, stone());
        assert_eq!(chunk.len(), 1);
        chunk.set_cell(local, BlockData::air());
        assert!(chunk.is_empty());
        assert!(chunk.cell(local).material().is_air());
    }

    #[test]
    fn containing_handles_negative_coordinates() {
        assert_eq!(ChunkPos::containing(BlockPos::new(-1, 0, -1)), ChunkPos::new(-1, -1));
        assert_eq!(ChunkPos::containing(BlockPos::new(15, 0, 16)), ChunkPos::new(0, 1));
        let local = LocalPos::from_world(BlockPos::new(-1, 70, -17));
        assert_eq!((local.x, local.y, local.z), (15, 70, 15));
    }

    #[test]
    fn test_chunk_pos_display() {
        let pos = ChunkPos::new(5, -3);
        assert_eq!(format!("{}", pos), "(5, -3)");
    }

    #[test]
    fn test_chunk_pos_ordering() {
        // ChunkPos implements Ord for BTreeMap determinism
        let pos1 = ChunkPos::new(0, 0);
        let pos2 = ChunkPos::new(1, 0);
        let pos3 = ChunkPos::new(0, 1);

        assert!(pos1 < pos2);
        assert!(pos1 < pos3);
        assert!(pos2 > pos1);
    }
}
