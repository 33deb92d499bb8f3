//! Region snapshots for before/after world comparisons.

use secretdoors_core::{BlockData, BlockPos, SignText};
use secretdoors_world::BlockStore;
use serde::{Deserialize, Serialize};

/// Captured state of one non-air cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    /// Cell position.
    pub pos: BlockPos,
    /// Full descriptor, including the block type.
    pub block: BlockData,
    /// Label text for cells that carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<SignText>,
}

/// Every non-air cell inside an inclusive box, in x/y/z order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    /// Minimum corner (inclusive).
    pub min: BlockPos,
    /// Maximum corner (inclusive).
    pub max: BlockPos,
    /// Non-air cells.
    pub cells: Vec<CellState>,
}

impl RegionSnapshot {
    /// Capture the box spanned by `a` and `b`.
    pub fn capture<W: BlockStore + ?Sized>(world: &W, a: BlockPos, b: BlockPos) -> Self {
        let min = BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
        let max = BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));
        let mut cells = Vec::new();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    let pos = BlockPos::new(x, y, z);
                    let block = world.block_data(pos);
                    if block.material().is_air() {
                        continue;
                    }
                    cells.push(CellState {
                        pos,
                        block,
                        sign: world.sign_text(pos),
                    });
                }
            }
        }
        tracing::trace!(%min, %max, cells = cells.len(), "captured region");
        Self { min, max, cells }
    }

    /// Capture the cube of half-width `radius` centered on `center`.
    pub fn around<W: BlockStore + ?Sized>(world: &W, center: BlockPos, radius: i32) -> Self {
        let r = radius.abs();
        Self::capture(
            world,
            BlockPos::new(center.x - r, center.y - r, center.z - r),
            BlockPos::new(center.x + r, center.y + r, center.z + r),
        )
    }

    /// State of `pos`, or `None` if it was air.
    pub fn cell(&self, pos: BlockPos) -> Option<&CellState> {
        self.cells
            .binary_search_by(|cell| cell.pos.cmp(&pos))
            .ok()
            .map(|index| &self.cells[index])
    }

    /// Positions whose state differs between two snapshots, sorted.
    pub fn diff(&self, other: &RegionSnapshot) -> Vec<BlockPos> {
        let mut positions: Vec<BlockPos> = self
            .cells
            .iter()
            .chain(&other.cells)
            .map(|cell| cell.pos)
            .filter(|&pos| self.cell(pos) != other.cell(pos))
            .collect();
        positions.sort();
        positions.dedup();
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneBuilder;
    use secretdoors_core::Material;

    #[test]
    fn capture_skips_air_and_orders_cells() {
        let mut scene = SceneBuilder::new();
        scene
            .block(BlockPos::new(1, 0, 0), "stone")
            .unwrap()
            .sign(BlockPos::new(0, 1, 0), "oak_sign[rotation=0]", &["hi"])
            .unwrap();
        let world = scene.build();
        let snapshot = RegionSnapshot::around(&world, BlockPos::new(0, 0, 0), 1);
        assert_eq!(snapshot.cells.len(), 2);
        assert_eq!(snapshot.cells[0].pos, BlockPos::new(0, 1, 0));
        assert_eq!(
            snapshot.cell(BlockPos::new(0, 1, 0)).and_then(|c| c.sign.as_ref()).and_then(|t| t.line(0)),
            Some("hi")
        );
        assert!(snapshot.cell(BlockPos::new(0, 0, 0)).is_none());
    }

    #[test]
    fn diff_reports_changed_and_removed_cells() {
        let mut scene = SceneBuilder::new();
        scene
            .block(BlockPos::new(0, 0, 0), "stone")
            .unwrap()
            .block(BlockPos::new(0, 0, 1), "dirt")
            .unwrap();
        let mut world = scene.build();
        let before = RegionSnapshot::around(&world, BlockPos::new(0, 0, 0), 2);
        world.set_type(BlockPos::new(0, 0, 1), Material::air());
        world.set_type(BlockPos::new(1, 0, 0), Material::parse("sand").unwrap());
        let after = RegionSnapshot::around(&world, BlockPos::new(0, 0, 0), 2);

        assert_eq!(
            before.diff(&after),
            vec![BlockPos::new(0, 0, 1), BlockPos::new(1, 0, 0)]
        );
        assert!(before.diff(&before).is_empty());
    }
}
