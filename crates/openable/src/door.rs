use secretdoors_core::{BlockCatalog, BlockPos, Material};
use secretdoors_world::{BlockStore, Effect, WorldError};

use crate::helper;
use crate::openable::{BlockSnapshot, FixtureSet, OpenableKind, Orientation, SecretOpenable};

/// A two-tall door hidden behind two stacked concealing blocks.
#[derive(Debug, Clone)]
pub struct SecretDoor {
    key: BlockPos,
    door_material: Material,
    /// `[0]` is the upper concealing block, `[1]` the lower.
    blocks: [BlockSnapshot; 2],
    orientation: Orientation,
    fixtures: Vec<BlockSnapshot>,
}

impl SecretDoor {
    /// Capture the structure formed by `door` (either half) and the
    /// concealing block `other` at the same height as `door`.
    ///
    /// Returns `None` when `door` is not a valid door.
    pub fn capture<W: BlockStore + ?Sized>(
        world: &W,
        catalog: &BlockCatalog,
        door: BlockPos,
        other: BlockPos,
        orientation: Orientation,
        preserve_attachments: bool,
    ) -> Option<Self> {
        let door_data = world.block_data(door);
        let key = helper::key_from_block(catalog, door, &door_data)?;
        let (upper, lower) = if helper::is_top_half(catalog, &door_data) {
            (other, other.down())
        } else {
            (other.up(), other)
        };
        let blocks = [
            BlockSnapshot::capture(world, catalog, upper),
            BlockSnapshot::capture(world, catalog, lower),
        ];

        let mut fixtures = FixtureSet::new(&[upper, lower]);
        if preserve_attachments {
            fixtures.scan_sides(world, catalog);
            // Floor torches have no facing, so the side scan misses them.
            for block in [upper, lower] {
                let top = block.up();
                if catalog.is_floor_torch(&world.block_type(top)) {
                    fixtures.push(world, catalog, top);
                }
            }
        }
        let fixtures = fixtures.into_vec();

        tracing::debug!(
            %key,
            upper = %blocks[0].data,
            lower = %blocks[1].data,
            ?orientation,
            fixtures = fixtures.len(),
            "captured secret door"
        );
        Some(Self {
            key,
            door_material: door_data.material().clone(),
            blocks,
            orientation,
            fixtures,
        })
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn blocks(&self) -> &[BlockSnapshot; 2] {
        &self.blocks
    }

    pub fn fixtures(&self) -> &[BlockSnapshot] {
        &self.fixtures
    }
}

impl SecretOpenable for SecretDoor {
    fn open(&self, world: &mut dyn BlockStore) -> Result<(), WorldError> {
        tracing::debug!(key = %self.key, fixtures = self.fixtures.len(), "opening secret door");
        for fixture in &self.fixtures {
            fixture.clear(world);
        }
        for block in &self.blocks {
            block.clear(world);
        }
        // Door-side clicks leave the leaf to the host's native use.
        if self.orientation == Orientation::BlockFirst {
            let status = helper::set_leaf_open(world, self.key, &self.door_material, true);
            world.play_effect(self.key, Effect::DoorToggle);
            return status;
        }
        Ok(())
    }

    /// Restores every captured cell even after a failed write; the first
    /// error is returned once the sweep is done.
    fn close(&self, world: &mut dyn BlockStore) -> Result<(), WorldError> {
        tracing::debug!(key = %self.key, fixtures = self.fixtures.len(), "closing secret door");
        let mut status = Ok(());
        for block in &self.blocks {
            status = status.and(block.restore(world));
        }
        status = status.and(helper::set_leaf_open(world, self.key, &self.door_material, false));
        world.play_effect(self.key, Effect::DoorToggle);
        for fixture in &self.fixtures {
            status = status.and(fixture.restore(world));
        }
        status
    }

    fn key(&self) -> BlockPos {
        self.key
    }

    fn kind(&self) -> OpenableKind {
        OpenableKind::Door
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secretdoors_core::{Face, SignText};
    use secretdoors_world::MemoryWorld;

    /// Door at x=0 facing east (closed face west), concealing column at x=-1.
    fn setup() -> (MemoryWorld, BlockCatalog, BlockPos, BlockPos) {
        let catalog = BlockCatalog::builtin();
        let mut world = MemoryWorld::new(catalog.clone());
        let key = BlockPos::new(0, 64, 0);
        world.place(key, "oak_door[facing=east,half=lower,hinge=left,open=false]".parse().unwrap());
        world.place(key.up(), "oak_door[facing=east,half=upper,hinge=left,open=false]".parse().unwrap());
        let other = key.relative(Face::West);
        world.place(other, "stone_bricks".parse().unwrap());
        world.place(other.up(), "mossy_stone_bricks".parse().unwrap());
        (world, catalog, key, other)
    }

    #[test]
    fn capture_from_either_half_yields_same_structure() {
        let (world, catalog, key, other) = setup();
        let from_lower =
            SecretDoor::capture(&world, &catalog, key, other, Orientation::BlockFirst, true).unwrap();
        let from_upper = SecretDoor::capture(
            &world,
            &catalog,
            key.up(),
            other.up(),
            Orientation::BlockFirst,
            true,
        )
        .unwrap();
        assert_eq!(from_lower.key(), key);
        assert_eq!(from_upper.key(), key);
        assert_eq!(from_lower.blocks(), from_upper.blocks());
        assert_eq!(from_lower.blocks()[0].pos, other.up());
        assert_eq!(from_lower.blocks()[1].pos, other);
    }

    #[test]
    fn capture_rejects_non_doors() {
        let (world, catalog, _, other) = setup();
        assert!(SecretDoor::capture(&world, &catalog, other, other, Orientation::DoorFirst, true).is_none());
    }

    #[test]
    fn floor_torch_above_upper_block_is_captured() {
        let (mut world, catalog, key, other) = setup();
        world.place(other.up().up(), "torch".parse().unwrap());
        let door =
            SecretDoor::capture(&world, &catalog, key, other, Orientation::BlockFirst, true).unwrap();
        assert_eq!(door.fixtures().len(), 1);
        assert_eq!(door.fixtures()[0].pos, other.up().up());
    }

    #[test]
    fn open_then_close_restores_blocks_and_text() {
        let (mut world, catalog, key, other) = setup();
        let sign_pos = other.up().relative(Face::North);
        let text = SignText::from_lines(["Keep", "out", "", "!"]);
        world.place_sign(sign_pos, "oak_wall_sign[facing=north]".parse().unwrap(), text.clone());
        let before_upper = world.block_data(other.up());

        let door =
            SecretDoor::capture(&world, &catalog, key, other, Orientation::BlockFirst, true).unwrap();
        door.open(&mut world).unwrap();
        assert!(world.block_type(other).is_air());
        assert!(world.block_type(other.up()).is_air());
        assert!(world.block_type(sign_pos).is_air());
        assert!(world.block_data(key).is_open());

        door.close(&mut world).unwrap();
        assert_eq!(world.block_data(other.up()), before_upper);
        assert_eq!(world.sign_text(sign_pos), Some(text));
        assert!(!world.block_data(key).is_open());
        assert!(!world.block_data(key.up()).is_open());
        assert_eq!(world.effects().len(), 2);
    }
}
