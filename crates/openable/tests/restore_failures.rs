//! Close keeps restoring after a store write fails.

use std::collections::BTreeSet;

use secretdoors_core::{BlockCatalog, BlockData, BlockPos, Face, Material, SignText};
use secretdoors_openable::{OpenRegistry, Orientation, SecretDoor, SecretOpenable, SecretTrapdoor};
use secretdoors_testkit::{door_scene, trapdoor_scene, RegionSnapshot};
use secretdoors_world::{BlockStore, Effect, MemoryWorld, WorldError};

const ORIGIN: BlockPos = BlockPos::new(-2, 64, 0);

/// Store whose descriptor writes fail at chosen cells.
struct RejectingWrites {
    inner: MemoryWorld,
    rejected: BTreeSet<BlockPos>,
}

impl BlockStore for RejectingWrites {
    fn block_data(&self, pos: BlockPos) -> BlockData {
        self.inner.block_data(pos)
    }

    fn set_type(&mut self, pos: BlockPos, material: Material) {
        self.inner.set_type(pos, material);
    }

    fn set_block_data(&mut self, pos: BlockPos, data: BlockData) -> Result<(), WorldError> {
        if self.rejected.contains(&pos) {
            return Err(WorldError::DescriptorMismatch {
                pos,
                expected: data.material().clone(),
                found: self.inner.block_type(pos),
            });
        }
        self.inner.set_block_data(pos, data)
    }

    fn sign_text(&self, pos: BlockPos) -> Option<SignText> {
        self.inner.sign_text(pos)
    }

    fn update_sign(&mut self, pos: BlockPos, text: SignText) -> Result<(), WorldError> {
        self.inner.update_sign(pos, text)
    }

    fn play_effect(&mut self, pos: BlockPos, effect: Effect) {
        self.inner.play_effect(pos, effect);
    }
}

fn sign_lines() -> SignText {
    SignText::from_lines(["staff", "only"])
}

#[test]
fn door_close_restores_remaining_cells_after_failed_write() {
    let catalog = BlockCatalog::builtin();
    let (mut scene, layout) = door_scene(ORIGIN, Face::East).unwrap();
    let sign = layout.upper.relative(Face::North);
    let torch = layout.lower.relative(Face::West);
    scene
        .sign(sign, "oak_wall_sign[facing=north]", &["staff", "only"])
        .unwrap()
        .block(torch, "wall_torch[facing=west]")
        .unwrap();
    let mut world = scene.build();
    let lower_before = world.block_data(layout.lower);

    let door = SecretDoor::capture(
        &world,
        &catalog,
        layout.key,
        layout.lower,
        Orientation::BlockFirst,
        true,
    )
    .unwrap();
    door.open(&mut world).unwrap();
    assert!(world.block_type(sign).is_air());

    let mut flaky = RejectingWrites {
        inner: world,
        rejected: BTreeSet::from([layout.upper]),
    };
    let err = door.close(&mut flaky).unwrap_err();
    assert!(matches!(err, WorldError::DescriptorMismatch { pos, .. } if pos == layout.upper));

    let world = flaky.inner;
    assert_eq!(world.block_data(layout.lower), lower_before);
    assert!(!world.block_data(layout.key).is_open());
    assert!(!world.block_data(layout.key.up()).is_open());
    assert_eq!(world.sign_text(sign), Some(sign_lines()));
    assert_eq!(world.block_type(torch).to_string(), "minecraft:wall_torch");
    assert_eq!(world.effects().len(), 2);
}

#[test]
fn trapdoor_close_restores_cover_when_leaf_write_fails() {
    let catalog = BlockCatalog::builtin();
    let (mut scene, concealing) = trapdoor_scene(ORIGIN).unwrap();
    let top = concealing.up();
    scene.sign(top, "oak_sign[rotation=0]", &["staff", "only"]).unwrap();
    let mut world = scene.build();
    let before = RegionSnapshot::around(&world, ORIGIN, 2);

    let trapdoor =
        SecretTrapdoor::capture(&world, &catalog, ORIGIN, concealing, false, true).unwrap();
    trapdoor.open(&mut world).unwrap();

    let mut flaky = RejectingWrites {
        inner: world,
        rejected: BTreeSet::from([ORIGIN]),
    };
    assert!(trapdoor.close(&mut flaky).is_err());

    let world = flaky.inner;
    let after = RegionSnapshot::around(&world, ORIGIN, 2);
    // Only the leaf itself is left open.
    assert_eq!(before.diff(&after), vec![ORIGIN]);
    assert_eq!(world.sign_text(top), Some(sign_lines()));
}

#[test]
fn registry_drops_entry_even_when_close_fails() {
    let catalog = BlockCatalog::builtin();
    let (scene, concealing) = trapdoor_scene(ORIGIN).unwrap();
    let mut world = scene.build();
    let trapdoor =
        SecretTrapdoor::capture(&world, &catalog, ORIGIN, concealing, true, true).unwrap();
    trapdoor.open(&mut world).unwrap();
    let mut registry = OpenRegistry::new();
    registry.put(Box::new(trapdoor));

    let mut flaky = RejectingWrites {
        inner: world,
        rejected: BTreeSet::from([ORIGIN]),
    };
    assert!(registry.close(&mut flaky, ORIGIN).is_err());
    assert!(!registry.contains(ORIGIN));
    assert!(!flaky.inner.block_type(concealing).is_air());
}
