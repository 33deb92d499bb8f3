//! Geometry and classification helpers.
//!
//! Pure functions over descriptors and faces. Type membership is answered
//! by the [`BlockCatalog`]; nothing here reads or writes the world.

use secretdoors_core::{BlockCatalog, BlockData, BlockPos, DoorHalf, Face, Material};

use secretdoors_world::{BlockStore, WorldError};

pub fn is_valid_door(catalog: &BlockCatalog, block: &BlockData) -> bool {
    catalog.is_valid_door(block.material())
}

pub fn is_valid_trapdoor(catalog: &BlockCatalog, block: &BlockData) -> bool {
    catalog.is_valid_trapdoor(block.material())
}

/// True iff `block` is a valid door whose half is the upper one.
pub fn is_top_half(catalog: &BlockCatalog, block: &BlockData) -> bool {
    is_valid_door(catalog, block) && block.door_half() == Some(DoorHalf::Upper)
}

/// Normalize either door half at `pos` to the lower half.
pub fn key_from_block(catalog: &BlockCatalog, pos: BlockPos, block: &BlockData) -> Option<BlockPos> {
    if !is_valid_door(catalog, block) {
        return None;
    }
    Some(if is_top_half(catalog, block) {
        pos.down()
    } else {
        pos
    })
}

/// Compass direction a closed door faces: the antonym of its stored facing.
pub fn door_face(catalog: &BlockCatalog, block: &BlockData) -> Option<Face> {
    if !is_valid_door(catalog, block) {
        return None;
    }
    block
        .facing()
        .filter(|face| face.is_horizontal())
        .map(Face::opposite)
}

/// Stored facing of a wall-mounted fixture.
///
/// `None` unless the block is an attachable fixture with a horizontal
/// facing. Fixtures with a mounting surface (buttons, levers) only count
/// when mounted on a wall.
pub fn attachable_facing(catalog: &BlockCatalog, block: &BlockData) -> Option<Face> {
    if !catalog.is_attachable_item(block.material()) {
        return None;
    }
    if block.attach_face().is_some_and(|surface| surface != "wall") {
        return None;
    }
    block.facing().filter(|face| face.is_horizontal())
}

/// Direction from a fixture back to its support block.
pub fn attachable_face(facing: Face) -> Option<Face> {
    facing.is_horizontal().then(|| facing.opposite())
}

/// Held items that become fixtures once placed.
pub fn is_placeable_attachable(catalog: &BlockCatalog, item: Option<&Material>) -> bool {
    item.is_some_and(|item| catalog.is_placeable_attachable(item))
}

/// Set the open flag on a door leaf, both halves.
///
/// Cells that no longer hold `material` are left alone.
pub fn set_leaf_open<W: BlockStore + ?Sized>(
    world: &mut W,
    key: BlockPos,
    material: &Material,
    open: bool,
) -> Result<(), WorldError> {
    let mut status = Ok(());
    for pos in [key, key.up()] {
        let data = world.block_data(pos);
        if data.material() == material {
            status = status.and(world.set_block_data(pos, data.with_open(open)));
        }
    }
    status
}
