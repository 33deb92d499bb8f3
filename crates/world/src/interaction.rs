//! The host world's own click-to-open behavior for doors and trapdoors.

use secretdoors_core::{BlockCatalog, BlockPos, DoorHalf};

use crate::{BlockStore, Effect, WorldError};

/// Result of a native block use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeUse {
    None,
    DoorToggled,
    TrapdoorToggled,
}

/// Right-click a block the way the host would: hand-operable doors swing
/// both halves, trapdoors flip. Power-only variants do not respond.
pub fn native_use<W: BlockStore + ?Sized>(
    world: &mut W,
    catalog: &BlockCatalog,
    pos: BlockPos,
) -> Result<NativeUse, WorldError> {
    let data = world.block_data(pos);
    let material = data.material();
    if !catalog.is_hand_operable(material) {
        return Ok(NativeUse::None);
    }

    let open = !data.is_open();
    if catalog.is_valid_trapdoor(material) {
        world.set_block_data(pos, data.with_open(open))?;
        world.play_effect(pos, Effect::DoorToggle);
        return Ok(NativeUse::TrapdoorToggled);
    }

    // Update the other half of the door
    let other = match data.door_half() {
        Some(DoorHalf::Upper) => pos.down(),
        _ => pos.up(),
    };
    let other_data = world.block_data(other);
    let material = material.clone();
    world.set_block_data(pos, data.with_open(open))?;
    if other_data.material() == &material {
        world.set_block_data(other, other_data.with_open(open))?;
    }
    world.play_effect(pos, Effect::DoorToggle);
    Ok(NativeUse::DoorToggled)
}
