//! Interaction dispatch: decides which structure a click opens or closes.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use secretdoors_core::{BlockCatalog, BlockPos, Face, Material};
use secretdoors_world::BlockStore;

use crate::{
    helper, DispatchConfig, OpenRegistry, OpenableKind, Orientation, SecretDoor, SecretOpenable,
    SecretTrapdoor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    RightClickBlock,
    LeftClickBlock,
    RightClickAir,
    LeftClickAir,
}

/// One player interaction with the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub action: Action,
    pub clicked: BlockPos,
    /// Face of the clicked block the player hit.
    pub clicked_face: Face,
    #[serde(default)]
    pub held_item: Option<Material>,
    #[serde(default = "default_permission")]
    pub has_use_permission: bool,
}

fn default_permission() -> bool {
    true
}

impl Interaction {
    pub fn right_click(clicked: BlockPos, clicked_face: Face) -> Self {
        Self {
            action: Action::RightClickBlock,
            clicked,
            clicked_face,
            held_item: None,
            has_use_permission: true,
        }
    }

    pub fn holding(mut self, item: Material) -> Self {
        self.held_item = Some(item);
        self
    }

    pub fn without_permission(mut self) -> Self {
        self.has_use_permission = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutcomeAction {
    Opened { key: BlockPos, kind: OpenableKind },
    Closed { key: BlockPos },
    Ignored,
}

/// Whether the host should still run its own use behavior for the click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeHandling {
    Allow,
    Suppress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub action: OutcomeAction,
    pub native: NativeHandling,
}

impl Outcome {
    pub const IGNORED: Outcome = Outcome {
        action: OutcomeAction::Ignored,
        native: NativeHandling::Allow,
    };

    fn opened(key: BlockPos, kind: OpenableKind, native: NativeHandling) -> Self {
        Self {
            action: OutcomeAction::Opened { key, kind },
            native,
        }
    }

    fn closed(key: BlockPos) -> Self {
        Self {
            action: OutcomeAction::Closed { key },
            native: NativeHandling::Suppress,
        }
    }
}

/// Routes interactions to new or registered secret structures.
pub struct InteractionDispatcher {
    config: DispatchConfig,
    catalog: BlockCatalog,
    registry: OpenRegistry,
}

impl InteractionDispatcher {
    pub fn new(config: DispatchConfig, catalog: BlockCatalog) -> Self {
        Self {
            config,
            catalog,
            registry: OpenRegistry::new(),
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &OpenRegistry {
        &self.registry
    }

    /// Close every open structure, e.g. at shutdown.
    pub fn close_all(&mut self, world: &mut dyn BlockStore) -> usize {
        self.registry.close_all(world)
    }

    /// Handle one interaction.
    pub fn handle(&mut self, world: &mut dyn BlockStore, interaction: &Interaction) -> Outcome {
        if interaction.action != Action::RightClickBlock {
            return Outcome::IGNORED;
        }
        if self.config.permissions_enabled && !interaction.has_use_permission {
            debug!(clicked = %interaction.clicked, "use permission missing");
            return Outcome::IGNORED;
        }

        if let Some(outcome) = self.handle_door(world, interaction) {
            return outcome;
        }
        if self.config.enable_trapdoors {
            if let Some(outcome) = self.handle_trapdoor(world, interaction) {
                return outcome;
            }
        }
        Outcome::IGNORED
    }

    /// A concealing-eligible block type.
    pub fn is_valid_block(&self, world: &dyn BlockStore, pos: BlockPos) -> bool {
        self.catalog.is_concealing(&world.block_type(pos))
    }

    /// A closed, unregistered door with concealing blocks in front of both halves.
    pub fn can_be_secret_door(&self, world: &dyn BlockStore, door: BlockPos) -> bool {
        let data = world.block_data(door);
        let Some(key) = helper::key_from_block(&self.catalog, door, &data) else {
            return false;
        };
        if self.registry.contains(key) {
            return false;
        }
        let key_data = world.block_data(key);
        if key_data.is_open() {
            return false;
        }
        let Some(face) = helper::door_face(&self.catalog, &key_data) else {
            return false;
        };
        let front = key.relative(face);
        self.is_valid_block(world, front) && self.is_valid_block(world, front.up())
    }

    /// A closed, unregistered trapdoor under a concealing block.
    pub fn can_be_secret_trapdoor(&self, world: &dyn BlockStore, trapdoor: BlockPos) -> bool {
        let data = world.block_data(trapdoor);
        helper::is_valid_trapdoor(&self.catalog, &data)
            && !self.registry.contains(trapdoor)
            && !data.is_open()
            && self.is_valid_block(world, trapdoor.up())
    }

    /// The concealing cell in front of `door`, at the same height.
    fn front_of(&self, world: &dyn BlockStore, door: BlockPos) -> Option<BlockPos> {
        let key = helper::key_from_block(&self.catalog, door, &world.block_data(door))?;
        let face = helper::door_face(&self.catalog, &world.block_data(key))?;
        Some(door.relative(face))
    }

    /// `door` is eligible and `block` is the cell in front of it, not one
    /// beside or behind it.
    fn conceals(&self, world: &dyn BlockStore, door: BlockPos, block: BlockPos) -> bool {
        self.can_be_secret_door(world, door) && self.front_of(world, door) == Some(block)
    }

    fn handle_door(
        &mut self,
        world: &mut dyn BlockStore,
        interaction: &Interaction,
    ) -> Option<Outcome> {
        let clicked = interaction.clicked;
        let clicked_data = world.block_data(clicked);

        if let Some(key) = helper::key_from_block(&self.catalog, clicked, &clicked_data) {
            if self.can_be_secret_door(world, clicked) {
                let other = self.front_of(world, clicked)?;
                return self.open_door(world, clicked, other, Orientation::DoorFirst);
            }
            if self.registry.contains(key) {
                return Some(self.close(world, key));
            }
            return Some(Outcome::IGNORED);
        }

        if let Some(facing) = helper::attachable_facing(&self.catalog, &clicked_data) {
            let face = helper::attachable_face(facing)?;
            let block = clicked.relative(face);
            let door = clicked.relative_n(face, 2);
            if self.is_valid_block(world, block) && self.conceals(world, door, block) {
                return self.open_door(world, door, block, Orientation::BlockFirst);
            }
            return None;
        }

        if self.is_valid_block(world, clicked) {
            if helper::is_placeable_attachable(&self.catalog, interaction.held_item.as_ref()) {
                return Some(Outcome::IGNORED);
            }
            let door = clicked.relative(interaction.clicked_face.opposite());
            if self.conceals(world, door, clicked) {
                return self.open_door(world, door, clicked, Orientation::BlockFirst);
            }
        }
        None
    }

    fn handle_trapdoor(
        &mut self,
        world: &mut dyn BlockStore,
        interaction: &Interaction,
    ) -> Option<Outcome> {
        if helper::is_placeable_attachable(&self.catalog, interaction.held_item.as_ref()) {
            return None;
        }
        let clicked = interaction.clicked;
        let (trapdoor, concealing, from_above) = if self.can_be_secret_trapdoor(world, clicked) {
            (clicked, clicked.up(), false)
        } else if self.can_be_secret_trapdoor(world, clicked.down()) {
            (clicked.down(), clicked, true)
        } else if self.registry.contains(clicked) {
            return Some(self.close(world, clicked));
        } else {
            return None;
        };

        let secret = SecretTrapdoor::capture(
            &*world,
            &self.catalog,
            trapdoor,
            concealing,
            from_above,
            self.config.preserve_attachments,
        )?;
        Some(self.register_open(world, Box::new(secret), NativeHandling::Suppress))
    }

    fn open_door(
        &mut self,
        world: &mut dyn BlockStore,
        door: BlockPos,
        other: BlockPos,
        orientation: Orientation,
    ) -> Option<Outcome> {
        let secret = SecretDoor::capture(
            &*world,
            &self.catalog,
            door,
            other,
            orientation,
            self.config.preserve_attachments,
        )?;
        // A door-side click relies on the host to swing the leaf.
        let native = match orientation {
            Orientation::DoorFirst => NativeHandling::Allow,
            Orientation::BlockFirst => NativeHandling::Suppress,
        };
        Some(self.register_open(world, Box::new(secret), native))
    }

    fn register_open(
        &mut self,
        world: &mut dyn BlockStore,
        secret: Box<dyn SecretOpenable>,
        native: NativeHandling,
    ) -> Outcome {
        let key = secret.key();
        let kind = secret.kind();
        if let Err(err) = secret.open(world) {
            warn!(%key, %kind, "failed to open structure: {err}");
        }
        // Registered even after a failed open so a later close can restore.
        self.registry.put(secret);
        debug!(%key, %kind, open = self.registry.len(), "opened secret structure");
        Outcome::opened(key, kind, native)
    }

    fn close(&mut self, world: &mut dyn BlockStore, key: BlockPos) -> Outcome {
        match self.registry.close(world, key) {
            Ok(_) => debug!(%key, open = self.registry.len(), "closed secret structure"),
            Err(err) => warn!(%key, "failed to close structure: {err}"),
        }
        Outcome::closed(key)
    }
}
