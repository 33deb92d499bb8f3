use secretdoors_core::{BlockCatalog, BlockPos, Material};
use secretdoors_world::{BlockStore, Effect, WorldError};

use crate::helper;
use crate::openable::{BlockSnapshot, FixtureSet, OpenableKind, SecretOpenable};

/// A trapdoor hidden behind a single concealing block.
#[derive(Debug, Clone)]
pub struct SecretTrapdoor {
    key: BlockPos,
    trapdoor_material: Material,
    concealing: BlockSnapshot,
    from_above: bool,
    fixtures: Vec<BlockSnapshot>,
}

impl SecretTrapdoor {
    /// Capture the structure formed by `trapdoor` and the block it swings
    /// into. Returns `None` when `trapdoor` is not a valid trapdoor.
    pub fn capture<W: BlockStore + ?Sized>(
        world: &W,
        catalog: &BlockCatalog,
        trapdoor: BlockPos,
        concealing: BlockPos,
        from_above: bool,
        preserve_attachments: bool,
    ) -> Option<Self> {
        let trapdoor_data = world.block_data(trapdoor);
        if !helper::is_valid_trapdoor(catalog, &trapdoor_data) {
            return None;
        }
        let snapshot = BlockSnapshot::capture(world, catalog, concealing);

        let mut fixtures = FixtureSet::new(&[concealing]);
        if preserve_attachments {
            fixtures.scan_sides(world, catalog);
            let top = concealing.up();
            let top_type = world.block_type(top);
            if catalog.is_floor_torch(&top_type) || catalog.is_standing_sign(&top_type) {
                fixtures.push(world, catalog, top);
            }
        }
        let fixtures = fixtures.into_vec();

        tracing::debug!(
            key = %trapdoor,
            concealing = %snapshot.data,
            from_above,
            fixtures = fixtures.len(),
            "captured secret trapdoor"
        );
        Some(Self {
            key: trapdoor,
            trapdoor_material: trapdoor_data.material().clone(),
            concealing: snapshot,
            from_above,
            fixtures,
        })
    }

    pub fn from_above(&self) -> bool {
        self.from_above
    }

    pub fn concealing(&self) -> &BlockSnapshot {
        &self.concealing
    }

    pub fn fixtures(&self) -> &[BlockSnapshot] {
        &self.fixtures
    }

    fn set_open(&self, world: &mut dyn BlockStore, open: bool) -> Result<(), WorldError> {
        let data = world.block_data(self.key);
        if data.material() != &self.trapdoor_material {
            return Ok(());
        }
        world.set_block_data(self.key, data.with_open(open))
    }
}

impl SecretOpenable for SecretTrapdoor {
    fn open(&self, world: &mut dyn BlockStore) -> Result<(), WorldError> {
        tracing::debug!(key = %self.key, fixtures = self.fixtures.len(), "opening secret trapdoor");
        for fixture in &self.fixtures {
            fixture.clear(world);
        }
        self.concealing.clear(world);
        let status = self.set_open(world, true);
        if self.from_above {
            world.play_effect(self.key, Effect::DoorToggle);
        }
        status
    }

    /// Restores every captured cell even after a failed write; the first
    /// error is returned once the sweep is done.
    fn close(&self, world: &mut dyn BlockStore) -> Result<(), WorldError> {
        tracing::debug!(key = %self.key, fixtures = self.fixtures.len(), "closing secret trapdoor");
        let mut status = self.set_open(world, false);
        world.play_effect(self.key, Effect::DoorToggle);
        status = status.and(self.concealing.restore(world));
        for fixture in &self.fixtures {
            status = status.and(fixture.restore(world));
        }
        status
    }

    fn key(&self) -> BlockPos {
        self.key
    }

    fn kind(&self) -> OpenableKind {
        OpenableKind::Trapdoor
    }
}
