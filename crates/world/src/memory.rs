use std::collections::{BTreeMap, BTreeSet};

use secretdoors_core::{BlockCatalog, BlockData, BlockPos, Material, SignText};

use crate::{BlockStore, Chunk, ChunkPos, DirtyFlags, Effect, LocalPos, WorldError};

/// One effect played by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EffectRecord {
    pub pos: BlockPos,
    pub effect: Effect,
}

/// Deterministic in-memory block store.
///
/// Cells are bucketed into column chunks held in a `BTreeMap`, so iteration
/// order is stable across runs. Chunks are never evicted.
pub struct MemoryWorld {
    catalog: BlockCatalog,
    chunks: BTreeMap<ChunkPos, Chunk>,
    signs: BTreeMap<BlockPos, SignText>,
    effects: Vec<EffectRecord>,
    /// Dirty chunks released because their last cell became air.
    released: BTreeSet<ChunkPos>,
}

impl MemoryWorld {
    /// An all-air world. The catalog decides which types carry sign labels.
    pub fn new(catalog: BlockCatalog) -> Self {
        Self {
            catalog,
            chunks: BTreeMap::new(),
            signs: BTreeMap::new(),
            effects: Vec::new(),
            released: BTreeSet::new(),
        }
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    /// Place a block with a full descriptor. Sign types get blank text.
    pub fn place(&mut self, pos: BlockPos, data: BlockData) {
        self.reset_label(pos, data.material());
        self.write_cell(pos, data);
    }

    /// Place a sign block and give it text.
    pub fn place_sign(&mut self, pos: BlockPos, data: BlockData, text: SignText) {
        self.place(pos, data);
        if self.signs.contains_key(&pos) {
            self.signs.insert(pos, text);
        }
    }

    /// Number of resident chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of non-air cells.
    pub fn non_air_count(&self) -> usize {
        self.chunks.values().map(Chunk::len).sum()
    }

    pub fn effects(&self) -> &[EffectRecord] {
        &self.effects
    }

    pub fn take_effects(&mut self) -> Vec<EffectRecord> {
        std::mem::take(&mut self.effects)
    }

    /// Chunks touched since the last call, with their dirty flags cleared.
    /// Includes chunks that have since been released.
    pub fn take_dirty_chunks(&mut self) -> BTreeSet<ChunkPos> {
        let mut dirty = std::mem::take(&mut self.released);
        dirty.extend(
            self.chunks
                .iter_mut()
                .filter_map(|(pos, chunk)| (!chunk.take_dirty_flags().is_empty()).then_some(*pos)),
        );
        dirty
    }

    fn write_cell(&mut self, pos: BlockPos, data: BlockData) {
        let chunk_pos = ChunkPos::containing(pos);
        let local = LocalPos::from_world(pos);
        if data.material().is_air() {
            let Some(chunk) = self.chunks.get_mut(&chunk_pos) else {
                return;
            };
            chunk.set_cell(local, data);
            if chunk.is_empty() {
                if !chunk.take_dirty_flags().is_empty() {
                    self.released.insert(chunk_pos);
                }
                self.chunks.remove(&chunk_pos);
            }
            return;
        }
        self.chunks
            .entry(chunk_pos)
            .or_insert_with(|| Chunk::new(chunk_pos))
            .set_cell(local, data);
    }

    fn reset_label(&mut self, pos: BlockPos, material: &Material) {
        let changed = if self.catalog.is_any_sign(material) {
            self.signs.insert(pos, SignText::default());
            true
        } else {
            self.signs.remove(&pos).is_some()
        };
        if changed {
            self.mark_dirty(pos, DirtyFlags::LABELS);
        }
    }

    fn mark_dirty(&mut self, pos: BlockPos, flags: DirtyFlags) {
        if let Some(chunk) = self.chunks.get_mut(&ChunkPos::containing(pos)) {
            chunk.mark_dirty(flags);
        }
    }
}

impl BlockStore for MemoryWorld {
    fn block_data(&self, pos: BlockPos) -> BlockData {
        self.chunks
            .get(&ChunkPos::containing(pos))
            .map(|chunk| chunk.cell(LocalPos::from_world(pos)))
            .unwrap_or_else(BlockData::air)
    }

    fn set_type(&mut self, pos: BlockPos, material: Material) {
        tracing::trace!(%pos, %material, "set type");
        self.reset_label(pos, &material);
        self.write_cell(pos, BlockData::new(material));
    }

    fn set_block_data(&mut self, pos: BlockPos, data: BlockData) -> Result<(), WorldError> {
        let found = self.block_type(pos);
        if &found != data.material() {
            return Err(WorldError::DescriptorMismatch {
                pos,
                expected: data.material().clone(),
                found,
            });
        }
        tracing::trace!(%pos, %data, "set block data");
        self.write_cell(pos, data);
        Ok(())
    }

    fn sign_text(&self, pos: BlockPos) -> Option<SignText> {
        self.signs.get(&pos).cloned()
    }

    fn update_sign(&mut self, pos: BlockPos, text: SignText) -> Result<(), WorldError> {
        let slot = self.signs.get_mut(&pos).ok_or(WorldError::NotASign(pos))?;
        *slot = text;
        self.mark_dirty(pos, DirtyFlags::LABELS);
        Ok(())
    }

    fn play_effect(&mut self, pos: BlockPos, effect: Effect) {
        tracing::trace!(%pos, ?effect, "play effect");
        self.effects.push(EffectRecord { pos, effect });
    }
}
