use std::collections::HashMap;

use secretdoors_core::BlockPos;
use secretdoors_world::{BlockStore, WorldError};

use crate::SecretOpenable;

/// Open structures keyed by their identifying position.
#[derive(Default)]
pub struct OpenRegistry {
    open: HashMap<BlockPos, Box<dyn SecretOpenable>>,
}

impl OpenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an open structure, replacing any previous entry at its key.
    pub fn put(&mut self, openable: Box<dyn SecretOpenable>) -> Option<Box<dyn SecretOpenable>> {
        let key = openable.key();
        tracing::trace!(%key, kind = %openable.kind(), "registered open structure");
        self.open.insert(key, openable)
    }

    pub fn get(&self, key: BlockPos) -> Option<&dyn SecretOpenable> {
        self.open.get(&key).map(|openable| openable.as_ref())
    }

    pub fn contains(&self, key: BlockPos) -> bool {
        self.open.contains_key(&key)
    }

    pub fn remove(&mut self, key: BlockPos) -> Option<Box<dyn SecretOpenable>> {
        self.open.remove(&key)
    }

    /// Close and discard the structure at `key`.
    ///
    /// Returns `Ok(false)` when nothing is registered there. The entry is
    /// removed even when restoring fails.
    pub fn close(&mut self, world: &mut dyn BlockStore, key: BlockPos) -> Result<bool, WorldError> {
        let Some(openable) = self.remove(key) else {
            return Ok(false);
        };
        tracing::trace!(%key, kind = %openable.kind(), "closing registered structure");
        openable.close(world)?;
        Ok(true)
    }

    /// Close every registered structure in position order. Failures are
    /// logged and do not stop the sweep. Returns the number closed cleanly.
    pub fn close_all(&mut self, world: &mut dyn BlockStore) -> usize {
        let mut keys: Vec<BlockPos> = self.open.keys().copied().collect();
        keys.sort();
        let mut closed = 0;
        for key in keys {
            match self.close(world, key) {
                Ok(true) => closed += 1,
                Ok(false) => {}
                Err(err) => tracing::warn!(%key, "failed to close structure: {err}"),
            }
        }
        closed
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Registered keys in position order.
    pub fn keys(&self) -> Vec<BlockPos> {
        let mut keys: Vec<BlockPos> = self.open.keys().copied().collect();
        keys.sort();
        keys
    }
}
