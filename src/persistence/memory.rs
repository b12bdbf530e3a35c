//! In-memory save slots for tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::persistence::{SaveRepository, Snapshot};
use crate::{BogeyError, BogeyResult};

/// Keeps serialized snapshots in a map so that saves round-trip through the
/// same JSON encoding as the file backend.
#[derive(Debug)]
pub struct MemorySaveRepository {
    slots: RwLock<HashMap<usize, String>>,
    max_saves: usize,
}

impl MemorySaveRepository {
    pub fn new(max_saves: usize) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            max_saves,
        }
    }
}

fn poisoned<T>(_: T) -> BogeyError {
    BogeyError::InvalidState("save slot lock poisoned".to_string())
}

impl SaveRepository for MemorySaveRepository {
    fn max_saves(&self) -> usize {
        self.max_saves
    }

    fn exists(&self, slot: usize) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(&slot))
            .unwrap_or(false)
    }

    fn write(&self, slot: usize, snapshot: &Snapshot) -> BogeyResult<()> {
        self.check_slot(slot)?;
        let json = serde_json::to_string(snapshot)?;
        self.slots.write().map_err(poisoned)?.insert(slot, json);
        log::debug!("Saved game to memory slot {}", slot);
        Ok(())
    }

    fn read(&self, slot: usize) -> BogeyResult<Snapshot> {
        self.check_slot(slot)?;
        let slots = self.slots.read().map_err(poisoned)?;
        let json = slots.get(&slot).ok_or(BogeyError::MissingSave(slot))?;
        Ok(serde_json::from_str(json)?)
    }

    fn delete(&self, slot: usize) -> BogeyResult<()> {
        self.check_slot(slot)?;
        self.slots
            .write()
            .map_err(poisoned)?
            .remove(&slot)
            .map(|_| ())
            .ok_or(BogeyError::MissingSave(slot))
    }
}
