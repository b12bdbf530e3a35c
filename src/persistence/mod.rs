//! # Persistence
//!
//! Save slots for running games.
//!
//! A save is a [`Snapshot`] of five named aggregates. Slots are numbered
//! `0..max_saves`; reading or deleting an empty slot is a caller error that
//! surfaces as [`BogeyError::MissingSave`], so menus check
//! [`SaveRepository::exists`] or [`SaveRepository::list_status`] first.

pub mod file;
pub mod memory;

pub use file::FileSaveRepository;
pub use memory::MemorySaveRepository;

use crate::game::{GameStatus, MapObjects, MessageLog, World};
use crate::{BogeyError, BogeyResult};
use serde::{Deserialize, Serialize};

/// Everything needed to resume a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub world: World,
    pub map_objects: MapObjects,
    /// Index of the player within `map_objects.characters`
    pub player_index: usize,
    pub messages: MessageLog,
    pub game_state: GameStatus,
}

/// Slot-indexed durable storage for snapshots.
pub trait SaveRepository: Send + Sync {
    /// Number of slots.
    fn max_saves(&self) -> usize;

    /// Whether a slot holds a save. Out-of-range slots never do.
    fn exists(&self, slot: usize) -> bool;

    /// Writes a snapshot, replacing any previous save in the slot.
    fn write(&self, slot: usize, snapshot: &Snapshot) -> BogeyResult<()>;

    /// Reads the snapshot in a slot.
    fn read(&self, slot: usize) -> BogeyResult<Snapshot>;

    /// Deletes the save in a slot.
    fn delete(&self, slot: usize) -> BogeyResult<()>;

    /// Occupancy of every slot, in slot order.
    fn list_status(&self) -> Vec<bool> {
        (0..self.max_saves()).map(|slot| self.exists(slot)).collect()
    }

    /// Checks that `slot` is in range.
    fn check_slot(&self, slot: usize) -> BogeyResult<()> {
        let max = self.max_saves();
        if slot >= max {
            return Err(BogeyError::InvalidSlot { slot, max });
        }
        Ok(())
    }
}
