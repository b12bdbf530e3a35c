//! File-backed save slots.

use std::fs;
use std::path::{Path, PathBuf};

use crate::persistence::{SaveRepository, Snapshot};
use crate::{BogeyError, BogeyResult};

/// Stores each slot as pretty-printed JSON at `<dir>/save_<slot>.json`.
#[derive(Debug, Clone)]
pub struct FileSaveRepository {
    base_dir: PathBuf,
    max_saves: usize,
}

impl FileSaveRepository {
    /// Opens a save directory, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>, max_saves: usize) -> BogeyResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            max_saves,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: usize) -> PathBuf {
        self.base_dir.join(format!("save_{}.json", slot))
    }
}

impl SaveRepository for FileSaveRepository {
    fn max_saves(&self) -> usize {
        self.max_saves
    }

    fn exists(&self, slot: usize) -> bool {
        slot < self.max_saves && self.slot_path(slot).is_file()
    }

    fn write(&self, slot: usize, snapshot: &Snapshot) -> BogeyResult<()> {
        self.check_slot(slot)?;
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;

        log::info!("Saved game to slot {} ({})", slot, path.display());
        Ok(())
    }

    fn read(&self, slot: usize) -> BogeyResult<Snapshot> {
        self.check_slot(slot)?;
        if !self.exists(slot) {
            return Err(BogeyError::MissingSave(slot));
        }

        let path = self.slot_path(slot);
        let json = fs::read_to_string(&path)?;
        let snapshot = serde_json::from_str(&json)?;

        log::info!("Loaded game from slot {} ({})", slot, path.display());
        Ok(snapshot)
    }

    fn delete(&self, slot: usize) -> BogeyResult<()> {
        self.check_slot(slot)?;
        if !self.exists(slot) {
            return Err(BogeyError::MissingSave(slot));
        }

        fs::remove_file(self.slot_path(slot))?;
        log::info!("Deleted save in slot {}", slot);
        Ok(())
    }
}
