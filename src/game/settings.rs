//! # Game Settings
//!
//! Load-once configuration for a session. Defaults mirror [`crate::config`];
//! a JSON file may override any subset of fields at startup.

use crate::config;
use crate::{BogeyError, BogeyResult, GenerationConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Session-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub generation: GenerationConfig,
    /// Field of view radius in tiles
    pub light_range: i32,
    /// Whether walls bordering lit floor are lit themselves
    pub fov_lit_walls: bool,
    pub max_messages: usize,
    pub msg_wrap_width: usize,
    pub max_saves: usize,
    pub save_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            light_range: config::LIGHT_RANGE,
            fov_lit_walls: config::FOV_LIT_WALLS,
            max_messages: config::MAX_MESSAGES,
            msg_wrap_width: config::MSG_WRAP_WIDTH,
            max_saves: config::MAX_SAVES,
            save_dir: PathBuf::from(config::SAVE_DIR),
        }
    }
}

impl GameConfig {
    /// Smaller levels for tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            generation: GenerationConfig::for_testing(seed),
            ..Self::default()
        }
    }

    /// Reads a configuration from a JSON file and validates it.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: &Path) -> BogeyResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Rejects values that cannot produce a playable session.
    pub fn validate(&self) -> BogeyResult<()> {
        self.generation.validate()?;
        if self.light_range < 1 {
            return Err(BogeyError::InvalidConfig(format!(
                "light_range must be positive, got {}",
                self.light_range
            )));
        }
        if self.max_messages == 0 || self.msg_wrap_width == 0 {
            return Err(BogeyError::InvalidConfig(
                "message log needs at least one line of non-zero width".to_string(),
            ));
        }
        if self.max_saves == 0 {
            return Err(BogeyError::InvalidConfig(
                "max_saves must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
