//! # Generation Module
//!
//! Procedural content generation: dungeon layout, mob encounters and
//! ground items.
//!
//! Layout generation is a leaf that only needs a PRNG; population routines
//! scatter entities into the rooms of an already carved [`World`].

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::config;
use crate::game::Position;
use crate::{BogeyError, BogeyResult};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls map dimensions, room bounds and how densely rooms are populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map width in tiles
    pub map_width: u32,
    /// Map height in tiles
    pub map_height: u32,
    /// Minimum room size (inclusive)
    pub room_min_size: u32,
    /// Maximum room size (exclusive)
    pub room_max_size: u32,
    /// Number of room placement attempts
    pub max_rooms: u32,
    /// Mob placement attempts per room
    pub max_mobs: u32,
    /// Item placement attempts per room
    pub max_items: u32,
}

impl GenerationConfig {
    /// Creates the default generation configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert!(config.room_min_size < config.room_max_size);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_width: config::MAP_WIDTH,
            map_height: config::MAP_HEIGHT,
            room_min_size: config::ROOM_MIN_SIZE,
            room_max_size: config::ROOM_MAX_SIZE,
            max_rooms: config::MAX_ROOMS,
            max_mobs: config::MAX_MOBS,
            max_items: config::MAX_ITEMS,
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            map_width: 60,
            map_height: 40,
            room_min_size: 5,
            room_max_size: 10,
            max_rooms: 15,
            max_mobs: 3,
            max_items: 3,
        }
    }

    /// Checks that the configuration can produce at least one room.
    pub fn validate(&self) -> BogeyResult<()> {
        if self.room_min_size < 3 {
            return Err(BogeyError::InvalidConfig(format!(
                "room_min_size must be at least 3, got {}",
                self.room_min_size
            )));
        }
        if self.room_min_size >= self.room_max_size {
            return Err(BogeyError::InvalidConfig(format!(
                "room_min_size ({}) must be below room_max_size ({})",
                self.room_min_size, self.room_max_size
            )));
        }
        // The largest room plus its placement margin has to fit on the map.
        if self.room_max_size + 1 > self.map_width || self.room_max_size + 1 > self.map_height {
            return Err(BogeyError::InvalidConfig(format!(
                "a {}x{} map cannot hold rooms up to size {}",
                self.map_width, self.map_height, self.room_max_size
            )));
        }
        if self.max_rooms == 0 {
            return Err(BogeyError::InvalidConfig(
                "max_rooms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Axis-aligned rectangular room in tile coordinates.
///
/// `x2 = x1 + w` and `y2 = y1 + h`; the outer ring at `x1`/`x2`/`y1`/`y2`
/// stays wall, only the interior is carved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Room {
    /// Creates a new room from its top-left corner and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::{Position, Room};
    ///
    /// let room = Room::new(5, 5, 10, 8);
    /// assert_eq!(room.x2, 15);
    /// assert_eq!(room.y2, 13);
    /// assert_eq!(room.centre(), Position::new(10, 9));
    /// ```
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + w,
            y2: y + h,
        }
    }

    /// Gets the centre of the room, truncating toward the lower coordinate.
    pub fn centre(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Checks overlap with inclusive bounds, so rooms that only share an
    /// edge intersect.
    pub fn intersect(&self, other: &Room) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Checks whether a position is strictly inside the room (not on its ring).
    pub fn interior_contains(&self, pos: Position) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }

    /// Picks a uniformly random interior point.
    pub fn rand_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.gen_range(self.x1 + 1..self.x2),
            rng.gen_range(self.y1 + 1..self.y2),
        )
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> BogeyResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> BogeyResult<()>;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
