//! # Bogey Roguelike
//!
//! A turn-based, tile-grid roguelike: the player explores a procedurally
//! generated dungeon, fights hostile creatures, manages an inventory and
//! persists progress across sessions in save slots.
//!
//! ## Architecture Overview
//!
//! - **Generation**: rooms-and-corridors dungeon builder plus mob/item population
//! - **Game**: world grid, field of view, entities, combat, mob AI and the
//!   per-turn simulation over a single [`GameState`]
//! - **Scenes**: the turn coordinator that owns the game state, the menu stack
//!   and the save repository, and sequences render → input → mob turns
//! - **Persistence**: snapshot contract and save-slot repositories
//! - **Rendering / Input**: the presentation boundary and its macroquad adapter
//!
//! The simulation is single-threaded; every mutation happens inside
//! [`SceneManager::tick`] or the `GameState` operations it calls.

pub mod game;
pub mod generation;
pub mod input;
pub mod persistence;
pub mod rendering;
pub mod scenes;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use persistence::*;
pub use rendering::*;
pub use scenes::*;

/// Core error type for the Bogey engine.
#[derive(thiserror::Error, Debug)]
pub enum BogeyError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Configuration values cannot produce a playable game
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A save slot was read or deleted without holding a save
    #[error("No save in slot {0}")]
    MissingSave(usize),

    /// A save slot index is outside `[0, max)`
    #[error("Save slot {slot} out of range (max {max})")]
    InvalidSlot { slot: usize, max: usize },
}

/// Result type used throughout the Bogey codebase.
pub type BogeyResult<T> = Result<T, BogeyError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Console width in cells
    pub const SCREEN_WIDTH: u32 = 150;

    /// Console height in cells
    pub const SCREEN_HEIGHT: u32 = 80;

    /// Dungeon width in tiles
    pub const MAP_WIDTH: u32 = SCREEN_WIDTH;

    /// Dungeon height in tiles (70% of the screen, the rest is GUI)
    pub const MAP_HEIGHT: u32 = SCREEN_HEIGHT * 7 / 10;

    /// GUI panel width in cells
    pub const GUI_WIDTH: u32 = SCREEN_WIDTH;

    /// GUI panel height in cells
    pub const GUI_HEIGHT: u32 = SCREEN_HEIGHT - MAP_HEIGHT;

    /// Border thickness around GUI panels
    pub const BORDER_WIDTH: u32 = 2;

    /// Width of the message box
    pub const MSG_WIDTH: u32 = GUI_WIDTH / 2;

    /// Height of the message box
    pub const MSG_HEIGHT: u32 = GUI_HEIGHT - BORDER_WIDTH;

    /// Column at which message lines are wrapped
    pub const MSG_WRAP_WIDTH: usize = (MSG_WIDTH - BORDER_WIDTH * 2) as usize;

    /// Number of message lines kept before the oldest is evicted
    pub const MAX_MESSAGES: usize = (MSG_HEIGHT - BORDER_WIDTH) as usize;

    /// Inventory entries shown per menu page
    pub const ITEMS_PER_PAGE: usize = 15;

    /// Largest room dimension (exclusive)
    pub const ROOM_MAX_SIZE: u32 = 25;

    /// Smallest room dimension (inclusive)
    pub const ROOM_MIN_SIZE: u32 = 5;

    /// Room placement attempts per level
    pub const MAX_ROOMS: u32 = 50;

    /// Mob placement attempts per room
    pub const MAX_MOBS: u32 = 3;

    /// Item placement attempts per room
    pub const MAX_ITEMS: u32 = 3;

    /// Field of view radius
    pub const LIGHT_RANGE: i32 = 10;

    /// Whether walls bordering lit floor are lit themselves
    pub const FOV_LIT_WALLS: bool = true;

    /// Number of save slots
    pub const MAX_SAVES: usize = 5;

    /// Directory holding save files
    pub const SAVE_DIR: &str = "saves";
}
