//! # Game Module
//!
//! Core simulation: world representation, entities, combat, mob AI and the
//! per-turn state that ties them together.
//!
//! This module contains the fundamental building blocks of the roguelike:
//! - The tile grid and its solidity queries
//! - Field of view with remembered tiles
//! - Entities (player, mobs, items, stairs) and their capability traits
//! - The mob behaviour state machine
//! - The serializable game state and message log

pub mod ai;
pub mod combat;
pub mod entities;
pub mod fov;
pub mod inventory;
pub mod messages;
pub mod objects;
pub mod settings;
pub mod state;
pub mod world;

pub use ai::*;
pub use combat::*;
pub use entities::*;
pub use fov::*;
pub use inventory::*;
pub use messages::*;
pub use objects::*;
pub use settings::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cell on the tile grid. `x` grows east, `y` grows south.
///
/// # Examples
///
/// ```
/// use bogey::{Direction, Position};
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.step(Direction::North), Position::new(10, 4));
/// assert_eq!(pos.neighbours().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Grid distance: `|dx| + |dy|`.
    ///
    /// ```
    /// use bogey::Position;
    ///
    /// assert_eq!(Position::new(0, 0).manhattan_distance(Position::new(3, -4)), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Straight-line distance, used by the mob movement heuristics.
    pub fn euclidean_distance(self, other: Position) -> f64 {
        f64::from(self.x - other.x).hypot(f64::from(self.y - other.y))
    }

    /// The four orthogonal neighbours, in [`Direction::ALL`] order.
    pub fn neighbours(self) -> [Position; 4] {
        Direction::ALL.map(|direction| self.step(direction))
    }

    /// The position one step away in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Orthogonal movement directions. There is no diagonal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Every direction, in the order mobs consider their moves.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// Column and row offset of one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// RGB display colour carried by entities and message lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fixed palette used by the simulation and the display.
pub mod palette {
    use super::Colour;

    pub const BACKGROUND: Colour = Colour::rgb(255, 255, 255);
    pub const WALL: Colour = Colour::rgb(159, 159, 159);
    pub const LIT_WALL: Colour = Colour::rgb(173, 173, 0);
    pub const GROUND: Colour = Colour::rgb(159, 159, 159);
    pub const LIT_GROUND: Colour = Colour::rgb(21, 21, 21);
    pub const PLAYER: Colour = Colour::rgb(0, 0, 0);
    pub const MOB: Colour = Colour::rgb(255, 0, 0);
    pub const CORPSE: Colour = Colour::rgb(127, 0, 0);
    pub const STAIRS: Colour = Colour::rgb(63, 63, 63);
    pub const GUI_BACKGROUND: Colour = Colour::rgb(0, 0, 0);
    pub const GUI_BORDER: Colour = Colour::rgb(31, 31, 31);
    pub const BAR_HP: Colour = Colour::rgb(191, 0, 0);
    pub const BAR_HP_UNFILLED: Colour = Colour::rgb(127, 0, 0);
    pub const TEXT: Colour = Colour::rgb(223, 223, 223);
    pub const SELECTION_TEXT: Colour = Colour::rgb(255, 255, 0);
    pub const MOB_BEHAVIOUR_TEXT: Colour = Colour::rgb(255, 191, 0);
    pub const PLAYER_ATK_TEXT: Colour = Colour::rgb(127, 127, 127);
    pub const MOB_ATK_TEXT: Colour = Colour::rgb(255, 63, 0);
    pub const PLAYER_KILL_TEXT: Colour = Colour::rgb(0, 255, 0);
    pub const PLAYER_DIE_TEXT: Colour = Colour::rgb(255, 255, 255);
    pub const PLAYER_ITEM_TEXT: Colour = Colour::rgb(0, 191, 255);
    pub const WEAPONS: Colour = Colour::rgb(196, 136, 124);
    pub const POTIONS: Colour = Colour::rgb(255, 0, 255);
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances() {
        let a = Position::new(1, 1);
        let b = Position::new(4, 5);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(b.manhattan_distance(a), 7);
        assert_eq!(a.euclidean_distance(b), 5.0);
    }

    #[test]
    fn test_neighbours_are_orthogonal() {
        let pos = Position::new(5, 5);
        assert_eq!(
            pos.neighbours(),
            [
                Position::new(6, 5),
                Position::new(4, 5),
                Position::new(5, 6),
                Position::new(5, 4),
            ]
        );
        assert!(pos.neighbours().iter().all(|n| n.manhattan_distance(pos) == 1));
    }

    #[test]
    fn test_entity_id_uniqueness() {
        assert_ne!(new_entity_id(), new_entity_id());
    }
}
