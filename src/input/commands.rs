//! # Command Definitions
//!
//! Semantic commands produced from raw keys, one set for the dungeon view
//! and one for menus.

use crate::game::Direction;

/// Player input types that can be processed while exploring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move in a direction, attacking whatever blocks it
    Move(Direction),
    /// Wait/rest for one turn
    Wait,
    /// Pick up the first item underfoot
    PickUp,
    /// Open the inventory menu
    ShowInventory,
    /// Take the stairs down
    Descend,
    /// Open the pause menu
    Pause,
}

/// Navigation inside a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Previous,
    Next,
    Select,
    /// Pop exactly one menu level
    Dismiss,
    /// Any other character, for menu-specific keys
    Hotkey(char),
}
