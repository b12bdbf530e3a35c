//! # Input Module
//!
//! Input handling and command parsing for player interactions.
//!
//! The presentation layer reports raw [`InputEvent`]s; [`InputHandler`]
//! turns their keys into [`PlayerInput`] or [`MenuInput`] commands.

pub mod commands;

pub use commands::*;

use crate::game::{Direction, Position};

/// A key press, reduced to what the game distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Char(char),
}

/// One polled input event: at most one key plus the mouse cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Option<Key>,
    /// Map cell under the mouse cursor
    pub mouse: Position,
}

/// Input handler for processing player commands.
///
/// Handles keyboard input and converts it to commands for the dungeon view
/// or for the open menu.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::{Direction, InputHandler, Key, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(
    ///     input_handler.player_input(Key::Up),
    ///     Some(PlayerInput::Move(Direction::North))
    /// );
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Maps a key to a command while exploring the dungeon.
    pub fn player_input(&self, key: Key) -> Option<PlayerInput> {
        match key {
            Key::Up => Some(PlayerInput::Move(Direction::North)),
            Key::Down => Some(PlayerInput::Move(Direction::South)),
            Key::Left => Some(PlayerInput::Move(Direction::West)),
            Key::Right => Some(PlayerInput::Move(Direction::East)),
            Key::Escape => Some(PlayerInput::Pause),
            Key::Enter => None,
            Key::Char(c) => self.char_input(c),
        }
    }

    fn char_input(&self, c: char) -> Option<PlayerInput> {
        if self.vi_keys_enabled {
            match c {
                'h' => return Some(PlayerInput::Move(Direction::West)),
                'j' => return Some(PlayerInput::Move(Direction::South)),
                'k' => return Some(PlayerInput::Move(Direction::North)),
                'l' => return Some(PlayerInput::Move(Direction::East)),
                _ => {}
            }
        }

        match c {
            '.' | ' ' => Some(PlayerInput::Wait),
            'g' | ',' => Some(PlayerInput::PickUp),
            'i' => Some(PlayerInput::ShowInventory),
            '>' => Some(PlayerInput::Descend),
            _ => None,
        }
    }

    /// Maps a key to a command while a menu is open.
    pub fn menu_input(&self, key: Key) -> MenuInput {
        match key {
            Key::Up => MenuInput::Previous,
            Key::Down => MenuInput::Next,
            Key::Enter => MenuInput::Select,
            Key::Escape => MenuInput::Dismiss,
            Key::Left | Key::Right => MenuInput::Hotkey('\0'),
            Key::Char(c) => MenuInput::Hotkey(c),
        }
    }
}
