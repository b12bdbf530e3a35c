//! # Rendering Module
//!
//! The presentation boundary. The simulation builds a read-only
//! [`FrameState`] each tick and hands it to a [`Presentation`], which draws
//! it and reports raw input back. The macroquad adapter lives in
//! [`display`]; tests drive the game through scripted implementations.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::game::{palette, Colour, Entity, GameState, Message, Position};
use crate::input::InputEvent;

/// Drawing surface and input source for the game loop.
pub trait Presentation {
    /// Returns the next input event: at most one key plus the mouse cell.
    fn poll_input(&mut self) -> InputEvent;

    /// Draws one frame.
    fn render(&mut self, frame: &FrameState);

    /// Draws an open menu over the last frame. Selection and dismissal come
    /// back through later [`poll_input`](Presentation::poll_input) calls.
    fn show_modal(&mut self, menu: &MenuView);

    /// Clears entity glyphs drawn for the previous frame.
    fn clear_entities(&mut self) {}
}

/// Which top-level screen a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Playing,
}

/// How one map cell looks this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileView {
    /// In the field of view, drawn at full brightness
    Visible { wall: bool },
    /// Seen before but out of sight, drawn dimmed
    Remembered { wall: bool },
    /// Never seen, left blank
    Unseen,
}

impl TileView {
    /// Glyph and colour for this cell, if anything is drawn.
    pub fn appearance(self) -> Option<(char, Colour)> {
        match self {
            TileView::Visible { wall: true } => Some(('#', palette::LIT_WALL)),
            TileView::Visible { wall: false } => Some(('.', palette::LIT_GROUND)),
            TileView::Remembered { wall: true } => Some(('#', palette::WALL)),
            TileView::Remembered { wall: false } => Some(('.', palette::GROUND)),
            TileView::Unseen => None,
        }
    }
}

/// An entity glyph to draw on top of the tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphView {
    pub position: Position,
    pub glyph: char,
    pub colour: Colour,
}

/// Everything a presentation needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub screen: Screen,
    pub width: u32,
    pub height: u32,
    /// Row-major cell appearance
    pub tiles: Vec<TileView>,
    /// Entities inside the field of view, in draw order
    pub glyphs: Vec<GlyphView>,
    pub health: HealthBar,
    pub depth: u32,
    pub messages: Vec<Message>,
    /// Names of visible things under the mouse
    pub hover: String,
    pub player_dead: bool,
}

impl FrameState {
    /// A frame with no map, shown behind the main menu.
    pub fn title() -> Self {
        Self {
            screen: Screen::MainMenu,
            width: 0,
            height: 0,
            tiles: Vec::new(),
            glyphs: Vec::new(),
            health: HealthBar::new(0, 0),
            depth: 0,
            messages: Vec::new(),
            hover: String::new(),
            player_dead: false,
        }
    }

    /// Captures a running game as seen from the player's field of view.
    pub fn from_game(state: &GameState, mouse: Position) -> Self {
        let fov = state.fov();
        let tiles = state
            .world
            .iter()
            .map(|(pos, tile)| {
                if fov.is_visible(pos) {
                    TileView::Visible { wall: tile.fog }
                } else if tile.is_seen() {
                    TileView::Remembered { wall: tile.fog }
                } else {
                    TileView::Unseen
                }
            })
            .collect();

        let glyphs = state
            .objects
            .draw_order()
            .into_iter()
            .filter(|entity| fov.is_visible(entity.position()))
            .map(|entity| GlyphView {
                position: entity.position(),
                glyph: entity.glyph(),
                colour: entity.colour(),
            })
            .collect();

        let stats = state.player().stats;
        Self {
            screen: Screen::Playing,
            width: state.world.width,
            height: state.world.height,
            tiles,
            glyphs,
            health: HealthBar::new(stats.hp, stats.max_hp),
            depth: state.world.depth,
            messages: state.messages.iter().cloned().collect(),
            hover: state.describe_at(mouse),
            player_dead: !state.is_playing(),
        }
    }

    /// Appearance of the cell at `pos`.
    pub fn tile_at(&self, pos: Position) -> TileView {
        if pos.x < 0 || pos.y < 0 || pos.x as u32 >= self.width || pos.y as u32 >= self.height {
            return TileView::Unseen;
        }
        self.tiles
            .get(pos.y as usize * self.width as usize + pos.x as usize)
            .copied()
            .unwrap_or(TileView::Unseen)
    }
}
