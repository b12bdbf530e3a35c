//! # Display Management
//!
//! Glyph-grid rendering and input capture using macroquad.

use crate::config;
use crate::game::{palette, Colour, Position};
use crate::input::{InputEvent, Key};
use crate::rendering::{FrameState, MenuView, Presentation, Screen};
use macroquad::prelude::*;

/// Cell width in pixels.
pub const CELL_WIDTH: f32 = 8.0;
/// Cell height in pixels.
pub const CELL_HEIGHT: f32 = 12.0;

/// Window configuration sized to the console grid.
pub fn window_conf() -> Conf {
    Conf {
        window_title: "Bogey".to_owned(),
        window_width: (config::SCREEN_WIDTH as f32 * CELL_WIDTH) as i32,
        window_height: (config::SCREEN_HEIGHT as f32 * CELL_HEIGHT) as i32,
        ..Default::default()
    }
}

fn to_color(colour: Colour) -> Color {
    Color::from_rgba(colour.r, colour.g, colour.b, 255)
}

/// Macroquad display manager for the game.
///
/// Handles all 2D graphics rendering: map, GUI panel, message box and modal
/// menus, laid out on a fixed grid of glyph cells.
pub struct MacroquadDisplay {
    /// Cell width in pixels
    pub cell_width: f32,
    /// Cell height in pixels
    pub cell_height: f32,
    /// Font size used for glyphs and text
    pub font_size: f32,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadDisplay {
    /// Creates a display with the default cell size.
    pub fn new() -> Self {
        Self {
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            font_size: CELL_HEIGHT + 4.0,
        }
    }

    fn cell_origin(&self, x: i32, y: i32) -> (f32, f32) {
        (x as f32 * self.cell_width, y as f32 * self.cell_height)
    }

    fn put_char(&self, x: i32, y: i32, glyph: char, colour: Colour) {
        let (px, py) = self.cell_origin(x, y);
        let mut buffer = [0u8; 4];
        draw_text(
            glyph.encode_utf8(&mut buffer),
            px,
            py + self.cell_height - 2.0,
            self.font_size,
            to_color(colour),
        );
    }

    fn put_text(&self, x: i32, y: i32, text: &str, colour: Colour) {
        let (px, py) = self.cell_origin(x, y);
        draw_text(
            text,
            px,
            py + self.cell_height - 2.0,
            self.font_size,
            to_color(colour),
        );
    }

    fn fill_cells(&self, x: i32, y: i32, width: u32, height: u32, colour: Colour) {
        let (px, py) = self.cell_origin(x, y);
        draw_rectangle(
            px,
            py,
            width as f32 * self.cell_width,
            height as f32 * self.cell_height,
            to_color(colour),
        );
    }

    /// Renders the map: remembered and visible tiles, then entity glyphs.
    fn render_map(&self, frame: &FrameState) {
        for y in 0..frame.height as i32 {
            for x in 0..frame.width as i32 {
                if let Some((glyph, colour)) = frame.tile_at(Position::new(x, y)).appearance() {
                    self.put_char(x, y, glyph, colour);
                }
            }
        }

        for glyph in &frame.glyphs {
            self.fill_cells(glyph.position.x, glyph.position.y, 1, 1, palette::BACKGROUND);
            self.put_char(glyph.position.x, glyph.position.y, glyph.glyph, glyph.colour);
        }
    }

    /// Renders the GUI panel below the map.
    fn render_panel(&self, frame: &FrameState) {
        let top = config::MAP_HEIGHT as i32;
        let border = config::BORDER_WIDTH as i32;
        self.fill_cells(0, top, config::GUI_WIDTH, config::GUI_HEIGHT, palette::GUI_BORDER);
        self.fill_cells(
            border,
            top + border / 2,
            config::GUI_WIDTH - config::BORDER_WIDTH * 2,
            config::GUI_HEIGHT - config::BORDER_WIDTH,
            palette::GUI_BACKGROUND,
        );

        // Hover line
        self.put_text(border + 1, top + 1, &frame.hover, palette::TEXT);

        // Health bar
        let bar_width = config::MSG_WIDTH - config::BORDER_WIDTH * 4;
        let filled = frame.health.filled(bar_width);
        self.fill_cells(border + 1, top + 3, bar_width, 1, palette::BAR_HP_UNFILLED);
        self.fill_cells(border + 1, top + 3, filled, 1, palette::BAR_HP);
        self.put_text(border + 2, top + 3, &frame.health.label(), palette::TEXT);
        self.put_text(
            border + 1,
            top + 5,
            &format!("Depth: {}", frame.depth + 1),
            palette::TEXT,
        );
        if frame.player_dead {
            self.put_text(
                border + 1,
                top + 7,
                "You are dead. Press Escape for the menu.",
                palette::PLAYER_DIE_TEXT,
            );
        }

        // Message box
        let msg_x = config::MSG_WIDTH as i32 + border;
        for (row, message) in frame.messages.iter().enumerate() {
            self.put_text(msg_x, top + border / 2 + row as i32, &message.text, message.colour);
        }
    }
}

impl Presentation for MacroquadDisplay {
    fn poll_input(&mut self) -> InputEvent {
        let (mx, my) = mouse_position();
        let mouse = Position::new(
            (mx / self.cell_width) as i32,
            (my / self.cell_height) as i32,
        );

        let special = match get_last_key_pressed() {
            Some(KeyCode::Up) => Some(Key::Up),
            Some(KeyCode::Down) => Some(Key::Down),
            Some(KeyCode::Left) => Some(Key::Left),
            Some(KeyCode::Right) => Some(Key::Right),
            Some(KeyCode::Enter) | Some(KeyCode::KpEnter) => Some(Key::Enter),
            Some(KeyCode::Escape) => Some(Key::Escape),
            _ => None,
        };

        let mut typed = None;
        while let Some(c) = get_char_pressed() {
            if typed.is_none() && !c.is_control() {
                typed = Some(Key::Char(c));
            }
        }

        InputEvent {
            key: special.or(typed),
            mouse,
        }
    }

    fn render(&mut self, frame: &FrameState) {
        clear_background(to_color(palette::BACKGROUND));
        match frame.screen {
            Screen::MainMenu => {
                let title = "B O G E Y";
                let x = (config::SCREEN_WIDTH as i32 - title.len() as i32) / 2;
                self.put_text(x, config::SCREEN_HEIGHT as i32 / 4, title, palette::PLAYER);
            }
            Screen::Playing => {
                self.render_map(frame);
                self.render_panel(frame);
            }
        }
    }

    fn show_modal(&mut self, menu: &MenuView) {
        let (start, page) = menu.page();
        let width = menu
            .options
            .iter()
            .map(|option| option.chars().count() + 4)
            .chain(std::iter::once(menu.title.chars().count() + 2))
            .max()
            .unwrap_or(20)
            .max(30) as u32;
        let rows = page.len().max(1) as u32 + 3;
        let x = (config::SCREEN_WIDTH.saturating_sub(width) / 2) as i32;
        let y = (config::SCREEN_HEIGHT.saturating_sub(rows) / 2) as i32;

        self.fill_cells(x, y, width, rows, palette::GUI_BACKGROUND);
        self.put_text(x + 1, y, &menu.title, palette::SELECTION_TEXT);

        if page.is_empty() {
            if let Some(text) = &menu.empty_text {
                self.put_text(x + 1, y + 2, text, palette::TEXT);
            }
            return;
        }

        for (offset, option) in page.iter().enumerate() {
            let index = start + offset;
            let (marker, colour) = if index == menu.selection {
                ("> ", palette::SELECTION_TEXT)
            } else {
                ("  ", palette::TEXT)
            };
            self.put_text(
                x + 1,
                y + 2 + offset as i32,
                &format!("{}{}", marker, option),
                colour,
            );
        }
    }

    fn clear_entities(&mut self) {
        // Every frame is redrawn from scratch.
    }
}
