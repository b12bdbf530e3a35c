//! # Scene Management System
//!
//! The turn coordinator. [`SceneManager`] owns the running game, the menu
//! stack and the save repository, and drives one tick at a time:
//! poll input, render the state as it was before that input, dispatch it,
//! then give the mobs their turn if the player spent one.
//!
//! Menus are an explicit stack instead of nested event loops. While a menu
//! is open every key goes to the top menu, and dismissing it pops exactly
//! one level.

use crate::game::{palette, GameConfig, GameState, Position};
use crate::generation::utils::create_rng;
use crate::input::{InputHandler, Key, MenuInput, PlayerInput};
use crate::persistence::SaveRepository;
use crate::rendering::{FrameState, MenuView, Presentation};
use crate::BogeyResult;
use rand::rngs::StdRng;

/// Represents the current top-level scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Title screen with the main menu open
    MainMenu,
    /// A game is running (the player may be dead)
    Playing,
    /// The player chose to quit
    Exit,
}

/// Which menu a stack entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    Main,
    Pause,
    Inventory,
    SaveSlots,
    LoadSlots,
}

/// One level of the menu stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    pub kind: MenuKind,
    pub selection: usize,
}

impl Menu {
    fn new(kind: MenuKind) -> Self {
        Self { kind, selection: 0 }
    }
}

const MAIN_OPTIONS: [&str; 3] = ["New game", "Load game", "Exit"];
const PAUSE_OPTIONS: [&str; 4] = ["Resume", "Save game", "Load game", "Main menu"];

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    game_state: Option<GameState>,
    menus: Vec<Menu>,
    saves: Box<dyn SaveRepository>,
    rng: StdRng,
    config: GameConfig,
    input_handler: InputHandler,
    mouse: Position,
}

impl SceneManager {
    /// Creates a scene manager showing the main menu. The RNG is seeded
    /// from the generation config.
    pub fn new(config: GameConfig, saves: Box<dyn SaveRepository>) -> Self {
        Self {
            current_scene: SceneType::MainMenu,
            game_state: None,
            menus: vec![Menu::new(MenuKind::Main)],
            saves,
            rng: create_rng(&config.generation),
            config,
            input_handler: InputHandler::new(),
            mouse: Position::new(-1, -1),
        }
    }

    pub fn scene(&self) -> SceneType {
        self.current_scene
    }

    pub fn game_state(&self) -> Option<&GameState> {
        self.game_state.as_ref()
    }

    pub fn game_state_mut(&mut self) -> Option<&mut GameState> {
        self.game_state.as_mut()
    }

    /// The open menus, bottom first.
    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// The topmost open menu.
    pub fn top_menu(&self) -> Option<&Menu> {
        self.menus.last()
    }

    pub fn saves(&self) -> &dyn SaveRepository {
        self.saves.as_ref()
    }

    /// Starts a fresh game, replacing any running one.
    pub fn start_new_game(&mut self) -> BogeyResult<()> {
        let state = GameState::new_game(&self.config, &mut self.rng)?;
        self.game_state = Some(state);
        self.current_scene = SceneType::Playing;
        self.menus.clear();
        Ok(())
    }

    /// Runs one tick. Returns false once the player has chosen to exit.
    pub fn tick<P: Presentation + ?Sized>(&mut self, io: &mut P) -> BogeyResult<bool> {
        if self.current_scene == SceneType::Exit {
            return Ok(false);
        }

        let event = io.poll_input();
        self.mouse = event.mouse;

        if let Some(state) = self.game_state.as_mut() {
            state.refresh_fov();
        }
        io.render(&self.frame());
        if let Some(view) = self.menu_view() {
            io.show_modal(&view);
        }
        io.clear_entities();

        let took_turn = match event.key {
            Some(key) => self.dispatch(key)?,
            None => false,
        };

        if took_turn && self.current_scene == SceneType::Playing {
            if let Some(state) = self.game_state.as_mut() {
                state.run_mob_turns(&mut self.rng);
            }
        }

        Ok(self.current_scene != SceneType::Exit)
    }

    /// The frame for the current scene.
    pub fn frame(&self) -> FrameState {
        match (&self.current_scene, &self.game_state) {
            (SceneType::Playing, Some(state)) => FrameState::from_game(state, self.mouse),
            _ => FrameState::title(),
        }
    }

    /// The top menu as the presentation draws it.
    pub fn menu_view(&self) -> Option<MenuView> {
        let menu = self.menus.last()?;
        let view = match menu.kind {
            MenuKind::Main => MenuView::new("BOGEY", to_strings(&MAIN_OPTIONS), menu.selection),
            MenuKind::Pause => MenuView::new("Paused", to_strings(&PAUSE_OPTIONS), menu.selection),
            MenuKind::Inventory => {
                MenuView::new("Inventory", self.inventory_options(), menu.selection)
                    .with_empty_text("Your inventory is empty.")
            }
            MenuKind::SaveSlots => MenuView::new("Save game", self.slot_options(), menu.selection),
            MenuKind::LoadSlots => MenuView::new("Load game", self.slot_options(), menu.selection),
        };
        Some(view)
    }

    fn option_count(&self, kind: MenuKind) -> usize {
        match kind {
            MenuKind::Main => MAIN_OPTIONS.len(),
            MenuKind::Pause => PAUSE_OPTIONS.len(),
            MenuKind::Inventory => self
                .game_state
                .as_ref()
                .map_or(0, |state| state.player().inventory.len()),
            MenuKind::SaveSlots | MenuKind::LoadSlots => self.saves.max_saves(),
        }
    }

    fn inventory_options(&self) -> Vec<String> {
        let Some(state) = self.game_state.as_ref() else {
            return Vec::new();
        };
        state
            .player()
            .inventory
            .entries()
            .iter()
            .map(|entry| {
                if entry.count > 1 {
                    format!("{} (x{})", entry.item.name, entry.count)
                } else {
                    entry.item.name.clone()
                }
            })
            .collect()
    }

    fn slot_options(&self) -> Vec<String> {
        self.saves
            .list_status()
            .into_iter()
            .enumerate()
            .map(|(slot, taken)| {
                format!("Slot {}: {}", slot + 1, if taken { "saved game" } else { "empty" })
            })
            .collect()
    }

    /// Routes a key to the top menu, or to the game when no menu is open.
    /// Returns whether the player spent a turn.
    fn dispatch(&mut self, key: Key) -> BogeyResult<bool> {
        if let Some(menu) = self.menus.last().copied() {
            let input = self.input_handler.menu_input(key);
            self.handle_menu(menu, input)?;
            return Ok(false);
        }

        match self.input_handler.player_input(key) {
            Some(input) => self.handle_player_input(input),
            None => Ok(false),
        }
    }

    fn handle_player_input(&mut self, input: PlayerInput) -> BogeyResult<bool> {
        if input == PlayerInput::Pause {
            self.menus.push(Menu::new(MenuKind::Pause));
            return Ok(false);
        }

        let Some(state) = self.game_state.as_mut() else {
            return Ok(false);
        };
        if !state.is_playing() {
            return Ok(false);
        }

        let cost = match input {
            PlayerInput::Move(direction) => state.player_move_or_attack(direction, &mut self.rng),
            PlayerInput::Wait => state.player_wait(),
            PlayerInput::PickUp => state.player_take(),
            PlayerInput::ShowInventory => {
                self.menus.push(Menu::new(MenuKind::Inventory));
                return Ok(false);
            }
            PlayerInput::Descend => {
                state.descend(&self.config, &mut self.rng)?;
                return Ok(false);
            }
            PlayerInput::Pause => return Ok(false),
        };
        Ok(cost.is_turn())
    }

    fn handle_menu(&mut self, menu: Menu, input: MenuInput) -> BogeyResult<()> {
        let count = self.option_count(menu.kind);
        match input {
            MenuInput::Previous => {
                if let Some(top) = self.menus.last_mut() {
                    top.selection = top.selection.saturating_sub(1);
                }
            }
            MenuInput::Next => {
                if let Some(top) = self.menus.last_mut() {
                    if top.selection + 1 < count {
                        top.selection += 1;
                    }
                }
            }
            MenuInput::Dismiss => self.pop_menu(),
            MenuInput::Select => self.select(menu)?,
            MenuInput::Hotkey(c) => {
                if menu.kind == MenuKind::Inventory {
                    match c {
                        'i' => self.pop_menu(),
                        'd' => self.drop_selected(menu.selection),
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    /// Pops one menu level. The main menu on the title screen stays open.
    fn pop_menu(&mut self) {
        if self.current_scene == SceneType::MainMenu && self.menus.len() == 1 {
            return;
        }
        self.menus.pop();
    }

    fn select(&mut self, menu: Menu) -> BogeyResult<()> {
        match menu.kind {
            MenuKind::Main => match menu.selection {
                0 => self.start_new_game()?,
                1 => self.menus.push(Menu::new(MenuKind::LoadSlots)),
                _ => {
                    log::info!("Exit requested from main menu");
                    self.current_scene = SceneType::Exit;
                }
            },
            MenuKind::Pause => match menu.selection {
                0 => self.pop_menu(),
                1 => self.menus.push(Menu::new(MenuKind::SaveSlots)),
                2 => self.menus.push(Menu::new(MenuKind::LoadSlots)),
                _ => self.return_to_main_menu(),
            },
            MenuKind::Inventory => self.use_selected(menu.selection),
            MenuKind::SaveSlots => self.save_to(menu.selection)?,
            MenuKind::LoadSlots => self.load_from(menu.selection)?,
        }
        Ok(())
    }

    fn return_to_main_menu(&mut self) {
        self.game_state = None;
        self.current_scene = SceneType::MainMenu;
        self.menus.clear();
        self.menus.push(Menu::new(MenuKind::Main));
    }

    fn use_selected(&mut self, selection: usize) {
        let Some(state) = self.game_state.as_mut() else {
            return;
        };
        let Some(key) = state
            .player()
            .inventory
            .entries()
            .get(selection)
            .map(|entry| entry.item.id)
        else {
            return;
        };
        state.player_use(key);
        self.clamp_selection();
    }

    fn drop_selected(&mut self, selection: usize) {
        let Some(state) = self.game_state.as_mut() else {
            return;
        };
        let Some(key) = state
            .player()
            .inventory
            .entries()
            .get(selection)
            .map(|entry| entry.item.id)
        else {
            return;
        };
        state.player_drop(key);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let Some(kind) = self.menus.last().map(|menu| menu.kind) else {
            return;
        };
        let count = self.option_count(kind);
        if let Some(top) = self.menus.last_mut() {
            top.selection = top.selection.min(count.saturating_sub(1));
        }
    }

    /// Writes the running game to a slot and resumes play.
    fn save_to(&mut self, slot: usize) -> BogeyResult<()> {
        let Some(state) = self.game_state.as_mut() else {
            return Ok(());
        };
        self.saves.write(slot, &state.to_snapshot())?;
        state.messages.add(
            &format!("Game saved to slot {}.", slot + 1),
            palette::PLAYER_ITEM_TEXT,
        );
        self.menus.clear();
        Ok(())
    }

    /// Replaces the running game with the one in a slot. Empty slots are
    /// ignored.
    fn load_from(&mut self, slot: usize) -> BogeyResult<()> {
        if !self.saves.exists(slot) {
            log::debug!("Ignored load from empty slot {}", slot);
            return Ok(());
        }

        let snapshot = self.saves.read(slot)?;
        let state = GameState::from_snapshot(snapshot, &self.config)?;
        self.game_state = Some(state);
        self.current_scene = SceneType::Playing;
        self.menus.clear();
        log::info!("Loaded game from slot {}", slot);
        Ok(())
    }
}

fn to_strings(options: &[&str]) -> Vec<String> {
    options.iter().map(|option| option.to_string()).collect()
}
