//! # Game State Module
//!
//! Central game state and the operations that mutate it during a turn.
//!
//! [`GameState`] owns every aggregate that makes up a running game: the
//! tile grid, the map-object buckets, the message log and the play status.
//! Simulation functions receive it explicitly along with the RNG; nothing
//! reaches back into a shared coordinator.

use crate::game::{
    ai, palette, resolve_attack, AttackOutcome, Direction, Entity, EntityId, FieldOfView,
    GameConfig, InventoryHolder, Item, ItemKind, MapObjects, MessageLog, Mob, MobAction, Perception,
    PlayerCharacter, Position, World,
};
use crate::generation::{place_stairs, populate_level, Generator, RoomCorridorGenerator};
use crate::persistence::Snapshot;
use crate::{BogeyError, BogeyResult};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Whether the player can still act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    /// The player died; input and rendering continue but mobs stop acting
    Dead,
}

/// Whether an action used up the player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnCost {
    /// Mobs act after this action
    Turn,
    /// Menu-style action; mobs do not act
    Free,
}

impl TurnCost {
    pub fn is_turn(self) -> bool {
        self == TurnCost::Turn
    }
}

/// Default name given to a new player.
pub const PLAYER_NAME: &str = "Player";

/// All state of a running game.
#[derive(Debug, Clone)]
pub struct GameState {
    pub world: World,
    pub objects: MapObjects,
    /// Index of the player within the `characters` bucket
    player_index: usize,
    pub messages: MessageLog,
    pub status: GameStatus,
    light_range: i32,
    light_walls: bool,
    fov: FieldOfView,
    fov_dirty: bool,
}

impl GameState {
    /// Generates a fresh level and places a new player at its spawn point.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::{GameConfig, GameState, GameStatus};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = GameConfig::for_testing(7);
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let state = GameState::new_game(&config, &mut rng).unwrap();
    /// assert_eq!(state.status, GameStatus::Playing);
    /// assert!(state.fov().is_visible(state.player().position));
    /// ```
    pub fn new_game(config: &GameConfig, rng: &mut StdRng) -> BogeyResult<Self> {
        let player = PlayerCharacter::new(PLAYER_NAME.to_string(), Position::origin());
        let (world, objects) = build_level(config, player, 0, rng)?;

        let mut state = Self {
            fov: FieldOfView::new(world.width, world.height),
            world,
            objects,
            player_index: 0,
            messages: MessageLog::new(config.max_messages, config.msg_wrap_width),
            status: GameStatus::Playing,
            light_range: config.light_range,
            light_walls: config.fov_lit_walls,
            fov_dirty: true,
        };
        state.force_fov();
        state.messages.add(
            "Welcome, adventurer! Prepare to perish in the dungeon.",
            palette::PLAYER_ITEM_TEXT,
        );
        log::info!(
            "Started new game with {} rooms, {} mobs, {} items",
            state.world.rooms.len(),
            state.objects.mobs.len(),
            state.objects.items.len()
        );
        Ok(state)
    }

    /// Rebuilds a running game from persisted aggregates.
    ///
    /// Field of view is recomputed in full before the state is returned.
    pub fn from_snapshot(snapshot: Snapshot, config: &GameConfig) -> BogeyResult<Self> {
        snapshot.world.check_shape()?;
        if snapshot.player_index >= snapshot.map_objects.characters.len() {
            return Err(BogeyError::InvalidState(format!(
                "Player index {} out of range for {} characters",
                snapshot.player_index,
                snapshot.map_objects.characters.len()
            )));
        }

        let mut state = Self {
            fov: FieldOfView::new(snapshot.world.width, snapshot.world.height),
            world: snapshot.world,
            objects: snapshot.map_objects,
            player_index: snapshot.player_index,
            messages: snapshot.messages,
            status: snapshot.game_state,
            light_range: config.light_range,
            light_walls: config.fov_lit_walls,
            fov_dirty: true,
        };
        state.force_fov();
        Ok(state)
    }

    /// Captures the persistent aggregates.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            world: self.world.clone(),
            map_objects: self.objects.clone(),
            player_index: self.player_index,
            messages: self.messages.clone(),
            game_state: self.status,
        }
    }

    pub fn player_index(&self) -> usize {
        self.player_index
    }

    /// Gets the player. The index is validated whenever a state is built.
    pub fn player(&self) -> &PlayerCharacter {
        &self.objects.characters[self.player_index]
    }

    pub fn player_mut(&mut self) -> &mut PlayerCharacter {
        &mut self.objects.characters[self.player_index]
    }

    pub fn fov(&self) -> &FieldOfView {
        &self.fov
    }

    /// Whether the next render has to recompute field of view.
    pub fn fov_dirty(&self) -> bool {
        self.fov_dirty
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Impassable terrain or a solid entity at `pos`.
    pub fn is_solid(&self, pos: Position) -> bool {
        self.objects.is_solid(&self.world, pos)
    }

    /// Recomputes field of view if the player has moved since the last
    /// computation. Returns whether a recomputation happened.
    pub fn refresh_fov(&mut self) -> bool {
        if !self.fov_dirty {
            return false;
        }
        self.force_fov();
        true
    }

    /// Recomputes field of view unconditionally.
    pub fn force_fov(&mut self) {
        let origin = self.player().position;
        self.fov
            .compute(&mut self.world, origin, self.light_range, self.light_walls);
        self.fov_dirty = false;
    }

    /// Moves the player one step, or attacks the living mob standing there.
    ///
    /// Blocked moves are dropped silently. Either way the turn is spent.
    pub fn player_move_or_attack<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> TurnCost {
        let target = self.player().position.step(direction);

        if let Some(index) = self.objects.solid_mob_at(target) {
            self.player_attack(index, rng);
        } else {
            self.fov_dirty = true;
            if !self.is_solid(target) {
                self.player_mut().position = target;
            }
        }
        TurnCost::Turn
    }

    /// Skips the player's turn.
    pub fn player_wait(&mut self) -> TurnCost {
        TurnCost::Turn
    }

    fn player_attack<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        let attacker = self.player().stats;
        let mob = &mut self.objects.mobs[index];
        let name = mob.name.clone();

        let outcome = resolve_attack(&attacker, mob, rng);
        match outcome {
            AttackOutcome::Inert => return,
            AttackOutcome::Missed => self.messages.add("You missed!", palette::PLAYER_ATK_TEXT),
            AttackOutcome::Hit { damage } | AttackOutcome::Killed { damage } => self.messages.add(
                &format!("You attack {} for {} damage!", name, damage),
                palette::PLAYER_ATK_TEXT,
            ),
        }

        if let AttackOutcome::Killed { .. } = outcome {
            self.messages
                .add(&format!("You killed {}!", name), palette::PLAYER_KILL_TEXT);
            self.objects.mobs[index].mark_remains();
            self.objects.send_mob_to_back(index);
            log::debug!("{} killed by the player", name);
        }
    }

    /// Picks up the first item under the player.
    pub fn player_take(&mut self) -> TurnCost {
        let pos = self.player().position;
        if let Some(item) = self.objects.take_item_at(pos) {
            let name = item.name.clone();
            self.player_mut().add_to_inventory(item);
            self.messages
                .add(&format!("You take the {}!", name), palette::PLAYER_ITEM_TEXT);
        }
        TurnCost::Free
    }

    /// Drops one unit of an inventory entry at the player's feet.
    ///
    /// Returns false when the key is unknown or the item cannot be placed.
    pub fn player_drop(&mut self, key: EntityId) -> bool {
        let pos = self.player().position;
        if !self.player().inventory.contains(key) || !self.can_place_item(pos) {
            return false;
        }
        let Some(item) = self.player_mut().inventory.remove(key) else {
            return false;
        };

        let name = item.name.clone();
        self.place_item(pos, item);
        self.messages
            .add(&format!("You drop the {}!", name), palette::PLAYER_ITEM_TEXT);
        true
    }

    /// Uses one unit of an inventory entry. Potions heal and are consumed;
    /// weapons carry no usable effect.
    pub fn player_use(&mut self, key: EntityId) -> bool {
        let Some(entry) = self.player().inventory.get(key) else {
            return false;
        };
        let item = entry.item.clone();
        if !item.usable {
            return false;
        }

        match item.kind {
            ItemKind::HealthPotion { heal } => {
                let gained = self.player_mut().stats.heal(heal);
                self.messages.add(
                    &format!("You drink the {} and recover {} HP!", item.name, gained),
                    palette::PLAYER_ITEM_TEXT,
                );
            }
            ItemKind::Weapon { damage } => {
                self.messages.add(
                    &format!(
                        "You swing the {}, but its {} damage is not applied.",
                        item.name, damage
                    ),
                    palette::PLAYER_ITEM_TEXT,
                );
            }
        }

        if item.consumable {
            self.player_mut().inventory.remove(key);
        }
        true
    }

    /// Whether an item may be placed on `pos`.
    ///
    /// Tiles holding a mob or character accept items; otherwise the tile
    /// must not be solid.
    pub fn can_place_item(&self, pos: Position) -> bool {
        self.objects.occupied_by_creature(pos) || !self.is_solid(pos)
    }

    /// Places an item on the ground. Returns false, leaving the map
    /// untouched, if the tile rejects it.
    pub fn place_item(&mut self, pos: Position, mut item: Item) -> bool {
        if !self.can_place_item(pos) {
            log::debug!("Rejected placing {} at {:?}", item.name, pos);
            return false;
        }
        item.position = pos;
        self.objects.items.push(item);
        true
    }

    /// Gives every mob exactly one action, in bucket order. Skipped once the
    /// player is dead.
    pub fn run_mob_turns<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.is_playing() {
            return;
        }
        for index in 0..self.objects.mobs.len() {
            self.mob_action(index, rng);
        }
    }

    /// Resolves the AI state of one mob and carries out its action.
    pub fn mob_action<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        let Some(mob) = self.objects.mobs.get(index) else {
            return;
        };
        if mob.is_dead() {
            return;
        }

        let position = mob.position;
        let current = mob.state;
        let perception = Perception {
            in_sight: self.fov.is_visible(position),
            healthy: mob.is_healthy(),
            morale: mob.morale,
        };
        let next = ai::next_state(current, &perception, rng);

        if next != current {
            let mob = &mut self.objects.mobs[index];
            mob.state = next;
            log::debug!("{} at {:?}: {:?} -> {:?}", mob.name, position, current, next);
            if let Some(text) = next.entry_message(&mob.name) {
                self.messages.add(&text, palette::MOB_BEHAVIOUR_TEXT);
            }
        }

        let target = self.player().position;
        let action = ai::plan_action(next, position, target, self.is_playing(), |pos| {
            self.is_solid(pos)
        });

        match action {
            MobAction::Idle => {}
            MobAction::Attack => self.mob_attack(index, rng),
            MobAction::Step(direction) => {
                self.objects.mobs[index].position = position.step(direction);
            }
        }
    }

    fn mob_attack<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        let Mob { stats, name, .. } = &self.objects.mobs[index];
        let (stats, name) = (*stats, name.clone());

        let player = &mut self.objects.characters[self.player_index];
        let outcome = resolve_attack(&stats, player, rng);
        match outcome {
            AttackOutcome::Inert => return,
            AttackOutcome::Missed => self
                .messages
                .add(&format!("{} missed!", name), palette::MOB_ATK_TEXT),
            AttackOutcome::Hit { damage } | AttackOutcome::Killed { damage } => self.messages.add(
                &format!("{} attacks you for {} damage!", name, damage),
                palette::MOB_ATK_TEXT,
            ),
        }

        if let AttackOutcome::Killed { .. } = outcome {
            self.status = GameStatus::Dead;
            self.messages
                .add(&format!("{} killed you!", name), palette::PLAYER_DIE_TEXT);
            log::info!("Player killed by {}", name);
        }
    }

    /// Whether the player stands on the stairs.
    pub fn on_stairs(&self) -> bool {
        self.objects.stairs_at(self.player().position)
    }

    /// Takes the stairs down to a freshly generated level.
    ///
    /// The player keeps hit points and inventory. Returns false without
    /// changing anything when the player is not on the stairs.
    pub fn descend(&mut self, config: &GameConfig, rng: &mut StdRng) -> BogeyResult<bool> {
        if !self.is_playing() || !self.on_stairs() {
            return Ok(false);
        }

        let player = self.player().clone();
        let depth = self.world.depth + 1;
        let (world, objects) = build_level(config, player, depth, rng)?;

        self.fov = FieldOfView::new(world.width, world.height);
        self.world = world;
        self.objects = objects;
        self.player_index = 0;
        self.force_fov();
        self.messages.add(
            "You descend deeper into the dungeon...",
            palette::PLAYER_ITEM_TEXT,
        );
        log::info!("Descended to depth {}", depth);
        Ok(true)
    }

    /// Describes what the player can see at `pos`: living mobs with their
    /// hit points, then corpses and items by name.
    pub fn describe_at(&self, pos: Position) -> String {
        if !self.fov.is_visible(pos) {
            return String::new();
        }

        let mobs = self
            .objects
            .mobs
            .iter()
            .filter(|mob| mob.position == pos)
            .map(|mob| {
                if mob.is_dead() {
                    mob.name.clone()
                } else {
                    format!("{} [{}/{}]", mob.name, mob.stats.hp, mob.stats.max_hp)
                }
            });
        let items = self
            .objects
            .items
            .iter()
            .filter(|item| item.position == pos)
            .map(|item| item.name().to_string());

        capitalise(&mobs.chain(items).collect::<Vec<_>>().join(", "))
    }
}

/// Generates, populates and furnishes one level around `player`.
fn build_level(
    config: &GameConfig,
    mut player: PlayerCharacter,
    depth: u32,
    rng: &mut StdRng,
) -> BogeyResult<(World, MapObjects)> {
    let layout = RoomCorridorGenerator::new().generate(&config.generation, rng)?;
    let mut world = layout.world;
    world.depth = depth;

    let mut objects = MapObjects::new();
    player.position = layout.spawn;
    objects.characters.push(player);

    populate_level(
        &world,
        &mut objects,
        config.generation.max_mobs,
        config.generation.max_items,
        rng,
    );
    place_stairs(&world, &mut objects, rng);
    Ok((world, objects))
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Combatant, MobState, Tile};
    use crate::generation::Room;
    use rand::SeedableRng;

    /// A single open room with the player in the middle and nothing else.
    fn arena() -> GameState {
        let mut world = World::new(20, 20);
        let room = Room::new(0, 0, 19, 19);
        world.carve_room(&room);
        world.rooms.push(room);

        let mut objects = MapObjects::new();
        objects
            .characters
            .push(PlayerCharacter::new("Hero".to_string(), Position::new(5, 5)));

        let snapshot = Snapshot {
            world,
            map_objects: objects,
            player_index: 0,
            messages: MessageLog::new(50, 80),
            game_state: GameStatus::Playing,
        };
        GameState::from_snapshot(snapshot, &GameConfig::for_testing(1)).unwrap()
    }

    fn texts(state: &GameState) -> Vec<String> {
        state.messages.iter().map(|m| m.text.clone()).collect()
    }

    #[test]
    fn test_new_game_places_player_in_first_room() {
        let config = GameConfig::for_testing(99);
        let mut rng = StdRng::seed_from_u64(99);
        let state = GameState::new_game(&config, &mut rng).unwrap();

        let first = state.world.rooms[0];
        assert!(first.interior_contains(state.player().position));
        assert_eq!(state.objects.stairs.len(), 1);
        assert!(!state.fov_dirty());
        assert!(state.world.is_seen(state.player().position));
        for mob in &state.objects.mobs {
            assert_ne!(mob.position, state.player().position);
        }
    }

    #[test]
    fn test_move_into_wall_is_dropped() {
        let mut state = arena();
        state.player_mut().position = Position::new(1, 1);
        let mut rng = StdRng::seed_from_u64(1);

        let cost = state.player_move_or_attack(Direction::North, &mut rng);
        assert!(cost.is_turn());
        assert_eq!(state.player().position, Position::new(1, 1));

        state.player_move_or_attack(Direction::East, &mut rng);
        assert_eq!(state.player().position, Position::new(2, 1));
        assert!(state.fov_dirty());
        assert!(state.refresh_fov());
        assert!(!state.refresh_fov());
    }

    #[test]
    fn test_player_kills_spider_and_names_remains() {
        let mut state = arena();
        state.objects.mobs.push(Mob::skeleton(Position::new(9, 9)));
        state.objects.mobs.push(Mob::spider(Position::new(6, 5)));
        let mut rng = StdRng::seed_from_u64(3);

        let mut swings = 0;
        while state.objects.solid_mob_at(Position::new(6, 5)).is_some() {
            state.player_move_or_attack(Direction::East, &mut rng);
            swings += 1;
            assert!(swings < 1_000);
        }

        // The corpse was re-sorted to the front of the bucket.
        let corpse = &state.objects.mobs[0];
        assert_eq!(corpse.name, "Spider's remains");
        assert_eq!(corpse.stats.hp, 0);
        assert_eq!(corpse.state, MobState::Dead);
        assert!(!corpse.is_solid());

        let log = texts(&state);
        assert_eq!(log.last().map(String::as_str), Some("You killed Spider!"));
        assert_eq!(log.iter().filter(|t| t.starts_with("You killed")).count(), 1);

        // The corpse no longer blocks; the next step walks onto it.
        state.player_move_or_attack(Direction::East, &mut rng);
        assert_eq!(state.player().position, Position::new(6, 5));
        assert_eq!(state.objects.mobs[0].name, "Spider's remains");
    }

    #[test]
    fn test_every_swing_logs_exactly_one_line() {
        let mut state = arena();
        state.objects.mobs.push(Mob::skeleton(Position::new(5, 6)));
        let mut rng = StdRng::seed_from_u64(8);
        let before = state.messages.len();

        state.player_move_or_attack(Direction::South, &mut rng);
        assert_eq!(state.messages.len(), before + 1);
        let line = texts(&state).pop().unwrap_or_default();
        assert!(line == "You missed!" || line.starts_with("You attack Skeleton for "));
    }

    #[test]
    fn test_take_and_drop_last_stackable() {
        let mut state = arena();
        let here = state.player().position;
        state.objects.items.push(Item::health_potion(here));

        assert_eq!(state.player_take(), TurnCost::Free);
        assert!(state.objects.items.is_empty());
        assert_eq!(state.player().inventory.len(), 1);
        assert_eq!(texts(&state).pop().unwrap_or_default(), "You take the Health Potion!");

        let key = state.player().inventory.entries()[0].item.id;
        assert!(state.player_drop(key));
        assert!(state.player().inventory.is_empty());
        assert!(!state.player().inventory.contains(key));
        assert_eq!(state.objects.items.len(), 1);
        assert_eq!(state.objects.items[0].position, here);
        assert_eq!(texts(&state).pop().unwrap_or_default(), "You drop the Health Potion!");

        assert!(!state.player_drop(key));
    }

    #[test]
    fn test_place_item_rules() {
        let mut state = arena();
        assert!(!state.place_item(Position::new(0, 0), Item::stone_sword(Position::origin())));

        state.objects.mobs.push(Mob::spider(Position::new(7, 7)));
        assert!(state.place_item(Position::new(7, 7), Item::stone_sword(Position::origin())));
        assert!(state.place_item(Position::new(8, 8), Item::stone_sword(Position::origin())));
        assert_eq!(state.objects.items.len(), 2);
    }

    #[test]
    fn test_potion_heals_and_is_consumed() {
        let mut state = arena();
        state.player_mut().stats.hp = 100;
        let key = state
            .player_mut()
            .add_to_inventory(Item::health_potion(Position::origin()));
        state
            .player_mut()
            .add_to_inventory(Item::health_potion(Position::origin()));

        assert!(state.player_use(key));
        assert_eq!(state.player().stats.hp, 160);
        assert_eq!(state.player().inventory.count(key), Some(1));

        let sword = state
            .player_mut()
            .add_to_inventory(Item::wooden_sword(Position::origin()));
        assert!(state.player_use(sword));
        assert!(state.player().inventory.contains(sword));
        assert_eq!(state.player().stats.hp, 160);
    }

    #[test]
    fn test_hold_mob_out_of_sight_does_nothing() {
        let mut state = arena();
        state.player_mut().position = Position::new(2, 2);
        // Wall the mob off from the player.
        for y in 0..20 {
            state
                .world
                .set_tile(Position::new(10, y), Tile::wall())
                .unwrap();
        }
        state.force_fov();
        state.objects.mobs.push(Mob::spider(Position::new(15, 15)));
        let before = texts(&state);

        let mut rng = StdRng::seed_from_u64(4);
        state.run_mob_turns(&mut rng);

        let mob = &state.objects.mobs[0];
        assert_eq!(mob.state, MobState::Hold);
        assert_eq!(mob.position, Position::new(15, 15));
        assert_eq!(texts(&state), before);
    }

    #[test]
    fn test_mob_in_sight_chases_then_attacks() {
        let mut state = arena();
        state.objects.mobs.push(Mob::skeleton(Position::new(8, 5)));
        let mut rng = StdRng::seed_from_u64(6);

        state.run_mob_turns(&mut rng);
        assert_eq!(state.objects.mobs[0].state, MobState::Chase);
        assert_eq!(state.objects.mobs[0].position, Position::new(7, 5));
        assert!(texts(&state).contains(&"Skeleton sees you!".to_string()));

        state.run_mob_turns(&mut rng);
        assert_eq!(state.objects.mobs[0].position, Position::new(6, 5));

        let before = state.messages.len();
        state.run_mob_turns(&mut rng);
        assert_eq!(state.objects.mobs[0].position, Position::new(6, 5));
        assert_eq!(state.messages.len(), before + 1);
    }

    #[test]
    fn test_wounded_mob_in_sight_runs_away() {
        let mut state = arena();
        let mut spider = Mob::spider(Position::new(8, 5));
        spider.stats.hp = 10;
        spider.morale = 0;
        state.objects.mobs.push(spider);
        let player = state.player().position;
        let start = Position::new(8, 5);
        let mut rng = StdRng::seed_from_u64(14);

        // A roll of exactly zero never beats morale, so retry until it flees.
        let mut turns = 0;
        while state.objects.mobs[0].state != MobState::Run {
            assert_eq!(state.objects.mobs[0].position, start);
            state.run_mob_turns(&mut rng);
            turns += 1;
            assert!(turns < 1_000);
        }

        let fled_to = state.objects.mobs[0].position;
        assert!(fled_to.euclidean_distance(player) > start.euclidean_distance(player));
        let runs = |state: &GameState| {
            texts(state)
                .iter()
                .filter(|t| t.as_str() == "Spider runs away!")
                .count()
        };
        assert_eq!(runs(&state), 1);

        state.run_mob_turns(&mut rng);
        assert_eq!(runs(&state), 1);
    }

    #[test]
    fn test_player_death_stops_mob_turns() {
        let mut state = arena();
        state.objects.mobs.push(Mob::skeleton(Position::new(6, 5)));
        state.objects.mobs[0].state = MobState::Chase;
        state.player_mut().stats.hp = 1;
        let mut rng = StdRng::seed_from_u64(12);

        let mut turns = 0;
        while state.is_playing() {
            state.run_mob_turns(&mut rng);
            turns += 1;
            assert!(turns < 1_000);
        }
        assert_eq!(state.status, GameStatus::Dead);
        assert_eq!(state.player().glyph(), '%');
        assert_eq!(texts(&state).pop().unwrap_or_default(), "Skeleton killed you!");

        let before = state.messages.len();
        state.run_mob_turns(&mut rng);
        assert_eq!(state.messages.len(), before);
    }

    #[test]
    fn test_describe_at() {
        let mut state = arena();
        let pos = Position::new(6, 6);
        state.objects.mobs.push(Mob::spider(pos));
        state.objects.items.push(Item::wooden_sword(pos));
        assert_eq!(state.describe_at(pos), "Spider [200/200], wooden sword");

        state.objects.mobs[0].take_damage(1_000);
        state.objects.mobs[0].mark_remains();
        assert_eq!(state.describe_at(pos), "Spider's remains, wooden sword");

        assert_eq!(state.describe_at(Position::new(18, 18)), "");
    }

    #[test]
    fn test_descend_keeps_player() {
        let config = GameConfig::for_testing(21);
        let mut rng = StdRng::seed_from_u64(21);
        let mut state = GameState::new_game(&config, &mut rng).unwrap();

        let stairs = state.objects.stairs[0].position;
        state.player_mut().position = stairs;
        state.player_mut().stats.hp = 123;
        state
            .player_mut()
            .add_to_inventory(Item::stone_sword(Position::origin()));
        let depth = state.world.depth;

        assert!(state.descend(&config, &mut rng).unwrap());
        assert_eq!(state.world.depth, depth + 1);
        assert_eq!(state.player().stats.hp, 123);
        assert_eq!(state.player().inventory.len(), 1);
        assert!(state.world.rooms[0].interior_contains(state.player().position));
        assert!(!state.fov_dirty());
    }

    #[test]
    fn test_snapshot_rejects_corrupt_tile_grid() {
        let mut value = serde_json::to_value(arena().to_snapshot()).unwrap();
        value["world"]["tiles"]
            .as_array_mut()
            .unwrap()
            .truncate(10);
        let snapshot: Snapshot = serde_json::from_value(value).unwrap();

        assert!(matches!(
            GameState::from_snapshot(snapshot, &GameConfig::default()),
            Err(BogeyError::InvalidState(_))
        ));
    }

    #[test]
    fn test_snapshot_rejects_bad_player_index() {
        let mut snapshot = arena().to_snapshot();
        snapshot.player_index = 3;
        assert!(matches!(
            GameState::from_snapshot(snapshot, &GameConfig::default()),
            Err(BogeyError::InvalidState(_))
        ));
    }
}
