//! # Dungeon Generation
//!
//! Rooms-and-corridors layout generation.
//!
//! Rooms are sampled at random and rejected outright when they intersect an
//! earlier room. Each accepted room after the first is joined to the room
//! accepted just before it by an L-shaped corridor whose bend is chosen at
//! random, which keeps every room on one chain.

use crate::game::{MapObjects, Position, Stairs, World};
use crate::generation::{GenerationConfig, Generator, Room};
use crate::{BogeyError, BogeyResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Whole-layout retries before generation gives up.
const MAX_GENERATION_ATTEMPTS: u32 = 10;

/// A carved dungeon and the player's spawn point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DungeonLayout {
    /// The carved world, with its rooms in acceptance order
    pub world: World,
    /// Centre of the first accepted room
    pub spawn: Position,
}

/// Primary dungeon generator using the room-and-corridor algorithm.
#[derive(Debug, Clone, Default)]
pub struct RoomCorridorGenerator;

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::{GenerationConfig, Generator, RoomCorridorGenerator};
    /// use bogey::generation::utils::create_rng;
    ///
    /// let config = GenerationConfig::for_testing(3);
    /// let mut rng = create_rng(&config);
    /// let layout = RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert!(!layout.world.rooms.is_empty());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Runs one pass of room placement. May return a world without rooms.
    fn place_rooms<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> World {
        let mut world = World::new(config.map_width, config.map_height);

        for _ in 0..config.max_rooms {
            let room = self.sample_room(config, rng);

            if world.rooms.iter().any(|existing| room.intersect(existing)) {
                continue;
            }

            world.carve_room(&room);
            if let Some(previous) = world.rooms.last().copied() {
                self.connect_rooms(&mut world, &previous, &room, rng);
            }
            world.rooms.push(room);
        }

        world
    }

    /// Samples a room rectangle fully inside the map bounds.
    fn sample_room<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Room {
        let w = rng.gen_range(config.room_min_size..config.room_max_size) as i32;
        let h = rng.gen_range(config.room_min_size..config.room_max_size) as i32;
        let x = rng.gen_range(0..(config.map_width as i32 - w - 1));
        let y = rng.gen_range(0..(config.map_height as i32 - h - 1));
        Room::new(x, y, w, h)
    }

    /// Joins two room centres with one horizontal and one vertical tunnel,
    /// picking uniformly which one is dug first.
    fn connect_rooms<R: Rng + ?Sized>(
        &self,
        world: &mut World,
        from: &Room,
        to: &Room,
        rng: &mut R,
    ) {
        let start = from.centre();
        let end = to.centre();

        if rng.gen_bool(0.5) {
            world.carve_h_tunnel(start.x, end.x, start.y);
            world.carve_v_tunnel(start.y, end.y, end.x);
        } else {
            world.carve_v_tunnel(start.y, end.y, start.x);
            world.carve_h_tunnel(start.x, end.x, end.y);
        }
    }
}

impl Generator<DungeonLayout> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> BogeyResult<DungeonLayout> {
        config.validate()?;

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let world = self.place_rooms(config, rng);
            let Some(first) = world.rooms.first() else {
                log::warn!("Generation attempt {} placed no rooms, retrying", attempt);
                continue;
            };

            let layout = DungeonLayout {
                spawn: first.centre(),
                world,
            };
            self.validate(&layout, config)?;

            log::debug!(
                "Generated {} rooms ({} passable tiles), spawn at {:?}",
                layout.world.rooms.len(),
                layout.world.passable_count(),
                layout.spawn
            );
            return Ok(layout);
        }

        Err(BogeyError::GenerationFailed(format!(
            "no room could be placed after {} attempts",
            MAX_GENERATION_ATTEMPTS
        )))
    }

    fn validate(&self, content: &DungeonLayout, config: &GenerationConfig) -> BogeyResult<()> {
        let rooms = &content.world.rooms;
        let first = rooms.first().ok_or_else(|| {
            BogeyError::GenerationFailed("Level has no rooms".to_string())
        })?;

        if rooms.len() > config.max_rooms as usize {
            return Err(BogeyError::GenerationFailed(format!(
                "{} rooms exceed the limit of {}",
                rooms.len(),
                config.max_rooms
            )));
        }

        for (i, room) in rooms.iter().enumerate() {
            if rooms[i + 1..].iter().any(|other| room.intersect(other)) {
                return Err(BogeyError::GenerationFailed(format!(
                    "Room {:?} overlaps a later room",
                    room
                )));
            }
        }

        if !first.interior_contains(content.spawn) || content.world.is_blocked(content.spawn) {
            return Err(BogeyError::GenerationFailed(format!(
                "Spawn {:?} is not inside the first room",
                content.spawn
            )));
        }

        Ok(())
    }
}

/// Puts the level-exit marker at a random interior point of a random room.
pub fn place_stairs<R: Rng + ?Sized>(world: &World, objects: &mut MapObjects, rng: &mut R) {
    objects.stairs.clear();
    if let Some(room) = world.rooms.choose(rng) {
        let pos = room.rand_point(rng);
        objects.stairs.push(Stairs::new(pos));
        log::debug!("Placed stairs at {:?}", pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use std::collections::{HashSet, VecDeque};

    fn generate(seed: u64) -> DungeonLayout {
        let config = GenerationConfig::for_testing(seed);
        let mut rng = create_rng(&config);
        RoomCorridorGenerator::new()
            .generate(&config, &mut rng)
            .unwrap()
    }

    fn reachable_from(world: &World, start: Position) -> HashSet<Position> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(pos) = queue.pop_front() {
            for next in pos.neighbours() {
                if !world.is_blocked(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate(99), generate(99));
    }

    #[test]
    fn test_all_rooms_connected() {
        let layout = generate(1234);
        let reachable = reachable_from(&layout.world, layout.spawn);
        for room in &layout.world.rooms {
            assert!(reachable.contains(&room.centre()), "room {:?} unreachable", room);
        }
        assert_eq!(reachable.len(), layout.world.passable_count());
    }

    #[test]
    fn test_single_room_config() {
        let mut config = GenerationConfig::for_testing(5);
        config.max_rooms = 1;
        let mut rng = create_rng(&config);
        let layout = RoomCorridorGenerator::new()
            .generate(&config, &mut rng)
            .unwrap();
        assert_eq!(layout.world.rooms.len(), 1);
        assert_eq!(layout.spawn, layout.world.rooms[0].centre());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GenerationConfig::for_testing(5);
        config.max_rooms = 0;
        let mut rng = create_rng(&config);
        assert!(RoomCorridorGenerator::new().generate(&config, &mut rng).is_err());
    }

    #[test]
    fn test_stairs_inside_a_room() {
        let layout = generate(77);
        let mut objects = MapObjects::new();
        let mut rng = StdRng::seed_from_u64(77);
        place_stairs(&layout.world, &mut objects, &mut rng);

        assert_eq!(objects.stairs.len(), 1);
        let stairs = objects.stairs[0].position;
        assert!(layout.world.rooms.iter().any(|room| room.interior_contains(stairs)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_rooms_never_intersect_and_spawn_is_interior(seed in any::<u64>()) {
            let layout = generate(seed);
            let rooms = &layout.world.rooms;
            prop_assert!(!rooms.is_empty());
            prop_assert!(rooms[0].interior_contains(layout.spawn));
            for (i, a) in rooms.iter().enumerate() {
                for b in &rooms[i + 1..] {
                    prop_assert!(!a.intersect(b));
                }
            }
        }
    }
}
