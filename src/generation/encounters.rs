//! # Encounter Generation
//!
//! Scatters mobs into carved rooms.
//!
//! Each room gets a fixed number of placement attempts. An attempt samples a
//! random interior point and a kind roll; it is skipped silently when the
//! point is already solid or the roll maps to no mob.

use crate::game::{MapObjects, Mob, MobKind, World};
use crate::generation::Room;
use rand::Rng;

/// Exclusive upper bound of the mob kind roll.
pub const MOB_ROLL_RANGE: u32 = 20;

/// Maps a kind roll in `0..MOB_ROLL_RANGE` to the mob it spawns.
pub fn mob_for_roll(roll: u32) -> Option<MobKind> {
    match roll {
        0 => Some(MobKind::Spider),
        1 => Some(MobKind::Skeleton),
        _ => None,
    }
}

/// Makes `attempts` mob placement attempts inside `room`. Returns how many
/// mobs were placed.
pub fn add_entities<R: Rng + ?Sized>(
    world: &World,
    objects: &mut MapObjects,
    room: &Room,
    attempts: u32,
    rng: &mut R,
) -> usize {
    let mut placed = 0;
    for _ in 0..attempts {
        let pos = room.rand_point(rng);
        let roll = rng.gen_range(0..MOB_ROLL_RANGE);

        if objects.is_solid(world, pos) {
            log::trace!("Skipped mob placement at occupied {:?}", pos);
            continue;
        }
        if let Some(kind) = mob_for_roll(roll) {
            objects.mobs.push(Mob::new(kind, pos));
            placed += 1;
        }
    }
    placed
}

/// Populates every room of the level with mobs and items, room by room.
pub fn populate_level<R: Rng + ?Sized>(
    world: &World,
    objects: &mut MapObjects,
    max_mobs: u32,
    max_items: u32,
    rng: &mut R,
) {
    let mut mobs = 0;
    let mut items = 0;
    for room in &world.rooms {
        mobs += add_entities(world, objects, room, max_mobs, rng);
        items += super::add_items(world, objects, room, max_items, rng);
    }
    log::debug!(
        "Populated {} rooms with {} mobs and {} items",
        world.rooms.len(),
        mobs,
        items
    );
}
