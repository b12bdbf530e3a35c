//! # Item Generation
//!
//! Scatters weapons and potions on room floors, with the same attempt and
//! skip rules as mob placement.

use crate::game::{Item, MapObjects, Position, World};
use crate::generation::Room;
use rand::Rng;

/// Exclusive upper bound of the item kind roll.
pub const ITEM_ROLL_RANGE: u32 = 5;

/// Maps a kind roll in `0..ITEM_ROLL_RANGE` to the item it spawns.
pub fn item_for_roll(roll: u32, pos: Position) -> Option<Item> {
    match roll {
        0 => Some(Item::wooden_sword(pos)),
        1 => Some(Item::stone_sword(pos)),
        2 => Some(Item::health_potion(pos)),
        _ => None,
    }
}

/// Makes `attempts` item placement attempts inside `room`. Returns how many
/// items were placed.
pub fn add_items<R: Rng + ?Sized>(
    world: &World,
    objects: &mut MapObjects,
    room: &Room,
    attempts: u32,
    rng: &mut R,
) -> usize {
    let mut placed = 0;
    for _ in 0..attempts {
        let pos = room.rand_point(rng);
        let roll = rng.gen_range(0..ITEM_ROLL_RANGE);

        if objects.is_solid(world, pos) {
            continue;
        }
        if let Some(item) = item_for_roll(roll, pos) {
            objects.items.push(item);
            placed += 1;
        }
    }
    placed
}
