//! # Map Objects
//!
//! The registry of entities placed on the current level, split into named
//! buckets. Bucket order is draw order: stairs, then items, then mobs, then
//! characters, so living things render over what lies on the floor.

use crate::game::{Entity, Item, Mob, PlayerCharacter, Position, Stairs, World};
use serde::{Deserialize, Serialize};

/// Named bucket within [`MapObjects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Stairs,
    Items,
    Mobs,
    Characters,
}

impl Bucket {
    /// All buckets, bottom-most first.
    pub const DRAW_ORDER: [Bucket; 4] = [
        Bucket::Stairs,
        Bucket::Items,
        Bucket::Mobs,
        Bucket::Characters,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Bucket::Stairs => "stairs",
            Bucket::Items => "items",
            Bucket::Mobs => "mobs",
            Bucket::Characters => "characters",
        }
    }
}

/// Entities on the current level, grouped by bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapObjects {
    pub stairs: Vec<Stairs>,
    pub items: Vec<Item>,
    pub mobs: Vec<Mob>,
    pub characters: Vec<PlayerCharacter>,
}

impl MapObjects {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities of one bucket in iteration order.
    pub fn bucket(&self, bucket: Bucket) -> Vec<&dyn Entity> {
        match bucket {
            Bucket::Stairs => self.stairs.iter().map(|e| e as &dyn Entity).collect(),
            Bucket::Items => self.items.iter().map(|e| e as &dyn Entity).collect(),
            Bucket::Mobs => self.mobs.iter().map(|e| e as &dyn Entity).collect(),
            Bucket::Characters => self.characters.iter().map(|e| e as &dyn Entity).collect(),
        }
    }

    /// Every entity in draw order.
    pub fn draw_order(&self) -> Vec<&dyn Entity> {
        Bucket::DRAW_ORDER
            .iter()
            .flat_map(|bucket| self.bucket(*bucket))
            .collect()
    }

    /// Whether any solid entity occupies a position.
    pub fn solid_at(&self, pos: Position) -> bool {
        self.draw_order()
            .iter()
            .any(|entity| entity.is_solid() && entity.position() == pos)
    }

    /// Terrain or entity solidity: the single answer to "can something
    /// stand here".
    pub fn is_solid(&self, world: &World, pos: Position) -> bool {
        world.is_blocked(pos) || self.solid_at(pos)
    }

    /// Whether a mob or character stands at a position, dead or alive.
    pub fn occupied_by_creature(&self, pos: Position) -> bool {
        self.mobs.iter().any(|mob| mob.position == pos)
            || self.characters.iter().any(|c| c.position == pos)
    }

    /// Index of the solid (living) mob at a position.
    pub fn solid_mob_at(&self, pos: Position) -> Option<usize> {
        self.mobs
            .iter()
            .position(|mob| mob.solid && mob.position == pos)
    }

    /// Moves a mob to the front of its bucket so it draws beneath the rest.
    pub fn send_mob_to_back(&mut self, index: usize) {
        if index < self.mobs.len() {
            let mob = self.mobs.remove(index);
            self.mobs.insert(0, mob);
        }
    }

    /// Removes and returns the first item lying at a position.
    pub fn take_item_at(&mut self, pos: Position) -> Option<Item> {
        let index = self.items.iter().position(|item| item.position == pos)?;
        Some(self.items.remove(index))
    }

    /// Whether the stairs marker lies at a position.
    pub fn stairs_at(&self, pos: Position) -> bool {
        self.stairs.iter().any(|stairs| stairs.position == pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Combatant;

    fn populated() -> MapObjects {
        let mut objects = MapObjects::new();
        objects.stairs.push(Stairs::new(Position::new(9, 9)));
        objects.items.push(Item::wooden_sword(Position::new(2, 2)));
        objects.items.push(Item::health_potion(Position::new(2, 2)));
        objects.mobs.push(Mob::spider(Position::new(3, 3)));
        objects.mobs.push(Mob::skeleton(Position::new(4, 4)));
        objects
            .characters
            .push(PlayerCharacter::new("Hero".to_string(), Position::new(1, 1)));
        objects
    }

    #[test]
    fn test_draw_order_follows_buckets() {
        let objects = populated();
        let glyphs: String = objects.draw_order().iter().map(|e| e.glyph()).collect();
        assert_eq!(glyphs, ">|!sS@");
        assert_eq!(Bucket::Mobs.name(), "mobs");
    }

    #[test]
    fn test_solidity_ignores_items_and_corpses() {
        let mut objects = populated();
        assert!(!objects.solid_at(Position::new(2, 2)));
        assert!(objects.solid_at(Position::new(3, 3)));

        objects.mobs[0].take_damage(10_000);
        assert!(!objects.solid_at(Position::new(3, 3)));
        assert_eq!(objects.solid_mob_at(Position::new(3, 3)), None);
        assert!(objects.occupied_by_creature(Position::new(3, 3)));
    }

    #[test]
    fn test_is_solid_unifies_terrain_and_entities() {
        let mut world = World::new(12, 12);
        world.carve_room(&crate::generation::Room::new(0, 0, 10, 10));
        let objects = populated();
        assert!(objects.is_solid(&world, Position::new(0, 0)));
        assert!(objects.is_solid(&world, Position::new(4, 4)));
        assert!(!objects.is_solid(&world, Position::new(5, 5)));
        assert!(objects.is_solid(&world, Position::new(-1, 5)));
    }

    #[test]
    fn test_send_mob_to_back() {
        let mut objects = populated();
        objects.send_mob_to_back(1);
        assert_eq!(objects.mobs[0].name, "Skeleton");
        assert_eq!(objects.mobs[1].name, "Spider");
    }

    #[test]
    fn test_take_item_removes_first_match() {
        let mut objects = populated();
        let taken = objects.take_item_at(Position::new(2, 2)).unwrap();
        assert_eq!(taken.name, "Wooden Sword");
        assert_eq!(objects.items.len(), 1);
        assert!(objects.take_item_at(Position::new(5, 5)).is_none());
        assert!(objects.stairs_at(Position::new(9, 9)));
    }
}
