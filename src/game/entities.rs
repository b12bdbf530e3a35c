//! # Entities
//!
//! Everything that lives on top of the tile grid: the player, mobs, items
//! and the stairs marker.
//!
//! Each concrete type implements the capability traits it supports:
//! [`Entity`] (movable and drawable) for all of them,
//! [`Combatant`](crate::Combatant) for the player and mobs, and
//! [`InventoryHolder`](crate::InventoryHolder) for living entities.

use crate::game::{
    new_entity_id, palette, CombatStats, Colour, Combatant, EntityId, Inventory, InventoryHolder,
    MobState, Position,
};
use serde::{Deserialize, Serialize};

/// Base capability shared by all entities: a named, drawable thing with a
/// position on the map.
pub trait Entity {
    /// Gets the entity's unique ID.
    fn id(&self) -> EntityId;

    /// Gets the entity's current position.
    fn position(&self) -> Position;

    /// Moves the entity without any collision checks.
    fn set_position(&mut self, position: Position);

    /// Gets the display name.
    fn name(&self) -> &str;

    /// Gets the display glyph.
    fn glyph(&self) -> char;

    /// Gets the display colour.
    fn colour(&self) -> Colour;

    /// Whether the entity blocks movement into its cell.
    fn is_solid(&self) -> bool;
}

macro_rules! impl_entity {
    ($ty:ty) => {
        impl Entity for $ty {
            fn id(&self) -> EntityId {
                self.id
            }

            fn position(&self) -> Position {
                self.position
            }

            fn set_position(&mut self, position: Position) {
                self.position = position;
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn glyph(&self) -> char {
                self.glyph
            }

            fn colour(&self) -> Colour {
                self.colour
            }

            fn is_solid(&self) -> bool {
                self.solid
            }
        }
    };
}

/// The player character. One per game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCharacter {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    pub glyph: char,
    pub colour: Colour,
    pub solid: bool,
    pub stats: CombatStats,
    pub inventory: Inventory,
}

impl PlayerCharacter {
    /// Starting hit points.
    pub const BASE_HP: u32 = 300;
    /// Starting attack strength.
    pub const BASE_ATK: u32 = 30;

    /// Creates a new player at a position.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::{Combatant, Entity, PlayerCharacter, Position};
    ///
    /// let player = PlayerCharacter::new("Hero".to_string(), Position::new(5, 5));
    /// assert_eq!(player.glyph(), '@');
    /// assert_eq!(player.stats().hp, 300);
    /// assert!(player.is_solid());
    /// ```
    pub fn new(name: String, position: Position) -> Self {
        Self {
            id: new_entity_id(),
            name,
            position,
            glyph: '@',
            colour: palette::PLAYER,
            solid: true,
            stats: CombatStats::new(Self::BASE_HP, Self::BASE_ATK),
            inventory: Inventory::new(),
        }
    }
}

impl_entity!(PlayerCharacter);

impl Combatant for PlayerCharacter {
    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CombatStats {
        &mut self.stats
    }

    fn die(&mut self) {
        self.glyph = '%';
    }
}

impl InventoryHolder for PlayerCharacter {
    fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }
}

/// Fixed mob presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MobKind {
    Spider,
    Skeleton,
}

/// Stats a mob kind starts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobTemplate {
    pub name: &'static str,
    pub glyph: char,
    pub hp: u32,
    pub atk: u32,
    pub morale: u32,
    /// Fraction of max HP at or above which the mob counts as healthy
    pub healthy_fraction: f64,
}

impl MobKind {
    /// Gets the preset for this kind.
    pub fn template(self) -> MobTemplate {
        match self {
            MobKind::Spider => MobTemplate {
                name: "Spider",
                glyph: 's',
                hp: 200,
                atk: 15,
                morale: 50,
                healthy_fraction: 0.4,
            },
            MobKind::Skeleton => MobTemplate {
                name: "Skeleton",
                glyph: 'S',
                hp: 235,
                atk: 20,
                morale: 100,
                healthy_fraction: 0.4,
            },
        }
    }
}

/// A hostile creature driven by the behaviour state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mob {
    pub id: EntityId,
    pub kind: MobKind,
    pub name: String,
    pub position: Position,
    pub glyph: char,
    pub colour: Colour,
    pub solid: bool,
    pub stats: CombatStats,
    pub inventory: Inventory,
    /// Willingness to stand its ground, 0-100
    pub morale: u32,
    pub state: MobState,
    pub healthy_fraction: f64,
}

impl Mob {
    /// Suffix appended to a mob's name when the player kills it.
    pub const REMAINS_SUFFIX: &'static str = "'s remains";

    /// Creates a mob from its kind's preset.
    pub fn new(kind: MobKind, position: Position) -> Self {
        let template = kind.template();
        Self {
            id: new_entity_id(),
            kind,
            name: template.name.to_string(),
            position,
            glyph: template.glyph,
            colour: palette::MOB,
            solid: true,
            stats: CombatStats::new(template.hp, template.atk),
            inventory: Inventory::new(),
            morale: template.morale.min(100),
            state: MobState::Hold,
            healthy_fraction: template.healthy_fraction,
        }
    }

    /// Creates a spider (hp 200, atk 15, morale 50).
    pub fn spider(position: Position) -> Self {
        Self::new(MobKind::Spider, position)
    }

    /// Creates a skeleton (hp 235, atk 20, morale 100).
    pub fn skeleton(position: Position) -> Self {
        Self::new(MobKind::Skeleton, position)
    }

    /// Whether current HP is at or above this mob's healthy threshold.
    pub fn is_healthy(&self) -> bool {
        self.stats.is_healthy(self.healthy_fraction)
    }

    /// Whether the mob is a corpse.
    pub fn is_dead(&self) -> bool {
        self.state == MobState::Dead
    }

    /// Marks the corpse with the remains suffix. Applied at most once.
    pub fn mark_remains(&mut self) {
        if !self.name.ends_with(Self::REMAINS_SUFFIX) {
            self.name.push_str(Self::REMAINS_SUFFIX);
        }
    }
}

impl_entity!(Mob);

impl Combatant for Mob {
    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CombatStats {
        &mut self.stats
    }

    fn die(&mut self) {
        self.glyph = 'X';
        self.colour = palette::CORPSE;
        self.solid = false;
        self.state = MobState::Dead;
    }
}

impl InventoryHolder for Mob {
    fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }
}

/// What an item does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Carried weapon; its damage is informational only
    Weapon { damage: u32 },
    /// Restores hit points when drunk
    HealthPotion { heal: u32 },
}

/// An item lying on the ground or held in an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub kind: ItemKind,
    pub name: String,
    pub position: Position,
    pub glyph: char,
    pub colour: Colour,
    pub solid: bool,
    pub weight: u32,
    pub value: u32,
    pub usable: bool,
    pub stackable: bool,
    pub consumable: bool,
}

impl Item {
    /// Creates a weapon. Weapons are usable and never stack.
    pub fn weapon(name: &str, position: Position, weight: u32, value: u32, damage: u32) -> Self {
        Self {
            id: new_entity_id(),
            kind: ItemKind::Weapon { damage },
            name: name.to_string(),
            position,
            glyph: '|',
            colour: palette::WEAPONS,
            solid: false,
            weight,
            value,
            usable: true,
            stackable: false,
            consumable: false,
        }
    }

    /// Creates a wooden sword.
    pub fn wooden_sword(position: Position) -> Self {
        Self::weapon("Wooden Sword", position, 10, 50, 35)
    }

    /// Creates a stone sword.
    pub fn stone_sword(position: Position) -> Self {
        Self::weapon("Stone Sword", position, 15, 75, 37)
    }

    /// Creates a stackable health potion.
    pub fn health_potion(position: Position) -> Self {
        Self {
            id: new_entity_id(),
            kind: ItemKind::HealthPotion { heal: 60 },
            name: "Health Potion".to_string(),
            position,
            glyph: '!',
            colour: palette::POTIONS,
            solid: false,
            weight: 1,
            value: 25,
            usable: true,
            stackable: true,
            consumable: true,
        }
    }

    /// Copies this item under a fresh identity, for splitting a stack.
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_entity_id(),
            ..self.clone()
        }
    }

    /// Weapon damage, if this is a weapon.
    pub fn damage(&self) -> Option<u32> {
        match self.kind {
            ItemKind::Weapon { damage } => Some(damage),
            ItemKind::HealthPotion { .. } => None,
        }
    }
}

impl_entity!(Item);

/// The level-exit marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stairs {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    pub glyph: char,
    pub colour: Colour,
    pub solid: bool,
}

impl Stairs {
    pub fn new(position: Position) -> Self {
        Self {
            id: new_entity_id(),
            name: "Stairs".to_string(),
            position,
            glyph: '>',
            colour: palette::STAIRS,
            solid: false,
        }
    }
}

impl_entity!(Stairs);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mob_presets() {
        let spider = Mob::spider(Position::new(1, 1));
        assert_eq!(spider.name(), "Spider");
        assert_eq!(spider.glyph(), 's');
        assert_eq!(spider.stats, CombatStats::new(200, 15));
        assert_eq!(spider.morale, 50);
        assert_eq!(spider.state, MobState::Hold);

        let skeleton = Mob::skeleton(Position::new(1, 1));
        assert_eq!(skeleton.glyph(), 'S');
        assert_eq!(skeleton.stats, CombatStats::new(235, 20));
        assert_eq!(skeleton.morale, 100);
    }

    #[test]
    fn test_mob_death_hook() {
        let mut spider = Mob::spider(Position::new(1, 1));
        spider.die();
        assert!(!spider.is_solid());
        assert!(spider.is_dead());
        assert_eq!(spider.glyph(), 'X');
    }

    #[test]
    fn test_remains_suffix_applied_once() {
        let mut spider = Mob::spider(Position::new(1, 1));
        spider.mark_remains();
        spider.mark_remains();
        assert_eq!(spider.name(), "Spider's remains");
    }

    #[test]
    fn test_item_presets() {
        let sword = Item::wooden_sword(Position::new(0, 0));
        assert_eq!(sword.damage(), Some(35));
        assert!(!sword.stackable);
        assert!(sword.usable);
        assert!(!sword.is_solid());

        let potion = Item::health_potion(Position::new(0, 0));
        assert!(potion.stackable);
        assert!(potion.consumable);
        assert_eq!(potion.damage(), None);

        let copy = potion.duplicate();
        assert_ne!(copy.id, potion.id);
        assert_eq!(copy.name, potion.name);
    }

    #[test]
    fn test_player_death_hook() {
        let mut player = PlayerCharacter::new("Hero".to_string(), Position::new(2, 2));
        player.die();
        assert_eq!(player.glyph(), '%');
    }
}
