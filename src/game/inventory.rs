//! # Inventory
//!
//! Item-to-count mapping held by living entities. Stackable items with the
//! same name share one entry; every non-stackable item gets its own entry.

use crate::game::{EntityId, Item};
use serde::{Deserialize, Serialize};

/// One inventory key and how many units it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// The representative item; its id is the entry key
    pub item: Item,
    pub count: u32,
}

/// Insertion-ordered mapping from item identity to count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds one item, stacking it onto an existing entry with the same name
    /// when stackable. Returns the key of the entry it ended up in.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::{Inventory, Item, Position};
    ///
    /// let mut inventory = Inventory::new();
    /// let key = inventory.add(Item::health_potion(Position::new(0, 0)));
    /// inventory.add(Item::health_potion(Position::new(3, 3)));
    /// inventory.add(Item::wooden_sword(Position::new(0, 0)));
    /// inventory.add(Item::wooden_sword(Position::new(0, 0)));
    ///
    /// assert_eq!(inventory.count(key), Some(2));
    /// assert_eq!(inventory.len(), 3);
    /// ```
    pub fn add(&mut self, item: Item) -> EntityId {
        if item.stackable {
            if let Some(entry) = self
                .entries
                .iter_mut()
                .find(|entry| entry.item.stackable && entry.item.name == item.name)
            {
                entry.count += 1;
                return entry.item.id;
            }
        }

        let key = item.id;
        self.entries.push(InventoryEntry { item, count: 1 });
        key
    }

    /// Removes one unit under `key`.
    ///
    /// The last unit removes the key entirely and hands back the stored item;
    /// otherwise the count drops by one and a fresh copy is returned.
    pub fn remove(&mut self, key: EntityId) -> Option<Item> {
        let index = self.entries.iter().position(|entry| entry.item.id == key)?;
        if self.entries[index].count > 1 {
            self.entries[index].count -= 1;
            Some(self.entries[index].item.duplicate())
        } else {
            Some(self.entries.remove(index).item)
        }
    }

    /// Gets the entry for a key.
    pub fn get(&self, key: EntityId) -> Option<&InventoryEntry> {
        self.entries.iter().find(|entry| entry.item.id == key)
    }

    /// Gets the unit count for a key.
    pub fn count(&self, key: EntityId) -> Option<u32> {
        self.get(key).map(|entry| entry.count)
    }

    pub fn contains(&self, key: EntityId) -> bool {
        self.get(key).is_some()
    }

    /// Entries in the order they were first added.
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Capability of living entities that carry items.
pub trait InventoryHolder {
    fn inventory(&self) -> &Inventory;

    fn inventory_mut(&mut self) -> &mut Inventory;

    /// Adds an item to this entity's inventory.
    fn add_to_inventory(&mut self, item: Item) -> EntityId {
        self.inventory_mut().add(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    #[test]
    fn test_stackables_share_a_key() {
        let mut inventory = Inventory::new();
        let first = inventory.add(Item::health_potion(Position::new(0, 0)));
        let second = inventory.add(Item::health_potion(Position::new(1, 1)));
        assert_eq!(first, second);
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.count(first), Some(2));
    }

    #[test]
    fn test_non_stackables_get_own_keys() {
        let mut inventory = Inventory::new();
        let a = inventory.add(Item::stone_sword(Position::new(0, 0)));
        let b = inventory.add(Item::stone_sword(Position::new(0, 0)));
        assert_ne!(a, b);
        assert_eq!(inventory.count(a), Some(1));
        assert_eq!(inventory.count(b), Some(1));
    }

    #[test]
    fn test_remove_decrements_then_drops_key() {
        let mut inventory = Inventory::new();
        let key = inventory.add(Item::health_potion(Position::new(0, 0)));
        inventory.add(Item::health_potion(Position::new(0, 0)));

        let copy = inventory.remove(key).unwrap();
        assert_ne!(copy.id, key);
        assert_eq!(inventory.count(key), Some(1));

        let last = inventory.remove(key).unwrap();
        assert_eq!(last.id, key);
        assert!(!inventory.contains(key));
        assert!(inventory.is_empty());
        assert!(inventory.remove(key).is_none());
    }

    #[test]
    fn test_per_instance_inventories_are_independent() {
        let mut a = Inventory::new();
        let b = Inventory::default();
        a.add(Item::wooden_sword(Position::new(0, 0)));
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }
}
