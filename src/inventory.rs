use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::data::{Resource, ResourceType};

// ============================================================================
// Items
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "resource_type", rename_all = "snake_case")]
pub enum ItemKind {
    Resource(ResourceType),
    Weapon,
    Armor,
    Consumable,
    Trinket,
}

/// Anything a player can carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub value: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            value: 0,
        }
    }
}

impl From<&Resource> for Item {
    fn from(resource: &Resource) -> Self {
        Self {
            name: resource.name.clone(),
            kind: ItemKind::Resource(resource.resource_type),
            description: resource.description.clone(),
            value: resource.value,
        }
    }
}

// ============================================================================
// Inventory
// ============================================================================

/// Ordered items carried by one player.
///
/// The owner is fixed at construction. `collected` counts every append and is
/// never decremented, so it tracks pickups rather than current contents.
#[derive(Debug, Clone)]
pub struct Inventory {
    owner: String,
    items: Vec<Item>,
    collected: u64,
}

impl Inventory {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            items: Vec::new(),
            collected: 0,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Total number of items ever appended
    pub fn collected(&self) -> u64 {
        self.collected
    }

    /// Add an item at the end. Duplicates are allowed.
    pub fn append(&mut self, item: Item) {
        self.items.push(item);
        self.collected = self.collected.saturating_add(1);
    }

    /// Remove the first item equal to `item`. Returns false if none matched.
    /// Leaves the collected counter unchanged.
    pub fn remove(&mut self, item: &Item) -> bool {
        match self.items.iter().position(|i| i == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// First item with the given name, in pickup order
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Index<usize> for Inventory {
    type Output = Item;

    fn index(&self, index: usize) -> &Item {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return write!(f, "Inventory is empty.");
        }
        write!(f, "Inventory:")?;
        for item in &self.items {
            write!(f, "\n• {}", item.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item::new("Sword", ItemKind::Weapon)
    }

    fn shield() -> Item {
        Item::new("Shield", ItemKind::Armor)
    }

    #[test]
    fn test_append_counts_pickups() {
        let mut inventory = Inventory::new("Aria");
        inventory.append(sword());
        inventory.append(sword());

        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.collected(), 2);
        assert_eq!(inventory.owner(), "Aria");
    }

    #[test]
    fn test_remove_keeps_collected_count() {
        let mut inventory = Inventory::new("Aria");
        inventory.append(shield());
        let before: Vec<Item> = inventory.iter().cloned().collect();
        let collected_before = inventory.collected();

        inventory.append(sword());
        assert!(inventory.remove(&sword()));

        let after: Vec<Item> = inventory.iter().cloned().collect();
        assert_eq!(after, before);
        assert_eq!(inventory.collected(), collected_before + 1);
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        let mut inventory = Inventory::new("Aria");
        inventory.append(sword());
        inventory.append(shield());
        inventory.append(sword());

        assert!(inventory.remove(&sword()));
        assert_eq!(inventory[0], shield());
        assert_eq!(inventory[1], sword());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut inventory = Inventory::new("Aria");
        inventory.append(sword());

        assert!(!inventory.remove(&shield()));
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.collected(), 1);
    }

    #[test]
    fn test_find_by_name() {
        let mut inventory = Inventory::new("Aria");
        assert!(inventory.find_by_name("Shield").is_none());

        inventory.append(sword());
        inventory.append(shield());
        assert_eq!(inventory.find_by_name("Shield"), Some(&shield()));
        assert!(inventory.find_by_name("Bow").is_none());
    }

    #[test]
    fn test_find_by_name_returns_first_match() {
        let mut inventory = Inventory::new("Aria");
        let mut first = sword();
        first.value = 1;
        let mut second = sword();
        second.value = 2;
        inventory.append(first);
        inventory.append(second);

        assert_eq!(inventory.find_by_name("Sword").unwrap().value, 1);
    }

    #[test]
    fn test_iteration_and_index() {
        let mut inventory = Inventory::new("Aria");
        inventory.append(sword());
        inventory.append(shield());

        let names: Vec<&str> = (&inventory).into_iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Sword", "Shield"]);
        assert_eq!(inventory.get(1), Some(&shield()));
        assert!(inventory.get(2).is_none());
    }

    #[test]
    fn test_display() {
        let mut inventory = Inventory::new("Aria");
        assert_eq!(inventory.to_string(), "Inventory is empty.");

        inventory.append(sword());
        inventory.append(shield());
        assert_eq!(inventory.to_string(), "Inventory:\n• Sword\n• Shield");
    }
}
