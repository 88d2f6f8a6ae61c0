use std::collections::BTreeMap;

use crate::combatant::Combatant;
use crate::error::DataResult;
use crate::inventory::{Inventory, Item};
use crate::mastery::Mastery;
use crate::record::Record;

pub const STARTING_HP: i32 = 100;

/// The player character: combat state, carried items and masteries
#[derive(Debug, Clone)]
pub struct Player {
    pub combatant: Combatant,
    /// Bound to this player for life
    inventory: Inventory,
    masteries: BTreeMap<String, Mastery>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            inventory: Inventory::new(name.clone()),
            combatant: Combatant::new(name, STARTING_HP),
            masteries: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.combatant.name
    }

    /// Items currently carried
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Add an item to the inventory and count it as collected
    pub fn pick_up(&mut self, item: Item) {
        self.inventory.append(item);
    }

    /// Drop the first matching item. Returns whether one was carried.
    pub fn drop_item(&mut self, item: &Item) -> bool {
        self.inventory.remove(item)
    }

    /// Number of items picked up over the whole session
    pub fn items_collected(&self) -> u64 {
        self.inventory.collected()
    }

    pub fn mastery(&self, key: &str) -> Option<&Mastery> {
        self.masteries.get(key)
    }

    /// Mastery for `key`, created at level 1 on first use
    pub fn mastery_mut(&mut self, key: &str) -> &mut Mastery {
        self.masteries
            .entry(key.to_string())
            .or_insert_with(|| Mastery::new(key))
    }

    /// Returns the number of levels gained
    pub fn gain_mastery_xp(&mut self, key: &str, amount: u64) -> u32 {
        self.mastery_mut(key).gain_xp(amount)
    }

    pub fn masteries(&self) -> impl Iterator<Item = &Mastery> {
        self.masteries.values()
    }

    pub fn mastery_records(&self) -> Vec<Record> {
        self.masteries.values().map(Mastery::to_record).collect()
    }

    /// Replace all masteries with the ones in `records`
    pub fn restore_masteries(&mut self, records: Vec<Record>) -> DataResult<()> {
        let mut masteries = BTreeMap::new();
        for record in records {
            let mastery = Mastery::from_record(record)?;
            masteries.insert(mastery.name.clone(), mastery);
        }
        self.masteries = masteries;
        Ok(())
    }
}
