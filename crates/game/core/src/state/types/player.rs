//! Player-owned state: vitals, base stats, inventory and equipment.
//!
//! Health, inventory, equipment and effects are only reachable mutably
//! through [`GameState`](crate::state::GameState) methods, which keep health
//! within `[0, max_health]` and an item either in the inventory or in one
//! equipment slot.

use std::collections::BTreeMap;

use super::{Direction, Position, StatusEffects};

/// Base player statistics, before equipment bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub max_ap: i32,
}

impl PlayerStats {
    pub const fn new(max_health: i32, attack: i32, defense: i32, max_ap: i32) -> Self {
        Self {
            max_health,
            attack,
            defense,
            max_ap,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Position,
    pub facing: Direction,
    pub(crate) health: i32,
    pub(crate) stats: PlayerStats,
    pub(crate) inventory: Inventory,
    pub(crate) equipment: Equipment,
    pub(crate) status_effects: StatusEffects,
}

impl PlayerState {
    /// Creates a player at full health.
    pub fn new(position: Position, stats: PlayerStats) -> Self {
        Self {
            position,
            facing: Direction::default(),
            health: stats.max_health.max(0),
            stats,
            inventory: Inventory::default(),
            equipment: Equipment::default(),
            status_effects: StatusEffects::empty(),
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.stats.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn status_effects(&self) -> &StatusEffects {
        &self.status_effects
    }
}

/// Multiset of item names, kept in pickup order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    pub(crate) fn add(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Removes one copy; returns false if none was held.
    pub(crate) fn remove_one(&mut self, item: &str) -> bool {
        match self.items.iter().position(|held| held == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, item: &str) -> usize {
        self.items.iter().filter(|held| *held == item).count()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|held| held == item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slot name → equipped item name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Equipment {
    slots: BTreeMap<String, String>,
}

impl Equipment {
    /// Places `item` in `slot`, returning the previous occupant if any.
    pub(crate) fn equip(&mut self, slot: impl Into<String>, item: impl Into<String>) -> Option<String> {
        self.slots.insert(slot.into(), item.into())
    }

    pub(crate) fn unequip(&mut self, slot: &str) -> Option<String> {
        self.slots.remove(slot)
    }

    pub fn item_in(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.slots.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().map(|(s, i)| (s.as_str(), i.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
