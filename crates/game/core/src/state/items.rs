//! Inventory, equipment and item use.
//!
//! An item name lives either in the inventory or in exactly one equipment
//! slot. Bonuses and effects are read from the item-property cache filled by
//! [`GameState::collect_item`].

use super::{EntityId, GameState, StateError};

/// Slot used when an item does not declare one.
pub const DEFAULT_SLOT: &str = "weapon";

/// Outcome of picking an item entity up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectResult {
    pub item: String,
    pub message: String,
}

impl GameState {
    /// Moves `item` from the inventory into its slot.
    ///
    /// The previous occupant of the slot, if any, goes back to the inventory
    /// and is returned.
    pub fn equip(&mut self, item: &str) -> Result<Option<String>, StateError> {
        if !self.player.inventory.remove_one(item) {
            return Err(StateError::ItemNotInInventory {
                item: item.to_string(),
            });
        }
        let slot = self.slot_for(item);
        let previous = self.player.equipment.equip(slot, item);
        if let Some(previous) = &previous {
            self.player.inventory.add(previous.clone());
        }
        Ok(previous)
    }

    /// Empties `slot`, returning its item to the inventory.
    pub fn unequip(&mut self, slot: &str) -> Result<String, StateError> {
        let item = self
            .player
            .equipment
            .unequip(slot)
            .ok_or_else(|| StateError::SlotEmpty {
                slot: slot.to_string(),
            })?;
        self.player.inventory.add(item.clone());
        Ok(item)
    }

    /// Slot an item equips into: its `slot` property, else [`DEFAULT_SLOT`].
    pub fn slot_for(&self, item: &str) -> String {
        self.item_properties(item)
            .and_then(|props| props.get_str("slot"))
            .unwrap_or(DEFAULT_SLOT)
            .to_string()
    }

    fn equipment_bonus(&self, key: &str) -> i32 {
        self.player
            .equipment
            .items()
            .filter_map(|item| self.item_properties(item))
            .map(|props| props.get_i32(key, 0))
            .sum()
    }

    pub fn effective_attack(&self) -> i32 {
        self.player.stats.attack + self.equipment_bonus("attack_bonus")
    }

    pub fn effective_defense(&self) -> i32 {
        self.player.stats.defense + self.equipment_bonus("defense_bonus")
    }

    pub fn effective_max_ap(&self) -> i32 {
        self.player.stats.max_ap + self.equipment_bonus("ap_bonus")
    }

    /// Picks up an item entity.
    ///
    /// The item's properties are cached the first time its name is seen;
    /// later pickups of the same item keep the original entry. The entity is
    /// deactivated and its collect hooks fire.
    pub fn collect_item(&mut self, id: EntityId) -> Result<CollectResult, StateError> {
        let entity = self
            .entities
            .get(id)
            .ok_or(StateError::EntityNotFound { id })?;
        let item = entity.name().to_string();
        let properties = entity.properties.clone();

        self.player.inventory.add(item.clone());
        self.item_properties
            .entry(item.clone())
            .or_insert_with(|| properties.clone());
        self.deactivate_entity(id);

        if let Some(flag) = properties.get_str("on_collect_flag") {
            self.set_flag(flag);
        }
        if let Some(variable) = properties.get_str("on_collect_increment") {
            self.increment_variable(variable, 1);
        }

        Ok(CollectResult {
            message: format!("Picked up {}!", item),
            item,
        })
    }

    /// Consumes one copy of a usable item.
    ///
    /// An item is usable when its cached properties declare `heal` and/or
    /// `sets_flag`. Returns the message to show.
    pub fn use_item(&mut self, item: &str) -> Result<String, StateError> {
        if !self.player.inventory.contains(item) {
            return Err(StateError::ItemNotInInventory {
                item: item.to_string(),
            });
        }
        let (heal, flag) = match self.item_properties(item) {
            Some(props) => (
                props.get_i32("heal", 0),
                props.get_str("sets_flag").map(str::to_string),
            ),
            None => (0, None),
        };
        if heal <= 0 && flag.is_none() {
            return Err(StateError::ItemNotUsable {
                item: item.to_string(),
            });
        }

        self.player.inventory.remove_one(item);
        let healed = if heal > 0 { self.heal_player(heal) } else { 0 };
        if let Some(flag) = flag {
            self.set_flag(flag);
        }

        Ok(if heal > 0 {
            format!("Used {}. Restored {} HP.", item, healed)
        } else {
            format!("Used {}.", item)
        })
    }

    /// Drops one copy from the inventory; equipment is never touched.
    pub fn remove_item(&mut self, item: &str) -> bool {
        self.player.inventory.remove_one(item)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::env::EntityType;
    use crate::state::{EntityInstance, GameState, Position, PropertyBag, StateError};

    fn spawn_item(state: &mut GameState, id: &str, props: &[(&str, &str)]) -> crate::state::EntityId {
        let properties: PropertyBag = props.iter().copied().collect();
        state.entities.spawn(
            EntityInstance::new(id, "item", Position::new(1, 1), properties)
                .with_type(Some(EntityType::Item), false),
        )
    }

    fn state() -> GameState {
        GameState::new(&GameConfig::default(), Position::ORIGIN)
    }

    #[test]
    fn equipping_into_an_occupied_slot_swaps() {
        let mut state = state();
        let a = spawn_item(&mut state, "a", &[("name", "Dagger"), ("attack_bonus", "1")]);
        let b = spawn_item(&mut state, "b", &[("name", "Sword"), ("attack_bonus", "3")]);
        state.collect_item(a).unwrap();
        state.collect_item(b).unwrap();

        assert_eq!(state.equip("Dagger").unwrap(), None);
        assert_eq!(state.equip("Sword").unwrap(), Some("Dagger".to_string()));

        assert_eq!(state.player.equipment().item_in("weapon"), Some("Sword"));
        assert!(state.player.inventory().contains("Dagger"));
        assert!(!state.player.inventory().contains("Sword"));
        assert_eq!(state.effective_attack(), state.player.stats().attack + 3);

        assert_eq!(state.unequip("weapon").unwrap(), "Sword");
        assert_eq!(state.player.equipment().item_in("weapon"), None);
        assert_eq!(state.player.inventory().count("Sword"), 1);
    }

    #[test]
    fn equipping_requires_the_item() {
        let mut state = state();
        assert_eq!(
            state.equip("Sword"),
            Err(StateError::ItemNotInInventory {
                item: "Sword".to_string()
            })
        );
        assert!(state.unequip("weapon").is_err());
    }

    #[test]
    fn collecting_caches_properties_once() {
        let mut state = state();
        let first = spawn_item(&mut state, "p1", &[("name", "Potion"), ("heal", "5")]);
        let second = spawn_item(&mut state, "p2", &[("name", "Potion"), ("heal", "50")]);

        state.collect_item(first).unwrap();
        state.collect_item(second).unwrap();

        assert_eq!(state.player.inventory().count("Potion"), 2);
        assert_eq!(
            state.item_properties("Potion").unwrap().get("heal"),
            Some("5")
        );
        assert!(state.has_flag("entity_inactive:p2"));
        assert!(!state.entities.get(second).unwrap().is_active);
    }

    #[test]
    fn collect_hooks_fire() {
        let mut state = state();
        let gem = spawn_item(
            &mut state,
            "gem1",
            &[("on_collect_flag", "found_gem"), ("on_collect_increment", "gems")],
        );
        state.collect_item(gem).unwrap();
        assert!(state.has_flag("found_gem"));
        assert_eq!(state.variable_i32("gems"), 1);
    }

    #[test]
    fn using_items_consumes_one_copy() {
        let mut state = state();
        let potion = spawn_item(&mut state, "p1", &[("name", "Potion"), ("heal", "5")]);
        let rock = spawn_item(&mut state, "r1", &[("name", "Rock")]);
        state.collect_item(potion).unwrap();
        state.collect_item(rock).unwrap();
        state.damage_player(3);

        assert_eq!(state.use_item("Potion").unwrap(), "Used Potion. Restored 3 HP.");
        assert!(!state.player.inventory().contains("Potion"));
        assert_eq!(
            state.use_item("Rock"),
            Err(StateError::ItemNotUsable {
                item: "Rock".to_string()
            })
        );
        assert!(state.remove_item("Rock"));
        assert!(!state.remove_item("Rock"));
    }

    #[test]
    fn equipped_bonuses_add_to_base_stats() {
        let cases = [
            ("attack_bonus", "Axe", "weapon"),
            ("defense_bonus", "Shield", "offhand"),
            ("ap_bonus", "Boots", "feet"),
        ];

        for (bonus, name, slot) in cases {
            let mut state = state();
            let base = (
                state.effective_attack(),
                state.effective_defense(),
                state.effective_max_ap(),
            );
            let item = spawn_item(&mut state, "gear", &[("name", name), ("slot", slot), (bonus, "2")]);
            state.collect_item(item).unwrap();
            state.equip(name).unwrap();
            assert_eq!(state.player.equipment().item_in(slot), Some(name));

            let expected = match bonus {
                "attack_bonus" => (base.0 + 2, base.1, base.2),
                "defense_bonus" => (base.0, base.1 + 2, base.2),
                _ => (base.0, base.1, base.2 + 2),
            };
            assert_eq!(
                (
                    state.effective_attack(),
                    state.effective_defense(),
                    state.effective_max_ap()
                ),
                expected,
                "{}",
                bonus
            );

            // Bonuses only count while equipped.
            state.unequip(slot).unwrap();
            assert_eq!(
                (
                    state.effective_attack(),
                    state.effective_defense(),
                    state.effective_max_ap()
                ),
                base
            );
        }
    }
}
