//! Hostility and player-initiated attacks.

use super::{EntityId, EntityInstance, GameState};
use crate::combat::{AttackResult, calculate_damage};
use crate::env::EntityType;

impl GameState {
    /// Hostility after flag overrides.
    ///
    /// A set `friendly_flag` wins, then a set `hostile_flag`, then the
    /// `hostile` property (default true).
    pub fn is_hostile(&self, entity: &EntityInstance) -> bool {
        let flag_set = |key: &str| {
            entity
                .properties
                .get_str(key)
                .is_some_and(|flag| self.has_flag(flag))
        };
        if flag_set("friendly_flag") {
            return false;
        }
        if flag_set("hostile_flag") {
            return true;
        }
        entity.properties.get_bool("hostile", true)
    }

    /// Active, hostile, alive, and an NPC or trap.
    pub fn is_attackable(&self, entity: &EntityInstance) -> bool {
        entity.is_active
            && matches!(
                entity.entity_type,
                Some(EntityType::Npc | EntityType::Trap)
            )
            && entity.health() > 0
            && self.is_hostile(entity)
    }

    /// Strikes `id` with `attack` against its `defense` property.
    ///
    /// A killing blow deactivates the entity and fires its kill hooks.
    pub fn attack_entity(&mut self, id: EntityId, attack: i32) -> Option<AttackResult> {
        let entity = self.entities.get_mut(id)?;
        let damage = calculate_damage(attack, entity.properties.get_i32("defense", 0));
        let remaining = (entity.health() - damage).max(0);
        let max_health = entity.max_health();
        entity.properties.insert("health", remaining);

        let result = AttackResult::new(entity.name(), damage, remaining, max_health);
        if result.killed {
            let kill_flag = entity.properties.get_str("on_kill_flag").map(str::to_string);
            let kill_counter = entity
                .properties
                .get_str("on_kill_increment")
                .map(str::to_string);
            self.deactivate_entity(id);
            if let Some(flag) = kill_flag {
                self.set_flag(flag);
            }
            if let Some(variable) = kill_counter {
                self.increment_variable(&variable, 1);
            }
        }
        Some(result)
    }

    /// Marks an entity inactive and records `entity_inactive:<id>` so it stays
    /// gone when the map is rebuilt.
    pub fn deactivate_entity(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        entity.is_active = false;
        let flag = format!("entity_inactive:{}", entity.id);
        self.set_flag(flag);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::env::EntityType;
    use crate::state::{EntityInstance, GameState, Position, PropertyBag};

    fn entity(entity_type: EntityType, props: &[(&str, &str)]) -> EntityInstance {
        let properties: PropertyBag = props.iter().copied().collect();
        EntityInstance::new("slime01", "slime", Position::new(1, 0), properties)
            .with_type(Some(entity_type), false)
    }

    fn state() -> GameState {
        GameState::new(&GameConfig::default(), Position::ORIGIN)
    }

    #[test]
    fn bump_attack_leaves_wounded_entity() {
        let mut state = state();
        let id = state.entities.spawn(entity(
            EntityType::Npc,
            &[("name", "Slime"), ("defense", "2"), ("health", "4")],
        ));

        let result = state.attack_entity(id, 5).unwrap();
        assert_eq!(result.damage, 3);
        assert_eq!(result.remaining_health, 1);
        assert!(!result.killed);
        assert_eq!(result.message, "Hit Slime for 3! (1/4 HP)");
        assert!(state.entities.get(id).unwrap().is_active);
    }

    #[test]
    fn killing_blow_deactivates_and_fires_hooks() {
        let mut state = state();
        let id = state.entities.spawn(entity(
            EntityType::Npc,
            &[
                ("health", "2"),
                ("on_kill_flag", "slime_dead"),
                ("on_kill_increment", "kills"),
            ],
        ));

        let result = state.attack_entity(id, 5).unwrap();
        assert!(result.killed);
        assert_eq!(result.message, "Defeated slime!");
        assert!(!state.entities.get(id).unwrap().is_active);
        assert!(state.has_flag("entity_inactive:slime01"));
        assert!(state.has_flag("slime_dead"));
        assert_eq!(state.variable_i32("kills"), 1);
    }

    #[test]
    fn hostility_follows_flag_overrides() {
        let mut state = state();
        let guard = entity(
            EntityType::Npc,
            &[
                ("health", "5"),
                ("friendly_flag", "paid_toll"),
                ("hostile_flag", "insulted"),
                ("hostile", "false"),
            ],
        );
        assert!(!state.is_attackable(&guard));

        state.set_flag("insulted");
        assert!(state.is_attackable(&guard));

        state.set_flag("paid_toll");
        assert!(!state.is_attackable(&guard));
    }

    #[test]
    fn items_and_dead_entities_are_never_attackable() {
        let state = state();
        assert!(!state.is_attackable(&entity(EntityType::Item, &[("health", "3")])));
        assert!(!state.is_attackable(&entity(EntityType::Npc, &[("health", "0")])));
        assert!(state.is_attackable(&entity(EntityType::Trap, &[("health", "1")])));
    }
}
