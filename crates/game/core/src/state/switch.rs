//! Map switching and save back-fill.

use super::{EntitiesState, EntityInstance, GameState, Position, PropertyBag};
use crate::config::GameConfig;
use crate::env::MapData;

impl GameState {
    /// Moves the player onto `map` at `position` and rebuilds the entity arena.
    ///
    /// Flags, variables and the item cache carry over. Placements whose
    /// `entity_inactive:<id>` flag is set come back inactive.
    pub fn switch_map(&mut self, map: &MapData, position: Position) {
        self.player.position = position;
        self.current_map = map.id.clone();
        self.set_flag(format!("visited_map:{}", map.id));

        let mut entities = EntitiesState::empty();
        for placement in &map.placements {
            if map.is_player_placement(placement) {
                continue;
            }
            let group = map.group(&placement.group);
            let mut properties = match group {
                Some(group) => PropertyBag::merged(&group.properties, &placement.overrides),
                None => placement.overrides.clone(),
            };
            if !properties.contains("max_health") && properties.contains("health") {
                let health = properties.get_i32("health", 0);
                properties.insert("max_health", health);
            }

            let mut instance = EntityInstance::new(
                placement.id.clone(),
                placement.group.clone(),
                placement.position,
                properties,
            )
            .with_type(
                group.and_then(|group| group.entity_type),
                group.is_some_and(|group| group.is_solid()),
            );
            instance.is_active = !self.has_flag(&format!("entity_inactive:{}", placement.id));
            entities.spawn(instance);
        }
        self.entities = entities;
    }

    /// Repairs a freshly deserialized state.
    ///
    /// Older saves lack max AP; health is re-clamped in case the file was
    /// edited by hand.
    pub fn backfill_after_load(&mut self, config: &GameConfig) {
        if self.player.stats.max_ap <= 0 {
            self.player.stats.max_ap = config.default_max_ap;
        }
        if self.player.stats.max_health <= 0 {
            self.player.stats.max_health = config.player_max_health;
        }
        self.player.health = self.player.health.clamp(0, self.player.stats.max_health);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::env::{EntityType, GroupDefinition, GroupFlags, MapData};
    use crate::state::{GameState, Position, PropertyBag};

    fn map() -> MapData {
        let mut map = MapData::new("cellar", 6, 6);
        map.add_group(
            GroupDefinition::new("door")
                .with_entity_type(EntityType::Interactable)
                .with_flags(GroupFlags::SOLID),
        );
        map.add_group(
            GroupDefinition::new("rat")
                .with_entity_type(EntityType::Npc)
                .with_properties([("health", "3"), ("name", "Rat")].into_iter().collect()),
        );
        map.add_group(GroupDefinition::new("hero").with_flags(GroupFlags::PLAYER));
        map.place("door01", "door", Position::new(2, 2), PropertyBag::new());
        map.place(
            "rat01",
            "rat",
            Position::new(4, 4),
            [("health", "5")].into_iter().collect(),
        );
        map.place("start", "hero", Position::new(1, 1), PropertyBag::new());
        map
    }

    #[test]
    fn inactive_flag_survives_rebuild() {
        let mut state = GameState::new(&GameConfig::default(), Position::ORIGIN);
        state.set_flag("entity_inactive:door01");

        state.switch_map(&map(), Position::new(1, 1));

        let (_, door) = state.entities.find("door01").unwrap();
        assert!(!door.is_active);
        assert!(door.solid);
        assert!(state.has_flag("visited_map:cellar"));
        assert_eq!(state.current_map(), "cellar");
        assert_eq!(state.player.position, Position::new(1, 1));
    }

    #[test]
    fn overrides_merge_and_max_health_backfills() {
        let mut state = GameState::new(&GameConfig::default(), Position::ORIGIN);
        state.switch_map(&map(), Position::new(1, 1));

        assert_eq!(state.entities.len(), 2);
        let (_, rat) = state.entities.find("rat01").unwrap();
        assert_eq!(rat.name(), "Rat");
        assert_eq!(rat.health(), 5);
        assert_eq!(rat.max_health(), 5);
        assert!(rat.properties.contains("max_health"));
    }

    #[test]
    fn zero_max_ap_is_backfilled() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, Position::ORIGIN);
        state.player.stats.max_ap = 0;

        state.backfill_after_load(&config);
        assert_eq!(state.player.stats().max_ap, config.default_max_ap);
    }
}
