//! Tile hazards applied when the player finishes a move.

use crate::env::{DamageType, MapData};
use crate::state::{GameState, Position, StatusEffectKind};

/// Lingering effect left by a hazard's damage type, as
/// `(kind, steps, damage per step, movement multiplier)`.
pub fn lingering_effect(damage_type: DamageType) -> Option<(StatusEffectKind, u32, i32, f32)> {
    match damage_type {
        DamageType::Instant => None,
        DamageType::Fire => Some((StatusEffectKind::Burning, 3, 1, 1.0)),
        DamageType::Poison => Some((StatusEffectKind::Poisoned, 6, 1, 1.0)),
        // Half speed: moves take twice as long.
        DamageType::Ice => Some((StatusEffectKind::Chilled, 3, 0, 2.0)),
    }
}

fn afflicted_message(kind: StatusEffectKind) -> &'static str {
    match kind {
        StatusEffectKind::Burning => "You are burning!",
        StatusEffectKind::Poisoned => "You are poisoned!",
        StatusEffectKind::Chilled => "You are chilled!",
    }
}

/// Applies every hazardous group on `position`, across all layers.
pub fn apply_hazards(state: &mut GameState, map: &MapData, position: Position) -> Vec<String> {
    let mut messages = Vec::new();
    for group in map.hazards_at(position) {
        if group.damage_per_tick > 0 {
            let taken = state.damage_player(group.damage_per_tick);
            messages.push(format!("Took {} damage from {}!", taken, group.name));
        }
        if let Some((kind, steps, damage, multiplier)) = lingering_effect(group.damage_type) {
            state.apply_status_effect(kind, steps, damage, multiplier);
            messages.push(afflicted_message(kind).to_string());
        }
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::GroupDefinition;

    fn standing_on(hazard: GroupDefinition) -> (GameState, MapData, Position) {
        let mut map = MapData::new("field", 3, 3);
        let name = hazard.name.clone();
        map.add_group(hazard);
        let ground = map.add_layer("ground");
        let cell = Position::new(1, 1);
        map.set_cell(ground, cell, name);
        (GameState::new(&GameConfig::default(), cell), map, cell)
    }

    #[test]
    fn damage_types_leave_their_effects() {
        let cases = [
            (DamageType::Fire, Some((StatusEffectKind::Burning, 3, 1, 1.0))),
            (DamageType::Poison, Some((StatusEffectKind::Poisoned, 6, 1, 1.0))),
            (DamageType::Ice, Some((StatusEffectKind::Chilled, 3, 0, 2.0))),
            (DamageType::parse("lightning"), None),
        ];

        for (damage_type, expected) in cases {
            let (mut state, map, cell) =
                standing_on(GroupDefinition::new("hazard").with_hazard(damage_type, 2));
            let messages = apply_hazards(&mut state, &map, cell);

            assert_eq!(state.player.health(), 18, "{:?}", damage_type);
            assert_eq!(messages[0], "Took 2 damage from hazard!");
            assert_eq!(lingering_effect(damage_type), expected);

            let effects = state.player.status_effects();
            match expected {
                Some((kind, steps, damage, multiplier)) => {
                    let effect = effects.get(kind).unwrap();
                    assert_eq!(effect.remaining_steps, steps);
                    assert_eq!(effect.damage_per_step, damage);
                    assert_eq!(state.effective_movement_multiplier(), multiplier);
                    assert_eq!(messages.len(), 2);
                }
                None => {
                    assert!(effects.is_empty());
                    assert_eq!(messages.len(), 1);
                }
            }
        }
    }

    #[test]
    fn plain_tiles_are_harmless() {
        let (mut state, map, cell) = standing_on(GroupDefinition::new("grass"));
        assert!(apply_hazards(&mut state, &map, cell).is_empty());
        assert_eq!(state.player.health(), state.player.max_health());
    }
}
