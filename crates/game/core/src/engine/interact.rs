//! Cell interactions, dispatched on the occupant's entity type.

use super::{Handoff, TurnOutcome};
use crate::env::{EntityType, GameEnv};
use crate::state::{EntityId, GameState, Position};
use crate::transition::TransitionRequest;

/// Interacts with the active entity on `position`, if any.
///
/// Returns true when something was there to interact with.
pub fn interact_at(
    state: &mut GameState,
    env: &GameEnv<'_>,
    position: Position,
    outcome: &mut TurnOutcome,
) -> bool {
    let Some((id, entity)) = state.entity_at(position) else {
        return false;
    };
    let Some(entity_type) = entity.entity_type else {
        return false;
    };
    let name = entity.name().to_string();
    let dialogue = entity.properties.get_str("dialogue").map(str::to_string);

    match entity_type {
        EntityType::Npc => match dialogue.and_then(|key| env.resolve_dialogue(&key, &name)) {
            Some(data) => outcome.handoff = Some(Handoff::Dialogue(data)),
            None => outcome.push(format!("You talked to {}.", name)),
        },
        EntityType::Interactable => {
            match dialogue.and_then(|key| env.resolve_dialogue(&key, &name)) {
                Some(data) => outcome.handoff = Some(Handoff::Dialogue(data)),
                None => outcome.push(format!("You interacted with {}.", name)),
            }
        }
        EntityType::Item => {
            if let Ok(collected) = state.collect_item(id) {
                outcome.push(collected.message);
            }
        }
        EntityType::Trap => spring_trap(state, id, &name, outcome),
        EntityType::Trigger => {
            if let Some(request) = trigger_target(state, id) {
                outcome.handoff = Some(Handoff::Transition(request));
            }
        }
    }
    true
}

fn spring_trap(state: &mut GameState, id: EntityId, name: &str, outcome: &mut TurnOutcome) {
    let damage = state
        .entities
        .get(id)
        .map_or(0, |trap| trap.properties.get_i32("damage", 0));
    if damage > 0 {
        let taken = state.damage_player(damage);
        outcome.push(format!("{} hits you for {} damage!", name, taken));
    } else {
        outcome.push(format!("You triggered {}.", name));
    }
}

/// Transition declared by a trigger's `target_map`/`target_x`/`target_y`.
fn trigger_target(state: &GameState, id: EntityId) -> Option<TransitionRequest> {
    let props = &state.entities.get(id)?.properties;
    let map = props.get_str("target_map")?;
    Some(TransitionRequest::new(
        map,
        Position::new(props.get_i32("target_x", 0), props.get_i32("target_y", 0)),
    ))
}
