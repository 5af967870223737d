//! Greedy stepping and line of sight over the current map.
//!
//! Entities never plan whole routes: each AI turn asks for one step that
//! closes the distance to a target, preferring the axis with the larger gap.
//! This is deliberately myopic; walls between an entity and the player stall
//! the chase.

use crate::env::MapData;
use crate::state::{EntitiesState, EntityId, GameState, Position};

/// Read-only view of the map plus its dynamic occupants.
#[derive(Clone, Copy)]
pub struct Pathfinder<'a> {
    map: &'a MapData,
    entities: &'a EntitiesState,
    player: Position,
}

impl<'a> Pathfinder<'a> {
    pub fn new(map: &'a MapData, state: &'a GameState) -> Self {
        Self {
            map,
            entities: &state.entities,
            player: state.player.position,
        }
    }

    /// Whether `mover` may enter `position`.
    ///
    /// Rejects out-of-bounds cells, solid tiles on any layer, the player's
    /// cell and cells held by another active entity.
    pub fn is_open(&self, position: Position, mover: EntityId) -> bool {
        self.map.contains(position)
            && !self.map.is_solid(position)
            && position != self.player
            && !self
                .entities
                .iter_active()
                .any(|(id, entity)| id != mover && entity.position == position)
    }

    /// One adjacent cell closer to `to`, or `None` when already there or
    /// both candidate axes are blocked.
    ///
    /// The axis with the larger absolute delta is tried first (ties go to
    /// the horizontal axis); the other axis is only tried when it has a
    /// non-zero delta.
    pub fn next_step(&self, mover: EntityId, from: Position, to: Position) -> Option<Position> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0 && dy == 0 {
            return None;
        }

        let horizontal = (dx != 0).then(|| Position::new(from.x + dx.signum(), from.y));
        let vertical = (dy != 0).then(|| Position::new(from.x, from.y + dy.signum()));
        let (primary, secondary) = if dx.abs() >= dy.abs() {
            (horizontal, vertical)
        } else {
            (vertical, horizontal)
        };

        [primary, secondary]
            .into_iter()
            .flatten()
            .find(|candidate| self.is_open(*candidate, mover))
    }

    /// Bresenham walk from `from` to `to`.
    ///
    /// Only intermediate cells are tested; a solid tile at either endpoint
    /// does not block sight.
    pub fn has_line_of_sight(&self, from: Position, to: Position) -> bool {
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let mut current = from;

        while current != to {
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                current.x += sx;
            }
            if doubled <= dx {
                err += dx;
                current.y += sy;
            }
            if current != to && self.map.is_solid(current) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{EntityType, GroupDefinition, GroupFlags};
    use crate::state::{EntityInstance, PropertyBag};

    const MOVER: EntityId = EntityId(0);

    fn open_map(solid: &[(i32, i32)]) -> MapData {
        let mut map = MapData::new("field", 12, 12);
        map.add_group(GroupDefinition::new("rock").with_flags(GroupFlags::SOLID));
        let layer = map.add_layer("ground");
        for &(x, y) in solid {
            map.set_cell(layer, Position::new(x, y), "rock");
        }
        map
    }

    fn state_with_mover(at: Position) -> GameState {
        let mut state = GameState::new(&GameConfig::default(), Position::new(11, 11));
        state.entities.spawn(
            EntityInstance::new("wolf", "wolf", at, PropertyBag::new())
                .with_type(Some(EntityType::Npc), false),
        );
        state
    }

    #[test]
    fn steps_along_the_primary_axis() {
        let map = open_map(&[]);
        let state = state_with_mover(Position::new(5, 5));
        let finder = Pathfinder::new(&map, &state);

        assert_eq!(
            finder.next_step(MOVER, Position::new(5, 5), Position::new(8, 5)),
            Some(Position::new(6, 5))
        );
        assert_eq!(
            finder.next_step(MOVER, Position::new(5, 5), Position::new(6, 9)),
            Some(Position::new(5, 6))
        );
        assert_eq!(finder.next_step(MOVER, Position::new(5, 5), Position::new(5, 5)), None);
    }

    #[test]
    fn blocked_primary_without_secondary_delta_stalls() {
        let map = open_map(&[(6, 5)]);
        let state = state_with_mover(Position::new(5, 5));
        let finder = Pathfinder::new(&map, &state);

        assert_eq!(finder.next_step(MOVER, Position::new(5, 5), Position::new(8, 5)), None);
        assert_eq!(
            finder.next_step(MOVER, Position::new(5, 5), Position::new(8, 7)),
            Some(Position::new(5, 6))
        );
    }

    #[test]
    fn ties_favor_horizontal_and_occupants_block() {
        let map = open_map(&[]);
        let mut state = state_with_mover(Position::new(5, 5));
        state.entities.spawn(EntityInstance::new(
            "crate",
            "crate",
            Position::new(6, 5),
            PropertyBag::new(),
        ));
        let finder = Pathfinder::new(&map, &state);

        assert_eq!(
            finder.next_step(MOVER, Position::new(5, 5), Position::new(7, 7)),
            Some(Position::new(5, 6))
        );
        assert!(!finder.is_open(Position::new(11, 11), MOVER));
        assert!(finder.is_open(Position::new(5, 5), MOVER));
    }

    #[test]
    fn line_of_sight_ignores_endpoints() {
        let map = open_map(&[(3, 1)]);
        let state = state_with_mover(Position::ORIGIN);
        let finder = Pathfinder::new(&map, &state);

        assert!(!finder.has_line_of_sight(Position::new(1, 1), Position::new(5, 1)));
        assert!(finder.has_line_of_sight(Position::new(1, 1), Position::new(3, 1)));
        assert!(finder.has_line_of_sight(Position::new(3, 1), Position::new(6, 1)));
        assert!(finder.has_line_of_sight(Position::new(1, 3), Position::new(5, 5)));
    }
}
