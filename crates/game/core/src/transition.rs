//! Map-to-map transitions.
//!
//! Two triggers exist: walking off a map edge, and stepping onto a declared
//! exit tile. Both resolve against the [`WorldLayout`] and produce a
//! [`TransitionRequest`] for the map loader to consume.

use crate::env::{MapDimensions, WorldLayout};
use crate::state::{Direction, Position};

/// One-shot instruction to load `map_id` and place the player at `position`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionRequest {
    pub map_id: String,
    pub position: Position,
}

impl TransitionRequest {
    pub fn new(map_id: impl Into<String>, position: Position) -> Self {
        Self {
            map_id: map_id.into(),
            position,
        }
    }
}

/// Edge crossed by stepping onto `target`, if it lies outside `dimensions`.
pub fn crossed_edge(target: Position, dimensions: MapDimensions) -> Option<Direction> {
    if target.x < 0 {
        Some(Direction::West)
    } else if target.x >= dimensions.width as i32 {
        Some(Direction::East)
    } else if target.y < 0 {
        Some(Direction::North)
    } else if target.y >= dimensions.height as i32 {
        Some(Direction::South)
    } else {
        None
    }
}

#[derive(Clone, Copy)]
pub struct TransitionResolver<'a> {
    world: &'a dyn WorldLayout,
}

impl<'a> TransitionResolver<'a> {
    pub fn new(world: &'a dyn WorldLayout) -> Self {
        Self { world }
    }

    /// Resolves a step from `player` to the out-of-bounds `target`.
    pub fn resolve_edge(
        &self,
        map_id: &str,
        target: Position,
        player: Position,
        dimensions: MapDimensions,
    ) -> Option<TransitionRequest> {
        let direction = crossed_edge(target, dimensions)?;
        let neighbor = self.world.neighbor(map_id, direction)?;
        let position = self.spawn_on(&neighbor, direction, player, Some(dimensions));
        Some(TransitionRequest::new(neighbor, position))
    }

    /// Resolves stepping onto `at` when it is one of the map's exit tiles.
    pub fn resolve_exit_point(&self, map_id: &str, at: Position) -> Option<TransitionRequest> {
        Direction::ALL.into_iter().find_map(|direction| {
            if self.world.exit_point(map_id, direction)? != at {
                return None;
            }
            let neighbor = self.world.neighbor(map_id, direction)?;
            let position =
                self.spawn_on(&neighbor, direction, at, self.world.dimensions(map_id));
            Some(TransitionRequest::new(neighbor, position))
        })
    }

    /// Spawn cell on `neighbor` when arriving by travelling `direction`.
    ///
    /// An entry-spawn override for the approached side wins. Otherwise the
    /// player lands on the opposite edge, keeping the across-axis coordinate
    /// of `carried`, clamped to the neighbor's size. A neighbor of unknown
    /// size is assumed to match `fallback`.
    fn spawn_on(
        &self,
        neighbor: &str,
        direction: Direction,
        carried: Position,
        fallback: Option<MapDimensions>,
    ) -> Position {
        if let Some(spawn) = self.world.entry_spawn(neighbor, direction.opposite()) {
            return spawn;
        }
        let dimensions = self
            .world
            .dimensions(neighbor)
            .or(fallback)
            .unwrap_or(MapDimensions::new(1, 1));
        let last_x = (dimensions.width as i32 - 1).max(0);
        let last_y = (dimensions.height as i32 - 1).max(0);
        match direction {
            Direction::East => Position::new(0, carried.y.clamp(0, last_y)),
            Direction::West => Position::new(last_x, carried.y.clamp(0, last_y)),
            Direction::North => Position::new(carried.x.clamp(0, last_x), last_y),
            Direction::South => Position::new(carried.x.clamp(0, last_x), 0),
        }
    }
}
