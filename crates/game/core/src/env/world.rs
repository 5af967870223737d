//! World layout oracle: how maps connect to each other.

use crate::env::MapDimensions;
use crate::state::{Direction, Position};

/// Read-only view of the world layout authored alongside the maps.
///
/// The schema behind it belongs to the layout loader; the core only needs
/// these queries to resolve transitions.
pub trait WorldLayout: Send + Sync {
    /// Map adjacent to `map_id` in `direction`, if any.
    fn neighbor(&self, map_id: &str, direction: Direction) -> Option<String>;

    /// Portal-style exit tile declared on `map_id` for `direction`.
    fn exit_point(&self, map_id: &str, direction: Direction) -> Option<Position>;

    /// Spawn override used when entering `map_id` through its `side` edge.
    fn entry_spawn(&self, map_id: &str, side: Direction) -> Option<Position>;

    /// Size of `map_id`, used to clamp carried-over coordinates.
    fn dimensions(&self, map_id: &str) -> Option<MapDimensions>;
}
