//! World layout loader.
//!
//! ```ron
//! (
//!     maps: {
//!         "town": (
//!             size: (20, 15),
//!             neighbors: { East: "forest" },
//!             exits: { North: (x: 5, y: 0) },
//!             entries: { East: (x: 18, y: 7) },
//!         ),
//!     },
//! )
//! ```
//!
//! `exits` are portal tiles on the map itself; `entries` override where the
//! player appears when arriving through that side. A `size` of `(0, 0)` means
//! unknown and is back-filled from the map file by the factory.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use playmode_core::{Direction, MapDimensions, Position, WorldLayout};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldNode {
    pub size: (u32, u32),
    pub neighbors: BTreeMap<Direction, String>,
    pub exits: BTreeMap<Direction, Position>,
    pub entries: BTreeMap<Direction, Position>,
}

/// Map adjacency graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGraph {
    pub maps: HashMap<String, WorldNode>,
}

impl WorldGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links `from` to `to` in `direction` and adds the reverse edge.
    pub fn connect(&mut self, from: &str, direction: Direction, to: &str) {
        self.node_mut(from).neighbors.insert(direction, to.to_string());
        self.node_mut(to)
            .neighbors
            .insert(direction.opposite(), from.to_string());
    }

    pub fn set_exit(&mut self, map_id: &str, direction: Direction, at: Position) {
        self.node_mut(map_id).exits.insert(direction, at);
    }

    pub fn set_entry(&mut self, map_id: &str, side: Direction, at: Position) {
        self.node_mut(map_id).entries.insert(side, at);
    }

    /// Records the size of `map_id` unless the layout already declares one.
    pub fn set_dimensions(&mut self, map_id: &str, dimensions: MapDimensions) {
        let node = self.node_mut(map_id);
        if node.size.0 == 0 || node.size.1 == 0 {
            node.size = (dimensions.width, dimensions.height);
        }
    }

    pub fn map_ids(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    fn node_mut(&mut self, map_id: &str) -> &mut WorldNode {
        self.maps.entry(map_id.to_string()).or_default()
    }
}

impl WorldLayout for WorldGraph {
    fn neighbor(&self, map_id: &str, direction: Direction) -> Option<String> {
        self.maps
            .get(map_id)?
            .neighbors
            .get(&direction)
            .filter(|id| !id.trim().is_empty())
            .cloned()
    }

    fn exit_point(&self, map_id: &str, direction: Direction) -> Option<Position> {
        self.maps.get(map_id)?.exits.get(&direction).copied()
    }

    fn entry_spawn(&self, map_id: &str, side: Direction) -> Option<Position> {
        self.maps.get(map_id)?.entries.get(&side).copied()
    }

    fn dimensions(&self, map_id: &str) -> Option<MapDimensions> {
        let (width, height) = self.maps.get(map_id)?.size;
        (width > 0 && height > 0).then(|| MapDimensions::new(width, height))
    }
}

/// Loader for the world layout from RON files.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<WorldGraph> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<WorldGraph> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))
    }
}
