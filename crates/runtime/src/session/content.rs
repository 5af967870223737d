//! Authored content held for the lifetime of a session.

use std::collections::HashMap;

use anyhow::Context;
use playmode_content::{ContentFactory, DialogueLibrary, LoadResult, WorldGraph};
use playmode_core::{GameConfig, GameEnv, MapData, QuestDefinition};

/// Everything except maps, which are loaded on demand.
pub(crate) struct Content {
    pub config: GameConfig,
    pub world: WorldGraph,
    pub dialogues: DialogueLibrary,
    pub quests: Vec<QuestDefinition>,
}

impl Content {
    pub fn load(factory: &ContentFactory) -> LoadResult<Self> {
        let content = Self {
            config: factory.load_config()?,
            world: factory.load_world()?,
            dialogues: factory.load_dialogues()?,
            quests: factory.load_quests()?,
        };
        tracing::info!(
            "Loaded content from {}: {} quests, {} dialogues, {} world maps",
            factory.data_dir().display(),
            content.quests.len(),
            content.dialogues.len(),
            content.world.maps.len()
        );
        Ok(content)
    }

    pub fn env<'a>(&'a self, map: &'a MapData) -> GameEnv<'a> {
        GameEnv::new(map, &self.config)
            .with_world(&self.world)
            .with_dialogues(&self.dialogues)
            .with_quests(&self.quests)
    }
}

/// Maps loaded so far, minus the one currently in play.
#[derive(Default)]
pub(crate) struct MapCache {
    maps: HashMap<String, MapData>,
}

impl MapCache {
    /// Removes `map_id` from the cache, loading it on a miss.
    ///
    /// The returned map's id is the requested one, so saves and world
    /// lookups always use file names.
    pub fn take(&mut self, factory: &ContentFactory, map_id: &str) -> LoadResult<MapData> {
        if let Some(map) = self.maps.remove(map_id) {
            return Ok(map);
        }
        let mut map = factory
            .load_map(map_id)
            .with_context(|| format!("map '{}'", map_id))?;
        map.id = map_id.to_string();
        tracing::debug!("Loaded map '{}' ({}x{})", map_id, map.width(), map.height());
        Ok(map)
    }

    pub fn store(&mut self, map: MapData) {
        self.maps.insert(map.id.clone(), map);
    }
}
