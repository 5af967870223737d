//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use playmode_core::{GameConfig, MapData, QuestDefinition};

use crate::loaders::{
    ConfigLoader, DialogueLibrary, LoadResult, MapLoader, QuestLoader, WorldGraph, WorldLoader,
};

/// Content factory that loads all game content from a project directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── world.ron        (optional)
/// ├── quests.json      (optional)
/// ├── dialogues/
/// │   └── elder.json
/// └── maps/
///     ├── town.json
///     └── forest.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a map from `maps/{map_id}.json`.
    pub fn load_map(&self, map_id: &str) -> LoadResult<MapData> {
        MapLoader::load(&self.map_path(map_id))
    }

    pub fn has_map(&self, map_id: &str) -> bool {
        self.map_path(map_id).is_file()
    }

    /// Load quest definitions from `quests.json`; no file means no quests.
    pub fn load_quests(&self) -> LoadResult<Vec<QuestDefinition>> {
        let path = self.data_dir.join("quests.json");
        if !path.exists() {
            return Ok(Vec::new());
        }
        QuestLoader::load(&path)
    }

    /// Load every dialogue under `dialogues/`.
    pub fn load_dialogues(&self) -> LoadResult<DialogueLibrary> {
        DialogueLibrary::load_dir(&self.data_dir.join("dialogues"))
    }

    /// Load `world.ron`, filling unknown map sizes from the map files.
    ///
    /// Maps that fail to load keep an unknown size; the failure surfaces
    /// later when the transition actually targets them.
    pub fn load_world(&self) -> LoadResult<WorldGraph> {
        let path = self.data_dir.join("world.ron");
        if !path.exists() {
            return Ok(WorldGraph::new());
        }
        let mut world = WorldLoader::load(&path)?;

        let ids: Vec<String> = world.map_ids().map(str::to_string).collect();
        for id in ids {
            if let Ok(map) = self.load_map(&id) {
                world.set_dimensions(&id, map.dimensions);
            }
        }
        Ok(world)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn map_path(&self, map_id: &str) -> PathBuf {
        self.data_dir.join("maps").join(format!("{}.json", map_id))
    }
}

#[cfg(test)]
mod tests {
    use playmode_core::{Direction, MapDimensions, WorldLayout};

    use super::*;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn optional_files_fall_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert!(factory.load_quests().unwrap().is_empty());
        assert!(factory.load_dialogues().unwrap().is_empty());
        assert!(factory.load_world().unwrap().maps.is_empty());
        assert!(factory.load_map("town").is_err());
        assert!(!factory.has_map("town"));
    }

    #[test]
    fn world_sizes_are_backfilled_from_maps() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("maps")).unwrap();
        std::fs::write(
            dir.path().join("maps").join("forest.json"),
            r#"{"width": 12, "height": 9}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("world.ron"),
            r#"(maps: { "town": (neighbors: { East: "forest" }), "forest": () })"#,
        )
        .unwrap();

        let world = ContentFactory::new(dir.path()).load_world().unwrap();
        assert_eq!(world.dimensions("forest"), Some(MapDimensions::new(12, 9)));
        assert_eq!(world.dimensions("town"), None);
        assert_eq!(
            world.neighbor("town", Direction::East).as_deref(),
            Some("forest")
        );
    }
}
