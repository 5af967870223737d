//! Map data loader.
//!
//! Maps are JSON documents written by the editor. The file format is flatter
//! than [`MapData`]: flags are separate booleans, tags are free strings and
//! cells are a row-major list of group names. Conversion is lenient. Unknown
//! entity types and damage tags degrade to neutral values, ragged layers are
//! padded or truncated, and movement costs below 1 are raised to 1.

use std::collections::BTreeMap;
use std::path::Path;

use playmode_core::env::lenient_string_map;
use playmode_core::{
    DamageType, EntityType, GroupDefinition, GroupFlags, MapData, MapDimensions, Position,
    PropertyBag,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MapFile {
    id: String,
    width: u32,
    height: u32,
    layers: Vec<LayerFile>,
    groups: Vec<GroupFile>,
    #[serde(alias = "placements")]
    entities: Vec<PlacementFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LayerFile {
    name: String,
    cells: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GroupFile {
    name: String,
    solid: bool,
    hazardous: bool,
    passable: bool,
    #[serde(alias = "isPlayer", alias = "isplayer", alias = "player")]
    is_player: bool,
    #[serde(alias = "movementCost", alias = "movementcost")]
    movement_cost: f32,
    #[serde(alias = "damageType", alias = "damagetype")]
    damage_type: String,
    #[serde(
        alias = "damagePerTick",
        alias = "damagepertick",
        deserialize_with = "playmode_core::env::lenient_i32"
    )]
    damage_per_tick: i32,
    #[serde(alias = "entityType", alias = "entitytype")]
    entity_type: Option<String>,
    #[serde(deserialize_with = "lenient_string_map")]
    properties: BTreeMap<String, String>,
}

impl Default for GroupFile {
    fn default() -> Self {
        Self {
            name: String::new(),
            solid: false,
            hazardous: false,
            passable: true,
            is_player: false,
            movement_cost: 1.0,
            damage_type: String::new(),
            damage_per_tick: 0,
            entity_type: None,
            properties: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlacementFile {
    id: String,
    group: String,
    #[serde(deserialize_with = "playmode_core::env::lenient_i32")]
    x: i32,
    #[serde(deserialize_with = "playmode_core::env::lenient_i32")]
    y: i32,
    #[serde(alias = "overrides", deserialize_with = "lenient_string_map")]
    properties: BTreeMap<String, String>,
}

impl GroupFile {
    fn into_definition(self) -> GroupDefinition {
        let mut flags = GroupFlags::empty();
        flags.set(GroupFlags::SOLID, self.solid);
        flags.set(GroupFlags::HAZARDOUS, self.hazardous);
        flags.set(GroupFlags::PASSABLE, self.passable);
        flags.set(GroupFlags::PLAYER, self.is_player);

        let movement_cost = if self.movement_cost.is_finite() {
            self.movement_cost.max(1.0)
        } else {
            1.0
        };
        let entity_type = self
            .entity_type
            .as_deref()
            .and_then(|tag| tag.trim().parse::<EntityType>().ok());

        let mut group = GroupDefinition::new(self.name)
            .with_flags(flags)
            .with_movement_cost(movement_cost)
            .with_properties(self.properties.into_iter().collect());
        group.damage_type = DamageType::parse(&self.damage_type);
        group.damage_per_tick = self.damage_per_tick.max(0);
        group.entity_type = entity_type;
        group
    }
}

/// Loader for editor map files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map from a JSON file. The file stem is used when the document
    /// carries no `id`.
    pub fn load(path: &Path) -> LoadResult<MapData> {
        let content = read_file(path)?;
        let fallback_id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(&content, &fallback_id)
            .map_err(|e| anyhow::anyhow!("Failed to load map {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, fallback_id: &str) -> LoadResult<MapData> {
        let file: MapFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map JSON: {}", e))?;
        let dimensions = MapDimensions::new(file.width, file.height);
        let Some(area) = dimensions.area() else {
            if file.width == 0 || file.height == 0 {
                anyhow::bail!("map has no area ({}x{})", file.width, file.height);
            }
            anyhow::bail!(
                "map is too large ({}x{}, at most {} cells)",
                file.width,
                file.height,
                MapDimensions::MAX_AREA
            );
        };

        let id = if file.id.trim().is_empty() {
            fallback_id.to_string()
        } else {
            file.id
        };
        let mut map = MapData::new(id, file.width, file.height);

        for group in file.groups {
            if !group.name.is_empty() {
                map.add_group(group.into_definition());
            }
        }

        for layer in file.layers {
            let index = map.add_layer(layer.name);
            for (cell, group) in layer.cells.into_iter().take(area).enumerate() {
                let Some(group) = group.filter(|name| !name.trim().is_empty()) else {
                    continue;
                };
                let position = Position::new(
                    (cell as u32 % file.width) as i32,
                    (cell as u32 / file.width) as i32,
                );
                map.set_cell(index, position, group);
            }
        }

        for placement in file.entities {
            if placement.group.is_empty() {
                continue;
            }
            let id = if placement.id.is_empty() {
                format!("{}@{},{}", placement.group, placement.x, placement.y)
            } else {
                placement.id
            };
            let overrides: PropertyBag = placement.properties.into_iter().collect();
            map.place(id, placement.group, Position::new(placement.x, placement.y), overrides);
        }

        Ok(map)
    }
}
