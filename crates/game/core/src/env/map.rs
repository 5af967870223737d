//! Static map data consumed by the play-mode core.
//!
//! A map is a rectangle of named layers whose cells reference tile groups by
//! name, plus the entity placements authored on it. Group definitions carry
//! every gameplay attribute (solidity, hazards, movement cost, entity type);
//! cells and placements only point at them.

use std::collections::HashMap;

use bitflags::bitflags;

use crate::state::{Position, PropertyBag};

bitflags! {
    /// Boolean attributes of a tile group.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GroupFlags: u8 {
        const SOLID = 0b0001;
        const HAZARDOUS = 0b0010;
        const PASSABLE = 0b0100;
        const PLAYER = 0b1000;
    }
}

/// Declared role of an entity group.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityType {
    Npc,
    Item,
    Trap,
    Trigger,
    Interactable,
}

/// Damage type tag of a hazardous group.
///
/// Unknown tags parse to [`DamageType::Instant`]: the hazard still deals its
/// instant damage but leaves no lingering effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DamageType {
    #[default]
    Instant,
    Fire,
    Poison,
    Ice,
}

impl DamageType {
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "fire" => DamageType::Fire,
            "poison" => DamageType::Poison,
            "ice" => DamageType::Ice,
            _ => DamageType::Instant,
        }
    }
}

/// Definition shared by every tile or entity of a group.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupDefinition {
    pub name: String,
    pub flags: GroupFlags,
    /// Movement cost multiplier, at least 1.0.
    pub movement_cost: f32,
    pub damage_type: DamageType,
    /// Instant damage dealt when a hazardous cell is entered.
    pub damage_per_tick: i32,
    pub entity_type: Option<EntityType>,
    pub properties: PropertyBag,
}

impl GroupDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: GroupFlags::PASSABLE,
            movement_cost: 1.0,
            damage_type: DamageType::Instant,
            damage_per_tick: 0,
            entity_type: None,
            properties: PropertyBag::new(),
        }
    }

    pub fn with_flags(mut self, flags: GroupFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_movement_cost(mut self, cost: f32) -> Self {
        self.movement_cost = cost;
        self
    }

    pub fn with_hazard(mut self, damage_type: DamageType, damage_per_tick: i32) -> Self {
        self.flags |= GroupFlags::HAZARDOUS;
        self.damage_type = damage_type;
        self.damage_per_tick = damage_per_tick;
        self
    }

    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    pub fn with_properties(mut self, properties: PropertyBag) -> Self {
        self.properties = properties;
        self
    }

    pub fn is_solid(&self) -> bool {
        self.flags.contains(GroupFlags::SOLID)
    }

    pub fn is_hazardous(&self) -> bool {
        self.flags.contains(GroupFlags::HAZARDOUS)
    }
}

/// One named layer; `cells` is row-major, `width * height` long.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayer {
    pub name: String,
    pub cells: Vec<Option<String>>,
}

/// An authored entity placement.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityPlacement {
    pub id: String,
    pub group: String,
    pub position: Position,
    pub overrides: PropertyBag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    /// Largest cell count a single layer may hold.
    pub const MAX_AREA: u32 = 1 << 20;

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Cells per layer, or `None` when the size is empty or above [`Self::MAX_AREA`].
    pub fn area(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)
            .filter(|&area| area > 0 && area <= Self::MAX_AREA)
            .map(|area| area as usize)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapData {
    pub id: String,
    pub dimensions: MapDimensions,
    pub layers: Vec<TileLayer>,
    pub placements: Vec<EntityPlacement>,
    pub groups: HashMap<String, GroupDefinition>,
}

impl MapData {
    /// Creates an empty map with no layers.
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            dimensions: MapDimensions::new(width, height),
            layers: Vec::new(),
            placements: Vec::new(),
            groups: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn group(&self, name: &str) -> Option<&GroupDefinition> {
        self.groups.get(name)
    }

    pub fn add_group(&mut self, group: GroupDefinition) {
        self.groups.insert(group.name.clone(), group);
    }

    /// Adds an empty layer and returns its index.
    ///
    /// Maps without a valid [`MapDimensions::area`] get a layer with no cells.
    pub fn add_layer(&mut self, name: impl Into<String>) -> usize {
        let len = self.dimensions.area().unwrap_or(0);
        self.layers.push(TileLayer {
            name: name.into(),
            cells: vec![None; len],
        });
        self.layers.len() - 1
    }

    /// Paints `group` into one cell; out-of-range writes are ignored.
    pub fn set_cell(&mut self, layer: usize, position: Position, group: impl Into<String>) {
        let Some(index) = self.cell_index(position) else {
            return;
        };
        if let Some(cell) = self
            .layers
            .get_mut(layer)
            .and_then(|layer| layer.cells.get_mut(index))
        {
            *cell = Some(group.into());
        }
    }

    pub fn place(
        &mut self,
        id: impl Into<String>,
        group: impl Into<String>,
        position: Position,
        overrides: PropertyBag,
    ) {
        self.placements.push(EntityPlacement {
            id: id.into(),
            group: group.into(),
            position,
            overrides,
        });
    }

    fn cell_index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    /// Groups referenced by `position` across all layers, bottom to top.
    pub fn groups_at(&self, position: Position) -> impl Iterator<Item = &GroupDefinition> {
        let index = self.cell_index(position);
        self.layers.iter().filter_map(move |layer| {
            let name = layer.cells.get(index?)?.as_deref()?;
            self.groups.get(name)
        })
    }

    /// True if any layer holds a solid group at `position`.
    pub fn is_solid(&self, position: Position) -> bool {
        self.groups_at(position).any(GroupDefinition::is_solid)
    }

    /// Highest movement cost across layers, never below 1.0.
    pub fn movement_cost(&self, position: Position) -> f32 {
        self.groups_at(position)
            .map(|group| group.movement_cost)
            .fold(1.0_f32, f32::max)
    }

    pub fn hazards_at(&self, position: Position) -> impl Iterator<Item = &GroupDefinition> {
        self.groups_at(position).filter(|group| group.is_hazardous())
    }

    pub fn entity_type_of(&self, group: &str) -> Option<EntityType> {
        self.group(group).and_then(|group| group.entity_type)
    }

    /// Whether `placement` marks the player start rather than an entity.
    pub fn is_player_placement(&self, placement: &EntityPlacement) -> bool {
        self.group(&placement.group)
            .is_some_and(|group| group.flags.contains(GroupFlags::PLAYER))
    }

    /// Authored player start, if the map has one.
    pub fn player_spawn(&self) -> Option<Position> {
        self.placements
            .iter()
            .find(|placement| self.is_player_placement(placement))
            .map(|placement| placement.position)
    }
}
