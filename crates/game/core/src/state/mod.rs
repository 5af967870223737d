//! Authoritative play state.
//!
//! [`GameState`] is the single mutable model shared by every rule in the
//! crate. Its mutators are split by concern across the submodules of this
//! directory; the struct itself only exposes read access to the parts whose
//! invariants it guards.
mod combat;
mod error;
mod flags;
mod items;
mod switch;
pub mod types;
mod vitals;

use std::collections::{BTreeMap, BTreeSet};

use crate::config::GameConfig;

pub use error::StateError;
pub use items::CollectResult;
pub use types::{
    Direction, EntitiesState, EntityId, EntityInstance, Equipment, Inventory, PlayerState,
    PlayerStats, Position, PropertyBag, StatusEffect, StatusEffectKind, StatusEffects, StatusTick,
};

/// Everything a play session mutates.
///
/// Save files persist the whole struct except the entity arena, which is
/// rebuilt from the current map on load (see [`GameState::switch_map`]).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub player: PlayerState,

    /// Live entities on the current map.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub entities: EntitiesState,

    flags: BTreeSet<String>,
    variables: BTreeMap<String, String>,

    /// Properties of every item ever collected, keyed by item name.
    ///
    /// Survives map switches so items stay usable after their source entity
    /// is gone.
    item_properties: BTreeMap<String, PropertyBag>,

    current_map: String,
}

impl GameState {
    /// Creates a fresh state with a default player at `position`.
    ///
    /// The map itself is not loaded; call [`GameState::switch_map`] next.
    pub fn new(config: &GameConfig, position: Position) -> Self {
        Self {
            player: PlayerState::new(position, config.player_stats()),
            entities: EntitiesState::empty(),
            flags: BTreeSet::new(),
            variables: BTreeMap::new(),
            item_properties: BTreeMap::new(),
            current_map: String::new(),
        }
    }

    pub fn current_map(&self) -> &str {
        &self.current_map
    }

    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Cached properties of a collected item.
    pub fn item_properties(&self, item: &str) -> Option<&PropertyBag> {
        self.item_properties.get(item)
    }

    /// Active entity standing on `position`, if any.
    pub fn entity_at(&self, position: Position) -> Option<(EntityId, &EntityInstance)> {
        self.entities.active_at(position)
    }
}
