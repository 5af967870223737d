mod common;
mod entities;
mod player;
mod properties;
mod status;

pub use common::{Direction, EntityId, Position};
pub use entities::{EntitiesState, EntityInstance};
pub use player::{Equipment, Inventory, PlayerState, PlayerStats};
pub use properties::PropertyBag;
pub use status::{StatusEffect, StatusEffectKind, StatusEffects, StatusTick};
