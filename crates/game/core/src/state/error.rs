//! State management errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Requests the state refused to apply. State is unchanged when returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("{item} is not in the inventory")]
    ItemNotInInventory { item: String },

    #[error("nothing is equipped in slot '{slot}'")]
    SlotEmpty { slot: String },

    #[error("{item} cannot be used")]
    ItemNotUsable { item: String },

    #[error("entity {id} does not exist on this map")]
    EntityNotFound { id: EntityId },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            ItemNotInInventory { .. } | SlotEmpty { .. } | ItemNotUsable { .. } => {
                ErrorSeverity::Validation
            }
            // Ids come from the arena itself, so a miss means a stale id.
            EntityNotFound { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            ItemNotInInventory { .. } => "STATE_ITEM_NOT_IN_INVENTORY",
            SlotEmpty { .. } => "STATE_SLOT_EMPTY",
            ItemNotUsable { .. } => "STATE_ITEM_NOT_USABLE",
            EntityNotFound { .. } => "STATE_ENTITY_NOT_FOUND",
        }
    }
}
