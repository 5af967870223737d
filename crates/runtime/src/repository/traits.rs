//! Repository contract for saving and loading play state.

use playmode_core::GameState;

use crate::repository::Result;

/// Save slots for [`GameState`].
///
/// The entity list is not part of a save; it is rebuilt from the map on load.
pub trait SaveRepository: Send + Sync {
    fn save(&self, slot: &str, state: &GameState) -> Result<()>;

    /// Returns `None` when the slot has never been written.
    fn load(&self, slot: &str) -> Result<Option<GameState>>;

    fn exists(&self, slot: &str) -> bool;

    fn delete(&self, slot: &str) -> Result<()>;

    /// Slot names in ascending order.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
