//! Repository layer for dynamic runtime data.
//!
//! Repositories hold data that CHANGES during play (save slots). Authored
//! content (maps, quests, dialogues) comes from `playmode-content` loaders.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;

/// Slot names become file names, so they are limited to a safe alphabet.
pub(crate) fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_string()))
    }
}
