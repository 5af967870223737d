//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use playmode_core::{EntitiesState, GameState};

use crate::repository::{RepositoryError, Result, SaveRepository, validate_slot};

#[derive(Default)]
pub struct InMemorySaveRepository {
    slots: RwLock<BTreeMap<String, GameState>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        // Mirror the file format: entities are never persisted.
        let mut saved = state.clone();
        saved.entities = EntitiesState::empty();
        slots.insert(slot.to_string(), saved);
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        validate_slot(slot)?;
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok()
            && self
                .slots
                .read()
                .map(|slots| slots.contains_key(slot))
                .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use playmode_core::{GameConfig, Position};

    use super::*;

    #[test]
    fn every_operation_checks_the_slot_name() {
        let repo = InMemorySaveRepository::new();
        let state = GameState::new(&GameConfig::default(), Position::ORIGIN);

        for slot in ["", "../escape", "a b"] {
            assert!(matches!(
                repo.save(slot, &state),
                Err(RepositoryError::InvalidSlot(_))
            ));
            assert!(matches!(repo.load(slot), Err(RepositoryError::InvalidSlot(_))));
            assert!(matches!(repo.delete(slot), Err(RepositoryError::InvalidSlot(_))));
            assert!(!repo.exists(slot));
        }
    }

    #[test]
    fn slots_round_trip_without_entities() {
        let repo = InMemorySaveRepository::new();
        let state = GameState::new(&GameConfig::default(), Position::new(2, 3));

        repo.save("slot-1", &state).unwrap();
        assert!(repo.exists("slot-1"));
        let loaded = repo.load("slot-1").unwrap().unwrap();
        assert_eq!(loaded.player.position, Position::new(2, 3));
        assert!(loaded.entities.is_empty());

        repo.delete("slot-1").unwrap();
        assert!(!repo.exists("slot-1"));
        assert_eq!(repo.load("slot-1").unwrap(), None);
    }
}
