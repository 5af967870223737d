//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use playmode_core::GameState;

use crate::repository::{RepositoryError, Result, SaveRepository, validate_slot};

/// Stores each slot as `{slot}.sav` in bincode format.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-save leaves the previous save intact.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{}.sav", slot))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("sav.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved slot '{}' to {}", slot, path.display());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let state: GameState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded slot '{}' from {}", slot, path.display());
        Ok(Some(state))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted slot '{}'", slot);
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)? {
            let path = entry.map_err(RepositoryError::Io)?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(".sav")
            {
                slots.push(slot.to_string());
            }
        }
        slots.sort_unstable();
        Ok(slots)
    }
}
