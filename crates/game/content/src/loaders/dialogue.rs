//! Dialogue library loaded from a directory of JSON files.

use std::collections::HashMap;
use std::path::Path;

use playmode_core::{DialogueData, DialogueOracle};

use crate::loaders::{LoadResult, read_file};

/// Dialogues keyed by file stem.
///
/// References are matched loosely: `elder`, `elder.json` and
/// `dialogues/elder.json` all name the same entry.
#[derive(Clone, Debug, Default)]
pub struct DialogueLibrary {
    dialogues: HashMap<String, DialogueData>,
}

impl DialogueLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.json` file in `dir`. A missing directory yields an
    /// empty library.
    pub fn load_dir(dir: &Path) -> LoadResult<Self> {
        let mut library = Self::new();
        if !dir.is_dir() {
            return Ok(library);
        }

        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let content = read_file(&path)?;
            let mut data: DialogueData = serde_json::from_str(&content).map_err(|e| {
                anyhow::anyhow!("Failed to parse dialogue {}: {}", path.display(), e)
            })?;
            if data.name.is_empty() {
                data.name = key.to_string();
            }
            library.insert(key, data);
        }
        Ok(library)
    }

    pub fn insert(&mut self, key: impl Into<String>, data: DialogueData) {
        self.dialogues.insert(key.into(), data);
    }

    pub fn len(&self) -> usize {
        self.dialogues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogues.is_empty()
    }

    fn normalize(reference: &str) -> &str {
        let reference = reference.trim();
        let reference = reference.strip_suffix(".json").unwrap_or(reference);
        reference
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(reference)
    }
}

impl DialogueOracle for DialogueLibrary {
    fn dialogue(&self, key: &str) -> Option<DialogueData> {
        self.dialogues
            .get(key.trim())
            .or_else(|| self.dialogues.get(Self::normalize(key)))
            .cloned()
    }
}
