//! Quest catalog loader.

use std::path::Path;

use playmode_core::QuestDefinition;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Either a bare list or `{ "quests": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestFile {
    List(Vec<QuestDefinition>),
    Wrapped { quests: Vec<QuestDefinition> },
}

/// Loader for quest definitions from JSON files.
pub struct QuestLoader;

impl QuestLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<QuestDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load quests {}: {}", path.display(), e))
    }

    /// Parses a quest catalog, dropping entries without an id.
    pub fn parse(content: &str) -> LoadResult<Vec<QuestDefinition>> {
        let file: QuestFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse quest JSON: {}", e))?;
        let quests = match file {
            QuestFile::List(quests) | QuestFile::Wrapped { quests } => quests,
        };
        Ok(quests
            .into_iter()
            .filter(|quest| !quest.id.trim().is_empty())
            .collect())
    }
}
