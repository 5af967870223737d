//! Read-only content the rules consume.
//!
//! Maps, quests and dialogues are loaded once and never mutated during play.
//! The [`GameEnv`] aggregate bundles the pieces a turn needs so the
//! orchestrator can reach them without coupling to concrete loaders.
mod dialogue;
#[cfg(feature = "serde")]
mod lenient;
mod map;
mod quest;
mod world;

pub use dialogue::{DialogueChoice, DialogueData, DialogueNode, DialogueOracle};
#[cfg(feature = "serde")]
pub use lenient::{lenient_i32, lenient_string_map};
pub use map::{
    DamageType, EntityPlacement, EntityType, GroupDefinition, GroupFlags, MapData, MapDimensions,
    TileLayer,
};
pub use quest::{ObjectiveKind, QuestDefinition, QuestObjective, QuestRewards};
pub use world::WorldLayout;

use crate::config::GameConfig;

/// Aggregates the read-only content required by one turn.
///
/// The current map and config are mandatory; the world layout and dialogue
/// library are optional, and lookups against a missing one simply find
/// nothing.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    map: &'a MapData,
    world: Option<&'a dyn WorldLayout>,
    dialogues: Option<&'a dyn DialogueOracle>,
    quests: &'a [QuestDefinition],
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(map: &'a MapData, config: &'a GameConfig) -> Self {
        Self {
            map,
            world: None,
            dialogues: None,
            quests: &[],
            config,
        }
    }

    pub fn with_world(mut self, world: &'a dyn WorldLayout) -> Self {
        self.world = Some(world);
        self
    }

    pub fn with_dialogues(mut self, dialogues: &'a dyn DialogueOracle) -> Self {
        self.dialogues = Some(dialogues);
        self
    }

    pub fn with_quests(mut self, quests: &'a [QuestDefinition]) -> Self {
        self.quests = quests;
        self
    }

    pub fn map(&self) -> &'a MapData {
        self.map
    }

    pub fn world(&self) -> Option<&'a dyn WorldLayout> {
        self.world
    }

    pub fn quests(&self) -> &'a [QuestDefinition] {
        self.quests
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Resolves a dialogue reference.
    ///
    /// A key the library does not know is treated as inline text spoken by
    /// `speaker`; only a blank reference yields `None`.
    pub fn resolve_dialogue(&self, reference: &str, speaker: &str) -> Option<DialogueData> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if let Some(data) = self.dialogues.and_then(|oracle| oracle.dialogue(reference)) {
            return Some(data);
        }
        let data = DialogueData::inline(
            reference,
            speaker,
            reference,
            &self.config.inline_dialogue_delimiter,
        );
        (!data.nodes.is_empty()).then_some(data)
    }
}
