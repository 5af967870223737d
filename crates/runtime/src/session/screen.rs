use playmode_core::{GameState, QuestDefinition, QuestStatus, objective_met, quest_status};

/// Which collaborator currently receives input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Screen {
    #[default]
    Play,
    Dialogue,
    Paused,
    Inventory,
    QuestLog,
    GameOver,
}

/// One row of the quest log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestLogEntry {
    pub id: String,
    pub name: String,
    pub status: QuestStatus,
    /// Objective description and whether it currently holds.
    pub objectives: Vec<(String, bool)>,
}

impl QuestLogEntry {
    /// `None` for quests that have not started.
    pub fn build(quest: &QuestDefinition, state: &GameState) -> Option<Self> {
        let status = quest_status(quest, state);
        if status == QuestStatus::NotStarted {
            return None;
        }
        let objectives = quest
            .objectives
            .iter()
            .map(|objective| {
                let met = status == QuestStatus::Completed || objective_met(objective, state);
                (objective.description.clone(), met)
            })
            .collect();
        Some(Self {
            id: quest.id.clone(),
            name: quest.name.clone(),
            status,
            objectives,
        })
    }
}
