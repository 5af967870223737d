//! Quest evaluation.
//!
//! Quest progress is never stored: status is derived from flags and
//! variables on every call. The tracker only remembers which "started" and
//! "objective completed" events it has already reported, and only for the
//! current session. After a reload it starts empty, so those events can be
//! reported once more for quests that were already underway.

use std::collections::HashSet;
use std::fmt;

use crate::env::{ObjectiveKind, QuestDefinition, QuestObjective};
use crate::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum QuestStatus {
    NotStarted,
    Active,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestEvent {
    Started {
        quest_id: String,
        name: String,
    },
    ObjectiveCompleted {
        quest_id: String,
        index: usize,
        description: String,
    },
    Completed {
        quest_id: String,
        name: String,
    },
}

impl fmt::Display for QuestEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestEvent::Started { name, .. } => write!(f, "Quest started: {}", name),
            QuestEvent::ObjectiveCompleted { description, .. } => {
                write!(f, "Objective complete: {}", description)
            }
            QuestEvent::Completed { name, .. } => write!(f, "Quest complete: {}", name),
        }
    }
}

/// Whether one objective currently holds.
pub fn objective_met(objective: &QuestObjective, state: &GameState) -> bool {
    match objective.kind {
        ObjectiveKind::Flag => objective
            .flag
            .as_deref()
            .is_some_and(|flag| state.has_flag(flag)),
        ObjectiveKind::VariableGte => objective
            .variable
            .as_deref()
            .is_some_and(|name| state.variable_i32(name) >= objective.value),
        ObjectiveKind::VariableEq => objective
            .variable
            .as_deref()
            .is_some_and(|name| state.variable_i32(name) == objective.value),
        ObjectiveKind::Unknown => false,
    }
}

pub fn quest_status(quest: &QuestDefinition, state: &GameState) -> QuestStatus {
    if state.has_flag(&quest.completion_flag()) {
        QuestStatus::Completed
    } else if quest.start_flag().is_some_and(|flag| !state.has_flag(flag)) {
        QuestStatus::NotStarted
    } else {
        QuestStatus::Active
    }
}

/// Session-scoped record of reported quest events.
#[derive(Clone, Debug, Default)]
pub struct QuestTracker {
    started: HashSet<String>,
    objectives: HashSet<(String, usize)>,
}

impl QuestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything reported so far.
    pub fn reset(&mut self) {
        self.started.clear();
        self.objectives.clear();
    }

    /// Evaluates every quest and returns newly observed events in order.
    ///
    /// Completing a quest sets its completion flag and applies its rewards.
    pub fn check_for_updates(
        &mut self,
        quests: &[QuestDefinition],
        state: &mut GameState,
    ) -> Vec<QuestEvent> {
        let mut events = Vec::new();
        for quest in quests {
            if quest_status(quest, state) != QuestStatus::Active {
                continue;
            }

            if self.started.insert(quest.id.clone()) {
                events.push(QuestEvent::Started {
                    quest_id: quest.id.clone(),
                    name: quest.name.clone(),
                });
            }

            let mut all_met = true;
            for (index, objective) in quest.objectives.iter().enumerate() {
                if !objective_met(objective, state) {
                    all_met = false;
                    continue;
                }
                if self.objectives.insert((quest.id.clone(), index)) {
                    events.push(QuestEvent::ObjectiveCompleted {
                        quest_id: quest.id.clone(),
                        index,
                        description: objective.description.clone(),
                    });
                }
            }

            if all_met && !quest.objectives.is_empty() {
                state.set_flag(quest.completion_flag());
                for flag in &quest.rewards.set_flags {
                    state.set_flag(flag.clone());
                }
                for (name, value) in &quest.rewards.set_variables {
                    state.set_variable(name.clone(), value);
                }
                events.push(QuestEvent::Completed {
                    quest_id: quest.id.clone(),
                    name: quest.name.clone(),
                });
            }
        }
        events
    }
}
