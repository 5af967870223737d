//! Quest definitions.
//!
//! Quests are immutable content. Their lifecycle (not started, active,
//! completed) is never stored: it is derived from flags on every evaluation.
//! Field names are accepted both in `snake_case` and in the concatenated
//! forms editors tend to emit (`startFlag`, `startflag`).

use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    #[cfg_attr(
        feature = "serde",
        serde(alias = "startFlag", alias = "startflag", alias = "StartFlag")
    )]
    pub start_flag: Option<String>,
    pub objectives: Vec<QuestObjective>,
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "completionFlag",
            alias = "completionflag",
            alias = "CompletionFlag"
        )
    )]
    pub completion_flag: Option<String>,
    pub rewards: QuestRewards,
}

impl QuestDefinition {
    /// Flag marking completion; falls back to `quest_complete:<id>`.
    pub fn completion_flag(&self) -> String {
        match self.completion_flag.as_deref().map(str::trim) {
            Some(flag) if !flag.is_empty() => flag.to_string(),
            _ => format!("quest_complete:{}", self.id),
        }
    }

    pub fn start_flag(&self) -> Option<&str> {
        self.start_flag
            .as_deref()
            .map(str::trim)
            .filter(|flag| !flag.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestObjective {
    pub description: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ObjectiveKind,
    pub flag: Option<String>,
    pub variable: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::env::lenient::lenient_i32")
    )]
    pub value: i32,
}

impl QuestObjective {
    pub fn flag(description: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            kind: ObjectiveKind::Flag,
            flag: Some(flag.into()),
            variable: None,
            value: 0,
        }
    }

    pub fn variable(
        description: impl Into<String>,
        kind: ObjectiveKind,
        variable: impl Into<String>,
        value: i32,
    ) -> Self {
        Self {
            description: description.into(),
            kind,
            flag: None,
            variable: Some(variable.into()),
            value,
        }
    }
}

/// Objective condition kinds; unknown kinds never complete.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ObjectiveKind {
    Flag,
    #[cfg_attr(feature = "serde", serde(alias = "variablegte", alias = "variableGte"))]
    VariableGte,
    #[cfg_attr(feature = "serde", serde(alias = "variableeq", alias = "variableEq"))]
    VariableEq,
    #[default]
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestRewards {
    #[cfg_attr(
        feature = "serde",
        serde(alias = "setFlags", alias = "setflags", alias = "SetFlags")
    )]
    pub set_flags: Vec<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "setVariables",
            alias = "setvariables",
            alias = "SetVariables",
            deserialize_with = "crate::env::lenient::lenient_string_map"
        )
    )]
    pub set_variables: BTreeMap<String, String>,
}
