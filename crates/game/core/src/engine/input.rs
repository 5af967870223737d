//! Per-frame input and per-turn output of the orchestrator.

use crate::combat::AttackResult;
use crate::env::DialogueData;
use crate::state::Direction;
use crate::transition::TransitionRequest;

/// Player intent sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub direction: Option<Direction>,
    pub confirm: bool,
    pub cancel: bool,
    pub pause: bool,
    pub inventory: bool,
    pub quest_log: bool,
}

impl FrameInput {
    pub fn step(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Control handed to another collaborator until it finishes.
#[derive(Clone, Debug, PartialEq)]
pub enum Handoff {
    Dialogue(DialogueData),
    Transition(TransitionRequest),
    GameOver,
    Pause,
    Inventory,
    QuestLog,
}

/// Everything one `update` produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnOutcome {
    /// Human-readable messages, in the order their events happened.
    pub messages: Vec<String>,
    /// The player's bump attack, if one landed this turn.
    pub attack: Option<AttackResult>,
    pub handoff: Option<Handoff>,
}

impl TurnOutcome {
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn extend<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.messages.extend(messages.into_iter().map(Into::into));
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.attack.is_none() && self.handoff.is_none()
    }

    /// Last message produced, the one worth flashing in the status bar.
    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}
