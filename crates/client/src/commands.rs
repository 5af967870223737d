//! Line commands understood by the play-test client.
//!
//! A line is either a `:`-prefixed command (`:save slot1`, `:use Potion`) or
//! a run of bound keys separated by spaces (`d d e`), each pressed once.

use playmode_runtime::{InputAction, Settings};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Keys(Vec<InputAction>),
    Wait(u32),
    Save(String),
    Load(String),
    Delete(String),
    Equip(String),
    Unequip(String),
    Use(String),
    Slots,
    Quests,
    Status,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str, settings: &Settings) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let Some(rest) = line.strip_prefix(':') else {
            return Some(Self::parse_keys(line, settings));
        };
        let (verb, argument) = match rest.split_once(char::is_whitespace) {
            Some((verb, argument)) => (verb, argument.trim()),
            None => (rest, ""),
        };
        let argument = argument.to_string();

        let command = match (verb.to_ascii_lowercase().as_str(), argument.is_empty()) {
            ("save", false) => Self::Save(argument),
            ("save", true) => Self::Save("quicksave".to_string()),
            ("load", false) => Self::Load(argument),
            ("load", true) => Self::Load("quicksave".to_string()),
            ("delete", false) => Self::Delete(argument),
            ("equip", false) => Self::Equip(argument),
            ("unequip", false) => Self::Unequip(argument),
            ("use", false) => Self::Use(argument),
            ("wait", _) => Self::Wait(argument.parse().unwrap_or(1)),
            ("slots", _) => Self::Slots,
            ("quests", _) => Self::Quests,
            ("status", _) => Self::Status,
            ("help", _) => Self::Help,
            ("quit" | "q", _) => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }

    fn parse_keys(line: &str, settings: &Settings) -> Self {
        let mut actions = Vec::new();
        for key in line.split_whitespace() {
            match settings.action_for(key) {
                Some(action) => actions.push(action),
                None => return Self::Unknown(key.to_string()),
            }
        }
        Self::Keys(actions)
    }
}

pub const HELP: &str = "\
keys:     w a s d move / select, e confirm, q cancel, p pause, i inventory, j quest log
commands: :save [slot]  :load [slot]  :delete <slot>  :slots
          :equip <item>  :unequip <slot>  :use <item>
          :wait [frames]  :quests  :status  :help  :quit";
