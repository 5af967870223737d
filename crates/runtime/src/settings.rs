//! Player settings: key bindings and text speed.
//!
//! Settings live in a small TOML file next to the saves:
//!
//! ```toml
//! text_speed = 60.0
//!
//! [key_bindings]
//! up = "k"
//! confirm = "space"
//! ```
//!
//! Actions missing from the file keep their default key.

use std::collections::BTreeMap;
use std::path::Path;

use playmode_core::{Direction, FrameInput};
use serde::{Deserialize, Serialize};

/// Bindable player actions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InputAction {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    Pause,
    Inventory,
    QuestLog,
}

impl InputAction {
    pub const ALL: [InputAction; 9] = [
        InputAction::Up,
        InputAction::Down,
        InputAction::Left,
        InputAction::Right,
        InputAction::Confirm,
        InputAction::Cancel,
        InputAction::Pause,
        InputAction::Inventory,
        InputAction::QuestLog,
    ];

    pub fn default_key(self) -> &'static str {
        match self {
            InputAction::Up => "w",
            InputAction::Down => "s",
            InputAction::Left => "a",
            InputAction::Right => "d",
            InputAction::Confirm => "e",
            InputAction::Cancel => "q",
            InputAction::Pause => "p",
            InputAction::Inventory => "i",
            InputAction::QuestLog => "j",
        }
    }

    /// The single-frame input this action produces.
    pub fn frame_input(self) -> FrameInput {
        let mut input = FrameInput::default();
        match self {
            InputAction::Up => input.direction = Some(Direction::North),
            InputAction::Down => input.direction = Some(Direction::South),
            InputAction::Left => input.direction = Some(Direction::West),
            InputAction::Right => input.direction = Some(Direction::East),
            InputAction::Confirm => input.confirm = true,
            InputAction::Cancel => input.cancel = true,
            InputAction::Pause => input.pause = true,
            InputAction::Inventory => input.inventory = true,
            InputAction::QuestLog => input.quest_log = true,
        }
        input
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Characters per second for dialogue text; `None` uses the game config.
    pub text_speed: Option<f32>,
    /// Action name (`quest_log`, `up`, ...) to key name.
    pub key_bindings: BTreeMap<String, String>,
}

impl Settings {
    /// Replaces these settings with the contents of `path`.
    ///
    /// A missing or unreadable file leaves the current values untouched and
    /// logs a warning. Returns whether the file was applied.
    pub fn reload(&mut self, path: &Path) -> bool {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Settings file {} not loaded: {}", path.display(), e);
                return false;
            }
        };
        match toml::from_str::<Settings>(&content) {
            Ok(settings) => {
                *self = settings;
                tracing::debug!("Loaded settings from {}", path.display());
                true
            }
            Err(e) => {
                tracing::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                false
            }
        }
    }

    pub fn key_for(&self, action: InputAction) -> &str {
        self.key_bindings
            .get(action.as_ref())
            .map(String::as_str)
            .unwrap_or_else(|| action.default_key())
    }

    /// Action bound to `key`, compared case-insensitively.
    pub fn action_for(&self, key: &str) -> Option<InputAction> {
        let key = key.trim();
        InputAction::ALL
            .into_iter()
            .find(|action| self.key_for(*action).eq_ignore_ascii_case(key))
    }

    pub fn text_speed(&self, fallback: f32) -> f32 {
        self.text_speed
            .filter(|speed| speed.is_finite() && *speed > 0.0)
            .unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_until_overridden() {
        let mut settings = Settings::default();
        assert_eq!(settings.action_for("W"), Some(InputAction::Up));
        assert_eq!(settings.text_speed(40.0), 40.0);

        settings
            .key_bindings
            .insert("quest_log".to_string(), "l".to_string());
        assert_eq!(settings.action_for("l"), Some(InputAction::QuestLog));
        assert_eq!(settings.action_for("j"), None);
    }

    #[test]
    fn corrupt_or_missing_file_keeps_current_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings {
            text_speed: Some(12.0),
            ..Settings::default()
        };

        assert!(!settings.reload(&dir.path().join("missing.toml")));
        let corrupt = dir.path().join("settings.toml");
        std::fs::write(&corrupt, "text_speed = [").unwrap();
        assert!(!settings.reload(&corrupt));
        assert_eq!(settings.text_speed, Some(12.0));

        std::fs::write(&corrupt, "text_speed = 80.0\n[key_bindings]\nconfirm = \"space\"\n")
            .unwrap();
        assert!(settings.reload(&corrupt));
        assert_eq!(settings.text_speed(40.0), 80.0);
        assert_eq!(settings.action_for("SPACE"), Some(InputAction::Confirm));
    }

    #[test]
    fn actions_map_to_frame_input() {
        assert_eq!(
            InputAction::Left.frame_input(),
            FrameInput::step(Direction::West)
        );
        assert!(InputAction::Pause.frame_input().pause);
    }
}
