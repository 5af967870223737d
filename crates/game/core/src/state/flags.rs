//! Flags and variables.
//!
//! Flags are monotonic within a session: nothing in the rules ever clears
//! one. Variables are strings parsed as integers on demand.

use super::GameState;

impl GameState {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Sets `flag`; returns true if it was not already set.
    pub fn set_flag(&mut self, flag: impl Into<String>) -> bool {
        self.flags.insert(flag.into())
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Integer value of `name`; 0 when missing or unparsable.
    pub fn variable_i32(&self, name: &str) -> i32 {
        self.variable(name)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl ToString) {
        self.variables.insert(name.into(), value.to_string());
    }

    /// Adds `amount` to the integer value of `name` and returns the result.
    pub fn increment_variable(&mut self, name: &str, amount: i32) -> i32 {
        let value = self.variable_i32(name).saturating_add(amount);
        self.set_variable(name, value);
        value
    }

    /// Applies a `key=value` assignment; malformed input is ignored.
    pub fn apply_assignment(&mut self, assignment: &str) -> bool {
        match assignment.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                self.set_variable(key.trim(), value.trim());
                true
            }
            _ => false,
        }
    }
}
