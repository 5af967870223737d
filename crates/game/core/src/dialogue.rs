//! Branching dialogue walker.
//!
//! The walker owns the conversation's session state: the current node, the
//! typewriter reveal progress and the highlighted choice. Side effects are
//! applied to [`GameState`] on entering a node and on picking a choice.

use std::collections::HashSet;

use crate::env::{DialogueChoice, DialogueData, DialogueNode};
use crate::state::GameState;

fn flag_unmet(flag: Option<&str>, state: &GameState) -> bool {
    match flag.map(str::trim) {
        Some(flag) if !flag.is_empty() => !state.has_flag(flag),
        _ => false,
    }
}

#[derive(Clone, Debug)]
pub struct DialogueWalker {
    data: DialogueData,
    current: Option<String>,
    /// Indices into the current node's choices whose condition holds.
    visible: Vec<usize>,
    selected: usize,
    revealed: f32,
}

impl DialogueWalker {
    /// Starts `data` at its entry node.
    pub fn start(data: DialogueData, state: &mut GameState) -> Self {
        let entry = data.start_node().map(str::to_string);
        let mut walker = Self {
            data,
            current: None,
            visible: Vec::new(),
            selected: 0,
            revealed: 0.0,
        };
        walker.advance(entry.as_deref(), state);
        walker
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Moves to `node_id`, transparently skipping nodes whose `requires_flag`
    /// is unset.
    ///
    /// The conversation ends on a missing id, an unknown node, or a skip
    /// chain that loops back on itself.
    pub fn advance(&mut self, node_id: Option<&str>, state: &mut GameState) {
        self.current = None;
        self.visible.clear();
        self.selected = 0;
        self.revealed = 0.0;

        let mut next = node_id.map(str::to_string);
        let mut visited = HashSet::new();
        while let Some(id) = next.take() {
            if !visited.insert(id.clone()) {
                return;
            }
            let Some(node) = self.data.node(&id) else {
                return;
            };
            if flag_unmet(node.requires_flag.as_deref(), state) {
                next = node.next_node_id.clone();
                continue;
            }

            if let Some(flag) = node.sets_flag.as_deref().map(str::trim) {
                if !flag.is_empty() {
                    state.set_flag(flag);
                }
            }
            if let Some(assignment) = node.sets_variable.as_deref() {
                state.apply_assignment(assignment);
            }
            self.visible = node
                .choices
                .iter()
                .enumerate()
                .filter(|(_, choice)| !flag_unmet(choice.requires_flag.as_deref(), state))
                .map(|(index, _)| index)
                .collect();
            self.current = Some(id);
            return;
        }
    }

    pub fn current_node(&self) -> Option<&DialogueNode> {
        self.current.as_deref().and_then(|id| self.data.node(id))
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    pub fn visible_choices(&self) -> impl Iterator<Item = &DialogueChoice> {
        let choices = self
            .current_node()
            .map(|node| node.choices.as_slice())
            .unwrap_or_default();
        self.visible.iter().filter_map(move |index| choices.get(*index))
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + 1) % self.visible.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + self.visible.len() - 1) % self.visible.len();
        }
    }

    /// Advances the typewriter by `dt` seconds.
    pub fn tick(&mut self, dt: f32, chars_per_second: f32) {
        let total = self.total_chars() as f32;
        self.revealed = (self.revealed + dt.max(0.0) * chars_per_second.max(0.0)).min(total);
    }

    fn total_chars(&self) -> usize {
        self.current_node()
            .map(|node| node.text.chars().count())
            .unwrap_or(0)
    }

    pub fn is_revealing(&self) -> bool {
        (self.revealed as usize) < self.total_chars()
    }

    /// Text revealed so far.
    pub fn visible_text(&self) -> &str {
        let Some(node) = self.current_node() else {
            return "";
        };
        let shown = self.revealed as usize;
        match node.text.char_indices().nth(shown) {
            Some((byte, _)) => &node.text[..byte],
            None => &node.text,
        }
    }

    /// Handles the confirm input.
    ///
    /// Completes the reveal if text is still appearing; otherwise picks the
    /// highlighted choice, or follows `next_node_id` when there are none.
    pub fn confirm(&mut self, state: &mut GameState) {
        if self.is_revealing() {
            self.revealed = self.total_chars() as f32;
            return;
        }
        let Some(node) = self.current_node() else {
            return;
        };

        let next = if self.visible.is_empty() {
            node.next_node_id.clone()
        } else {
            let choice = self
                .visible
                .get(self.selected)
                .and_then(|index| node.choices.get(*index));
            match choice {
                Some(choice) => {
                    if let Some(flag) = choice.sets_flag.as_deref().map(str::trim) {
                        if !flag.is_empty() {
                            state.set_flag(flag);
                        }
                    }
                    choice.next_node_id.clone()
                }
                None => None,
            }
        };
        self.advance(next.as_deref(), state);
    }

    /// Ends the conversation immediately.
    pub fn end(&mut self) {
        self.current = None;
        self.visible.clear();
    }
}
