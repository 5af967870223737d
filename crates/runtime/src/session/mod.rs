//! The play session.
//!
//! [`PlaySession`] owns the [`GameState`] and routes each frame's input to
//! the active [`Screen`]. On the play screen the core orchestrator runs a turn
//! and may hand control elsewhere; the session services those hand-offs:
//! it walks dialogues, loads maps for transitions, and opens the menus and
//! the game-over screen.
mod content;
mod screen;

use std::mem;

use anyhow::Context;
use playmode_content::ContentFactory;
use playmode_core::{
    Direction, DialogueData, DialogueWalker, FrameInput, GameConfig, GameError, GameState,
    Handoff, MapData, Position, StateError, TransitionRequest, TurnOrchestrator, TurnOutcome,
};

use crate::error::{Result, RuntimeError};
use crate::repository::{InMemorySaveRepository, SaveRepository};
use crate::settings::Settings;

use content::{Content, MapCache};
pub use screen::{QuestLogEntry, Screen};

pub struct PlaySession {
    factory: ContentFactory,
    content: Content,
    maps: MapCache,
    map: MapData,
    state: GameState,
    orchestrator: TurnOrchestrator,
    screen: Screen,
    dialogue: Option<DialogueWalker>,
    settings: Settings,
    repository: Box<dyn SaveRepository>,
    start_map: String,
    start_spawn: Option<Position>,
    /// Messages produced outside `update`, delivered with the next frame.
    pending: Vec<String>,
}

impl PlaySession {
    /// Loads content and places the player on `start_map`.
    ///
    /// Without an explicit `spawn` the map's player placement is used, then
    /// the origin. Quests are evaluated once before the first frame.
    pub fn start(
        factory: ContentFactory,
        start_map: &str,
        spawn: Option<Position>,
    ) -> Result<Self> {
        let content = Content::load(&factory)?;
        let mut maps = MapCache::default();
        let map = maps
            .take(&factory, start_map)
            .context("failed to load the start map")?;

        let position = spawn
            .or_else(|| map.player_spawn())
            .unwrap_or(Position::ORIGIN);
        let mut state = GameState::new(&content.config, position);
        state.switch_map(&map, position);

        let mut session = Self {
            factory,
            content,
            maps,
            map,
            state,
            orchestrator: TurnOrchestrator::new(),
            screen: Screen::Play,
            dialogue: None,
            settings: Settings::default(),
            repository: Box::new(InMemorySaveRepository::new()),
            start_map: start_map.to_string(),
            start_spawn: spawn,
            pending: Vec::new(),
        };
        session.evaluate_quests_into_pending();

        tracing::info!(
            "Play session started on '{}' at {} with {} entities",
            start_map,
            position,
            session.state.entities.len()
        );
        Ok(session)
    }

    pub fn with_repository(mut self, repository: impl SaveRepository + 'static) -> Self {
        self.repository = Box::new(repository);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn map(&self) -> &MapData {
        &self.map
    }

    pub fn config(&self) -> &GameConfig {
        &self.content.config
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn dialogue(&self) -> Option<&DialogueWalker> {
        self.dialogue.as_ref()
    }

    pub fn orchestrator(&self) -> &TurnOrchestrator {
        &self.orchestrator
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn status_message(&self) -> Option<&str> {
        self.orchestrator
            .status_message()
            .map(|status| status.text.as_str())
    }

    /// Quests that have started, in catalog order.
    pub fn quest_log(&self) -> Vec<QuestLogEntry> {
        self.content
            .quests
            .iter()
            .filter_map(|quest| QuestLogEntry::build(quest, &self.state))
            .collect()
    }

    /// Advances one frame on the active screen.
    ///
    /// The returned outcome carries every message produced this frame and
    /// the hand-off the session serviced, if any.
    pub fn update(&mut self, input: &FrameInput, dt: f32) -> TurnOutcome {
        let mut outcome = TurnOutcome::default();
        outcome.messages.append(&mut self.pending);

        match self.screen {
            Screen::Play => self.update_play(input, dt, &mut outcome),
            Screen::Dialogue => self.update_dialogue(input, dt, &mut outcome),
            Screen::Paused => {
                if input.pause || input.cancel {
                    self.screen = Screen::Play;
                }
            }
            Screen::Inventory => {
                if input.inventory || input.cancel {
                    self.screen = Screen::Play;
                }
            }
            Screen::QuestLog => {
                if input.quest_log || input.cancel {
                    self.screen = Screen::Play;
                }
            }
            Screen::GameOver => {
                if input.confirm {
                    self.restart(&mut outcome);
                }
            }
        }
        outcome
    }

    fn update_play(&mut self, input: &FrameInput, dt: f32, outcome: &mut TurnOutcome) {
        let turn = {
            let env = self.content.env(&self.map);
            self.orchestrator.update(&mut self.state, &env, input, dt)
        };
        for message in &turn.messages {
            tracing::debug!("{}", message);
        }
        outcome.messages.extend(turn.messages);
        outcome.attack = turn.attack;

        if let Some(handoff) = turn.handoff {
            outcome.handoff = Some(handoff.clone());
            self.service(handoff, outcome);
        }
    }

    fn service(&mut self, handoff: Handoff, outcome: &mut TurnOutcome) {
        match handoff {
            Handoff::Dialogue(data) => self.begin_dialogue(data, outcome),
            Handoff::Transition(request) => self.transition(request, outcome),
            Handoff::GameOver => {
                tracing::info!("Player defeated on '{}'", self.state.current_map());
                self.dialogue = None;
                self.screen = Screen::GameOver;
            }
            Handoff::Pause => self.screen = Screen::Paused,
            Handoff::Inventory => self.screen = Screen::Inventory,
            Handoff::QuestLog => self.screen = Screen::QuestLog,
        }
    }

    fn begin_dialogue(&mut self, data: DialogueData, outcome: &mut TurnOutcome) {
        let walker = DialogueWalker::start(data, &mut self.state);
        if walker.is_finished() {
            tracing::debug!("Dialogue '{}' has no reachable node", walker.name());
        } else {
            tracing::info!("Dialogue '{}' started", walker.name());
            self.dialogue = Some(walker);
            self.screen = Screen::Dialogue;
        }
        // The opening node may already have set flags.
        self.evaluate_quests(outcome);
    }

    fn update_dialogue(&mut self, input: &FrameInput, dt: f32, outcome: &mut TurnOutcome) {
        let speed = self.settings.text_speed(self.content.config.text_speed);
        let Some(walker) = self.dialogue.as_mut() else {
            self.screen = Screen::Play;
            return;
        };

        walker.tick(dt, speed);
        if input.cancel {
            walker.end();
        } else if input.confirm {
            walker.confirm(&mut self.state);
        } else if let Some(direction) = input.direction {
            match direction {
                Direction::North | Direction::West => walker.select_previous(),
                Direction::South | Direction::East => walker.select_next(),
            }
        }

        let finished = walker.is_finished();
        if finished {
            tracing::info!("Dialogue '{}' ended", walker.name());
            self.dialogue = None;
            self.screen = Screen::Play;
        }
        if finished || input.confirm {
            self.evaluate_quests(outcome);
        }
    }

    fn transition(&mut self, request: TransitionRequest, outcome: &mut TurnOutcome) {
        match self.maps.take(&self.factory, &request.map_id) {
            Ok(map) => {
                self.enter_map(map, request.position);
                tracing::info!("Switched to '{}' at {}", request.map_id, request.position);
                self.evaluate_quests(outcome);
            }
            Err(e) => {
                tracing::warn!("Transition to '{}' aborted: {:#}", request.map_id, e);
                let text = format!("Map '{}' not found", request.map_id);
                let env = self.content.env(&self.map);
                self.orchestrator.flash_message(text.clone(), &env);
                outcome.push(text);
            }
        }
    }

    /// Makes `map` current, rebuilding entities with the player at `position`.
    fn enter_map(&mut self, map: MapData, position: Position) {
        let previous = mem::replace(&mut self.map, map);
        if previous.id != self.map.id {
            self.maps.store(previous);
        }
        self.state.switch_map(&self.map, position);
        self.orchestrator.reset_play_state();
    }

    fn restart(&mut self, outcome: &mut TurnOutcome) {
        let map = if self.map.id == self.start_map {
            Ok(self.map.clone())
        } else {
            self.maps.take(&self.factory, &self.start_map)
        };
        let map = match map {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Restart failed: {:#}", e);
                outcome.push(format!("Map '{}' not found", self.start_map));
                return;
            }
        };

        let position = self
            .start_spawn
            .or_else(|| map.player_spawn())
            .unwrap_or(Position::ORIGIN);
        self.state = GameState::new(&self.content.config, position);
        self.orchestrator = TurnOrchestrator::new();
        self.enter_map(map, position);
        self.screen = Screen::Play;
        tracing::info!("Restarted on '{}'", self.start_map);
        self.evaluate_quests(outcome);
    }

    /// Re-evaluates quests, logging and flashing whatever they report.
    fn evaluate_quests(&mut self, outcome: &mut TurnOutcome) {
        let before = outcome.messages.len();
        let env = self.content.env(&self.map);
        self.orchestrator
            .check_quests(&mut self.state, &env, outcome);

        let reported = &outcome.messages[before..];
        for message in reported {
            tracing::info!("{}", message);
        }
        if let Some(last) = reported.last() {
            self.orchestrator.flash_message(last.clone(), &env);
        }
    }

    fn evaluate_quests_into_pending(&mut self) {
        let mut outcome = TurnOutcome::default();
        self.evaluate_quests(&mut outcome);
        self.pending.extend(outcome.messages);
    }

    // ===== inventory screen =====

    pub fn equip(&mut self, item: &str) -> Vec<String> {
        let result = self.state.equip(item).map(|previous| match previous {
            Some(previous) => format!("Equipped {} (unequipped {}).", item, previous),
            None => format!("Equipped {}.", item),
        });
        self.finish_item_action(result)
    }

    pub fn unequip(&mut self, slot: &str) -> Vec<String> {
        let result = self
            .state
            .unequip(slot)
            .map(|item| format!("Unequipped {}.", item));
        self.finish_item_action(result)
    }

    pub fn use_item(&mut self, item: &str) -> Vec<String> {
        let result = self.state.use_item(item);
        self.finish_item_action(result)
    }

    fn finish_item_action(&mut self, result: std::result::Result<String, StateError>) -> Vec<String> {
        let mut outcome = TurnOutcome::default();
        match result {
            Ok(message) => outcome.push(message),
            Err(e) => {
                let severity = e.severity();
                if severity.is_internal() {
                    tracing::warn!("Item action failed [{}]: {}", e.error_code(), e);
                } else {
                    tracing::debug!(
                        "Item action refused [{} {}]: {}",
                        severity.as_str(),
                        e.error_code(),
                        e
                    );
                }
                outcome.push(e.to_string());
            }
        }
        self.evaluate_quests(&mut outcome);
        outcome.messages
    }

    // ===== persistence =====

    pub fn save(&self, slot: &str) -> Result<()> {
        self.repository.save(slot, &self.state)?;
        tracing::info!("Saved '{}' on '{}'", slot, self.state.current_map());
        Ok(())
    }

    /// Restores `slot` and rebuilds the map it was saved on.
    ///
    /// Quest tracking restarts, so quests still active are reported as
    /// started again on the next frame.
    pub fn load(&mut self, slot: &str) -> Result<()> {
        let mut state = self
            .repository
            .load(slot)?
            .ok_or_else(|| RuntimeError::SaveNotFound {
                slot: slot.to_string(),
            })?;
        state.backfill_after_load(&self.content.config);

        let map_id = state.current_map().to_string();
        let map = if map_id == self.map.id {
            self.map.clone()
        } else {
            self.maps.take(&self.factory, &map_id)?
        };

        let position = state.player.position;
        self.state = state;
        self.enter_map(map, position);
        self.orchestrator.quest_tracker_mut().reset();
        self.dialogue = None;
        self.screen = Screen::Play;
        self.evaluate_quests_into_pending();

        tracing::info!("Loaded '{}' on '{}' at {}", slot, map_id, position);
        Ok(())
    }

    /// Removes `slot`; fails with [`RuntimeError::SaveNotFound`] if it is absent.
    pub fn delete_save(&self, slot: &str) -> Result<()> {
        if !self.repository.exists(slot) {
            return Err(RuntimeError::SaveNotFound {
                slot: slot.to_string(),
            });
        }
        self.repository.delete(slot)?;
        tracing::info!("Deleted save '{}'", slot);
        Ok(())
    }

    pub fn save_slots(&self) -> Result<Vec<String>> {
        Ok(self.repository.list_slots()?)
    }
}
