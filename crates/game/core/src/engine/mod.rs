//! Turn orchestration.
//!
//! The [`TurnOrchestrator`] is the per-frame control loop of play mode. One
//! call to [`TurnOrchestrator::update`] resolves at most one player action and
//! every consequence of it: hazards, interactions, status ticks, entity AI
//! and quest re-evaluation. While a move is in progress the orchestrator is
//! in [`TurnPhase::Resolving`] and ignores new directional input.

mod hazard;
mod input;
mod interact;

pub use hazard::{apply_hazards, lingering_effect};
pub use input::{FrameInput, Handoff, TurnOutcome};
pub use interact::interact_at;

use crate::ai;
use crate::env::GameEnv;
use crate::quest::QuestTracker;
use crate::state::{Direction, GameState, Position};
use crate::transition::TransitionResolver;

/// A one-tile move being animated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveInProgress {
    pub from: Position,
    pub to: Position,
    pub elapsed: f32,
    pub duration: f32,
}

impl MoveInProgress {
    /// Completed fraction in `[0, 1]`, for interpolation.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TurnPhase {
    #[default]
    Idle,
    Resolving(MoveInProgress),
}

/// Message shown in the status bar until its timer runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub remaining: f32,
}

#[derive(Clone, Debug, Default)]
pub struct TurnOrchestrator {
    phase: TurnPhase,
    quests: QuestTracker,
    status: Option<StatusMessage>,
    hit_flash: f32,
}

impl TurnOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.phase, TurnPhase::Resolving(_))
    }

    pub fn status_message(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn is_hit_flashing(&self) -> bool {
        self.hit_flash > 0.0
    }

    pub fn quest_tracker_mut(&mut self) -> &mut QuestTracker {
        &mut self.quests
    }

    /// Clears the move and timers after a map switch. Quest tracking is kept.
    pub fn reset_play_state(&mut self) {
        self.phase = TurnPhase::Idle;
        self.status = None;
        self.hit_flash = 0.0;
    }

    /// Shows `text` in the status bar for the configured duration.
    pub fn flash_message(&mut self, text: impl Into<String>, env: &GameEnv<'_>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            remaining: env.config().status_message_duration,
        });
    }

    /// Re-evaluates quests and appends their events to `outcome`.
    pub fn check_quests(&mut self, state: &mut GameState, env: &GameEnv<'_>, outcome: &mut TurnOutcome) {
        let events = self.quests.check_for_updates(env.quests(), state);
        outcome.extend(events.iter().map(ToString::to_string));
    }

    /// Advances one frame.
    pub fn update(
        &mut self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        input: &FrameInput,
        dt: f32,
    ) -> TurnOutcome {
        self.tick_timers(dt);
        let mut outcome = TurnOutcome::default();

        match self.phase {
            TurnPhase::Resolving(mut motion) => {
                motion.elapsed += dt.max(0.0);
                if motion.elapsed >= motion.duration {
                    self.phase = TurnPhase::Idle;
                    self.complete_move(state, env, motion.to, &mut outcome);
                } else {
                    self.phase = TurnPhase::Resolving(motion);
                }
            }
            TurnPhase::Idle if state.player.is_alive() => {
                if input.pause {
                    outcome.handoff = Some(Handoff::Pause);
                } else if input.inventory {
                    outcome.handoff = Some(Handoff::Inventory);
                } else if input.quest_log {
                    outcome.handoff = Some(Handoff::QuestLog);
                } else if let Some(direction) = input.direction {
                    self.try_step(state, env, direction, &mut outcome);
                }
            }
            TurnPhase::Idle => {}
        }

        if let Some(text) = outcome.last_message() {
            let text = text.to_string();
            self.flash_message(text, env);
        }
        outcome
    }

    fn tick_timers(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.hit_flash = (self.hit_flash - dt).max(0.0);
        if let Some(status) = &mut self.status {
            status.remaining -= dt;
            if status.remaining <= 0.0 {
                self.status = None;
            }
        }
    }

    fn try_step(
        &mut self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        direction: Direction,
        outcome: &mut TurnOutcome,
    ) {
        let map = env.map();
        let from = state.player.position;
        let target = from.step(direction);
        state.player.facing = direction;

        if !map.contains(target) {
            let request = env.world().and_then(|world| {
                TransitionResolver::new(world).resolve_edge(&map.id, target, from, map.dimensions)
            });
            if let Some(request) = request {
                outcome.handoff = Some(Handoff::Transition(request));
            }
            return;
        }

        let occupant = state.entity_at(target);
        let blocked =
            map.is_solid(target) || occupant.is_some_and(|(_, entity)| entity.blocks_player());
        if !blocked {
            let duration = env.config().base_move_duration
                * map.movement_cost(target)
                * state.effective_movement_multiplier();
            self.phase = TurnPhase::Resolving(MoveInProgress {
                from,
                to: target,
                elapsed: 0.0,
                duration,
            });
            return;
        }

        let attackable = occupant
            .filter(|(_, entity)| state.is_attackable(entity))
            .map(|(id, _)| id);
        if let Some(id) = attackable {
            if let Some(result) = state.attack_entity(id, state.effective_attack()) {
                outcome.push(result.message.clone());
                outcome.attack = Some(result);
                self.hit_flash = env.config().hit_flash_duration;
            }
            self.run_entity_turns(state, env, outcome);
            if self.check_death(state, outcome) {
                return;
            }
            self.check_quests(state, env, outcome);
            return;
        }

        if interact_at(state, env, target, outcome) {
            if self.check_death(state, outcome) {
                return;
            }
            self.check_quests(state, env, outcome);
        }
    }

    /// Consequences of arriving on `to`, in order.
    fn complete_move(
        &mut self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        to: Position,
        outcome: &mut TurnOutcome,
    ) {
        let map = env.map();
        state.player.position = to;

        outcome.extend(apply_hazards(state, map, to));
        if self.check_death(state, outcome) {
            return;
        }

        interact_at(state, env, to, outcome);
        if self.check_death(state, outcome) {
            return;
        }
        let exit = env
            .world()
            .and_then(|world| TransitionResolver::new(world).resolve_exit_point(&map.id, to));
        if let (Some(request), None) = (exit, &outcome.handoff) {
            outcome.handoff = Some(Handoff::Transition(request));
        }

        outcome.extend(state.process_status_effects());
        if self.check_death(state, outcome) {
            return;
        }

        self.run_entity_turns(state, env, outcome);
        if self.check_death(state, outcome) {
            return;
        }

        self.check_quests(state, env, outcome);
    }

    fn run_entity_turns(&mut self, state: &mut GameState, env: &GameEnv<'_>, outcome: &mut TurnOutcome) {
        for id in state.entities.ids() {
            if !state.player.is_alive() {
                break;
            }
            if let Some(hit) = ai::take_turn(state, env.map(), id, env.config()) {
                outcome.push(hit.message);
            }
        }
    }

    /// Replaces any pending hand-off with game over once the player is dead.
    fn check_death(&mut self, state: &GameState, outcome: &mut TurnOutcome) -> bool {
        if state.player.is_alive() {
            return false;
        }
        self.phase = TurnPhase::Idle;
        outcome.push("You have been defeated.");
        outcome.handoff = Some(Handoff::GameOver);
        true
    }
}
