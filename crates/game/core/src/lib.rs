//! Deterministic play-mode rules for tile maps.
//!
//! `playmode-core` holds the turn-based simulation behind the editor's play
//! mode: combat arithmetic, the shared [`GameState`] and its mutators, the
//! greedy pathfinder, entity AI, quest evaluation, the dialogue walker, map
//! transitions and the [`TurnOrchestrator`] that sequences them. Everything
//! here is synchronous and free of I/O; content loading, persistence and
//! logging belong to the runtime.
pub mod ai;
pub mod combat;
pub mod config;
pub mod dialogue;
pub mod engine;
pub mod env;
pub mod error;
pub mod pathfinding;
pub mod quest;
pub mod state;
pub mod transition;

pub use ai::{AiProfile, Behavior, EntityAttack};
pub use combat::{AttackResult, calculate_damage};
pub use config::GameConfig;
pub use dialogue::DialogueWalker;
pub use engine::{FrameInput, Handoff, MoveInProgress, TurnOrchestrator, TurnOutcome, TurnPhase};
pub use env::{
    DamageType, DialogueChoice, DialogueData, DialogueNode, DialogueOracle, EntityPlacement,
    EntityType, GameEnv, GroupDefinition, GroupFlags, MapData, MapDimensions, ObjectiveKind,
    QuestDefinition, QuestObjective, QuestRewards, TileLayer, WorldLayout,
};
pub use error::{ErrorSeverity, GameError};
pub use pathfinding::Pathfinder;
pub use quest::{QuestEvent, QuestStatus, QuestTracker, objective_met, quest_status};
pub use state::{
    CollectResult, Direction, EntitiesState, EntityId, EntityInstance, Equipment, GameState,
    Inventory, PlayerState, PlayerStats, Position, PropertyBag, StateError, StatusEffect,
    StatusEffectKind, StatusEffects,
};
pub use transition::{TransitionRequest, TransitionResolver};
