//! Combat resolution.
//!
//! Pure arithmetic shared by bump attacks and entity melee. Nothing here
//! mutates state; [`GameState::attack_entity`](crate::state::GameState::attack_entity)
//! and the orchestrator apply the results.

pub mod damage;
pub mod result;

pub use damage::calculate_damage;
pub use result::AttackResult;
