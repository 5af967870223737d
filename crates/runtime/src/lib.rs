//! Play-session runtime for the editor's play mode.
//!
//! This crate wires authored content from `playmode-content` into the pure
//! rules of `playmode-core` and owns everything with side effects: the
//! session loop, save slots, settings and logging.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts [`PlaySession`] and its screens
//! - [`repository`] persists save slots
//! - [`settings`] and [`config`] hold player preferences and process config
pub mod config;
pub mod error;
pub mod repository;
pub mod session;
pub mod settings;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use session::{PlaySession, QuestLogEntry, Screen};
pub use settings::{InputAction, Settings};
