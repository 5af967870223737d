//! Unified error type surfaced by the play session.
//!
//! In-play failures (a missing transition target, an item that cannot be
//! used) never reach this type; the session turns them into status messages.
//! What remains is setup and persistence.

use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Content(#[from] anyhow::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no save in slot '{slot}'")]
    SaveNotFound { slot: String },
}
