//! Content loaders for reading editor project files.
//!
//! Each loader converts one file format into core types. The
//! [`ContentFactory`] knows the project directory layout and ties them
//! together.

pub mod config;
pub mod dialogue;
pub mod factory;
pub mod map;
pub mod quest;
pub mod world;

pub use config::ConfigLoader;
pub use dialogue::DialogueLibrary;
pub use factory::ContentFactory;
pub use map::MapLoader;
pub use quest::QuestLoader;
pub use world::{WorldGraph, WorldLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
