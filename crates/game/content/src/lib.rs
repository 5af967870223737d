//! Authored content loaders for play mode.
//!
//! This crate turns the files an editor project writes into the read-only
//! data `playmode-core` consumes:
//! - Maps: layers, tile groups and entity placements (JSON)
//! - Quests: definitions with objectives and rewards (JSON)
//! - Dialogues: one graph per file in a directory (JSON)
//! - World layout: how maps connect at their edges and exits (RON)
//! - Game configuration: tunables (TOML)
//!
//! Parsing is defensive: unknown tags and missing optional fields fall back to
//! neutral defaults instead of failing the whole file.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, DialogueLibrary, LoadResult, MapLoader, QuestLoader,
    WorldGraph, WorldLoader,
};
