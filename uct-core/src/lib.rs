//! Core traits and types for the UCT search engine
//!
//! This crate provides the fundamental abstraction the search engine depends on:
//! - `GameState`: the world model contract any searchable domain must implement
//! - `game_utils`: shared reward helpers for two-player game implementations

pub mod game;
pub mod game_utils;

// Re-export main types for convenience
pub use game::{AgentId, GameState};
