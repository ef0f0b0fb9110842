//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. Single-player
//! games use one keymap; two-player games split the keyboard so every gameplay
//! key belongs to exactly one player.

pub mod map;

pub use blocktris_types as types;

pub use map::{handle_key_event, route_key_event, should_quit};
