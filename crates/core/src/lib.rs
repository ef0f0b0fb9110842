//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on UI, input devices, clocks or I/O:
//!
//! - **Deterministic**: Same seed and same calls produce the same game
//! - **Driver-agnostic**: Gravity advances only when the caller passes time in
//! - **Allocation-free hot path**: Boards, shapes and snapshots live on the stack
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision detection, merging and line sweeps
//! - [`game_state`]: Active/next pieces, gravity timing, actions and lifecycle
//! - [`pieces`]: Shape matrices and the clockwise rotation with kick ladder
//! - [`rng`]: Uniform random piece generation
//! - [`scoring`]: Line-clear points, level and gravity progression
//! - [`session`]: Several independent games routed by player id
//! - [`snapshot`]: Copyable observation of a game for presentation layers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: Every kind is equally likely on every draw
//! - **Simple kicks**: A rotation tries horizontal offsets 0, -1, +1, -2, +2
//! - **No lock delay**: A piece locks as soon as it cannot descend
//! - **Scoring**: 100/300/500/800 for 1-4 rows; level every 10 lines
//! - **Game over**: The next piece collides at its spawn position
//!
//! # Example
//!
//! ```
//! use blocktris_core::GameState;
//! use blocktris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! assert!(!game.running());
//!
//! game.reset();
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.running());
//! assert_eq!(game.board().occupied_count(), 4);
//! ```
//!
//! # Timing
//!
//! Gravity uses an accumulator: once more than the drop interval has passed,
//! the piece descends one row and the accumulator restarts at zero. Call
//! [`GameState::update`](game_state::GameState::update) with a timestamp every
//! frame, or [`GameState::tick`](game_state::GameState::tick) with elapsed time.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blocktris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use game_state::{GameState, LockEvent, Piece};
pub use pieces::{base_shape, try_rotate, RotationOutcome, Shape};
pub use rng::PieceGenerator;
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_score};
pub use session::Session;
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
