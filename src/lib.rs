//! Blocktris (workspace facade crate).
//!
//! Re-exports the member crates under `blocktris::{core,input,term,types}` and
//! holds the driver configuration shared by the binary and the tests.

pub mod config;

pub use blocktris_core as core;
pub use blocktris_input as input;
pub use blocktris_term as term;
pub use blocktris_types as types;

pub use config::Config;
