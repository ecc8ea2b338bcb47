//! Agar-style arena simulation core.
//!
//! Cells eat food and each other, split, merge and shoot inside a bounded
//! world. The host drives [`GameState::tick`] with a frame delta and reads
//! snapshots back.

pub mod ai;
pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod gamemodes;
pub mod spatial;
pub mod world;

/// Random source for every simulation decision.
pub type SimRng = rand_pcg::Pcg32;

// Re-export commonly used types
pub use config::Config;
pub use error::ConfigError;
pub use game::{GameState, MatchState, PlayerCommands, TickReport};
pub use gamemodes::ModeKind;
