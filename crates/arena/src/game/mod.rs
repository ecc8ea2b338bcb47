//! The tick-driven simulation.
//!
//! Per tick: player commands, AI intents, movement, grid rebuild, food,
//! absorption, merging, bullets, mode rules, then food and population upkeep.

mod bots;
mod bullets;
mod collisions;
mod commands;
mod lifecycle;
mod movement;
mod snapshot;
mod state;

pub use commands::{PlayerCommands, TickReport};
pub use snapshot::{BulletView, CellView, FoodView, LeaderboardEntry, MatchState, TeamScores};
pub use state::GameState;
