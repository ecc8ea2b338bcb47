//! Configuration error types.

use crate::entity::Team;
use thiserror::Error;

/// Errors raised while validating a session configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("World dimensions must be positive (got {width}x{height})")]
    InvalidWorld { width: f32, height: f32 },

    #[error("Grid bucket size must be positive (got {0})")]
    InvalidGridSize(f32),

    #[error("Absorb margin must be greater than 1.0 (got {0})")]
    InvalidAbsorbMargin(f32),

    #[error("Friction must be within 0.0..=1.0 (got {0})")]
    InvalidFriction(f32),

    #[error("Invalid {field}: {value}")]
    OutOfRange { field: &'static str, value: f32 },

    #[error("Enemy radius range is empty ({min}..={max})")]
    EmptyEnemyRadius { min: u32, max: u32 },

    #[error("Team roster is empty")]
    EmptyRoster,

    #[error("Team {0:?} appears more than once in the roster")]
    DuplicateTeam(Team),

    #[error("Player team {0:?} is not in the roster")]
    PlayerTeamNotInRoster(Team),

    #[error("Player cell cap must be at least 1")]
    ZeroCellCap,
}
