//! Game modes.
//!
//! Each mode decides the autonomous population, which side effects end the
//! match, and any per-tick rules of its own (safe zone, match timer).

use crate::config::Config;
use crate::entity::{CellId, Team};
use crate::game::MatchState;
use crate::world::World;
use crate::SimRng;
use serde::{Deserialize, Serialize};

pub mod battle_royale;
pub mod classic;
pub mod teams;

pub use battle_royale::{BattleRoyale, SafeZone};
pub use classic::Classic;
pub use teams::Teams;

/// Mode selected for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    #[default]
    Classic,
    Teams,
    BattleRoyale,
}

pub trait GameMode: Send + Sync {
    fn name(&self) -> &str;
    fn kind(&self) -> ModeKind;

    /// Whether cells are assigned to teams and team scores are kept.
    fn uses_teams(&self) -> bool {
        false
    }

    /// Autonomous cells spawned when the match starts.
    fn initial_enemies(&self, config: &Config) -> usize;

    /// Team for the next autonomous cell of the initial population.
    fn spawn_team(&self, _world: &World, _config: &Config) -> Option<Team> {
        None
    }

    /// Autonomous cells to spawn this tick, one entry (its team) per cell.
    fn replenish(&self, world: &World, config: &Config) -> Vec<Option<Team>>;

    /// Whether losing the player's last cell ends the match.
    fn ends_on_elimination(&self) -> bool {
        true
    }

    /// Called on session start and on every reset.
    fn on_start(&mut self, _world: &World, _config: &Config) {}

    /// Advance mode rules by `dt`. Returns cells the mode depleted.
    fn on_tick(&mut self, _world: &mut World, _config: &Config, _dt: f32, _rng: &mut SimRng) -> Vec<CellId> {
        Vec::new()
    }

    /// Terminal state reached by the mode's own rules, if any.
    fn outcome(&self, _world: &World) -> Option<MatchState> {
        None
    }

    fn safe_zone(&self) -> Option<&SafeZone> {
        None
    }

    fn safe_zone_mut(&mut self) -> Option<&mut SafeZone> {
        None
    }

    /// Seconds left on the match clock, for timed modes.
    fn time_remaining(&self) -> Option<f32> {
        None
    }
}

pub fn get_gamemode(kind: ModeKind) -> Box<dyn GameMode> {
    match kind {
        ModeKind::Classic => Box::new(Classic::new()),
        ModeKind::Teams => Box::new(Teams::new()),
        ModeKind::BattleRoyale => Box::new(BattleRoyale::new()),
    }
}
