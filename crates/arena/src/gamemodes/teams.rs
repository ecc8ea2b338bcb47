//! Teams game mode.
//!
//! Every cell belongs to a roster team. Teammates never interact, eaten mass
//! is credited to the eater's team, and the match runs until the clock expires.

use super::{GameMode, ModeKind};
use crate::config::Config;
use crate::entity::{CellId, Team};
use crate::game::MatchState;
use crate::world::World;
use crate::SimRng;

pub struct Teams {
    /// Seconds left in the match.
    timer: f32,
}

impl Teams {
    pub fn new() -> Self {
        Self { timer: 0.0 }
    }

    /// Roster team with the fewest autonomous cells. Ties go to the earlier roster entry.
    fn emptiest_team(world: &World, config: &Config) -> Option<Team> {
        config
            .teams
            .roster
            .iter()
            .copied()
            .min_by_key(|&team| world.team_enemy_count(team))
    }
}

impl Default for Teams {
    fn default() -> Self {
        Self::new()
    }
}

impl GameMode for Teams {
    fn name(&self) -> &str {
        "Teams"
    }

    fn kind(&self) -> ModeKind {
        ModeKind::Teams
    }

    fn uses_teams(&self) -> bool {
        true
    }

    fn initial_enemies(&self, config: &Config) -> usize {
        config.enemy.team_initial
    }

    fn spawn_team(&self, world: &World, config: &Config) -> Option<Team> {
        Self::emptiest_team(world, config)
    }

    fn replenish(&self, world: &World, config: &Config) -> Vec<Option<Team>> {
        let roster = &config.teams.roster;
        if roster.is_empty() {
            return Vec::new();
        }
        let desired = config.enemy.target / roster.len();
        roster
            .iter()
            .copied()
            .filter(|&team| world.team_enemy_count(team) < desired)
            .map(Some)
            .collect()
    }

    fn ends_on_elimination(&self) -> bool {
        false
    }

    fn on_start(&mut self, _world: &World, config: &Config) {
        self.timer = config.session.match_duration;
    }

    fn on_tick(&mut self, _world: &mut World, _config: &Config, dt: f32, _rng: &mut SimRng) -> Vec<CellId> {
        self.timer = (self.timer - dt).max(0.0);
        Vec::new()
    }

    fn outcome(&self, _world: &World) -> Option<MatchState> {
        (self.timer <= 0.0).then_some(MatchState::TimeExpired)
    }

    fn time_remaining(&self) -> Option<f32> {
        Some(self.timer)
    }
}
