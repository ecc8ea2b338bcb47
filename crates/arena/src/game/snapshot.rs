//! Read-only views handed to the host after each tick.

use super::GameState;
use crate::entity::{BulletId, CellId, OwnerId, Team, WeaponKind, PLAYER_OWNER};
use crate::gamemodes::SafeZone;
use glam::Vec2;
use std::cmp::Ordering;

/// Match progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchState {
    #[default]
    Running,
    /// The player's last cell was removed.
    Eliminated,
    /// Battle royale won: only the player is left.
    ZoneCleared,
    /// Teams match clock ran out.
    TimeExpired,
}

impl MatchState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != MatchState::Running
    }
}

/// Accumulated mass per team.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamScores {
    scores: [f32; 4],
}

impl TeamScores {
    #[inline]
    pub fn get(&self, team: Team) -> f32 {
        self.scores[team.index()]
    }

    #[inline]
    pub fn add(&mut self, team: Team, mass: f32) {
        self.scores[team.index()] += mass;
    }

    /// Highest scoring roster team. Ties go to the earlier roster entry.
    pub fn leader(&self, roster: &[Team]) -> Option<Team> {
        let mut best: Option<Team> = None;
        for &team in roster {
            if best.is_none_or(|b| self.get(team) > self.get(b)) {
                best = Some(team);
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (Team, f32)> + '_ {
        Team::ALL.iter().map(move |&team| (team, self.get(team)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellView<'a> {
    pub id: CellId,
    pub owner: OwnerId,
    pub name: &'a str,
    pub team: Option<Team>,
    pub position: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub is_player: bool,
    pub weapon: Option<WeaponKind>,
    pub locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodView {
    pub position: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletView {
    pub id: BulletId,
    pub kind: WeaponKind,
    pub position: Vec2,
    pub radius: f32,
    pub team: Option<Team>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry<'a> {
    pub name: &'a str,
    pub mass: f32,
    pub is_player: bool,
}

impl GameState {
    /// Every live cell, in store order.
    pub fn cells(&self) -> Vec<CellView<'_>> {
        self.world
            .iter_cells()
            .map(|cell| CellView {
                id: cell.id,
                owner: cell.owner,
                name: &cell.name,
                team: cell.team,
                position: cell.position,
                radius: cell.radius(),
                mass: cell.mass(),
                is_player: cell.owner == PLAYER_OWNER,
                weapon: cell.weapon,
                locked: cell.is_locked(),
            })
            .collect()
    }

    /// Active food (respawning pellets are hidden).
    pub fn food(&self) -> Vec<FoodView> {
        self.world
            .food
            .iter()
            .map(|food| FoodView {
                position: food.position,
                radius: food.radius(),
            })
            .collect()
    }

    pub fn bullets(&self) -> Vec<BulletView> {
        self.world.bullets.iter().map(bullet_view).collect()
    }

    /// Bullets in the 3x3 grid block around `point`.
    pub fn bullets_near(&self, point: Vec2) -> Vec<BulletView> {
        self.bullet_grid
            .query_neighbors(point)
            .into_iter()
            .filter_map(|idx| self.world.bullets.get(idx))
            .map(bullet_view)
            .collect()
    }

    pub fn team_scores(&self) -> &TeamScores {
        &self.team_scores
    }

    /// Safe zone, in battle royale.
    pub fn zone(&self) -> Option<SafeZone> {
        self.gamemode.safe_zone().copied()
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Top `n` cells by mass.
    pub fn leaderboard(&self, n: usize) -> Vec<LeaderboardEntry<'_>> {
        let mut cells: Vec<_> = self.world.iter_cells().collect();
        cells.sort_by(|a, b| {
            b.mass()
                .partial_cmp(&a.mass())
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        cells
            .into_iter()
            .take(n)
            .map(|cell| LeaderboardEntry {
                name: &cell.name,
                mass: cell.mass(),
                is_player: cell.owner == PLAYER_OWNER,
            })
            .collect()
    }

    /// Team with the highest score, in teams mode.
    pub fn leading_team(&self) -> Option<Team> {
        if !self.gamemode.uses_teams() {
            return None;
        }
        self.team_scores.leader(&self.config.teams.roster)
    }

    /// Distinct owners (the player included) with a live cell.
    pub fn players_left(&self) -> usize {
        self.world.live_owners()
    }

    pub fn player_mass(&self) -> f32 {
        self.world.player_mass()
    }

    /// Whether the player may buy a weapon with a `choose_weapon` command.
    pub fn weapon_choice_available(&self) -> bool {
        let player_cells = self.world.player_cells();
        !player_cells.is_empty()
            && player_cells
                .iter()
                .filter_map(|&id| self.world.get_cell(id))
                .all(|cell| cell.weapon.is_none())
            && self.world.player_mass() >= self.config.cells.weapon_unlock_mass
    }

    /// Seconds left on the match clock, in teams mode.
    pub fn time_remaining(&self) -> Option<f32> {
        self.gamemode.time_remaining()
    }
}

fn bullet_view(bullet: &crate::entity::Bullet) -> BulletView {
    BulletView {
        id: bullet.id,
        kind: bullet.kind,
        position: bullet.position,
        radius: bullet.radius,
        team: bullet.team,
    }
}
