//! Battle Royale game mode.
//!
//! No respawns. A safe zone shrinks in stages and damages every cell caught
//! outside it. The player wins by outlasting every autonomous cell.

use super::{GameMode, ModeKind};
use crate::config::{Config, ZoneConfig};
use crate::entity::{CellId, Team};
use crate::game::MatchState;
use crate::world::World;
use crate::SimRng;
use glam::Vec2;
use rand::Rng;
use tracing::debug;

/// Shrinking safe circle. Stage 0 means inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SafeZone {
    pub center: Vec2,
    pub radius: f32,
    pub stage: u32,
    /// Seconds until the next shrink.
    pub shrink_timer: f32,
}

impl SafeZone {
    /// Start stage 1.
    pub fn activate(&mut self, center: Vec2, radius: f32, shrink_interval: f32) {
        self.center = center;
        self.radius = radius;
        self.stage = 1;
        self.shrink_timer = shrink_interval;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.stage > 0
    }

    /// Whether a point lies outside the zone.
    #[inline]
    pub fn is_outside(&self, position: Vec2) -> bool {
        self.is_active() && position.distance(self.center) > self.radius
    }

    /// Mass lost over `dt` by a cell outside the zone.
    #[inline]
    pub fn damage(&self, damage_per_stage: f32, dt: f32) -> f32 {
        damage_per_stage * self.stage as f32 * dt
    }

    /// Count the shrink timer down and shrink when it expires.
    ///
    /// Returns true when a new stage started.
    pub fn update<R: Rng>(&mut self, dt: f32, config: &ZoneConfig, width: f32, height: f32, rng: &mut R) -> bool {
        if !self.is_active() || self.radius <= config.min_radius {
            return false;
        }
        self.shrink_timer -= dt;
        if self.shrink_timer > 0.0 {
            return false;
        }

        self.radius = (self.radius - config.shrink_step).max(config.min_radius);
        self.shrink_timer = config.shrink_interval;
        self.stage += 1;

        let jitter = config.center_jitter.max(0);
        let dx = rng.random_range(-jitter..=jitter) as f32;
        let dy = rng.random_range(-jitter..=jitter) as f32;
        self.center.x = (self.center.x + dx).clamp(0.0, width);
        self.center.y = (self.center.y + dy).clamp(0.0, height);
        true
    }
}

pub struct BattleRoyale {
    zone: SafeZone,
}

impl BattleRoyale {
    pub fn new() -> Self {
        Self {
            zone: SafeZone::default(),
        }
    }
}

impl Default for BattleRoyale {
    fn default() -> Self {
        Self::new()
    }
}

impl GameMode for BattleRoyale {
    fn name(&self) -> &str {
        "Battle Royale"
    }

    fn kind(&self) -> ModeKind {
        ModeKind::BattleRoyale
    }

    fn initial_enemies(&self, config: &Config) -> usize {
        config.enemy.royale_initial
    }

    fn replenish(&self, _world: &World, _config: &Config) -> Vec<Option<Team>> {
        Vec::new()
    }

    fn on_start(&mut self, world: &World, config: &Config) {
        self.zone = SafeZone::default();
        self.zone.activate(
            world.center(),
            world.width.max(world.height) / 2.0,
            config.zone.shrink_interval,
        );
    }

    fn on_tick(&mut self, world: &mut World, config: &Config, dt: f32, rng: &mut SimRng) -> Vec<CellId> {
        if self.zone.update(dt, &config.zone, world.width, world.height, rng) {
            debug!(
                "Safe zone stage {} (radius {:.0}, center {:.0},{:.0})",
                self.zone.stage, self.zone.radius, self.zone.center.x, self.zone.center.y
            );
        }

        let damage = self.zone.damage(config.zone.damage_per_stage, dt);
        let mut depleted = Vec::new();
        if damage <= 0.0 {
            return depleted;
        }
        let ids = world.cell_ids().to_vec();
        for id in ids {
            let Some(cell) = world.get_cell_mut(id) else {
                continue;
            };
            if self.zone.is_outside(cell.position) && cell.take_damage(damage) {
                depleted.push(id);
            }
        }
        depleted
    }

    fn outcome(&self, world: &World) -> Option<MatchState> {
        (world.enemy_count() == 0 && !world.player_cells().is_empty()).then_some(MatchState::ZoneCleared)
    }

    fn safe_zone(&self) -> Option<&SafeZone> {
        Some(&self.zone)
    }

    fn safe_zone_mut(&mut self) -> Option<&mut SafeZone> {
        Some(&mut self.zone)
    }
}
