//! Session configuration.

use crate::entity::{Team, WeaponKind};
use crate::error::ConfigError;
use crate::gamemodes::ModeKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub cells: CellConfig,
    #[serde(default)]
    pub food: FoodConfig,
    #[serde(default)]
    pub enemy: EnemyConfig,
    #[serde(default)]
    pub teams: TeamsConfig,
    #[serde(default)]
    pub zone: ZoneConfig,
    #[serde(default)]
    pub weapons: WeaponsConfig,
}

impl Config {
    /// Load configuration from `path`, writing the defaults there if the file is missing.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config: Self = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every tuning value is usable for a session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.world.width, self.world.height);
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidWorld { width, height });
        }
        if !(self.session.grid_size > 0.0) {
            return Err(ConfigError::InvalidGridSize(self.session.grid_size));
        }
        if !(self.cells.absorb_margin > 1.0) {
            return Err(ConfigError::InvalidAbsorbMargin(self.cells.absorb_margin));
        }
        if !(0.0..=1.0).contains(&self.cells.friction) {
            return Err(ConfigError::InvalidFriction(self.cells.friction));
        }

        positive("player.start_radius", self.player.start_radius)?;
        positive("player.reference_radius", self.player.reference_radius)?;
        positive("food.radius", self.food.radius)?;
        positive("zone.shrink_interval", self.zone.shrink_interval)?;
        non_negative("player.speed", self.player.speed)?;
        non_negative("enemy.speed", self.enemy.speed)?;
        non_negative("food.respawn_delay", self.food.respawn_delay)?;
        non_negative("zone.min_radius", self.zone.min_radius)?;
        non_negative("zone.shrink_step", self.zone.shrink_step)?;
        non_negative("zone.center_jitter", self.zone.center_jitter as f32)?;
        non_negative("weapons.shot_cost", self.weapons.shot_cost)?;
        probability("enemy.wander_chance", self.enemy.wander_chance)?;
        probability("enemy.split_chance", self.enemy.split_chance)?;
        probability("enemy.steer_blend", self.enemy.steer_blend)?;

        if self.enemy.min_radius == 0 || self.enemy.min_radius > self.enemy.max_radius {
            return Err(ConfigError::EmptyEnemyRadius {
                min: self.enemy.min_radius,
                max: self.enemy.max_radius,
            });
        }
        if self.player.max_cells == 0 || self.enemy.max_cells == 0 {
            return Err(ConfigError::ZeroCellCap);
        }

        let roster = &self.teams.roster;
        if roster.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        for (i, team) in roster.iter().enumerate() {
            if roster[..i].contains(team) {
                return Err(ConfigError::DuplicateTeam(*team));
            }
        }
        if let Some(team) = self.player.team {
            if !roster.contains(&team) {
                return Err(ConfigError::PlayerTeamNotInRoster(team));
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

/// Session-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Game mode (classic, teams, battle_royale).
    #[serde(default)]
    pub mode: ModeKind,
    /// Seed for every random decision of the simulation.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Side length of one spatial grid bucket.
    #[serde(default = "default_grid_size")]
    pub grid_size: f32,
    /// Frame interval used by the headless driver, in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Teams match length in seconds.
    #[serde(default = "default_match_duration")]
    pub match_duration: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: ModeKind::default(),
            seed: default_seed(),
            grid_size: default_grid_size(),
            tick_interval_ms: default_tick_interval(),
            match_duration: default_match_duration(),
        }
    }
}

fn default_seed() -> u64 {
    0x5eed_a9a7
}
fn default_grid_size() -> f32 {
    100.0
}
fn default_tick_interval() -> u64 {
    16
}
fn default_match_duration() -> f32 {
    300.0
}

/// World size. The world spans `[0, width] x [0, height]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorldConfig {
    #[serde(default = "default_world_size")]
    pub width: f32,
    #[serde(default = "default_world_size")]
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_world_size(),
            height: default_world_size(),
        }
    }
}

fn default_world_size() -> f32 {
    2000.0
}

/// Human player settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player_name")]
    pub name: String,
    /// Team picked on the team-select screen (teams mode only).
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default = "default_player_start_radius")]
    pub start_radius: f32,
    /// Speed in units per second of a cell at `reference_radius`.
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_reference_radius")]
    pub reference_radius: f32,
    /// Targets closer than this are ignored.
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f32,
    #[serde(default = "default_player_max_cells")]
    pub max_cells: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: default_player_name(),
            team: None,
            start_radius: default_player_start_radius(),
            speed: default_speed(),
            reference_radius: default_reference_radius(),
            dead_zone: default_dead_zone(),
            max_cells: default_player_max_cells(),
        }
    }
}

fn default_player_name() -> String {
    "Player".to_string()
}
fn default_player_start_radius() -> f32 {
    40.0
}
fn default_speed() -> f32 {
    300.0
}
fn default_reference_radius() -> f32 {
    20.0
}
fn default_dead_zone() -> f32 {
    5.0
}
fn default_player_max_cells() -> usize {
    16
}

/// Mechanics shared by every cell.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CellConfig {
    #[serde(default = "default_split_mass")]
    pub split_mass: f32,
    /// Seconds before a split cell may split or merge again.
    #[serde(default = "default_split_cooldown")]
    pub split_cooldown: f32,
    #[serde(default = "default_eject_speed")]
    pub eject_speed: f32,
    /// Per-tick multiplier on residual velocity.
    #[serde(default = "default_friction")]
    pub friction: f32,
    /// The absorber's radius must exceed the victim's by this factor.
    #[serde(default = "default_absorb_margin")]
    pub absorb_margin: f32,
    #[serde(default = "default_weapon_unlock_mass")]
    pub weapon_unlock_mass: f32,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            split_mass: default_split_mass(),
            split_cooldown: default_split_cooldown(),
            eject_speed: default_eject_speed(),
            friction: default_friction(),
            absorb_margin: default_absorb_margin(),
            weapon_unlock_mass: default_weapon_unlock_mass(),
        }
    }
}

fn default_split_mass() -> f32 {
    400.0
}
fn default_split_cooldown() -> f32 {
    2.0
}
fn default_eject_speed() -> f32 {
    300.0
}
fn default_friction() -> f32 {
    0.9
}
fn default_absorb_margin() -> f32 {
    1.1
}
fn default_weapon_unlock_mass() -> f32 {
    5000.0
}

/// Food pellet configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FoodConfig {
    #[serde(default = "default_food_target")]
    pub target: usize,
    #[serde(default = "default_food_radius")]
    pub radius: f32,
    #[serde(default = "default_food_respawn_delay")]
    pub respawn_delay: f32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            target: default_food_target(),
            radius: default_food_radius(),
            respawn_delay: default_food_respawn_delay(),
        }
    }
}

fn default_food_target() -> usize {
    200
}
fn default_food_radius() -> f32 {
    4.0
}
fn default_food_respawn_delay() -> f32 {
    5.0
}

/// Autonomous cell population and behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnemyConfig {
    /// Population kept alive in classic mode (split evenly per team in teams mode).
    #[serde(default = "default_enemy_target")]
    pub target: usize,
    #[serde(default = "default_enemy_team_initial")]
    pub team_initial: usize,
    #[serde(default = "default_enemy_royale_initial")]
    pub royale_initial: usize,
    #[serde(default = "default_enemy_min_radius")]
    pub min_radius: u32,
    #[serde(default = "default_enemy_max_radius")]
    pub max_radius: u32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Live cells one AI lineage may own before it stops splitting.
    #[serde(default = "default_enemy_max_cells")]
    pub max_cells: usize,
    #[serde(default = "default_enemy_chance")]
    pub wander_chance: f32,
    #[serde(default = "default_enemy_chance")]
    pub split_chance: f32,
    #[serde(default = "default_steer_blend")]
    pub steer_blend: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            target: default_enemy_target(),
            team_initial: default_enemy_team_initial(),
            royale_initial: default_enemy_royale_initial(),
            min_radius: default_enemy_min_radius(),
            max_radius: default_enemy_max_radius(),
            speed: default_speed(),
            max_cells: default_enemy_max_cells(),
            wander_chance: default_enemy_chance(),
            split_chance: default_enemy_chance(),
            steer_blend: default_steer_blend(),
        }
    }
}

fn default_enemy_target() -> usize {
    15
}
fn default_enemy_team_initial() -> usize {
    40
}
fn default_enemy_royale_initial() -> usize {
    49
}
fn default_enemy_min_radius() -> u32 {
    15
}
fn default_enemy_max_radius() -> u32 {
    40
}
fn default_enemy_max_cells() -> usize {
    4
}
fn default_enemy_chance() -> f32 {
    0.005
}
fn default_steer_blend() -> f32 {
    0.1
}

/// Teams in play for teams mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamsConfig {
    #[serde(default = "default_roster")]
    pub roster: Vec<Team>,
}

impl Default for TeamsConfig {
    fn default() -> Self {
        Self {
            roster: default_roster(),
        }
    }
}

fn default_roster() -> Vec<Team> {
    Team::ALL.to_vec()
}

/// Battle royale safe zone tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    #[serde(default = "default_shrink_interval")]
    pub shrink_interval: f32,
    #[serde(default = "default_zone_min_radius")]
    pub min_radius: f32,
    #[serde(default = "default_shrink_step")]
    pub shrink_step: f32,
    /// Largest per-axis center offset applied on each shrink.
    #[serde(default = "default_center_jitter")]
    pub center_jitter: i32,
    #[serde(default = "default_damage_per_stage")]
    pub damage_per_stage: f32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            shrink_interval: default_shrink_interval(),
            min_radius: default_zone_min_radius(),
            shrink_step: default_shrink_step(),
            center_jitter: default_center_jitter(),
            damage_per_stage: default_damage_per_stage(),
        }
    }
}

fn default_shrink_interval() -> f32 {
    20.0
}
fn default_zone_min_radius() -> f32 {
    300.0
}
fn default_shrink_step() -> f32 {
    300.0
}
fn default_center_jitter() -> i32 {
    100
}
fn default_damage_per_stage() -> f32 {
    5.0
}

/// Weapon table plus shot mechanics.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeaponsConfig {
    #[serde(default = "default_gun")]
    pub gun: WeaponStats,
    #[serde(default = "default_rpg")]
    pub rpg: WeaponStats,
    /// Mass paid by the firing cell per shot.
    #[serde(default = "default_shot_cost")]
    pub shot_cost: f32,
    #[serde(default = "default_bullet_speed")]
    pub bullet_speed: f32,
}

impl WeaponsConfig {
    /// Stats for one weapon kind.
    pub fn stats(&self, kind: WeaponKind) -> &WeaponStats {
        match kind {
            WeaponKind::Gun => &self.gun,
            WeaponKind::Rpg => &self.rpg,
        }
    }
}

impl Default for WeaponsConfig {
    fn default() -> Self {
        Self {
            gun: default_gun(),
            rpg: default_rpg(),
            shot_cost: default_shot_cost(),
            bullet_speed: default_bullet_speed(),
        }
    }
}

/// Cost, damage and fire rate of one weapon.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct WeaponStats {
    /// Mass paid once when the weapon is equipped.
    pub cost: f32,
    pub damage: f32,
    /// Seconds between shots.
    pub rate: f32,
    pub bullet_radius: f32,
}

fn default_gun() -> WeaponStats {
    WeaponStats {
        cost: 2000.0,
        damage: 150.0,
        rate: 0.2,
        bullet_radius: 5.0,
    }
}
fn default_rpg() -> WeaponStats {
    WeaponStats {
        cost: 3000.0,
        damage: 400.0,
        rate: 0.8,
        bullet_radius: 10.0,
    }
}
fn default_shot_cost() -> f32 {
    10.0
}
fn default_bullet_speed() -> f32 {
    500.0
}
