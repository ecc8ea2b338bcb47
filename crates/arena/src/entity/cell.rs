//! Cell type and mass/radius coupling.

use super::weapon::WeaponKind;
use crate::ai::AiSteering;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unique cell ID inside one [`crate::world::World`].
pub type CellId = u32;

/// Owner of a set of cells. Split children inherit their parent's owner.
pub type OwnerId = u32;

/// Owner ID reserved for the human player.
pub const PLAYER_OWNER: OwnerId = 0;

/// Radius of a cell with the given mass (`sqrt(mass)`, 0 when depleted).
#[inline]
pub fn mass_to_radius(mass: f32) -> f32 {
    if mass > 0.0 { mass.sqrt() } else { 0.0 }
}

/// Teams available in teams mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Team {
    pub const ALL: [Team; 4] = [Team::Red, Team::Blue, Team::Green, Team::Yellow];

    /// Dense index for per-team arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Team::Red => "red",
            Team::Blue => "blue",
            Team::Green => "green",
            Team::Yellow => "yellow",
        }
    }
}

/// Where a cell's direction comes from each tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Steering {
    /// Steered by the external player's target point.
    Player,
    /// Steered by the wandering AI.
    Ai(AiSteering),
}

/// A circular mass-bearing entity.
#[derive(Debug, Clone)]
pub struct Cell {
    pub id: CellId,
    pub owner: OwnerId,
    pub name: String,
    pub team: Option<Team>,
    pub position: Vec2,
    mass: f32,
    radius: f32,
    /// Residual momentum from a split ejection, bled off by friction.
    pub velocity: Vec2,
    /// Last direction of travel (unit length or zero).
    pub heading: Vec2,
    /// Base speed in units per second at the reference radius.
    pub speed: f32,
    /// Seconds until the cell may split or merge again.
    pub split_cooldown: f32,
    pub weapon: Option<WeaponKind>,
    /// Seconds until the weapon may fire again.
    pub weapon_cooldown: f32,
    /// Frozen direction while movement is locked.
    pub locked_direction: Option<Vec2>,
    pub steering: Steering,
}

impl Cell {
    /// Create a new cell with the given mass.
    pub fn new(
        id: CellId,
        owner: OwnerId,
        name: impl Into<String>,
        position: Vec2,
        mass: f32,
        speed: f32,
        steering: Steering,
    ) -> Self {
        let mut cell = Self {
            id,
            owner,
            name: name.into(),
            team: None,
            position,
            mass: 0.0,
            radius: 0.0,
            velocity: Vec2::ZERO,
            heading: Vec2::ZERO,
            speed,
            split_cooldown: 0.0,
            weapon: None,
            weapon_cooldown: 0.0,
            locked_direction: None,
            steering,
        };
        cell.set_mass(mass);
        cell
    }

    /// Assign a team.
    pub fn with_team(mut self, team: Option<Team>) -> Self {
        self.team = team;
        self
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Set the mass (floored at 0) and recompute the radius.
    #[inline]
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass.max(0.0);
        self.radius = mass_to_radius(self.mass);
    }

    /// Called when this cell eats food or another cell.
    #[inline]
    pub fn on_eat(&mut self, eaten_mass: f32) {
        self.set_mass(self.mass + eaten_mass);
    }

    /// Remove mass. Returns true when the cell is depleted.
    #[inline]
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.set_mass(self.mass - amount);
        self.is_depleted()
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.mass <= 0.0
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.steering, Steering::Player)
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked_direction.is_some()
    }

    /// Speed for this tick: larger cells move proportionally slower.
    #[inline]
    pub fn effective_speed(&self, reference_radius: f32) -> f32 {
        if self.radius <= 0.0 {
            0.0
        } else {
            self.speed * (reference_radius / self.radius)
        }
    }

    /// Whether a split is allowed by mass and cooldown (the roster cap is checked by the caller).
    #[inline]
    pub fn can_split(&self, split_mass: f32) -> bool {
        self.mass >= split_mass && self.split_cooldown <= 0.0
    }

    /// Whether the weapon is ready to fire.
    #[inline]
    pub fn can_fire(&self) -> bool {
        self.weapon.is_some() && self.weapon_cooldown <= 0.0
    }

    /// Count cooldowns down by `dt`, clamping at 0.
    pub fn tick_cooldowns(&mut self, dt: f32) {
        self.split_cooldown = (self.split_cooldown - dt).max(0.0);
        self.weapon_cooldown = (self.weapon_cooldown - dt).max(0.0);
    }

    /// Clamp the position to `[radius, dim - radius]` on both axes.
    #[inline]
    pub fn check_border(&mut self, width: f32, height: f32) {
        let r = self.radius;
        self.position.x = self.position.x.clamp(r.min(width / 2.0), (width - r).max(width / 2.0));
        self.position.y = self.position.y.clamp(r.min(height / 2.0), (height - r).max(height / 2.0));
    }
}
