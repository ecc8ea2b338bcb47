use crate::config::Config;
use crate::entity::{Cell, WeaponKind};
use crate::gamemodes::SafeZone;
use glam::Vec2;
use rand::Rng;

/// How far ahead of itself an autonomous cell aims when it auto-fires.
const AIM_DISTANCE: f32 = 100.0;

/// Per-cell AI memory.
#[derive(Debug, Clone, PartialEq)]
pub struct AiSteering {
    /// Direction the cell is turning toward (unit length).
    pub desired: Vec2,
}

impl AiSteering {
    pub fn new(desired: Vec2) -> Self {
        Self { desired }
    }

    /// Steering with a uniformly random heading.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(random_heading(rng))
    }
}

/// Unit vector at a uniformly random angle.
pub fn random_heading<R: Rng>(rng: &mut R) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    Vec2::new(angle.cos(), angle.sin())
}

/// What an autonomous cell wants to do this tick. Applied by the game.
#[derive(Debug, Clone, PartialEq)]
pub struct BotIntent {
    /// New turning target, stored back into the cell's [`AiSteering`].
    pub desired: Vec2,
    /// Direction of travel for this tick (unit length or zero).
    pub heading: Vec2,
    /// Fire toward this point.
    pub fire_at: Option<Vec2>,
    /// Whether the cell wants to split.
    pub split_requested: bool,
    /// Weapon to buy.
    pub pick_weapon: Option<WeaponKind>,
}

/// Decide the next move of an autonomous cell.
///
/// `owner_has_room` tells whether the cell's lineage is still under the AI cell cap.
pub fn think<R: Rng>(
    cell: &Cell,
    steering: &AiSteering,
    zone: Option<&SafeZone>,
    owner_has_room: bool,
    config: &Config,
    rng: &mut R,
) -> BotIntent {
    let enemy = &config.enemy;
    let mut desired = steering.desired;

    let outside_zone = zone.is_some_and(|z| {
        z.is_active() && cell.position.distance(z.center) > z.radius - cell.radius()
    });

    if outside_zone {
        // Head back toward the safe zone
        if let Some(z) = zone {
            let to_center = (z.center - cell.position).normalize_or_zero();
            if to_center != Vec2::ZERO {
                desired = to_center;
            }
        }
    } else if rng.random::<f32>() < enemy.wander_chance {
        desired = random_heading(rng);
    }

    let blended = cell.heading + (desired - cell.heading) * enemy.steer_blend;
    let heading = match blended.try_normalize() {
        Some(h) => h,
        None => desired.normalize_or_zero(),
    };

    let fire_at = if cell.can_fire() && heading != Vec2::ZERO {
        Some(cell.position + heading * AIM_DISTANCE)
    } else {
        None
    };

    let pick_weapon = if cell.weapon.is_none() && cell.mass() >= config.cells.weapon_unlock_mass {
        Some(WeaponKind::ALL[rng.random_range(0..WeaponKind::ALL.len())])
    } else {
        None
    };

    let split_requested = cell.can_split(config.cells.split_mass)
        && owner_has_room
        && rng.random::<f32>() < enemy.split_chance;

    BotIntent {
        desired,
        heading,
        fire_at,
        split_requested,
        pick_weapon,
    }
}
