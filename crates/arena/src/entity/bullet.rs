//! Projectiles.

use super::cell::{OwnerId, Team};
use super::weapon::WeaponKind;
use glam::Vec2;

/// Unique bullet ID.
pub type BulletId = u32;

/// A projectile fired by an armed cell. Hits at most one cell.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: BulletId,
    pub kind: WeaponKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub damage: f32,
    pub radius: f32,
    /// Owner of the firing cell; its cells are never hit.
    pub owner: OwnerId,
    pub team: Option<Team>,
}

impl Bullet {
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Whether the bullet center has left `[0, width] x [0, height]`.
    #[inline]
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.position.x < 0.0
            || self.position.x > width
            || self.position.y < 0.0
            || self.position.y > height
    }
}
