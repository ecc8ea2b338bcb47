//! Collision geometry.
//!
//! Pure helpers shared by the food, absorption, merge and bullet passes:
//! - Circle overlap between two cells
//! - Containment of a point inside a cell
//! - The absorption size rule

use crate::entity::Team;
use glam::Vec2;

/// Result of checking collision between two circles.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Combined radius of both circles
    pub r: f32,
    /// Center distance
    pub d: f32,
}

impl CollisionResult {
    /// Check if the circles actually overlap.
    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.d < self.r
    }
}

/// Check collision between two circles.
#[inline]
pub fn check_cell_collision(
    cell_pos: Vec2,
    cell_radius: f32,
    check_pos: Vec2,
    check_radius: f32,
) -> CollisionResult {
    CollisionResult {
        r: cell_radius + check_radius,
        d: cell_pos.distance(check_pos),
    }
}

/// Whether `point` lies strictly inside the circle.
#[inline]
pub fn contains_point(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance(point) < radius
}

/// Whether a cell of radius `r_big` may absorb one of radius `r_small`.
#[inline]
pub fn can_absorb(r_big: f32, r_small: f32, margin: f32) -> bool {
    r_big > r_small * margin
}

/// Teammates never interact. Teamless cells are never teammates.
#[inline]
pub fn same_team(a: Option<Team>, b: Option<Team>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}
