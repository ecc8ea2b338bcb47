//! Food pellets.

use glam::Vec2;

/// A food pellet. Eaten pellets are recycled after a respawn delay.
#[derive(Debug, Clone)]
pub struct Food {
    pub position: Vec2,
    radius: f32,
    /// Seconds left before a recycled pellet re-enters the world.
    respawn_timer: f32,
}

impl Food {
    /// Create a new food pellet.
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            respawn_timer: 0.0,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Mass gained by the cell that eats this pellet.
    #[inline]
    pub fn mass(&self) -> f32 {
        self.radius * self.radius
    }

    /// Start the respawn countdown after being eaten.
    pub fn schedule_respawn(&mut self, delay: f32) {
        self.respawn_timer = delay;
    }

    /// Count the respawn timer down. Returns true once the pellet may respawn.
    pub fn tick_respawn(&mut self, dt: f32) -> bool {
        self.respawn_timer -= dt;
        self.respawn_timer <= 0.0
    }
}
