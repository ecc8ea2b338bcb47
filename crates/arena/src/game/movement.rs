//! Cell and bullet movement.

use super::GameState;
use crate::entity::{Cell, Steering};
use glam::Vec2;

/// Unit direction from `from` toward `target`, zero inside the dead zone.
#[inline]
pub(crate) fn steer_toward(from: Vec2, target: Vec2, dead_zone: f32) -> Vec2 {
    let delta = target - from;
    if delta.length() <= dead_zone {
        Vec2::ZERO
    } else {
        delta.normalize_or_zero()
    }
}

impl GameState {
    /// Advance every cell and bullet by `dt`.
    pub(crate) fn update_movement(&mut self, dt: f32) {
        let reference_radius = self.config.player.reference_radius;
        let dead_zone = self.config.player.dead_zone;
        let friction = self.config.cells.friction;
        let (width, height) = (self.world.width, self.world.height);
        let target = self.player_target;

        let ids = self.world.cell_ids().to_vec();
        for id in ids {
            let Some(cell) = self.world.get_cell_mut(id) else {
                continue;
            };
            cell.tick_cooldowns(dt);
            move_cell(cell, target, dead_zone, reference_radius, friction, dt);
            cell.check_border(width, height);
        }

        for bullet in &mut self.world.bullets {
            bullet.advance(dt);
        }
        self.world
            .bullets
            .retain(|bullet| !bullet.is_out_of_bounds(width, height));
    }

    /// Lock every player cell to its heading, or unlock all when all are locked.
    ///
    /// Returns the new lock state, or `None` when the player has no cells.
    pub(crate) fn toggle_lock(&mut self) -> Option<bool> {
        let ids = self.world.player_cells().to_vec();
        if ids.is_empty() {
            return None;
        }
        let all_locked = ids
            .iter()
            .filter_map(|&id| self.world.get_cell(id))
            .all(Cell::is_locked);
        let lock = !all_locked;
        for id in ids {
            if let Some(cell) = self.world.get_cell_mut(id) {
                cell.locked_direction = lock.then_some(cell.heading);
            }
        }
        Some(lock)
    }
}

fn move_cell(
    cell: &mut Cell,
    target: Option<Vec2>,
    dead_zone: f32,
    reference_radius: f32,
    friction: f32,
    dt: f32,
) {
    let speed = cell.effective_speed(reference_radius);

    if let Some(direction) = cell.locked_direction {
        cell.position += direction * speed * dt;
    } else {
        let direction = match &cell.steering {
            Steering::Player => target
                .map(|t| steer_toward(cell.position, t, dead_zone))
                .unwrap_or(Vec2::ZERO),
            // Heading was set by the AI phase
            Steering::Ai(_) => cell.heading,
        };
        if direction != Vec2::ZERO {
            cell.heading = direction;
            cell.position += direction * speed * dt;
        }
        cell.position += cell.velocity * dt;
    }
    cell.velocity *= friction;
}
