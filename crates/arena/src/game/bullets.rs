//! Shooting and bullet hits.

use super::collisions::{is_marked, mark};
use super::GameState;
use crate::collision::{contains_point, same_team};
use crate::entity::{Bullet, CellId, WeaponKind};
use glam::Vec2;
use tracing::debug;

impl GameState {
    /// Fire one cell's weapon toward `aim`. Returns whether a bullet was spawned.
    pub(crate) fn shoot(&mut self, id: CellId, aim: Vec2) -> bool {
        let shot_cost = self.config.weapons.shot_cost;
        let bullet_speed = self.config.weapons.bullet_speed;

        let Some(cell) = self.world.get_cell_mut(id) else {
            return false;
        };
        let Some(kind) = cell.weapon else {
            return false;
        };
        if !cell.can_fire() {
            return false;
        }
        let direction = (aim - cell.position).normalize_or_zero();
        if direction == Vec2::ZERO {
            return false;
        }

        let stats = *self.config.weapons.stats(kind);
        let bullet = Bullet {
            id: 0,
            kind,
            position: cell.position + direction * cell.radius(),
            velocity: direction * bullet_speed,
            damage: stats.damage,
            radius: stats.bullet_radius,
            owner: cell.owner,
            team: cell.team,
        };
        cell.weapon_cooldown = stats.rate;
        let depleted = cell.take_damage(shot_cost);

        self.world.add_bullet(bullet);
        if depleted {
            self.eliminate(id);
        }
        true
    }

    /// Fire every armed player cell. Returns the number of bullets spawned.
    pub(crate) fn player_shoot(&mut self, aim: Vec2) -> usize {
        let ids = self.world.player_cells().to_vec();
        ids.into_iter().filter(|&id| self.shoot(id, aim)).count()
    }

    /// Arm a cell and charge the weapon cost.
    pub(crate) fn equip_weapon(&mut self, id: CellId, kind: WeaponKind) -> bool {
        let cost = self.config.weapons.stats(kind).cost;
        let Some(cell) = self.world.get_cell_mut(id) else {
            return false;
        };
        if cell.weapon.is_some() {
            return false;
        }
        cell.weapon = Some(kind);
        cell.weapon_cooldown = 0.0;
        let depleted = cell.take_damage(cost);
        debug!("Cell {} '{}' bought a {}", cell.id, cell.name, kind.name());
        if depleted {
            self.eliminate(id);
        }
        true
    }

    /// Arm every player cell when the weapon choice is offered.
    pub(crate) fn choose_weapon(&mut self, kind: WeaponKind) -> bool {
        if !self.weapon_choice_available() {
            return false;
        }
        let ids = self.world.player_cells().to_vec();
        for id in ids {
            self.equip_weapon(id, kind);
        }
        true
    }

    /// Bullets damage the first rival cell whose body contains them.
    pub(crate) fn process_bullets(&mut self) {
        self.spent_bullets.clear();

        for idx in 0..self.world.bullets.len() {
            let bullet = &self.world.bullets[idx];
            let (position, damage, owner, team) = (bullet.position, bullet.damage, bullet.owner, bullet.team);

            let target = self.cell_grid.query_neighbors(position).into_iter().find(|&id| {
                self.world.get_cell(id).is_some_and(|cell| {
                    cell.owner != owner
                        && !same_team(cell.team, team)
                        && contains_point(cell.position, cell.radius(), position)
                })
            });
            let Some(target) = target else {
                continue;
            };

            mark(&mut self.spent_bullets, idx);
            let depleted = self
                .world
                .get_cell_mut(target)
                .is_some_and(|cell| cell.take_damage(damage));
            if depleted {
                self.eliminate(target);
            }
        }

        if self.spent_bullets.count_ones(..) > 0 {
            let spent = &self.spent_bullets;
            let mut idx = 0;
            self.world.bullets.retain(|_| {
                let keep = !is_marked(spent, idx);
                idx += 1;
                keep
            });
        }
    }
}
