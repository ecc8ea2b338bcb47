//! Food consumption, absorption and own-cell merging.

use super::GameState;
use crate::collision::{can_absorb, check_cell_collision, contains_point, same_team};
use crate::entity::CellId;
use fixedbitset::FixedBitSet;
use tracing::debug;

#[inline]
pub(crate) fn mark(set: &mut FixedBitSet, idx: usize) {
    if idx >= set.len() {
        set.grow(idx + 1);
    }
    set.insert(idx);
}

#[inline]
pub(crate) fn is_marked(set: &FixedBitSet, idx: usize) -> bool {
    idx < set.len() && set.contains(idx)
}

impl GameState {
    /// Every cell eats the food under its center. Each pellet goes to one cell.
    pub(crate) fn process_food(&mut self) {
        self.eaten_food.clear();
        self.eaten_food.grow(self.world.food.len());
        let uses_teams = self.gamemode.uses_teams();

        let ids = self.world.cell_ids().to_vec();
        for id in ids {
            let Some(position) = self.world.get_cell(id).map(|c| c.position) else {
                continue;
            };
            for idx in self.food_grid.query_neighbors(position) {
                if is_marked(&self.eaten_food, idx) {
                    continue;
                }
                let Some(food) = self.world.food.get(idx) else {
                    continue;
                };
                let (food_position, food_mass) = (food.position, food.mass());
                let Some(cell) = self.world.get_cell_mut(id) else {
                    break;
                };
                // Radius grows with every pellet, so re-read it each time
                if !contains_point(cell.position, cell.radius(), food_position) {
                    continue;
                }
                cell.on_eat(food_mass);
                self.eaten_food.insert(idx);
                if uses_teams {
                    if let Some(team) = cell.team {
                        self.team_scores.add(team, food_mass);
                    }
                }
            }
        }

        if self.eaten_food.count_ones(..) > 0 {
            self.world
                .recycle_food(&self.eaten_food, self.config.food.respawn_delay);
        }
    }

    /// Larger cells absorb overlapping smaller rivals.
    ///
    /// A cell takes part in at most one absorption per tick, as absorber or victim.
    pub(crate) fn process_absorption(&mut self) {
        self.resolved_cells.clear();
        let margin = self.config.cells.absorb_margin;
        let uses_teams = self.gamemode.uses_teams();

        let ids = self.world.cell_ids().to_vec();
        for id in ids {
            if is_marked(&self.resolved_cells, id as usize) {
                continue;
            }
            let Some(cell) = self.world.get_cell(id) else {
                continue;
            };
            let (position, radius, team, owner) = (cell.position, cell.radius(), cell.team, cell.owner);

            for other_id in self.cell_grid.query_neighbors(position) {
                if other_id == id || is_marked(&self.resolved_cells, other_id as usize) {
                    continue;
                }
                let Some(other) = self.world.get_cell(other_id) else {
                    continue;
                };
                // Own cells merge instead
                if other.owner == owner || same_team(team, other.team) {
                    continue;
                }
                let other_radius = other.radius();
                if !check_cell_collision(position, radius, other.position, other_radius).is_colliding() {
                    continue;
                }

                let (absorber, victim) = if can_absorb(radius, other_radius, margin) {
                    (id, other_id)
                } else if can_absorb(other_radius, radius, margin) {
                    (other_id, id)
                } else {
                    // Too close in size, they stand off
                    continue;
                };

                self.absorb(absorber, victim, uses_teams);
                mark(&mut self.resolved_cells, absorber as usize);
                mark(&mut self.resolved_cells, victim as usize);
                break;
            }
        }
        self.resolved_cells.clear();
    }

    fn absorb(&mut self, absorber: CellId, victim: CellId, uses_teams: bool) {
        let Some(eaten) = self.eliminate(victim) else {
            return;
        };
        let Some(cell) = self.world.get_cell_mut(absorber) else {
            return;
        };
        cell.on_eat(eaten.mass());
        debug!(
            "Cell {} '{}' absorbed cell {} '{}' ({:.1} mass)",
            cell.id,
            cell.name,
            eaten.id,
            eaten.name,
            eaten.mass()
        );
        if uses_teams {
            if let Some(team) = cell.team {
                self.team_scores.add(team, eaten.mass());
            }
        }
    }

    /// Overlapping cells of one owner merge once both split cooldowns expired.
    pub(crate) fn process_merges(&mut self) {
        self.resolved_cells.clear();

        let ids = self.world.cell_ids().to_vec();
        for id in ids {
            if is_marked(&self.resolved_cells, id as usize) {
                continue;
            }
            let Some(cell) = self.world.get_cell(id) else {
                continue;
            };
            if cell.split_cooldown > 0.0 {
                continue;
            }
            let (position, radius, owner) = (cell.position, cell.radius(), cell.owner);

            let siblings = self.world.owner_cells(owner).to_vec();
            for other_id in siblings {
                if other_id == id || is_marked(&self.resolved_cells, other_id as usize) {
                    continue;
                }
                let Some(other) = self.world.get_cell(other_id) else {
                    continue;
                };
                if other.split_cooldown > 0.0 {
                    continue;
                }
                if !check_cell_collision(position, radius, other.position, other.radius()).is_colliding() {
                    continue;
                }

                let Some(merged) = self.world.remove_cell(other_id) else {
                    continue;
                };
                if let Some(cell) = self.world.get_cell_mut(id) {
                    cell.on_eat(merged.mass());
                }
                mark(&mut self.resolved_cells, id as usize);
                mark(&mut self.resolved_cells, other_id as usize);
                break;
            }
        }
        self.resolved_cells.clear();
    }
}
