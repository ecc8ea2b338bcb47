//! Applies autonomous cell decisions.

use super::GameState;
use crate::ai::{self, random_heading, AiSteering};
use crate::entity::Steering;

impl GameState {
    /// Let every autonomous cell think, then apply its intents.
    pub(crate) fn update_bots(&mut self) {
        let zone = self.gamemode.safe_zone().copied();
        let max_cells = self.config.enemy.max_cells;

        let ids = self.world.cell_ids().to_vec();
        for id in ids {
            let Some(cell) = self.world.get_cell(id) else {
                continue;
            };
            let Steering::Ai(steering) = &cell.steering else {
                continue;
            };
            let has_room = self.world.split_population(cell) < max_cells;
            let intent = ai::think(cell, steering, zone.as_ref(), has_room, &self.config, &mut self.rng);

            if let Some(cell) = self.world.get_cell_mut(id) {
                cell.steering = Steering::Ai(AiSteering::new(intent.desired));
                if !cell.is_locked() {
                    cell.heading = intent.heading;
                }
            }

            if let Some(aim) = intent.fire_at {
                self.shoot(id, aim);
            }
            if let Some(kind) = intent.pick_weapon {
                self.equip_weapon(id, kind);
            }
            if intent.split_requested {
                let direction = random_heading(&mut self.rng);
                self.split_cell(id, direction, max_cells);
            }
        }
    }
}
