//! Spawning, splitting and food recycling.

use super::movement::steer_toward;
use super::GameState;
use crate::ai::AiSteering;
use crate::entity::{Cell, CellId, Steering, Team, PLAYER_OWNER};
use crate::gamemodes::ModeKind;
use glam::Vec2;
use rand::Rng;
use tracing::debug;

impl GameState {
    /// Spawn the player, the mode's initial autonomous population and the food.
    pub(crate) fn spawn_population(&mut self) {
        self.spawn_player();
        for _ in 0..self.gamemode.initial_enemies(&self.config) {
            let team = if self.gamemode.uses_teams() {
                self.gamemode.spawn_team(&self.world, &self.config)
            } else {
                None
            };
            self.spawn_enemy(team);
        }
        self.top_up_food();
    }

    /// Spawn the player's starting cell: world center in classic, random otherwise.
    pub(crate) fn spawn_player(&mut self) -> CellId {
        let position = match self.gamemode.kind() {
            ModeKind::Classic => self.world.center(),
            ModeKind::Teams | ModeKind::BattleRoyale => self.world.random_position(&mut self.rng),
        };
        let radius = self.config.player.start_radius;
        self.place_player_cell(position, radius * radius)
    }

    /// Place a player cell by hand.
    pub fn place_player_cell(&mut self, position: Vec2, mass: f32) -> CellId {
        let team = if self.gamemode.uses_teams() {
            self.config
                .player
                .team
                .or_else(|| self.config.teams.roster.first().copied())
        } else {
            None
        };
        let id = self.world.next_id();
        let mut cell = Cell::new(
            id,
            PLAYER_OWNER,
            self.config.player.name.as_str(),
            position,
            mass,
            self.config.player.speed,
            Steering::Player,
        )
        .with_team(team);
        cell.check_border(self.world.width, self.world.height);
        self.world.add_cell(cell);
        debug!("Spawned player cell {} at {:.0},{:.0}", id, position.x, position.y);
        id
    }

    /// Spawn an autonomous cell with a pooled name at a random position.
    pub(crate) fn spawn_enemy(&mut self, team: Option<Team>) -> CellId {
        let position = self.world.random_position(&mut self.rng);
        let radius = self
            .rng
            .random_range(self.config.enemy.min_radius..=self.config.enemy.max_radius) as f32;
        self.place_enemy(position, radius * radius, team)
    }

    /// Place an autonomous cell by hand. It starts a new owner lineage.
    pub fn place_enemy(&mut self, position: Vec2, mass: f32, team: Option<Team>) -> CellId {
        let name = self.world.names.take(&mut self.rng);
        let steering = AiSteering::random(&mut self.rng);
        let heading = steering.desired;
        let owner = self.world.next_owner();
        let id = self.world.next_id();
        let mut cell = Cell::new(
            id,
            owner,
            name,
            position,
            mass,
            self.config.enemy.speed,
            Steering::Ai(steering),
        )
        .with_team(team);
        cell.heading = heading;
        cell.check_border(self.world.width, self.world.height);
        self.world.add_cell(cell);
        debug!(
            "Spawned '{}' (cell {}, owner {}, team {:?}) with {:.0} mass",
            name, id, owner, team, mass
        );
        id
    }

    /// Split one cell along `direction`, subject to mass, cooldown and the split cap.
    ///
    /// Returns the new cell.
    pub(crate) fn split_cell(&mut self, id: CellId, direction: Vec2, max_cells: usize) -> Option<CellId> {
        let split_mass = self.config.cells.split_mass;
        let split_cooldown = self.config.cells.split_cooldown;
        let eject_speed = self.config.cells.eject_speed;

        let cell = self.world.get_cell(id)?;
        if self.world.split_population(cell) >= max_cells {
            return None;
        }
        let child_id = self.world.next_id();
        let parent = self.world.get_cell_mut(id)?;
        if !parent.can_split(split_mass) {
            return None;
        }

        let direction = direction.normalize_or_zero();
        let half = parent.mass() / 2.0;
        let child_position = parent.position + direction * parent.radius();

        parent.set_mass(half);
        parent.velocity += direction * eject_speed * 0.1;
        parent.split_cooldown = split_cooldown;

        let steering = match &parent.steering {
            Steering::Player => Steering::Player,
            Steering::Ai(ai) => Steering::Ai(ai.clone()),
        };
        let mut child = Cell::new(
            child_id,
            parent.owner,
            parent.name.clone(),
            child_position,
            half,
            parent.speed,
            steering,
        )
        .with_team(parent.team);
        child.velocity = direction * eject_speed;
        child.heading = parent.heading;
        child.split_cooldown = split_cooldown;
        child.weapon = parent.weapon;
        child.weapon_cooldown = parent.weapon_cooldown;
        child.locked_direction = parent.locked_direction;

        let (width, height) = (self.world.width, self.world.height);
        child.check_border(width, height);
        debug!(
            "Cell {} '{}' split into {} ({:.1} mass each)",
            id, child.name, child_id, half
        );
        self.world.add_cell(child);
        Some(child_id)
    }

    /// Split every player cell toward the steering target.
    ///
    /// Returns the number of new cells.
    pub(crate) fn split_player(&mut self) -> usize {
        let max_cells = self.config.player.max_cells;
        let dead_zone = self.config.player.dead_zone;
        let target = self.player_target;

        // Children created by this command do not split again
        let ids = self.world.player_cells().to_vec();
        let mut created = 0;
        for id in ids {
            let Some(cell) = self.world.get_cell(id) else {
                continue;
            };
            let direction = match target {
                Some(t) => steer_toward(cell.position, t, dead_zone),
                None => cell.heading,
            };
            if self.split_cell(id, direction, max_cells).is_some() {
                created += 1;
            }
        }
        created
    }

    /// Return respawned pellets to the world and top up any shortfall.
    pub(crate) fn update_food(&mut self, dt: f32) {
        self.world.tick_respawns(dt, &mut self.rng);
        self.top_up_food();
    }

    fn top_up_food(&mut self) {
        let radius = self.config.food.radius;
        while self.world.food_total() < self.config.food.target {
            self.world.spawn_food(radius, &mut self.rng);
        }
    }

    /// Spawn whatever the mode asks for to keep its population.
    pub(crate) fn replenish_enemies(&mut self) {
        let plan = self.gamemode.replenish(&self.world, &self.config);
        for team in plan {
            self.spawn_enemy(team);
        }
    }
}
