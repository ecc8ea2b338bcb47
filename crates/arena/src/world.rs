//! World state management.
//!
//! Owns every live cell, food pellet and bullet, plus the team and owner
//! rosters that must stay in step with the cell store.

use crate::entity::{Bullet, BulletId, Cell, CellId, Food, OwnerId, Team, PLAYER_OWNER};
use fixedbitset::FixedBitSet;
use glam::Vec2;
use rand::Rng;
use std::collections::HashMap;

/// Names handed out to autonomous cells.
const COOL_NAMES: [&str; 26] = [
    "Shadow", "Ghost", "Blaze", "Storm", "Viper", "Phantom", "Ranger",
    "Hunter", "Predator", "Maverick", "Titan", "Zephyr", "Nova", "Falcon",
    "Spectre", "Vortex", "Blizzard", "Phoenix", "Nebula", "Inferno",
    "Cyclone", "Kraken", "Bullet", "Reaper", "Serpent", "Golem",
];

/// Pool of unused names. Refilled once every name has been handed out.
#[derive(Debug, Clone)]
pub struct NamePool {
    available: Vec<&'static str>,
}

impl NamePool {
    pub fn new() -> Self {
        Self {
            available: COOL_NAMES.to_vec(),
        }
    }

    /// Take a random unused name.
    pub fn take<R: Rng>(&mut self, rng: &mut R) -> &'static str {
        if self.available.is_empty() {
            self.refill();
        }
        let idx = rng.random_range(0..self.available.len());
        // Removal keeps the remaining order stable for replays.
        self.available.remove(idx)
    }

    pub fn refill(&mut self) {
        self.available.clear();
        self.available.extend_from_slice(&COOL_NAMES);
    }

    pub fn remaining(&self) -> usize {
        self.available.len()
    }
}

impl Default for NamePool {
    fn default() -> Self {
        Self::new()
    }
}

/// The game world containing all entities.
#[derive(Debug)]
pub struct World {
    pub width: f32,
    pub height: f32,

    next_cell_id: CellId,
    /// Owner 0 is the player, lineages start at 1.
    next_owner_id: OwnerId,
    next_bullet_id: BulletId,

    /// All cells by ID.
    cells: HashMap<CellId, Cell>,
    /// Live cell IDs in iteration order.
    cell_ids: Vec<CellId>,
    /// Position tracking for O(1) removal
    cell_pos: HashMap<CellId, usize>,

    /// Cells per team, indexed by [`Team::index`].
    team_cells: [Vec<CellId>; 4],
    /// Cells per owner lineage. Owners with no live cell are dropped.
    owner_cells: HashMap<OwnerId, Vec<CellId>>,

    /// Food currently in the world.
    pub food: Vec<Food>,
    /// Eaten food waiting to re-enter the world.
    pub respawning: Vec<Food>,
    pub bullets: Vec<Bullet>,

    pub names: NamePool,
}

impl World {
    /// Create an empty world of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            next_cell_id: 1,
            next_owner_id: PLAYER_OWNER + 1,
            next_bullet_id: 1,
            cells: HashMap::with_capacity(128),
            cell_ids: Vec::with_capacity(128),
            cell_pos: HashMap::with_capacity(128),
            team_cells: Default::default(),
            owner_cells: HashMap::with_capacity(64),
            food: Vec::with_capacity(256),
            respawning: Vec::with_capacity(256),
            bullets: Vec::with_capacity(64),
            names: NamePool::new(),
        }
    }

    /// Drop every entity and restart ID allocation and the name pool.
    pub fn clear(&mut self) {
        *self = Self::new(self.width, self.height);
    }

    /// Get the next cell ID.
    pub fn next_id(&mut self) -> CellId {
        let id = self.next_cell_id;
        self.next_cell_id = self.next_cell_id.wrapping_add(1).max(1);
        id
    }

    /// Start a new owner lineage.
    pub fn next_owner(&mut self) -> OwnerId {
        let owner = self.next_owner_id;
        self.next_owner_id = self.next_owner_id.wrapping_add(1).max(PLAYER_OWNER + 1);
        owner
    }

    #[inline]
    pub fn get_cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(&id)
    }

    #[inline]
    pub fn get_cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(&id)
    }

    #[inline]
    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains_key(&id)
    }

    /// Add a cell and register it in its team and owner rosters.
    pub fn add_cell(&mut self, cell: Cell) -> CellId {
        let id = cell.id;
        if let Some(team) = cell.team {
            self.team_cells[team.index()].push(id);
        }
        self.owner_cells.entry(cell.owner).or_default().push(id);
        self.cell_pos.insert(id, self.cell_ids.len());
        self.cell_ids.push(id);
        self.cells.insert(id, cell);
        id
    }

    /// Remove a cell from the store and every roster.
    ///
    /// This is the only way a cell leaves the world.
    pub fn remove_cell(&mut self, id: CellId) -> Option<Cell> {
        let cell = self.cells.remove(&id)?;

        if let Some(pos) = self.cell_pos.remove(&id) {
            let last_pos = self.cell_ids.len() - 1;
            if pos != last_pos {
                let swapped_id = self.cell_ids[last_pos];
                self.cell_ids.swap(pos, last_pos);
                self.cell_pos.insert(swapped_id, pos);
            }
            self.cell_ids.pop();
        }

        if let Some(team) = cell.team {
            let roster = &mut self.team_cells[team.index()];
            if let Some(pos) = roster.iter().position(|&c| c == id) {
                roster.remove(pos);
            }
        }

        if let Some(roster) = self.owner_cells.get_mut(&cell.owner) {
            if let Some(pos) = roster.iter().position(|&c| c == id) {
                roster.remove(pos);
            }
            if roster.is_empty() {
                self.owner_cells.remove(&cell.owner);
            }
        }

        Some(cell)
    }

    /// Live cell IDs in iteration order.
    #[inline]
    pub fn cell_ids(&self) -> &[CellId] {
        &self.cell_ids
    }

    /// Iterate live cells in iteration order.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cell_ids.iter().filter_map(|id| self.cells.get(id))
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Live cells of one owner lineage.
    pub fn owner_cells(&self, owner: OwnerId) -> &[CellId] {
        self.owner_cells.get(&owner).map_or(&[], Vec::as_slice)
    }

    #[inline]
    pub fn owner_count(&self, owner: OwnerId) -> usize {
        self.owner_cells(owner).len()
    }

    /// Number of owner lineages with at least one live cell.
    #[inline]
    pub fn live_owners(&self) -> usize {
        self.owner_cells.len()
    }

    #[inline]
    pub fn player_cells(&self) -> &[CellId] {
        self.owner_cells(PLAYER_OWNER)
    }

    /// Live cells on one team.
    #[inline]
    pub fn team_cells(&self, team: Team) -> &[CellId] {
        &self.team_cells[team.index()]
    }

    /// Autonomous cells currently alive.
    #[inline]
    pub fn enemy_count(&self) -> usize {
        self.cells.len() - self.owner_count(PLAYER_OWNER)
    }

    /// Autonomous cells currently alive on one team.
    pub fn team_enemy_count(&self, team: Team) -> usize {
        self.team_cells(team)
            .iter()
            .filter(|id| self.cells.get(id).is_some_and(|c| c.owner != PLAYER_OWNER))
            .count()
    }

    /// Cells counted against `cell`'s split cap.
    ///
    /// Teamed autonomous cells share one cap per team. The player and
    /// teamless autonomous cells are capped per owner lineage.
    pub fn split_population(&self, cell: &Cell) -> usize {
        match cell.team {
            Some(team) if cell.owner != PLAYER_OWNER => self.team_enemy_count(team),
            _ => self.owner_count(cell.owner),
        }
    }

    /// Total mass of the player's live cells.
    pub fn player_mass(&self) -> f32 {
        self.player_cells()
            .iter()
            .filter_map(|id| self.cells.get(id))
            .map(Cell::mass)
            .sum()
    }

    /// A uniformly random point inside the world.
    #[inline]
    pub fn random_position<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(0.0..=self.width),
            rng.random_range(0.0..=self.height),
        )
    }

    /// World center.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Active plus respawning food.
    #[inline]
    pub fn food_total(&self) -> usize {
        self.food.len() + self.respawning.len()
    }

    /// Place a new pellet at a random position.
    pub fn spawn_food<R: Rng>(&mut self, radius: f32, rng: &mut R) {
        let position = self.random_position(rng);
        self.food.push(Food::new(position, radius));
    }

    /// Move eaten pellets (by active-list index) to the respawn queue.
    pub fn recycle_food(&mut self, eaten: &FixedBitSet, delay: f32) {
        // Descending order keeps the remaining indices valid across swap_remove.
        let mut indices: Vec<usize> = eaten.ones().filter(|&i| i < self.food.len()).collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        for idx in indices {
            let mut food = self.food.swap_remove(idx);
            food.schedule_respawn(delay);
            self.respawning.push(food);
        }
    }

    /// Count respawn timers down and return ready pellets to the world at new positions.
    ///
    /// Returns the number of pellets that re-entered.
    pub fn tick_respawns<R: Rng>(&mut self, dt: f32, rng: &mut R) -> usize {
        let mut returned = 0;
        let mut i = 0;
        while i < self.respawning.len() {
            if self.respawning[i].tick_respawn(dt) {
                let mut food = self.respawning.remove(i);
                food.position = self.random_position(rng);
                self.food.push(food);
                returned += 1;
            } else {
                i += 1;
            }
        }
        returned
    }

    /// Add a bullet, assigning its ID.
    pub fn add_bullet(&mut self, mut bullet: Bullet) -> BulletId {
        let id = self.next_bullet_id;
        self.next_bullet_id = self.next_bullet_id.wrapping_add(1).max(1);
        bullet.id = id;
        self.bullets.push(bullet);
        id
    }
}
