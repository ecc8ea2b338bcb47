//! Game state and the per-tick pipeline.

use super::{MatchState, PlayerCommands, TeamScores, TickReport};
use crate::config::Config;
use crate::entity::{Cell, CellId, PLAYER_OWNER};
use crate::error::ConfigError;
use crate::gamemodes::{get_gamemode, GameMode, SafeZone};
use crate::spatial::SpatialGrid;
use crate::world::World;
use crate::SimRng;
use fixedbitset::FixedBitSet;
use glam::Vec2;
use rand::SeedableRng;
use tracing::{debug, info};

/// Log a population summary every this many ticks.
const SUMMARY_INTERVAL: u64 = 400;

/// A running simulation session.
pub struct GameState {
    pub(crate) config: Config,
    pub(crate) world: World,
    pub(crate) gamemode: Box<dyn GameMode>,
    pub(crate) rng: SimRng,
    pub(crate) state: MatchState,
    pub(crate) team_scores: TeamScores,
    pub(crate) tick_count: u64,
    /// Last steering target sent by the player.
    pub(crate) player_target: Option<Vec2>,

    // Per-tick indexes, valid between rebuilds only
    pub(crate) cell_grid: SpatialGrid<CellId>,
    pub(crate) food_grid: SpatialGrid<usize>,
    pub(crate) bullet_grid: SpatialGrid<usize>,

    // Reusable buffers
    pub(crate) resolved_cells: FixedBitSet,
    pub(crate) eaten_food: FixedBitSet,
    pub(crate) spent_bullets: FixedBitSet,

    /// Cells eliminated during the current tick.
    pub(crate) eliminated_this_tick: usize,
}

impl GameState {
    /// Start a session and spawn the mode's initial population.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let mut game = Self::empty(config)?;
        game.spawn_population();
        info!(
            "{} session started: {}x{} world, {} cells, {} food (seed {:#x})",
            game.gamemode.name(),
            game.world.width,
            game.world.height,
            game.world.cell_count(),
            game.world.food.len(),
            game.config.session.seed
        );
        Ok(game)
    }

    /// Start a session with no cells and no food. The host places entities itself.
    pub fn empty(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let (width, height) = (config.world.width, config.world.height);
        let bucket = config.session.grid_size;
        let world = World::new(width, height);
        let mut gamemode = get_gamemode(config.session.mode);
        gamemode.on_start(&world, &config);

        Ok(Self {
            rng: SimRng::seed_from_u64(config.session.seed),
            gamemode,
            state: MatchState::Running,
            team_scores: TeamScores::default(),
            tick_count: 0,
            player_target: None,
            cell_grid: SpatialGrid::new(width, height, bucket),
            food_grid: SpatialGrid::new(width, height, bucket),
            bullet_grid: SpatialGrid::new(width, height, bucket),
            resolved_cells: FixedBitSet::with_capacity(256),
            eaten_food: FixedBitSet::with_capacity(config.food.target),
            spent_bullets: FixedBitSet::with_capacity(64),
            eliminated_this_tick: 0,
            world,
            config,
        })
    }

    /// Full reset: scores, zone, names and population. The random stream carries on.
    pub fn reset(&mut self) {
        self.world.clear();
        self.gamemode = get_gamemode(self.config.session.mode);
        self.gamemode.on_start(&self.world, &self.config);
        self.state = MatchState::Running;
        self.team_scores = TeamScores::default();
        self.tick_count = 0;
        self.player_target = None;
        self.cell_grid.clear();
        self.food_grid.clear();
        self.bullet_grid.clear();
        self.spawn_population();
        info!(
            "{} session reset: {} cells, {} food",
            self.gamemode.name(),
            self.world.cell_count(),
            self.world.food.len()
        );
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// The commands are taken and cleared. A non-positive `dt` or a finished
    /// match consumes them without advancing anything.
    pub fn tick(&mut self, dt: f32, commands: &mut PlayerCommands) -> TickReport {
        let commands = std::mem::take(commands);
        let mut report = TickReport::new(self.state);
        if self.state.is_terminal() || !(dt > 0.0) {
            return report;
        }

        self.tick_count += 1;
        self.eliminated_this_tick = 0;

        // Player commands
        if let Some(target) = commands.target {
            self.player_target = Some(target);
        }
        if commands.toggle_lock {
            report.lock_toggled = self.toggle_lock();
        }
        if let Some(kind) = commands.choose_weapon {
            if self.choose_weapon(kind) {
                report.weapon_chosen = Some(kind);
            }
        }
        if commands.split {
            report.split_cells = self.split_player();
        }
        if let Some(aim) = commands.shoot_at {
            report.shots_fired = self.player_shoot(aim);
        }

        // AI intents, then movement
        self.update_bots();
        self.update_movement(dt);

        self.rebuild_grids();

        // Collisions
        self.process_food();
        self.process_absorption();
        self.process_merges();
        self.process_bullets();

        // Mode rules (safe zone, clock)
        let depleted = self.gamemode.on_tick(&mut self.world, &self.config, dt, &mut self.rng);
        for id in depleted {
            self.eliminate(id);
        }

        // Lifecycle
        self.update_food(dt);
        self.replenish_enemies();

        self.clamp_cells();
        self.bullet_grid
            .rebuild(self.world.bullets.iter().enumerate().map(|(i, b)| (b.position, i)));

        if let Some(outcome) = self.gamemode.outcome(&self.world) {
            self.set_state(outcome);
        }

        if self.tick_count % SUMMARY_INTERVAL == 0 {
            debug!(
                "Tick #{}: {} cells ({} player, {} owners), {} food (+{} respawning), {} bullets, state {:?}",
                self.tick_count,
                self.world.cell_count(),
                self.world.player_cells().len(),
                self.world.live_owners(),
                self.world.food.len(),
                self.world.respawning.len(),
                self.world.bullets.len(),
                self.state
            );
        }

        report.state = self.state;
        report.eliminated = self.eliminated_this_tick;
        report
    }

    /// Re-bucket cells and food at their post-movement positions.
    fn rebuild_grids(&mut self) {
        let world = &self.world;
        self.cell_grid
            .rebuild(world.iter_cells().map(|cell| (cell.position, cell.id)));
        self.food_grid
            .rebuild(world.food.iter().enumerate().map(|(i, food)| (food.position, i)));
    }

    /// Keep every cell inside the world after this tick's growth and spawns.
    fn clamp_cells(&mut self) {
        let (width, height) = (self.world.width, self.world.height);
        let ids = self.world.cell_ids().to_vec();
        for id in ids {
            if let Some(cell) = self.world.get_cell_mut(id) {
                cell.check_border(width, height);
            }
        }
    }

    /// Remove a cell through the single elimination path.
    pub(crate) fn eliminate(&mut self, id: CellId) -> Option<Cell> {
        let cell = self.world.remove_cell(id)?;
        self.eliminated_this_tick += 1;
        debug!(
            "Cell {} '{}' (owner {}) eliminated at mass {:.1}",
            cell.id,
            cell.name,
            cell.owner,
            cell.mass()
        );

        if cell.owner == PLAYER_OWNER
            && self.world.player_cells().is_empty()
            && self.gamemode.ends_on_elimination()
        {
            self.set_state(MatchState::Eliminated);
        }
        Some(cell)
    }

    pub(crate) fn set_state(&mut self, state: MatchState) {
        if self.state == state || self.state.is_terminal() {
            return;
        }
        info!(
            "{} match over after {} ticks: {:?}",
            self.gamemode.name(),
            self.tick_count,
            state
        );
        self.state = state;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct store access for hosts and tests that arrange entities by hand.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn mode(&self) -> &dyn GameMode {
        self.gamemode.as_ref()
    }

    /// Mutable safe zone, in battle royale.
    pub fn zone_mut(&mut self) -> Option<&mut SafeZone> {
        self.gamemode.safe_zone_mut()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("mode", &self.gamemode.name())
            .field("state", &self.state)
            .field("tick_count", &self.tick_count)
            .field("cells", &self.world.cell_count())
            .field("food", &self.world.food.len())
            .field("bullets", &self.world.bullets.len())
            .finish()
    }
}
