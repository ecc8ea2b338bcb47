use super::{GameMode, ModeKind};
use crate::config::Config;
use crate::entity::Team;
use crate::world::World;

/// Free-for-all with a constant autonomous population.
pub struct Classic;

impl Classic {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Classic {
    fn default() -> Self {
        Self::new()
    }
}

impl GameMode for Classic {
    fn name(&self) -> &str {
        "Classic"
    }

    fn kind(&self) -> ModeKind {
        ModeKind::Classic
    }

    fn initial_enemies(&self, config: &Config) -> usize {
        config.enemy.target
    }

    fn replenish(&self, world: &World, config: &Config) -> Vec<Option<Team>> {
        vec![None; config.enemy.target.saturating_sub(world.enemy_count())]
    }
}
