//! Player input and per-tick results.

use super::MatchState;
use crate::entity::WeaponKind;
use glam::Vec2;

/// Commands from the human player for one tick.
///
/// [`super::GameState::tick`] takes the commands and leaves the default in their place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerCommands {
    /// World point the player steers toward. Remembered until a new one arrives.
    pub target: Option<Vec2>,
    pub split: bool,
    pub toggle_lock: bool,
    /// Fire every armed player cell toward this point.
    pub shoot_at: Option<Vec2>,
    pub choose_weapon: Option<WeaponKind>,
}

impl PlayerCommands {
    pub fn steer(target: Vec2) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub state: MatchState,
    /// New player cells created by a split command.
    pub split_cells: usize,
    /// Bullets fired by the player.
    pub shots_fired: usize,
    /// New lock state when a toggle took effect.
    pub lock_toggled: Option<bool>,
    /// Weapon bought with a `choose_weapon` command.
    pub weapon_chosen: Option<WeaponKind>,
    /// Cells eliminated this tick (absorbed, shot, or caught by the zone).
    pub eliminated: usize,
}

impl TickReport {
    pub fn new(state: MatchState) -> Self {
        Self {
            state,
            split_cells: 0,
            shots_fired: 0,
            lock_toggled: None,
            weapon_chosen: None,
            eliminated: 0,
        }
    }
}
