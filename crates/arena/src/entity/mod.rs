//! Simulation entities.
//!
//! Cells (player and autonomous), food pellets and bullets.

mod bullet;
mod cell;
mod food;
mod weapon;

pub use bullet::{Bullet, BulletId};
pub use cell::{mass_to_radius, Cell, CellId, OwnerId, Steering, Team, PLAYER_OWNER};
pub use food::Food;
pub use weapon::WeaponKind;
