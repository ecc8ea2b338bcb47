//! Weapon kinds.

use serde::{Deserialize, Serialize};

/// A weapon a cell can carry once it is heavy enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    Gun,
    Rpg,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 2] = [WeaponKind::Gun, WeaponKind::Rpg];

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Gun => "gun",
            WeaponKind::Rpg => "rpg",
        }
    }
}
