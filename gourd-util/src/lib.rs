pub mod math;
pub mod text;

use serde::{Deserialize, Serialize};

/// The mode a player plays the game in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Players fight monsters, gather resources and take damage.
    Survival,
    /// Players can fly, break blocks instantly and place blocks without cost.
    Creative,
    /// Like survival, but players cannot place or break blocks.
    Adventure,
    /// Players fly through the world without interacting with it.
    Spectator,
}

impl GameMode {
    #[must_use]
    pub const fn is_survival_like(self) -> bool {
        matches!(self, Self::Survival | Self::Adventure)
    }
}
