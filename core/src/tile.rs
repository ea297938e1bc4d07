use serde::{Deserialize, Serialize};

use crate::Coord2;

/// Visibility of a hidden tile. Only ever moves from `Closed` to `Open`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileStatus {
    Closed,
    Open,
}

impl Default for TileStatus {
    fn default() -> Self {
        Self::Closed
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub position: Coord2,
    pub status: TileStatus,
}

impl Tile {
    pub const fn closed(position: Coord2) -> Self {
        Self {
            position,
            status: TileStatus::Closed,
        }
    }
}
