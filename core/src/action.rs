use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::*;

/// Cell a click refers to, either directly or as a row-major index into the current grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    Cell(Coord2),
    Index(usize),
    /// Coordinates too large for any grid.
    Outside,
}

impl ClickTarget {
    /// Resolves the target against the grid the click was made on.
    pub fn resolve(self, size: GridSize) -> Option<Coord2> {
        match self {
            Self::Cell(coords) => Some(coords),
            Self::Index(index) => size.decode_index(index),
            Self::Outside => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Start,
    Click(ClickTarget),
    NewGame,
}

impl Action {
    pub const fn click(row: Coord, col: Coord) -> Self {
        Self::Click(ClickTarget::Cell((row, col)))
    }

    pub const fn click_index(index: usize) -> Self {
        Self::Click(ClickTarget::Index(index))
    }
}

/// Action as sent by the presentation layer, before validation.
///
/// A click uses `row`/`col` when both are present and non-negative, and falls back to `index`
/// otherwise. Coordinates beyond the coordinate range land outside the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAction {
    pub kind: String,
    #[serde(default)]
    pub row: Option<i64>,
    #[serde(default)]
    pub col: Option<i64>,
    #[serde(default)]
    pub index: Option<i64>,
}

impl RawAction {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| GameError::MalformedInput(err.to_string()))
    }

    fn click_target(&self) -> Result<ClickTarget> {
        if let (Some(row), Some(col)) = (self.row, self.col) {
            if row >= 0 && col >= 0 {
                return Ok(match (Coord::try_from(row), Coord::try_from(col)) {
                    (Ok(row), Ok(col)) => ClickTarget::Cell((row, col)),
                    _ => ClickTarget::Outside,
                });
            }
        }

        match self.index {
            Some(index) => index
                .try_into()
                .map(ClickTarget::Index)
                .map_err(|_| GameError::InvalidArgument("index must be a non-negative integer")),
            None => Err(GameError::InvalidArgument("click needs a row and col or an index")),
        }
    }
}

impl TryFrom<&RawAction> for Action {
    type Error = GameError;

    fn try_from(raw: &RawAction) -> Result<Self> {
        match raw.kind.as_str() {
            "start" => Ok(Action::Start),
            "click" => raw.click_target().map(Action::Click),
            "new game" | "new-game" | "new_game" => Ok(Action::NewGame),
            other => Err(GameError::UnknownAction(other.into())),
        }
    }
}

impl TryFrom<RawAction> for Action {
    type Error = GameError;

    fn try_from(raw: RawAction) -> Result<Self> {
        Action::try_from(&raw)
    }
}
