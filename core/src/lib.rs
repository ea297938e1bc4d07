#![no_std]

extern crate alloc;

use alloc::string::ToString;
use serde::{Deserialize, Serialize};

pub use action::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use render::*;
pub use store::*;
pub use tile::*;
pub use tile_set::*;
pub use types::*;

mod action;
mod engine;
mod error;
mod generator;
mod render;
mod store;
mod tile;
mod tile_set;
mod types;

/// Score and level counters.
pub type Score = u32;
pub type Level = u16;
pub type Trials = u8;

/// Upper bound on the attempt budget.
pub const MAX_TRIALS: Trials = 15;

/// Fixed constants of a game session, overridable from JSON.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub initial_size: GridSize,
    pub initial_tiles: CellCount,
    pub initial_trials: Trials,
    pub tile_score: Score,
    pub level_bonus: Score,
    /// Reaching this level counts as having beaten the game.
    pub final_level: Level,
}

impl GameRules {
    pub const fn classic() -> Self {
        Self {
            initial_size: GridSize::new(3, 3),
            initial_tiles: 3,
            initial_trials: MAX_TRIALS,
            tile_score: 10,
            level_bonus: 5,
            final_level: 15,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Self =
            serde_json::from_str(json).map_err(|err| GameError::MalformedInput(err.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<()> {
        let GridSize { rows, cols } = self.initial_size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidArgument("initial grid must not be empty"));
        }
        // every cleared level adds a row or a column
        if rows.checked_add(MAX_TRIALS).is_none() || cols.checked_add(MAX_TRIALS).is_none() {
            return Err(GameError::InvalidArgument("initial grid too large to grow"));
        }
        if self.initial_tiles > self.initial_size.area() {
            return Err(GameError::InvalidArgument("initial tiles exceed the grid area"));
        }
        if self.initial_trials == 0 || self.initial_trials > MAX_TRIALS {
            return Err(GameError::InvalidArgument("initial trials out of range"));
        }
        Ok(())
    }

    pub const fn bonus_for(&self, level: Level) -> Score {
        self.level_bonus.saturating_mul(level as Score)
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::classic()
    }
}

/// Rendering directive selected by the last transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// A level begins, tiles are previewed.
    Start,
    /// Back to the title screen.
    Init,
    OpenTile,
    LevelUp,
    GameOver,
    /// Miss on the first level, same grid with a fresh layout.
    LevelZero,
    LevelDown,
    /// Nothing to animate.
    Idle,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        use Outcome::*;
        match self {
            Start => "start",
            Init => "init",
            OpenTile => "open-tile",
            LevelUp => "level-up",
            GameOver => "game-over",
            LevelZero => "level-zero",
            LevelDown => "level-down",
            Idle => "idle",
        }
    }
}

impl core::fmt::Display for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
