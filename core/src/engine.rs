use serde::{Deserialize, Serialize};

use crate::*;

/// Everything the game knows between two actions.
///
/// Transitions never mutate a state in place: [`GameState::apply`] returns a new value, and the
/// previous grid size and tile set are kept as owned snapshots so a renderer can animate from the
/// old configuration to the new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GameStateRepr")]
pub struct GameState {
    rules: GameRules,
    size: GridSize,
    tile_count: CellCount,
    level: Level,
    max_level: Level,
    trials: Trials,
    score: Score,
    open_tiles: CellCount,
    bonus: Score,
    tiles: TileSet,
    last_action: Option<Action>,
    last_click: Option<Coord2>,
    last_click_hit: bool,
    previous_size: Option<GridSize>,
    previous_tiles: Option<TileSet>,
    outcome: Outcome,
    seed: u64,
}

/// Serialized form of [`GameState`], checked before the reducer may see it.
#[derive(Deserialize)]
struct GameStateRepr {
    rules: GameRules,
    size: GridSize,
    tile_count: CellCount,
    level: Level,
    max_level: Level,
    trials: Trials,
    score: Score,
    open_tiles: CellCount,
    bonus: Score,
    tiles: TileSet,
    last_action: Option<Action>,
    last_click: Option<Coord2>,
    last_click_hit: bool,
    previous_size: Option<GridSize>,
    previous_tiles: Option<TileSet>,
    outcome: Outcome,
    seed: u64,
}

impl TryFrom<GameStateRepr> for GameState {
    type Error = GameError;

    fn try_from(repr: GameStateRepr) -> Result<Self> {
        let state = Self {
            rules: repr.rules,
            size: repr.size,
            tile_count: repr.tile_count,
            level: repr.level,
            max_level: repr.max_level,
            trials: repr.trials,
            score: repr.score,
            open_tiles: repr.open_tiles,
            bonus: repr.bonus,
            tiles: repr.tiles,
            last_action: repr.last_action,
            last_click: repr.last_click,
            last_click_hit: repr.last_click_hit,
            previous_size: repr.previous_size,
            previous_tiles: repr.previous_tiles,
            outcome: repr.outcome,
            seed: repr.seed,
        };
        state.validate()?;
        Ok(state)
    }
}

fn ensure(condition: bool, message: &'static str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(GameError::InvalidArgument(message))
    }
}

impl GameState {
    pub fn new(rules: GameRules, seed: u64) -> Result<Self> {
        rules.validate()?;
        Ok(Self::with_valid_rules(rules, seed))
    }

    fn with_valid_rules(rules: GameRules, seed: u64) -> Self {
        let mut state = Self {
            rules,
            size: rules.initial_size,
            tile_count: rules.initial_tiles,
            level: 0,
            max_level: 0,
            trials: rules.initial_trials,
            score: 0,
            open_tiles: 0,
            bonus: 0,
            tiles: TileSet::empty(rules.initial_size),
            last_action: None,
            last_click: None,
            last_click_hit: false,
            previous_size: None,
            previous_tiles: None,
            outcome: Outcome::Init,
            seed,
        };
        state.deal();
        state
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn rows(&self) -> Coord {
        self.size.rows
    }

    pub fn cols(&self) -> Coord {
        self.size.cols
    }

    pub fn tile_count(&self) -> CellCount {
        self.tile_count
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn max_level(&self) -> Level {
        self.max_level
    }

    pub fn trials(&self) -> Trials {
        self.trials
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn open_tiles(&self) -> CellCount {
        self.open_tiles
    }

    pub fn bonus(&self) -> Score {
        self.bonus
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Cell of the last processed click, decoded against the grid it was made on.
    pub fn last_click(&self) -> Option<Coord2> {
        self.last_click
    }

    pub fn last_click_was_hit(&self) -> bool {
        self.last_click_hit
    }

    pub fn previous_size(&self) -> Option<GridSize> {
        self.previous_size
    }

    pub fn previous_tiles(&self) -> Option<&TileSet> {
        self.previous_tiles.as_ref()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.trials == 0
    }

    pub fn completed_all_levels(&self) -> bool {
        self.max_level >= self.rules.final_level
    }

    /// Score to display while the bonus of the last cleared level is still being animated.
    pub fn score_before_bonus(&self) -> Score {
        self.score.saturating_sub(self.bonus)
    }

    /// Computes the state that follows `action`. Never fails for a decoded action.
    pub fn apply(&self, action: Action) -> GameState {
        let mut next = self.clone();
        next.step(action);
        log::debug!(
            "{:?} -> {} (level {}, trials {}, score {})",
            action,
            next.outcome,
            next.level,
            next.trials,
            next.score
        );
        next
    }

    /// Decodes an action from the presentation layer and applies it.
    pub fn apply_raw(&self, raw: &RawAction) -> Result<GameState> {
        let action = Action::try_from(raw).inspect_err(|err| {
            log::warn!("Rejected action {:?}: {}", raw.kind, err);
        })?;
        Ok(self.apply(action))
    }

    /// Checks the invariants every transition relies on.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        let GridSize { rows, cols } = self.size;
        ensure(self.tiles.size() == self.size, "tile grid does not match the grid size")?;
        ensure(self.tiles.len() == self.tile_count, "tile count does not match the tiles")?;
        ensure(self.tile_count >= self.level, "tile count below the level")?;
        ensure(self.open_tiles <= self.tile_count, "more open tiles than tiles")?;
        ensure(self.open_tiles == self.tiles.open_count(), "open tiles do not match the tiles")?;
        ensure(self.trials <= MAX_TRIALS, "trials out of range")?;
        ensure(self.max_level >= self.level, "max level below the level")?;
        ensure(
            self.level <= Level::MAX - Level::from(MAX_TRIALS),
            "level out of range",
        )?;
        ensure(
            rows.checked_add(self.trials).is_some() && cols.checked_add(self.trials).is_some(),
            "grid too large to grow",
        )
    }

    fn step(&mut self, action: Action) {
        match action {
            Action::Start => {
                self.reset();
                self.outcome = Outcome::Start;
                log::info!("Game started");
            }
            Action::NewGame => {
                self.reset();
                self.outcome = Outcome::Init;
            }
            Action::Click(target) => {
                // decode before anything below can resize the grid
                let coords = target.resolve(self.size);
                self.click(action, coords);
            }
        }
        if !matches!(action, Action::Click(_)) {
            self.last_action = Some(action);
        }
    }

    fn click(&mut self, action: Action, coords: Option<Coord2>) {
        if self.trials == 0 {
            log::warn!("Click ignored, no trials left");
            self.outcome = Outcome::Idle;
            return;
        }

        self.last_action = Some(action);
        self.last_click = coords;

        let tile = coords.and_then(|coords| self.tiles.tile_at(coords));
        self.last_click_hit = tile.is_some();
        match tile {
            Some(Tile {
                position,
                status: TileStatus::Closed,
            }) => self.hit(position),
            Some(_) => self.outcome = Outcome::Idle,
            None => self.miss(),
        }
    }

    fn hit(&mut self, coords: Coord2) {
        self.tiles.open(coords);
        self.score = self.score.saturating_add(self.rules.tile_score);
        self.open_tiles += 1;

        if self.open_tiles < self.tile_count {
            self.outcome = Outcome::OpenTile;
            return;
        }

        self.trials = self.trials.saturating_sub(1);
        self.level += 1;
        self.max_level = self.max_level.max(self.level);
        self.bonus = self.rules.bonus_for(self.level);
        self.score = self.score.saturating_add(self.bonus);

        if self.trials == 0 {
            log::info!("Game over after clearing level {}", self.level);
            self.outcome = Outcome::GameOver;
            return;
        }

        self.open_tiles = 0;
        self.tile_count += 1;
        self.previous_size = Some(self.size);
        self.size = self.size.grown();
        self.previous_tiles = Some(self.deal());
        log::info!("Level up to {}", self.level);
        self.outcome = Outcome::LevelUp;
    }

    fn miss(&mut self) {
        self.trials = self.trials.saturating_sub(1);
        self.bonus = 0;

        if self.trials == 0 {
            log::info!("Game over on a miss at level {}", self.level);
            self.outcome = Outcome::GameOver;
            return;
        }

        self.open_tiles = 0;
        self.previous_size = Some(self.size);
        if self.level == 0 {
            self.previous_tiles = Some(self.deal());
            self.outcome = Outcome::LevelZero;
        } else {
            self.level -= 1;
            self.tile_count = self.tile_count.saturating_sub(1);
            self.size = self.size.shrunk();
            self.previous_tiles = Some(self.deal());
            log::info!("Level down to {}", self.level);
            self.outcome = Outcome::LevelDown;
        }
    }

    fn reset(&mut self) {
        let rules = self.rules;
        self.size = rules.initial_size;
        self.tile_count = rules.initial_tiles;
        self.level = 0;
        self.max_level = 0;
        self.trials = rules.initial_trials;
        self.score = 0;
        self.open_tiles = 0;
        self.bonus = 0;
        self.last_action = None;
        self.last_click = None;
        self.last_click_hit = false;
        self.previous_size = None;
        self.previous_tiles = None;
        self.deal();
    }

    /// Deals a fresh tile set for the current size and count, returning the replaced one.
    fn deal(&mut self) -> TileSet {
        let config = TileSetConfig::new(self.tile_count, self.size).unwrap_or_else(|_| {
            log::warn!("Tile set already full, dealing {} tiles", self.size.area());
            self.tile_count = self.size.area();
            TileSetConfig {
                size: self.size,
                tiles: self.tile_count,
            }
        });
        let (tiles, next_seed) = RandomTileSetGenerator::new(self.seed).generate_with_next_seed(config);
        self.seed = next_seed;
        core::mem::replace(&mut self.tiles, tiles)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_valid_rules(GameRules::default(), 0)
    }
}

/// Reducer form of [`GameState::apply`].
pub fn apply(state: &GameState, action: Action) -> GameState {
    state.apply(action)
}
