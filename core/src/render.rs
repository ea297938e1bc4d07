use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// How long hidden tiles stay visible before a level begins.
pub const PREVIEW_TIME: Duration = Duration::from_millis(2000);

/// Values for the header line, `None` leaves the field as it is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleUpdate {
    pub tiles: Option<CellCount>,
    pub trials: Option<Trials>,
    pub score: Option<Score>,
}

impl TitleUpdate {
    fn full(tiles: CellCount, trials: Trials, score: Score) -> Self {
        Self {
            tiles: Some(tiles),
            trials: Some(trials),
            score: Some(score),
        }
    }

    fn score(score: Score) -> Self {
        Self {
            score: Some(score),
            ..Default::default()
        }
    }
}

/// One instruction for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    ShowStartButton,
    HideStartButton,
    ShowTitle,
    HideTitle,
    WriteTitle(TitleUpdate),
    ShowBonus(Score),
    HideBonus,
    ResizeMatrix(GridSize),
    ShowMatrix,
    HideMatrix,
    RevealTiles { size: GridSize, tiles: Vec<Tile> },
    ClearTiles,
    /// Highlights the clicked cell as found or as a mistake.
    MarkTile {
        position: Coord2,
        size: GridSize,
        hit: bool,
    },
    ShowNextLevel {
        tiles: CellCount,
        bonus: Option<Score>,
    },
    HideNextLevel,
    ShowGameOver {
        score: Score,
        max_level: Level,
        completed_all_levels: bool,
    },
    HideGameOver,
    /// Input may be accepted again.
    Unblock,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStep {
    /// Offset from the moment the transition happened.
    pub at: Duration,
    pub directive: Directive,
}

/// Timed sequence of directives that animates one transition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPlan {
    steps: Vec<RenderStep>,
}

impl RenderPlan {
    pub fn for_state(state: &GameState) -> Self {
        let mut plan = PlanBuilder::default();
        match state.outcome() {
            Outcome::Init => plan_init(&mut plan),
            Outcome::Start => plan_start(&mut plan, state),
            Outcome::OpenTile => plan_open_tile(&mut plan, state),
            Outcome::LevelUp => plan_level_up(&mut plan, state),
            Outcome::GameOver => plan_game_over(&mut plan, state),
            Outcome::LevelZero | Outcome::LevelDown => plan_level_change(&mut plan, state),
            Outcome::Idle => {}
        }
        plan.push(Directive::Unblock);
        plan.finish()
    }

    pub fn steps(&self) -> &[RenderStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Offset of the last step.
    pub fn duration(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, |step| step.at)
    }
}

/// Appends steps at a moving offset.
#[derive(Default)]
struct PlanBuilder {
    at: Duration,
    steps: Vec<RenderStep>,
}

impl PlanBuilder {
    fn push(&mut self, directive: Directive) {
        self.steps.push(RenderStep {
            at: self.at,
            directive,
        });
    }

    fn wait(&mut self, millis: u64) {
        self.at += Duration::from_millis(millis);
    }

    fn preview(&mut self, size: GridSize, tiles: &TileSet) {
        self.push(Directive::RevealTiles {
            size,
            tiles: tiles.snapshot(),
        });
        self.at += PREVIEW_TIME;
        self.push(Directive::ClearTiles);
    }

    fn mark_last_click(&mut self, state: &GameState, size: GridSize, hit: bool) {
        if let Some(position) = state.last_click().filter(|&coords| size.contains(coords)) {
            self.push(Directive::MarkTile {
                position,
                size,
                hit,
            });
        }
    }

    fn finish(self) -> RenderPlan {
        RenderPlan { steps: self.steps }
    }
}

fn full_title(state: &GameState) -> Directive {
    Directive::WriteTitle(TitleUpdate::full(
        state.tile_count(),
        state.trials(),
        state.score(),
    ))
}

fn plan_init(plan: &mut PlanBuilder) {
    plan.push(Directive::ShowStartButton);
    plan.push(Directive::HideNextLevel);
    plan.push(Directive::HideGameOver);
    plan.push(Directive::HideTitle);
    plan.push(Directive::HideMatrix);
}

fn plan_start(plan: &mut PlanBuilder, state: &GameState) {
    plan.push(Directive::HideStartButton);
    plan.push(Directive::HideGameOver);
    plan.push(full_title(state));
    plan.push(Directive::ShowTitle);
    plan.push(Directive::ClearTiles);
    plan.push(Directive::ResizeMatrix(state.size()));
    plan.push(Directive::ShowMatrix);
    plan.wait(2000);
    plan.preview(state.size(), state.tiles());
}

fn plan_open_tile(plan: &mut PlanBuilder, state: &GameState) {
    plan.mark_last_click(state, state.size(), true);
    plan.push(Directive::WriteTitle(TitleUpdate::score(state.score())));
}

fn plan_level_up(plan: &mut PlanBuilder, state: &GameState) {
    let previous_size = state.previous_size().unwrap_or(state.size());

    plan.push(Directive::WriteTitle(TitleUpdate::score(
        state.score_before_bonus(),
    )));
    plan.mark_last_click(state, previous_size, true);
    plan.wait(1000);
    plan.push(Directive::ShowBonus(state.bonus()));
    plan.push(Directive::ShowNextLevel {
        tiles: state.tile_count(),
        bonus: Some(state.bonus()),
    });
    plan.push(Directive::HideMatrix);
    plan.wait(2000);
    plan.push(Directive::ClearTiles);
    plan.push(Directive::ResizeMatrix(state.size()));
    plan.push(full_title(state));
    plan.push(Directive::HideNextLevel);
    plan.push(Directive::HideBonus);
    plan.push(Directive::ShowMatrix);
    plan.wait(1000);
    plan.preview(state.size(), state.tiles());
}

fn plan_game_over(plan: &mut PlanBuilder, state: &GameState) {
    plan.push(Directive::WriteTitle(TitleUpdate::full(
        state.tile_count(),
        state.trials(),
        state.score_before_bonus(),
    )));
    plan.mark_last_click(state, state.size(), state.last_click_was_hit());
    plan.wait(700);
    if state.bonus() != 0 {
        plan.push(Directive::ShowBonus(state.bonus()));
    }
    plan.push(Directive::RevealTiles {
        size: state.size(),
        tiles: state.tiles().snapshot(),
    });
    plan.wait(2000);
    plan.push(Directive::WriteTitle(TitleUpdate::score(state.score())));
    plan.push(Directive::HideBonus);
    plan.push(Directive::HideMatrix);
    plan.push(Directive::ShowGameOver {
        score: state.score(),
        max_level: state.max_level(),
        completed_all_levels: state.completed_all_levels(),
    });
}

/// Miss that deals a new layout: shows where the tiles were, then previews the new ones.
fn plan_level_change(plan: &mut PlanBuilder, state: &GameState) {
    let previous_size = state.previous_size().unwrap_or(state.size());

    plan.mark_last_click(state, previous_size, false);
    plan.wait(500);
    if let Some(previous) = state.previous_tiles() {
        plan.push(Directive::RevealTiles {
            size: previous_size,
            tiles: previous.snapshot(),
        });
    }
    plan.wait(1500);
    plan.push(Directive::ShowNextLevel {
        tiles: state.tile_count(),
        bonus: None,
    });
    plan.push(Directive::HideMatrix);
    plan.wait(2000);
    plan.push(Directive::HideNextLevel);
    plan.push(full_title(state));
    plan.push(Directive::ClearTiles);
    plan.push(Directive::ResizeMatrix(state.size()));
    plan.push(Directive::ShowMatrix);
    plan.wait(1000);
    plan.preview(state.size(), state.tiles());
}

/// Plays a [`RenderPlan`] against elapsed time supplied by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequencer {
    plan: RenderPlan,
    next: usize,
}

impl Sequencer {
    pub fn new(plan: RenderPlan) -> Self {
        Self { plan, next: 0 }
    }

    /// Directives that became due since the last call, in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Directive> {
        let due = self.plan.steps[self.next..]
            .iter()
            .take_while(|step| step.at <= elapsed)
            .map(|step| step.directive.clone())
            .collect::<Vec<_>>();
        self.next += due.len();
        due
    }

    /// Time at which the next directive becomes due.
    pub fn next_due(&self) -> Option<Duration> {
        self.plan.steps.get(self.next).map(|step| step.at)
    }

    /// Drops every step that has not been emitted yet.
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            log::debug!(
                "Cancelled render plan with {} pending steps",
                self.plan.len() - self.next
            );
        }
        self.next = self.plan.len();
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.plan.len()
    }
}
