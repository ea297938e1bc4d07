use crate::*;

/// Owner of the single live [`GameState`], the only place it gets replaced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Store {
    state: GameState,
}

impl Store {
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    pub fn with_rules(rules: GameRules, seed: u64) -> Result<Self> {
        GameState::new(rules, seed).map(Self::new)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn dispatch(&mut self, action: Action) -> &GameState {
        self.state = self.state.apply(action);
        &self.state
    }

    /// Rejected actions leave the current state in place.
    pub fn dispatch_raw(&mut self, raw: &RawAction) -> Result<&GameState> {
        self.state = self.state.apply_raw(raw)?;
        Ok(&self.state)
    }

    pub fn dispatch_json(&mut self, json: &str) -> Result<&GameState> {
        let raw = RawAction::from_json(json)?;
        self.dispatch_raw(&raw)
    }

    /// Directives animating the most recent transition.
    pub fn render_plan(&self) -> RenderPlan {
        RenderPlan::for_state(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_replaces_the_state() {
        let mut store = Store::default();
        assert_eq!(store.state().outcome(), Outcome::Init);

        let outcome = store.dispatch(Action::Start).outcome();

        assert_eq!(outcome, Outcome::Start);
        assert_eq!(store.state().trials(), 15);
    }

    #[test]
    fn json_actions_drive_the_game() {
        let mut store = Store::with_rules(GameRules::default(), 3).unwrap();
        store.dispatch_json(r#"{"kind":"start"}"#).unwrap();

        let (row, col) = store.state().tiles().closed_positions().next().unwrap();
        let index = usize::from(row) * usize::from(store.state().cols()) + usize::from(col);
        let json = alloc::format!(r#"{{"kind":"click","row":-1,"col":-1,"index":{index}}}"#);
        let state = store.dispatch_json(&json).unwrap();

        assert_eq!(state.outcome(), Outcome::OpenTile);
        assert_eq!(state.last_click(), Some((row, col)));
    }

    #[test]
    fn rejected_actions_keep_the_state() {
        let mut store = Store::default();
        store.dispatch(Action::Start);
        let before = store.state().clone();

        assert_eq!(
            store.dispatch_json(r#"{"kind":"restart"}"#),
            Err(GameError::UnknownAction("restart".into()))
        );
        assert!(store.dispatch_json("not json").is_err());
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn invalid_rules_are_refused() {
        let rules = GameRules {
            initial_tiles: 20,
            ..GameRules::default()
        };
        assert!(Store::with_rules(rules, 0).is_err());
    }

    #[test]
    fn render_plan_follows_the_latest_outcome() {
        let mut store = Store::default();
        store.dispatch(Action::Start);
        assert!(matches!(
            store.render_plan().steps()[0].directive,
            Directive::HideStartButton
        ));

        store.dispatch(Action::NewGame);
        assert!(matches!(
            store.render_plan().steps()[0].directive,
            Directive::ShowStartButton
        ));
        assert_eq!(store.into_state().outcome(), Outcome::Init);
    }
}
