use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::rules::Rules;
use crate::state::ViewOf;

/// Baseline bot that samples uniformly from the legal action set.
pub struct RandomBot<G: Rng> {
    rng: G,
}

impl<G: Rng> RandomBot<G> {
    pub fn new(rng: G) -> Self {
        Self { rng }
    }
}

impl<R: Rules, G: Rng> Bot<R> for RandomBot<G> {
    fn select_action(
        &mut self,
        _state: &ViewOf<R>,
        legal_actions: &[Action<R::Choice>],
    ) -> Action<R::Choice> {
        legal_actions
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Action::Draw)
    }
}
