use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::games::phase10::{NoChoice, Phase10};
use crate::state::ViewOf;

/// House bot for Phase 10: a uniformly random legal discard, drawing only
/// when nothing fits.
pub struct Phase10Bot<G: Rng> {
    rng: G,
}

impl<G: Rng> Phase10Bot<G> {
    pub fn new(rng: G) -> Self {
        Self { rng }
    }
}

impl<G: Rng> Bot<Phase10> for Phase10Bot<G> {
    fn select_action(
        &mut self,
        _state: &ViewOf<Phase10>,
        legal_actions: &[Action<NoChoice>],
    ) -> Action<NoChoice> {
        let plays: Vec<Action<NoChoice>> = legal_actions
            .iter()
            .copied()
            .filter(Action::is_play)
            .collect();
        if let Some(action) = plays.choose(&mut self.rng) {
            return *action;
        }
        if legal_actions.contains(&Action::Draw) {
            Action::Draw
        } else {
            legal_actions.first().copied().unwrap_or(Action::Draw)
        }
    }
}
