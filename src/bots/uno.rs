use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::card::{CardId, Color};
use crate::games::uno::{Uno, UnoCard};
use crate::state::ViewOf;

/// House bot for Uno.
///
/// In plain English:
/// - Play a coloured card if one fits, action cards before numbers.
/// - Otherwise play a Wild, and only then a Wild Draw Four.
/// - Name the colour it holds the most of once the wild has left its hand,
///   breaking ties at random.
/// - With nothing playable, draw; a playable drawn card is always played.
pub struct UnoBot<G: Rng> {
    rng: G,
}

impl<G: Rng> UnoBot<G> {
    pub fn new(rng: G) -> Self {
        Self { rng }
    }

    fn priority(kind: UnoCard) -> i32 {
        match kind {
            UnoCard::Skip(_) | UnoCard::Reverse(_) | UnoCard::DrawTwo(_) => 3,
            UnoCard::Number(..) => 2,
            UnoCard::Wild => 1,
            UnoCard::WildDrawFour => 0,
        }
    }

    /// Most represented colour in the hand, ignoring `played`.
    fn pick_color(&mut self, state: &ViewOf<Uno>, played: Option<CardId>) -> Color {
        let mut counts = [0usize; 4];
        for card in state.hand.iter().filter(|card| Some(card.id) != played) {
            if let Some(color) = card.kind.color() {
                counts[color as usize] += 1;
            }
        }
        let best = counts.iter().copied().max().unwrap_or(0);
        let tied: Vec<Color> = Color::ALL
            .into_iter()
            .filter(|color| counts[*color as usize] == best)
            .collect();
        tied.choose(&mut self.rng).copied().unwrap_or(Color::Red)
    }
}

impl<G: Rng> Bot<Uno> for UnoBot<G> {
    fn select_action(
        &mut self,
        state: &ViewOf<Uno>,
        legal_actions: &[Action<Color>],
    ) -> Action<Color> {
        if legal_actions
            .iter()
            .any(|action| matches!(action, Action::Choose(_)))
        {
            return Action::Choose(self.pick_color(state, None));
        }

        let best = legal_actions
            .iter()
            .filter_map(|action| {
                let card = action.card()?;
                state.hand_kind(card).map(|kind| (card, kind))
            })
            .max_by_key(|(_, kind)| Self::priority(*kind));
        if let Some((card, kind)) = best {
            let choice = kind
                .is_wild()
                .then(|| self.pick_color(state, Some(card)));
            return Action::Play { card, choice };
        }

        if legal_actions.contains(&Action::Draw) {
            Action::Draw
        } else {
            legal_actions.first().copied().unwrap_or(Action::Pass)
        }
    }
}
