use crate::action::Action;
use crate::bot::Bot;
use crate::games::ninety_nine::{NinetyNine, NinetyNineCard};
use crate::state::ViewOf;

/// House bot for 99.
///
/// Prefers Play 0 (adding the largest value that stays in bounds), then
/// Minus 10, then any action card, then the lowest number that fits.
/// Draws only when nothing is playable.
#[derive(Clone, Copy, Debug, Default)]
pub struct NinetyNineBot;

impl NinetyNineBot {
    pub fn new() -> Self {
        Self
    }

    /// Larger is better.
    fn score(kind: NinetyNineCard, choice: Option<u8>) -> i32 {
        match kind {
            NinetyNineCard::PlayZero => 300 + i32::from(choice.unwrap_or(0)),
            NinetyNineCard::MinusTen => 200,
            NinetyNineCard::Reverse | NinetyNineCard::Skip | NinetyNineCard::PlusTwo => 100,
            NinetyNineCard::Number(value) => 10 - i32::from(value),
        }
    }
}

impl Bot<NinetyNine> for NinetyNineBot {
    fn select_action(
        &mut self,
        state: &ViewOf<NinetyNine>,
        legal_actions: &[Action<u8>],
    ) -> Action<u8> {
        if let Some(value) = legal_actions
            .iter()
            .filter_map(|action| match action {
                Action::Choose(value) => Some(*value),
                _ => None,
            })
            .max()
        {
            return Action::Choose(value);
        }

        legal_actions
            .iter()
            .filter_map(|action| match action {
                Action::Play { card, choice } => state
                    .hand_kind(*card)
                    .map(|kind| (*action, Self::score(kind, *choice))),
                _ => None,
            })
            .max_by_key(|(_, score)| *score)
            .map(|(action, _)| action)
            .or_else(|| legal_actions.iter().copied().find(|a| *a == Action::Draw))
            .or_else(|| legal_actions.first().copied())
            .unwrap_or(Action::Draw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardId};
    use crate::state::{GameStateView, RoundStatus, TurnPhase};
    use crate::turn::Direction;

    fn view(hand: &[NinetyNineCard], total: u32) -> ViewOf<NinetyNine> {
        GameStateView {
            phase: TurnPhase::AwaitingBot,
            status: RoundStatus::Ongoing,
            round: 1,
            match_winner: None,
            self_player: 1,
            current_player: 1,
            direction: Direction::Forward,
            active: Some(Card::new(CardId(99), NinetyNineCard::Number(5))),
            chosen: None,
            running_total: total,
            pending_draw: 0,
            drawn: None,
            draw_pile_count: 20,
            discard_pile_count: 3,
            players: Vec::new(),
            hand: hand
                .iter()
                .enumerate()
                .map(|(i, kind)| Card::new(CardId(i as u32), *kind))
                .collect(),
        }
    }

    fn play(card: u32, choice: Option<u8>) -> Action<u8> {
        Action::Play {
            card: CardId(card),
            choice,
        }
    }

    #[test]
    fn test_play_zero_takes_largest_fitting_value() {
        let state = view(
            &[NinetyNineCard::Number(2), NinetyNineCard::PlayZero, NinetyNineCard::MinusTen],
            95,
        );
        let mut legal = vec![play(0, None)];
        legal.extend((0..=4).map(|v| play(1, Some(v))));
        legal.push(play(2, None));
        assert_eq!(
            NinetyNineBot::new().select_action(&state, &legal),
            play(1, Some(4))
        );
    }

    #[test]
    fn test_minus_ten_before_actions_and_numbers() {
        let state = view(
            &[NinetyNineCard::Skip, NinetyNineCard::MinusTen, NinetyNineCard::Number(1)],
            50,
        );
        let legal = vec![play(0, None), play(1, None), play(2, None)];
        assert_eq!(
            NinetyNineBot::new().select_action(&state, &legal),
            play(1, None)
        );
    }

    #[test]
    fn test_lowest_number_when_only_numbers() {
        let state = view(
            &[NinetyNineCard::Number(8), NinetyNineCard::Number(3), NinetyNineCard::Number(6)],
            10,
        );
        let legal = vec![play(0, None), play(1, None), play(2, None)];
        assert_eq!(
            NinetyNineBot::new().select_action(&state, &legal),
            play(1, None)
        );
    }

    #[test]
    fn test_draws_when_stuck() {
        let state = view(&[NinetyNineCard::Number(9)], 95);
        assert_eq!(
            NinetyNineBot::new().select_action(&state, &[Action::Draw]),
            Action::Draw
        );
    }
}
