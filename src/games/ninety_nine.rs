use std::fmt;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::error::InvalidAction;
use crate::rules::{Active, Effect, Opening, Rules, Stuck};
use crate::turn::TurnState;

pub const NINETY_NINE_HAND_SIZE: usize = 5;
pub const NINETY_NINE_LIMIT: u32 = 99;
/// Largest value a Play 0 card may add.
pub const MAX_PLAY_ZERO: u8 = 9;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum NinetyNineCard {
    /// Ace through nine, valued 1..=9.
    Number(u8),
    Reverse,
    Skip,
    /// The next player plays or draws two cards.
    PlusTwo,
    MinusTen,
    /// Adds a value from 0 to 9 picked by the player.
    PlayZero,
}

impl fmt::Display for NinetyNineCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NinetyNineCard::Number(1) => f.write_str("A"),
            NinetyNineCard::Number(value) => write!(f, "{value}"),
            NinetyNineCard::Reverse => f.write_str("Reverse"),
            NinetyNineCard::Skip => f.write_str("Skip"),
            NinetyNineCard::PlusTwo => f.write_str("Play 2"),
            NinetyNineCard::MinusTen => f.write_str("Minus 10"),
            NinetyNineCard::PlayZero => f.write_str("Play 0"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NinetyNine {
    pub hand_size: usize,
    /// The running total may reach but never pass this value.
    pub limit: u32,
}

impl Default for NinetyNine {
    fn default() -> Self {
        Self {
            hand_size: NINETY_NINE_HAND_SIZE,
            limit: NINETY_NINE_LIMIT,
        }
    }
}

impl NinetyNine {
    fn fits(&self, turn: &TurnState, value: u8) -> bool {
        turn.running_total + u32::from(value) <= self.limit
    }
}

impl Rules for NinetyNine {
    type Kind = NinetyNineCard;
    type Choice = u8;

    fn name(&self) -> &'static str {
        "99"
    }

    fn deck_config(&self) -> Vec<(NinetyNineCard, usize)> {
        let mut config: Vec<(NinetyNineCard, usize)> =
            (1..=9).map(|value| (NinetyNineCard::Number(value), 4)).collect();
        config.extend([
            (NinetyNineCard::Reverse, 4),
            (NinetyNineCard::Skip, 4),
            (NinetyNineCard::PlusTwo, 4),
            (NinetyNineCard::MinusTen, 4),
            (NinetyNineCard::PlayZero, 4),
        ]);
        config
    }

    fn hand_size(&self) -> usize {
        self.hand_size
    }

    fn first_player(&self, rng: &mut StdRng, players: usize) -> PlayerId {
        rng.gen_range(0..players)
    }

    fn can_open(&self, kind: &NinetyNineCard) -> bool {
        matches!(kind, NinetyNineCard::Number(_))
    }

    fn open(&self, kind: &NinetyNineCard, turn: &mut TurnState) -> Opening {
        if let NinetyNineCard::Number(value) = kind {
            turn.running_total = u32::from(*value);
        }
        Opening::Plain
    }

    fn is_valid_play(
        &self,
        kind: &NinetyNineCard,
        _active: &Active<NinetyNineCard, u8>,
        turn: &TurnState,
    ) -> bool {
        match kind {
            NinetyNineCard::Number(value) => self.fits(turn, *value),
            NinetyNineCard::PlayZero => self.fits(turn, 0),
            NinetyNineCard::Reverse
            | NinetyNineCard::Skip
            | NinetyNineCard::PlusTwo
            | NinetyNineCard::MinusTen => true,
        }
    }

    fn needs_choice(&self, kind: &NinetyNineCard) -> bool {
        *kind == NinetyNineCard::PlayZero
    }

    fn choices(&self, kind: &NinetyNineCard, turn: &TurnState) -> Vec<u8> {
        if *kind != NinetyNineCard::PlayZero {
            return Vec::new();
        }
        (0..=MAX_PLAY_ZERO)
            .filter(|value| self.fits(turn, *value))
            .collect()
    }

    fn check_choice(
        &self,
        _kind: &NinetyNineCard,
        choice: u8,
        turn: &TurnState,
    ) -> Result<(), InvalidAction> {
        if choice > MAX_PLAY_ZERO {
            return Err(InvalidAction::ChoiceOutOfRange {
                min: 0,
                max: MAX_PLAY_ZERO,
            });
        }
        if !self.fits(turn, choice) {
            return Err(InvalidAction::WouldExceed {
                choice,
                limit: self.limit,
            });
        }
        Ok(())
    }

    fn resolve(&self, kind: &NinetyNineCard, choice: Option<u8>, turn: &mut TurnState) -> Effect {
        match kind {
            NinetyNineCard::Number(value) => {
                turn.running_total += u32::from(*value);
                Effect::Advance
            }
            NinetyNineCard::PlayZero => {
                turn.running_total += u32::from(choice.unwrap_or(0));
                Effect::Advance
            }
            NinetyNineCard::MinusTen => {
                turn.running_total = turn.running_total.saturating_sub(10);
                Effect::Advance
            }
            NinetyNineCard::Reverse => Effect::Reverse,
            NinetyNineCard::Skip => Effect::Skip,
            NinetyNineCard::PlusTwo => Effect::PlayOrDraw(2),
        }
    }

    fn is_bust(&self, turn: &TurnState) -> bool {
        turn.running_total > self.limit
    }

    fn wins_on_empty_hand(&self) -> bool {
        false
    }

    fn may_draw_with_playable(&self) -> bool {
        false
    }

    fn stuck(&self) -> Stuck {
        Stuck::Forfeit
    }

    fn tracks_total(&self) -> bool {
        true
    }

    fn choice_prompt(&self) -> &'static str {
        "Choose a value from 0 to 9."
    }
}
