//! Phase 10 as far as it was ever playable: suited number cards matched by
//! colour or value, wilds, and skips. Phases advance by winning rounds;
//! laying down phase sets is not modelled.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::Color;
use crate::rules::{Active, Effect, Rules};
use crate::state::PlayerRecord;
use crate::turn::TurnState;

pub const PHASE10_HAND_SIZE: usize = 10;
pub const PHASE_COUNT: u32 = 10;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase10Card {
    Number(Color, u8),
    Wild,
    Skip,
}

impl fmt::Display for Phase10Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase10Card::Number(color, value) => write!(f, "{} {value}", color.title()),
            Phase10Card::Wild => f.write_str("Wild"),
            Phase10Card::Skip => f.write_str("Skip"),
        }
    }
}

/// Phase 10 cards never take a choice.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum NoChoice {}

impl fmt::Display for NoChoice {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase10 {
    pub hand_size: usize,
    pub phases: u32,
}

impl Default for Phase10 {
    fn default() -> Self {
        Self {
            hand_size: PHASE10_HAND_SIZE,
            phases: PHASE_COUNT,
        }
    }
}

impl Phase10 {
    /// The phase a player is working on, given their standing.
    pub fn phase_of(&self, record: PlayerRecord) -> u32 {
        (record.rounds_won + 1).min(self.phases)
    }
}

impl Rules for Phase10 {
    type Kind = Phase10Card;
    type Choice = NoChoice;

    fn name(&self) -> &'static str {
        "Phase 10"
    }

    fn deck_config(&self) -> Vec<(Phase10Card, usize)> {
        let mut config = Vec::new();
        for color in Color::ALL {
            config.push((Phase10Card::Number(color, 1), 1));
            for value in 2..=12 {
                config.push((Phase10Card::Number(color, value), 2));
            }
        }
        config.push((Phase10Card::Wild, 4));
        config.push((Phase10Card::Skip, 4));
        config
    }

    fn hand_size(&self) -> usize {
        self.hand_size
    }

    fn can_open(&self, kind: &Phase10Card) -> bool {
        matches!(kind, Phase10Card::Number(..))
    }

    fn is_valid_play(
        &self,
        kind: &Phase10Card,
        active: &Active<Phase10Card, NoChoice>,
        _turn: &TurnState,
    ) -> bool {
        match (kind, active.card) {
            (Phase10Card::Wild, _) => true,
            (_, Phase10Card::Wild | Phase10Card::Skip) => true,
            (Phase10Card::Number(color, value), Phase10Card::Number(top_color, top_value)) => {
                *color == top_color || *value == top_value
            }
            (Phase10Card::Skip, Phase10Card::Number(..)) => false,
        }
    }

    fn resolve(&self, kind: &Phase10Card, _choice: Option<NoChoice>, _turn: &mut TurnState) -> Effect {
        match kind {
            Phase10Card::Skip => Effect::Skip,
            Phase10Card::Number(..) | Phase10Card::Wild => Effect::Advance,
        }
    }

    fn penalty(&self, kind: &Phase10Card) -> u32 {
        match kind {
            Phase10Card::Number(_, 1..=9) => 5,
            Phase10Card::Number(..) => 10,
            Phase10Card::Skip => 15,
            Phase10Card::Wild => 25,
        }
    }

    fn rounds_to_win(&self) -> u32 {
        self.phases
    }
}
