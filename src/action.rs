use serde::{Deserialize, Serialize};

use crate::card::CardId;

/// Zero-based index of a player within the session.
pub type PlayerId = usize;

/// Who controls a seat.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Human,
    Bot,
}

impl Seat {
    pub fn is_bot(self) -> bool {
        matches!(self, Seat::Bot)
    }
}

/// Input accepted from a seat on its turn. `X` is the game's choice type
/// (wild colour, Play 0 value).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action<X> {
    /// Play a card from the hand. Cards that need a choice either carry it
    /// here or leave the session waiting for [`Action::Choose`].
    Play { card: CardId, choice: Option<X> },
    /// Resolve the pending choice.
    Choose(X),
    /// Back out of a pending choice and keep the card.
    Cancel,
    /// Draw from the deck.
    Draw,
    /// Keep a playable card that was just drawn and end the turn.
    Pass,
}

impl<X> Action<X> {
    /// Returns the card id if the action is a play.
    pub fn card(&self) -> Option<CardId> {
        match self {
            Action::Play { card, .. } => Some(*card),
            _ => None,
        }
    }

    pub fn is_play(&self) -> bool {
        matches!(self, Action::Play { .. })
    }
}
