use serde::{Deserialize, Serialize};

use crate::action::{PlayerId, Seat};
use crate::card::{Card, CardId};
use crate::rules::Rules;
use crate::turn::Direction;

/// Where the session's state machine is waiting.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    /// Before the first round, after `reset`, or after `destroy`.
    Idle,
    AwaitingHuman,
    AwaitingBot,
    /// A played card (or the opening wild) needs a choice before it resolves.
    ResolvingEffect { card: CardId },
    RoundOver,
}

/// Status of the current round.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundStatus {
    NotStarted,
    Ongoing,
    Won { winner: PlayerId },
    /// Deck and discard exhausted. Nobody wins.
    Stalemate,
}

impl RoundStatus {
    pub fn is_ongoing(self) -> bool {
        matches!(self, RoundStatus::Ongoing)
    }

    pub fn is_over(self) -> bool {
        matches!(self, RoundStatus::Won { .. } | RoundStatus::Stalemate)
    }

    pub fn winner(self) -> Option<PlayerId> {
        match self {
            RoundStatus::Won { winner } => Some(winner),
            _ => None,
        }
    }
}

/// Cross-round record of one player.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerRecord {
    pub rounds_won: u32,
    /// Accumulated penalty points from cards left in hand.
    pub score: u32,
}

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub seat: Seat,
    pub hand_size: usize,
    pub is_current: bool,
    pub skipped: bool,
    pub record: PlayerRecord,
}

/// Game state snapshot from one player's perspective, used by bots and frontends.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView<K, X> {
    pub phase: TurnPhase,
    pub status: RoundStatus,
    pub round: u32,
    pub match_winner: Option<PlayerId>,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub active: Option<Card<K>>,
    pub chosen: Option<X>,
    pub running_total: u32,
    pub pending_draw: usize,
    pub drawn: Option<CardId>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card<K>>,
}

impl<K: Copy, X> GameStateView<K, X> {
    /// Kind of a card in the viewer's hand.
    pub fn hand_kind(&self, id: CardId) -> Option<K> {
        self.hand.iter().find(|card| card.id == id).map(|card| card.kind)
    }
}

pub type ViewOf<R> = GameStateView<<R as Rules>::Kind, <R as Rules>::Choice>;
