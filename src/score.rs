//! Cross-round standings.
//!
//! Scoring rule:
//!   the round winner gains one round win; every other player adds the
//!   penalty value of the cards left in their hand.
//! Stalemated rounds award nothing. The match is decided once a player's
//! round wins reach the game's target.

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::Card;
use crate::rules::Rules;
use crate::state::PlayerRecord;

/// Sum of penalty points for a hand.
pub fn hand_penalty<R: Rules>(rules: &R, hand: &[Card<R::Kind>]) -> u32 {
    hand.iter().map(|card| rules.penalty(&card.kind)).sum()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    records: Vec<PlayerRecord>,
    rounds_played: u32,
    match_winner: Option<PlayerId>,
}

impl Standings {
    pub fn new(players: usize) -> Self {
        Self {
            records: vec![PlayerRecord::default(); players],
            rounds_played: 0,
            match_winner: None,
        }
    }

    pub fn record(&self, player: PlayerId) -> PlayerRecord {
        self.records.get(player).copied().unwrap_or_default()
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn match_winner(&self) -> Option<PlayerId> {
        self.match_winner
    }

    /// `penalties[p]` is the hand penalty of player `p` at round end.
    pub fn record_win(&mut self, winner: PlayerId, penalties: &[u32], rounds_to_win: u32) {
        self.rounds_played += 1;
        for (player, record) in self.records.iter_mut().enumerate() {
            if player == winner {
                record.rounds_won += 1;
            } else {
                record.score += penalties.get(player).copied().unwrap_or(0);
            }
        }
        if self.record(winner).rounds_won >= rounds_to_win {
            self.match_winner = Some(winner);
        }
    }

    pub fn record_stalemate(&mut self) {
        self.rounds_played += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_gains_round_and_losers_score() {
        let mut standings = Standings::new(3);
        standings.record_win(1, &[12, 40, 7], 10);
        assert_eq!(standings.record(1).rounds_won, 1);
        assert_eq!(standings.record(1).score, 0);
        assert_eq!(standings.record(0).score, 12);
        assert_eq!(standings.record(2).score, 7);
        assert_eq!(standings.match_winner(), None);
    }

    #[test]
    fn test_single_round_match_is_decided_immediately() {
        let mut standings = Standings::new(2);
        standings.record_win(0, &[0, 5], 1);
        assert_eq!(standings.match_winner(), Some(0));
    }

    #[test]
    fn test_stalemate_only_counts_round() {
        let mut standings = Standings::new(2);
        standings.record_stalemate();
        assert_eq!(standings.rounds_played(), 1);
        assert_eq!(standings.records(), &[PlayerRecord::default(); 2]);
    }
}
