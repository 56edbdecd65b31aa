//! Turn order: current player, direction, skip flags and pending obligations.

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::CardId;

/// Direction of play around the table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// +1 or -1.
    pub fn step(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Mutable per-round turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub current: PlayerId,
    pub direction: Direction,
    /// Cards the current player must still play or draw (99's Play 2).
    pub pending_draw: usize,
    /// 99 only.
    pub running_total: u32,
    /// Card drawn this turn that may still be played.
    pub drawn: Option<CardId>,
    skipped: Vec<bool>,
}

impl TurnState {
    pub fn new(players: usize, first: PlayerId) -> Self {
        debug_assert!(first < players);
        Self {
            current: first,
            direction: Direction::Forward,
            pending_draw: 0,
            running_total: 0,
            drawn: None,
            skipped: vec![false; players],
        }
    }

    pub fn players(&self) -> usize {
        self.skipped.len()
    }

    /// Index that follows `from` in the current direction.
    pub fn after(&self, from: PlayerId) -> PlayerId {
        let players = self.players();
        match self.direction {
            Direction::Forward => (from + 1) % players,
            Direction::Backward => (from + players - 1) % players,
        }
    }

    /// The player who would act next, ignoring skip flags.
    pub fn peek_next(&self) -> PlayerId {
        self.after(self.current)
    }

    pub fn is_skipped(&self, player: PlayerId) -> bool {
        self.skipped.get(player).copied().unwrap_or(false)
    }

    pub fn flag_skip(&mut self, player: PlayerId) {
        if let Some(flag) = self.skipped.get_mut(player) {
            *flag = true;
        }
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.flipped();
    }

    /// Moves to the next player, consuming skip flags along the way.
    /// Returns the players whose turn was forfeited, in order.
    pub fn advance(&mut self) -> Vec<PlayerId> {
        let mut forfeited = Vec::new();
        self.drawn = None;
        loop {
            self.current = self.peek_next();
            if self.skipped[self.current] {
                self.skipped[self.current] = false;
                forfeited.push(self.current);
                continue;
            }
            return forfeited;
        }
    }
}
