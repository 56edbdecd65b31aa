//! Deck construction, shuffling and the shared draw pile / discard pile pair.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::card::{Card, CardId};

/// Expands a `kind -> count` table into uniquely identified cards in table order (unshuffled).
pub fn build_deck<K: Copy>(config: &[(K, usize)]) -> Vec<Card<K>> {
    let total = config.iter().map(|(_, count)| count).sum();
    let mut deck = Vec::with_capacity(total);
    for (kind, count) in config {
        for _ in 0..*count {
            let id = CardId(deck.len() as u32);
            deck.push(Card::new(id, *kind));
        }
    }
    deck
}

/// Assigns ids to an explicit card order. The last kind is the first one drawn.
pub fn stacked_deck<K: Copy>(kinds: &[K]) -> Vec<Card<K>> {
    kinds
        .iter()
        .enumerate()
        .map(|(idx, kind)| Card::new(CardId(idx as u32), *kind))
        .collect()
}

/// Uniform in-place permutation (Fisher-Yates, last index down to 1).
pub fn shuffle<T, R: Rng + ?Sized>(cards: &mut [T], rng: &mut R) {
    cards.shuffle(rng);
}

/// Returned when the deck is empty and the discard pile cannot be recycled.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no cards left in the deck or the discard pile (drew {drawn})")]
pub struct DeckExhausted {
    pub drawn: usize,
}

/// Bookkeeping for a successful draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawReport {
    pub drawn: usize,
    pub reshuffles: usize,
}

/// Draw pile plus discard pile. The last element of each vector is its top.
#[derive(Clone, Debug)]
pub struct Piles<K> {
    deck: Vec<Card<K>>,
    discard: Vec<Card<K>>,
}

impl<K: Copy> Piles<K> {
    pub fn new(deck: Vec<Card<K>>) -> Self {
        Self {
            deck,
            discard: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn top(&self) -> Option<&Card<K>> {
        self.discard.last()
    }

    pub fn discard(&mut self, card: Card<K>) {
        self.discard.push(card);
    }

    /// Takes the top card of the draw pile without reshuffling.
    pub fn pop_deck(&mut self) -> Option<Card<K>> {
        self.deck.pop()
    }

    /// Returns a card to the bottom of the draw pile.
    pub fn tuck_under(&mut self, card: Card<K>) {
        self.deck.insert(0, card);
    }

    /// Moves up to `count` cards from the deck into `hand`, recycling the
    /// discard pile whenever the deck runs dry. Cards drawn before an
    /// exhaustion stay in the hand.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        hand: &mut Vec<Card<K>>,
        count: usize,
        rng: &mut R,
    ) -> Result<DrawReport, DeckExhausted> {
        let mut report = DrawReport::default();
        for _ in 0..count {
            if self.deck.is_empty() {
                if !self.reshuffle(rng) {
                    return Err(DeckExhausted {
                        drawn: report.drawn,
                    });
                }
                report.reshuffles += 1;
            }
            let Some(card) = self.deck.pop() else {
                return Err(DeckExhausted {
                    drawn: report.drawn,
                });
            };
            hand.push(card);
            report.drawn += 1;
        }
        Ok(report)
    }

    /// Holds the top discard aside, shuffles the rest into a new deck and
    /// leaves the held card as the only discard. Needs at least two discards.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.discard.len() <= 1 {
            return false;
        }
        let Some(top) = self.discard.pop() else {
            return false;
        };
        let mut recycled = std::mem::take(&mut self.discard);
        shuffle(&mut recycled, rng);
        self.deck.append(&mut recycled);
        self.discard.push(top);
        true
    }

    pub fn clear(&mut self) {
        self.deck.clear();
        self.discard.clear();
    }
}
