//! Display port. The engine narrates through this trait and never touches a
//! concrete display technology.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::action::{PlayerId, Seat};
use crate::card::Card;

/// A card in a rendered hand and whether its owner may play it right now.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandCard<K> {
    pub card: Card<K>,
    pub playable: bool,
}

/// Active card, bound choice and counters for the discard area.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableView<K, X> {
    pub active: Option<Card<K>>,
    pub chosen: Option<X>,
    pub running_total: u32,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
}

pub trait Frontend<K, X> {
    fn render_hand(&mut self, player: PlayerId, seat: Seat, cards: &[HandCard<K>]);
    fn render_table(&mut self, table: &TableView<K, X>);
    fn show_message(&mut self, message: &str);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFrontend;

impl<K, X> Frontend<K, X> for NullFrontend {
    fn render_hand(&mut self, _player: PlayerId, _seat: Seat, _cards: &[HandCard<K>]) {}
    fn render_table(&mut self, _table: &TableView<K, X>) {}
    fn show_message(&mut self, _message: &str) {}
}

#[derive(Debug)]
struct Log<K, X> {
    messages: Vec<String>,
    hand_renders: usize,
    hands: Vec<Vec<HandCard<K>>>,
    table: Option<TableView<K, X>>,
}

/// Records everything it is told. Clones share the same log, so one handle
/// can be given to a session and another kept for inspection.
#[derive(Debug)]
pub struct Transcript<K, X> {
    log: Rc<RefCell<Log<K, X>>>,
}

impl<K, X> Clone for Transcript<K, X> {
    fn clone(&self) -> Self {
        Self {
            log: Rc::clone(&self.log),
        }
    }
}

impl<K, X> Default for Transcript<K, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, X> Transcript<K, X> {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Log {
                messages: Vec::new(),
                hand_renders: 0,
                hands: Vec::new(),
                table: None,
            })),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.log.borrow().messages.clone()
    }

    pub fn last_message(&self) -> Option<String> {
        self.log.borrow().messages.last().cloned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.log
            .borrow()
            .messages
            .iter()
            .any(|message| message.contains(needle))
    }

    pub fn hand_renders(&self) -> usize {
        self.log.borrow().hand_renders
    }

    pub fn clear(&self) {
        self.log.borrow_mut().messages.clear();
    }
}

impl<K: Clone, X: Clone> Transcript<K, X> {
    /// Last rendering of a player's hand.
    pub fn hand(&self, player: PlayerId) -> Vec<HandCard<K>> {
        self.log
            .borrow()
            .hands
            .get(player)
            .cloned()
            .unwrap_or_default()
    }

    pub fn table(&self) -> Option<TableView<K, X>> {
        self.log.borrow().table.clone()
    }
}

impl<K: Clone, X: Clone> Frontend<K, X> for Transcript<K, X> {
    fn render_hand(&mut self, player: PlayerId, _seat: Seat, cards: &[HandCard<K>]) {
        let mut log = self.log.borrow_mut();
        log.hand_renders += 1;
        if log.hands.len() <= player {
            log.hands.resize_with(player + 1, Vec::new);
        }
        log.hands[player] = cards.to_vec();
    }

    fn render_table(&mut self, table: &TableView<K, X>) {
        self.log.borrow_mut().table = Some(table.clone());
    }

    fn show_message(&mut self, message: &str) {
        self.log.borrow_mut().messages.push(message.to_string());
    }
}
