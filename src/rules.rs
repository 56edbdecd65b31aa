//! The seam between the shared engine and each game.
//!
//! A game supplies its card kinds, its deck table and the rules that turn a
//! played card into a state change. The engine in [`crate::game`] owns
//! everything else: piles, hands, turn order, scheduling and standings.

use std::fmt;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::error::InvalidAction;
use crate::turn::TurnState;

/// The top of the discard pile, plus whatever was chosen when it was played.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Active<K, X> {
    pub card: K,
    pub chosen: Option<X>,
}

/// What a resolved card does to turn order. Exactly one outcome per play.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Normal turn advance.
    Advance,
    /// The next player loses their next turn.
    Skip,
    /// Direction flips; with two players this is a skip.
    Reverse,
    /// The next player draws immediately and loses their turn.
    ForceDraw(usize),
    /// The next player must play or draw this many cards.
    PlayOrDraw(usize),
}

/// How the opening discard affects the first turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Opening {
    Plain,
    SkipFirst,
    Reverse,
    DrawFirst(usize),
    /// The first player binds a choice (wild colour) before playing.
    Choose,
}

/// What happens when a player draws and still cannot play.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Stuck {
    Pass,
    /// The round ends and the next player wins.
    Forfeit,
}

/// Per-game rules plugged into [`crate::game::Session`].
pub trait Rules {
    /// Closed set of card kinds.
    type Kind: Copy + Eq + fmt::Debug + fmt::Display;
    /// Value a player binds to a card when playing it.
    type Choice: Copy + Eq + fmt::Debug + fmt::Display;

    fn name(&self) -> &'static str;

    /// Kind -> copies. Order determines card ids.
    fn deck_config(&self) -> Vec<(Self::Kind, usize)>;

    fn hand_size(&self) -> usize;

    fn first_player(&self, _rng: &mut StdRng, _players: usize) -> PlayerId {
        0
    }

    fn can_open(&self, _kind: &Self::Kind) -> bool {
        true
    }

    /// Applies the opening card to a fresh turn state.
    fn open(&self, _kind: &Self::Kind, _turn: &mut TurnState) -> Opening {
        Opening::Plain
    }

    fn is_valid_play(
        &self,
        kind: &Self::Kind,
        active: &Active<Self::Kind, Self::Choice>,
        turn: &TurnState,
    ) -> bool;

    fn needs_choice(&self, _kind: &Self::Kind) -> bool {
        false
    }

    /// Every choice currently acceptable for `kind`.
    fn choices(&self, _kind: &Self::Kind, _turn: &TurnState) -> Vec<Self::Choice> {
        Vec::new()
    }

    fn check_choice(
        &self,
        _kind: &Self::Kind,
        _choice: Self::Choice,
        _turn: &TurnState,
    ) -> Result<(), InvalidAction> {
        Ok(())
    }

    /// Mutates game-specific turn data (running total) and reports the
    /// turn-order effect. Only called for validated plays.
    fn resolve(
        &self,
        kind: &Self::Kind,
        choice: Option<Self::Choice>,
        turn: &mut TurnState,
    ) -> Effect;

    fn is_bust(&self, _turn: &TurnState) -> bool {
        false
    }

    fn wins_on_empty_hand(&self) -> bool {
        true
    }

    fn may_draw_with_playable(&self) -> bool {
        true
    }

    fn stuck(&self) -> Stuck {
        Stuck::Pass
    }

    /// Penalty points for a card left in a losing hand.
    fn penalty(&self, _kind: &Self::Kind) -> u32 {
        0
    }

    /// Round wins needed to take the match.
    fn rounds_to_win(&self) -> u32 {
        1
    }

    /// Whether turn announcements should mention the running total.
    fn tracks_total(&self) -> bool {
        false
    }

    /// Word a bot announces on its last card.
    fn last_card_call(&self) -> Option<&'static str> {
        None
    }

    /// Prompt shown while a human choice is pending.
    fn choice_prompt(&self) -> &'static str {
        "Make a choice."
    }
}
