//! Rules engines for Uno, 99 and Phase 10, each played against a scripted bot.
//!
//! One engine, [`game::Session`], runs every game. A game plugs in through
//! [`rules::Rules`]; rendering goes through [`frontend::Frontend`].

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod frontend;
pub mod game;
pub mod games;
pub mod rules;
pub mod schedule;
pub mod score;
pub mod state;
pub mod turn;
pub mod visualize;

pub use crate::action::{Action, PlayerId, Seat};
pub use crate::bot::Bot;
pub use crate::bots::{HouseBot, NinetyNineBot, Phase10Bot, RandomBot, UnoBot};
pub use crate::card::{Card, CardId, Color};
pub use crate::error::{GameError, InvalidAction};
pub use crate::frontend::{Frontend, HandCard, NullFrontend, TableView, Transcript};
pub use crate::game::{Session, SessionBuilder, SessionConfig};
pub use crate::games::{NinetyNine, NinetyNineCard, NoChoice, Phase10, Phase10Card, Uno, UnoCard};
pub use crate::rules::{Active, Effect, Opening, Rules, Stuck};
pub use crate::schedule::{Deferred, Scheduler, TaskId};
pub use crate::score::Standings;
pub use crate::state::{
    GameStateView, PlayerPublicState, PlayerRecord, RoundStatus, TurnPhase, ViewOf,
};
pub use crate::turn::{Direction, TurnState};
pub use crate::visualize::{VisualOptions, describe_action, render_state};
