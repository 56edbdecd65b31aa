use thiserror::Error;

use crate::action::PlayerId;
use crate::card::CardId;

/// Errors that can occur when manipulating a session.
///
/// Every variant leaves the session untouched; the text doubles as the
/// message shown to the player.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("It's not your turn!")]
    NotPlayersTurn,
    #[error("{0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("the game has not started yet")]
    NotStarted,
    #[error("the round is over")]
    RoundOver,
    #[error("a round is still in progress")]
    RoundInProgress,
    #[error("the match has already been decided")]
    MatchOver,
    #[error("the session has been destroyed")]
    Closed,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of rejected player input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("card {0} is not in your hand")]
    UnknownCard(CardId),
    #[error("{0} can't be played right now")]
    IllegalPlay(String),
    #[error("Play the card you drew or pass.")]
    MustPlayDrawn,
    #[error("You have playable cards. Try to play one!")]
    PlayableCardAvailable,
    #[error("You already drew this turn.")]
    AlreadyDrew,
    #[error("You can only pass after drawing a playable card.")]
    CannotPass,
    #[error("Finish your choice first.")]
    ChoicePending,
    #[error("There is nothing to choose right now.")]
    NoChoicePending,
    #[error("The opening choice can't be cancelled.")]
    CannotCancel,
    #[error("That card doesn't take a choice.")]
    UnexpectedChoice,
    #[error("Please enter a value between {min} and {max}.")]
    ChoiceOutOfRange { min: u8, max: u8 },
    #[error("Playing {choice} would exceed {limit}! Choose a smaller value.")]
    WouldExceed { choice: u8, limit: u32 },
}
