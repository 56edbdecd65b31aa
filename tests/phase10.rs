mod common;

use cardtable::error::InvalidAction;
use cardtable::{
    Action, Color, GameError, Phase10, Phase10Card, RoundStatus, Seat, Session, Transcript,
};
use common::{find, play, stack};

use Color::{Blue, Green, Red};
use Phase10Card::{Number, Skip, Wild};

type Table = (
    Session<Phase10>,
    Transcript<Phase10Card, cardtable::NoChoice>,
);

fn session(rules: Phase10, players: usize, deck: Vec<Phase10Card>) -> Result<Table, GameError> {
    let transcript = Transcript::new();
    let mut session = Session::builder(rules)
        .with_seats(vec![Seat::Human; players])
        .with_deck(deck)
        .with_frontend(transcript.clone())
        .build()?;
    session.start()?;
    Ok((session, transcript))
}

fn rules(hand_size: usize) -> Phase10 {
    Phase10 {
        hand_size,
        ..Phase10::default()
    }
}

#[test]
fn discards_match_colour_or_value() -> Result<(), GameError> {
    let deck = stack(
        Number(Red, 7),
        &[
            &[Number(Blue, 7), Number(Green, 3), Wild, Skip],
            &[Number(Red, 1), Number(Red, 2), Number(Red, 3), Number(Red, 4)],
        ],
        &[Number(Red, 5)],
    );
    let (session, _) = session(rules(4), 2, deck)?;
    let legal = session.legal_actions(0)?;
    assert_eq!(
        legal,
        vec![
            play(&session, 0, Number(Blue, 7)),
            play(&session, 0, Wild),
            Action::Draw,
        ]
    );
    assert!(!session.is_valid_play(0, find(&session, 0, Skip)));
    Ok(())
}

#[test]
fn skip_takes_away_the_next_turn() -> Result<(), GameError> {
    let deck = stack(
        Number(Red, 7),
        &[
            &[Wild, Number(Red, 1)],
            &[Skip, Number(Red, 2)],
            &[Number(Blue, 3), Number(Blue, 4)],
        ],
        &[Number(Red, 5)],
    );
    let (mut session, transcript) = session(rules(2), 3, deck)?;
    session.apply_action(0, play(&session, 0, Wild))?;
    assert_eq!(session.current_player(), 1);
    session.apply_action(1, play(&session, 1, Skip))?;
    assert_eq!(session.current_player(), 0);
    assert!(transcript.contains("Player 3's turn is skipped!"));
    Ok(())
}

#[test]
fn skip_with_two_players_repeats_the_actor() -> Result<(), GameError> {
    let deck = stack(
        Number(Red, 7),
        &[&[Wild, Number(Red, 1)], &[Skip, Number(Red, 2)]],
        &[Number(Red, 5)],
    );
    let (mut session, _) = session(rules(2), 2, deck)?;
    session.apply_action(0, play(&session, 0, Wild))?;
    session.apply_action(1, play(&session, 1, Skip))?;
    assert_eq!(session.current_player(), 1);
    Ok(())
}

#[test]
fn round_wins_advance_the_phase() -> Result<(), GameError> {
    let deck = stack(
        Number(Red, 7),
        &[&[Number(Red, 2)], &[Number(Blue, 9)]],
        &[Number(Red, 5), Number(Red, 5)],
    );
    let (mut session, _) = session(rules(1), 2, deck)?;
    session.apply_action(0, play(&session, 0, Number(Red, 2)))?;
    assert_eq!(session.status(), RoundStatus::Won { winner: 0 });
    let record = session.standings().record(0);
    assert_eq!(record.rounds_won, 1);
    assert_eq!(session.rules().phase_of(record), 2);
    assert_eq!(session.standings().record(1).score, 5);
    assert_eq!(session.standings().match_winner(), None);

    session.next_round()?;
    assert_eq!(session.round(), 2);
    assert_eq!(session.status(), RoundStatus::Ongoing);
    session.apply_action(0, play(&session, 0, Number(Red, 2)))?;
    assert_eq!(session.standings().record(0).rounds_won, 2);
    assert_eq!(session.standings().record(1).score, 10);
    Ok(())
}

#[test]
fn completing_every_phase_wins_the_match() -> Result<(), GameError> {
    let deck = stack(
        Number(Red, 7),
        &[&[Number(Red, 2)], &[Wild]],
        &[Number(Red, 5)],
    );
    let (mut session, transcript) = session(Phase10 { hand_size: 1, phases: 2 }, 2, deck)?;
    session.apply_action(0, play(&session, 0, Number(Red, 2)))?;
    session.next_round()?;
    session.apply_action(0, play(&session, 0, Number(Red, 2)))?;
    assert_eq!(session.standings().match_winner(), Some(0));
    assert_eq!(session.standings().record(1).score, 50);
    assert!(transcript.contains("Player 1 won the match!"));
    assert_eq!(session.next_round(), Err(GameError::MatchOver));
    Ok(())
}

#[test]
fn nothing_to_pass_or_cancel() -> Result<(), GameError> {
    let deck = stack(
        Number(Red, 7),
        &[&[Number(Red, 2)], &[Number(Red, 3)]],
        &[Number(Red, 5)],
    );
    let (mut session, _) = session(rules(1), 2, deck)?;
    assert_eq!(
        session.apply_action(0, Action::Pass),
        Err(GameError::InvalidAction(InvalidAction::CannotPass))
    );
    assert_eq!(
        session.apply_action(0, Action::Cancel),
        Err(GameError::InvalidAction(InvalidAction::NoChoicePending))
    );
    Ok(())
}
