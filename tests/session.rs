mod common;

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use cardtable::{
    Action, Bot, Color, GameError, RandomBot, RoundStatus, Seat, Session, SessionConfig,
    Transcript, TurnPhase, Uno, UnoCard, ViewOf,
};
use common::{find, hand_len, play, stack};

use Color::{Blue, Green, Red, Yellow};
use UnoCard::{Number, Wild};

const MS: Duration = Duration::from_millis(1);

fn deck() -> Vec<UnoCard> {
    stack(
        Number(Red, 5),
        &[
            &[Number(Red, 1), Number(Red, 3), Number(Blue, 9)],
            &[Number(Red, 2), Number(Blue, 3), Number(Green, 4)],
        ],
        &[Number(Yellow, 8); 6],
    )
}

fn against_bot(
    delay: Duration,
) -> Result<(Session<Uno>, Transcript<UnoCard, Color>), GameError> {
    let transcript = Transcript::new();
    let mut session = Session::builder(Uno { hand_size: 3 })
        .with_seats(vec![Seat::Human, Seat::Bot])
        .with_deck(deck())
        .with_bot_delay(delay)
        .with_frontend(transcript.clone())
        .build()?;
    session.start()?;
    Ok((session, transcript))
}

/// Always asks for something the engine will not allow.
struct StubbornBot;

impl Bot<Uno> for StubbornBot {
    fn select_action(&mut self, _state: &ViewOf<Uno>, _legal: &[Action<Color>]) -> Action<Color> {
        Action::Pass
    }
}

#[test]
fn bot_waits_for_its_delay() -> Result<(), GameError> {
    let (mut session, transcript) = against_bot(MS * 1500)?;
    assert_eq!(session.phase(), TurnPhase::AwaitingHuman);
    assert_eq!(session.pending_bot(), None);

    session.apply_action(0, play(&session, 0, Number(Red, 1)))?;
    assert_eq!(session.phase(), TurnPhase::AwaitingBot);
    assert_eq!(session.pending_bot().map(|task| task.due), Some(MS * 1500));

    assert_eq!(session.advance(MS * 1000), 0);
    assert_eq!(session.current_player(), 1);
    assert_eq!(session.advance(MS * 500), 1);
    assert_eq!(session.current_player(), 0);
    assert_eq!(hand_len(&session, 1), 2);
    assert_eq!(session.active().map(|active| active.card), Some(Number(Red, 2)));
    assert_eq!(session.clock(), MS * 1500);
    assert_eq!(session.pending_bot(), None);
    assert!(transcript.contains("Bot played Red 2."));
    assert!(transcript.contains("Your turn!"));
    Ok(())
}

#[test]
fn zero_delay_runs_the_bot_synchronously() -> Result<(), GameError> {
    let (mut session, _) = against_bot(Duration::ZERO)?;
    session.apply_action(0, play(&session, 0, Number(Red, 1)))?;
    assert_eq!(session.current_player(), 0);
    assert_eq!(hand_len(&session, 1), 2);
    assert_eq!(session.clock(), Duration::ZERO);
    Ok(())
}

#[test]
fn fire_pending_skips_the_wait() -> Result<(), GameError> {
    let (mut session, _) = against_bot(MS * 1500)?;
    assert!(!session.fire_pending());
    session.apply_action(0, play(&session, 0, Number(Red, 1)))?;
    assert!(session.fire_pending());
    assert_eq!(session.current_player(), 0);
    assert_eq!(session.clock(), MS * 1500);
    Ok(())
}

#[test]
fn reset_cancels_the_pending_bot_turn() -> Result<(), GameError> {
    let (mut session, transcript) = against_bot(MS * 1500)?;
    session.apply_action(0, play(&session, 0, Number(Red, 1)))?;
    assert!(session.pending_bot().is_some());

    session.reset();
    assert_eq!(session.pending_bot(), None);
    assert_eq!(session.phase(), TurnPhase::Idle);
    assert_eq!(session.status(), RoundStatus::NotStarted);
    assert_eq!(session.card_count(), 0);
    assert!(transcript.contains("Welcome to Uno!"));
    assert_eq!(session.advance(MS * 5000), 0);
    assert_eq!(session.apply_action(0, Action::Draw), Err(GameError::NotStarted));

    session.start()?;
    assert_eq!(session.round(), 1);
    assert_eq!(hand_len(&session, 0), 3);
    Ok(())
}

#[test]
fn destroy_rejects_further_input() -> Result<(), GameError> {
    let (mut session, transcript) = against_bot(MS * 1500)?;
    session.apply_action(0, play(&session, 0, Number(Red, 1)))?;
    session.destroy();
    let seen = transcript.messages().len();

    assert!(session.is_closed());
    assert_eq!(session.pending_bot(), None);
    assert!(!session.fire_pending());
    assert_eq!(session.start(), Err(GameError::Closed));
    assert_eq!(session.next_round(), Err(GameError::Closed));
    assert_eq!(session.apply_action(1, Action::Draw), Err(GameError::Closed));
    assert!(session.legal_actions(0)?.is_empty());
    assert_eq!(transcript.messages().len(), seen);
    Ok(())
}

#[test]
fn next_round_needs_a_finished_round() -> Result<(), GameError> {
    let mut session = Session::builder(Uno::default()).build()?;
    assert_eq!(session.next_round(), Err(GameError::NotStarted));
    session.start()?;
    assert_eq!(session.next_round(), Err(GameError::RoundInProgress));
    Ok(())
}

#[test]
fn configuration_is_validated() {
    let too_few = Session::builder(Uno::default())
        .with_seats(vec![Seat::Human])
        .build();
    assert_eq!(
        too_few.err(),
        Some(GameError::InvalidConfiguration("players must be between 2 and 6"))
    );
    let too_many = Session::builder(Uno::default())
        .with_seats(vec![Seat::Bot; 7])
        .build();
    assert!(too_many.is_err());
    let first = Session::builder(Uno::default()).with_first_player(5).build();
    assert_eq!(
        first.err(),
        Some(GameError::InvalidConfiguration("first player is out of range"))
    );
    let short_deck = Session::builder(Uno::default())
        .with_deck(vec![Number(Red, 5); 10])
        .build();
    assert_eq!(
        short_deck.err(),
        Some(GameError::InvalidConfiguration(
            "deck does not contain enough cards to deal"
        ))
    );
    let human_seat = Session::builder(Uno::default())
        .with_bot(0, StubbornBot)
        .build();
    assert_eq!(
        human_seat.err(),
        Some(GameError::InvalidConfiguration(
            "a bot was assigned to a human seat"
        ))
    );
    let missing_seat = Session::builder(Uno::default())
        .with_bot(4, StubbornBot)
        .build();
    assert_eq!(missing_seat.err(), Some(GameError::InvalidPlayer(4)));
    assert!(SessionConfig::new(vec![Seat::Human], 1).is_err());
}

#[test]
fn views_only_show_the_viewer_hand() -> Result<(), GameError> {
    let (session, _) = against_bot(MS * 1500)?;
    let view = session.state_view(0)?;
    assert_eq!(view.hand.len(), 3);
    assert_eq!(view.players[1].hand_size, 3);
    assert!(view.players[0].is_current);
    assert_eq!(view.draw_pile_count, 6);
    assert_eq!(view.discard_pile_count, 1);
    assert!(view.hand.iter().all(|card| card.kind != Number(Red, 2)));
    assert_eq!(session.state_view(9).err(), Some(GameError::InvalidPlayer(9)));
    Ok(())
}

#[test]
fn rendered_hands_flag_playable_cards() -> Result<(), GameError> {
    let (session, transcript) = against_bot(MS * 1500)?;
    let hand = transcript.hand(0);
    assert_eq!(hand.len(), 3);
    for entry in &hand {
        assert_eq!(entry.playable, session.is_valid_play(0, entry.card.id));
    }
    assert_eq!(hand.iter().filter(|entry| entry.playable).count(), 2);
    assert!(transcript.hand(1).iter().all(|entry| !entry.playable));
    let table = transcript.table().expect("table rendered");
    assert_eq!(table.active.map(|card| card.kind), Some(Number(Red, 5)));
    assert!(transcript.hand_renders() > 0);
    Ok(())
}

#[test]
fn illegal_bot_choice_falls_back_to_a_legal_action() -> Result<(), GameError> {
    let mut session = Session::builder(Uno { hand_size: 3 })
        .with_deck(deck())
        .with_bot_delay(Duration::ZERO)
        .with_bot(1, StubbornBot)
        .build()?;
    session.start()?;
    session.apply_action(0, play(&session, 0, Number(Red, 1)))?;
    assert_eq!(session.current_player(), 0);
    assert_eq!(hand_len(&session, 1), 2);
    Ok(())
}

#[test]
fn explicit_random_bot_plays_legally() -> Result<(), GameError> {
    let mut session = Session::builder(Uno { hand_size: 3 })
        .with_deck(deck())
        .with_bot_delay(Duration::ZERO)
        .with_bot(1, RandomBot::new(StdRng::seed_from_u64(4)))
        .build()?;
    session.start()?;
    session.apply_action(0, play(&session, 0, Number(Red, 1)))?;
    assert_eq!(session.current_player(), 0);
    assert_eq!(session.card_count(), session.deck_size());
    Ok(())
}

#[test]
fn bot_chooses_the_opening_colour_then_plays() -> Result<(), GameError> {
    let transcript = Transcript::new();
    let mut session = Session::builder(Uno { hand_size: 3 })
        .with_seats(vec![Seat::Bot, Seat::Human])
        .with_deck(stack(
            Wild,
            &[
                &[Number(Red, 1), Number(Blue, 2), Number(Blue, 3)],
                &[Number(Green, 1), Number(Green, 2), Number(Green, 3)],
            ],
            &[Number(Yellow, 8); 4],
        ))
        .with_bot_delay(Duration::ZERO)
        .with_frontend(transcript.clone())
        .build()?;
    session.start()?;
    assert!(transcript.contains("Bot chose BLUE!"));
    assert_eq!(session.current_player(), 1);
    assert_eq!(hand_len(&session, 0), 2);
    let top = session.active().map(|active| active.card);
    assert!(matches!(top, Some(Number(Blue, 2 | 3))));
    assert!(!session.is_valid_play(1, find(&session, 1, Number(Green, 1))));
    Ok(())
}
