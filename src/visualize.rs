use std::fmt::{Display, Write};

use crate::action::{Action, Seat};
use crate::state::{GameStateView, RoundStatus};
use crate::turn::Direction;

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_running_total: bool,
    pub show_card_ids: bool,
    pub show_standings: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_running_total: true,
            show_card_ids: false,
            show_standings: true,
        }
    }
}

pub fn render_state<K: Display, X: Display>(state: &GameStateView<K, X>) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options<K: Display, X: Display>(
    state: &GameStateView<K, X>,
    options: VisualOptions,
) -> String {
    let mut out = String::new();
    let status = match state.status {
        RoundStatus::NotStarted => String::from("Not started"),
        RoundStatus::Ongoing => String::from("Ongoing"),
        RoundStatus::Won { winner } => format!("Finished (winner: Player {winner})"),
        RoundStatus::Stalemate => String::from("Finished (draw)"),
    };
    let _ = writeln!(out, "Round {}: {status}", state.round);
    let _ = writeln!(out, "Phase: {:?}", state.phase);
    let direction = match state.direction {
        Direction::Forward => "forward",
        Direction::Backward => "backward",
    };
    let _ = writeln!(
        out,
        "Current player: {}{}  |  Direction: {direction}",
        state.current_player,
        if state.current_player == state.self_player {
            " (You)"
        } else {
            ""
        }
    );
    let active = match (&state.active, &state.chosen) {
        (Some(card), Some(chosen)) => format!("{card} ({chosen})"),
        (Some(card), None) => card.to_string(),
        (None, _) => String::from("--"),
    };
    let _ = writeln!(out, "Active card: {active}");
    if options.show_running_total {
        let _ = writeln!(out, "Running total: {}", state.running_total);
    }
    if state.pending_draw > 0 {
        let _ = writeln!(out, "Must play or draw: {}", state.pending_draw);
    }
    let _ = writeln!(
        out,
        "Draw pile: {}  |  Discard pile: {}",
        state.draw_pile_count, state.discard_pile_count
    );
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let label_you = if player.id == state.self_player {
            " (You)"
        } else {
            ""
        };
        let seat = match player.seat {
            Seat::Human => "human",
            Seat::Bot => "bot",
        };
        let current_tag = if player.is_current { " <- current" } else { "" };
        let skipped_tag = if player.skipped { " [skipped]" } else { "" };
        let _ = writeln!(
            out,
            "  Player {}{} ({seat}) - {} cards{}{}",
            player.id, label_you, player.hand_size, skipped_tag, current_tag
        );
        if options.show_standings {
            let _ = writeln!(
                out,
                "    Rounds won: {}  |  Penalty: {}",
                player.record.rounds_won, player.record.score
            );
        }
    }
    if state.hand.is_empty() {
        let _ = writeln!(out, "Hand: (empty)");
    } else {
        let entries: Vec<String> = state
            .hand
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                if options.show_card_ids {
                    format!("{idx}:{} {}", card.kind, card.id)
                } else {
                    format!("{idx}:{}", card.kind)
                }
            })
            .collect();
        let _ = writeln!(out, "Hand: {}", entries.join("  "));
    }
    out
}

pub fn describe_action<K: Display + Copy, X: Display>(
    state: &GameStateView<K, X>,
    action: &Action<X>,
) -> String {
    match action {
        Action::Play { card, choice } => {
            let card_desc = state
                .hand_kind(*card)
                .map(|kind| kind.to_string())
                .unwrap_or_else(|| card.to_string());
            match choice {
                Some(choice) => format!("Play {card_desc} as {choice}"),
                None => format!("Play {card_desc}"),
            }
        }
        Action::Choose(choice) => format!("Choose {choice}"),
        Action::Cancel => String::from("Cancel"),
        Action::Draw => String::from("Draw a card"),
        Action::Pass => String::from("Pass"),
    }
}
