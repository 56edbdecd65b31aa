use std::error::Error;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cardtable::bots::registry::create_bot_from_spec;
use cardtable::{
    Action, Frontend, GameStateView, HandCard, HouseBot, NinetyNine, Phase10, PlayerId, RoundStatus,
    Seat, Session, TableView, Uno, describe_action, render_state,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Play Uno, 99 or Phase 10 in the terminal against scripted bots")]
struct Args {
    /// Game to play
    #[arg(value_enum, default_value = "uno")]
    game: GameKind,

    /// Seed for shuffling and bot tie-breaks
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of seats (2-6)
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Seat bots only, no human prompt
    #[arg(long)]
    auto: bool,

    /// Bot on every bot seat: heuristic or random[:seed]
    #[arg(long, default_value = "heuristic")]
    bot: String,

    /// Pause before each bot turn, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Stop after this many turns
    #[arg(long)]
    max_turns: Option<usize>,

    /// Print the final table as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameKind {
    Uno,
    NinetyNine,
    Phase10,
}

/// Prints narration; hands and table are shown at the prompt instead.
struct ConsoleFrontend;

impl<K, X> Frontend<K, X> for ConsoleFrontend {
    fn render_hand(&mut self, _player: PlayerId, _seat: Seat, _cards: &[HandCard<K>]) {}

    fn render_table(&mut self, _table: &TableView<K, X>) {}

    fn show_message(&mut self, message: &str) {
        println!("> {message}");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "cardtable=debug"
    } else {
        "cardtable=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.game {
        GameKind::Uno => run(Uno::default(), &args),
        GameKind::NinetyNine => run(NinetyNine::default(), &args),
        GameKind::Phase10 => run(Phase10::default(), &args),
    }
}

fn run<R>(rules: R, args: &Args) -> Result<(), Box<dyn Error>>
where
    R: HouseBot,
    R::Kind: Serialize,
    R::Choice: Serialize,
{
    let mut seats = vec![Seat::Bot; args.players];
    if !args.auto {
        if let Some(first) = seats.first_mut() {
            *first = Seat::Human;
        }
    }
    let delay = Duration::from_millis(args.delay_ms);

    let mut builder = Session::builder(rules)
        .with_seed(args.seed)
        .with_seats(seats.clone())
        // A non-zero virtual delay keeps bot turns one at a time.
        .with_bot_delay(delay.max(Duration::from_millis(1)))
        .with_frontend(ConsoleFrontend);
    for (index, seat) in seats.iter().enumerate() {
        if seat.is_bot() {
            let bot = create_bot_from_spec(builder.rules(), &args.bot, index, args.seed)?;
            builder = builder.with_boxed_bot(index, bot);
        }
    }
    let mut session = builder.build()?;

    info!(
        game = session.rules().name(),
        players = args.players,
        seed = args.seed,
        "starting simulation"
    );
    println!("Starting {} with {} players.\n", session.rules().name(), args.players);
    session.start()?;

    let mut turns = 0usize;
    loop {
        if session.status().is_over() {
            print_standings(&session);
            if session.standings().match_winner().is_some() {
                break;
            }
            session.next_round()?;
            continue;
        }
        if let Some(limit) = args.max_turns {
            if turns >= limit {
                println!("Max turn limit {limit} reached. Stopping simulation.");
                break;
            }
        }

        let current = session.current_player();
        if seats[current].is_bot() {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            if !session.fire_pending() {
                warn!(player = current, "no bot turn pending");
                break;
            }
        } else {
            let view = session.state_view(current)?;
            let legal = session.legal_actions(current)?;
            let Some(action) = prompt(&view, &legal)? else {
                println!("Exiting game at user's request.");
                break;
            };
            // Rejections are narrated through the frontend.
            let _ = session.apply_action(current, action);
        }
        turns += 1;
    }

    match session.standings().match_winner() {
        Some(winner) => println!("Match finished. Winner: Player {winner}."),
        None => println!("Simulation stopped before the match was decided."),
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.state_view(0)?)?);
    }
    Ok(())
}

fn print_standings<R: HouseBot>(session: &Session<R>) {
    match session.status() {
        RoundStatus::Won { winner } => println!("Round {} won by Player {winner}.", session.round()),
        _ => println!("Round {} ended without a winner.", session.round()),
    }
    for (player, record) in session.standings().records().iter().enumerate() {
        println!(
            "  Player {player}: {} round(s) won, {} penalty points",
            record.rounds_won, record.score
        );
    }
}

/// Asks the human for one of the legal actions. `None` means quit.
fn prompt<K, X>(
    state: &GameStateView<K, X>,
    legal_actions: &[Action<X>],
) -> Result<Option<Action<X>>, Box<dyn Error>>
where
    K: std::fmt::Display + Copy,
    X: std::fmt::Display + Copy,
{
    loop {
        println!("\n=== Your turn (player {}) ===", state.self_player);
        println!("{}", render_state(state));
        println!("Available actions:");
        for (index, action) in legal_actions.iter().enumerate() {
            println!("  [{index}] {}", describe_action(state, action));
        }
        println!("Type the action index, 'help' or 'q' to quit.");
        print!("Selection: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        if trimmed.eq_ignore_ascii_case("help") {
            println!("Enter the numeric index listed next to the action you wish to perform.");
            continue;
        }
        let Ok(choice) = trimmed.parse::<usize>() else {
            println!("Invalid input: '{trimmed}'. Please enter a number.");
            continue;
        };
        if let Some(action) = legal_actions.get(choice) {
            return Ok(Some(*action));
        }
        println!("Index out of range. Please choose a valid option.");
    }
}
