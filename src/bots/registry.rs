use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::Bot;
use crate::bots::{HouseBot, RandomBot};

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Seed handed to the bot on seat `index` when none is given explicitly.
pub fn derive_seed(seed: u64, index: usize) -> u64 {
    seed ^ ((index as u64 + 1) * 0x9E37_79B9)
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - heuristic (the game's house bot)
/// - random[:seed]
pub fn create_bot_from_spec<R: HouseBot>(
    rules: &R,
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Bot<R>>, Box<dyn Error>> {
    let seat_seed = derive_seed(seed, index);
    match label_for_spec(spec).as_str() {
        "heuristic" | "house" => Ok(rules.house_bot(seat_seed)),
        "random" => {
            let custom_seed = spec
                .split_once(':')
                .and_then(|(_, value)| value.trim().parse::<u64>().ok())
                .unwrap_or(seat_seed);
            Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(custom_seed))))
        }
        _ => Err(format!("unrecognized bot spec: {spec}").into()),
    }
}
