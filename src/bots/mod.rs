pub mod ninety_nine;
pub mod phase10;
pub mod random;
pub mod registry;
pub mod uno;

pub use ninety_nine::NinetyNineBot;
pub use phase10::Phase10Bot;
pub use random::RandomBot;
pub use uno::UnoBot;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::Bot;
use crate::games::{NinetyNine, Phase10, Uno};
use crate::rules::Rules;

/// Games that ship with a scripted opponent. Sessions seat this bot on every
/// bot seat unless one is supplied explicitly.
pub trait HouseBot: Rules + Sized + 'static {
    fn house_bot(&self, seed: u64) -> Box<dyn Bot<Self>>;
}

impl HouseBot for Uno {
    fn house_bot(&self, seed: u64) -> Box<dyn Bot<Self>> {
        Box::new(UnoBot::new(StdRng::seed_from_u64(seed)))
    }
}

impl HouseBot for NinetyNine {
    fn house_bot(&self, _seed: u64) -> Box<dyn Bot<Self>> {
        Box::new(NinetyNineBot::new())
    }
}

impl HouseBot for Phase10 {
    fn house_bot(&self, seed: u64) -> Box<dyn Bot<Self>> {
        Box::new(Phase10Bot::new(StdRng::seed_from_u64(seed)))
    }
}
