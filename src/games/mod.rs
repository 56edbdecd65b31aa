pub mod ninety_nine;
pub mod phase10;
pub mod uno;

pub use ninety_nine::{NinetyNine, NinetyNineCard};
pub use phase10::{NoChoice, Phase10, Phase10Card};
pub use uno::{Uno, UnoCard};
