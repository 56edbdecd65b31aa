use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::Color;
use crate::rules::{Active, Effect, Opening, Rules};
use crate::turn::TurnState;

pub const UNO_HAND_SIZE: usize = 7;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum UnoCard {
    Number(Color, u8),
    Skip(Color),
    Reverse(Color),
    DrawTwo(Color),
    Wild,
    WildDrawFour,
}

impl UnoCard {
    /// Printed colour. Wilds have none until played.
    pub fn color(self) -> Option<Color> {
        match self {
            UnoCard::Number(color, _)
            | UnoCard::Skip(color)
            | UnoCard::Reverse(color)
            | UnoCard::DrawTwo(color) => Some(color),
            UnoCard::Wild | UnoCard::WildDrawFour => None,
        }
    }

    pub fn is_wild(self) -> bool {
        matches!(self, UnoCard::Wild | UnoCard::WildDrawFour)
    }

    pub fn is_action(self) -> bool {
        matches!(
            self,
            UnoCard::Skip(_) | UnoCard::Reverse(_) | UnoCard::DrawTwo(_)
        )
    }

    /// Same number, or same action symbol.
    pub fn same_rank(self, other: UnoCard) -> bool {
        match (self, other) {
            (UnoCard::Number(_, a), UnoCard::Number(_, b)) => a == b,
            (UnoCard::Skip(_), UnoCard::Skip(_))
            | (UnoCard::Reverse(_), UnoCard::Reverse(_))
            | (UnoCard::DrawTwo(_), UnoCard::DrawTwo(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for UnoCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnoCard::Number(color, value) => write!(f, "{} {value}", color.title()),
            UnoCard::Skip(color) => write!(f, "{} Skip", color.title()),
            UnoCard::Reverse(color) => write!(f, "{} Reverse", color.title()),
            UnoCard::DrawTwo(color) => write!(f, "{} Draw Two", color.title()),
            UnoCard::Wild => f.write_str("Wild"),
            UnoCard::WildDrawFour => f.write_str("Wild Draw Four"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uno {
    pub hand_size: usize,
}

impl Default for Uno {
    fn default() -> Self {
        Self {
            hand_size: UNO_HAND_SIZE,
        }
    }
}

impl Rules for Uno {
    type Kind = UnoCard;
    type Choice = Color;

    fn name(&self) -> &'static str {
        "Uno"
    }

    fn deck_config(&self) -> Vec<(UnoCard, usize)> {
        let mut config = Vec::with_capacity(Color::ALL.len() * 13 + 2);
        for color in Color::ALL {
            config.push((UnoCard::Number(color, 0), 1));
            for value in 1..=9 {
                config.push((UnoCard::Number(color, value), 2));
            }
            config.push((UnoCard::Skip(color), 2));
            config.push((UnoCard::Reverse(color), 2));
            config.push((UnoCard::DrawTwo(color), 2));
        }
        config.push((UnoCard::Wild, 4));
        config.push((UnoCard::WildDrawFour, 4));
        config
    }

    fn hand_size(&self) -> usize {
        self.hand_size
    }

    fn can_open(&self, kind: &UnoCard) -> bool {
        *kind != UnoCard::WildDrawFour
    }

    fn open(&self, kind: &UnoCard, _turn: &mut TurnState) -> Opening {
        match kind {
            UnoCard::Number(..) => Opening::Plain,
            UnoCard::Skip(_) => Opening::SkipFirst,
            UnoCard::Reverse(_) => Opening::Reverse,
            UnoCard::DrawTwo(_) => Opening::DrawFirst(2),
            UnoCard::Wild | UnoCard::WildDrawFour => Opening::Choose,
        }
    }

    fn is_valid_play(&self, kind: &UnoCard, active: &Active<UnoCard, Color>, _turn: &TurnState) -> bool {
        if kind.is_wild() {
            return true;
        }
        let Some(active_color) = active.card.color().or(active.chosen) else {
            // Unresolved wild on the pile.
            return true;
        };
        kind.color() == Some(active_color) || kind.same_rank(active.card)
    }

    fn needs_choice(&self, kind: &UnoCard) -> bool {
        kind.is_wild()
    }

    fn choices(&self, kind: &UnoCard, _turn: &TurnState) -> Vec<Color> {
        if kind.is_wild() {
            Color::ALL.to_vec()
        } else {
            Vec::new()
        }
    }

    fn resolve(&self, kind: &UnoCard, _choice: Option<Color>, _turn: &mut TurnState) -> Effect {
        match kind {
            UnoCard::Number(..) | UnoCard::Wild => Effect::Advance,
            UnoCard::Skip(_) => Effect::Skip,
            UnoCard::Reverse(_) => Effect::Reverse,
            UnoCard::DrawTwo(_) => Effect::ForceDraw(2),
            UnoCard::WildDrawFour => Effect::ForceDraw(4),
        }
    }

    fn penalty(&self, kind: &UnoCard) -> u32 {
        match kind {
            UnoCard::Number(_, value) => u32::from(*value),
            UnoCard::Skip(_) | UnoCard::Reverse(_) | UnoCard::DrawTwo(_) => 20,
            UnoCard::Wild | UnoCard::WildDrawFour => 50,
        }
    }

    fn last_card_call(&self) -> Option<&'static str> {
        Some("UNO")
    }

    fn choice_prompt(&self) -> &'static str {
        "Choose a color!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(card: UnoCard, chosen: Option<Color>) -> Active<UnoCard, Color> {
        Active { card, chosen }
    }

    #[test]
    fn test_deck_has_108_cards() {
        let total: usize = Uno::default().deck_config().iter().map(|(_, n)| n).sum();
        assert_eq!(total, 108);
    }

    #[test]
    fn test_matches_colour_or_rank() {
        let rules = Uno::default();
        let turn = TurnState::new(2, 0);
        let red_five = active(UnoCard::Number(Color::Red, 5), None);
        assert!(rules.is_valid_play(&UnoCard::Number(Color::Red, 2), &red_five, &turn));
        assert!(rules.is_valid_play(&UnoCard::Number(Color::Blue, 5), &red_five, &turn));
        assert!(rules.is_valid_play(&UnoCard::Skip(Color::Red), &red_five, &turn));
        assert!(!rules.is_valid_play(&UnoCard::Skip(Color::Green), &red_five, &turn));

        let blue_skip = active(UnoCard::Skip(Color::Blue), None);
        assert!(rules.is_valid_play(&UnoCard::Skip(Color::Yellow), &blue_skip, &turn));
        assert!(!rules.is_valid_play(&UnoCard::Reverse(Color::Yellow), &blue_skip, &turn));
    }

    #[test]
    fn test_played_wild_uses_chosen_colour() {
        let rules = Uno::default();
        let turn = TurnState::new(2, 0);
        let wild = active(UnoCard::Wild, Some(Color::Green));
        assert!(rules.is_valid_play(&UnoCard::Number(Color::Green, 9), &wild, &turn));
        assert!(!rules.is_valid_play(&UnoCard::Number(Color::Red, 9), &wild, &turn));
        assert!(rules.is_valid_play(&UnoCard::WildDrawFour, &wild, &turn));
    }

    #[test]
    fn test_penalties() {
        let rules = Uno::default();
        assert_eq!(rules.penalty(&UnoCard::Number(Color::Red, 7)), 7);
        assert_eq!(rules.penalty(&UnoCard::DrawTwo(Color::Red)), 20);
        assert_eq!(rules.penalty(&UnoCard::WildDrawFour), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(UnoCard::Number(Color::Yellow, 3).to_string(), "Yellow 3");
        assert_eq!(UnoCard::DrawTwo(Color::Blue).to_string(), "Blue Draw Two");
        assert_eq!(UnoCard::WildDrawFour.to_string(), "Wild Draw Four");
    }
}
