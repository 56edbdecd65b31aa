#![allow(dead_code)]

use cardtable::{Action, CardId, Rules, Session};

/// Builds an injected deck from the order cards come off it: the opening
/// card, then hands dealt round-robin, then whatever is drawn afterwards.
pub fn stack<K: Copy>(opening: K, hands: &[&[K]], rest: &[K]) -> Vec<K> {
    let mut order = vec![opening];
    let size = hands.first().map_or(0, |hand| hand.len());
    for index in 0..size {
        for hand in hands {
            order.push(hand[index]);
        }
    }
    order.extend_from_slice(rest);
    order.reverse();
    order
}

/// Id of the first card of `kind` in a player's hand.
pub fn find<R: Rules>(session: &Session<R>, player: usize, kind: R::Kind) -> CardId {
    session
        .hand(player)
        .and_then(|hand| hand.iter().find(|card| card.kind == kind))
        .map(|card| card.id)
        .unwrap_or_else(|| panic!("player {player} does not hold {kind}"))
}

pub fn play<R: Rules>(session: &Session<R>, player: usize, kind: R::Kind) -> Action<R::Choice> {
    Action::Play {
        card: find(session, player, kind),
        choice: None,
    }
}

pub fn play_as<R: Rules>(
    session: &Session<R>,
    player: usize,
    kind: R::Kind,
    choice: R::Choice,
) -> Action<R::Choice> {
    Action::Play {
        card: find(session, player, kind),
        choice: Some(choice),
    }
}

pub fn hand_len<R: Rules>(session: &Session<R>, player: usize) -> usize {
    session.hand(player).map_or(0, <[_]>::len)
}
