//! Pin adjacency graph
//!
//! Along a track a board steps to a neighbouring pin (see
//! [`PIN_NEIGHBOURS`](crate::constants::PIN_NEIGHBOURS)); across tracks it may
//! only move to the pin with the same number.

use std::iter;

use crate::types::{Color, PinId};

/// Pins a board on `pin` can reach in one move
pub fn neighbours(pin: PinId) -> impl Iterator<Item = PinId> {
    pin.along_track().chain(iter::once(pin.lateral()))
}

pub fn is_adjacent(from: PinId, to: PinId) -> bool {
    neighbours(from).any(|pin| pin == to)
}

/// Move between the queen's line and the king's line
pub fn is_lateral(from: PinId, to: PinId) -> bool {
    from.track() != to.track()
}

/// White boards stay on pins 1 to 3, black boards on pins 4 to 6
pub fn within_half(owner: Color, pin: PinId) -> bool {
    match owner {
        Color::White => (1..=3).contains(&pin.number()),
        Color::Black => (4..=6).contains(&pin.number()),
    }
}
