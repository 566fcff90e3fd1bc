//! Tri-dimensional chess
//!
//! The rules live in the `tri_engine` crate; this crate wraps them in a
//! stateful [`game::Game`], a JSON save format, user settings and logging.

pub mod core;
pub mod game;

pub use game::{Game, GameError, GameResult, GameSnapshot, MoveRecord, MoveRequest};
