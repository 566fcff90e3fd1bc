//! Coordinate / world model
//!
//! The world is the static square graph: 48 main-board squares plus the four
//! squares of every one of the twelve pins. It is built once per game and
//! never mutated; which pin squares are *reachable* at a given moment is a
//! question for [`crate::board::BoardState`], which combines the world with
//! the current [`AttackBoards`] placements.
//!
//! A `(file, rank)` coordinate with no square on any level is a gap. The `z`
//! and `e` files, for instance, only exist where an attack board hangs.

use std::collections::BTreeMap;

use crate::constants::{MAIN_FILE_MAX, MAIN_FILE_MIN};
use crate::error::{EngineError, EngineResult};
use crate::tracks::AttackBoards;
use crate::types::{Level, MainBoard, PinId, ResolvedLevel, Square};

#[derive(Debug, Clone)]
pub struct World {
    squares: Vec<Square>,
    columns: BTreeMap<(u8, u8), Vec<ResolvedLevel>>,
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

impl World {
    pub fn new() -> Self {
        let mut squares = Vec::with_capacity(96);
        for board in MainBoard::ALL {
            for rank in board.ranks() {
                for file in MAIN_FILE_MIN..=MAIN_FILE_MAX {
                    squares.push(Square::main(file, rank, board));
                }
            }
        }
        for pin in PinId::all() {
            for (file, rank) in pin.coordinates() {
                squares.push(Square::on_pin(file, rank, pin));
            }
        }

        let mut columns: BTreeMap<(u8, u8), Vec<ResolvedLevel>> = BTreeMap::new();
        for square in &squares {
            columns
                .entry(square.coordinate())
                .or_default()
                .push(square.level);
        }

        World { squares, columns }
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn contains(&self, square: Square) -> bool {
        self.columns
            .get(&square.coordinate())
            .is_some_and(|levels| levels.contains(&square.level))
    }

    pub fn square_at(&self, file: u8, rank: u8, level: ResolvedLevel) -> Option<Square> {
        let square = Square::new(file, rank, level);
        self.contains(square).then_some(square)
    }

    /// Every square stacked on `(file, rank)`, whether or not its pin is active
    pub fn squares_at(&self, file: u8, rank: u8) -> impl Iterator<Item = Square> + '_ {
        self.columns
            .get(&(file, rank))
            .into_iter()
            .flatten()
            .map(move |&level| Square::new(file, rank, level))
    }

    /// Parse a square id and make sure the square exists
    pub fn parse_square(&self, id: &str) -> EngineResult<Square> {
        let unknown = || EngineError::UnknownSquare {
            square: id.to_string(),
        };
        let square: Square = id.parse().map_err(|_| unknown())?;
        if self.contains(square) {
            Ok(square)
        } else {
            Err(unknown())
        }
    }
}

/// Physical level a logical board currently occupies
///
/// Main boards map to themselves; attack boards map to the pin they are on.
pub fn resolve_level(level: Level, boards: &AttackBoards) -> ResolvedLevel {
    match level {
        Level::Main(board) => ResolvedLevel::Main(board),
        Level::Attack(board) => ResolvedLevel::Pin(boards.placement(board).pin),
    }
}

/// Logical board standing on a physical level, `None` for an empty pin
pub fn logical_level(level: ResolvedLevel, boards: &AttackBoards) -> Option<Level> {
    match level {
        ResolvedLevel::Main(board) => Some(Level::Main(board)),
        ResolvedLevel::Pin(pin) => boards.board_at(pin).map(Level::Attack),
    }
}
