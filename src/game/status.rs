//! Check, checkmate and stalemate status of the side to move
//!
//! Recomputed from the position after every action; never derived from the
//! move history.

use serde::{Deserialize, Serialize};
use tri_engine::move_gen::attack::is_in_check;
use tri_engine::move_gen::legal::has_any_legal_move;
use tri_engine::{BoardState, Color};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub winner: Option<Color>,
    pub game_over: bool,
}

impl GameStatus {
    /// Status of `to_move` in `state`
    ///
    /// Only piece moves count as a way out: a side whose pieces are all stuck
    /// is mated or stalemated even if it could still move an attack board.
    pub fn evaluate(to_move: Color, state: &BoardState) -> Self {
        let is_check = is_in_check(to_move, state);
        let stuck = !has_any_legal_move(to_move, state);
        let is_checkmate = is_check && stuck;
        let is_stalemate = !is_check && stuck;
        GameStatus {
            is_check,
            is_checkmate,
            is_stalemate,
            winner: is_checkmate.then(|| to_move.opposite()),
            game_over: is_checkmate || is_stalemate,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// One-line description for display
    pub fn message(&self, to_move: Color) -> String {
        match (self.winner, self.is_stalemate, self.is_check) {
            (Some(winner), _, _) => format!("Checkmate! {winner} wins"),
            (None, true, _) => "Stalemate - draw".to_string(),
            (None, false, true) => format!("{to_move} to move, in check"),
            (None, false, false) => format!("{to_move} to move"),
        }
    }
}
