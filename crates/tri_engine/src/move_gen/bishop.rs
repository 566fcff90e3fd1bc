//! Bishop movement rules
//!
//! Colour parity is checked before geometry: a bishop may never change
//! square colour, whichever diagonal it takes.

use super::Delta;
use crate::board::BoardState;
use crate::error::{MoveRejection, Verdict};
use crate::path::check_path;
use crate::types::Square;

pub fn validate(from: Square, to: Square, board: &BoardState) -> Verdict {
    if from.color_parity() != to.color_parity() {
        return Err(MoveRejection::BishopColor);
    }
    if !is_diagonal(Delta::between(from, to)) {
        return Err(MoveRejection::BishopDiagonal);
    }
    check_path(from, to, board)
}

/// File/rank diagonal on the projection, or a file/level or rank/level diagonal
pub(crate) fn is_diagonal(delta: Delta) -> bool {
    let (file, rank, level) = (delta.abs_file(), delta.abs_rank(), delta.level);
    (file == rank && file > 0)
        || (file == 0 && rank > 0 && rank == level)
        || (rank == 0 && file > 0 && file == level)
}
