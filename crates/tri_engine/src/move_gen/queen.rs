//! Queen movement rules

use super::{bishop, rook, Delta};
use crate::board::BoardState;
use crate::error::{MoveRejection, Verdict};
use crate::types::Square;

/// Legal whenever the same move is legal for a rook or a bishop
pub fn validate(from: Square, to: Square, board: &BoardState) -> Verdict {
    let as_rook = rook::validate(from, to, board);
    if as_rook.is_ok() {
        return as_rook;
    }
    let as_bishop = bishop::validate(from, to, board);
    if as_bishop.is_ok() {
        return as_bishop;
    }

    let delta = Delta::between(from, to);
    if rook::is_straight(delta) {
        as_rook
    } else if bishop::is_diagonal(delta) {
        as_bishop
    } else {
        Err(MoveRejection::QueenLine)
    }
}
