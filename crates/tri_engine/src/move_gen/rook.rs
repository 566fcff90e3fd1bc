//! Rook movement rules

use super::Delta;
use crate::board::BoardState;
use crate::error::{MoveRejection, Verdict};
use crate::path::check_path;
use crate::types::Square;

/// Along a file or a rank; the level may change with it
pub fn validate(from: Square, to: Square, board: &BoardState) -> Verdict {
    let delta = Delta::between(from, to);
    if delta.file != 0 && delta.rank != 0 {
        return Err(MoveRejection::RookLine);
    }
    check_path(from, to, board)
}

pub(crate) fn is_straight(delta: Delta) -> bool {
    delta.file == 0 || delta.rank == 0
}
