//! Pawn movement rules
//!
//! Pawns advance along the rank axis only and may change level on any move.
//! A straight advance needs its destination coordinate empty on every level;
//! a capture looks at the exact destination square.

use super::Delta;
use crate::board::BoardState;
use crate::error::{MoveRejection, Verdict};
use crate::types::{Color, Piece, Square};

pub fn validate(pawn: &Piece, from: Square, to: Square, board: &BoardState) -> Verdict {
    let direction = pawn.color.pawn_direction();
    let delta = Delta::between(from, to);

    // Capture diagonally
    if delta.rank == direction && delta.abs_file() == 1 {
        return match board.get_piece_color(to) {
            Some(color) if color != pawn.color => Ok(()),
            _ => Err(MoveRejection::PawnCaptureRequiresEnemy),
        };
    }

    if delta.file != 0 {
        return Err(MoveRejection::PawnDirection);
    }

    // Forward move
    if delta.rank == direction {
        return if board.is_coordinate_empty(to.file, to.rank) {
            Ok(())
        } else {
            Err(MoveRejection::PawnBlocked)
        };
    }

    // Double move from starting position
    if delta.rank == 2 * direction {
        if pawn.moved_by_ab {
            return Err(MoveRejection::PawnMovedByBoard);
        }
        if pawn.has_moved {
            return Err(MoveRejection::PawnAlreadyMoved);
        }
        let middle = (from.rank as i8 + direction) as u8;
        if board.visible_squares_at(from.file, middle).next().is_none() {
            return Err(MoveRejection::PathGap);
        }
        if !board.is_coordinate_empty(from.file, middle)
            || !board.is_coordinate_empty(to.file, to.rank)
        {
            return Err(MoveRejection::PawnBlocked);
        }
        return Ok(());
    }

    Err(MoveRejection::PawnDirection)
}

/// Squares a pawn threatens: one step forward diagonally, whatever stands there
pub fn attacks(color: Color, from: Square, target: Square) -> bool {
    let delta = Delta::between(from, target);
    delta.rank == color.pawn_direction() && delta.abs_file() == 1
}
