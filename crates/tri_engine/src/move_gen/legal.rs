//! Check-filtered move generation
//!
//! Pseudo-legal moves are played out on a copy of the piece list and kept
//! only when the mover's king is not attacked afterwards.

use super::attack::is_in_check;
use super::{pseudo_legal_destinations, validate_move};
use crate::board::BoardState;
use crate::error::{MoveRejection, Verdict};
use crate::types::{Color, Piece, Square};

/// Piece list after `piece` moves to `to`, capturing whatever stands there
///
/// The moved piece adopts the logical board standing on `to`. Flags are left
/// untouched; this is only used to probe king safety.
pub fn simulate_move(piece: &Piece, to: Square, board: &BoardState) -> Vec<Piece> {
    let level = board.logical_level(to);
    board
        .pieces
        .iter()
        .filter(|p| p.id == piece.id || board.square_of(p) != to)
        .map(|p| {
            let mut p = *p;
            if p.id == piece.id {
                p.file = to.file;
                p.rank = to.rank;
                if let Some(level) = level {
                    p.level = level;
                }
            }
            p
        })
        .collect()
}

pub fn leaves_king_in_check(piece: &Piece, to: Square, board: &BoardState) -> bool {
    let after = simulate_move(piece, to, board);
    is_in_check(piece.color, &board.with_pieces(&after))
}

/// Full validation: movement rules plus king safety
pub fn validate_legal_move(piece: &Piece, to: Square, board: &BoardState) -> Verdict {
    validate_move(piece, to, board)?;
    if leaves_king_in_check(piece, to, board) {
        return Err(MoveRejection::LeavesKingInCheck);
    }
    Ok(())
}

/// Destinations of `piece` that do not leave its own king in check
pub fn get_legal_moves_avoiding_check(piece: &Piece, board: &BoardState) -> Vec<Square> {
    pseudo_legal_destinations(piece, board)
        .into_iter()
        .filter(|&to| !leaves_king_in_check(piece, to, board))
        .collect()
}

/// Whether `color` has at least one legal piece move
pub fn has_any_legal_move(color: Color, board: &BoardState) -> bool {
    board.pieces_of(color).any(|piece| {
        pseudo_legal_destinations(piece, board)
            .into_iter()
            .any(|to| !leaves_king_in_check(piece, to, board))
    })
}

pub fn is_checkmate(color: Color, board: &BoardState) -> bool {
    is_in_check(color, board) && !has_any_legal_move(color, board)
}

pub fn is_stalemate(color: Color, board: &BoardState) -> bool {
    !is_in_check(color, board) && !has_any_legal_move(color, board)
}
