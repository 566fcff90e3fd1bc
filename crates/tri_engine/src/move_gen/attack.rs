//! Attack detection and check
//!
//! A piece attacks a square when it could move there if an enemy stood on
//! it: the movement geometry and the path are checked, the occupant of the
//! target is not. Pawns only ever attack diagonally forward.

use super::{bishop, is_pure_vertical, king, knight, pawn, queen, rook};
use crate::board::BoardState;
use crate::types::{Color, Piece, PieceKind, Square};

/// Check whether `piece` attacks `target`
pub fn attacks_square(piece: &Piece, target: Square, board: &BoardState) -> bool {
    let from = board.square_of(piece);
    if from == target || is_pure_vertical(from, target) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn::attacks(piece.color, from, target),
        PieceKind::Rook => rook::validate(from, target, board).is_ok(),
        PieceKind::Knight => knight::validate(from, target).is_ok(),
        PieceKind::Bishop => bishop::validate(from, target, board).is_ok(),
        PieceKind::Queen => queen::validate(from, target, board).is_ok(),
        PieceKind::King => king::validate(from, target).is_ok(),
    }
}

/// Check if any piece of `by_color` attacks `target`
pub fn is_square_attacked(target: Square, by_color: Color, board: &BoardState) -> bool {
    board
        .pieces_of(by_color)
        .any(|piece| attacks_square(piece, target, board))
}

/// Check if `color`'s king is under attack
///
/// A side without a king is never in check.
pub fn is_in_check(color: Color, board: &BoardState) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(king, color.opposite(), board))
}
