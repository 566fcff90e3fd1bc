//! Who may move an attack board
//!
//! The nominal owner (white for `WQL`/`WKL`, black for `BQL`/`BKL`) controls
//! its board unless the opponent has a strict majority of the pieces aboard.
//! That override is the single predicate [`occupancy_override`].

use std::cmp::Ordering;

use crate::types::{AttackBoardId, Color, Piece};

/// Pieces standing on `board`
pub fn passengers(board: AttackBoardId, pieces: &[Piece]) -> impl Iterator<Item = &Piece> {
    pieces.iter().filter(move |p| p.is_aboard(board))
}

/// Colour holding a strict majority aboard `board`, if any
pub fn occupancy_override(board: AttackBoardId, pieces: &[Piece]) -> Option<Color> {
    let (white, black) = passengers(board, pieces).fold((0usize, 0usize), |(w, b), p| {
        match p.color {
            Color::White => (w + 1, b),
            Color::Black => (w, b + 1),
        }
    });
    match white.cmp(&black) {
        Ordering::Greater => Some(Color::White),
        Ordering::Less => Some(Color::Black),
        Ordering::Equal => None,
    }
}

/// Colour allowed to move `board`: the majority aboard, else the owner
pub fn board_controller(board: AttackBoardId, pieces: &[Piece]) -> Color {
    occupancy_override(board, pieces).unwrap_or(board.owner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Level, PieceKind};

    fn aboard(id: u16, color: Color, board: AttackBoardId) -> Piece {
        Piece::new(id, PieceKind::Pawn, color, 0, 0, Level::Attack(board))
    }

    #[test]
    fn test_empty_board_belongs_to_owner() {
        assert_eq!(board_controller(AttackBoardId::BQL, &[]), Color::Black);
        assert_eq!(occupancy_override(AttackBoardId::BQL, &[]), None);
    }

    #[test]
    fn test_opponent_majority_takes_control() {
        let pieces = [aboard(1, Color::Black, AttackBoardId::WQL)];
        assert_eq!(board_controller(AttackBoardId::WQL, &pieces), Color::Black);
    }

    #[test]
    fn test_tie_leaves_owner_in_control() {
        let pieces = [
            aboard(1, Color::Black, AttackBoardId::WKL),
            aboard(2, Color::White, AttackBoardId::WKL),
        ];
        assert_eq!(occupancy_override(AttackBoardId::WKL, &pieces), None);
        assert_eq!(board_controller(AttackBoardId::WKL, &pieces), Color::White);
    }

    #[test]
    fn test_mixed_majority_counts_only_pieces_aboard() {
        let pieces = [
            aboard(1, Color::White, AttackBoardId::BKL),
            aboard(2, Color::White, AttackBoardId::BKL),
            aboard(3, Color::Black, AttackBoardId::BKL),
            aboard(4, Color::Black, AttackBoardId::BQL),
            aboard(5, Color::Black, AttackBoardId::BQL),
        ];
        assert_eq!(board_controller(AttackBoardId::BKL, &pieces), Color::White);
        assert_eq!(board_controller(AttackBoardId::BQL, &pieces), Color::Black);
    }
}
