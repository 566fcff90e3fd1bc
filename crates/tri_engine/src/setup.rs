//! Initial position
//!
//! Each side keeps its rooks, queen, king and four pawns on its two attack
//! boards; minor pieces and the remaining pawns stand on its main board.
//! Ids run 1..=16 for white and 17..=32 for black.

use crate::types::{AttackBoardId, Color, Level, MainBoard, Piece, PieceKind};

/// One row of the starting layout: kind, file, rank offset from the back rank
type Placement = (PieceKind, u8, u8);

const QUEEN_LINE: [Placement; 4] = [
    (PieceKind::Rook, 0, 0),
    (PieceKind::Queen, 1, 0),
    (PieceKind::Pawn, 0, 1),
    (PieceKind::Pawn, 1, 1),
];

const KING_LINE: [Placement; 4] = [
    (PieceKind::King, 4, 0),
    (PieceKind::Rook, 5, 0),
    (PieceKind::Pawn, 4, 1),
    (PieceKind::Pawn, 5, 1),
];

const MAIN: [Placement; 8] = [
    (PieceKind::Knight, 1, 1),
    (PieceKind::Bishop, 2, 1),
    (PieceKind::Bishop, 3, 1),
    (PieceKind::Knight, 4, 1),
    (PieceKind::Pawn, 1, 2),
    (PieceKind::Pawn, 2, 2),
    (PieceKind::Pawn, 3, 2),
    (PieceKind::Pawn, 4, 2),
];

/// The 32 pieces of a new game
pub fn initial_pieces() -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(32);
    for color in Color::ALL {
        let (ql, kl, main) = match color {
            Color::White => (AttackBoardId::WQL, AttackBoardId::WKL, MainBoard::W),
            Color::Black => (AttackBoardId::BQL, AttackBoardId::BKL, MainBoard::B),
        };
        let groups = [
            (Level::Attack(ql), &QUEEN_LINE[..]),
            (Level::Attack(kl), &KING_LINE[..]),
            (Level::Main(main), &MAIN[..]),
        ];
        for (level, layout) in groups {
            for &(kind, file, offset) in layout {
                let id = pieces.len() as u16 + 1;
                pieces.push(Piece::new(id, kind, color, file, rank_for(color, offset), level));
            }
        }
    }
    pieces
}

fn rank_for(color: Color, offset: u8) -> u8 {
    match color {
        Color::White => offset,
        Color::Black => 9 - offset,
    }
}
