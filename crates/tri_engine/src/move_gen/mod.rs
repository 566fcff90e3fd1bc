//! Piece movement validation
//!
//! One validator per piece type, each a pure function over a [`BoardState`].
//! [`validate_move`] applies the rules shared by every piece first (the
//! destination must be a visible square, may not hold a friendly piece, and
//! may not sit straight above or below the origin) and then dispatches.
//!
//! Moves are judged on the (file, rank) projection plus a level axis measured
//! with [`ResolvedLevel::distance`](crate::types::ResolvedLevel::distance).
//!
//! # Module Structure
//!
//! - `pawn`, `rook`, `knight`, `bishop`, `queen`, `king` - per-piece rules
//! - `attack` - attack detection and check
//! - `legal` - check filtering, checkmate and stalemate

pub mod attack;
pub mod bishop;
pub mod king;
pub mod knight;
pub mod legal;
pub mod pawn;
pub mod queen;
pub mod rook;


use tracing::trace;

use crate::board::BoardState;
use crate::error::{MoveRejection, Verdict};
use crate::types::{Piece, PieceKind, Square};

/// Signed planar change and unsigned level distance of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta {
    pub file: i8,
    pub rank: i8,
    pub level: u8,
}

impl Delta {
    pub fn between(from: Square, to: Square) -> Self {
        Delta {
            file: to.file as i8 - from.file as i8,
            rank: to.rank as i8 - from.rank as i8,
            level: from.level.distance(to.level),
        }
    }

    pub fn abs_file(self) -> u8 {
        self.file.unsigned_abs()
    }

    pub fn abs_rank(self) -> u8 {
        self.rank.unsigned_abs()
    }
}

/// Same (file, rank), different level
pub fn is_pure_vertical(from: Square, to: Square) -> bool {
    from.coordinate() == to.coordinate() && from.level != to.level
}

/// Validate a move of `piece` to `to`, ignoring turn order and king safety
pub fn validate_move(piece: &Piece, to: Square, board: &BoardState) -> Verdict {
    let from = board.square_of(piece);
    if from == to {
        return Err(MoveRejection::SameSquare);
    }
    if !board.is_visible(to) {
        return Err(MoveRejection::NoSuchSquare);
    }
    if board.get_piece_color(to) == Some(piece.color) {
        return Err(MoveRejection::OwnPiece);
    }
    if is_pure_vertical(from, to) {
        return Err(MoveRejection::PureVertical);
    }

    let verdict = match piece.kind {
        PieceKind::Pawn => pawn::validate(piece, from, to, board),
        PieceKind::Rook => rook::validate(from, to, board),
        PieceKind::Knight => knight::validate(from, to),
        PieceKind::Bishop => bishop::validate(from, to, board),
        PieceKind::Queen => queen::validate(from, to, board),
        PieceKind::King => king::validate(from, to),
    };

    if let Err(reason) = verdict {
        trace!(piece = %piece.id, kind = %piece.kind, %from, %to, %reason, "move rejected");
    }
    verdict
}

/// All squares the piece could move to before check filtering
pub fn pseudo_legal_destinations(piece: &Piece, board: &BoardState) -> Vec<Square> {
    board
        .visible_squares()
        .filter(|&to| validate_move(piece, to, board).is_ok())
        .collect()
}
