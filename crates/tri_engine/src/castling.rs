//! Castling
//!
//! Every castle happens on the back rank of the two home attack boards and
//! relocates king and rook in one step, without walking a path:
//!
//! - kingside-kl: king `d0`/`d9` swaps with the king's-line rook `e0`/`e9`
//! - queenside: king swaps with the queen's-line rook `z0`/`z9`
//! - kingside-ql: the king's-line rook takes the king's square and the king
//!   crosses to `a0`/`a9` on the queen's-line board, which must be empty
//!
//! Each piece takes over the file, rank and logical board of its target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::BoardState;
use crate::constants::{BLACK_BACK_RANK, WHITE_BACK_RANK};
use crate::error::{CastleRejection, ParseError};
use crate::move_gen::attack::{is_in_check, is_square_attacked};
use crate::types::{AttackBoardId, Color, Level, Piece, PieceId, PieceKind, Square, Track};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    #[serde(rename = "kingside-kl")]
    KingsideKl,
    #[serde(rename = "kingside-ql")]
    KingsideQl,
    #[serde(rename = "queenside")]
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 3] = [
        CastleSide::KingsideKl,
        CastleSide::KingsideQl,
        CastleSide::Queenside,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CastleSide::KingsideKl => "kingside-kl",
            CastleSide::KingsideQl => "kingside-ql",
            CastleSide::Queenside => "queenside",
        }
    }

    /// Track and file of the rook taking part
    fn rook_home(self) -> (Track, u8) {
        match self {
            CastleSide::KingsideKl | CastleSide::KingsideQl => (Track::KL, 5),
            CastleSide::Queenside => (Track::QL, 0),
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CastleSide {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CastleSide::ALL
            .into_iter()
            .find(|side| side.as_str() == s)
            .ok_or_else(|| ParseError::InvalidCastle(s.to_string()))
    }
}

/// A validated castle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePlan {
    pub color: Color,
    pub side: CastleSide,
    pub king: PieceId,
    pub rook: PieceId,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

fn back_rank(color: Color) -> u8 {
    match color {
        Color::White => WHITE_BACK_RANK,
        Color::Black => BLACK_BACK_RANK,
    }
}

/// Home square of the piece on `file` of `color`'s `track` board
fn home_square(color: Color, track: Track, file: u8) -> Square {
    Square::on_pin(file, back_rank(color), AttackBoardId::of(color, track).home_pin())
}

/// Check one castle for `color`
///
/// `board_activated` tells whether an attack board of `color` already moved
/// this turn.
pub fn validate_castle(
    color: Color,
    side: CastleSide,
    state: &BoardState,
    board_activated: bool,
) -> Result<CastlePlan, CastleRejection> {
    let verdict = check(color, side, state, board_activated);
    if let Err(reason) = verdict {
        trace!(%color, %side, %reason, "castle rejected");
    }
    verdict
}

fn check(
    color: Color,
    side: CastleSide,
    state: &BoardState,
    board_activated: bool,
) -> Result<CastlePlan, CastleRejection> {
    let home_boards = [
        AttackBoardId::of(color, Track::QL),
        AttackBoardId::of(color, Track::KL),
    ];
    if !home_boards
        .iter()
        .all(|&board| state.boards.placement(board).is_home(board))
    {
        return Err(CastleRejection::BoardsNotHome);
    }

    let king_from = home_square(color, Track::KL, 4);
    let king = state
        .piece_at(king_from)
        .filter(|p| p.kind == PieceKind::King && p.color == color)
        .ok_or(CastleRejection::KingNotHome)?;
    if king.has_moved {
        return Err(CastleRejection::KingMoved);
    }

    let (rook_track, rook_file) = side.rook_home();
    let rook_from = home_square(color, rook_track, rook_file);
    let rook = state
        .piece_at(rook_from)
        .filter(|p| p.kind == PieceKind::Rook && p.color == color)
        .ok_or(CastleRejection::RookNotHome)?;
    if rook.has_moved {
        return Err(CastleRejection::RookMoved);
    }

    if board_activated {
        return Err(CastleRejection::BoardActivated);
    }

    let king_to = match side {
        CastleSide::KingsideQl => home_square(color, Track::QL, 1),
        CastleSide::KingsideKl | CastleSide::Queenside => rook_from,
    };
    if king_to != rook_from && !state.is_empty(king_to) {
        return Err(CastleRejection::SquareOccupied);
    }

    if is_in_check(color, state) {
        return Err(CastleRejection::InCheck);
    }
    if is_square_attacked(king_to, color.opposite(), state) {
        return Err(CastleRejection::SquareAttacked);
    }

    let plan = CastlePlan {
        color,
        side,
        king: king.id,
        rook: rook.id,
        king_from,
        king_to,
        rook_from,
        rook_to: king_from,
    };
    let after = relocate(&plan, state);
    if is_in_check(color, &state.with_pieces(&after)) {
        return Err(CastleRejection::SquareAttacked);
    }
    Ok(plan)
}

/// Castles currently open to `color`
pub fn get_castling_options(
    color: Color,
    state: &BoardState,
    board_activated: bool,
) -> Vec<CastleSide> {
    CastleSide::ALL
        .into_iter()
        .filter(|&side| check(color, side, state, board_activated).is_ok())
        .collect()
}

/// Piece list with king and rook moved to their targets
fn relocate(plan: &CastlePlan, state: &BoardState) -> Vec<Piece> {
    let target = |square: Square| -> Option<(u8, u8, Level)> {
        state
            .logical_level(square)
            .map(|level| (square.file, square.rank, level))
    };
    let (Some(king_at), Some(rook_at)) = (target(plan.king_to), target(plan.rook_to)) else {
        return state.pieces.to_vec();
    };

    state
        .pieces
        .iter()
        .map(|p| {
            let mut p = *p;
            let target = if p.id == plan.king {
                Some(king_at)
            } else if p.id == plan.rook {
                Some(rook_at)
            } else {
                None
            };
            if let Some((file, rank, level)) = target {
                p.file = file;
                p.rank = rank;
                p.level = level;
                p.has_moved = true;
            }
            p.moved_as_passenger = false;
            p
        })
        .collect()
}

/// Validate and perform a castle, returning the new piece list
pub fn execute_castle(
    color: Color,
    side: CastleSide,
    state: &BoardState,
    board_activated: bool,
) -> Result<(CastlePlan, Vec<Piece>), CastleRejection> {
    let plan = validate_castle(color, side, state, board_activated)?;
    let pieces = relocate(&plan, state);
    debug!(%color, %side, king_to = %plan.king_to, "castled");
    Ok((plan, pieces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::initial_pieces;
    use crate::tracks::{AttackBoards, BoardPlacement};
    use crate::types::{Level, MainBoard, PinId, Rotation};
    use crate::world::World;

    fn without(pieces: &[Piece], squares: &[(u8, u8, Level)]) -> Vec<Piece> {
        pieces
            .iter()
            .copied()
            .filter(|p| !squares.contains(&(p.file, p.rank, p.level)))
            .collect()
    }

    fn find(pieces: &[Piece], id: PieceId) -> Piece {
        *pieces.iter().find(|p| p.id == id).expect("castled piece")
    }

    #[test]
    fn test_options_from_start() {
        let world = World::new();
        let boards = AttackBoards::home();
        let pieces = initial_pieces();
        let state = BoardState::new(&world, &boards, &pieces);
        assert_eq!(
            get_castling_options(Color::White, &state, false),
            vec![CastleSide::KingsideKl, CastleSide::Queenside]
        );
        assert_eq!(
            get_castling_options(Color::Black, &state, false),
            vec![CastleSide::KingsideKl, CastleSide::Queenside]
        );
        // The queen still stands on a0
        assert_eq!(
            validate_castle(Color::White, CastleSide::KingsideQl, &state, false),
            Err(CastleRejection::SquareOccupied)
        );
    }

    #[test]
    fn test_kingside_kl_swaps_on_king_line() {
        let world = World::new();
        let boards = AttackBoards::home();
        let pieces = initial_pieces();
        let state = BoardState::new(&world, &boards, &pieces);

        let (plan, after) = execute_castle(Color::White, CastleSide::KingsideKl, &state, false)
            .expect("kingside-kl castle");
        let king = find(&after, plan.king);
        let rook = find(&after, plan.rook);
        assert_eq!((king.file, king.rank, king.level), (5, 0, Level::Attack(AttackBoardId::WKL)));
        assert_eq!((rook.file, rook.rank, rook.level), (4, 0, Level::Attack(AttackBoardId::WKL)));
    }

    #[test]
    fn test_queenside_swaps_across_boards_with_queen_in_place() {
        let world = World::new();
        let boards = AttackBoards::home();
        let pieces = initial_pieces();
        let state = BoardState::new(&world, &boards, &pieces);

        let (plan, after) = execute_castle(Color::White, CastleSide::Queenside, &state, false)
            .expect("queenside castle");
        assert_eq!(plan.king_to.to_string(), "z0QL1");
        let king = find(&after, plan.king);
        let rook = find(&after, plan.rook);
        assert_eq!((king.file, king.rank, king.level), (0, 0, Level::Attack(AttackBoardId::WQL)));
        assert_eq!((rook.file, rook.rank, rook.level), (4, 0, Level::Attack(AttackBoardId::WKL)));
        assert!(king.has_moved && rook.has_moved);
    }

    #[test]
    fn test_kingside_ql_after_queen_leaves() {
        let world = World::new();
        let boards = AttackBoards::home();
        let pieces = without(&initial_pieces(), &[(1, 9, Level::Attack(AttackBoardId::BQL))]);
        let state = BoardState::new(&world, &boards, &pieces);
        assert_eq!(
            get_castling_options(Color::Black, &state, false),
            CastleSide::ALL.to_vec()
        );

        let (plan, after) = execute_castle(Color::Black, CastleSide::KingsideQl, &state, false)
            .expect("kingside-ql castle");
        assert_eq!(plan.king_to.to_string(), "a9QL6");
        assert_eq!(plan.rook_to.to_string(), "d9KL6");
        let king = find(&after, plan.king);
        let rook = find(&after, plan.rook);
        assert_eq!((king.file, king.rank, king.level), (1, 9, Level::Attack(AttackBoardId::BQL)));
        assert_eq!((rook.file, rook.rank, rook.level), (4, 9, Level::Attack(AttackBoardId::BKL)));
        // The queen's-line rook is untouched
        assert!(after
            .iter()
            .any(|p| p.kind == PieceKind::Rook && (p.file, p.rank) == (0, 9) && !p.has_moved));
    }

    #[test]
    fn test_castle_side_names() {
        for side in CastleSide::ALL {
            assert_eq!(side.as_str().parse::<CastleSide>(), Ok(side));
        }
        assert!("kingside".parse::<CastleSide>().is_err());
    }

    #[test]
    fn test_castle_blocked_when_board_moved_or_activated() {
        let world = World::new();
        let pieces = initial_pieces();
        let mut boards = AttackBoards::home();
        boards.set(
            AttackBoardId::WQL,
            BoardPlacement::new(PinId::new(Track::QL, 1), Rotation::Deg180),
        );
        let state = BoardState::new(&world, &boards, &pieces);
        assert_eq!(
            validate_castle(Color::White, CastleSide::KingsideKl, &state, false),
            Err(CastleRejection::BoardsNotHome)
        );

        let boards = AttackBoards::home();
        let state = BoardState::new(&world, &boards, &pieces);
        assert_eq!(
            validate_castle(Color::White, CastleSide::KingsideKl, &state, true),
            Err(CastleRejection::BoardActivated)
        );
    }

    #[test]
    fn test_castle_refused_for_moved_rook_or_in_check() {
        let world = World::new();
        let boards = AttackBoards::home();
        let mut pieces = initial_pieces();
        let rook = pieces
            .iter_mut()
            .find(|p| p.kind == PieceKind::Rook && p.color == Color::White && p.file == 5)
            .expect("kingside rook");
        rook.has_moved = true;
        let state = BoardState::new(&world, &boards, &pieces);
        assert_eq!(
            validate_castle(Color::White, CastleSide::KingsideKl, &state, false),
            Err(CastleRejection::RookMoved)
        );

        // A bare king and rook with a black rook on the d-file
        let pieces = vec![
            Piece::new(1, PieceKind::King, Color::White, 4, 0, Level::Attack(AttackBoardId::WKL)),
            Piece::new(2, PieceKind::Rook, Color::White, 5, 0, Level::Attack(AttackBoardId::WKL)),
            Piece::new(3, PieceKind::Rook, Color::Black, 4, 4, Level::Main(MainBoard::W)),
        ];
        let state = BoardState::new(&world, &boards, &pieces);
        assert_eq!(
            validate_castle(Color::White, CastleSide::KingsideKl, &state, false),
            Err(CastleRejection::InCheck)
        );
    }
}
