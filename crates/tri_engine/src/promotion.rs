//! Pawn promotion
//!
//! A pawn promotes on the last rank (`9` for white, `0` for black) or on the
//! far rank of the opponent's main board (`B` rank 8, `W` rank 1). When a
//! square on another level at the same coordinate is occupied the piece
//! cannot be presented and the promotion is deferred: the pawn is marked
//! [`PromotionState::Deferred`] and becomes ready once the overhang clears.

use tracing::debug;

use crate::board::BoardState;
use crate::constants::{BLACK_PROMOTION_RANK, WHITE_PROMOTION_RANK};
use crate::error::{MoveRejection, Verdict};
use crate::types::{
    Color, MainBoard, Piece, PieceId, PieceKind, PromotionState, ResolvedLevel, Square,
};

/// What a pawn move does about promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionOutcome {
    None,
    Promote(PieceKind),
    Defer,
}

/// Whether a pawn of `color` standing on `square` is due to promote
pub fn is_promotion_square(color: Color, square: Square) -> bool {
    match color {
        Color::White => {
            square.rank == WHITE_PROMOTION_RANK
                || (square.level == ResolvedLevel::Main(MainBoard::B) && square.rank == 8)
        }
        Color::Black => {
            square.rank == BLACK_PROMOTION_RANK
                || (square.level == ResolvedLevel::Main(MainBoard::W) && square.rank == 1)
        }
    }
}

pub fn should_promote(piece: &Piece, state: &BoardState) -> bool {
    piece.kind == PieceKind::Pawn && is_promotion_square(piece.color, state.square_of(piece))
}

/// Another visible square at the same coordinate holds a piece
pub fn is_overhung(square: Square, state: &BoardState) -> bool {
    state
        .visible_squares_at(square.file, square.rank)
        .filter(|s| s.level != square.level)
        .any(|s| !state.is_empty(s))
}

pub fn can_promote(square: Square, state: &BoardState) -> bool {
    !is_overhung(square, state)
}

/// Decide promotion for a pawn that has just landed
///
/// `state` is the position after the move. An unblocked pawn on a promotion
/// square needs a valid `choice`; a blocked one is deferred and the choice is
/// ignored. A choice on any other move is refused.
pub fn resolve_promotion(
    pawn: &Piece,
    choice: Option<PieceKind>,
    state: &BoardState,
) -> Result<PromotionOutcome, MoveRejection> {
    if !should_promote(pawn, state) {
        return match choice {
            Some(_) => Err(MoveRejection::NotPromotable),
            None => Ok(PromotionOutcome::None),
        };
    }
    if !can_promote(state.square_of(pawn), state) {
        return Ok(PromotionOutcome::Defer);
    }
    let kind = choice.ok_or(MoveRejection::PromotionChoiceRequired)?;
    validate_choice(kind)?;
    Ok(PromotionOutcome::Promote(kind))
}

pub fn validate_choice(kind: PieceKind) -> Verdict {
    if kind.is_promotion_choice() {
        Ok(())
    } else {
        Err(MoveRejection::InvalidPromotionPiece)
    }
}

/// Deferred pawns of `color` whose overhang has cleared
pub fn ready_promotions(color: Color, state: &BoardState) -> Vec<PieceId> {
    state
        .pieces_of(color)
        .filter(|p| p.promotion_state == Some(PromotionState::Deferred))
        .filter(|p| should_promote(p, state) && can_promote(state.square_of(p), state))
        .map(|p| p.id)
        .collect()
}

/// Turn a pawn into `kind` in place
pub fn apply_promotion(pieces: &mut [Piece], id: PieceId, kind: PieceKind) -> Verdict {
    validate_choice(kind)?;
    let pawn = pieces
        .iter_mut()
        .find(|p| p.id == id && p.kind == PieceKind::Pawn)
        .ok_or(MoveRejection::NotPromotable)?;
    pawn.kind = kind;
    pawn.promotion_state = None;
    debug!(piece = %id, %kind, "pawn promoted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::AttackBoards;
    use crate::types::{AttackBoardId, Level};
    use crate::world::World;

    #[test]
    fn test_promotion_squares() {
        let ql6 = "a9QL6".parse().expect("square");
        let b8 = "a8B".parse().expect("square");
        let n6 = "a6N".parse().expect("square");
        assert!(is_promotion_square(Color::White, ql6));
        assert!(is_promotion_square(Color::White, b8));
        assert!(!is_promotion_square(Color::White, n6));
        assert!(is_promotion_square(Color::Black, "b1W".parse().expect("square")));
    }

    #[test]
    fn test_unblocked_pawn_needs_choice() {
        let world = World::new();
        let boards = AttackBoards::home();
        let pieces = [Piece::new(1, PieceKind::Pawn, Color::White, 2, 8, Level::Main(MainBoard::B))];
        let state = BoardState::new(&world, &boards, &pieces);

        assert_eq!(
            resolve_promotion(&pieces[0], None, &state),
            Err(MoveRejection::PromotionChoiceRequired)
        );
        assert_eq!(
            resolve_promotion(&pieces[0], Some(PieceKind::King), &state),
            Err(MoveRejection::InvalidPromotionPiece)
        );
        assert_eq!(
            resolve_promotion(&pieces[0], Some(PieceKind::Knight), &state),
            Ok(PromotionOutcome::Promote(PieceKind::Knight))
        );
    }

    #[test]
    fn test_overhang_defers_until_cleared() {
        let world = World::new();
        let boards = AttackBoards::home();
        let mut pieces = vec![
            Piece::new(1, PieceKind::Pawn, Color::White, 1, 8, Level::Main(MainBoard::B)),
            // Stands on a8 of the black queen's-line board
            Piece::new(2, PieceKind::Pawn, Color::Black, 1, 8, Level::Attack(AttackBoardId::BQL)),
        ];
        let state = BoardState::new(&world, &boards, &pieces);
        assert!(is_overhung(state.square_of(&pieces[0]), &state));
        assert_eq!(
            resolve_promotion(&pieces[0], Some(PieceKind::Queen), &state),
            Ok(PromotionOutcome::Defer)
        );

        pieces[0].promotion_state = Some(PromotionState::Deferred);
        let state = BoardState::new(&world, &boards, &pieces);
        assert!(ready_promotions(Color::White, &state).is_empty());

        pieces.pop();
        let state = BoardState::new(&world, &boards, &pieces);
        assert_eq!(ready_promotions(Color::White, &state), vec![PieceId(1)]);

        apply_promotion(&mut pieces, PieceId(1), PieceKind::Queen).expect("promote");
        assert_eq!(pieces[0].kind, PieceKind::Queen);
        assert_eq!(pieces[0].promotion_state, None);
    }

    #[test]
    fn test_choice_on_ordinary_move_is_refused() {
        let world = World::new();
        let boards = AttackBoards::home();
        let pieces = [Piece::new(1, PieceKind::Pawn, Color::White, 2, 3, Level::Main(MainBoard::W))];
        let state = BoardState::new(&world, &boards, &pieces);
        assert_eq!(
            resolve_promotion(&pieces[0], Some(PieceKind::Queen), &state),
            Err(MoveRejection::NotPromotable)
        );
        assert_eq!(resolve_promotion(&pieces[0], None, &state), Ok(PromotionOutcome::None));
    }
}
