//! Applying a board move
//!
//! The board is re-attached at its destination pin and every passenger keeps
//! its `level` while its `(file, rank)` is recomputed from the local offset
//! inside the 2×2 footprint. A reflected move maps local `(f, r)` to
//! `(1 - f, 1 - r)`. A pawn carried onto its promotion rank is marked
//! [`PromotionState::Deferred`] and promotes on its owner's next turn.

use tracing::debug;

use super::{validate_board_move, BoardMoveRequest};
use crate::board::BoardState;
use crate::constants::ATTACK_BOARD_SIZE;
use crate::error::BoardMoveRejection;
use crate::promotion::should_promote;
use crate::tracks::{AttackBoards, BoardPlacement};
use crate::types::{AttackBoardId, Color, Piece, PieceId, PieceKind, PinId, PromotionState};

/// Result of a board move, ready to be committed by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMoveOutcome {
    pub board: AttackBoardId,
    pub from: BoardPlacement,
    pub to: BoardPlacement,
    pub boards: AttackBoards,
    pub pieces: Vec<Piece>,
    pub passengers: Vec<PieceId>,
}

/// World coordinate of a passenger after its board moves from `from` to `to`
///
/// Returns `None` when `(file, rank)` is not inside the footprint of `from`.
pub fn remap_passenger(
    file: u8,
    rank: u8,
    from: PinId,
    to: PinId,
    reflect: bool,
) -> Option<(u8, u8)> {
    let local = |value: u8, base: u8| {
        value
            .checked_sub(base)
            .filter(|&offset| offset < ATTACK_BOARD_SIZE)
    };
    let local_file = local(file, from.file_base())?;
    let local_rank = local(rank, from.rank_base())?;

    let (local_file, local_rank) = if reflect {
        (
            ATTACK_BOARD_SIZE - 1 - local_file,
            ATTACK_BOARD_SIZE - 1 - local_rank,
        )
    } else {
        (local_file, local_rank)
    };
    Some((to.file_base() + local_file, to.rank_base() + local_rank))
}

/// Move the board and its passengers without checking legality
pub(crate) fn apply_board_move(
    request: &BoardMoveRequest,
    boards: &AttackBoards,
    pieces: &[Piece],
) -> Result<BoardMoveOutcome, BoardMoveRejection> {
    let from = boards.placement(request.board);
    let reflect = request.reflects_passengers();
    let to = BoardPlacement::new(
        request.to,
        if reflect {
            from.rotation.flipped()
        } else {
            from.rotation
        },
    );

    let mut moved = Vec::with_capacity(pieces.len());
    let mut carried = Vec::new();
    for piece in pieces {
        let mut piece = *piece;
        if piece.is_aboard(request.board) {
            let (file, rank) = remap_passenger(piece.file, piece.rank, from.pin, to.pin, reflect)
                .ok_or(BoardMoveRejection::PassengerOffBoard)?;
            piece.file = file;
            piece.rank = rank;
            piece.moved_as_passenger = true;
            if piece.kind == PieceKind::Pawn {
                piece.moved_by_ab = true;
            }
            carried.push(piece.id);
        } else {
            piece.moved_as_passenger = false;
        }
        moved.push(piece);
    }

    let mut next = *boards;
    next.set(request.board, to);

    Ok(BoardMoveOutcome {
        board: request.board,
        from,
        to,
        boards: next,
        pieces: moved,
        passengers: carried,
    })
}

/// Validate and apply a board move for `mover`
pub fn execute_board_move(
    request: &BoardMoveRequest,
    mover: Color,
    state: &BoardState,
) -> Result<BoardMoveOutcome, BoardMoveRejection> {
    validate_board_move(request, mover, state)?;
    let mut outcome = apply_board_move(request, state.boards, state.pieces)?;

    let promoting: Vec<PieceId> = {
        let after = BoardState::new(state.world, &outcome.boards, &outcome.pieces);
        outcome
            .pieces
            .iter()
            .filter(|p| outcome.passengers.contains(&p.id) && should_promote(p, &after))
            .map(|p| p.id)
            .collect()
    };
    for pawn in outcome.pieces.iter_mut().filter(|p| promoting.contains(&p.id)) {
        pawn.promotion_state = Some(PromotionState::Deferred);
        debug!(piece = %pawn.id, "pawn carried onto its promotion rank");
    }

    debug!(
        board = %outcome.board,
        from = %outcome.from.instance_id(),
        to = %outcome.to.instance_id(),
        passengers = outcome.passengers.len(),
        "attack board moved"
    );
    Ok(outcome)
}
