//! Board-move legality

use tracing::trace;

use super::execute::apply_board_move;
use super::{board_controller, is_adjacent, is_lateral, neighbours, passengers, within_half};
use super::{ArrivalChoice, BoardMoveRequest};
use crate::board::BoardState;
use crate::error::BoardMoveRejection;
use crate::move_gen::attack::is_in_check;
use crate::types::{AttackBoardId, Color, PinId};

/// Check a board move for `mover`
///
/// Checks, in order: control of the board, the destination (in-place rotation
/// or a free adjacent pin on the owner's half of the track), the arrival choice for lateral transfers with
/// passengers, that every passenger lands on the board, and king safety.
pub fn validate_board_move(
    request: &BoardMoveRequest,
    mover: Color,
    state: &BoardState,
) -> Result<(), BoardMoveRejection> {
    let verdict = check(request, mover, state);
    if let Err(reason) = verdict {
        trace!(board = %request.board, to = %request.to, rotate = request.rotate, %reason, "board move rejected");
    }
    verdict
}

fn check(
    request: &BoardMoveRequest,
    mover: Color,
    state: &BoardState,
) -> Result<(), BoardMoveRejection> {
    if board_controller(request.board, state.pieces) != mover {
        return Err(BoardMoveRejection::NotController);
    }

    let from = state.boards.placement(request.board).pin;
    if request.to == from {
        // Turning in place must actually turn the board
        if !request.rotate || !request.reflects_passengers() {
            return Err(BoardMoveRejection::AlreadyAtPin);
        }
    } else {
        if !is_adjacent(from, request.to) {
            return Err(BoardMoveRejection::NotAdjacent);
        }
        if !within_half(request.board.owner(), request.to) {
            return Err(BoardMoveRejection::OutsideHalf);
        }
        if state.boards.is_active(request.to) {
            return Err(BoardMoveRejection::PinOccupied);
        }
        let loaded = passengers(request.board, state.pieces).next().is_some();
        if is_lateral(from, request.to) && loaded && request.arrival.is_none() {
            return Err(BoardMoveRejection::AmbiguousArrival);
        }
    }

    let outcome = apply_board_move(request, state.boards, state.pieces)?;
    let after = BoardState::new(state.world, &outcome.boards, &outcome.pieces);
    if is_in_check(mover, &after) {
        return Err(BoardMoveRejection::LeavesKingInCheck);
    }
    Ok(())
}

/// Every pin `board` can legally move to, its own pin included when an
/// in-place rotation is legal
pub fn legal_pins_for_board(board: AttackBoardId, mover: Color, state: &BoardState) -> Vec<PinId> {
    let current = state.boards.placement(board).pin;
    let arrivals = [None, Some(ArrivalChoice::Identity), Some(ArrivalChoice::Rot180)];

    let mut pins: Vec<PinId> = std::iter::once(current)
        .chain(neighbours(current))
        .filter(|&to| {
            [false, true].into_iter().any(|rotate| {
                arrivals.into_iter().any(|arrival| {
                    let request = BoardMoveRequest {
                        board,
                        to,
                        rotate,
                        arrival,
                    };
                    check(&request, mover, state).is_ok()
                })
            })
        })
        .collect();
    pins.sort();
    pins
}
