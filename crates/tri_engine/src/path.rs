//! Path & shadow resolver
//!
//! Sliding moves are walked on the (file, rank) projection. Each intermediate
//! coordinate must exist on some visible level (otherwise it is a gap between
//! boards) and must be empty on *every* level: a piece stacked above or below
//! the line of travel casts a "vertical shadow" that blocks it just like a
//! piece on the moving board would.
//!
//! The destination square is not examined here; capture and pawn rules handle
//! it in the validators.

use tracing::trace;

use crate::board::BoardState;
use crate::error::{MoveRejection, Verdict};
use crate::types::Square;

/// Intermediate `(file, rank)` steps strictly between `from` and `to`
///
/// Returns `None` when the projection is not a straight or diagonal line.
/// Level changes add no steps: a move that only changes level, or an adjacent
/// move, has an empty path.
pub fn path_coordinates(from: Square, to: Square) -> Option<Vec<(u8, u8)>> {
    let df = to.file as i8 - from.file as i8;
    let dr = to.rank as i8 - from.rank as i8;
    if df != 0 && dr != 0 && df.abs() != dr.abs() {
        return None;
    }

    let steps = df.abs().max(dr.abs());
    let (sf, sr) = (df.signum(), dr.signum());
    Some(
        (1..steps)
            .map(|k| {
                (
                    (from.file as i8 + sf * k) as u8,
                    (from.rank as i8 + sr * k) as u8,
                )
            })
            .collect(),
    )
}

/// Check every intermediate coordinate of a sliding move
pub fn check_path(from: Square, to: Square, board: &BoardState) -> Verdict {
    let Some(steps) = path_coordinates(from, to) else {
        return Ok(());
    };

    for (file, rank) in steps {
        if board.visible_squares_at(file, rank).next().is_none() {
            trace!(%from, %to, file, rank, "path crosses a gap");
            return Err(MoveRejection::PathGap);
        }
        if let Some(blocker) = board.occupants_at(file, rank).next() {
            let blocker_level = board.square_of(blocker).level;
            trace!(%from, %to, file, rank, %blocker_level, "path blocked");
            return Err(if blocker_level == from.level {
                MoveRejection::PathBlocked
            } else {
                MoveRejection::VerticalShadow
            });
        }
    }

    Ok(())
}
