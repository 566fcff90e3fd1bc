//! Knight movement rules
//!
//! The L-shape is generalised to three axes: either a planar L on the
//! projection (at any level), or an L that uses the level distance as one of
//! its legs while the other planar axis stays put. Knights jump, so no path
//! check.

use super::Delta;
use crate::error::{MoveRejection, Verdict};
use crate::types::Square;

pub fn validate(from: Square, to: Square) -> Verdict {
    if is_l_shape(Delta::between(from, to)) {
        Ok(())
    } else {
        Err(MoveRejection::KnightShape)
    }
}

fn is_l_shape(delta: Delta) -> bool {
    let leg = |a: u8, b: u8| (a == 1 && b == 2) || (a == 2 && b == 1);
    let (file, rank, level) = (delta.abs_file(), delta.abs_rank(), delta.level);
    leg(file, rank) || (file == 0 && leg(rank, level)) || (rank == 0 && leg(file, level))
}
