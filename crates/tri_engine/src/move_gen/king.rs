//! King movement rules

use super::Delta;
use crate::error::{MoveRejection, Verdict};
use crate::types::Square;

/// One step on any combination of file, rank and level
pub fn validate(from: Square, to: Square) -> Verdict {
    let delta = Delta::between(from, to);
    if delta.abs_file().max(delta.abs_rank()).max(delta.level) <= 1 {
        Ok(())
    } else {
        Err(MoveRejection::KingDistance)
    }
}
