//! Click selection state
//!
//! The input layer reports square and pin clicks; the game keeps track of
//! what the first click picked so the second one can complete the action.

use tri_engine::{AttackBoardId, PieceId, PinId, Square};

/// What the player currently has selected, with its highlight targets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Piece {
        id: PieceId,
        from: Square,
        destinations: Vec<Square>,
    },
    Board {
        board: AttackBoardId,
        pins: Vec<PinId>,
    },
}

impl Selection {
    pub fn clear(&mut self) {
        *self = Selection::None;
    }

    pub fn is_selected(&self) -> bool {
        !matches!(self, Selection::None)
    }
}

/// Result of a click, for the input layer to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A piece or board was selected; highlight its targets
    Selected,
    /// The selected piece or board moved
    Moved,
    /// The move needs a promotion piece; call `move_piece` with one
    ChoosePromotion { from: Square, to: Square },
    /// The board move needs an arrival orientation; call `move_board` with one
    ChooseArrival { board: AttackBoardId, to: PinId },
    /// Nothing useful was clicked; selection cleared
    Cleared,
}
