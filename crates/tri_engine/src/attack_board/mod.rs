//! Attack-board subsystem
//!
//! Attack boards move between pins, possibly rotating, and carry whatever
//! stands on them. This module covers the pin graph ([`adjacency`]), who may
//! move a board ([`control`]), board-move legality ([`validate`]) and the
//! passenger remapping performed when a move is applied ([`execute`]).

pub mod adjacency;
pub mod control;
pub mod execute;
pub mod validate;

use serde::{Deserialize, Serialize};

use crate::types::{AttackBoardId, PinId};

pub use adjacency::{is_adjacent, is_lateral, neighbours, within_half};
pub use control::{board_controller, occupancy_override, passengers};
pub use execute::{execute_board_move, remap_passenger, BoardMoveOutcome};
pub use validate::{legal_pins_for_board, validate_board_move};

/// How passengers land on the destination board
///
/// Only needed when the answer is not implied by the move itself, which is a
/// lateral transfer between tracks with pieces aboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrivalChoice {
    Identity,
    Rot180,
}

/// A request to move (and/or rotate) one attack board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMoveRequest {
    pub board: AttackBoardId,
    pub to: PinId,
    #[serde(default)]
    pub rotate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<ArrivalChoice>,
}

impl BoardMoveRequest {
    /// Plain translation to another pin
    pub fn slide(board: AttackBoardId, to: PinId) -> Self {
        BoardMoveRequest {
            board,
            to,
            rotate: false,
            arrival: None,
        }
    }

    /// 180° turn on the pin the board already occupies
    pub fn rotate_in_place(board: AttackBoardId, pin: PinId) -> Self {
        BoardMoveRequest {
            board,
            to: pin,
            rotate: true,
            arrival: None,
        }
    }

    pub fn with_arrival(mut self, arrival: ArrivalChoice) -> Self {
        self.arrival = Some(arrival);
        self
    }

    /// Whether passengers are point-reflected: the requested rotation XOR a
    /// `rot180` arrival
    pub fn reflects_passengers(&self) -> bool {
        self.rotate ^ (self.arrival == Some(ArrivalChoice::Rot180))
    }
}
