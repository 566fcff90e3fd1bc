//! Attack-board placements
//!
//! Each of the four attack boards always occupies exactly one pin in one
//! orientation. [`AttackBoards`] is the authoritative record of that; the
//! per-track view ([`TrackStates`]) and the active instance ids are derived
//! from it.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::types::{AttackBoardId, Color, InstanceId, PinId, Rotation, Track};

/// Pin and orientation of one attack board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardPlacement {
    pub pin: PinId,
    pub rotation: Rotation,
}

impl BoardPlacement {
    pub fn new(pin: PinId, rotation: Rotation) -> Self {
        BoardPlacement { pin, rotation }
    }

    pub fn home(board: AttackBoardId) -> Self {
        BoardPlacement::new(board.home_pin(), Rotation::Deg0)
    }

    pub fn instance_id(self) -> InstanceId {
        InstanceId {
            pin: self.pin,
            rotation: self.rotation,
        }
    }

    pub fn is_home(self, board: AttackBoardId) -> bool {
        self == BoardPlacement::home(board)
    }
}

/// Where every attack board currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttackBoards {
    placements: [BoardPlacement; 4],
}

impl Default for AttackBoards {
    fn default() -> Self {
        AttackBoards::home()
    }
}

impl AttackBoards {
    /// Starting layout: white boards on pin 1, black boards on pin 6
    pub fn home() -> Self {
        AttackBoards {
            placements: AttackBoardId::ALL.map(BoardPlacement::home),
        }
    }

    /// Build from explicit placements, refusing two boards on one pin
    pub fn from_placements(
        placements: impl IntoIterator<Item = (AttackBoardId, BoardPlacement)>,
    ) -> EngineResult<Self> {
        let mut boards = AttackBoards::home();
        for (id, placement) in placements {
            boards.placements[id.index()] = placement;
        }
        for (i, a) in boards.placements.iter().enumerate() {
            if boards.placements[i + 1..].iter().any(|b| b.pin == a.pin) {
                return Err(EngineError::SharedPin {
                    pin: a.pin.to_string(),
                });
            }
        }
        Ok(boards)
    }

    pub fn placement(&self, board: AttackBoardId) -> BoardPlacement {
        self.placements[board.index()]
    }

    pub fn set(&mut self, board: AttackBoardId, placement: BoardPlacement) {
        self.placements[board.index()] = placement;
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttackBoardId, BoardPlacement)> + '_ {
        AttackBoardId::ALL
            .into_iter()
            .map(move |id| (id, self.placement(id)))
    }

    /// Board currently attached to `pin`, if any
    pub fn board_at(&self, pin: PinId) -> Option<AttackBoardId> {
        self.iter()
            .find(|(_, placement)| placement.pin == pin)
            .map(|(id, _)| id)
    }

    pub fn is_active(&self, pin: PinId) -> bool {
        self.board_at(pin).is_some()
    }

    pub fn active_instance(&self, board: AttackBoardId) -> InstanceId {
        self.placement(board).instance_id()
    }

    pub fn track_states(&self) -> TrackStates {
        let state = |board| TrackState::from(self.placement(board));
        TrackStates {
            ql: ColorTrackStates {
                white: state(AttackBoardId::WQL),
                black: state(AttackBoardId::BQL),
            },
            kl: ColorTrackStates {
                white: state(AttackBoardId::WKL),
                black: state(AttackBoardId::BKL),
            },
        }
    }
}

/// Pin and rotation of the board a colour owns on one track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackState {
    pub pin: PinId,
    pub rotation: Rotation,
}

impl From<BoardPlacement> for TrackState {
    fn from(placement: BoardPlacement) -> Self {
        TrackState {
            pin: placement.pin,
            rotation: placement.rotation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTrackStates {
    pub white: TrackState,
    pub black: TrackState,
}

impl ColorTrackStates {
    pub fn get(&self, color: Color) -> TrackState {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

/// Track (QL, KL) × colour view of the board placements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackStates {
    #[serde(rename = "QL")]
    pub ql: ColorTrackStates,
    #[serde(rename = "KL")]
    pub kl: ColorTrackStates,
}

impl TrackStates {
    /// Placement keyed by the board's nominal owner and home track
    pub fn placement_of(&self, board: AttackBoardId) -> BoardPlacement {
        let tracks = match board.home_track() {
            Track::QL => self.ql,
            Track::KL => self.kl,
        };
        let state = tracks.get(board.owner());
        BoardPlacement::new(state.pin, state.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_layout() {
        let boards = AttackBoards::home();
        assert_eq!(boards.placement(AttackBoardId::WQL).pin, PinId::new(Track::QL, 1));
        assert_eq!(boards.placement(AttackBoardId::BKL).pin, PinId::new(Track::KL, 6));
        assert_eq!(
            boards.active_instance(AttackBoardId::WKL).to_string(),
            "KL1:0"
        );
        assert_eq!(boards.board_at(PinId::new(Track::QL, 6)), Some(AttackBoardId::BQL));
        assert_eq!(boards.board_at(PinId::new(Track::QL, 3)), None);
    }

    #[test]
    fn test_shared_pin_is_rejected() {
        let result = AttackBoards::from_placements([(
            AttackBoardId::WQL,
            BoardPlacement::new(PinId::new(Track::QL, 6), Rotation::Deg0),
        )]);
        assert!(matches!(result, Err(EngineError::SharedPin { .. })));
    }

    #[test]
    fn test_track_states_round_trip_placements() {
        let mut boards = AttackBoards::home();
        boards.set(
            AttackBoardId::WQL,
            BoardPlacement::new(PinId::new(Track::QL, 2), Rotation::Deg180),
        );
        let tracks = boards.track_states();
        assert_eq!(tracks.ql.white.pin, PinId::new(Track::QL, 2));
        for id in AttackBoardId::ALL {
            assert_eq!(tracks.placement_of(id), boards.placement(id));
        }
    }
}
