//! Serializable game snapshot
//!
//! The save format is a camelCase JSON document carrying the pieces, the side
//! to move, the status flags, the attack-board placements in three redundant
//! views (positions, active instance ids and track states) and the move
//! history.
//!
//! Loading is all-or-nothing: [`GameSnapshot::into_game`] checks the version
//! and the shape of the position, recomputes the status flags and compares
//! them to the stored ones before building a [`Game`]. Any disagreement
//! rejects the whole snapshot.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use tri_engine::attack_board::within_half;
use tri_engine::{
    AttackBoardId, AttackBoards, BoardPlacement, BoardState, Color, EngineError, InstanceId,
    Piece, PieceKind, PinId, TrackStates, World,
};

use super::history::{MoveHistory, MoveRecord};
use super::state::Game;
use super::status::GameStatus;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors rejecting a snapshot on load
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("attack board {board} is missing from the snapshot")]
    MissingBoard { board: AttackBoardId },

    #[error("attack board {board}: position {position} disagrees with active instance {instance}")]
    InstanceMismatch {
        board: AttackBoardId,
        position: PinId,
        instance: InstanceId,
    },

    #[error("track states disagree with attack board {board}")]
    TrackMismatch { board: AttackBoardId },

    #[error("attack board {board} stands on {pin}, outside its own half of the track")]
    OutsideHalf { board: AttackBoardId, pin: PinId },

    #[error("piece {id} is not on a visible square")]
    OffBoard { id: u16 },

    #[error("stored {flag} flag does not match the position")]
    StatusMismatch { flag: &'static str },

    #[error("illegal position: {0}")]
    Position(#[from] EngineError),
}

/// Active instance of one attack board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackBoardState {
    pub active_instance_id: InstanceId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub pieces: Vec<Piece>,
    pub current_turn: Color,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub winner: Option<Color>,
    pub game_over: bool,
    pub attack_board_positions: BTreeMap<AttackBoardId, PinId>,
    pub attack_board_states: BTreeMap<AttackBoardId, AttackBoardState>,
    pub track_states: TrackStates,
    pub move_history: Vec<MoveRecord>,
}

impl GameSnapshot {
    /// Capture the current state of `game`
    pub fn capture(game: &Game) -> Self {
        let boards = game.boards();
        let status = game.status();
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            pieces: game.pieces().to_vec(),
            current_turn: game.current_turn(),
            is_check: status.is_check,
            is_checkmate: status.is_checkmate,
            is_stalemate: status.is_stalemate,
            winner: status.winner,
            game_over: status.game_over,
            attack_board_positions: boards.iter().map(|(id, p)| (id, p.pin)).collect(),
            attack_board_states: boards
                .iter()
                .map(|(id, p)| {
                    (
                        id,
                        AttackBoardState {
                            active_instance_id: p.instance_id(),
                        },
                    )
                })
                .collect(),
            track_states: boards.track_states(),
            move_history: game.history().records().to_vec(),
        }
    }

    fn stored_status(&self) -> GameStatus {
        GameStatus {
            is_check: self.is_check,
            is_checkmate: self.is_checkmate,
            is_stalemate: self.is_stalemate,
            winner: self.winner,
            game_over: self.game_over,
        }
    }

    /// Board placements after checking the three views agree
    fn placements(&self) -> Result<AttackBoards, SnapshotError> {
        let mut placements = Vec::with_capacity(AttackBoardId::ALL.len());
        for board in AttackBoardId::ALL {
            let position = *self
                .attack_board_positions
                .get(&board)
                .ok_or(SnapshotError::MissingBoard { board })?;
            let instance = self
                .attack_board_states
                .get(&board)
                .ok_or(SnapshotError::MissingBoard { board })?
                .active_instance_id;
            if !within_half(board.owner(), position) {
                return Err(SnapshotError::OutsideHalf {
                    board,
                    pin: position,
                });
            }
            if instance.pin != position {
                return Err(SnapshotError::InstanceMismatch {
                    board,
                    position,
                    instance,
                });
            }
            let placement = BoardPlacement::new(instance.pin, instance.rotation);
            if self.track_states.placement_of(board) != placement {
                return Err(SnapshotError::TrackMismatch { board });
            }
            placements.push((board, placement));
        }
        Ok(AttackBoards::from_placements(placements)?)
    }

    /// Check ids, squares and kings
    fn check_pieces(&self, world: &World, boards: &AttackBoards) -> Result<(), SnapshotError> {
        let state = BoardState::new(world, boards, &self.pieces);
        let mut ids = HashSet::new();
        let mut squares = HashSet::new();
        for piece in &self.pieces {
            if !ids.insert(piece.id) {
                return Err(EngineError::DuplicatePieceId { id: piece.id.0 }.into());
            }
            let square = state.square_of(piece);
            if !state.is_visible(square) {
                return Err(SnapshotError::OffBoard { id: piece.id.0 });
            }
            if !squares.insert(square) {
                return Err(EngineError::DoubleOccupancy {
                    square: square.to_string(),
                }
                .into());
            }
        }
        for color in Color::ALL {
            let count = state
                .pieces_of(color)
                .filter(|p| p.kind == PieceKind::King)
                .count();
            if count != 1 {
                return Err(EngineError::KingCount {
                    color: color.to_string(),
                    count,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Validate the snapshot and rebuild the game it describes
    pub fn into_game(self) -> Result<Game, SnapshotError> {
        let verdict = self.validate();
        if let Err(err) = &verdict {
            warn!(error = %err, "snapshot rejected");
        }
        let boards = verdict?;
        let game = Game::from_parts(
            self.pieces,
            boards,
            self.current_turn,
            MoveHistory::from_records(self.move_history),
        );
        Ok(game)
    }

    fn validate(&self) -> Result<AttackBoards, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        let boards = self.placements()?;
        let world = World::new();
        self.check_pieces(&world, &boards)?;

        let computed = GameStatus::evaluate(
            self.current_turn,
            &BoardState::new(&world, &boards, &self.pieces),
        );
        let stored = self.stored_status();
        let flags = [
            ("isCheck", computed.is_check == stored.is_check),
            ("isCheckmate", computed.is_checkmate == stored.is_checkmate),
            ("isStalemate", computed.is_stalemate == stored.is_stalemate),
            ("winner", computed.winner == stored.winner),
            ("gameOver", computed.game_over == stored.game_over),
        ];
        if let Some((flag, _)) = flags.into_iter().find(|(_, same)| !same) {
            return Err(SnapshotError::StatusMismatch { flag });
        }
        Ok(boards)
    }
}

impl Game {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    /// Rebuild a game from a snapshot, rejecting it entirely on any mismatch
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Game, SnapshotError> {
        snapshot.into_game()
    }
}
