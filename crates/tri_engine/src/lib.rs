//! Rules engine for tri-dimensional chess
//!
//! Three fixed main boards (`W`, `N`, `B`) and four mobile attack boards that
//! hop between twelve pins. Everything here is a pure function over borrowed
//! state: the caller owns the pieces and board placements, asks for a
//! verdict, and commits the returned outcome itself.
//!
//! # Module Structure
//!
//! - [`types`], [`constants`] - identifiers and static geometry
//! - [`world`], [`tracks`], [`board`] - square graph, board placements, read view
//! - [`path`] - straight-line paths, gaps and vertical shadows
//! - [`move_gen`] - piece rules, check, checkmate and stalemate
//! - [`attack_board`] - board moves and passenger transport
//! - [`castling`], [`promotion`] - special moves
//! - [`setup`] - initial position

pub mod attack_board;
pub mod board;
pub mod castling;
pub mod constants;
pub mod error;
pub mod move_gen;
pub mod path;
pub mod promotion;
pub mod setup;
pub mod tracks;
pub mod types;
pub mod world;

pub use attack_board::{ArrivalChoice, BoardMoveOutcome, BoardMoveRequest};
pub use board::BoardState;
pub use castling::{CastlePlan, CastleSide};
pub use error::{
    BoardMoveRejection, CastleRejection, EngineError, EngineResult, MoveRejection, ParseError,
    Verdict,
};
pub use promotion::PromotionOutcome;
pub use tracks::{AttackBoards, BoardPlacement, TrackState, TrackStates};
pub use types::{
    AttackBoardId, Color, InstanceId, Level, MainBoard, Piece, PieceId, PieceKind, PinId,
    PromotionState, ResolvedLevel, Rotation, Square, Track,
};
pub use world::World;
