//! Error types for game module
//!
//! Every rejected action comes back as a [`GameError`]; the game state is left
//! untouched. Rule rejections wrap the engine's reason enums, whose `Display`
//! strings are the stable reasons shown to players.

use tri_engine::{BoardMoveRejection, CastleRejection, EngineError, MoveRejection, Square};

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Piece move refused by the movement rules
    #[error("Invalid move: {0}")]
    InvalidMove(#[from] MoveRejection),

    /// Attack-board move refused
    #[error("Invalid board move: {0}")]
    InvalidBoardMove(#[from] BoardMoveRejection),

    /// Castle refused
    #[error("Invalid castle: {0}")]
    InvalidCastle(#[from] CastleRejection),

    /// Requested piece, square or pin does not exist
    #[error("Illegal state: {0}")]
    IllegalState(#[from] EngineError),

    #[error("no piece on {square}")]
    NoPieceAt { square: Square },

    #[error("not your turn")]
    NotYourTurn,

    #[error("game is over")]
    GameOver,

    /// A deferred promotion has become available and must be taken first
    #[error("a pawn must be promoted first")]
    PromotionPending,

    #[error("nothing to undo")]
    NothingToUndo,
}

impl GameError {
    /// Short reason without the category prefix
    pub fn reason(&self) -> String {
        match self {
            GameError::InvalidMove(reason) => reason.to_string(),
            GameError::InvalidBoardMove(reason) => reason.to_string(),
            GameError::InvalidCastle(reason) => reason.to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
