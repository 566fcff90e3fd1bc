//! Error types for the rules engine
//!
//! Rejections are plain values: every validator returns one of these instead of
//! panicking, and the `Display` string of each variant is the stable reason
//! shown to players and asserted on in tests.

use thiserror::Error;

/// Why a piece move was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("piece must move to a different square")]
    SameSquare,

    #[error("destination square does not exist")]
    NoSuchSquare,

    #[error("cannot capture own piece")]
    OwnPiece,

    #[error("pure vertical movement prohibited")]
    PureVertical,

    #[error("path crosses a gap between boards")]
    PathGap,

    #[error("path blocked")]
    PathBlocked,

    #[error("path blocked by vertical shadow")]
    VerticalShadow,

    #[error("pawn cannot move that way")]
    PawnDirection,

    #[error("pawn is blocked")]
    PawnBlocked,

    #[error("pawn can only move diagonally when capturing")]
    PawnCaptureRequiresEnemy,

    #[error("pawn can only advance two squares on its first move")]
    PawnAlreadyMoved,

    #[error("pawn moved by an attack board cannot advance two squares")]
    PawnMovedByBoard,

    #[error("rook must move along a file or rank")]
    RookLine,

    #[error("knight must move in an L-shape")]
    KnightShape,

    #[error("bishop must stay on same color squares")]
    BishopColor,

    #[error("bishop must move diagonally")]
    BishopDiagonal,

    #[error("queen must move in a straight line or diagonal")]
    QueenLine,

    #[error("king can only move one square")]
    KingDistance,

    #[error("move would leave king in check")]
    LeavesKingInCheck,

    #[error("promotion piece must be chosen")]
    PromotionChoiceRequired,

    #[error("pawn cannot promote to that piece")]
    InvalidPromotionPiece,

    #[error("piece is not eligible for promotion")]
    NotPromotable,
}

/// Why an attack-board move was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardMoveRejection {
    #[error("board is controlled by the opponent")]
    NotController,

    #[error("board is already at that pin")]
    AlreadyAtPin,

    #[error("destination pin is not adjacent")]
    NotAdjacent,

    #[error("destination pin is occupied")]
    PinOccupied,

    #[error("arrival orientation must be chosen for passengers")]
    AmbiguousArrival,

    #[error("board cannot leave its own half of the track")]
    OutsideHalf,

    #[error("passenger would be left off the board")]
    PassengerOffBoard,

    #[error("board move would leave king in check")]
    LeavesKingInCheck,
}

/// Why a castling request was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleRejection {
    #[error("king is not on its home square")]
    KingNotHome,

    #[error("king has already moved")]
    KingMoved,

    #[error("rook is not on its home square")]
    RookNotHome,

    #[error("rook has already moved")]
    RookMoved,

    #[error("attack boards are not in their home position")]
    BoardsNotHome,

    #[error("an attack board was already activated this turn")]
    BoardActivated,

    #[error("castling square is occupied")]
    SquareOccupied,

    #[error("cannot castle out of check")]
    InCheck,

    #[error("castling square is attacked")]
    SquareAttacked,
}

/// Failure to parse one of the textual identifiers (`a4W`, `QL2:180`, `WQL`, ...)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("identifier is empty")]
    Empty,

    #[error("invalid file letter '{0}'")]
    InvalidFile(char),

    #[error("invalid rank in '{0}'")]
    InvalidRank(String),

    #[error("invalid level '{0}'")]
    InvalidLevel(String),

    #[error("invalid pin '{0}'")]
    InvalidPin(String),

    #[error("invalid rotation '{0}'")]
    InvalidRotation(String),

    #[error("invalid piece type '{0}'")]
    InvalidPiece(String),

    #[error("invalid board id '{0}'")]
    InvalidBoard(String),

    #[error("invalid castle side '{0}'")]
    InvalidCastle(String),
}

/// Engine state that can never arise from legal play
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("square {square} does not exist")]
    UnknownSquare { square: String },

    #[error("no piece with id {id}")]
    UnknownPiece { id: u16 },

    #[error("two attack boards share pin {pin}")]
    SharedPin { pin: String },

    #[error("square {square} holds more than one piece")]
    DoubleOccupancy { square: String },

    #[error("piece id {id} is used more than once")]
    DuplicatePieceId { id: u16 },

    #[error("{color} has {count} kings")]
    KingCount { color: String, count: usize },
}

/// Result of a piece-move validator
pub type Verdict = Result<(), MoveRejection>;

/// Result type alias for engine operations that can hit an illegal state
pub type EngineResult<T> = Result<T, EngineError>;
