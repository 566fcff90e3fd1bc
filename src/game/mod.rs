//! Game orchestration
//!
//! Sequences the rules engine into atomic turns: select, validate, apply,
//! pass the turn, record. Also owns the save format.
//!
//! # Module Structure
//!
//! - `state` - [`Game`], the single owner and writer of the position
//! - `snapshot` - JSON save format and fail-closed loading
//! - `history` - move records
//! - `status` - check, checkmate and stalemate of the side to move
//! - `selection` - click-driven selection
//! - `error` - [`GameError`]

pub mod error;
pub mod history;
pub mod selection;
pub mod snapshot;
pub mod state;
pub mod status;

pub use error::{GameError, GameResult};
pub use history::{MoveHistory, MoveRecord};
pub use selection::{ClickOutcome, Selection};
pub use snapshot::{AttackBoardState, GameSnapshot, SnapshotError, SNAPSHOT_VERSION};
pub use state::{Game, MoveRequest};
pub use status::GameStatus;
