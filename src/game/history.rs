//! Move history
//!
//! A chronological list of completed actions. Records are appended after an
//! action has been validated and applied and are never edited afterwards;
//! undo truncates the list instead.

use std::fmt;

use serde::{Deserialize, Serialize};
use tri_engine::{
    AttackBoardId, CastleSide, Color, PieceId, PieceKind, PinId, Rotation, Square,
};

/// One completed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MoveRecord {
    #[serde(rename_all = "camelCase")]
    Piece {
        piece_id: PieceId,
        piece: PieceKind,
        color: Color,
        from: Square,
        to: Square,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        captured: Option<PieceKind>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        promotion: Option<PieceKind>,
    },
    #[serde(rename_all = "camelCase")]
    Board {
        board_id: AttackBoardId,
        color: Color,
        from: PinId,
        to: PinId,
        /// New orientation when the move turned the board
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rotation: Option<Rotation>,
    },
    #[serde(rename_all = "camelCase")]
    Castle { color: Color, side: CastleSide },
    #[serde(rename_all = "camelCase")]
    Promotion {
        piece_id: PieceId,
        color: Color,
        promoted_to: PieceKind,
    },
}

impl MoveRecord {
    pub fn color(&self) -> Color {
        match self {
            MoveRecord::Piece { color, .. }
            | MoveRecord::Board { color, .. }
            | MoveRecord::Castle { color, .. }
            | MoveRecord::Promotion { color, .. } => *color,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRecord::Piece {
                piece,
                from,
                to,
                captured,
                promotion,
                ..
            } => {
                let sep = if captured.is_some() { 'x' } else { '-' };
                write!(f, "{piece} {from}{sep}{to}")?;
                if let Some(kind) = promotion {
                    write!(f, "={kind}")?;
                }
                Ok(())
            }
            MoveRecord::Board {
                board_id,
                from,
                to,
                rotation,
                ..
            } => {
                write!(f, "{board_id} {from}-{to}")?;
                if let Some(rotation) = rotation {
                    write!(f, ":{}", rotation.degrees())?;
                }
                Ok(())
            }
            MoveRecord::Castle { side, .. } => write!(f, "castle {side}"),
            MoveRecord::Promotion {
                piece_id,
                promoted_to,
                ..
            } => write!(f, "promote #{piece_id}={promoted_to}"),
        }
    }
}

/// Complete move history for the current game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn from_records(moves: Vec<MoveRecord>) -> Self {
        MoveHistory { moves }
    }

    /// Add a new move to the history
    pub fn add_move(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Drop every record after the first `len`
    pub fn truncate(&mut self, len: usize) {
        self.moves.truncate(len);
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.moves.iter()
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_engine::Track;

    #[test]
    fn test_board_record_json_shape() {
        let record = MoveRecord::Board {
            board_id: AttackBoardId::WQL,
            color: Color::White,
            from: PinId::new(Track::QL, 1),
            to: PinId::new(Track::QL, 2),
            rotation: None,
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["kind"], "board");
        assert_eq!(json["boardId"], "WQL");
        assert_eq!(json["from"], "QL1");
        assert_eq!(json["to"], "QL2");
        assert!(json.get("rotation").is_none());

        let back: MoveRecord = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn test_history_add_and_truncate() {
        let mut history = MoveHistory::default();
        assert!(history.is_empty());
        history.add_move(MoveRecord::Castle {
            color: Color::White,
            side: CastleSide::KingsideKl,
        });
        history.add_move(MoveRecord::Castle {
            color: Color::Black,
            side: CastleSide::KingsideKl,
        });
        assert_eq!(history.len(), 2);
        assert_eq!(history.last_move().map(MoveRecord::color), Some(Color::Black));

        history.truncate(1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.last_move().map(|m| m.to_string()), Some("castle kingside-kl".into()));
    }
}
