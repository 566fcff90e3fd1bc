//! Snapshot Integration Tests
//!
//! Tests for the save format:
//! - JSON field names and round trips
//! - Fail-closed loading of inconsistent snapshots
//! - Saving to and loading from disk

mod common;

use common::{pin, snapshot_of, sq};
use serde_json::Value;
use tri_engine::{
    AttackBoardId, BoardMoveRequest, BoardPlacement, Color, EngineError, InstanceId, Level,
    MainBoard, Piece, PieceKind, Rotation,
};
use tridchess::core::persistence::{load_game, save_game};
use tridchess::game::{
    AttackBoardState, Game, GameError, GameSnapshot, MoveRequest, SnapshotError,
    SNAPSHOT_VERSION,
};

fn played_game() -> Game {
    let mut game = Game::new();
    game.move_piece(MoveRequest::new(sq("b2W"), sq("b4W")))
        .expect("white pawn");
    game.move_board(BoardMoveRequest::rotate_in_place(AttackBoardId::BKL, pin("KL6")))
        .expect("black rotation");
    game.move_board(BoardMoveRequest::slide(AttackBoardId::WQL, pin("QL2")))
        .expect("white board");
    game
}

// ============================================================================
// Format Tests
// ============================================================================

#[test]
fn test_snapshot_json_field_names() {
    let snapshot = played_game().snapshot();
    let json: Value = serde_json::to_value(&snapshot).expect("serialize");

    assert_eq!(json["version"], SNAPSHOT_VERSION);
    assert!(json["savedAt"].is_string());
    assert_eq!(json["currentTurn"], "black");
    assert_eq!(json["isCheck"], false);
    assert_eq!(json["gameOver"], false);
    assert_eq!(json["attackBoardPositions"]["WQL"], "QL2");
    assert_eq!(
        json["attackBoardStates"]["WQL"]["activeInstanceId"],
        "QL2:0"
    );
    assert_eq!(
        json["attackBoardStates"]["BKL"]["activeInstanceId"],
        "KL6:180"
    );
    assert_eq!(json["pieces"].as_array().map(Vec::len), Some(32));
    assert_eq!(json["moveHistory"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_snapshot_round_trip_restores_game() {
    let game = played_game();
    let text = serde_json::to_string_pretty(&game.snapshot()).expect("serialize");
    let snapshot: GameSnapshot = serde_json::from_str(&text).expect("deserialize");
    let mut loaded = Game::from_snapshot(snapshot).expect("load");

    assert_eq!(loaded.pieces(), game.pieces());
    assert_eq!(loaded.boards(), game.boards());
    assert_eq!(loaded.current_turn(), Color::Black);
    assert_eq!(loaded.history(), game.history());
    assert_eq!(loaded.undo(), Err(GameError::NothingToUndo));
}

#[test]
fn test_loaded_game_keeps_playing() {
    let snapshot = played_game().snapshot();
    let mut loaded = Game::from_snapshot(snapshot).expect("load");
    loaded
        .move_piece(MoveRequest::new(sq("b7B"), sq("b5B")))
        .expect("black can move");
    assert_eq!(loaded.history().len(), 4);
}

// ============================================================================
// Fail-Closed Loading Tests
// ============================================================================

#[test]
fn test_wrong_version_is_rejected() {
    let mut snapshot = Game::new().snapshot();
    snapshot.version = SNAPSHOT_VERSION + 1;
    assert_eq!(
        Game::from_snapshot(snapshot).map(|_| ()),
        Err(SnapshotError::Version {
            found: SNAPSHOT_VERSION + 1,
            expected: SNAPSHOT_VERSION,
        })
    );
}

#[test]
fn test_tampered_check_flag_is_rejected() {
    let mut snapshot = Game::new().snapshot();
    snapshot.is_check = true;
    assert_eq!(
        Game::from_snapshot(snapshot).map(|_| ()),
        Err(SnapshotError::StatusMismatch { flag: "isCheck" })
    );
}

#[test]
fn test_tampered_winner_is_rejected() {
    let mut snapshot = Game::new().snapshot();
    snapshot.winner = Some(Color::White);
    assert_eq!(
        Game::from_snapshot(snapshot).map(|_| ()),
        Err(SnapshotError::StatusMismatch { flag: "winner" })
    );
}

#[test]
fn test_instance_disagreeing_with_position_is_rejected() {
    let mut snapshot = Game::new().snapshot();
    snapshot.attack_board_states.insert(
        AttackBoardId::WQL,
        AttackBoardState {
            active_instance_id: InstanceId {
                pin: pin("QL2"),
                rotation: Rotation::Deg0,
            },
        },
    );
    assert!(matches!(
        Game::from_snapshot(snapshot),
        Err(SnapshotError::InstanceMismatch {
            board: AttackBoardId::WQL,
            ..
        })
    ));
}

#[test]
fn test_board_on_opponents_half_is_rejected() {
    let kings = vec![
        Piece::new(1, PieceKind::King, Color::White, 1, 1, Level::Main(MainBoard::W)),
        Piece::new(2, PieceKind::King, Color::Black, 1, 5, Level::Main(MainBoard::N)),
    ];
    let snapshot = snapshot_of(
        kings,
        &[(
            AttackBoardId::WQL,
            BoardPlacement::new(pin("QL4"), Rotation::Deg0),
        )],
        Color::White,
    );
    assert_eq!(
        Game::from_snapshot(snapshot).map(|_| ()),
        Err(SnapshotError::OutsideHalf {
            board: AttackBoardId::WQL,
            pin: pin("QL4"),
        })
    );
}

#[test]
fn test_track_states_disagreeing_are_rejected() {
    let mut snapshot = Game::new().snapshot();
    snapshot.track_states.kl.black.rotation = Rotation::Deg180;
    assert_eq!(
        Game::from_snapshot(snapshot).map(|_| ()),
        Err(SnapshotError::TrackMismatch {
            board: AttackBoardId::BKL
        })
    );
}

#[test]
fn test_missing_board_is_rejected() {
    let mut snapshot = Game::new().snapshot();
    snapshot.attack_board_positions.remove(&AttackBoardId::BQL);
    assert_eq!(
        Game::from_snapshot(snapshot).map(|_| ()),
        Err(SnapshotError::MissingBoard {
            board: AttackBoardId::BQL
        })
    );
}

#[test]
fn test_duplicate_king_is_rejected() {
    let mut snapshot = Game::new().snapshot();
    // Turn the white queen into a second king
    let queen = snapshot
        .pieces
        .iter_mut()
        .find(|p| p.color == Color::White && p.kind == PieceKind::Queen)
        .expect("white queen");
    queen.kind = PieceKind::King;
    assert!(matches!(
        Game::from_snapshot(snapshot),
        Err(SnapshotError::Position(EngineError::KingCount { count: 2, .. }))
    ));
}

#[test]
fn test_duplicate_id_is_rejected() {
    let mut snapshot = Game::new().snapshot();
    snapshot.pieces[1].id = snapshot.pieces[0].id;
    assert!(matches!(
        Game::from_snapshot(snapshot),
        Err(SnapshotError::Position(EngineError::DuplicatePieceId { .. }))
    ));
}

#[test]
fn test_piece_on_inactive_pin_is_rejected() {
    let mut snapshot = Game::new().snapshot();
    // Main-board knight pushed onto the z file, which only exists on pins
    let knight = snapshot
        .pieces
        .iter_mut()
        .find(|p| p.color == Color::White && p.kind == PieceKind::Knight)
        .expect("white knight");
    knight.file = 0;
    let id = knight.id.0;
    assert_eq!(
        Game::from_snapshot(snapshot).map(|_| ()),
        Err(SnapshotError::OffBoard { id })
    );
}

#[test]
fn test_malformed_json_is_rejected() {
    let mut json = serde_json::to_value(Game::new().snapshot()).expect("serialize");
    json["attackBoardPositions"]["WQL"] = Value::from("QL9");
    assert!(serde_json::from_value::<GameSnapshot>(json).is_err());
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[test]
fn test_save_and_load_file() {
    let path = std::env::temp_dir().join(format!(
        "tridchess-snapshot-test-{}.json",
        std::process::id()
    ));
    let game = played_game();
    save_game(&path, &game, true).expect("save");
    let loaded = load_game(&path).expect("load");
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.pieces(), game.pieces());
    assert_eq!(loaded.current_turn(), game.current_turn());
}

#[test]
fn test_loading_missing_file_fails() {
    let path = std::env::temp_dir().join("tridchess-snapshot-test-missing.json");
    assert!(load_game(&path).is_err());
}
