//! Shared helpers for the integration tests

#![allow(dead_code)]

use tri_engine::{AttackBoardId, AttackBoards, BoardPlacement, Color, Piece, PinId, Square};
use tridchess::game::{AttackBoardState, Game, GameSnapshot};

pub fn sq(id: &str) -> Square {
    id.parse().expect("valid square id")
}

/// Snapshot of an arbitrary position, status flags left at "quiet"
pub fn snapshot_of(
    pieces: Vec<Piece>,
    placements: &[(AttackBoardId, BoardPlacement)],
    turn: Color,
) -> GameSnapshot {
    let boards = AttackBoards::from_placements(placements.iter().copied())
        .expect("distinct pins");
    let mut snapshot = Game::new().snapshot();
    snapshot.pieces = pieces;
    snapshot.current_turn = turn;
    snapshot.attack_board_positions = boards.iter().map(|(id, p)| (id, p.pin)).collect();
    snapshot.attack_board_states = boards
        .iter()
        .map(|(id, p)| {
            (
                id,
                AttackBoardState {
                    active_instance_id: p.instance_id(),
                },
            )
        })
        .collect();
    snapshot.track_states = boards.track_states();
    snapshot.move_history.clear();
    snapshot
}

/// Game over an arbitrary quiet position
pub fn custom_game(
    pieces: Vec<Piece>,
    placements: &[(AttackBoardId, BoardPlacement)],
    turn: Color,
) -> Game {
    Game::from_snapshot(snapshot_of(pieces, placements, turn)).expect("valid custom position")
}

pub fn pin(id: &str) -> PinId {
    id.parse().expect("valid pin id")
}
