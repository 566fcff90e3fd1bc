//! Save files
//!
//! Reads and writes [`GameSnapshot`] JSON. Loading goes through
//! [`GameSnapshot::into_game`], so a file that parses but describes an
//! inconsistent game is rejected as a whole.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::error::CoreResult;
use crate::game::{Game, GameSnapshot};

pub fn save_snapshot(path: &Path, snapshot: &GameSnapshot, pretty: bool) -> CoreResult<()> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    debug!(path = %path.display(), moves = snapshot.move_history.len(), "snapshot written");
    Ok(())
}

pub fn load_snapshot(path: &Path) -> CoreResult<GameSnapshot> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Save `game` to `path`
pub fn save_game(path: &Path, game: &Game, pretty: bool) -> CoreResult<()> {
    save_snapshot(path, &game.snapshot(), pretty)?;
    info!(path = %path.display(), "game saved");
    Ok(())
}

/// Load and validate the game stored at `path`
pub fn load_game(path: &Path) -> CoreResult<Game> {
    let game = Game::from_snapshot(load_snapshot(path)?)?;
    info!(path = %path.display(), turn = %game.current_turn(), "game loaded");
    Ok(game)
}
