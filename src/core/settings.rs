//! User settings
//!
//! Stored as `settings.json` in the per-user configuration directory
//! (e.g. `~/.config/tridchess/settings.json`). A missing or unreadable file
//! falls back to [`Settings::default`] with a warning; it never stops the
//! program.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{CoreError, CoreResult};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Default save file name, inside the per-user data directory
const SAVE_FILENAME: &str = "game.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Snapshot file used when no `--file` is given
    pub save_file: PathBuf,
    /// Indent snapshot JSON
    pub pretty_snapshots: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_filter: "info".to_string(),
            save_file: default_save_file(),
            pretty_snapshots: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "trilltino", "tridchess")
}

fn default_save_file() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(SAVE_FILENAME),
        None => PathBuf::from(SAVE_FILENAME),
    }
}

/// Path of the settings file, falling back to the working directory
pub fn settings_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.config_dir().join(SETTINGS_FILENAME),
        None => PathBuf::from(SETTINGS_FILENAME),
    }
}

impl Settings {
    /// Load settings, using defaults when the file is missing or invalid
    pub fn load() -> Self {
        let path = settings_path();
        if !path.exists() {
            info!(path = %path.display(), "no settings file, using defaults");
            return Settings::default();
        }
        match fs::read_to_string(&path)
            .map_err(CoreError::from)
            .and_then(|contents| Ok(serde_json::from_str::<Settings>(&contents)?))
        {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load settings, using defaults");
                Settings::default()
            }
        }
    }

    /// Write settings to the settings file, creating its directory
    pub fn save(&self) -> CoreResult<()> {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        info!(path = %path.display(), "saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "logFilter": "debug" }"#).expect("parse settings");
        assert_eq!(settings.log_filter, "debug");
        assert!(settings.pretty_snapshots);
        assert_eq!(settings.save_file, Settings::default().save_file);
    }
}
