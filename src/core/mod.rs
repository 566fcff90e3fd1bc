//! Core infrastructure: errors, settings, save files and logging

pub mod error;
pub mod logging;
pub mod persistence;
pub mod settings;

pub use error::{CoreError, CoreResult};
pub use settings::Settings;
