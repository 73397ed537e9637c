//! Startup errors.
//!
//! Everything that can go wrong once a game is running is a normal negative
//! result (`None`, `false`, an on-screen prompt). Only loading settings and
//! opponent rosters can fail hard.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("settings root must be a JSON object")]
    NotAnObject,

    #[error("opponent roster is empty")]
    EmptyRoster,
}
