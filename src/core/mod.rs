//! Core framework types: geometry, players, RNG, settings, errors.
//!
//! Nothing here knows about a particular game. Games read their own settings
//! sections and build their tables from these pieces.

pub mod config;
pub mod error;
pub mod geometry;
pub mod player;
pub mod rng;

pub use config::{CardSettings, Settings, WindowSettings};
pub use error::SettingsError;
pub use geometry::{approach_angle, distance, expected_duration_ms, Color, Point, Rect, Size};
pub use player::PlayerId;
pub use rng::GameRng;
