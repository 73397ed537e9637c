//! Computer opponents for Crazy Eights.
//!
//! ## Key Types
//!
//! - `Heuristic`: One way of finding a card to play
//! - `OpponentProfile`: Named set of weighted heuristics
//! - `OpponentStrategy`: Trait for card and suit decisions

pub mod heuristic;
pub mod profile;
pub mod strategy;

pub use heuristic::Heuristic;
pub use profile::{default_roster, load_roster, OpponentProfile};
pub use strategy::OpponentStrategy;
