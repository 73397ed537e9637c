//! Crazy Eights against computer opponents.
//!
//! Players take turns matching the top of the discard pile by suit or rank.
//! Eights are wild and let their player name the suit to follow. Whoever
//! empties their hand first wins.

pub mod game;
pub mod rules;
pub mod settings;

pub use game::{Action, CrazyEights, OpponentSeat, Phase, MAX_OPPONENTS};
pub use rules::{can_play, hand_size_for, player_after};
pub use settings::{roster_from_settings, CrazyEightsSettings, MessageLayout, OpponentHandLayout};
