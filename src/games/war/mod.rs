//! War against one computer opponent.
//!
//! Both sides turn over their top card; the higher rank takes both. Equal
//! ranks start a war: each side antes three face-down cards, then shows a
//! new card, and the winner takes everything staged. Running out of cards
//! loses.

pub mod game;
pub mod settings;

pub use game::{Action, Phase, Side, War, WAR_ANTE};
pub use settings::{MessageSettings, WarSettings};
