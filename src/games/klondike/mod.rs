//! Klondike solitaire.
//!
//! Build the four foundations up by suit from ace to king. Tableau piles
//! build down in alternating colors and take runs of face-up cards. The deck
//! turns over three cards at a time.

pub mod game;
pub mod settings;

pub use game::{Action, Klondike, Slot, FOUNDATION_COUNT, PILE_COUNT};
pub use settings::{KlondikeSettings, RowLayout, StackLayout};
