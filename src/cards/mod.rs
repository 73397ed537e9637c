//! Cards, card collections and decks.
//!
//! ## Key Types
//!
//! - `CardFace`: Copyable card identity (suit + rank)
//! - `Card`: A physical card with orientation and position
//! - `CardCollection`: Ordered stack with grab, drop and layout policies
//! - `DeckKind`: Short (36) or full (52) deck
//!
//! ## Ownership
//!
//! `Card` is not `Clone`. Moving a card between collections moves the value,
//! so a card can never be in two places at once.

pub mod card;
pub mod collection;
pub mod deck;

pub use card::{Card, CardFace, Rank, Suit};
pub use collection::{CardCollection, DropRule, EmptyCallback, GrabPolicy, Grabbed, Layout};
pub use deck::DeckKind;
