//! Playing cards.
//!
//! A [`CardFace`] is the immutable identity of a card (suit and rank) and is
//! `Copy`. A [`Card`] is the physical card on the table: a face plus its
//! orientation and screen position. `Card` is intentionally not `Clone`, so a
//! card can only ever live in one collection or one in-flight animation.

use serde::{Deserialize, Serialize};

use crate::core::{Point, Rect, Size};

/// Card suit, in the fixed enumeration order used for tie-breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Card rank from 2 to 14, where 14 is the ace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    pub const TWO: Rank = Rank(2);
    pub const SIX: Rank = Rank(6);
    pub const EIGHT: Rank = Rank(8);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);
    pub const ACE: Rank = Rank(14);

    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Every rank from `low` up to the ace.
    pub fn range_from(low: Rank) -> impl Iterator<Item = Rank> {
        (low.0..=Rank::ACE.0).map(Rank)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            11 => f.write_str("J"),
            12 => f.write_str("Q"),
            13 => f.write_str("K"),
            14 => f.write_str("A"),
            n => write!(f, "{n}"),
        }
    }
}

/// The identity of a card. Unique within one deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardFace {
    pub suit: Suit,
    pub rank: Rank,
}

impl CardFace {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    #[must_use]
    pub const fn is_red(self) -> bool {
        self.suit.is_red()
    }
}

impl std::fmt::Display for CardFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.symbol())
    }
}

/// A card on the table.
#[derive(Debug, PartialEq)]
pub struct Card {
    face: CardFace,
    face_down: bool,
    pos: Point,
}

impl Card {
    /// A face-up card at the origin.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            face: CardFace::new(suit, rank),
            face_down: false,
            pos: Point::new(0.0, 0.0),
        }
    }

    /// Builder: set face orientation.
    #[must_use]
    pub const fn with_face_down(mut self, face_down: bool) -> Self {
        self.face_down = face_down;
        self
    }

    #[must_use]
    pub const fn face(&self) -> CardFace {
        self.face
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.face.suit
    }

    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.face.rank
    }

    #[must_use]
    pub const fn is_face_down(&self) -> bool {
        self.face_down
    }

    pub fn set_face_down(&mut self, face_down: bool) {
        self.face_down = face_down;
    }

    /// Turn the card over.
    pub fn flip(&mut self) {
        self.face_down = !self.face_down;
    }

    #[must_use]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Point) {
        self.pos = pos;
    }

    /// Screen rectangle covered by this card.
    #[must_use]
    pub const fn rect(&self, size: Size) -> Rect {
        Rect::new(self.pos, size)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.face_down {
            write!(f, "[{}]", self.face)
        } else {
            write!(f, "{}", self.face)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CardFace::new(Suit::Clubs, Rank::EIGHT).to_string(), "8♣");
        assert_eq!(CardFace::new(Suit::Hearts, Rank::ACE).to_string(), "A♥");
        let card = Card::new(Suit::Spades, Rank::QUEEN).with_face_down(true);
        assert_eq!(card.to_string(), "[Q♠]");
    }

    #[test]
    fn test_flip() {
        let mut card = Card::new(Suit::Diamonds, Rank::new(5));
        assert!(!card.is_face_down());
        card.flip();
        assert!(card.is_face_down());
    }

    #[test]
    fn test_colors() {
        assert!(Suit::Hearts.is_red());
        assert!(Suit::Diamonds.is_red());
        assert!(!Suit::Clubs.is_red());
        assert!(!Suit::Spades.is_red());
    }

    #[test]
    fn test_rank_range() {
        assert_eq!(Rank::range_from(Rank::SIX).count(), 9);
        assert_eq!(Rank::range_from(Rank::TWO).count(), 13);
    }
}
