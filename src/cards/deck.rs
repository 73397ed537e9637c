//! Standard decks.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use super::collection::CardCollection;
use crate::core::{Point, Size};

/// Which standard deck to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckKind {
    /// 36 cards, six through ace.
    Short,
    /// 52 cards, two through ace.
    #[default]
    Full,
}

impl DeckKind {
    #[must_use]
    pub const fn lowest_rank(self) -> Rank {
        match self {
            DeckKind::Short => Rank::SIX,
            DeckKind::Full => Rank::TWO,
        }
    }

    #[must_use]
    pub const fn card_count(self) -> usize {
        match self {
            DeckKind::Short => 36,
            DeckKind::Full => 52,
        }
    }
}

impl CardCollection {
    /// A face-down deck, enumerated rank by rank and, within a rank, in suit
    /// order. Shuffle it before dealing.
    #[must_use]
    pub fn deck(kind: DeckKind, pos: Point, offset: Point, card_size: Size) -> Self {
        let mut deck = CardCollection::new(pos, offset, card_size);
        for rank in Rank::range_from(kind.lowest_rank()) {
            for suit in Suit::ALL {
                deck.add(Card::new(suit, rank).with_face_down(true), true);
            }
        }
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::CardFace;
    use crate::core::GameRng;
    use rustc_hash::FxHashSet;

    fn build(kind: DeckKind) -> CardCollection {
        CardCollection::deck(kind, Point::new(0.0, 0.0), Point::new(0.0, 0.0), Size::new(65.0, 85.0))
    }

    #[test]
    fn test_full_deck() {
        let deck = build(DeckKind::Full);
        assert_eq!(deck.len(), 52);
        let unique: FxHashSet<CardFace> = deck.faces().into_iter().collect();
        assert_eq!(unique.len(), 52);
        assert!(deck.cards().iter().all(Card::is_face_down));
        assert_eq!(deck.cards()[0].face(), CardFace::new(Suit::Hearts, Rank::TWO));
        assert_eq!(deck.cards()[3].face(), CardFace::new(Suit::Spades, Rank::TWO));
    }

    #[test]
    fn test_short_deck() {
        let deck = build(DeckKind::Short);
        assert_eq!(deck.len(), DeckKind::Short.card_count());
        assert!(deck.faces().iter().all(|f| f.rank >= Rank::SIX));
    }

    #[test]
    fn test_shuffle_relayouts() {
        let mut deck = CardCollection::deck(
            DeckKind::Full,
            Point::new(10.0, 10.0),
            Point::new(0.5, 0.0),
            Size::new(65.0, 85.0),
        );
        deck.shuffle(&mut GameRng::new(5));
        for (i, card) in deck.cards().iter().enumerate() {
            assert_eq!(card.pos(), Point::new(10.0 + 0.5 * i as f64, 10.0));
        }
    }
}
