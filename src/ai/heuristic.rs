//! Card-selection heuristics for Crazy Eights opponents.

use serde::{Deserialize, Serialize};

use crate::cards::{CardFace, Rank, Suit};

/// One way of looking for a card to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// A non-eight of the active suit.
    Suit,
    /// A non-eight of the top card's rank.
    Rank,
    /// Any eight.
    Eight,
    /// Anything legal: active suit, top rank, or an eight.
    #[serde(rename = "random")]
    AnyLegal,
}

impl Heuristic {
    /// Cards from `hand` this heuristic would play on `top`, given the suit
    /// currently in force. An eight nobody named a suit for leaves no suit in
    /// force.
    #[must_use]
    pub fn candidates(self, hand: &[CardFace], top: CardFace, active_suit: Option<Suit>) -> Vec<CardFace> {
        hand.iter()
            .copied()
            .filter(|card| self.matches(*card, top, active_suit))
            .collect()
    }

    fn matches(self, card: CardFace, top: CardFace, active_suit: Option<Suit>) -> bool {
        let is_eight = card.rank == Rank::EIGHT;
        let follows_suit = active_suit == Some(card.suit);
        match self {
            Heuristic::Suit => !is_eight && follows_suit,
            Heuristic::Rank => !is_eight && card.rank == top.rank,
            Heuristic::Eight => is_eight,
            Heuristic::AnyLegal => is_eight || follows_suit || card.rank == top.rank,
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Heuristic::Suit => "suit",
            Heuristic::Rank => "rank",
            Heuristic::Eight => "eight",
            Heuristic::AnyLegal => "random",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(suit: Suit, rank: u8) -> CardFace {
        CardFace::new(suit, Rank::new(rank))
    }

    #[test]
    fn test_candidates() {
        let hand = [c(Suit::Hearts, 3), c(Suit::Spades, 9), c(Suit::Clubs, 8), c(Suit::Diamonds, 9)];
        let top = c(Suit::Hearts, 9);

        let hearts = Some(Suit::Hearts);

        assert_eq!(Heuristic::Suit.candidates(&hand, top, hearts), vec![c(Suit::Hearts, 3)]);
        assert_eq!(
            Heuristic::Rank.candidates(&hand, top, hearts),
            vec![c(Suit::Spades, 9), c(Suit::Diamonds, 9)]
        );
        assert_eq!(Heuristic::Eight.candidates(&hand, top, hearts), vec![c(Suit::Clubs, 8)]);
        assert_eq!(Heuristic::AnyLegal.candidates(&hand, top, hearts).len(), 4);
    }

    #[test]
    fn test_no_suit_in_force() {
        let hand = [c(Suit::Hearts, 3), c(Suit::Clubs, 8)];
        let top = c(Suit::Hearts, 8);
        assert!(Heuristic::Suit.candidates(&hand, top, None).is_empty());
        assert_eq!(Heuristic::AnyLegal.candidates(&hand, top, None), vec![c(Suit::Clubs, 8)]);
    }

    #[test]
    fn test_serde_names() {
        let h: Heuristic = serde_json::from_str("\"random\"").unwrap();
        assert_eq!(h, Heuristic::AnyLegal);
        assert_eq!(serde_json::to_string(&Heuristic::Suit).unwrap(), "\"suit\"");
    }
}
