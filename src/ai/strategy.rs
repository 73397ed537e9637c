//! Opponent decision making.

use tracing::debug;

use super::profile::OpponentProfile;
use crate::cards::{CardFace, Rank, Suit};
use crate::core::GameRng;

/// Decisions a Crazy Eights opponent has to make.
pub trait OpponentStrategy {
    fn name(&self) -> &str;

    /// Pick a card to play on `top`, or `None` to draw instead.
    ///
    /// `chosen_suit` is the suit named by whoever played the eight on top;
    /// it is ignored unless `top` is an eight.
    fn try_select_card(
        &self,
        hand: &[CardFace],
        top: CardFace,
        chosen_suit: Option<Suit>,
        rng: &mut GameRng,
    ) -> Option<CardFace>;

    /// Name the suit after playing an eight.
    fn choose_suit(&self, hand: &[CardFace]) -> Suit;
}

impl OpponentStrategy for OpponentProfile {
    fn name(&self) -> &str {
        OpponentProfile::name(self)
    }

    /// Draws heuristics by weight without replacement until one of them has
    /// candidates, then picks among those uniformly.
    fn try_select_card(
        &self,
        hand: &[CardFace],
        top: CardFace,
        chosen_suit: Option<Suit>,
        rng: &mut GameRng,
    ) -> Option<CardFace> {
        let active_suit = if top.rank == Rank::EIGHT {
            chosen_suit
        } else {
            Some(top.suit)
        };

        let mut remaining = self.methods().to_vec();
        while !remaining.is_empty() {
            let weights: Vec<u32> = remaining.iter().map(|(_, w)| *w).collect();
            let index = rng.choose_weighted(&weights)?;
            let (heuristic, _) = remaining.remove(index);

            let candidates = heuristic.candidates(hand, top, active_suit);
            if let Some(card) = rng.choose(&candidates) {
                debug!(opponent = self.name(), %heuristic, %card, "selected card");
                return Some(*card);
            }
        }

        debug!(opponent = self.name(), "no playable card");
        None
    }

    /// The suit held most often. Ties go to the earliest suit in
    /// hearts, diamonds, clubs, spades order.
    fn choose_suit(&self, hand: &[CardFace]) -> Suit {
        let mut tally = [0usize; 4];
        for card in hand {
            tally[card.suit as usize] += 1;
        }
        let mut best = Suit::Hearts;
        for suit in Suit::ALL {
            if tally[suit as usize] > tally[best as usize] {
                best = suit;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Heuristic;

    fn c(suit: Suit, rank: u8) -> CardFace {
        CardFace::new(suit, Rank::new(rank))
    }

    fn everything() -> OpponentProfile {
        OpponentProfile::new("Test")
            .with_method(Heuristic::Suit, 1)
            .with_method(Heuristic::Rank, 1)
            .with_method(Heuristic::Eight, 1)
            .with_method(Heuristic::AnyLegal, 1)
    }

    #[test]
    fn test_no_legal_card_means_draw() {
        let hand = [c(Suit::Clubs, 3), c(Suit::Spades, 4)];
        let top = c(Suit::Hearts, 10);
        let mut rng = GameRng::new(1);
        for _ in 0..20 {
            assert_eq!(everything().try_select_card(&hand, top, None, &mut rng), None);
        }
    }

    #[test]
    fn test_selected_card_is_always_legal() {
        let hand = [c(Suit::Clubs, 3), c(Suit::Hearts, 4), c(Suit::Spades, 10), c(Suit::Diamonds, 8)];
        let top = c(Suit::Hearts, 10);
        let mut rng = GameRng::new(9);
        for _ in 0..50 {
            let card = everything().try_select_card(&hand, top, None, &mut rng).unwrap();
            assert!(card.rank == Rank::EIGHT || card.suit == top.suit || card.rank == top.rank);
        }
    }

    #[test]
    fn test_chosen_suit_applies_on_eight() {
        let hand = [c(Suit::Clubs, 3), c(Suit::Spades, 4)];
        let top = c(Suit::Hearts, 8);
        let profile = OpponentProfile::new("Suits").with_method(Heuristic::Suit, 1);
        let mut rng = GameRng::new(2);
        assert_eq!(
            profile.try_select_card(&hand, top, Some(Suit::Spades), &mut rng),
            Some(c(Suit::Spades, 4))
        );
    }

    #[test]
    fn test_unnamed_eight_only_takes_eights() {
        let hand = [c(Suit::Hearts, 3), c(Suit::Hearts, 8)];
        let top = c(Suit::Hearts, 8);
        let mut rng = GameRng::new(5);
        for _ in 0..20 {
            assert_eq!(everything().try_select_card(&hand, top, None, &mut rng), Some(c(Suit::Hearts, 8)));
        }
    }

    #[test]
    fn test_zero_weights_stop_search() {
        let hand = [c(Suit::Hearts, 3)];
        let top = c(Suit::Hearts, 10);
        let profile = OpponentProfile::new("Idle").with_method(Heuristic::Suit, 0);
        assert_eq!(profile.try_select_card(&hand, top, None, &mut GameRng::new(3)), None);
    }

    #[test]
    fn test_unweighted_heuristic_is_skipped() {
        // Only the rank heuristic has weight, so the suit match is never found.
        let hand = [c(Suit::Hearts, 3)];
        let top = c(Suit::Hearts, 10);
        let profile = OpponentProfile::new("Ranks")
            .with_method(Heuristic::Rank, 1)
            .with_method(Heuristic::Suit, 0);
        assert_eq!(profile.try_select_card(&hand, top, None, &mut GameRng::new(4)), None);
    }

    #[test]
    fn test_choose_suit_majority_and_ties() {
        let profile = everything();
        let hand = [c(Suit::Clubs, 3), c(Suit::Clubs, 4), c(Suit::Spades, 9)];
        assert_eq!(profile.choose_suit(&hand), Suit::Clubs);

        let tied = [c(Suit::Spades, 3), c(Suit::Diamonds, 4)];
        assert_eq!(profile.choose_suit(&tied), Suit::Diamonds);

        assert_eq!(profile.choose_suit(&[]), Suit::Hearts);
    }
}
