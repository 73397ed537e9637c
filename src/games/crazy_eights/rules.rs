//! Crazy Eights table rules, independent of animation and input.

use crate::cards::{CardFace, Rank, Suit};
use crate::core::PlayerId;

/// Whether `card` may be played on `top`.
///
/// Eights are always playable. On an eight, the suit named by its player
/// must be followed; otherwise suit or rank must match.
#[must_use]
pub fn can_play(card: CardFace, top: CardFace, chosen_suit: Option<Suit>) -> bool {
    if card.rank == Rank::EIGHT {
        return true;
    }
    if top.rank == Rank::EIGHT {
        return chosen_suit == Some(card.suit);
    }
    card.rank == top.rank || card.suit == top.suit
}

/// The seat after `player` with `opponents` computer players at the table.
#[must_use]
pub fn player_after(player: PlayerId, opponents: usize) -> PlayerId {
    player.next(opponents + 1)
}

/// Cards dealt to each player.
#[must_use]
pub const fn hand_size_for(opponents: usize) -> usize {
    if opponents == 1 {
        7
    } else {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(suit: Suit, rank: u8) -> CardFace {
        CardFace::new(suit, Rank::new(rank))
    }

    #[test]
    fn test_eight_always_playable() {
        for suit in Suit::ALL {
            assert!(can_play(c(Suit::Clubs, 8), c(suit, 13), None));
            assert!(can_play(c(Suit::Clubs, 8), c(suit, 8), Some(Suit::Hearts)));
        }
    }

    #[test]
    fn test_match_suit_or_rank() {
        assert!(can_play(c(Suit::Diamonds, 5), c(Suit::Spades, 5), None));
        assert!(can_play(c(Suit::Spades, 12), c(Suit::Spades, 5), None));
        assert!(!can_play(c(Suit::Diamonds, 6), c(Suit::Spades, 5), None));
    }

    #[test]
    fn test_chosen_suit_on_eight() {
        assert!(!can_play(c(Suit::Diamonds, 5), c(Suit::Spades, 8), Some(Suit::Hearts)));
        assert!(can_play(c(Suit::Hearts, 5), c(Suit::Spades, 8), Some(Suit::Hearts)));
        // The eight's own suit no longer counts once a suit was named.
        assert!(!can_play(c(Suit::Spades, 5), c(Suit::Spades, 8), Some(Suit::Hearts)));
    }

    #[test]
    fn test_turn_order() {
        assert_eq!(player_after(PlayerId::HUMAN, 3), PlayerId::new(1));
        assert_eq!(player_after(PlayerId::new(3), 3), PlayerId::HUMAN);
        assert_eq!(player_after(PlayerId::new(1), 1), PlayerId::HUMAN);
    }

    #[test]
    fn test_hand_size() {
        assert_eq!(hand_size_for(1), 7);
        assert_eq!(hand_size_for(2), 5);
        assert_eq!(hand_size_for(6), 5);
    }
}
