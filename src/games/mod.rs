//! Games built on the framework.
//!
//! Each game is a [`GameController`](crate::host::GameController) that owns
//! its collections, scheduler, timers and overlay.
//!
//! - `crazy_eights`: Up to six computer opponents, eights are wild
//! - `war`: Two players, highest card takes both
//! - `klondike`: Solitaire with drag and drop

pub mod crazy_eights;
pub mod klondike;
pub mod layout;
pub mod war;

use crate::core::PlayerId;

pub use crazy_eights::CrazyEights;
pub use klondike::Klondike;
pub use war::War;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Single winner.
    Winner(PlayerId),
    /// Nobody could move any more.
    Draw,
}

impl Outcome {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, Outcome::Winner(p) if *p == player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_winner() {
        assert!(Outcome::Winner(PlayerId::HUMAN).is_winner(PlayerId::HUMAN));
        assert!(!Outcome::Winner(PlayerId::new(2)).is_winner(PlayerId::HUMAN));
        assert!(!Outcome::Draw.is_winner(PlayerId::HUMAN));
    }
}
