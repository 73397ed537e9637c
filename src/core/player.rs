//! Player identification.
//!
//! Seat 0 is always the human at the bottom of the table; opponents take the
//! following seats clockwise.

use serde::{Deserialize, Serialize};

/// Seat index at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The human player.
    pub const HUMAN: PlayerId = PlayerId(0);

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_human(self) -> bool {
        self.0 == 0
    }

    /// The seat after this one at a table of `player_count` seats.
    #[must_use]
    pub const fn next(self, player_count: usize) -> PlayerId {
        if player_count == 0 {
            return self;
        }
        PlayerId(((self.0 as usize + 1) % player_count) as u8)
    }

    /// Iterate over all player IDs for a table with `player_count` seats.
    ///
    /// ```
    /// use card_table::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::HUMAN);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(256)).map(|i| PlayerId(i as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_human() {
            write!(f, "You")
        } else {
            write!(f, "Player {}", self.0)
        }
    }
}
