//! Opponent profiles and rosters.
//!
//! A profile is a name plus integer weights for each heuristic. Rosters are
//! JSON arrays:
//!
//! ```json
//! [
//!   { "name": "Cautious Carl", "methods": { "suit": 5, "rank": 3, "eight": 1 } },
//!   { "name": "Wild Wendy",    "methods": { "eight": 6, "random": 2 } }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::heuristic::Heuristic;
use crate::core::SettingsError;

/// A named opponent with weighted heuristics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProfileRecord", into = "ProfileRecord")]
pub struct OpponentProfile {
    name: String,
    methods: Vec<(Heuristic, u32)>,
}

#[derive(Serialize, Deserialize)]
struct ProfileRecord {
    name: String,
    #[serde(default)]
    methods: BTreeMap<Heuristic, u32>,
}

impl From<ProfileRecord> for OpponentProfile {
    fn from(record: ProfileRecord) -> Self {
        Self {
            name: record.name,
            methods: record.methods.into_iter().collect(),
        }
    }
}

impl From<OpponentProfile> for ProfileRecord {
    fn from(profile: OpponentProfile) -> Self {
        Self {
            name: profile.name,
            methods: profile.methods.into_iter().collect(),
        }
    }
}

impl OpponentProfile {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Builder: add a heuristic with its weight.
    #[must_use]
    pub fn with_method(mut self, heuristic: Heuristic, weight: u32) -> Self {
        self.methods.retain(|(h, _)| *h != heuristic);
        self.methods.push((heuristic, weight));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn methods(&self) -> &[(Heuristic, u32)] {
        &self.methods
    }
}

/// Parse a roster from JSON. An empty roster is an error.
pub fn load_roster(json: &str) -> Result<Vec<OpponentProfile>, SettingsError> {
    let roster: Vec<OpponentProfile> = serde_json::from_str(json)?;
    if roster.is_empty() {
        return Err(SettingsError::EmptyRoster);
    }
    for profile in &roster {
        if profile.methods.iter().all(|(_, w)| *w == 0) {
            warn!(opponent = profile.name(), "opponent has no weighted heuristics and will always draw");
        }
    }
    Ok(roster)
}

/// The roster used when none is configured.
#[must_use]
pub fn default_roster() -> Vec<OpponentProfile> {
    vec![
        OpponentProfile::new("Cautious Carl")
            .with_method(Heuristic::Suit, 5)
            .with_method(Heuristic::Rank, 3)
            .with_method(Heuristic::Eight, 1),
        OpponentProfile::new("Wild Wendy")
            .with_method(Heuristic::Eight, 6)
            .with_method(Heuristic::AnyLegal, 2),
        OpponentProfile::new("Rank Rita")
            .with_method(Heuristic::Rank, 6)
            .with_method(Heuristic::Suit, 2)
            .with_method(Heuristic::Eight, 1),
        OpponentProfile::new("Random Ralph").with_method(Heuristic::AnyLegal, 1),
        OpponentProfile::new("Sly Sally")
            .with_method(Heuristic::Suit, 3)
            .with_method(Heuristic::Rank, 3)
            .with_method(Heuristic::AnyLegal, 1)
            .with_method(Heuristic::Eight, 1),
        OpponentProfile::new("Eager Eddie")
            .with_method(Heuristic::AnyLegal, 4)
            .with_method(Heuristic::Eight, 2),
        OpponentProfile::new("Patient Pat")
            .with_method(Heuristic::Suit, 4)
            .with_method(Heuristic::Rank, 4),
    ]
}
