//! Crazy Eights settings, read from the `crazy_eights` section.
//!
//! The opponent roster lives in its own top-level `opponents` section so it
//! can be shared between tables.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::{default_roster, OpponentProfile};
use crate::animation::SpiralMotion;
use crate::core::{Color, Point, Settings};
use crate::games::layout::{ButtonRow, DelayRange, PileLayout, PulseSettings};

/// Where opponents' hands go.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentHandLayout {
    pub position_y: f64,
    /// Horizontal span shared equally by all opponents.
    pub x_range: [f64; 2],
    pub offset: Point,
    pub name_y: f64,
}

/// Where messages are shown.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageLayout {
    pub status: Point,
    pub dialog_title: Point,
    pub player_prompt: Point,
    pub text_color: Color,
    pub game_over_color: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrazyEightsSettings {
    pub stockpile: PileLayout,
    pub discard: PileLayout,
    pub player_hand: PileLayout,
    pub opponent_hand: OpponentHandLayout,
    pub opponent_behavior: DelayRange,
    /// Flight of a played eight.
    pub crazy_8_spiral: SpiralMotion,
    /// Period of the background pulse while an eight is in play.
    pub play_8_period_ms: f64,
    pub game_over_background: PulseSettings,
    pub dialog: ButtonRow,
    pub restart_button: ButtonRow,
    pub messages: MessageLayout,
}

impl Default for CrazyEightsSettings {
    fn default() -> Self {
        Self {
            stockpile: PileLayout::new(300.0, 250.0, 0.0, 0.0),
            discard: PileLayout::new(400.0, 250.0, 0.0, 0.0),
            player_hand: PileLayout::new(100.0, 480.0, 20.0, 0.0),
            opponent_hand: OpponentHandLayout {
                position_y: 40.0,
                x_range: [20.0, 780.0],
                offset: Point::new(8.0, 0.0),
                name_y: 135.0,
            },
            opponent_behavior: DelayRange::default(),
            crazy_8_spiral: SpiralMotion::default(),
            play_8_period_ms: 800.0,
            game_over_background: PulseSettings {
                color1: Color::new(0, 153, 0),
                color2: Color::new(160, 30, 30),
                period_ms: 2000.0,
            },
            dialog: ButtonRow::default(),
            restart_button: ButtonRow {
                position: Point::new(10.0, 580.0),
                ..ButtonRow::default()
            },
            messages: MessageLayout {
                status: Point::new(20.0, 200.0),
                dialog_title: Point::new(200.0, 320.0),
                player_prompt: Point::new(100.0, 450.0),
                text_color: Color::WHITE,
                game_over_color: Color::new(255, 100, 100),
            },
        }
    }
}

impl CrazyEightsSettings {
    pub const SECTION: &'static str = "crazy_eights";

    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        settings.section(Self::SECTION)
    }
}

/// The opponent roster from the `opponents` section, or the built-in one.
#[must_use]
pub fn roster_from_settings(settings: &Settings) -> Vec<OpponentProfile> {
    let Some(raw) = settings.raw_section("opponents") else {
        return default_roster();
    };
    match Vec::<OpponentProfile>::deserialize(raw) {
        Ok(roster) if !roster.is_empty() => roster,
        Ok(_) => {
            warn!("opponent roster is empty, using the built-in roster");
            default_roster()
        }
        Err(err) => {
            warn!(error = %err, "opponent roster malformed, using the built-in roster");
            default_roster()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_section_keeps_defaults() {
        let settings = Settings::default().with_section(
            CrazyEightsSettings::SECTION,
            json!({"opponent_behavior": {"min_delay_ms": 10, "max_delay_ms": 20}}),
        );
        let c8 = CrazyEightsSettings::from_settings(&settings);
        assert_eq!(c8.opponent_behavior.max_delay_ms, 20);
        assert_eq!(c8.stockpile, CrazyEightsSettings::default().stockpile);
    }

    #[test]
    fn test_roster_from_settings() {
        let settings = Settings::default()
            .with_section("opponents", json!([{"name": "Solo", "methods": {"random": 1}}]));
        let roster = roster_from_settings(&settings);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name(), "Solo");

        let broken = Settings::default().with_section("opponents", json!({"name": "x"}));
        assert_eq!(roster_from_settings(&broken), default_roster());
    }
}
