//! War settings, read from the `war` section.

use serde::{Deserialize, Serialize};

use crate::core::{Color, Point, Settings};
use crate::games::layout::{ButtonRow, DelayRange, PileLayout, PulseSettings};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageSettings {
    pub pos: Point,
    pub text_color: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarSettings {
    pub player_deck: PileLayout,
    pub ai_deck: PileLayout,
    pub player_stage: PileLayout,
    pub ai_stage: PileLayout,
    /// Pause between both cards showing and the winner collecting them.
    pub evaluate_delay_ms: f64,
    /// Halved while a war is on.
    pub ai_behavior: DelayRange,
    pub war_background: PulseSettings,
    pub restart_button: ButtonRow,
    pub message: MessageSettings,
}

impl Default for WarSettings {
    fn default() -> Self {
        Self {
            player_deck: PileLayout::new(50.0, 300.0, 0.0, 0.0),
            ai_deck: PileLayout::new(50.0, 50.0, 0.0, 0.0),
            player_stage: PileLayout::new(250.0, 300.0, 20.0, 0.0),
            ai_stage: PileLayout::new(250.0, 50.0, 20.0, 0.0),
            evaluate_delay_ms: 1000.0,
            ai_behavior: DelayRange::default(),
            war_background: PulseSettings {
                color1: Color::new(0, 153, 0),
                color2: Color::new(200, 0, 0),
                period_ms: 1000.0,
            },
            restart_button: ButtonRow {
                position: Point::new(10.0, 420.0),
                ..ButtonRow::default()
            },
            message: MessageSettings {
                pos: Point::new(400.0, 200.0),
                text_color: Color::WHITE,
            },
        }
    }
}

impl WarSettings {
    pub const SECTION: &'static str = "war";

    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        settings.section(Self::SECTION)
    }
}
