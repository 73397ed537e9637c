//! Layout and appearance settings shared by the games.

use serde::{Deserialize, Serialize};

use crate::animation::ColorPulsePlotter;
use crate::core::{Color, Point, Rect, Size};

/// Anchor and per-card offset of one card collection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PileLayout {
    pub position: Point,
    pub offset: Point,
}

impl PileLayout {
    #[must_use]
    pub const fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self {
            position: Point::new(x, y),
            offset: Point::new(dx, dy),
        }
    }
}

/// Row of dialog buttons.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonRow {
    pub position: Point,
    pub button_size: Size,
    pub button_margin: f64,
}

impl Default for ButtonRow {
    fn default() -> Self {
        Self {
            position: Point::new(200.0, 350.0),
            button_size: Size::new(50.0, 30.0),
            button_margin: 10.0,
        }
    }
}

impl ButtonRow {
    /// Rectangle of the `index`-th button.
    #[must_use]
    pub fn rect(&self, index: usize) -> Rect {
        let step = self.button_size.w + self.button_margin;
        Rect::new(
            Point::new(self.position.x + step * index as f64, self.position.y),
            self.button_size,
        )
    }
}

/// A background pulse between two colors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PulseSettings {
    pub color1: Color,
    pub color2: Color,
    pub period_ms: f64,
}

impl PulseSettings {
    #[must_use]
    pub fn plotter(&self) -> ColorPulsePlotter {
        ColorPulsePlotter::new(self.color1, self.color2, self.period_ms)
    }
}

/// Random "thinking" delay of a computer player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min_delay_ms: 500,
            max_delay_ms: 1500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_row_spacing() {
        let row = ButtonRow::default();
        assert_eq!(row.rect(0).pos, Point::new(200.0, 350.0));
        assert_eq!(row.rect(2).pos, Point::new(320.0, 350.0));
    }
}
