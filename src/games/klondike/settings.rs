//! Klondike settings, read from the `klondike` section.

use serde::{Deserialize, Serialize};

use crate::core::{Color, Point, Settings, Size};
use crate::games::layout::{ButtonRow, PileLayout};

/// A row of collections, each `offset` from the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    pub position: Point,
    pub offset: Point,
    /// Offset between cards inside one collection.
    pub inner_offset: Point,
}

impl RowLayout {
    /// Anchor of the `index`-th collection.
    #[must_use]
    pub fn position_of(&self, index: usize) -> Point {
        let i = index as f64;
        Point::new(self.position.x + i * self.offset.x, self.position.y + i * self.offset.y)
    }
}

/// The face-up stack next to the deck.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackLayout {
    /// Gap between the deck's right edge and the stack.
    pub deck_offset: Point,
    pub inner_offset: Point,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KlondikeSettings {
    pub deck: PileLayout,
    pub stack: StackLayout,
    pub pile: RowLayout,
    pub foundation: RowLayout,
    /// Drops closer than this snap into place instead of animating.
    pub drop_animation_distance: f64,
    pub restart_button: ButtonRow,
    pub win_label: Point,
    pub win_line_height: f64,
    pub text_color: Color,
}

impl Default for KlondikeSettings {
    fn default() -> Self {
        Self {
            deck: PileLayout::new(20.0, 20.0, 0.0, 0.0),
            stack: StackLayout {
                deck_offset: Point::new(15.0, 0.0),
                inner_offset: Point::new(15.0, 0.0),
            },
            pile: RowLayout {
                position: Point::new(20.0, 130.0),
                offset: Point::new(75.0, 0.0),
                inner_offset: Point::new(0.0, 18.0),
            },
            foundation: RowLayout {
                position: Point::new(260.0, 20.0),
                offset: Point::new(75.0, 0.0),
                inner_offset: Point::new(0.0, 0.0),
            },
            drop_animation_distance: 15.0,
            restart_button: ButtonRow {
                position: Point::new(10.0, 420.0),
                button_size: Size::new(70.0, 30.0),
                ..ButtonRow::default()
            },
            win_label: Point::new(200.0, 300.0),
            win_line_height: 30.0,
            text_color: Color::WHITE,
        }
    }
}

impl KlondikeSettings {
    pub const SECTION: &'static str = "klondike";

    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        settings.section(Self::SECTION)
    }

    /// Anchor of the stack, to the right of the deck.
    #[must_use]
    pub fn stack_position(&self, card_size: Size) -> Point {
        Point::new(
            self.deck.position.x + card_size.w + self.stack.deck_offset.x,
            self.deck.position.y + self.stack.deck_offset.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_positions() {
        let row = KlondikeSettings::default().pile;
        assert_eq!(row.position_of(0), Point::new(20.0, 130.0));
        assert_eq!(row.position_of(6), Point::new(470.0, 130.0));
    }

    #[test]
    fn test_stack_sits_right_of_deck() {
        let settings = KlondikeSettings::default();
        assert_eq!(settings.stack_position(Size::new(65.0, 85.0)), Point::new(100.0, 20.0));
    }
}
