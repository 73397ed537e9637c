//! Drawing target provided by the host.

use crate::cards::Card;
use crate::core::{Color, Rect, Size};

/// What the host can draw. Image loading and blitting stay on the host side.
pub trait Surface {
    fn fill(&mut self, color: Color);

    /// Draw a card at its own position, face or back depending on orientation.
    fn draw_card(&mut self, card: &Card, size: Size);

    /// Draw an unfilled rectangle, used for empty card slots.
    fn draw_outline(&mut self, rect: Rect, color: Color);
}

/// A surface that records what was drawn. Useful for headless hosts and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Fill(Color),
    Card { label: String, rect: Rect },
    Outline(Rect, Color),
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards drawn.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Card { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn draw_card(&mut self, card: &Card, size: Size) {
        self.commands.push(DrawCommand::Card {
            label: card.to_string(),
            rect: card.rect(size),
        });
    }

    fn draw_outline(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Outline(rect, color));
    }
}

/// Draw every card of a collection, bottom first.
pub fn draw_collection(surface: &mut dyn Surface, collection: &crate::cards::CardCollection) {
    let size = collection.card_size();
    for card in collection.cards() {
        surface.draw_card(card, size);
    }
}

/// Outline color for empty slots.
pub const EMPTY_SLOT: Color = Color::new(77, 77, 77);

/// Draw a collection, or an outline of its slot when it is empty.
pub fn draw_collection_or_slot(surface: &mut dyn Surface, collection: &crate::cards::CardCollection) {
    if collection.is_empty() {
        surface.draw_outline(collection.slot_rect(), EMPTY_SLOT);
    } else {
        draw_collection(surface, collection);
    }
}
