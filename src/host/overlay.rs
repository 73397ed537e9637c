//! Labels and buttons keyed by string id.
//!
//! The overlay is plain data. The host draws it however it likes; the
//! controller routes pointer clicks through [`Overlay::button_at`] and gets
//! back the action that was attached to the button.

use rustc_hash::FxHashMap;

use crate::core::{Color, Point, Rect};

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Point,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button<A> {
    pub rect: Rect,
    pub caption: String,
    pub action: A,
}

/// Visible GUI elements of one controller.
#[derive(Clone, Debug)]
pub struct Overlay<A> {
    labels: FxHashMap<String, Label>,
    buttons: FxHashMap<String, Button<A>>,
}

impl<A> Default for Overlay<A> {
    fn default() -> Self {
        Self {
            labels: FxHashMap::default(),
            buttons: FxHashMap::default(),
        }
    }
}

impl<A: Clone> Overlay<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a label, replacing any label with the same id.
    pub fn show_label(&mut self, id: &str, text: impl Into<String>, pos: Point, color: Color) {
        self.labels.insert(
            id.to_string(),
            Label {
                text: text.into(),
                pos,
                color,
            },
        );
    }

    pub fn show_button(&mut self, id: &str, rect: Rect, caption: impl Into<String>, action: A) {
        self.buttons.insert(
            id.to_string(),
            Button {
                rect,
                caption: caption.into(),
                action,
            },
        );
    }

    /// Hide whatever is shown under `id`.
    pub fn hide(&mut self, id: &str) {
        self.labels.remove(id);
        self.buttons.remove(id);
    }

    /// Hide every element whose id starts with `prefix`.
    pub fn hide_prefixed(&mut self, prefix: &str) {
        self.labels.retain(|id, _| !id.starts_with(prefix));
        self.buttons.retain(|id, _| !id.starts_with(prefix));
    }

    #[must_use]
    pub fn label(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(|l| l.text.as_str())
    }

    #[must_use]
    pub fn button(&self, id: &str) -> Option<&Button<A>> {
        self.buttons.get(id)
    }

    /// Action of the button under the pointer, if any.
    #[must_use]
    pub fn button_at(&self, pos: Point) -> Option<A> {
        self.buttons
            .values()
            .find(|b| b.rect.contains(pos))
            .map(|b| b.action.clone())
    }

    pub fn labels(&self) -> impl Iterator<Item = (&str, &Label)> {
        self.labels.iter().map(|(id, l)| (id.as_str(), l))
    }

    pub fn buttons(&self) -> impl Iterator<Item = (&str, &Button<A>)> {
        self.buttons.iter().map(|(id, b)| (id.as_str(), b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Size;

    #[test]
    fn test_buttons_route_actions() {
        let mut overlay = Overlay::new();
        overlay.show_button("two", Rect::new(Point::new(0.0, 0.0), Size::new(50.0, 30.0)), "2", 2u8);
        overlay.show_button("three", Rect::new(Point::new(60.0, 0.0), Size::new(50.0, 30.0)), "3", 3u8);

        assert_eq!(overlay.button_at(Point::new(70.0, 10.0)), Some(3));
        assert_eq!(overlay.button_at(Point::new(55.0, 10.0)), None);

        overlay.hide("three");
        assert_eq!(overlay.button_at(Point::new(70.0, 10.0)), None);
    }

    #[test]
    fn test_labels_replace_by_id() {
        let mut overlay: Overlay<()> = Overlay::new();
        overlay.show_label("status", "Your turn", Point::default(), Color::WHITE);
        overlay.show_label("status", "Dealing...", Point::default(), Color::WHITE);
        assert_eq!(overlay.label("status"), Some("Dealing..."));

        overlay.show_label("opponent_0", "Carl", Point::default(), Color::WHITE);
        overlay.show_label("opponent_1", "Wendy", Point::default(), Color::WHITE);
        overlay.hide_prefixed("opponent_");
        assert_eq!(overlay.labels().count(), 1);
    }
}
