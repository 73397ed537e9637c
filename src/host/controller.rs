//! The interface between a host loop and a game.

use crate::core::{Color, Point};

use super::overlay::Overlay;
use super::surface::Surface;

/// A game as seen by the host loop.
///
/// The host calls [`GameController::on_tick`] once per frame with the
/// milliseconds elapsed since the previous frame and forwards pointer
/// events. Everything that happens in the game happens inside these calls.
pub trait GameController {
    /// What the game's buttons do.
    type Action: Clone;

    /// Begin the first game.
    fn start(&mut self);

    /// Abandon the current game and begin a fresh one.
    fn restart(&mut self);

    fn on_mouse_event(&mut self, pos: Point, down: bool, double_click: bool);

    /// Pointer moved. Games that drag cards track it; the rest ignore it.
    fn on_mouse_motion(&mut self, _pos: Point) {}

    /// Advance animations, fire due timers, then run the state machine.
    fn on_tick(&mut self, dt_ms: f64);

    /// A button of the overlay was pressed.
    fn on_button(&mut self, action: Self::Action);

    fn render(&self, surface: &mut dyn Surface);

    /// Current table color, including any running pulse.
    fn background_color(&self) -> Color;

    fn overlay(&self) -> &Overlay<Self::Action>;

    /// Route a pointer press to a button if it hit one. Returns `true` if it did.
    fn click_button(&mut self, pos: Point) -> bool {
        match self.overlay().button_at(pos) {
            Some(action) => {
                self.on_button(action);
                true
            }
            None => false,
        }
    }
}
