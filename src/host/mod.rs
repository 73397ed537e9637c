//! Host-facing interfaces: the controller trait, the drawing surface and the
//! label/button overlay.

pub mod controller;
pub mod overlay;
pub mod surface;

pub use controller::GameController;
pub use overlay::{Button, Label, Overlay};
pub use surface::{draw_collection, draw_collection_or_slot, DrawCommand, RecordingSurface, Surface};
