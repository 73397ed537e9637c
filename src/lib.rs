//! # card-table
//!
//! An animated card game framework, with Crazy Eights, War and Klondike built
//! on top of it.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: The library never opens a window or reads a clock. A
//!    host calls [`GameController::on_tick`] with elapsed milliseconds, forwards
//!    pointer events, and draws through a [`Surface`].
//!
//! 2. **Explicit State Machines**: Animations and timers carry enum tags that
//!    name the step waiting on them. Each game handles completions in one
//!    dispatch function instead of nested callbacks.
//!
//! 3. **Configuration Over Convention**: Layout, speeds and delays come from
//!    [`Settings`], with documented defaults for anything missing.
//!
//! ## Modules
//!
//! - `core`: Geometry, players, RNG, settings, errors
//! - `cards`: Cards, card collections with grab/drop policies, decks
//! - `animation`: Plotters, the animation scheduler, timers
//! - `ai`: Crazy Eights opponent heuristics and profiles
//! - `host`: Controller trait, drawing surface, label/button overlay
//! - `games`: Crazy Eights, War, Klondike

pub mod ai;
pub mod animation;
pub mod cards;
pub mod core;
pub mod games;
pub mod host;

// Re-export commonly used types
pub use crate::core::{
    CardSettings, Color, GameRng, PlayerId, Point, Rect, Settings, SettingsError, Size,
    WindowSettings,
};

pub use crate::cards::{Card, CardCollection, CardFace, DeckKind, DropRule, GrabPolicy, Layout, Rank, Suit};

pub use crate::animation::{
    AnimationId, ColorPulsePlotter, Completed, Launch, LinearPlotter, LinearToSpiralPlotter, Motion,
    Movable, Pace, Plotter, Scheduler, SpiralMotion, TimerQueue,
};

pub use crate::ai::{default_roster, load_roster, Heuristic, OpponentProfile, OpponentStrategy};

pub use crate::host::{GameController, Overlay, RecordingSurface, Surface};

pub use crate::games::{CrazyEights, Klondike, Outcome, War};
