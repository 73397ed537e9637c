//! Animation system: plotters, animations, the scheduler, and timers.
//!
//! Everything here is advanced by the host's tick with an explicit elapsed
//! time, so nothing reads a wall clock and tests can drive time directly.

pub mod anim;
pub mod plotter;
pub mod scheduler;
pub mod timer;

pub use anim::{Animation, AnimationId};
pub use plotter::{
    ColorPulsePlotter, LinearPlotter, LinearToSpiralPlotter, Motion, Pace, Plotter, SpiralMotion,
};
pub use scheduler::{Completed, Launch, Movable, Scheduler};
pub use timer::TimerQueue;
