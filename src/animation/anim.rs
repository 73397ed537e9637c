//! Single animations.
//!
//! An [`Animation`] runs one-way from running to completed. It owns what it
//! moves: a position animation owns the [`CardCollection`] it flies across
//! the table, a pulse owns its current color. Completion is signalled by
//! [`Animation::update`] returning `true` exactly once; the scheduler turns
//! that into a [`Completed`](super::Completed) report.

use crate::cards::CardCollection;
use crate::core::Color;

use super::plotter::{ColorPulsePlotter, Plotter};

/// Identifier of an animation within one scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

impl std::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Animation({})", self.0)
    }
}

/// What an animation drives.
#[derive(Debug)]
pub enum Driver {
    Position {
        plotter: Box<dyn Plotter>,
        holder: CardCollection,
    },
    Pulse {
        plotter: ColorPulsePlotter,
        color: Color,
    },
}

/// One running (or just completed) animation with its caller-supplied tag.
#[derive(Debug)]
pub struct Animation<T> {
    pub(crate) id: AnimationId,
    pub(crate) tag: T,
    pub(crate) driver: Driver,
    elapsed_ms: f64,
    completed: bool,
}

impl<T> Animation<T> {
    pub(crate) fn new(id: AnimationId, tag: T, driver: Driver) -> Self {
        Self {
            id,
            tag,
            driver,
            elapsed_ms: 0.0,
            completed: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> AnimationId {
        self.id
    }

    #[must_use]
    pub fn tag(&self) -> &T {
        &self.tag
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// The cards in flight, if this is a position animation.
    #[must_use]
    pub fn holder(&self) -> Option<&CardCollection> {
        match &self.driver {
            Driver::Position { holder, .. } => Some(holder),
            Driver::Pulse { .. } => None,
        }
    }

    /// Current color, if this is a pulse.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match &self.driver {
            Driver::Pulse { color, .. } => Some(*color),
            Driver::Position { .. } => None,
        }
    }

    /// Advance by `dt_ms` and apply the plotted position or color.
    ///
    /// Returns `true` only on the update that completes the animation.
    /// Completed animations ignore further updates.
    pub fn update(&mut self, dt_ms: f64) -> bool {
        if self.completed {
            return false;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        match &mut self.driver {
            Driver::Position { plotter, holder } => {
                let (pos, done) = plotter.plot(self.elapsed_ms);
                holder.set_pos(pos);
                self.completed = done;
            }
            Driver::Pulse { plotter, color } => {
                let (next, done) = plotter.plot(self.elapsed_ms);
                *color = next;
                self.completed = done;
            }
        }
        self.completed
    }

    /// Mark completed without moving anything further.
    ///
    /// Returns `true` if this call did the completing.
    pub fn force_complete(&mut self) -> bool {
        !std::mem::replace(&mut self.completed, true)
    }
}
