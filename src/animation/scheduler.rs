//! The animation scheduler.
//!
//! Owns every in-flight animation, advances them once per tick and reports
//! each completion exactly once, in start order. Completions carry the tag
//! the caller supplied when starting the animation; the game controller
//! matches on that tag in a single dispatch function instead of nesting
//! callbacks.
//!
//! ## Zero-length moves
//!
//! A move whose computed duration is zero (or that carries no cards) never
//! becomes an animation: [`Scheduler::animate`] returns
//! [`Launch::Finished`] and the caller handles the completion immediately.
//!
//! ## Cancellation
//!
//! [`Scheduler::finish`] forces an animation complete. It stops moving and its
//! completion is still reported, once, on the next tick.
//! [`Scheduler::finish_all`] forces and drains everything at once, which is
//! what a restart needs: the caller gets every card in flight back and drops
//! the stale tags.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::anim::{Animation, AnimationId, Driver};
use super::plotter::{ColorPulsePlotter, Motion, Pace};
use crate::cards::{Card, CardCollection};
use crate::core::{Color, Point, Size};

/// Something that can fly across the table.
#[derive(Debug)]
pub enum Movable {
    /// An existing holder, moved as a whole.
    Holder(CardCollection),
    /// Loose cards. A temporary holder is built at the first card's position.
    Cards(Vec<Card>),
}

impl From<Card> for Movable {
    fn from(card: Card) -> Self {
        Movable::Cards(vec![card])
    }
}

/// A finished animation handed back to its owner.
#[derive(Debug)]
pub struct Completed<T> {
    pub id: AnimationId,
    pub tag: T,
    /// The cards that were moved, now resting at the destination.
    /// `None` for color pulses.
    pub holder: Option<CardCollection>,
}

impl<T> Completed<T> {
    /// All cards that arrived, bottom to top.
    pub fn into_cards(self) -> Vec<Card> {
        self.holder.map(|mut h| h.take_all()).unwrap_or_default()
    }
}

/// Result of starting a move.
#[derive(Debug)]
pub enum Launch<T> {
    Running(AnimationId),
    /// Nothing to animate; the move is already done.
    Finished(Completed<T>),
}

/// Owns all in-flight animations of one controller.
#[derive(Debug)]
pub struct Scheduler<T> {
    card_size: Size,
    next_id: u64,
    active: FxHashMap<AnimationId, Animation<T>>,
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new(card_size: Size) -> Self {
        Self {
            card_size,
            next_id: 1,
            active: FxHashMap::default(),
        }
    }

    fn allocate_id(&mut self) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Start moving `movable` to `destination`.
    pub fn animate(
        &mut self,
        movable: Movable,
        destination: Point,
        pace: Pace,
        motion: &Motion,
        tag: T,
    ) -> Launch<T> {
        let id = self.allocate_id();
        let mut holder = match movable {
            Movable::Holder(holder) => holder,
            Movable::Cards(cards) => CardCollection::carrying(cards, self.card_size),
        };

        let plotter = motion.plotter(holder.pos(), destination, pace);
        if holder.is_empty() || plotter.duration_ms() <= 0.0 {
            holder.set_pos(destination);
            trace!(%id, "move finished without animating");
            return Launch::Finished(Completed {
                id,
                tag,
                holder: Some(holder),
            });
        }

        debug!(%id, from = %holder.pos(), to = %destination, duration_ms = plotter.duration_ms(), "animation started");
        self.active
            .insert(id, Animation::new(id, tag, Driver::Position { plotter, holder }));
        Launch::Running(id)
    }

    /// Start a color pulse. Pulses run until finished explicitly.
    pub fn pulse(&mut self, plotter: ColorPulsePlotter, tag: T) -> AnimationId {
        let id = self.allocate_id();
        let color = plotter.color_at(0.0);
        self.active
            .insert(id, Animation::new(id, tag, Driver::Pulse { plotter, color }));
        id
    }

    /// Advance every animation and collect the ones that completed.
    pub fn tick(&mut self, dt_ms: f64) -> Vec<Completed<T>> {
        for animation in self.active.values_mut() {
            animation.update(dt_ms);
        }
        let mut done: Vec<AnimationId> = self
            .active
            .iter()
            .filter(|(_, a)| a.is_completed())
            .map(|(id, _)| *id)
            .collect();
        done.sort_unstable();
        done.into_iter()
            .filter_map(|id| self.active.remove(&id))
            .map(into_completed)
            .collect()
    }

    /// Force one animation complete. Its completion is reported on the next
    /// tick. Returns `false` if it was unknown or already complete.
    pub fn finish(&mut self, id: AnimationId) -> bool {
        self.active
            .get_mut(&id)
            .is_some_and(Animation::force_complete)
    }

    /// Force every animation complete and hand them all back now.
    pub fn finish_all(&mut self) -> Vec<Completed<T>> {
        let mut all: Vec<Animation<T>> = self.active.drain().map(|(_, a)| a).collect();
        all.sort_unstable_by_key(Animation::id);
        all.into_iter().map(into_completed).collect()
    }

    /// Current color of a running pulse.
    #[must_use]
    pub fn color(&self, id: AnimationId) -> Option<Color> {
        self.active.get(&id).and_then(Animation::color)
    }

    #[must_use]
    pub fn is_running(&self, id: AnimationId) -> bool {
        self.active.get(&id).is_some_and(|a| !a.is_completed())
    }

    /// Holders currently in flight, in start order.
    #[must_use]
    pub fn in_flight(&self) -> Vec<&CardCollection> {
        let mut running: Vec<&Animation<T>> = self.active.values().collect();
        running.sort_unstable_by_key(|a| a.id());
        running.into_iter().filter_map(Animation::holder).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

fn into_completed<T>(animation: Animation<T>) -> Completed<T> {
    let holder = match animation.driver {
        Driver::Position { holder, .. } => Some(holder),
        Driver::Pulse { .. } => None,
    };
    Completed {
        id: animation.id,
        tag: animation.tag,
        holder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    const SIZE: Size = Size::new(65.0, 85.0);

    fn card_at(x: f64, y: f64) -> Card {
        let mut card = Card::new(Suit::Clubs, Rank::new(9));
        card.set_pos(Point::new(x, y));
        card
    }

    #[test]
    fn test_zero_duration_finishes_synchronously() {
        let mut scheduler: Scheduler<u8> = Scheduler::new(SIZE);
        let launch = scheduler.animate(
            card_at(10.0, 10.0).into(),
            Point::new(10.0, 10.0),
            Pace::Speed(80.0),
            &Motion::Linear,
            7,
        );
        let Launch::Finished(done) = launch else {
            panic!("expected synchronous completion");
        };
        assert_eq!(done.tag, 7);
        assert_eq!(done.into_cards().len(), 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_empty_card_list_finishes_synchronously() {
        let mut scheduler: Scheduler<u8> = Scheduler::new(SIZE);
        let launch = scheduler.animate(
            Movable::Cards(Vec::new()),
            Point::new(300.0, 10.0),
            Pace::Speed(80.0),
            &Motion::Linear,
            1,
        );
        assert!(matches!(launch, Launch::Finished(_)));
    }

    #[test]
    fn test_completion_reported_once() {
        let mut scheduler = Scheduler::new(SIZE);
        let launch = scheduler.animate(
            card_at(0.0, 0.0).into(),
            Point::new(80.0, 0.0),
            Pace::Speed(80.0),
            &Motion::Linear,
            "deal",
        );
        assert!(matches!(launch, Launch::Running(_)));
        assert!(scheduler.tick(500.0).is_empty());
        assert_eq!(scheduler.in_flight()[0].cards()[0].pos(), Point::new(40.0, 0.0));

        let done = scheduler.tick(600.0);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].tag, "deal");
        assert!(scheduler.tick(100.0).is_empty());
    }

    #[test]
    fn test_completions_in_start_order() {
        let mut scheduler = Scheduler::new(SIZE);
        for tag in 0..5u32 {
            scheduler.animate(
                card_at(0.0, 0.0).into(),
                Point::new(10.0, 0.0),
                Pace::Duration(100.0),
                &Motion::Linear,
                tag,
            );
        }
        let tags: Vec<u32> = scheduler.tick(200.0).into_iter().map(|c| c.tag).collect();
        assert_eq!(tags, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_finish_reports_next_tick() {
        let mut scheduler = Scheduler::new(SIZE);
        let Launch::Running(id) = scheduler.animate(
            card_at(0.0, 0.0).into(),
            Point::new(1000.0, 0.0),
            Pace::Speed(10.0),
            &Motion::Linear,
            (),
        ) else {
            panic!("expected a running animation");
        };
        assert!(scheduler.finish(id));
        assert!(!scheduler.finish(id));
        assert!(!scheduler.is_running(id));

        let done = scheduler.tick(16.0);
        assert_eq!(done.len(), 1);
        // Frozen where it was when finished.
        assert_eq!(done[0].holder.as_ref().unwrap().pos(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_finish_all_drains_everything() {
        let mut scheduler = Scheduler::new(SIZE);
        scheduler.animate(card_at(0.0, 0.0).into(), Point::new(500.0, 0.0), Pace::Speed(1.0), &Motion::Linear, 'a');
        let pulse = scheduler.pulse(ColorPulsePlotter::new(Color::BLACK, Color::WHITE, 400.0), 'p');
        assert_eq!(scheduler.color(pulse), Some(Color::BLACK));

        let drained = scheduler.finish_all();
        assert_eq!(drained.len(), 2);
        assert!(drained[0].holder.is_some());
        assert!(drained[1].holder.is_none());
        assert!(scheduler.is_empty());
        assert!(scheduler.tick(10.0).is_empty());
    }

    #[test]
    fn test_pulse_never_completes() {
        let mut scheduler = Scheduler::new(SIZE);
        let id = scheduler.pulse(ColorPulsePlotter::new(Color::BLACK, Color::WHITE, 400.0), ());
        for _ in 0..100 {
            assert!(scheduler.tick(100.0).is_empty());
        }
        assert!(scheduler.is_running(id));
    }
}
