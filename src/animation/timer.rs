//! Delayed actions driven by the tick clock.
//!
//! Timers carry the generation that was current when they were scheduled.
//! [`TimerQueue::invalidate`] bumps the generation, and any older timer is
//! dropped silently when it comes due. There is no per-timer cancellation.

use tracing::debug;

#[derive(Debug)]
struct Pending<T> {
    due_ms: f64,
    seq: u64,
    generation: u64,
    tag: T,
}

/// A queue of tagged, delayed actions.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now_ms: f64,
    generation: u64,
    next_seq: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            generation: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current generation token.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Milliseconds of tick time seen so far.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of timers not yet fired, stale ones included.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Fire `tag` after `delay_ms` of tick time.
    pub fn schedule(&mut self, delay_ms: f64, tag: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms: self.now_ms + delay_ms.max(0.0),
            seq,
            generation: self.generation,
            tag,
        });
    }

    /// Make every timer scheduled so far a no-op.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        debug!(generation = self.generation, "timers invalidated");
    }

    /// Advance the clock and return the tags that came due, earliest first.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<T> {
        self.now_ms += dt_ms.max(0.0);
        let now = self.now_ms;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|p| p.due_ms <= now);
        self.pending = waiting;

        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        let generation = self.generation;
        due.into_iter()
            .filter(|p| {
                let live = p.generation == generation;
                if !live {
                    debug!(stale = p.generation, current = generation, "dropping stale timer");
                }
                live
            })
            .map(|p| p.tag)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_when_due() {
        let mut timers = TimerQueue::new();
        timers.schedule(100.0, "a");
        assert!(timers.advance(50.0).is_empty());
        assert_eq!(timers.advance(50.0), vec!["a"]);
        assert!(timers.advance(1000.0).is_empty());
    }

    #[test]
    fn test_order_by_due_time() {
        let mut timers = TimerQueue::new();
        timers.schedule(300.0, 3);
        timers.schedule(100.0, 1);
        timers.schedule(100.0, 2);
        assert_eq!(timers.advance(500.0), vec![1, 2, 3]);
    }

    #[test]
    fn test_invalidated_timers_never_fire() {
        let mut timers = TimerQueue::new();
        timers.schedule(100.0, "old");
        timers.invalidate();
        timers.schedule(100.0, "new");
        assert_eq!(timers.advance(200.0), vec!["new"]);
        assert_eq!(timers.pending(), 0);
    }
}
