//! Plotters: pure functions from elapsed time to position or color.
//!
//! A plotter holds nothing but its construction parameters. Asking it for the
//! same elapsed time always gives the same answer, which keeps animations
//! trivially restartable and easy to test.
//!
//! ## Plotters
//!
//! - [`LinearPlotter`]: constant velocity straight line
//! - [`LinearToSpiralPlotter`]: a line to a point beside the target, then an
//!   Archimedean spiral into the target
//! - [`ColorPulsePlotter`]: a cosine wave between two colors, never completes
//!
//! ## Choosing a plotter
//!
//! Game code does not build position plotters directly. It describes a move
//! with a [`Motion`] and a [`Pace`], and [`Motion::plotter`] builds the
//! concrete plotter once the start and end points are known.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::core::{approach_angle, expected_duration_ms, Color, Point};

/// Maps elapsed milliseconds to a position and a completion flag.
pub trait Plotter: std::fmt::Debug {
    fn plot(&self, elapsed_ms: f64) -> (Point, bool);

    /// Total running time in milliseconds.
    fn duration_ms(&self) -> f64;
}

/// Straight line at constant speed.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearPlotter {
    start: Point,
    end: Point,
    duration_ms: f64,
}

impl LinearPlotter {
    #[must_use]
    pub fn new(start: Point, end: Point, duration_ms: f64) -> Self {
        Self {
            start,
            end,
            duration_ms,
        }
    }

    /// Plotter covering the distance at `speed` pixels per second.
    #[must_use]
    pub fn with_speed(start: Point, end: Point, speed: f64) -> Self {
        Self::new(start, end, expected_duration_ms(start, end, speed))
    }

    fn interpolate(&self, elapsed_ms: f64) -> Point {
        let t = elapsed_ms / self.duration_ms;
        Point::new(
            self.start.x + (self.end.x - self.start.x) * t,
            self.start.y + (self.end.y - self.start.y) * t,
        )
    }
}

impl Plotter for LinearPlotter {
    fn plot(&self, elapsed_ms: f64) -> (Point, bool) {
        if self.duration_ms <= 0.0 || elapsed_ms > self.duration_ms {
            return (self.end, true);
        }
        (self.interpolate(elapsed_ms), false)
    }

    fn duration_ms(&self) -> f64 {
        self.duration_ms.max(0.0)
    }
}

/// A line to a point beside the target, then an inward spiral.
///
/// The spiral starts `radius` away from `end`, rotated a quarter turn from the
/// direction of approach (to the right when clockwise, to the left
/// otherwise). Its radius shrinks linearly over the remaining time while its
/// angle sweeps the approach-derived angle plus `revolutions` full turns, so
/// the card lands exactly on `end` when `duration_ms` runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearToSpiralPlotter {
    end: Point,
    duration_ms: f64,
    line: LinearPlotter,
    radius: f64,
    /// +1 counter-clockwise, -1 clockwise.
    direction: f64,
    /// Angle swept by the whole spiral.
    sweep: f64,
    /// Phase shift applied to the spiral angle.
    phase: f64,
}

impl LinearToSpiralPlotter {
    #[must_use]
    pub fn new(
        start: Point,
        end: Point,
        duration_ms: f64,
        line_duration_ms: f64,
        radius: f64,
        revolutions: f64,
        clockwise: bool,
    ) -> Self {
        let direction = if clockwise { -1.0 } else { 1.0 };
        let approach = approach_angle(start, end);
        let entry_angle = approach + direction * FRAC_PI_2;
        let entry = Point::new(
            end.x + radius * entry_angle.cos(),
            end.y + radius * entry_angle.sin(),
        );
        let line_duration_ms = line_duration_ms.clamp(0.0, duration_ms.max(0.0));
        let sweep = approach + FRAC_PI_2 + TAU * revolutions;
        let phase = if clockwise { -2.0 * entry_angle } else { 0.0 };

        Self {
            end,
            duration_ms,
            line: LinearPlotter::new(start, entry, line_duration_ms),
            radius,
            direction,
            sweep,
            phase,
        }
    }

    /// Where the line segment hands over to the spiral.
    #[must_use]
    pub fn spiral_entry(&self) -> Point {
        self.line.end
    }

    fn spiral_at(&self, spiral_elapsed: f64) -> Point {
        let spiral_duration = self.duration_ms - self.line.duration_ms;
        if spiral_duration <= 0.0 {
            return self.end;
        }
        let remaining = ((spiral_duration - spiral_elapsed) / spiral_duration).clamp(0.0, 1.0);
        let r = self.radius * remaining;
        let theta = self.sweep * remaining + self.phase;
        Point::new(
            self.direction * r * theta.cos() + self.end.x,
            r * theta.sin() + self.end.y,
        )
    }
}

impl Plotter for LinearToSpiralPlotter {
    fn plot(&self, elapsed_ms: f64) -> (Point, bool) {
        if self.duration_ms <= 0.0 || elapsed_ms > self.duration_ms {
            return (self.end, true);
        }
        if elapsed_ms <= self.line.duration_ms {
            return (self.line.plot(elapsed_ms).0, false);
        }
        (self.spiral_at(elapsed_ms - self.line.duration_ms), false)
    }

    fn duration_ms(&self) -> f64 {
        self.duration_ms.max(0.0)
    }
}

/// Cosine pulse between two colors.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorPulsePlotter {
    from: Color,
    to: Color,
    period_ms: f64,
}

impl ColorPulsePlotter {
    #[must_use]
    pub fn new(from: Color, to: Color, period_ms: f64) -> Self {
        Self { from, to, period_ms }
    }

    /// Color at `elapsed_ms`. Starts at `from`, reaches `to` at half a period.
    #[must_use]
    pub fn color_at(&self, elapsed_ms: f64) -> Color {
        if self.period_ms <= 0.0 {
            return self.from;
        }
        let rad = 2.0 * PI * elapsed_ms / self.period_ms;
        let channel = |a: u8, b: u8| {
            let (a, b) = (f64::from(a), f64::from(b));
            let amp = (a - b) / 2.0;
            (amp * rad.cos() + amp + b).round().clamp(0.0, 255.0) as u8
        };
        Color::new(
            channel(self.from.r, self.to.r),
            channel(self.from.g, self.to.g),
            channel(self.from.b, self.to.b),
        )
    }

    /// Pulses never complete on their own.
    #[must_use]
    pub fn plot(&self, elapsed_ms: f64) -> (Color, bool) {
        (self.color_at(elapsed_ms), false)
    }
}

/// Spiral flight parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralMotion {
    /// Total flight time, replacing whatever the pace would give.
    pub duration_ms: f64,
    pub line_duration_ms: f64,
    pub spiral_radius: f64,
    pub revolutions: f64,
    pub is_clockwise: bool,
}

impl Default for SpiralMotion {
    fn default() -> Self {
        Self {
            duration_ms: 1500.0,
            line_duration_ms: 500.0,
            spiral_radius: 60.0,
            revolutions: 2.0,
            is_clockwise: true,
        }
    }
}

/// The shape of a move.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Motion {
    #[default]
    Linear,
    Spiral(SpiralMotion),
}

/// How fast a move goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pace {
    /// Pixels per second.
    Speed(f64),
    /// Fixed total time in milliseconds.
    Duration(f64),
}

impl Pace {
    #[must_use]
    pub fn duration_ms(self, start: Point, end: Point) -> f64 {
        match self {
            Pace::Speed(speed) => expected_duration_ms(start, end, speed),
            Pace::Duration(ms) => ms,
        }
    }
}

impl Motion {
    /// Build the plotter for a move from `start` to `end`.
    #[must_use]
    pub fn plotter(&self, start: Point, end: Point, pace: Pace) -> Box<dyn Plotter> {
        match self {
            Motion::Linear => Box::new(LinearPlotter::new(start, end, pace.duration_ms(start, end))),
            Motion::Spiral(spiral) => Box::new(LinearToSpiralPlotter::new(
                start,
                end,
                spiral.duration_ms,
                spiral.line_duration_ms,
                spiral.spiral_radius,
                spiral.revolutions,
                spiral.is_clockwise,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    #[test]
    fn test_linear_endpoints_and_midpoint() {
        let p = LinearPlotter::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0), 1000.0);
        assert_eq!(p.plot(0.0), (Point::new(0.0, 0.0), false));
        assert_eq!(p.plot(500.0), (Point::new(50.0, 25.0), false));
        assert_eq!(p.plot(1000.0).1, false);
        assert_eq!(p.plot(1000.1), (Point::new(100.0, 50.0), true));
    }

    #[test]
    fn test_linear_zero_duration() {
        let p = LinearPlotter::new(Point::new(5.0, 5.0), Point::new(9.0, 9.0), 0.0);
        assert_eq!(p.plot(0.0), (Point::new(9.0, 9.0), true));
        assert_eq!(p.plot(42.0), (Point::new(9.0, 9.0), true));
    }

    #[test]
    fn test_linear_with_speed() {
        let p = LinearPlotter::with_speed(Point::new(0.0, 0.0), Point::new(0.0, 80.0), 80.0);
        assert!((p.duration_ms() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_spiral_entry_is_beside_target() {
        let end = Point::new(200.0, 100.0);
        // Moving right; clockwise entry lies a quarter turn to the right of
        // the approach, which on screen (y down) is above the target.
        let cw = LinearToSpiralPlotter::new(Point::new(0.0, 100.0), end, 1000.0, 400.0, 50.0, 2.0, true);
        assert!(close(cw.spiral_entry(), Point::new(200.0, 50.0)));
        let ccw = LinearToSpiralPlotter::new(Point::new(0.0, 100.0), end, 1000.0, 400.0, 50.0, 2.0, false);
        assert!(close(ccw.spiral_entry(), Point::new(200.0, 150.0)));
    }

    #[test]
    fn test_spiral_is_continuous_at_handover() {
        for &clockwise in &[true, false] {
            let p = LinearToSpiralPlotter::new(
                Point::new(30.0, 400.0),
                Point::new(250.0, 120.0),
                2000.0,
                600.0,
                70.0,
                3.0,
                clockwise,
            );
            let (at_line_end, _) = p.plot(600.0);
            let (just_after, done) = p.plot(600.0 + 1e-7);
            assert!(!done);
            assert!(close(at_line_end, p.spiral_entry()));
            assert!((at_line_end.x - just_after.x).abs() < 1e-3);
            assert!((at_line_end.y - just_after.y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_spiral_converges_on_target() {
        let end = Point::new(250.0, 120.0);
        let p = LinearToSpiralPlotter::new(Point::new(30.0, 400.0), end, 2000.0, 600.0, 70.0, 3.0, true);
        let (near_end, done) = p.plot(2000.0);
        assert!(!done);
        assert!(close(near_end, end));
        assert_eq!(p.plot(2000.5), (end, true));
        // Radius shrinks monotonically over the spiral part.
        let d1 = p.plot(900.0).0.distance_to(end);
        let d2 = p.plot(1500.0).0.distance_to(end);
        assert!(d1 > d2);
    }

    #[test]
    fn test_spiral_degenerate() {
        let end = Point::new(1.0, 2.0);
        let p = LinearToSpiralPlotter::new(Point::new(0.0, 0.0), end, 0.0, 0.0, 10.0, 1.0, true);
        assert_eq!(p.plot(0.0), (end, true));

        // Line longer than the whole flight is clamped.
        let p = LinearToSpiralPlotter::new(Point::new(0.0, 0.0), end, 100.0, 500.0, 10.0, 1.0, true);
        assert!(close(p.plot(100.0).0, p.spiral_entry()));
        assert_eq!(p.plot(101.0), (end, true));
    }

    #[test]
    fn test_color_pulse() {
        let a = Color::new(0, 153, 0);
        let b = Color::new(200, 53, 100);
        let pulse = ColorPulsePlotter::new(a, b, 1000.0);
        assert_eq!(pulse.plot(0.0), (a, false));
        assert_eq!(pulse.color_at(500.0), b);
        assert_eq!(pulse.color_at(1000.0), a);
        assert_eq!(pulse.plot(123_456.0).1, false);
    }

    #[test]
    fn test_motion_builds_plotters() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(0.0, 40.0);
        let linear = Motion::Linear.plotter(start, end, Pace::Speed(80.0));
        assert!((linear.duration_ms() - 500.0).abs() < 1e-9);

        let spiral = Motion::Spiral(SpiralMotion::default()).plotter(start, end, Pace::Speed(80.0));
        assert!((spiral.duration_ms() - 1500.0).abs() < 1e-9);
    }
}
