//! Screen geometry: points, sizes, rectangles and colors.
//!
//! All coordinates are `f64` screen pixels with the origin at the top-left
//! corner and `y` growing downwards. Points, sizes and colors deserialize from
//! the plain JSON arrays used in settings files (`[x, y]`, `[w, h]`, `[r, g, b]`).
//!
//! ## Motion helpers
//!
//! - [`distance`]: Euclidean distance between two points
//! - [`expected_duration_ms`]: travel time at a given speed
//! - [`approach_angle`]: direction of travel from one point to another

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::ops::{Add, Sub};

/// A position on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Width and height of a card or a window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    #[must_use]
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

impl From<[f64; 2]> for Size {
    fn from([w, h]: [f64; 2]) -> Self {
        Self { w, h }
    }
}

impl From<Size> for [f64; 2] {
    fn from(s: Size) -> Self {
        [s.w, s.h]
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub pos: Point,
    pub size: Size,
}

impl Rect {
    #[must_use]
    pub const fn new(pos: Point, size: Size) -> Self {
        Self { pos, size }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.pos.x + self.size.w
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.h
    }

    /// Whether the point lies strictly inside the rectangle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x > self.pos.x && p.x < self.right() && p.y > self.pos.y && p.y < self.bottom()
    }

    /// Whether the two rectangles overlap. Touching edges do not count.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && other.pos.x < self.right()
            && self.pos.y < other.bottom()
            && other.pos.y < self.bottom()
    }
}

/// An RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        c.channels()
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance_to(b)
}

/// Milliseconds needed to cover the distance between two points at
/// `speed` pixels per second. A non-positive speed yields an instant move.
#[must_use]
pub fn expected_duration_ms(start: Point, end: Point, speed: f64) -> f64 {
    if speed <= 0.0 {
        return 0.0;
    }
    distance(start, end) / speed * 1000.0
}

/// Angle in radians of the direction of travel from `start` to `end`.
///
/// Purely vertical motion yields `±π/2` (downwards is positive).
#[must_use]
pub fn approach_angle(start: Point, end: Point) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx == 0.0 {
        if dy < 0.0 {
            -FRAC_PI_2
        } else {
            FRAC_PI_2
        }
    } else {
        dy.atan2(dx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_duration() {
        let d = expected_duration_ms(Point::new(0.0, 0.0), Point::new(30.0, 40.0), 50.0);
        assert!((d - 1000.0).abs() < 1e-9);
        assert_eq!(expected_duration_ms(Point::new(0.0, 0.0), Point::new(3.0, 4.0), 0.0), 0.0);
    }

    #[test]
    fn test_approach_angle() {
        let o = Point::new(10.0, 10.0);
        assert!((approach_angle(o, Point::new(10.0, 20.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((approach_angle(o, Point::new(10.0, 0.0)) + FRAC_PI_2).abs() < 1e-12);
        assert!(approach_angle(o, Point::new(20.0, 10.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rect_hit_testing() {
        let r = Rect::new(Point::new(10.0, 10.0), Size::new(65.0, 85.0));
        assert!(r.contains(Point::new(11.0, 11.0)));
        assert!(!r.contains(Point::new(10.0, 50.0)));
        assert!(!r.contains(Point::new(80.0, 50.0)));

        let other = Rect::new(Point::new(70.0, 90.0), Size::new(10.0, 10.0));
        assert!(r.intersects(&other));
        let touching = Rect::new(Point::new(75.0, 10.0), Size::new(10.0, 10.0));
        assert!(!r.intersects(&touching));
    }

    #[test]
    fn test_serde_arrays() {
        let p: Point = serde_json::from_str("[1.5, 2]").unwrap();
        assert_eq!(p, Point::new(1.5, 2.0));
        let c: Color = serde_json::from_str("[0, 153, 0]").unwrap();
        assert_eq!(c, Color::new(0, 153, 0));
        assert_eq!(serde_json::to_string(&Size::new(65.0, 85.0)).unwrap(), "[65.0,85.0]");
    }
}
