//! Property tests for plotters.

use card_table::animation::{ColorPulsePlotter, LinearPlotter, LinearToSpiralPlotter, Plotter};
use card_table::core::{Color, Point};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point> {
    (-500.0..1500.0f64, -500.0..1500.0f64).prop_map(|(x, y)| Point::new(x, y))
}

fn close(a: Point, b: Point, eps: f64) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
}

proptest! {
    /// A linear move stays on the segment and lands on the end.
    #[test]
    fn prop_linear_stays_on_segment(
        start in point(),
        end in point(),
        duration in 1.0..5000.0f64,
        fraction in 0.0..1.0f64,
    ) {
        let plotter = LinearPlotter::new(start, end, duration);
        let (p, done) = plotter.plot(duration * fraction);
        prop_assert!(!done);
        let whole = start.distance_to(end);
        prop_assert!((start.distance_to(p) + p.distance_to(end) - whole).abs() < 1e-6);

        let (last, done) = plotter.plot(duration + 1.0);
        prop_assert!(done);
        prop_assert_eq!(last, end);
    }

    /// The spiral picks up exactly where the line left off and ends on target.
    #[test]
    fn prop_spiral_is_continuous_and_lands(
        start in point(),
        end in point(),
        radius in 10.0..120.0f64,
        revolutions in 0u8..4,
        clockwise in any::<bool>(),
    ) {
        prop_assume!(start.distance_to(end) > 1.0);
        let plotter = LinearToSpiralPlotter::new(
            start, end, 1500.0, 500.0, radius, f64::from(revolutions), clockwise,
        );

        let (at_handover, _) = plotter.plot(500.0);
        let (just_after, _) = plotter.plot(500.0 + 1e-6);
        prop_assert!(close(at_handover, plotter.spiral_entry(), 1e-6));
        prop_assert!(close(just_after, plotter.spiral_entry(), 1e-2));
        prop_assert!((plotter.spiral_entry().distance_to(end) - radius).abs() < 1e-6);

        let (at_end, done) = plotter.plot(1500.0);
        prop_assert!(!done);
        prop_assert!(close(at_end, end, 1e-6));
        prop_assert_eq!(plotter.plot(1500.1), (end, true));
    }

    /// Every channel stays between its two endpoints.
    #[test]
    fn prop_pulse_stays_in_range(
        from in any::<[u8; 3]>(),
        to in any::<[u8; 3]>(),
        period in 1.0..5000.0f64,
        elapsed in 0.0..20_000.0f64,
    ) {
        let plotter = ColorPulsePlotter::new(
            Color::new(from[0], from[1], from[2]),
            Color::new(to[0], to[1], to[2]),
            period,
        );
        let color = plotter.color_at(elapsed).channels();
        for i in 0..3 {
            prop_assert!(color[i] >= from[i].min(to[i]));
            prop_assert!(color[i] <= from[i].max(to[i]));
        }
    }
}

#[test]
fn test_pulse_reaches_target_at_half_period() {
    let plotter = ColorPulsePlotter::new(Color::new(0, 153, 0), Color::new(200, 0, 0), 1000.0);
    assert_eq!(plotter.color_at(0.0), Color::new(0, 153, 0));
    assert_eq!(plotter.color_at(500.0), Color::new(200, 0, 0));
    assert_eq!(plotter.color_at(1000.0), Color::new(0, 153, 0));
    assert!(!plotter.plot(1_000_000.0).1);
}
