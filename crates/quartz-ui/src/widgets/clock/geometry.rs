use quartz_engine::coords::Vec2;

use crate::constraints::Constraints;

/// The square a clock is drawn into, as decided by the latest layout pass.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ViewGeometry {
    pub side: f32,
    /// Relative to the widget's own origin.
    pub center: Vec2,
}

impl ViewGeometry {
    pub fn from_side(side: f32) -> Self {
        let side = if side.is_finite() { side.max(0.0) } else { 0.0 };
        Self { side, center: Vec2::splat(side * 0.5) }
    }

    /// Square layout: the smaller requested axis wins. With nothing bounded
    /// the clock asks for its natural diameter.
    pub fn measure(constraints: Constraints, radius: f32) -> Self {
        let side = match (constraints.has_bounded_width(), constraints.has_bounded_height()) {
            (false, false) => radius * 2.0,
            _ => constraints.max.min_element(),
        };
        Self::from_side(side)
    }

    pub fn size(self) -> Vec2 {
        Vec2::splat(self.side)
    }

    pub fn is_empty(self) -> bool {
        self.side <= 0.0
    }
}

/// Endpoint of a hand of `length` at `angle_deg` (0° = 3 o'clock, clockwise).
pub fn hand_tip(center: Vec2, angle_deg: f32, length: f32) -> Vec2 {
    center + Vec2::from_angle_deg(angle_deg) * length
}

/// Position of tick `index` (0..60) on a ring of `radius`; tick 0 is at 12 o'clock.
pub fn tick_position(center: Vec2, radius: f32, index: u32) -> Vec2 {
    let (sin, cos) = (index as f32 * 6.0).to_radians().sin_cos();
    center + Vec2::new(sin, -cos) * radius
}

/// Anchor for numeral `n` (1..=12) on a ring of `radius`.
pub fn numeral_anchor(center: Vec2, radius: f32, n: u32) -> Vec2 {
    hand_tip(center, n as f32 * 30.0 - 90.0, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn layout_takes_smaller_axis() {
        for (w, h) in [(400.0, 300.0), (120.0, 640.0), (250.0, 250.0), (0.0, 90.0)] {
            let g = ViewGeometry::measure(Constraints::loose(Vec2::new(w, h)), 200.0);
            let side = f32::min(w, h);
            assert_eq!(g.side, side);
            assert_eq!(g.center, Vec2::new(side / 2.0, side / 2.0));
        }
    }

    #[test]
    fn unbounded_layout_uses_diameter() {
        let g = ViewGeometry::measure(Constraints::unbounded(), 200.0);
        assert_eq!(g.side, 400.0);
        assert_eq!(g.center, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn one_bounded_axis_wins() {
        let g = ViewGeometry::measure(Constraints::loose(Vec2::new(f32::INFINITY, 150.0)), 200.0);
        assert_eq!(g.side, 150.0);
    }

    #[test]
    fn ticks_are_six_degrees_apart() {
        let center = Vec2::new(200.0, 200.0);
        let r = 175.0;
        for i in 0..60 {
            let a = tick_position(center, r, i) - center;
            let b = tick_position(center, r, (i + 1) % 60) - center;
            assert!((a.length() - r).abs() < EPS);
            let cos = (a.x * b.x + a.y * b.y) / (r * r);
            assert!((cos.clamp(-1.0, 1.0).acos().to_degrees() - 6.0).abs() < EPS);
        }
    }

    #[test]
    fn tick_zero_is_at_twelve_and_fifteen_at_three() {
        let c = Vec2::new(10.0, 10.0);
        assert!(approx(tick_position(c, 5.0, 0), Vec2::new(10.0, 5.0)));
        assert!(approx(tick_position(c, 5.0, 15), Vec2::new(15.0, 10.0)));
    }

    #[test]
    fn numerals_go_clockwise_from_twelve() {
        let c = Vec2::new(200.0, 200.0);
        assert!(approx(numeral_anchor(c, 150.0, 12), Vec2::new(200.0, 50.0)));
        assert!(approx(numeral_anchor(c, 150.0, 3), Vec2::new(350.0, 200.0)));
        assert!(approx(numeral_anchor(c, 150.0, 6), Vec2::new(200.0, 350.0)));
        assert!(approx(numeral_anchor(c, 150.0, 9), Vec2::new(50.0, 200.0)));
    }

    #[test]
    fn hand_tip_follows_angle() {
        let c = Vec2::new(200.0, 200.0);
        assert!(approx(hand_tip(c, -90.0, 130.0), Vec2::new(200.0, 70.0)));
        assert!(approx(hand_tip(c, 0.0, 70.0), Vec2::new(270.0, 200.0)));
    }
}
