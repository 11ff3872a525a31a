use quartz_engine::coords::Vec2;

// ── Constraints ───────────────────────────────────────────────────────────

/// Layout constraints passed down from parent to child during measure.
///
/// A child may return any size in `[min, max]`. Parents enforce their own
/// policy by calling [`Constraints::constrain`] on the returned size.
/// An infinite `max` on an axis means the parent does not bound that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    /// Tight: child must be exactly `size`.
    #[inline]
    pub fn tight(size: Vec2) -> Self {
        Self { min: size, max: size }
    }

    /// Loose: child can be anywhere from zero up to `max`.
    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    /// No constraint: child can take any positive size.
    #[inline]
    pub fn unbounded() -> Self {
        Self { min: Vec2::zero(), max: Vec2::splat(f32::INFINITY) }
    }

    #[inline]
    pub fn has_bounded_width(self) -> bool {
        self.max.x.is_finite()
    }

    #[inline]
    pub fn has_bounded_height(self) -> bool {
        self.max.y.is_finite()
    }

    /// Clamp a size into `[min, max]`.
    #[inline]
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.max(self.min.x).min(self.max.x),
            size.y.max(self.min.y).min(self.max.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrain_clamps_both_axes() {
        let c = Constraints { min: Vec2::new(10.0, 10.0), max: Vec2::new(100.0, 50.0) };
        assert_eq!(c.constrain(Vec2::new(5.0, 80.0)), Vec2::new(10.0, 50.0));
        assert_eq!(c.constrain(Vec2::new(60.0, 20.0)), Vec2::new(60.0, 20.0));
    }

    #[test]
    fn tight_forces_size() {
        let c = Constraints::tight(Vec2::new(30.0, 40.0));
        assert_eq!(c.constrain(Vec2::zero()), Vec2::new(30.0, 40.0));
        assert_eq!(c.constrain(Vec2::splat(1000.0)), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn unbounded_reports_no_bounds() {
        let c = Constraints::unbounded();
        assert!(!c.has_bounded_width());
        assert!(!c.has_bounded_height());
        assert_eq!(c.constrain(Vec2::new(400.0, 400.0)), Vec2::new(400.0, 400.0));

        let l = Constraints::loose(Vec2::new(300.0, f32::INFINITY));
        assert!(l.has_bounded_width());
        assert!(!l.has_bounded_height());
    }
}
