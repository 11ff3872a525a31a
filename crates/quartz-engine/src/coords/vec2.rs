use core::ops::{Add, Mul, Neg, Sub};

/// 2D vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Same value on both axes.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Unit vector at `degrees`, measured from +X and turning clockwise on screen.
    #[inline]
    pub fn from_angle_deg(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Smaller of the two components.
    #[inline]
    pub fn min_element(self) -> f32 {
        self.x.min(self.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn angle_zero_points_right() {
        let v = Vec2::from_angle_deg(0.0);
        assert!(close(v.x, 1.0) && close(v.y, 0.0));
    }

    #[test]
    fn angle_90_points_down() {
        // +Y is down, so a quarter turn clockwise lands on 6 o'clock.
        let v = Vec2::from_angle_deg(90.0);
        assert!(close(v.x, 0.0) && close(v.y, 1.0));
    }

    #[test]
    fn angle_minus_90_points_up() {
        let v = Vec2::from_angle_deg(-90.0);
        assert!(close(v.x, 0.0) && close(v.y, -1.0));
    }

    #[test]
    fn length_and_distance() {
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
        assert_eq!(Vec2::new(1.0, 1.0).distance(Vec2::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn min_element_picks_smaller_axis() {
        assert_eq!(Vec2::new(640.0, 480.0).min_element(), 480.0);
        assert_eq!(Vec2::new(10.0, f32::INFINITY).min_element(), 10.0);
    }
}
