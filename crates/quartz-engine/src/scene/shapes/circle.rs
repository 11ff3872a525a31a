use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Stroke;

/// Circle draw payload.
///
/// `fill` covers the disc of `radius`; `stroke` is centered on `radius`.
/// Either may be absent, not both.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl CircleCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, fill: Option<Color>, stroke: Option<Stroke>) -> Self {
        debug_assert!(fill.is_some() || stroke.is_some(), "circle with neither fill nor stroke");
        Self { center, radius, fill, stroke }
    }
}

impl DrawList {
    /// Records a solid disc.
    #[inline]
    pub fn push_filled_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, color: Color) {
        self.push(z, DrawCmd::Circle(CircleCmd::new(center, radius, Some(color), None)));
    }

    /// Records a ring stroked along `radius`.
    #[inline]
    pub fn push_stroked_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, stroke: Stroke) {
        self.push(z, DrawCmd::Circle(CircleCmd::new(center, radius, None, Some(stroke))));
    }
}
