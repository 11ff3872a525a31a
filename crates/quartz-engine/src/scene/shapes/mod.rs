mod circle;
mod line;
mod text;

pub use circle::CircleCmd;
pub use line::LineCmd;
pub use text::TextCmd;

use crate::paint::Color;

/// Stroke centered on a shape's outline (half inside, half outside).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}
