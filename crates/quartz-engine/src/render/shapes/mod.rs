//! Draw-stream renderers.
//!
//! `ShapeRenderer` covers circles and lines with one SDF pipeline;
//! `TextRenderer` covers text through a glyph atlas. Both walk the same
//! `DrawList` and pick out the commands they understand.

mod common;
mod shape;
mod text;

pub use shape::ShapeRenderer;
pub use text::TextRenderer;
