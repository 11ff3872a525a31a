//! Paint model shared between UI and renderers.
//!
//! Colors are linear-ish premultiplied RGBA; geometry types remain in `coords`.

pub mod color;

pub use color::Color;
