//! Quartz engine crate.
//!
//! Owns the platform + GPU runtime pieces the widget layer draws through:
//! geometry, colors, the draw stream, fonts, GPU renderers, timing and the
//! winit event loop.

pub mod core;
pub mod device;
pub mod logging;
pub mod time;
pub mod window;

pub mod coords;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
