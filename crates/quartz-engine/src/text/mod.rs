//! Font loading and metrics (fontdue).

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
