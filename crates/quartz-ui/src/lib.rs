//! Quartz UI: retained widgets on top of `quartz-engine`.
//!
//! A widget measures itself against [`Constraints`](constraints::Constraints),
//! paints through a [`Painter`](painter::Painter), and may schedule its own
//! next frame. [`Application`] runs one widget in a window.
//!
//! ```rust,ignore
//! use quartz_ui::prelude::*;
//!
//! Application::new()
//!     .title("Clock")
//!     .font("numerals", font_bytes)
//!     .run_widget(|fonts| ClockView::new(ClockFace::default(), fonts.get("numerals")).into());
//! ```

pub mod app;
pub mod constraints;
pub mod painter;
pub mod scene;
pub mod state;
pub mod widget;
pub mod widgets;

pub use app::Application;

/// Everything you need to build and extend UI.
pub mod prelude {
    pub use crate::app::{Application, FontMap};
    pub use crate::constraints::Constraints;
    pub use crate::painter::Painter;
    pub use crate::scene::UiScene;
    pub use crate::state::{SavedState, StateError};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::clock::{ClockFace, ClockView, HandStyle, LocalTime, TimeSample, TimeSource};

    // Re-export the engine primitives everyone needs.
    pub use quartz_engine::coords::{Rect, Vec2};
    pub use quartz_engine::paint::Color;
    pub use quartz_engine::text::FontId;
}
