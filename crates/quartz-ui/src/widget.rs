use quartz_engine::coords::{Rect, Vec2};

use crate::constraints::Constraints;
use crate::painter::Painter;
use crate::state::SavedState;

// ── Widget trait ──────────────────────────────────────────────────────────

/// The lifecycle every UI component implements.
///
/// The host drives it as follows:
/// - window resize or redraw → [`measure`](Self::measure), then [`paint`](Self::paint)
/// - application suspended → [`save_state`](Self::save_state)
/// - application resumed → [`restore_state`](Self::restore_state) with what was saved
/// - window closed → [`detach`](Self::detach)
///
/// # Implementing a custom widget
///
/// ```rust,ignore
/// use quartz_ui::prelude::*;
///
/// pub struct Dot { color: Color, radius: f32 }
///
/// impl Widget for Dot {
///     fn measure(&mut self, constraints: Constraints) -> Vec2 {
///         constraints.constrain(Vec2::splat(self.radius * 2.0))
///     }
///     fn paint(&mut self, painter: &mut Painter<'_>, rect: Rect) {
///         painter.fill_circle(rect.center(), self.radius, self.color);
///     }
/// }
/// ```
pub trait Widget: 'static {
    /// Compute the size this widget wants given the available space.
    fn measure(&mut self, constraints: Constraints) -> Vec2;

    /// Draw this widget into `painter` within the bounds of `rect`.
    ///
    /// `rect` is the space allocated by the parent.
    fn paint(&mut self, painter: &mut Painter<'_>, rect: Rect);

    /// Capture transient view state before the host is backgrounded.
    fn save_state(&self) -> Option<SavedState> {
        None
    }

    /// Reapply state captured by [`save_state`](Self::save_state).
    ///
    /// Widgets ignore bundles they do not recognize.
    fn restore_state(&mut self, _state: &SavedState) {}

    /// The widget is leaving the tree. Cancel anything still scheduled.
    fn detach(&mut self) {}
}

// ── Element ───────────────────────────────────────────────────────────────

/// A type-erased widget.
///
/// Any `Widget` converts to `Element` via `From` / `Into`.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn measure(&mut self, constraints: Constraints) -> Vec2 {
        self.0.measure(constraints)
    }

    #[inline]
    pub fn paint(&mut self, painter: &mut Painter<'_>, rect: Rect) {
        self.0.paint(painter, rect)
    }

    #[inline]
    pub fn save_state(&self) -> Option<SavedState> {
        self.0.save_state()
    }

    #[inline]
    pub fn restore_state(&mut self, state: &SavedState) {
        self.0.restore_state(state)
    }

    #[inline]
    pub fn detach(&mut self) {
        self.0.detach()
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
