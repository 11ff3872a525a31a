use quartz_engine::coords::{Rect, Vec2};
use quartz_engine::scene::DrawList;
use quartz_engine::text::{FontId, FontLoadError, FontSystem};
use quartz_engine::time::Scheduler;

use crate::constraints::Constraints;
use crate::painter::Painter;
use crate::widget::Element;

/// Top-level coordinator that owns shared resources across frames.
///
/// Owns the `FontSystem` and the `DrawList` that is refilled each frame by
/// [`frame`](Self::frame). The GPU renderers live in the application and
/// receive both.
pub struct UiScene {
    /// Public so the application can split-borrow it alongside `draw_list`
    /// when handing both to the engine renderer.
    pub font_system: FontSystem,
    /// Draw list populated by the most recent [`frame`](Self::frame) call.
    pub draw_list: DrawList,
}

impl UiScene {
    pub fn new() -> Self {
        Self { font_system: FontSystem::new(), draw_list: DrawList::new() }
    }

    /// Load a TrueType / OpenType font from raw bytes.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Measures and paints `root` over the whole viewport.
    ///
    /// The root persists across frames; redraw requests it posts go to
    /// `scheduler`. The returned list is valid until the next call.
    pub fn frame(
        &mut self,
        root: &mut Element,
        viewport: Vec2,
        scheduler: &Scheduler,
    ) -> &mut DrawList {
        self.draw_list.clear();

        // ── measure ───────────────────────────────────────────────────────
        // The root always occupies the full viewport; its measured size only
        // feeds the widget's own layout.
        let _ = root.measure(Constraints::loose(viewport));
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);

        // ── paint ─────────────────────────────────────────────────────────
        {
            let mut painter = Painter::new(&mut self.draw_list, scheduler);
            root.paint(&mut painter, rect);
        }

        log::trace!("ui frame: {} draw items", self.draw_list.len());
        &mut self.draw_list
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}
