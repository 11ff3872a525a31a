use std::time::Duration;

use quartz_engine::coords::Vec2;
use quartz_engine::paint::Color;
use quartz_engine::scene::{DrawList, Stroke, ZIndex};
use quartz_engine::text::FontId;
use quartz_engine::time::{Scheduler, TimerHandle};

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` with a high-level API. Every call is placed
/// above the previous one, so paint order is call order.
///
/// Also the widget's way back to the host: [`invalidate_after`](Self::invalidate_after)
/// asks for another frame later.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    scheduler: &'a Scheduler,
    z: i32,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, scheduler: &'a Scheduler) -> Self {
        Self { draw_list, scheduler, z: 0 }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Filled disc.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_filled_circle(z, center, radius, color);
    }

    /// Circle outline, the stroke centered on `radius`.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_stroked_circle(z, center, radius, Stroke::new(width, color));
    }

    /// Straight line with butt caps.
    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_line(z, from, to, Stroke::new(width, color));
    }

    /// Text whose first baseline starts at `baseline`.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        baseline: Vec2,
    ) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, baseline);
    }

    // ── scheduling ────────────────────────────────────────────────────────

    /// Requests another frame `delay` from now.
    ///
    /// The request lives as long as the returned handle.
    #[must_use = "dropping the handle cancels the redraw"]
    pub fn invalidate_after(&self, delay: Duration) -> TimerHandle {
        self.scheduler.post_delayed(delay)
    }

    // ── internal ──────────────────────────────────────────────────────────

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
