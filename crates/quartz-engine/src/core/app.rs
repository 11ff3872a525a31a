use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Frames are not driven continuously: the runtime redraws on resize,
/// exposure, resume, and whenever a request posted to the frame's
/// [`Scheduler`](crate::time::Scheduler) comes due.
pub trait App {
    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per rendered frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// The application is being backgrounded. Persist whatever should survive.
    fn on_suspend(&mut self) {}

    /// The application came back after [`on_suspend`](Self::on_suspend).
    fn on_resume(&mut self) {}

    /// A window is about to be destroyed.
    fn on_close(&mut self, window_id: WindowId) {
        let _ = window_id;
    }
}
