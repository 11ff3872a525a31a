//! Time subsystem.
//!
//! `Scheduler` holds delayed redraw requests with cancellable handles. It is
//! not coupled to the runtime; the runtime owns one per window.

mod scheduler;

pub use scheduler::{Scheduler, TimerHandle};
