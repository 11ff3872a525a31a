//! Built-in widgets.

pub mod clock;
