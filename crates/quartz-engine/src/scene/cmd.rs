use crate::scene::shapes::{CircleCmd, LineCmd, TextCmd};

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
/// - teach a renderer under `render::shapes::*` to consume it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle(CircleCmd),
    Line(LineCmd),
    Text(TextCmd),
}

impl DrawCmd {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCmd::Circle(_) => "circle",
            DrawCmd::Line(_) => "line",
            DrawCmd::Text(_) => "text",
        }
    }
}
