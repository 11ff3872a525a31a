//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers, atlases) and
//! builds them lazily on first use.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
mod scene_renderer;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene_renderer::SceneRenderer;
