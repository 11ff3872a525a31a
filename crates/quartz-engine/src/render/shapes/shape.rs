use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::{CircleCmd, LineCmd};

use super::common::{quad_pipeline, InstanceBuffer, QuadBuffers, ViewportUniform};

const KIND_CIRCLE: f32 = 0.0;
const KIND_SEGMENT: f32 = 1.0;

/// Renderer for `DrawCmd::Circle` and `DrawCmd::Line`.
///
/// Both primitives share one signed-distance pipeline:
/// - circles are a filled disc plus an optional ring centered on the radius
/// - lines are butt-capped segments
///
/// Instances are collected with `push_*`, uploaded once per frame and drawn
/// in ranges so that the caller can interleave them with text.
#[derive(Default)]
pub struct ShapeRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad: Option<QuadBuffers>,

    instances: Vec<ShapeInstance>,
    instance_buffer: InstanceBuffer,
}

impl ShapeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the instances collected for the previous frame.
    pub fn begin(&mut self) {
        self.instances.clear();
    }

    /// Queues a circle. Returns the number of instances added (0 or 1).
    pub fn push_circle(&mut self, cmd: &CircleCmd) -> u32 {
        match ShapeInstance::circle(cmd) {
            Some(inst) => {
                self.instances.push(inst);
                1
            }
            None => 0,
        }
    }

    /// Queues a line. Returns the number of instances added (0 or 1).
    pub fn push_line(&mut self, cmd: &LineCmd) -> u32 {
        match ShapeInstance::segment(cmd) {
            Some(inst) => {
                self.instances.push(inst);
                1
            }
            None => 0,
        }
    }

    /// Number of instances queued this frame.
    pub fn queued(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Builds GPU resources on first use and uploads this frame's instances.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx.device, "quartz shape quad"));
        }
        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        }
        self.instance_buffer.upload(ctx, "quartz shape instances", &self.instances);
    }

    /// Draws `range` of this frame's instances into an open pass.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        if range.is_empty() {
            return;
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };
        let Some(instances) = self.instance_buffer.buffer() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, range);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quartz shape shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("quartz shape bgl"),
            entries: &[ViewportUniform::layout_entry()],
        });

        let viewport_ubo = ViewportUniform::create_buffer(ctx.device, "quartz shape viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quartz shape bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.pipeline = Some(quad_pipeline(
            ctx,
            "quartz shape pipeline",
            &shader,
            &bgl,
            ShapeInstance::layout(),
        ));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group = Some(bind_group);
        self.viewport_ubo = Some(viewport_ubo);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (64 bytes):
///
///  offset  0  p0      [f32; 2]   loc 1   circle center / segment start
///  offset  8  p1      [f32; 2]   loc 2   segment end (unused for circles)
///  offset 16  params  [f32; 4]   loc 3   radius, half stroke width, kind, _
///  offset 32  fill    [f32; 4]   loc 4   premultiplied
///  offset 48  stroke  [f32; 4]   loc 5   premultiplied
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct ShapeInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    params: [f32; 4],
    fill: [f32; 4],
    stroke: [f32; 4],
}

impl ShapeInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // p0
        2 => Float32x2, // p1
        3 => Float32x4, // params
        4 => Float32x4, // fill
        5 => Float32x4  // stroke
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    fn circle(cmd: &CircleCmd) -> Option<Self> {
        if cmd.radius.is_nan() || cmd.radius <= 0.0 || !cmd.center.is_finite() {
            return None;
        }

        let fill = cmd.fill.map_or([0.0; 4], |c| c.to_array());
        let (half_width, stroke) = match cmd.stroke {
            Some(s) if s.width > 0.0 => (s.width * 0.5, s.color.to_array()),
            _ => (0.0, [0.0; 4]),
        };
        if fill[3] <= 0.0 && stroke[3] <= 0.0 {
            return None;
        }

        Some(Self {
            p0: [cmd.center.x, cmd.center.y],
            p1: [cmd.center.x, cmd.center.y],
            params: [cmd.radius, half_width, KIND_CIRCLE, 0.0],
            fill,
            stroke,
        })
    }

    fn segment(cmd: &LineCmd) -> Option<Self> {
        if cmd.stroke.width.is_nan() || cmd.stroke.width <= 0.0 || cmd.stroke.color.a <= 0.0 {
            return None;
        }
        if !cmd.from.is_finite() || !cmd.to.is_finite() {
            return None;
        }

        Some(Self {
            p0: [cmd.from.x, cmd.from.y],
            p1: [cmd.to.x, cmd.to.y],
            params: [cmd.from.distance(cmd.to), cmd.stroke.width * 0.5, KIND_SEGMENT, 0.0],
            fill: [0.0; 4],
            stroke: cmd.stroke.color.to_array(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::Stroke;

    #[test]
    fn circle_carries_fill_and_half_stroke() {
        let cmd = CircleCmd::new(
            Vec2::new(10.0, 20.0),
            5.0,
            Some(Color::WHITE),
            Some(Stroke::new(4.0, Color::BLACK)),
        );
        let inst = ShapeInstance::circle(&cmd).unwrap();
        assert_eq!(inst.p0, [10.0, 20.0]);
        assert_eq!(inst.params, [5.0, 2.0, KIND_CIRCLE, 0.0]);
        assert_eq!(inst.fill, Color::WHITE.to_array());
        assert_eq!(inst.stroke, Color::BLACK.to_array());
    }

    #[test]
    fn degenerate_circles_are_dropped() {
        let zero = CircleCmd::new(Vec2::zero(), 0.0, Some(Color::BLACK), None);
        assert!(ShapeInstance::circle(&zero).is_none());

        let invisible = CircleCmd::new(Vec2::zero(), 3.0, Some(Color::TRANSPARENT), None);
        assert!(ShapeInstance::circle(&invisible).is_none());
    }

    #[test]
    fn segment_encodes_length_and_half_width() {
        let cmd = LineCmd {
            from: Vec2::new(0.0, 0.0),
            to: Vec2::new(3.0, 4.0),
            stroke: Stroke::new(10.0, Color::BLACK),
        };
        let inst = ShapeInstance::segment(&cmd).unwrap();
        assert_eq!(inst.params, [5.0, 5.0, KIND_SEGMENT, 0.0]);
        assert_eq!(inst.p1, [3.0, 4.0]);
    }

    #[test]
    fn zero_width_segment_is_dropped() {
        let cmd = LineCmd {
            from: Vec2::zero(),
            to: Vec2::new(1.0, 0.0),
            stroke: Stroke::new(0.0, Color::BLACK),
        };
        assert!(ShapeInstance::segment(&cmd).is_none());
    }

    #[test]
    fn push_counts_instances() {
        let mut r = ShapeRenderer::new();
        assert_eq!(r.push_circle(&CircleCmd::new(Vec2::zero(), 1.0, Some(Color::BLACK), None)), 1);
        assert_eq!(r.push_circle(&CircleCmd::new(Vec2::zero(), 0.0, Some(Color::BLACK), None)), 0);
        assert_eq!(r.queued(), 1);
        r.begin();
        assert_eq!(r.queued(), 0);
    }
}
