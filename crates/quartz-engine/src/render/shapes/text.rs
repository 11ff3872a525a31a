use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::RenderCtx;
use crate::scene::TextCmd;
use crate::text::FontSystem;

use super::common::{quad_pipeline, InstanceBuffer, QuadBuffers, ViewportUniform};

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

// ── atlas ─────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
struct AtlasSlot {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf allocator for the R8 glyph atlas.
///
/// Glyphs are packed left to right into rows; a new row starts when the next
/// glyph does not fit horizontally. Once full, the atlas stays full.
#[derive(Debug)]
struct ShelfPacker {
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl Default for ShelfPacker {
    fn default() -> Self {
        Self { cursor_x: GLYPH_PADDING, cursor_y: GLYPH_PADDING, row_height: 0, full: false }
    }
}

impl ShelfPacker {
    /// Reserves a `w × h` region and returns its top-left corner.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * GLYPH_PADDING > ATLAS_SIZE {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE {
            log::warn!(
                "TextRenderer: glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); \
                 some glyphs will not be rendered"
            );
            self.full = true;
            return None;
        }

        let pos = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(pos)
    }
}

fn slot_for(x: u32, y: u32, w: u32, h: u32) -> AtlasSlot {
    let s = ATLAS_SIZE as f32;
    AtlasSlot {
        uv_min: [x as f32 / s, y as f32 / s],
        uv_max: [(x + w) as f32 / s, (y + h) as f32 / s],
    }
}

struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    packer: ShelfPacker,
    slots: HashMap<GlyphRasterConfig, AtlasSlot>,
}

impl GlyphAtlas {
    fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("quartz text atlas"),
            size: wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view, packer: ShelfPacker::default(), slots: HashMap::new() }
    }

    /// Returns the atlas slot for `key`, rasterizing and uploading it on first use.
    fn slot(&mut self, queue: &wgpu::Queue, font: &fontdue::Font, key: GlyphRasterConfig) -> Option<AtlasSlot> {
        if let Some(slot) = self.slots.get(&key) {
            return Some(*slot);
        }

        let (metrics, bitmap) = font.rasterize_config(key);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        let (w, h) = (metrics.width as u32, metrics.height as u32);
        let (x, y) = self.packer.allocate(w, h)?;

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let slot = slot_for(x, y, w, h);
        self.slots.insert(key, slot);
        Some(slot)
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized with fontdue at the physical pixel size
/// (`size × scale_factor`) and cached in a 2048 × 2048 R8Unorm atlas for the
/// renderer's lifetime. Quads are positioned in logical pixels.
///
/// A command's `baseline` is where the first line's baseline starts.
pub struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad: Option<QuadBuffers>,
    atlas: Option<GlyphAtlas>,

    instances: Vec<GlyphInstance>,
    instance_buffer: InstanceBuffer,

    // reusable fontdue layout
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group: None,
            viewport_ubo: None,
            quad: None,
            atlas: None,
            instances: Vec::new(),
            instance_buffer: InstanceBuffer::default(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.instances.clear();
    }

    pub fn queued(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Lays out `cmd` and queues one instance per visible glyph.
    ///
    /// Returns the number of instances added.
    pub fn push_text(&mut self, ctx: &RenderCtx<'_>, fonts: &FontSystem, cmd: &TextCmd) -> u32 {
        if cmd.text.is_empty() || cmd.size <= 0.0 {
            return 0;
        }
        let Some(font) = fonts.get(cmd.font) else {
            log::warn!("TextRenderer: unknown FontId {:?}, skipping", cmd.font);
            return 0;
        };

        let scale = ctx.scale_factor.max(f32::EPSILON);
        let px = cmd.size * scale;
        let top = cmd.baseline.y * scale - fonts.ascent(cmd.font, px);

        self.layout.reset(&LayoutSettings {
            x: cmd.baseline.x * scale,
            y: top,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, px, 0));

        let atlas = self.atlas.get_or_insert_with(|| GlyphAtlas::new(ctx.device));
        let color = cmd.color.to_array();
        let before = self.instances.len();

        for g in self.layout.glyphs() {
            if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                continue;
            }
            let Some(slot) = atlas.slot(ctx.queue, font, g.key) else { continue };

            self.instances.push(GlyphInstance {
                dst_min: [g.x / scale, g.y / scale],
                dst_max: [(g.x + g.width as f32) / scale, (g.y + g.height as f32) / scale],
                uv_min: slot.uv_min,
                uv_max: slot.uv_max,
                color,
            });
        }

        (self.instances.len() - before) as u32
    }

    /// Builds GPU resources on first use and uploads this frame's instances.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx.device, "quartz text quad"));
        }
        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        }
        self.instance_buffer.upload(ctx, "quartz text instances", &self.instances);
    }

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
        let Some(atlas) = self.atlas.as_ref() else { return };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quartz text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("quartz text bgl"),
            entries: &[
                ViewportUniform::layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("quartz text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let viewport_ubo = ViewportUniform::create_buffer(ctx.device, "quartz text viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quartz text bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas.view),
                },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        });

        self.pipeline = Some(quad_pipeline(
            ctx,
            "quartz text pipeline",
            &shader,
            &bgl,
            GlyphInstance::layout(),
        ));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group = Some(bind_group);
        self.viewport_ubo = Some(viewport_ubo);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_fills_rows_then_wraps() {
        let mut p = ShelfPacker::default();
        assert_eq!(p.allocate(1000, 10), Some((1, 1)));
        assert_eq!(p.allocate(1000, 20), Some((1002, 1)));
        // Third glyph does not fit on the first row.
        assert_eq!(p.allocate(100, 5), Some((1, 22)));
    }

    #[test]
    fn packer_reports_full_and_stays_full() {
        let mut p = ShelfPacker::default();
        assert!(p.allocate(ATLAS_SIZE - 2, ATLAS_SIZE - 2).is_some());
        assert!(p.allocate(4, 4).is_none());
        assert!(p.full);
        assert!(p.allocate(1, 1).is_none());
    }

    #[test]
    fn oversized_glyph_is_rejected() {
        let mut p = ShelfPacker::default();
        assert!(p.allocate(ATLAS_SIZE, 4).is_none());
        assert!(!p.full);
    }

    #[test]
    fn slot_uvs_are_normalized() {
        let s = slot_for(0, 1024, 1024, 512);
        assert_eq!(s.uv_min, [0.0, 0.5]);
        assert_eq!(s.uv_max, [0.5, 0.75]);
    }
}
