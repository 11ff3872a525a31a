use std::ops::Range;

use crate::render::shapes::{ShapeRenderer, TextRenderer};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Pipeline {
    Shape,
    Text,
}

/// A contiguous range of instances drawn by one pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Run {
    pipeline: Pipeline,
    instances: Range<u32>,
}

/// Appends `count` instances starting at `first`, merging with the last run
/// when it uses the same pipeline.
fn extend_runs(runs: &mut Vec<Run>, pipeline: Pipeline, first: u32, count: u32) {
    if count == 0 {
        return;
    }
    if let Some(last) = runs.last_mut()
        && last.pipeline == pipeline
        && last.instances.end == first
    {
        last.instances.end += count;
        return;
    }
    runs.push(Run { pipeline, instances: first..first + count });
}

/// Draws a whole `DrawList` in paint order within a single render pass.
///
/// Commands are routed to the shape or text renderer; consecutive commands
/// for the same renderer are batched into one instanced draw, so a text item
/// sorted between two circles is painted between them.
#[derive(Default)]
pub struct SceneRenderer {
    shapes: ShapeRenderer,
    text: TextRenderer,
    runs: Vec<Run>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.shapes.begin();
        self.text.begin();
        self.runs.clear();

        for item in draw_list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::Circle(cmd) => {
                    let first = self.shapes.queued();
                    let n = self.shapes.push_circle(cmd);
                    extend_runs(&mut self.runs, Pipeline::Shape, first, n);
                }
                DrawCmd::Line(cmd) => {
                    let first = self.shapes.queued();
                    let n = self.shapes.push_line(cmd);
                    extend_runs(&mut self.runs, Pipeline::Shape, first, n);
                }
                DrawCmd::Text(cmd) => {
                    let first = self.text.queued();
                    let n = self.text.push_text(ctx, fonts, cmd);
                    extend_runs(&mut self.runs, Pipeline::Text, first, n);
                }
            }
        }

        if self.runs.is_empty() {
            return;
        }

        self.shapes.prepare(ctx);
        self.text.prepare(ctx);

        let mut rpass = target.load_pass("quartz scene pass");
        for run in &self.runs {
            match run.pipeline {
                Pipeline::Shape => self.shapes.draw(&mut rpass, run.instances.clone()),
                Pipeline::Text => self.text.draw(&mut rpass, run.instances.clone()),
            }
        }
    }
}
