use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::depth::DepthBuffer;
use crate::error::SetupResult;
use crate::framebuffer::{FrameBuffer, PixelSink};
use crate::raymarch;
use crate::shader::ColumnShader;
use crate::sprites;
use crate::world::World;

/// Per-frame inputs, borrowed for the length of one render pass.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a RenderConfig,
    pub camera: &'a Camera,
    pub world: &'a World,
}

/// Statistics for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub wall_columns: usize,
    pub sprite_pixels: usize,
}

/// Renders one frame: every column first, then all sprites.
///
/// `depth` is cleared here; on return it holds the nearest distance drawn in
/// each column.
pub fn render_frame<P: PixelSink + ?Sized>(
    sink: &mut P,
    depth: &mut DepthBuffer,
    ctx: &RenderContext,
) -> FrameStats {
    let config = ctx.config;
    let world = ctx.world;
    depth.clear();

    let shader = ColumnShader::new(config, &world.wall_texture);
    let mut stats = FrameStats::default();
    for column in 0..config.screen_width {
        let hit = raymarch::cast_column(ctx.camera, column, &world.map, config);
        if hit.hit_wall {
            stats.wall_columns += 1;
        }
        shader.shade(sink, depth, column, &hit);
    }

    stats.sprite_pixels = sprites::render_sprites(
        &world.objects,
        &world.sprites,
        ctx.camera,
        config,
        sink,
        depth,
    );
    stats
}

/// Owns the frame and depth buffers between frames.
pub struct Renderer {
    config: RenderConfig,
    frame: FrameBuffer,
    depth: DepthBuffer,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> SetupResult<Self> {
        config.validate()?;
        log::info!(
            "Renderer {}x{}, fov {:.1} deg, horizon {}",
            config.screen_width,
            config.screen_height,
            config.fov.to_degrees(),
            config.horizon
        );
        Ok(Self {
            frame: FrameBuffer::new(config.screen_width, config.screen_height),
            depth: DepthBuffer::new(config.screen_width),
            config,
        })
    }

    pub fn render(&mut self, world: &World, camera: &Camera) -> FrameStats {
        let ctx = RenderContext {
            config: &self.config,
            camera,
            world,
        };
        render_frame(&mut self.frame, &mut self.depth, &ctx)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Depth of the last frame, for overlays. Read-only.
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }
}
