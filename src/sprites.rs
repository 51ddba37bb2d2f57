//! Billboard sprites composited over the walls with the per-column depth test.
//!
//! Sampling each object into screen space is independent work and runs on the
//! rayon pool. Compositing is a single serial pass in object list order, so an
//! object later in the list wins a depth tie.

use rayon::prelude::*;

use crate::camera::{Camera, wrap_pi};
use crate::color::Color;
use crate::config::RenderConfig;
use crate::depth::DepthBuffer;
use crate::framebuffer::PixelSink;
use crate::texture::Sampler;

/// Index into the sprite image table of a [`crate::world::World`].
pub type SpriteId = usize;

/// A static object drawn as a camera-facing billboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldObject {
    pub pos: [f32; 2],
    pub sprite: SpriteId,
    /// Owned by gameplay; dead objects are not drawn.
    pub alive: bool,
}

impl WorldObject {
    pub fn new(x: f32, y: f32, sprite: SpriteId) -> Self {
        Self {
            pos: [x, y],
            sprite,
            alive: true,
        }
    }
}

/// Screen-space rectangle an object projects to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Billboard {
    pub z: f32,
    /// Signed angle from the view direction, in (-pi, pi]; positive is right.
    pub bearing: f32,
    pub top: f32,
    pub height: f32,
    pub width: f32,
    /// Column the billboard is centred on.
    pub center: f32,
}

impl Billboard {
    /// Projects an object at `pos`, or `None` when it falls outside the field
    /// of view or the `[sprite_near_clip, horizon)` range. `aspect` is the
    /// image height over width.
    pub fn project(
        pos: [f32; 2],
        aspect: f32,
        camera: &Camera,
        config: &RenderConfig,
    ) -> Option<Self> {
        let [eye_x, eye_y] = camera.forward();
        let ox = pos[0] - camera.pos[0];
        let oy = pos[1] - camera.pos[1];
        let z = (ox * ox + oy * oy).sqrt();

        let bearing = wrap_pi(eye_y.atan2(eye_x) - oy.atan2(ox));
        let half_fov = config.half_fov();
        // Written so NaN fails every test
        let in_view = bearing.abs() <= half_fov;
        let in_range = z >= config.sprite_near_clip && z < config.horizon;
        let valid_aspect = aspect.is_finite() && aspect > 0.0;
        if !in_view || !in_range || !valid_aspect {
            return None;
        }

        let h = config.screen_height as f32;
        let top = config.screen_mid() - h / z;
        let bottom = h - top;
        let height = bottom - top;

        Some(Self {
            z,
            bearing,
            top,
            height,
            width: height / aspect,
            center: (0.5 * (bearing / half_fov) + 0.5) * config.screen_width as f32,
        })
    }
}

/// Opaque texels of one object, already placed on screen.
#[derive(Clone, Debug, Default)]
pub struct Footprint {
    pub z: f32,
    pub texels: Vec<(usize, usize, Color)>,
}

/// Samples the image over the billboard rectangle, keeping texels that land
/// on screen and have non-zero alpha.
pub fn sample_billboard<S: Sampler + ?Sized>(
    billboard: &Billboard,
    image: &S,
    config: &RenderConfig,
) -> Footprint {
    let screen_w = config.screen_width as f32;
    let screen_h = config.screen_height as f32;
    let left = billboard.center - 0.5 * billboard.width;

    let cols = billboard.width.max(0.0).ceil() as usize;
    let rows = billboard.height.max(0.0).ceil() as usize;
    let mut texels = Vec::new();

    for lx in 0..cols {
        let col = left + lx as f32;
        if col < 0.0 || col >= screen_w {
            continue;
        }
        let u = lx as f32 / billboard.width;
        for ly in 0..rows {
            let row = billboard.top + ly as f32;
            if row < 0.0 || row >= screen_h {
                continue;
            }
            let color = image.sample(u, ly as f32 / billboard.height);
            if !color.is_transparent() {
                texels.push((col as usize, row as usize, color));
            }
        }
    }

    Footprint {
        z: billboard.z,
        texels,
    }
}

/// Depth-tests and writes one footprint. Returns the number of pixels painted.
pub fn composite<P: PixelSink + ?Sized>(
    footprint: &Footprint,
    sink: &mut P,
    depth: &mut DepthBuffer,
) -> usize {
    let mut painted = 0;
    for &(col, row, color) in &footprint.texels {
        if depth.write_nearer(col, footprint.z) {
            sink.set_pixel(col, row, color);
            painted += 1;
        }
    }
    painted
}

/// Draws every live object over the already shaded walls.
///
/// Returns the total number of pixels painted.
pub fn render_sprites<S, P>(
    objects: &[WorldObject],
    images: &[S],
    camera: &Camera,
    config: &RenderConfig,
    sink: &mut P,
    depth: &mut DepthBuffer,
) -> usize
where
    S: Sampler,
    P: PixelSink + ?Sized,
{
    let footprints: Vec<Option<Footprint>> = objects
        .par_iter()
        .map(|object| {
            if !object.alive {
                return None;
            }
            let image = images.get(object.sprite)?;
            let billboard = Billboard::project(object.pos, image.aspect_ratio(), camera, config)?;
            Some(sample_billboard(&billboard, image, config))
        })
        .collect();

    footprints
        .iter()
        .flatten()
        .map(|footprint| composite(footprint, sink, depth))
        .sum()
}
