use crate::color::Color;
use crate::config::RenderConfig;
use crate::depth::DepthBuffer;
use crate::framebuffer::PixelSink;
use crate::projector::{self, WallSlab};
use crate::raymarch::RayHit;
use crate::texture::Sampler;

/// Paints a full screen column: flat ceiling, textured wall, shaded floor.
pub struct ColumnShader<'a, S: Sampler + ?Sized> {
    config: &'a RenderConfig,
    wall: &'a S,
}

impl<'a, S: Sampler + ?Sized> ColumnShader<'a, S> {
    pub fn new(config: &'a RenderConfig, wall: &'a S) -> Self {
        Self { config, wall }
    }

    /// Paints `column` for `hit` and records the wall distance in `depth`.
    /// An escaped ray leaves the depth entry untouched.
    pub fn shade<P: PixelSink + ?Sized>(
        &self,
        sink: &mut P,
        depth: &mut DepthBuffer,
        column: usize,
        hit: &RayHit,
    ) {
        let height = self.config.screen_height;
        let projection = projector::project(hit, self.config);
        let slab = projection
            .map(|p| p.slab)
            .unwrap_or_else(|| WallSlab::empty(self.config));

        for row in 0..slab.first_row {
            sink.set_pixel(column, row, self.config.ceiling_color);
        }

        if let Some(p) = projection {
            let brightness = self.config.wall_falloff / p.slab.z;
            for row in p.slab.rows() {
                let texel = self.wall.sample(p.u, p.slab.texture_v(row));
                sink.set_pixel(column, row, texel.fade(brightness));
            }
            depth.write_nearer(column, p.slab.z);
        }

        for row in slab.end_row..height {
            sink.set_pixel(column, row, self.floor_color(row));
        }
    }

    /// Floor tint, brightening linearly from the horizon line to the bottom row.
    #[inline]
    fn floor_color(&self, row: usize) -> Color {
        let h = self.config.screen_height as f32;
        let mid = self.config.screen_mid();
        self.config.floor_color.fade(1.0 - (h - row as f32) / mid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::texture::Texture;

    fn setup() -> (RenderConfig, Texture, FrameBuffer, DepthBuffer) {
        let config = RenderConfig {
            screen_width: 4,
            screen_height: 40,
            ..RenderConfig::default()
        };
        let wall = Texture::solid(4, 4, Color::rgb(200, 200, 200)).unwrap();
        let fb = FrameBuffer::new(config.screen_width, config.screen_height);
        let depth = DepthBuffer::new(config.screen_width);
        (config, wall, fb, depth)
    }

    #[test]
    fn paints_three_bands_and_writes_depth() {
        let (config, wall, mut fb, mut depth) = setup();
        let hit = RayHit {
            distance: 2.0,
            point: [3.4, 9.005],
            hit_wall: true,
        };
        ColumnShader::new(&config, &wall).shade(&mut fb, &mut depth, 1, &hit);

        // mid = 20, top = 10, bottom = 30
        assert_eq!(fb.pixel(1, 0), Some(config.ceiling_color));
        assert_eq!(fb.pixel(1, 9), Some(config.ceiling_color));
        // Faded by 1.5 / 2
        assert_eq!(fb.pixel(1, 10), Some(Color::rgb(150, 150, 150)));
        assert_eq!(fb.pixel(1, 29), Some(Color::rgb(150, 150, 150)));
        // Floor brightens towards the bottom
        let near_horizon = fb.pixel(1, 30).unwrap();
        let bottom = fb.pixel(1, 39).unwrap();
        assert!(bottom.r > near_horizon.r);
        assert_eq!(depth.get(1), 2.0);
        assert_eq!(depth.get(0), f32::INFINITY);
    }

    #[test]
    fn escaped_ray_paints_only_ceiling_and_floor() {
        let (config, wall, mut fb, mut depth) = setup();
        let miss = RayHit {
            distance: config.horizon,
            point: [0.0, 0.0],
            hit_wall: false,
        };
        ColumnShader::new(&config, &wall).shade(&mut fb, &mut depth, 2, &miss);

        assert_eq!(fb.pixel(2, 19), Some(config.ceiling_color));
        // Row 20 sits on the horizon: floor at zero brightness
        assert_eq!(fb.pixel(2, 20), Some(Color::BLACK));
        assert_eq!(fb.pixel(2, 39).unwrap().r, 242);
        assert_eq!(depth.get(2), f32::INFINITY);
    }

    #[test]
    fn near_walls_fill_the_column_at_full_brightness() {
        let (config, wall, mut fb, mut depth) = setup();
        let hit = RayHit {
            distance: 0.51,
            point: [3.4, 9.005],
            hit_wall: true,
        };
        ColumnShader::new(&config, &wall).shade(&mut fb, &mut depth, 0, &hit);
        for row in 0..config.screen_height {
            assert_eq!(fb.pixel(0, row), Some(Color::rgb(200, 200, 200)));
        }
        assert_eq!(depth.get(0), 0.51);
    }
}
