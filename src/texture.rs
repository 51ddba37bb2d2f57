//! CPU-side images sampled by normalized coordinates.

use std::path::Path;

use crate::color::Color;
use crate::error::{SetupError, SetupResult};

/// Image collaborator: anything that can be sampled at normalized (u, v).
pub trait Sampler: Sync {
    /// `u`, `v` are clamped to [0, 1]; (0, 0) is the top-left texel.
    fn sample(&self, u: f32, v: f32) -> Color;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Height over width.
    #[inline]
    fn aspect_ratio(&self) -> f32 {
        self.height() as f32 / self.width() as f32
    }
}

/// Decoded RGBA image kept in memory for sampling.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Color>,
}

impl Texture {
    /// Builds a texture from raw RGBA8 bytes.
    pub fn from_rgba(width: u32, height: u32, data: &[u8]) -> SetupResult<Self> {
        if width == 0 || height == 0 {
            return Err(SetupError::InvalidTexture(format!(
                "texture must not be empty, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(SetupError::InvalidTexture(format!(
                "expected {expected} bytes for {width}x{height} RGBA, got {}",
                data.len()
            )));
        }
        let texels = data
            .chunks_exact(4)
            .map(|px| Color::new(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Loads and decodes an image file, converting it to RGBA8.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SetupResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading texture from {:?}", path);

        let img = image::open(path).map_err(|source| SetupError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        log::info!("Loaded texture {}x{} from {:?}", width, height, path);
        Self::from_rgba(width, height, rgba.as_raw())
    }

    /// Builds a texture by evaluating `f(x, y)` for every texel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Color) -> SetupResult<Self> {
        if width == 0 || height == 0 {
            return Err(SetupError::InvalidTexture(format!(
                "texture must not be empty, got {width}x{height}"
            )));
        }
        Ok(Self::generate(width, height, f))
    }

    fn generate(width: u32, height: u32, f: impl Fn(u32, u32) -> Color) -> Self {
        let texels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            texels,
        }
    }

    pub fn solid(width: u32, height: u32, color: Color) -> SetupResult<Self> {
        Self::from_fn(width, height, |_, _| color)
    }

    /// Procedural brick pattern used when no wall image is supplied.
    pub fn bricks() -> Self {
        const W: u32 = 32;
        const H: u32 = 32;
        let brick = Color::rgb(150, 64, 40);
        let mortar = Color::rgb(190, 190, 180);
        Self::generate(W, H, |x, y| {
            let course = y / 8;
            let offset = if course % 2 == 0 { 0 } else { 8 };
            let mortar_row = y % 8 == 7;
            let mortar_col = (x + offset) % 16 == 15;
            if mortar_row || mortar_col {
                mortar
            } else {
                // Slight per-brick variation
                let shade = 0.85 + 0.15 * (((x + offset) / 16 + course) % 2) as f32;
                brick.fade(shade)
            }
        })
    }

    /// Procedural lamp post with a transparent background.
    pub fn lamp_post() -> Self {
        const W: u32 = 16;
        const H: u32 = 64;
        let pole = Color::rgb(60, 60, 70);
        let glass = Color::rgb(255, 230, 140);
        Self::generate(W, H, |x, y| {
            let in_head = y < 12 && (3..13).contains(&x);
            let in_cap = y < 2 && (2..14).contains(&x);
            let in_pole = (7..9).contains(&x);
            let in_base = y >= 60 && (4..12).contains(&x);
            if in_cap || in_base {
                pole
            } else if in_head {
                glass
            } else if in_pole {
                pole
            } else {
                Color::TRANSPARENT
            }
        })
    }
}

impl Sampler for Texture {
    #[inline]
    fn sample(&self, u: f32, v: f32) -> Color {
        // NaN clamps to 0 through max()
        let u = u.max(0.0).min(1.0);
        let v = v.max(0.0).min(1.0);
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.texels[(y * self.width + x) as usize]
    }

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }
}
