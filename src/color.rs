use serde::{Deserialize, Serialize};

/// RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREY50: Color = Color::rgb(127, 127, 127);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Scales the color channels by `k` clamped to [0, 1]. Alpha is kept.
    #[inline]
    pub fn fade(self, k: f32) -> Self {
        // NaN clamps to 0 through max()
        let k = k.max(0.0).min(1.0);
        let mul = |v: u8| (v as f32 * k) as u8;
        Self::new(mul(self.r), mul(self.g), mul(self.b), self.a)
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Packs into the 0RGB layout the presentation surface expects.
    #[inline]
    pub fn to_u32(self) -> u32 {
        // BGRA8 in little-endian memory, alpha at 0
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }

    #[inline]
    pub fn from_u32(px: u32) -> Self {
        Self::rgb((px >> 16) as u8, (px >> 8) as u8, px as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_clamps_factor() {
        let c = Color::rgb(200, 100, 50);
        assert_eq!(c.fade(2.0), c);
        assert_eq!(c.fade(-1.0), Color::rgb(0, 0, 0));
        assert_eq!(c.fade(f32::NAN), Color::rgb(0, 0, 0));
        assert_eq!(c.fade(0.5), Color::rgb(100, 50, 25));
    }

    #[test]
    fn fade_keeps_alpha() {
        assert_eq!(Color::new(10, 10, 10, 77).fade(0.0).a, 77);
    }

    #[test]
    fn packs_rgb_channels() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0x0012_3456);
        assert_eq!(Color::from_u32(c.to_u32()), c);
    }
}
