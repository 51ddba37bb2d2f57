use crate::color::Color;

/// Pixel collaborator: a fixed-size screen addressed by column and row.
pub trait PixelSink {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Out-of-range writes are ignored.
    fn set_pixel(&mut self, col: usize, row: usize, color: Color);
}

/// Low-resolution frame in packed 0RGB, row-major.
pub struct FrameBuffer {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn pixel(&self, col: usize, row: usize) -> Option<Color> {
        if col < self.width && row < self.height {
            Some(Color::from_u32(self.pixels[row * self.width + col]))
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

impl PixelSink for FrameBuffer {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, col: usize, row: usize, color: Color) {
        if col < self.width && row < self.height {
            self.pixels[row * self.width + col] = color.to_u32();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_reads_back() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.set_pixel(3, 2, Color::rgb(1, 2, 3));
        assert_eq!(fb.pixel(3, 2), Some(Color::rgb(1, 2, 3)));
        assert_eq!(fb.pixels()[2 * 4 + 3], 0x0001_0203);
        assert_eq!(fb.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn ignores_out_of_range() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(2, 0, Color::WHITE);
        fb.set_pixel(0, 2, Color::WHITE);
        assert!(fb.pixels().iter().all(|&p| p == 0));
        assert_eq!(fb.pixel(2, 0), None);
    }
}
