use std::f32::consts::TAU;

/// Viewer pose in map units.
///
/// Heading 0 looks along +Y; heading increases clockwise when viewed with +Y
/// up, so the forward vector is `(sin h, cos h)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: [f32; 2], // (x, y) position, continuous
    heading: f32,      // radians, kept in [0, 2pi)
}

impl Camera {
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            pos: [x, y],
            heading: normalize_heading(heading),
        }
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn set_heading(&mut self, heading: f32) {
        self.heading = normalize_heading(heading);
    }

    /// Rotates by `delta` radians; positive turns right.
    pub fn turn(&mut self, delta: f32) {
        self.set_heading(self.heading + delta);
    }

    #[inline]
    pub fn forward(&self) -> [f32; 2] {
        [self.heading.sin(), self.heading.cos()]
    }

    #[inline]
    pub fn right(&self) -> [f32; 2] {
        [self.heading.cos(), -self.heading.sin()]
    }

    /// Ray angle for screen column `column` of `width`, spanning `fov`
    /// symmetrically around the heading.
    #[inline]
    pub fn ray_angle(&self, column: usize, width: usize, fov: f32) -> f32 {
        self.heading + (column as f32 / width as f32) * fov - 0.5 * fov
    }
}

/// Wraps an angle into [0, 2pi). Non-finite input maps to 0.
#[inline]
pub fn normalize_heading(a: f32) -> f32 {
    if !a.is_finite() {
        return 0.0;
    }
    let h = a.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if h >= TAU { 0.0 } else { h }
}

/// Wraps an angle into (-pi, pi].
#[inline]
pub fn wrap_pi(a: f32) -> f32 {
    use std::f32::consts::PI;
    let mut d = a.rem_euclid(TAU);
    if d > PI {
        d -= TAU;
    }
    d
}
