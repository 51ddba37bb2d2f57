//! Turns a wall hit into a screen slab plus wall-local texture coordinates.

use std::f32::consts::PI;
use std::ops::Range;

use crate::config::RenderConfig;
use crate::raymarch::RayHit;

/// Cell face a hit point lies on, named by its direction from the cell centre
/// (+X east, +Y north).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallFace {
    East,
    North,
    South,
    West,
}

impl WallFace {
    /// Classifies the bearing (radians, as returned by `atan2`) from a cell
    /// centre to a point on it. `split` is the half-width of the east window;
    /// with `split = pi/4` the windows are `[-45, 45)`, `[45, 135)`,
    /// `[-135, -45)` and everything else.
    pub fn from_bearing(bearing: f32, split: f32) -> Self {
        let far = PI - split;
        if (-split..split).contains(&bearing) {
            WallFace::East
        } else if (split..far).contains(&bearing) {
            WallFace::North
        } else if (-far..-split).contains(&bearing) {
            WallFace::South
        } else {
            WallFace::West
        }
    }

    /// Face of the cell containing `point` that the point lies on.
    pub fn of_point(point: [f32; 2], split: f32) -> Self {
        let [x, y] = point;
        let cx = x.floor() + 0.5;
        let cy = y.floor() + 0.5;
        Self::from_bearing((y - cy).atan2(x - cx), split)
    }

    /// Horizontal texture coordinate: east/west faces run along Y,
    /// north/south faces along X.
    #[inline]
    pub fn texture_u(self, point: [f32; 2]) -> f32 {
        match self {
            WallFace::East | WallFace::West => fract(point[1]),
            WallFace::North | WallFace::South => fract(point[0]),
        }
    }
}

#[inline]
fn fract(v: f32) -> f32 {
    v - v.floor()
}

/// Vertical span of a wall column on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSlab {
    /// Distance the slab was projected at, after clamping to `near`.
    pub z: f32,
    /// Unclipped top edge; may lie above the screen for close walls.
    pub top: f32,
    /// Unclipped bottom edge.
    pub bottom: f32,
    /// First wall row, clipped to the screen.
    pub first_row: usize,
    /// One past the last wall row, clipped to the screen.
    pub end_row: usize,
}

impl WallSlab {
    pub fn project(distance: f32, config: &RenderConfig) -> Self {
        // max() also maps NaN to near
        let z = distance.max(config.near);
        let h = config.screen_height as f32;
        let mid = config.screen_mid();

        let top = mid - mid / z;
        let bottom = h - top;
        let row_top = top.floor();

        Self {
            z,
            top,
            bottom,
            first_row: row_top.clamp(0.0, h) as usize,
            end_row: (h - row_top).clamp(0.0, h) as usize,
        }
    }

    /// Zero-height slab on the horizon line, used when a ray hits nothing.
    pub fn empty(config: &RenderConfig) -> Self {
        let mid = config.screen_mid();
        let row = mid.floor() as usize;
        Self {
            z: config.horizon,
            top: mid,
            bottom: mid,
            first_row: row,
            end_row: row,
        }
    }

    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.first_row..self.end_row
    }

    /// Vertical texture coordinate for `row`, clamped to [0, 1].
    #[inline]
    pub fn texture_v(&self, row: usize) -> f32 {
        let span = self.bottom - self.top;
        if span <= 0.0 {
            return 0.0;
        }
        ((row as f32 - self.top) / span).clamp(0.0, 1.0)
    }
}

/// Everything the column shader needs to paint one wall column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallProjection {
    pub slab: WallSlab,
    pub face: WallFace,
    pub u: f32,
}

/// Projects a wall hit; `None` when the ray escaped.
pub fn project(hit: &RayHit, config: &RenderConfig) -> Option<WallProjection> {
    if !hit.hit_wall {
        return None;
    }
    let face = WallFace::of_point(hit.point, config.face_split);
    Some(WallProjection {
        slab: WallSlab::project(hit.distance, config),
        face,
        u: face.texture_u(hit.point),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn quadrant_windows() {
        let s = FRAC_PI_4;
        assert_eq!(WallFace::from_bearing(0.0, s), WallFace::East);
        assert_eq!(WallFace::from_bearing(-s, s), WallFace::East);
        assert_eq!(WallFace::from_bearing(s, s), WallFace::North);
        assert_eq!(WallFace::from_bearing(PI / 2.0, s), WallFace::North);
        assert_eq!(WallFace::from_bearing(PI - s, s), WallFace::West);
        assert_eq!(WallFace::from_bearing(PI, s), WallFace::West);
        assert_eq!(WallFace::from_bearing(-PI, s), WallFace::West);
        assert_eq!(WallFace::from_bearing(-(PI - s), s), WallFace::South);
        assert_eq!(WallFace::from_bearing(-PI / 2.0, s), WallFace::South);
        assert_eq!(WallFace::from_bearing(-s - 1e-6, s), WallFace::South);
        assert_eq!(WallFace::from_bearing(f32::NAN, s), WallFace::West);
    }

    #[test]
    fn face_of_point_picks_struck_side() {
        let s = FRAC_PI_4;
        // Cell (9, 3): entered from the west side
        assert_eq!(WallFace::of_point([9.005, 3.4], s), WallFace::West);
        // Cell (3, 9): entered from the south side
        assert_eq!(WallFace::of_point([3.4, 9.005], s), WallFace::South);
        assert_eq!(WallFace::of_point([3.4, 9.995], s), WallFace::North);
        assert_eq!(WallFace::of_point([3.995, 9.5], s), WallFace::East);
    }

    #[test]
    fn texture_u_uses_the_running_axis() {
        assert_relative_eq!(WallFace::West.texture_u([9.005, 3.25]), 0.25, epsilon = 1e-5);
        assert_relative_eq!(WallFace::South.texture_u([3.75, 9.005]), 0.75, epsilon = 1e-5);
    }

    #[test]
    fn slab_is_symmetric_about_horizon() {
        let config = RenderConfig::default();
        let slab = WallSlab::project(4.0, &config);
        // mid = 80, top = 80 - 20
        assert_relative_eq!(slab.top, 60.0);
        assert_relative_eq!(slab.bottom, 100.0);
        assert_eq!(slab.rows(), 60..100);
        assert_relative_eq!(slab.texture_v(60), 0.0);
        assert_relative_eq!(slab.texture_v(80), 0.5);
    }

    #[test]
    fn close_walls_are_clamped() {
        let config = RenderConfig::default();
        for z in [0.0, -3.0, 1e-9, f32::NAN] {
            let slab = WallSlab::project(z, &config);
            assert_eq!(slab.z, config.near);
            assert_eq!(slab.rows(), 0..config.screen_height);
            assert!(slab.texture_v(0) > 0.0);
            assert!(slab.texture_v(0) < 1.0);
        }
    }

    #[test]
    fn escaped_rays_do_not_project() {
        let config = RenderConfig::default();
        let miss = RayHit {
            distance: config.horizon,
            point: [0.0, 0.0],
            hit_wall: false,
        };
        assert!(project(&miss, &config).is_none());
        assert!(WallSlab::empty(&config).rows().is_empty());
    }
}
