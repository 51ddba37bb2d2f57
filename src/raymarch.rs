//! Fixed-step ray marching against the occupancy grid.
//!
//! This is a linear march, not an exact grid traversal: a hit is resolved to
//! within one `ray_step` of the true boundary crossing.

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::map::OccupancyMap;

/// A ray leaving the camera for one screen column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: [f32; 2],
    pub angle: f32,
}

impl Ray {
    pub fn for_column(camera: &Camera, column: usize, config: &RenderConfig) -> Self {
        Self {
            origin: camera.pos,
            angle: camera.ray_angle(column, config.screen_width, config.fov),
        }
    }

    #[inline]
    pub fn direction(&self) -> [f32; 2] {
        [self.angle.sin(), self.angle.cos()]
    }
}

/// Outcome of marching one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance travelled; the horizon distance on a miss.
    pub distance: f32,
    /// Last test point: inside the struck wall cell on a hit.
    pub point: [f32; 2],
    pub hit_wall: bool,
}

impl RayHit {
    fn miss(horizon: f32, point: [f32; 2]) -> Self {
        Self {
            distance: horizon,
            point,
            hit_wall: false,
        }
    }
}

/// Steps `ray` outward from `config.near` until it enters a wall, leaves the
/// map, or reaches `config.horizon`. No sample is taken past the horizon.
pub fn march(ray: &Ray, map: &OccupancyMap, config: &RenderConfig) -> RayHit {
    let [dx, dy] = ray.direction();
    let [ox, oy] = ray.origin;

    let mut z = config.near;
    let mut point = ray.origin;
    loop {
        z += config.ray_step;
        if z > config.horizon {
            break;
        }
        point = [ox + dx * z, oy + dy * z];

        if !map.contains(point[0], point[1]) {
            return RayHit::miss(config.horizon, point);
        }
        if map.is_wall_at(point[0], point[1]) {
            return RayHit {
                distance: z,
                point,
                hit_wall: true,
            };
        }
    }

    RayHit::miss(config.horizon, point)
}

/// Marches the ray for screen column `column`.
pub fn cast_column(
    camera: &Camera,
    column: usize,
    map: &OccupancyMap,
    config: &RenderConfig,
) -> RayHit {
    march(&Ray::for_column(camera, column, config), map, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn config() -> RenderConfig {
        RenderConfig {
            screen_width: 64,
            screen_height: 32,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn hits_far_wall_along_heading() {
        let map = OccupancyMap::bordered(10, 10).unwrap();
        let cam = Camera::new(3.0, 3.0, 0.0);
        let cfg = config();
        let hit = cast_column(&cam, cfg.screen_width / 2, &map, &cfg);

        assert!(hit.hit_wall);
        // Wall row 9 starts at y = 9, six units ahead
        assert!((hit.distance - 6.0).abs() <= cfg.ray_step + 1e-3, "{hit:?}");
        assert!(hit.point[1] >= 9.0);
        assert_eq!(hit.point[0].floor(), 3.0);
    }

    #[test]
    fn hits_east_wall_when_turned_right() {
        let map = OccupancyMap::bordered(10, 10).unwrap();
        let cam = Camera::new(3.0, 3.0, FRAC_PI_2);
        let cfg = config();
        let hit = cast_column(&cam, cfg.screen_width / 2, &map, &cfg);
        assert!(hit.hit_wall);
        assert!((hit.distance - 6.0).abs() <= cfg.ray_step + 1e-3);
        assert!(hit.point[0] >= 9.0);
    }

    #[test]
    fn leaving_the_map_is_a_miss_at_horizon() {
        // No walls at all: the ray escapes through the map edge
        let map = OccupancyMap::from_rows(&["....", "....", "...."]).unwrap();
        let cam = Camera::new(1.5, 1.5, 0.0);
        let cfg = config();
        let hit = cast_column(&cam, cfg.screen_width / 2, &map, &cfg);
        assert!(!hit.hit_wall);
        assert_eq!(hit.distance, cfg.horizon);
    }

    #[test]
    fn reaching_horizon_is_a_miss() {
        let map = OccupancyMap::bordered(64, 64).unwrap();
        let cam = Camera::new(2.0, 2.0, 0.0);
        let cfg = RenderConfig {
            horizon: 5.0,
            ..config()
        };
        let hit = cast_column(&cam, cfg.screen_width / 2, &map, &cfg);
        assert!(!hit.hit_wall);
        assert_eq!(hit.distance, 5.0);
    }

    #[test]
    fn wall_just_past_horizon_is_a_miss() {
        // Wall row starts at y = 22, 20.2 ahead and beyond the horizon
        let map = OccupancyMap::bordered(10, 23).unwrap();
        let cam = Camera::new(5.0, 1.8, 0.0);
        let cfg = RenderConfig {
            horizon: 19.7,
            ..config()
        };
        let hit = cast_column(&cam, cfg.screen_width / 2, &map, &cfg);
        assert!(!hit.hit_wall, "{hit:?}");
        assert_eq!(hit.distance, cfg.horizon);
    }

    #[test]
    fn hits_never_lie_beyond_horizon() {
        let map = OccupancyMap::bordered(10, 23).unwrap();
        let cfg = RenderConfig {
            horizon: 19.7,
            ..config()
        };
        // Walls from just inside to just past one step beyond the horizon
        for i in 0..40 {
            let cam = Camera::new(5.0, 2.28 + i as f32 * 0.001, 0.0);
            let hit = cast_column(&cam, cfg.screen_width / 2, &map, &cfg);
            assert!(hit.distance <= cfg.horizon, "{i}: {hit:?}");
        }
    }

    #[test]
    fn marching_is_deterministic() {
        let map = OccupancyMap::bordered(10, 10).unwrap();
        let cam = Camera::new(4.2, 5.7, 2.3);
        let cfg = config();
        for column in 0..cfg.screen_width {
            assert_eq!(
                cast_column(&cam, column, &map, &cfg),
                cast_column(&cam, column, &map, &cfg)
            );
        }
    }

    #[test]
    fn first_sample_is_one_step_past_near() {
        // Wall cell starts 0.25 ahead, already inside the near offset
        let map = OccupancyMap::from_rows(&["...", "...", ".#.", "...", "...", "###"]).unwrap();
        let cam = Camera::new(1.5, 1.75, 0.0);
        let cfg = config();
        let hit = cast_column(&cam, cfg.screen_width / 2, &map, &cfg);
        assert!(hit.hit_wall);
        assert!((hit.distance - (cfg.near + cfg.ray_step)).abs() < 1e-5);
    }
}
