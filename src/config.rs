//! Renderer constants, fixed once the renderer is built.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{SetupError, SetupResult};

/// Upper bound on march steps per ray, `(horizon - near) / ray_step`.
pub const MAX_MARCH_STEPS: f32 = 1e6;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Frame width in columns.
    pub screen_width: usize,
    /// Frame height in rows.
    pub screen_height: usize,
    /// Total horizontal field of view, radians.
    pub fov: f32,
    /// Distance a ray advances per march step.
    pub ray_step: f32,
    /// Distance at which a ray gives up and reports open space.
    pub horizon: f32,
    /// Ray start offset; also the minimum distance a wall is projected at.
    pub near: f32,
    /// Sprites nearer than this are not drawn.
    pub sprite_near_clip: f32,
    /// Wall brightness is `wall_falloff / z`, clamped to [0, 1].
    pub wall_falloff: f32,
    /// Half-width of the angular window that selects a cell face.
    pub face_split: f32,
    pub ceiling_color: Color,
    pub floor_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            screen_width: 320,
            screen_height: 160,
            fov: FRAC_PI_2,
            ray_step: 0.01,
            horizon: 20.0,
            near: 0.5,
            sprite_near_clip: 0.5,
            wall_falloff: 1.5,
            face_split: FRAC_PI_4,
            ceiling_color: Color::BLACK,
            floor_color: Color::RED,
        }
    }
}

impl RenderConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SetupResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents).map_err(|source| SetupError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("Loaded render config from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Checks every constant the per-frame path relies on.
    pub fn validate(&self) -> SetupResult<()> {
        let fail = |msg: String| Err(SetupError::InvalidConfig(msg));

        if self.screen_width == 0 || self.screen_height == 0 {
            return fail(format!(
                "screen must be non-empty, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        let floats = [
            ("fov", self.fov),
            ("ray_step", self.ray_step),
            ("horizon", self.horizon),
            ("near", self.near),
            ("sprite_near_clip", self.sprite_near_clip),
            ("wall_falloff", self.wall_falloff),
            ("face_split", self.face_split),
        ];
        if let Some((name, v)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return fail(format!("{name} must be finite, got {v}"));
        }
        if self.fov <= 0.0 || self.fov >= PI {
            return fail(format!("fov must be in (0, pi), got {}", self.fov));
        }
        if self.ray_step <= 0.0 {
            return fail(format!("ray_step must be positive, got {}", self.ray_step));
        }
        if self.near <= 0.0 {
            return fail(format!("near must be positive, got {}", self.near));
        }
        if self.horizon <= self.near {
            return fail(format!(
                "horizon ({}) must be beyond near ({})",
                self.horizon, self.near
            ));
        }
        // A step lost to rounding would never reach the horizon
        if self.near + self.ray_step <= self.near || self.horizon + self.ray_step <= self.horizon {
            return fail(format!(
                "ray_step {} is too small to advance between {} and {}",
                self.ray_step, self.near, self.horizon
            ));
        }
        let steps = (self.horizon - self.near) / self.ray_step;
        if steps > MAX_MARCH_STEPS {
            return fail(format!(
                "ray_step {} needs {steps:.0} steps per ray, at most {MAX_MARCH_STEPS} allowed",
                self.ray_step
            ));
        }
        if self.sprite_near_clip <= 0.0 {
            return fail(format!(
                "sprite_near_clip must be positive, got {}",
                self.sprite_near_clip
            ));
        }
        if self.wall_falloff < 0.0 {
            return fail(format!(
                "wall_falloff must not be negative, got {}",
                self.wall_falloff
            ));
        }
        if self.face_split <= 0.0 || self.face_split >= FRAC_PI_2 {
            return fail(format!(
                "face_split must be in (0, pi/2), got {}",
                self.face_split
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn half_fov(&self) -> f32 {
        0.5 * self.fov
    }

    /// Row of the horizon line.
    #[inline]
    pub fn screen_mid(&self) -> f32 {
        0.5 * self.screen_height as f32
    }
}
