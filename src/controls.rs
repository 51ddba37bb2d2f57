//! Maps directional input to camera motion, with grid collision.
//!
//! This is gameplay logic: the renderer never moves the camera itself.

use crate::camera::Camera;
use crate::map::OccupancyMap;

/// Raw directional input sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFlags {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl InputFlags {
    fn axis(pos: bool, neg: bool) -> f32 {
        match (pos, neg) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Idle,
    Moved,
    /// The destination cell is a wall; the position was left unchanged.
    Blocked,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Controls {
    pub move_speed: f32, // map units per second
    pub turn_speed: f32, // radians per second
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            turn_speed: std::f32::consts::PI,
        }
    }
}

impl Controls {
    /// Applies one frame of input. Turning always applies; a translation is
    /// committed only if it ends in an empty cell.
    pub fn apply(
        &self,
        camera: &mut Camera,
        map: &OccupancyMap,
        input: InputFlags,
        dt: f32,
    ) -> MoveOutcome {
        let turn = InputFlags::axis(input.turn_right, input.turn_left);
        if turn != 0.0 {
            camera.turn(turn * self.turn_speed * dt);
        }

        let mut fwd = InputFlags::axis(input.forward, input.back);
        let mut strafe = InputFlags::axis(input.strafe_right, input.strafe_left);
        if fwd == 0.0 && strafe == 0.0 {
            return MoveOutcome::Idle;
        }

        // Normalize diagonal speed
        let inv = 1.0 / (fwd * fwd + strafe * strafe).sqrt();
        fwd *= inv;
        strafe *= inv;

        let f = camera.forward();
        let r = camera.right();
        let step = self.move_speed * dt;
        let nx = (camera.pos[0] + (f[0] * fwd + r[0] * strafe) * step)
            .clamp(0.0, map.width() as f32);
        let ny = (camera.pos[1] + (f[1] * fwd + r[1] * strafe) * step)
            .clamp(0.0, map.height() as f32);

        if map.is_wall_at(nx, ny) {
            log::debug!("BUMP! blocked moving to ({:.2}, {:.2})", nx, ny);
            return MoveOutcome::Blocked;
        }
        camera.pos = [nx, ny];
        MoveOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn room() -> OccupancyMap {
        OccupancyMap::bordered(10, 10).unwrap()
    }

    #[test]
    fn walks_forward_along_heading() {
        let mut cam = Camera::new(3.0, 3.0, 0.0);
        let input = InputFlags {
            forward: true,
            ..Default::default()
        };
        let outcome = Controls::default().apply(&mut cam, &room(), input, 0.5);
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_relative_eq!(cam.pos[1], 4.5);
        assert_relative_eq!(cam.pos[0], 3.0);
    }

    #[test]
    fn strafes_right() {
        let mut cam = Camera::new(3.0, 3.0, 0.0);
        let input = InputFlags {
            strafe_right: true,
            ..Default::default()
        };
        Controls::default().apply(&mut cam, &room(), input, 0.5);
        assert_relative_eq!(cam.pos[0], 4.5);
    }

    #[test]
    fn walls_block_movement() {
        let mut cam = Camera::new(1.5, 1.5, std::f32::consts::PI);
        let input = InputFlags {
            forward: true,
            ..Default::default()
        };
        let outcome = Controls::default().apply(&mut cam, &room(), input, 0.5);
        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(cam.pos, [1.5, 1.5]);
    }

    #[test]
    fn turning_keeps_heading_normalized() {
        let mut cam = Camera::new(3.0, 3.0, 0.0);
        let input = InputFlags {
            turn_left: true,
            ..Default::default()
        };
        let outcome = Controls::default().apply(&mut cam, &room(), input, 0.25);
        assert_eq!(outcome, MoveOutcome::Idle);
        assert_relative_eq!(cam.heading(), 1.75 * std::f32::consts::PI, epsilon = 1e-5);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut cam = Camera::new(3.0, 3.0, 0.0);
        let input = InputFlags {
            forward: true,
            back: true,
            ..Default::default()
        };
        assert_eq!(
            Controls::default().apply(&mut cam, &room(), input, 1.0),
            MoveOutcome::Idle
        );
    }
}
