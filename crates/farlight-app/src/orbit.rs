//! Circular fly-around in the probe's local tier.

use std::f64::consts::TAU;

use glam::DVec3;

/// How far ahead along the tangent the camera aims, in millimeters.
const LOOK_AHEAD: f64 = 100.0;
/// How far below the flight height the camera aims, in millimeters.
const LOOK_DIP: f64 = 20.0;

/// A flight around a horizontal circle centred on the local origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub frames: u32,
    pub radius: f64,
    pub height: f64,
}

impl Orbit {
    /// Camera position and look-at target for `frame`.
    ///
    /// The camera looks along the direction of travel, slightly downward.
    pub fn pose(&self, frame: u32) -> (DVec3, DVec3) {
        let theta = frame as f64 / self.frames.max(1) as f64 * TAU;
        let (sin, cos) = theta.sin_cos();

        let eye = DVec3::new(cos * self.radius, self.height, sin * self.radius);
        let tangent = DVec3::new(-sin, 0.0, cos);
        let target = DVec3::new(
            eye.x + tangent.x * LOOK_AHEAD,
            self.height - LOOK_DIP,
            eye.z + tangent.z * LOOK_AHEAD,
        );
        (eye, target)
    }
}
