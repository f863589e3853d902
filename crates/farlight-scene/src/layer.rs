//! Foreground content drawn over the starfield.

use farlight_render::{ProbeCamera, RotateDirection, StarCamera};
use glam::DVec3;
use image::{Rgba, RgbaImage};

/// Something drawn over the starfield after it has been developed.
///
/// Layers work in the probe's local tier: `local` is the probe's
/// millimeter offset inside its current system, and `camera` is already
/// positioned there.
pub trait ForegroundLayer: Send + Sync {
    fn draw(&self, camera: &ProbeCamera, local: DVec3, frame: &mut RgbaImage);
}

/// A solid screen-space disc at a fixed local-tier point.
///
/// Useful as a navigation marker or a stand-in for a nearby body.
#[derive(Debug, Clone, PartialEq)]
pub struct Beacon {
    /// Local-tier position in millimeters.
    pub position: DVec3,
    /// Disc radius in pixels.
    pub radius: u32,
    pub color: Rgba<u8>,
}

impl Beacon {
    pub fn new(position: DVec3, radius: u32, color: Rgba<u8>) -> Self {
        Self {
            position,
            radius,
            color,
        }
    }

    /// Pixel the beacon's centre projects to, or `None` if it is behind the camera.
    pub fn screen_position(
        &self,
        camera: &ProbeCamera,
        local: DVec3,
        width: u32,
        height: u32,
    ) -> Option<(i64, i64)> {
        let cam = camera.rotate_direction(self.position - local);
        if cam.z <= 0.0 {
            return None;
        }
        let screen = camera.project_to_screen(cam, width, height);
        if !screen.is_finite() {
            return None;
        }
        Some((screen.x.floor() as i64, screen.y.floor() as i64))
    }
}

impl ForegroundLayer for Beacon {
    fn draw(&self, camera: &ProbeCamera, local: DVec3, frame: &mut RgbaImage) {
        let (width, height) = frame.dimensions();
        let Some((cx, cy)) = self.screen_position(camera, local, width, height) else {
            return;
        };

        let r = self.radius as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                    continue;
                }
                frame.put_pixel(x as u32, y as u32, self.color);
            }
        }
    }
}
