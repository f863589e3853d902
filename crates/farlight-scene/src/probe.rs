use farlight_coords::GalacticPosition;
use farlight_render::ProbeCamera;
use glam::DVec3;

/// A spacecraft with a tracked position and an onboard camera.
///
/// The camera lives in the probe's local tier: its position is the probe's
/// local offset in millimeters, while the starfield is photographed from
/// [`GalacticPosition::to_galaxy_space`].
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub id: String,
    position: GalacticPosition,
    pub camera: ProbeCamera,
}

impl Probe {
    /// A probe at `position` with its camera looking down world +Z.
    pub fn new(id: impl Into<String>, position: GalacticPosition) -> Self {
        let camera = ProbeCamera::new(position.local());
        Self {
            id: id.into(),
            position,
            camera,
        }
    }

    pub fn with_camera(mut self, camera: ProbeCamera) -> Self {
        self.camera = camera;
        self.camera.position = self.position.local();
        self
    }

    pub fn position(&self) -> &GalacticPosition {
        &self.position
    }

    /// Re-centre the camera on the probe and aim it at a local-tier `target` with world up +Y.
    ///
    /// Field of view is kept.
    pub fn point_camera(&mut self, target: DVec3) {
        self.camera = ProbeCamera::new(self.position.local()).with_fov_y(self.camera.fov_y);
        self.camera.look_at(target, DVec3::Y);
    }

    /// Move the probe by `delta` millimeters. The camera follows and keeps its orientation.
    pub fn translate(&mut self, delta: DVec3) {
        self.position.translate(delta);
        self.camera.position = self.position.local();
        log::trace!("Probe {} moved to {}", self.id, self.position);
    }
}
