use farlight_galaxy::Galaxy;
use farlight_render::{SnapshotParams, SnapshotRenderer};
use glam::I64Vec3;
use image::RgbaImage;
use rand::Rng;

use crate::error::SceneError;
use crate::layer::ForegroundLayer;
use crate::probe::Probe;

/// Foreground content anchored to one star system.
///
/// Taking a picture renders the starfield from the probe's galaxy-space
/// position, then draws every layer over it in insertion order, so later
/// layers cover earlier ones.
pub struct LocalScene {
    sector: I64Vec3,
    system: I64Vec3,
    layers: Vec<Box<dyn ForegroundLayer>>,
}

impl LocalScene {
    pub fn new(sector: I64Vec3, system: I64Vec3) -> Self {
        Self {
            sector,
            system,
            layers: Vec::new(),
        }
    }

    pub fn sector(&self) -> I64Vec3 {
        self.sector
    }

    pub fn system(&self) -> I64Vec3 {
        self.system
    }

    pub fn add_layer(&mut self, layer: impl ForegroundLayer + 'static) {
        self.layers.push(Box::new(layer));
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// True if `probe` is inside this scene's star system.
    pub fn contains(&self, probe: &Probe) -> bool {
        probe.position().sector() == self.sector && probe.position().system() == self.system
    }

    /// Photograph the galaxy from `probe` and composite the scene's layers over it.
    ///
    /// `rng` drives sensor grain only.
    pub fn take_picture<R: Rng>(
        &self,
        probe: &Probe,
        galaxy: &Galaxy,
        renderer: &SnapshotRenderer,
        params: SnapshotParams,
        rng: &mut R,
    ) -> Result<RgbaImage, SceneError> {
        if !self.contains(probe) {
            log::warn!(
                "Probe {} at {} is outside scene system {} / {}",
                probe.id,
                probe.position(),
                self.sector,
                self.system
            );
        }

        let starfield_origin = probe.position().to_galaxy_space();
        let mut frame = renderer.render(galaxy, &probe.camera, starfield_origin, params, rng)?;

        let local = probe.position().local();
        for layer in &self.layers {
            layer.draw(&probe.camera, local, &mut frame);
        }

        log::debug!(
            "Probe {} took a {}x{} picture with {} foreground layers",
            probe.id,
            params.width,
            params.height,
            self.layers.len()
        );
        Ok(frame)
    }
}
