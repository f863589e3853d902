//! Photograph a galaxy from a probe position.
//!
//! Every catalog entry is treated as a point light whose apparent
//! brightness falls off with the square of its distance. Visible entries
//! are splatted into a [`Sensor`] by kind:
//!
//! - dust subtracts light over a radius-2 disk
//! - gas adds diffuse, tinted light over a radius-3 disk
//! - stars add a tight cross, plus lens-flare spikes when bright
//!
//! The sensor is then developed into an [`RgbaImage`].

use std::ops::AddAssign;

use farlight_galaxy::{Galaxy, Star, StarKind};
use glam::{DMat3, DVec3};
use image::RgbaImage;
use rand::Rng;
use rayon::prelude::*;

use crate::camera::StarCamera;
use crate::error::RenderError;
use crate::sensor::{DevelopSettings, Sensor};

/// Pixels kept clear at each image edge so splats and flares never leave the sensor.
pub const EDGE_MARGIN: i64 = 15;

const DUST_RADIUS: i64 = 2;
const DUST_STRENGTH: f64 = 0.4;
const GAS_RADIUS: i64 = 3;
const GAS_STRENGTH: f64 = 0.15;
const STAR_CENTER: f64 = 0.6;
const STAR_SIDE: f64 = 0.1;
const FLARE_THRESHOLD: f64 = 15.0;
const FLARE_MAX_LENGTH: f64 = 12.0;
const FLARE_STRENGTH: f64 = 0.05;

const AXIS_OFFSETS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Below this many stars per worker, splitting costs more than it saves.
const PARALLEL_MIN_STARS: usize = 4096;

/// Image size and exposure for one snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapshotParams {
    pub width: u32,
    pub height: u32,
    pub exposure: f64,
}

impl SnapshotParams {
    pub fn new(width: u32, height: u32, exposure: f64) -> Self {
        Self {
            width,
            height,
            exposure,
        }
    }

    /// Reject empty images and non-positive or non-finite exposures.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 {
            return Err(RenderError::InvalidParameter {
                name: "width",
                value: 0.0,
            });
        }
        if self.height == 0 {
            return Err(RenderError::InvalidParameter {
                name: "height",
                value: 0.0,
            });
        }
        if !(self.exposure.is_finite() && self.exposure > 0.0) {
            return Err(RenderError::InvalidParameter {
                name: "exposure",
                value: self.exposure,
            });
        }
        Ok(())
    }
}

/// What happened to each catalog entry during an exposure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExposureStats {
    /// Splatted into the sensor.
    pub visible: usize,
    /// Non-positive camera-space depth.
    pub behind: usize,
    /// Projected inside the edge margin or off the image.
    pub clipped: usize,
}

impl AddAssign for ExposureStats {
    fn add_assign(&mut self, rhs: Self) {
        self.visible += rhs.visible;
        self.behind += rhs.behind;
        self.clipped += rhs.clipped;
    }
}

/// An exposed, undeveloped sensor.
#[derive(Clone, Debug)]
pub struct Exposure {
    pub sensor: Sensor,
    pub stats: ExposureStats,
}

enum Outcome {
    Visible,
    Behind,
    Clipped,
}

/// Renders star catalogs into images.
///
/// Holds no per-frame state, so one renderer can photograph any number of
/// galaxies from any number of cameras, concurrently.
#[derive(Clone, Debug, Default)]
pub struct SnapshotRenderer {
    develop: DevelopSettings,
    parallel: bool,
}

impl SnapshotRenderer {
    pub fn new(develop: DevelopSettings) -> Self {
        Self {
            develop,
            parallel: false,
        }
    }

    /// Shard the star loop across the rayon thread pool.
    ///
    /// Each worker accumulates into its own sensor and the partial sensors
    /// are summed, so the result matches a serial exposure up to float
    /// summation order.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn develop_settings(&self) -> &DevelopSettings {
        &self.develop
    }

    /// Photograph `galaxy` from `probe` (galaxy space, light-years) and develop the result.
    ///
    /// `rng` supplies sensor grain only; it never affects which stars are drawn.
    pub fn render<C, R>(
        &self,
        galaxy: &Galaxy,
        camera: &C,
        probe: DVec3,
        params: SnapshotParams,
        rng: &mut R,
    ) -> Result<RgbaImage, RenderError>
    where
        C: StarCamera + ?Sized,
        R: Rng,
    {
        let exposure = self.expose(galaxy, camera, probe, params)?;
        Ok(exposure.sensor.develop(&self.develop, rng))
    }

    /// Accumulate light from every catalog entry without developing.
    pub fn expose<C>(
        &self,
        galaxy: &Galaxy,
        camera: &C,
        probe: DVec3,
        params: SnapshotParams,
    ) -> Result<Exposure, RenderError>
    where
        C: StarCamera + ?Sized,
    {
        params.validate()?;

        let view = camera.view_transform();
        let stars = galaxy.stars();

        let (sensor, stats) = if self.parallel {
            stars
                .par_iter()
                .with_min_len(PARALLEL_MIN_STARS)
                .fold(
                    || (Sensor::new(params.width, params.height), ExposureStats::default()),
                    |(mut sensor, mut stats), star| {
                        tally(&mut stats, photograph(star, &view, camera, probe, &params, &mut sensor));
                        (sensor, stats)
                    },
                )
                .reduce(
                    || (Sensor::new(params.width, params.height), ExposureStats::default()),
                    |(mut a, mut a_stats), (b, b_stats)| {
                        a.merge(&b);
                        a_stats += b_stats;
                        (a, a_stats)
                    },
                )
        } else {
            let mut sensor = Sensor::new(params.width, params.height);
            let mut stats = ExposureStats::default();
            for star in stars {
                tally(&mut stats, photograph(star, &view, camera, probe, &params, &mut sensor));
            }
            (sensor, stats)
        };

        log::debug!(
            "Exposed {}x{} at {:.0}: {} visible, {} behind, {} clipped",
            params.width,
            params.height,
            params.exposure,
            stats.visible,
            stats.behind,
            stats.clipped
        );

        Ok(Exposure { sensor, stats })
    }
}

fn tally(stats: &mut ExposureStats, outcome: Outcome) {
    match outcome {
        Outcome::Visible => stats.visible += 1,
        Outcome::Behind => stats.behind += 1,
        Outcome::Clipped => stats.clipped += 1,
    }
}

/// Project one entry and splat it into the sensor if it lands inside the margin.
fn photograph<C: StarCamera + ?Sized>(
    star: &Star,
    view: &DMat3,
    camera: &C,
    probe: DVec3,
    params: &SnapshotParams,
    sensor: &mut Sensor,
) -> Outcome {
    let rel = star.position - probe;
    let dist_sq = rel.length_squared().max(1.0);
    let brightness = star.luminosity / dist_sq * params.exposure;

    // Normalizing by the clamped distance keeps near-zero offsets finite.
    let dir = rel / dist_sq.sqrt();
    let cam_dir = *view * dir;
    if cam_dir.z <= 0.0 {
        return Outcome::Behind;
    }

    let screen = camera.project_to_screen(cam_dir, params.width, params.height);
    let (x, y) = (screen.x.floor(), screen.y.floor());
    let in_frame = x >= EDGE_MARGIN as f64
        && x < (params.width as i64 - EDGE_MARGIN) as f64
        && y >= EDGE_MARGIN as f64
        && y < (params.height as i64 - EDGE_MARGIN) as f64;
    if !in_frame {
        return Outcome::Clipped;
    }
    let (x, y) = (x as i64, y as i64);

    match star.kind {
        StarKind::Dust => splat_dust(sensor, x, y, brightness),
        StarKind::Gas => splat_gas(sensor, x, y, brightness, star.tint()),
        StarKind::Normal => splat_star(sensor, x, y, brightness, star.tint()),
    }
    Outcome::Visible
}

/// Falloff weight for a kernel offset; `None` outside the disk.
fn disk_weight(dx: i64, dy: i64, radius: i64) -> Option<f64> {
    let d2 = dx * dx + dy * dy;
    (d2 <= radius * radius).then(|| 1.0 / (d2 as f64 + 1.0))
}

fn splat_dust(sensor: &mut Sensor, x: i64, y: i64, brightness: f64) {
    for dx in -DUST_RADIUS..=DUST_RADIUS {
        for dy in -DUST_RADIUS..=DUST_RADIUS {
            if let Some(weight) = disk_weight(dx, dy, DUST_RADIUS) {
                sensor.darken(
                    (x + dx) as usize,
                    (y + dy) as usize,
                    brightness * DUST_STRENGTH * weight,
                );
            }
        }
    }
}

fn splat_gas(sensor: &mut Sensor, x: i64, y: i64, brightness: f64, tint: [f64; 3]) {
    for dx in -GAS_RADIUS..=GAS_RADIUS {
        for dy in -GAS_RADIUS..=GAS_RADIUS {
            if let Some(weight) = disk_weight(dx, dy, GAS_RADIUS) {
                sensor.add(
                    (x + dx) as usize,
                    (y + dy) as usize,
                    brightness * GAS_STRENGTH * weight,
                    tint,
                );
            }
        }
    }
}

fn splat_star(sensor: &mut Sensor, x: i64, y: i64, brightness: f64, tint: [f64; 3]) {
    sensor.add(x as usize, y as usize, brightness * STAR_CENTER, tint);
    for (ox, oy) in AXIS_OFFSETS {
        sensor.add((x + ox) as usize, (y + oy) as usize, brightness * STAR_SIDE, tint);
    }

    if brightness > FLARE_THRESHOLD {
        let length = (brightness / 3.0).min(FLARE_MAX_LENGTH) as i64;
        let strength = brightness * FLARE_STRENGTH;
        for s in 1..=length {
            let fade = 1.0 - s as f64 / length as f64;
            for (ox, oy) in AXIS_OFFSETS {
                sensor.add(
                    (x + ox * s) as usize,
                    (y + oy * s) as usize,
                    strength * fade,
                    tint,
                );
            }
        }
    }
}
