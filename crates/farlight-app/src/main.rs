//! farlight: photograph a procedural galaxy from a probe.
//!
//! Run with: `cargo run -p farlight-app -- snapshot --output voyager.png`

mod orbit;
mod settings;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use farlight_config::{CliArgs, Config, default_config_dir};
use farlight_coords::GalacticPosition;
use farlight_galaxy::{Galaxy, GalaxyGenerator, Population};
use farlight_math::format_distance;
use farlight_render::{DevelopSettings, ProbeCamera, SnapshotParams, SnapshotRenderer};
use farlight_scene::{Beacon, LocalScene, Probe};
use glam::{DVec3, I64Vec3};
use image::Rgba;
use tracing::{info, warn};

use crate::orbit::Orbit;
use crate::settings::Settings;

const BEACON_COLOR: Rgba<u8> = Rgba([255, 196, 64, 255]);

/// CLI arguments for the farlight binary.
#[derive(Parser, Debug)]
#[command(name = "farlight", about = "Probe snapshots of a procedural galaxy")]
struct AppArgs {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    overrides: CliArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame from the configured probe.
    Snapshot {
        /// Output PNG path.
        #[arg(long, default_value = "snapshot.png")]
        output: PathBuf,

        /// Mark the camera's look-at point with a beacon.
        #[arg(long)]
        beacon: bool,
    },
    /// Fly the probe around a circle and write numbered PNG frames.
    Orbit {
        /// Number of frames in one full turn.
        #[arg(long, default_value_t = 120)]
        frames: u32,

        /// Circle radius in millimeters.
        #[arg(long, default_value_t = 400.0)]
        radius: f64,

        /// Directory for `frame_NNNN.png` files.
        #[arg(long, default_value = "orbit")]
        output_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = AppArgs::parse();

    let Some(config_dir) = args.overrides.config.clone().or_else(default_config_dir) else {
        bail!("no platform config directory; pass --config <DIR>");
    };
    let file = Config::load_or_create(&config_dir)
        .with_context(|| format!("loading config from {}", config_dir.display()))?;
    let mut settings = Settings::new(config_dir.clone(), file, args.overrides);
    let config = settings.effective();

    farlight_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );

    info!("farlight: probe {}", config.probe.id);
    info!(
        "Galaxy: {} stars, seed {} | Snapshot: {}x{}, exposure {:.0}",
        config.galaxy.star_count,
        config.galaxy.seed,
        config.snapshot.width,
        config.snapshot.height,
        config.snapshot.exposure,
    );

    let generator = GalaxyGenerator::new(config.galaxy.seed, config.galaxy.star_count);
    let galaxy = Arc::new(generator.generate());
    info!(
        "Generated {} entries ({} core, {} arm, {} dust, {} halo)",
        galaxy.len(),
        galaxy.count(Population::Core),
        galaxy.count(Population::Arm),
        galaxy.count(Population::Dust),
        galaxy.count(Population::Halo),
    );

    match args.command {
        Command::Snapshot { output, beacon } => run_snapshot(&config, &galaxy, &output, beacon),
        Command::Orbit {
            frames,
            radius,
            output_dir,
        } => {
            let orbit = Orbit {
                frames,
                radius,
                height: config.probe.local[1],
            };
            run_orbit(&mut settings, &galaxy, orbit, &output_dir)
        }
    }
}

fn start_position(config: &Config) -> GalacticPosition {
    GalacticPosition::new(
        I64Vec3::from_array(config.probe.sector),
        I64Vec3::from_array(config.probe.system),
        DVec3::from_array(config.probe.local),
    )
}

fn probe_camera(config: &Config) -> ProbeCamera {
    ProbeCamera::default().with_fov_y(config.probe.fov_y_degrees.to_radians())
}

fn renderer_for(config: &Config) -> SnapshotRenderer {
    SnapshotRenderer::new(DevelopSettings {
        noise_amplitude: config.snapshot.noise_amplitude,
        ..DevelopSettings::default()
    })
    .parallel(config.snapshot.parallel)
}

fn params_for(config: &Config) -> SnapshotParams {
    SnapshotParams::new(
        config.snapshot.width,
        config.snapshot.height,
        config.snapshot.exposure,
    )
}

fn run_snapshot(config: &Config, galaxy: &Galaxy, output: &Path, beacon: bool) -> anyhow::Result<()> {
    let position = start_position(config);
    let look_at = DVec3::from_array(config.probe.look_at);

    let mut probe = Probe::new(config.probe.id.clone(), position).with_camera(probe_camera(config));
    probe.point_camera(look_at);

    let mut scene = LocalScene::new(position.sector(), position.system());
    if beacon {
        scene.add_layer(Beacon::new(look_at, 2, BEACON_COLOR));
    }

    info!("Probe position: {}", probe.position());
    let origin = probe.position().to_galaxy_space();
    info!(
        "Galaxy-space origin: ({:.4}, {:.4}, {:.4}) ly",
        origin.x, origin.y, origin.z
    );

    let frame = scene.take_picture(
        &probe,
        galaxy,
        &renderer_for(config),
        params_for(config),
        &mut rand::rng(),
    )?;
    frame
        .save(output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("Saved {}", output.display());
    Ok(())
}

/// Fly `orbit`, re-reading the config file between frames.
///
/// Snapshot settings take effect on the next frame. Galaxy and probe
/// settings only apply on the next run.
fn run_orbit(
    settings: &mut Settings,
    galaxy: &Galaxy,
    orbit: Orbit,
    output_dir: &Path,
) -> anyhow::Result<()> {
    if orbit.frames == 0 {
        bail!("--frames must be at least 1");
    }
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let config = settings.effective();
    let mut renderer = renderer_for(&config);
    let mut params = params_for(&config);

    let start = start_position(&config);
    let scene = LocalScene::new(start.sector(), start.system());
    let mut rng = rand::rng();

    info!(
        "Orbiting {} frames at radius {}",
        orbit.frames,
        format_distance(orbit.radius)
    );

    let mut probe = Probe::new(config.probe.id.clone(), start).with_camera(probe_camera(&config));
    for i in 0..orbit.frames {
        if i > 0
            && let Some(updated) = settings.refresh()
        {
            if updated.galaxy != config.galaxy || updated.probe != config.probe {
                warn!("Galaxy and probe changes apply on the next run");
            }
            let next = params_for(&updated);
            match next.validate() {
                Ok(()) => {
                    renderer = renderer_for(&updated);
                    params = next;
                    info!(
                        "Snapshot: {}x{}, exposure {:.0} from frame {}",
                        params.width, params.height, params.exposure, i
                    );
                }
                Err(e) => warn!("Ignoring edited snapshot settings: {e}"),
            }
        }

        let (eye, target) = orbit.pose(i);
        probe.translate(eye - probe.position().local());
        probe.point_camera(target);

        let frame = scene.take_picture(&probe, galaxy, &renderer, params, &mut rng)?;
        let path = output_dir.join(format!("frame_{i:04}.png"));
        frame
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Rendered frame {}/{}", i + 1, orbit.frames);
    }
    Ok(())
}
