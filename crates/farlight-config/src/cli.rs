//! Command-line overrides for the farlight simulator.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Global command-line overrides.
///
/// CLI values override settings loaded from `config.ron`. Flattened into
/// the binary's top-level parser.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// Star budget for the core and arm populations.
    #[arg(long, global = true)]
    pub stars: Option<usize>,

    /// Galaxy seed.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Image width in pixels.
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Image height in pixels.
    #[arg(long, global = true)]
    pub height: Option<u32>,

    /// Exposure multiplier.
    #[arg(long, global = true)]
    pub exposure: Option<f64>,

    /// Render on all cores.
    #[arg(long, global = true)]
    pub parallel: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(stars) = args.stars {
            self.galaxy.star_count = stars;
        }
        if let Some(seed) = args.seed {
            self.galaxy.seed = seed;
        }
        if let Some(w) = args.width {
            self.snapshot.width = w;
        }
        if let Some(h) = args.height {
            self.snapshot.height = h;
        }
        if let Some(exposure) = args.exposure {
            self.snapshot.exposure = exposure;
        }
        if let Some(parallel) = args.parallel {
            self.snapshot.parallel = parallel;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
