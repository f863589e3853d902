//! Configuration for the farlight simulator.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line. Unknown or missing fields fall back to defaults, so older
//! and newer config files both load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, GalaxyConfig, ProbeConfig, SnapshotConfig, default_config_dir,
};
pub use error::ConfigError;
