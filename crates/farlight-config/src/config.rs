//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level simulator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Galaxy generation.
    pub galaxy: GalaxyConfig,
    /// Snapshot size and development.
    pub snapshot: SnapshotConfig,
    /// Starting probe.
    pub probe: ProbeConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Galaxy generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Star budget shared by the core and arm populations.
    pub star_count: usize,
    /// Generator seed. The same seed always builds the same galaxy.
    pub seed: u64,
}

/// Snapshot configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Brightness multiplier. 50 000 to 100 000 suits the default luminosities.
    pub exposure: f64,
    /// Sensor grain amplitude (0 disables grain).
    pub noise_amplitude: f64,
    /// Split the star loop across worker threads.
    pub parallel: bool,
}

/// Starting probe configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    /// Probe identifier.
    pub id: String,
    /// Sector tier in light-years.
    pub sector: [i64; 3],
    /// System tier in AU.
    pub system: [i64; 3],
    /// Local tier in millimeters.
    pub local: [f64; 3],
    /// Local-tier point the camera looks at.
    pub look_at: [f64; 3],
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            star_count: 300_000,
            seed: 1_772_054_134_190_328_000,
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            exposure: 80_000.0,
            noise_amplitude: 0.004,
            parallel: false,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            id: "Voyager-1".to_string(),
            sector: [10_000, 25_000, 35_000],
            system: [0, 0, 0],
            local: [0.0, -200.0, -400.0],
            look_at: [0.0, -200.0, 0.0],
            fov_y_degrees: 90.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform config directory for farlight, e.g. `~/.config/farlight` on Linux.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("farlight"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(false)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file; returns `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = std::fs::read_to_string(config_dir.join(CONFIG_FILE))
            .map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
