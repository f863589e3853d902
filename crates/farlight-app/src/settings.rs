//! The on-disk config plus the CLI overrides layered over it.

use std::path::PathBuf;

use farlight_config::{CliArgs, Config};
use tracing::warn;

/// Tracks `config.ron` so long runs can pick up edits between frames.
///
/// Changes are detected against the file as last read, not against the
/// overridden config, so a `--width` flag does not count as an edit.
#[derive(Debug, Clone)]
pub struct Settings {
    dir: PathBuf,
    file: Config,
    overrides: CliArgs,
}

impl Settings {
    pub fn new(dir: PathBuf, file: Config, overrides: CliArgs) -> Self {
        Self {
            dir,
            file,
            overrides,
        }
    }

    /// The file config with CLI overrides applied.
    pub fn effective(&self) -> Config {
        let mut config = self.file.clone();
        config.apply_cli_overrides(&self.overrides);
        config
    }

    /// Re-read the config file, returning the new effective config if it changed.
    ///
    /// A missing or malformed file is logged and keeps the current config.
    pub fn refresh(&mut self) -> Option<Config> {
        match self.file.reload(&self.dir) {
            Ok(Some(file)) => {
                self.file = file;
                Some(self.effective())
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Keeping current config: {e}");
                None
            }
        }
    }
}
