//! Player configuration
//!
//! Controls the snapshot a store starts from. `reset()` ignores it and always
//! returns to the fixed default snapshot.

use crate::error::{PlayerError, Result};
use aria_core::{AudioQuality, QualitySource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory by [`PlayerConfig::load`]
pub const DEFAULT_CONFIG_FILE: &str = "aria-player.toml";

/// Prefix for environment overrides (`ARIA_VOLUME`, `ARIA_QUALITY`, ...)
pub const ENV_PREFIX: &str = "ARIA";

/// Configuration for the playback store
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 0.8)
    #[serde(default = "default_volume")]
    pub volume: f64,

    /// Initial quality (default: LOSSLESS)
    #[serde(default)]
    pub quality: AudioQuality,

    /// Initial quality source (default: manual)
    #[serde(default)]
    pub quality_source: QualitySource,
}

impl PlayerConfig {
    /// Load configuration from `aria-player.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from a specific file (if it exists) and the environment
    ///
    /// Environment variables prefixed with `ARIA_` override file values.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(PathBuf::from(path)));
        }

        // Override with environment variables (ARIA_VOLUME, ARIA_QUALITY_SOURCE, ...)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        );

        let config: Self = settings
            .build()
            .map_err(|e| PlayerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.volume.is_finite() || !(0.0..=1.0).contains(&self.volume) {
            return Err(PlayerError::Config(format!(
                "volume must be between 0.0 and 1.0, got {}",
                self.volume
            )));
        }

        Ok(())
    }

}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            quality: AudioQuality::Lossless,
            quality_source: QualitySource::Manual,
        }
    }
}

fn default_volume() -> f64 {
    0.8
}
