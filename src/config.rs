use crate::synthesis::{SynthesisError, SynthesisParams};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Default location of the configuration file
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration for the CLI and library defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub synthesis: SynthesisDefaults,
    #[serde(default)]
    pub limits: SynthesisLimits,
}

/// Common configuration settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommonConfig {
    /// Decimal places kept when printing samples (at most 15 are printed)
    pub precision: usize,
}

/// Parameters used when none are given on the command line
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesisDefaults {
    pub harmonic_count: usize,
    pub pitch_period: f64,
}

/// Bounds on accepted synthesis requests
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesisLimits {
    pub min_samples: usize,
    pub max_samples: usize,
    pub max_harmonics: usize,
    pub min_pitch_period: f64,
    pub max_pitch_period: f64,
}

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Default for CommonConfig {
    fn default() -> Self {
        CommonConfig { precision: 5 }
    }
}

impl Default for SynthesisDefaults {
    fn default() -> Self {
        SynthesisDefaults {
            harmonic_count: 1,
            pitch_period: 4.0,
        }
    }
}

impl Default for SynthesisLimits {
    fn default() -> Self {
        SynthesisLimits {
            min_samples: 1,
            max_samples: 1 << 20,
            max_harmonics: 1024,
            min_pitch_period: 1.0,
            max_pitch_period: 1_000_000.0,
        }
    }
}

impl SynthesisDefaults {
    pub fn params(&self) -> SynthesisParams {
        SynthesisParams::new(self.harmonic_count, self.pitch_period)
    }
}

impl SynthesisLimits {
    /// Checks a synthesis request against the configured limits
    ///
    /// # Arguments
    /// * `spectrum_len` - Number of bins in the requested spectrum
    /// * `params` - Requested synthesis parameters
    ///
    /// # Returns
    /// * `Ok(())` if the request is within limits
    /// * `Err(SynthesisError::InvalidParams)` otherwise
    pub fn check(&self, spectrum_len: usize, params: &SynthesisParams) -> Result<(), SynthesisError> {
        if spectrum_len < self.min_samples || spectrum_len > self.max_samples {
            return Err(SynthesisError::InvalidParams(format!(
                "Spectrum length {} is outside the allowed range {}..={}",
                spectrum_len, self.min_samples, self.max_samples
            )));
        }

        if params.harmonic_count > self.max_harmonics {
            return Err(SynthesisError::InvalidParams(format!(
                "At most {} harmonics are allowed, requested {}",
                self.max_harmonics, params.harmonic_count
            )));
        }

        if params.pitch_period < self.min_pitch_period || params.pitch_period > self.max_pitch_period {
            return Err(SynthesisError::InvalidParams(format!(
                "Pitch period {} is outside the allowed range {}..={}",
                params.pitch_period, self.min_pitch_period, self.max_pitch_period
            )));
        }

        Ok(())
    }
}

impl Config {
    /// Parse configuration from TOML text. Missing sections take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from `path`, or the defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                file.read_to_string(&mut contents)?;
                Self::from_toml_str(&contents)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("{} not found, using default configuration", path.display());
                Ok(Config::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Load configuration from config.toml
pub fn load_config() -> Result<Config, ConfigError> {
    Config::load_from(Path::new(CONFIG_FILE))
}
