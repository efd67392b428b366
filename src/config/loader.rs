//! Engine configuration loading
//!
//! Configuration is optional; every field defaults to the built-in
//! engine values, so a missing file or a sparse file both work.

use super::defaults;
use crate::memory::ScanOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub reconciler: ReconcilerConfig,

    #[serde(default)]
    pub epsilon: EpsilonConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scan behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Upper bound on one cross-process read
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Result cap; 0 scans to the end
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Skip regions that cannot be written
    #[serde(default = "default_writable_only")]
    pub writable_only: bool,
}

/// Reconciler cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Float comparison tolerances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpsilonConfig {
    #[serde(default = "default_f32_epsilon")]
    pub float32: f64,
    #[serde(default = "default_f64_epsilon")]
    pub float64: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            chunk_size: defaults::DEFAULT_CHUNK_SIZE,
            max_results: defaults::DEFAULT_MAX_RESULTS,
            writable_only: defaults::DEFAULT_WRITABLE_ONLY,
        }
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        ReconcilerConfig {
            tick_interval_ms: defaults::DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl Default for EpsilonConfig {
    fn default() -> Self {
        EpsilonConfig {
            float32: defaults::DEFAULT_F32_EPSILON,
            float64: defaults::DEFAULT_F64_EPSILON,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: defaults::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scan: ScanConfig::default(),
            reconciler: ReconcilerConfig::default(),
            epsilon: EpsilonConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// The scan options this configuration selects
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            max_results: self.scan.max_results,
            writable_only: self.scan.writable_only,
            f32_epsilon: self.epsilon.float32,
            f64_epsilon: self.epsilon.float64,
            chunk_size: self.scan.chunk_size,
        }
    }

    /// The reconciler cadence this configuration selects
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.reconciler.tick_interval_ms)
    }
}

/// Loads configuration from a TOML file
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads and validates the file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        super::validator::validate_config(&config)?;
        Ok(config)
    }

    /// Loads the file, falling back to defaults when it is absent or bad
    pub fn load_or_default(&self) -> Config {
        self.load().unwrap_or_default()
    }
}

// Default functions for serde
fn default_chunk_size() -> usize {
    defaults::DEFAULT_CHUNK_SIZE
}

fn default_max_results() -> usize {
    defaults::DEFAULT_MAX_RESULTS
}

fn default_writable_only() -> bool {
    defaults::DEFAULT_WRITABLE_ONLY
}

fn default_tick_interval_ms() -> u64 {
    defaults::DEFAULT_TICK_INTERVAL_MS
}

fn default_f32_epsilon() -> f64 {
    defaults::DEFAULT_F32_EPSILON
}

fn default_f64_epsilon() -> f64 {
    defaults::DEFAULT_F64_EPSILON
}

fn default_log_level() -> String {
    defaults::DEFAULT_LOG_LEVEL.to_string()
}
