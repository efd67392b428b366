//! Engine configuration
//!
//! Optional TOML configuration with built-in defaults and validation.

mod defaults;
mod loader;
mod validator;

pub use loader::{
    Config, ConfigError, ConfigLoader, EpsilonConfig, LoggingConfig, ReconcilerConfig, ScanConfig,
};
pub use validator::validate_config;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
