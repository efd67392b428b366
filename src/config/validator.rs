//! Configuration validation

use super::loader::{Config, ConfigError};
use crate::memory::MAX_CHUNK;

const MIN_TICK_INTERVAL_MS: u64 = 50;
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Checks a configuration for values the engine cannot run with
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let chunk = config.scan.chunk_size;
    if chunk < 8 || chunk % 8 != 0 {
        return Err(ConfigError::Invalid(format!(
            "scan.chunk_size must be a multiple of 8 and at least 8, got {chunk}"
        )));
    }
    if chunk > MAX_CHUNK {
        return Err(ConfigError::Invalid(format!(
            "scan.chunk_size must not exceed {MAX_CHUNK}, got {chunk}"
        )));
    }

    let tick = config.reconciler.tick_interval_ms;
    if tick < MIN_TICK_INTERVAL_MS {
        return Err(ConfigError::Invalid(format!(
            "reconciler.tick_interval_ms must be at least {MIN_TICK_INTERVAL_MS}, got {tick}"
        )));
    }

    for (name, eps) in [
        ("epsilon.float32", config.epsilon.float32),
        ("epsilon.float64", config.epsilon.float64),
    ] {
        if !eps.is_finite() || eps <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "{name} must be a positive finite number, got {eps}"
            )));
        }
    }

    let level = config.logging.level.as_str();
    if !LOG_LEVELS.contains(&level) {
        return Err(ConfigError::Invalid(format!(
            "logging.level must be one of {LOG_LEVELS:?}, got {level:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_misaligned_chunk() {
        let mut config = Config::default();
        config.scan.chunk_size = 1000;
        assert!(validate_config(&config).is_err());

        config.scan.chunk_size = 4;
        assert!(validate_config(&config).is_err());

        config.scan.chunk_size = 4096;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_oversized_chunk() {
        let mut config = Config::default();
        config.scan.chunk_size = MAX_CHUNK * 2;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_fast_tick() {
        let mut config = Config::default();
        config.reconciler.tick_interval_ms = 10;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_epsilon() {
        let mut config = Config::default();
        config.epsilon.float32 = 0.0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.epsilon.float64 = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }
}
