//! Application configuration management.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;

/// Environment variable prefix for overrides (`LENDBOOK__ANALYSIS__LOOKBACK_MONTHS`).
pub const ENV_PREFIX: &str = "LENDBOOK";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ledger document location.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Snapshot and projection settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Projection cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ledger document configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Path of the JSON ledger document.
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("data/ledger.json")
}

/// Snapshot and projection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Number of future months to project.
    #[serde(default = "default_projection_months")]
    pub projection_months: u32,
    /// Number of closed months averaged into the projection baseline.
    #[serde(default = "default_lookback_months")]
    pub lookback_months: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            projection_months: default_projection_months(),
            lookback_months: default_lookback_months(),
        }
    }
}

fn default_projection_months() -> u32 {
    6
}

fn default_lookback_months() -> u32 {
    6
}

/// Projection cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached projection tables.
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
    /// Time-to-live of a cached table in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_capacity() -> u64 {
    64
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "lendbook=info".to_string()
}

impl AppConfig {
    /// Loads configuration from `config/` files and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Loads configuration from `{dir}/default`, `{dir}/{RUN_MODE}` and
    /// `LENDBOOK__*` environment variables, later sources winning.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file is malformed or a value has the wrong type.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Checks value ranges the analysis components rely on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` naming the offending setting.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=60).contains(&self.analysis.projection_months) {
            return Err(AppError::Validation(
                "analysis.projection_months must be between 1 and 60".to_string(),
            ));
        }
        if self.analysis.lookback_months == 0 {
            return Err(AppError::Validation(
                "analysis.lookback_months must be at least 1".to_string(),
            ));
        }
        if self.cache.capacity == 0 {
            return Err(AppError::Validation(
                "cache.capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const ENV_KEYS: [&str; 3] = [
        "RUN_MODE",
        "LENDBOOK__ANALYSIS__LOOKBACK_MONTHS",
        "LENDBOOK__LEDGER__PATH",
    ];

    fn unset_env() -> Vec<(&'static str, Option<&'static str>)> {
        ENV_KEYS.iter().map(|key| (*key, None)).collect()
    }

    #[test]
    fn test_defaults_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_env::with_vars(unset_env(), || AppConfig::load_from(dir.path())).unwrap();

        assert_eq!(config.ledger.path, PathBuf::from("data/ledger.json"));
        assert_eq!(config.analysis.projection_months, 6);
        assert_eq!(config.analysis.lookback_months, 6);
        assert_eq!(config.cache.capacity, 64);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.logging.filter, "lendbook=info");
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[analysis]\nprojection_months = 12\n\n[logging]\njson = true\n",
        )
        .unwrap();

        let config = temp_env::with_vars(unset_env(), || AppConfig::load_from(dir.path())).unwrap();

        assert_eq!(config.analysis.projection_months, 12);
        assert_eq!(config.analysis.lookback_months, 6);
        assert!(config.logging.json);
    }

    #[test]
    fn test_run_mode_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\ncapacity = 10\n").unwrap();
        fs::write(dir.path().join("test.toml"), "[cache]\ncapacity = 2\n").unwrap();

        let mut vars = unset_env();
        vars[0] = ("RUN_MODE", Some("test"));
        let config = temp_env::with_vars(vars, || AppConfig::load_from(dir.path())).unwrap();

        assert_eq!(config.cache.capacity, 2);
    }

    #[test]
    fn test_environment_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[analysis]\nlookback_months = 12\n",
        )
        .unwrap();

        let mut vars = unset_env();
        vars[1] = ("LENDBOOK__ANALYSIS__LOOKBACK_MONTHS", Some("3"));
        let config = temp_env::with_vars(vars, || AppConfig::load_from(dir.path())).unwrap();

        assert_eq!(config.analysis.lookback_months, 3);
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let mut config = AppConfig::default();
        config.analysis.projection_months = 0;
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));

        let mut config = AppConfig::default();
        config.analysis.projection_months = 61;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.analysis.lookback_months = 0;
        assert!(config.validate().is_err());
    }
}
