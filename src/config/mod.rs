//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Histogram bin counts per view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramConfig {
    /// Bins for the overlaid two-athlete comparison histogram
    #[serde(default = "default_comparison_bins")]
    pub comparison_bins: usize,

    /// Bins for per-segment detail histograms of a single race
    #[serde(default = "default_detail_bins")]
    pub detail_bins: usize,
}

fn default_comparison_bins() -> usize {
    12
}

fn default_detail_bins() -> usize {
    16
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            comparison_bins: default_comparison_bins(),
            detail_bins: default_detail_bins(),
        }
    }
}

/// One race-year results file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceSource {
    /// Race name as shown in the race dropdown
    pub name: String,

    /// Race year as shown in the year dropdown
    pub year: String,

    /// CSV path, relative to `data_dir` unless absolute
    pub file: PathBuf,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Explicit catalog entries; empty means discover under `data_dir`
    #[serde(default)]
    pub races: Vec<RaceSource>,

    #[serde(default)]
    pub histogram: HistogramConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            races: Vec::new(),
            histogram: HistogramConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve a race file path against `data_dir`.
    pub fn race_path(&self, source: &RaceSource) -> PathBuf {
        if source.file.is_absolute() {
            source.file.clone()
        } else {
            self.data_dir.join(&source.file)
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.histogram.comparison_bins == 0 || self.histogram.detail_bins == 0 {
            return Err(ConfigError::ValidationError(
                "Histogram bin counts must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for race in &self.races {
            if race.name.trim().is_empty() || race.year.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "Race entries need a name and a year".to_string(),
                ));
            }
            if !seen.insert((race.name.as_str(), race.year.as_str())) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate race entry: {} {}",
                    race.name, race.year
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.histogram.comparison_bins, 12);
        assert_eq!(config.histogram.detail_bins, 16);
        assert_eq!(config.server.port, 8080);
        assert!(config.races.is_empty());
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_bins() {
        let mut config = AppConfig::default();
        config.histogram.comparison_bins = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_duplicate_race() {
        let mut config = AppConfig::default();
        let entry = RaceSource {
            name: "Rockwood".to_string(),
            year: "2018".to_string(),
            file: PathBuf::from("rockwood18.csv"),
        };
        config.races = vec![entry.clone(), entry];

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Rockwood 2018"));
    }

    #[test]
    fn test_parse_races() {
        let config: AppConfig = toml::from_str(
            r#"
            data_dir = "/srv/results"

            [histogram]
            comparison_bins = 10

            [[races]]
            name = "Hampton"
            year = "2018"
            file = "results_hampton18sprint.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.histogram.comparison_bins, 10);
        assert_eq!(config.histogram.detail_bins, 16);
        assert_eq!(config.races.len(), 1);
        assert_eq!(
            config.race_path(&config.races[0]),
            PathBuf::from("/srv/results/results_hampton18sprint.csv")
        );
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
    }
}
