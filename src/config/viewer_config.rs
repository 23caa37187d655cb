//! Viewer configuration file
//!
//! ```toml
//! [model]
//! basedir = "/project/drogon/hum"
//!
//! [fence]
//! extension = 500.0
//! sampling_interval = 5.0
//!
//! [zonation]
//! min_zone_code = 0
//!
//! [display]
//! zunit = "depth (m)"
//! colors = ["#e41a1c", "#377eb8"]
//!
//! [server]
//! addr = "127.0.0.1:8050"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use super::validation::{validate_physical_ranges, validate_unknown_keys};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "HORIZON_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "horizon_viewer.toml";

/// Environment variable overriding `[server] addr`.
pub const SERVER_ADDR_ENV: &str = "HORIZON_SERVER_ADDR";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `ViewerConfig::load()` which searches:
/// 1. `$HORIZON_CONFIG` env var
/// 2. `./horizon_viewer.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub model: ModelConfig,

    /// Well fence construction
    #[serde(default)]
    pub fence: FenceConfig,

    #[serde(default)]
    pub zonation: ZonationConfig,

    /// Figure labels and colors
    #[serde(default)]
    pub display: DisplayConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl ViewerConfig {
    /// Load configuration using the standard search order.
    ///
    /// A file that exists but fails to load is logged and skipped.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded viewer config from {CONFIG_ENV}");
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config from {CONFIG_ENV}, falling back"
                        );
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV} points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded viewer config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    ///
    /// Unknown keys are logged as warnings; out-of-range values fail.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Range-check every value. Suspicious values are logged, impossible ones fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = validate_physical_ranges(self);
        for w in &warnings {
            warn!(field = %w.field, "{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Bind address: `$HORIZON_SERVER_ADDR` if set, else `[server] addr`.
    pub fn server_addr(&self) -> String {
        std::env::var(SERVER_ADDR_ENV).unwrap_or_else(|_| self.server.addr.clone())
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            Self::Parse(path, e) => write!(f, "Config parse error ({}): {}", path.display(), e),
            Self::Serialize(e) => write!(f, "Config serialization error: {e}"),
            Self::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model directory containing `model_file.xml`.
    ///
    /// Can be overridden by the `--basedir` CLI flag.
    #[serde(default = "default_basedir")]
    pub basedir: PathBuf,
}

fn default_basedir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            basedir: default_basedir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceConfig {
    /// Horizontal extension past each end of a well (m)
    #[serde(default = "default_extension")]
    pub extension: f64,

    /// Arc length between samples along a well (m)
    #[serde(default = "default_sampling_interval")]
    pub sampling_interval: f64,
}

const fn default_extension() -> f64 {
    defaults::FENCE_EXTENSION_M
}

const fn default_sampling_interval() -> f64 {
    defaults::FENCE_SAMPLING_INTERVAL_M
}

impl Default for FenceConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            sampling_interval: default_sampling_interval(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonationConfig {
    #[serde(default = "default_min_zone_code")]
    pub min_zone_code: i32,
}

const fn default_min_zone_code() -> i32 {
    defaults::MIN_ZONE_CODE
}

impl Default for ZonationConfig {
    fn default() -> Self {
        Self {
            min_zone_code: default_min_zone_code(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Depth axis label
    #[serde(default = "default_zunit")]
    pub zunit: String,

    /// Surface colors in surface order; reused cyclically
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
}

fn default_zunit() -> String {
    defaults::ZUNIT.to_string()
}

fn default_colors() -> Vec<String> {
    defaults::SURFACE_COLORS
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            zunit: default_zunit(),
            colors: default_colors(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `HORIZON_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.fence.extension, 500.0);
        assert_eq!(config.fence.sampling_interval, 5.0);
        assert_eq!(config.zonation.min_zone_code, 0);
        assert_eq!(config.display.zunit, "depth (m)");
        assert_eq!(config.display.colors.len(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = ViewerConfig::from_toml_str(
            r#"
[fence]
sampling_interval = 2.5

[display]
colors = ["red"]
"#,
        )
        .unwrap();
        assert_eq!(config.fence.sampling_interval, 2.5);
        assert_eq!(config.fence.extension, 500.0);
        assert_eq!(config.display.colors, vec!["red"]);
        assert_eq!(config.display.zunit, "depth (m)");
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = ViewerConfig::default();
        config.model.basedir = PathBuf::from("/data/model");
        config.zonation.min_zone_code = 1;
        let text = config.to_toml().unwrap();
        assert_eq!(ViewerConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_value_fails_validation() {
        let err = ViewerConfig::from_toml_str("[fence]\nsampling_interval = 0.0\n").unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.contains("sampling_interval")));
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn test_load_from_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[fence\nextension = 1").unwrap();
        match ViewerConfig::load_from_file(&path) {
            Err(ConfigError::Parse(p, _)) => assert_eq!(p, path),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
