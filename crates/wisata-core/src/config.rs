use crate::error::{Result, WisataError};
use crate::models::place::PointMethod;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the wisata services
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Path to the GeoJSON dataset
    pub data_path: ConfigValue<PathBuf>,
    /// Default number of results per nearest query
    pub default_k: ConfigValue<usize>,
    /// Default point-selection method
    pub method: ConfigValue<PointMethod>,
    /// HTTP listen port
    pub port: ConfigValue<u16>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            data_path: ConfigValue::new(PathBuf::from("wisata.geojson"), ConfigSource::Default),
            default_k: ConfigValue::new(3, ConfigSource::Default),
            method: ConfigValue::new(PointMethod::Representative, ConfigSource::Default),
            port: ConfigValue::new(8000, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| WisataError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| WisataError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(data) = file_config.data {
            self.data_path.update(data, ConfigSource::File);
        }

        if let Some(k) = file_config.k {
            self.default_k.update(k, ConfigSource::File);
        }

        if let Some(method) = file_config.method {
            self.method.update(method, ConfigSource::File);
        }

        if let Some(port) = file_config.port {
            self.port.update(port, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // WISATA_DATA
        if let Ok(path) = env::var("WISATA_DATA") {
            self.data_path.update(PathBuf::from(path), ConfigSource::Environment);
        }

        // WISATA_K
        if let Ok(k_str) = env::var("WISATA_K") {
            match k_str.parse::<usize>() {
                Ok(k) if k > 0 => self.default_k.update(k, ConfigSource::Environment),
                _ => tracing::warn!(
                    "Invalid WISATA_K value '{}': expected a positive integer",
                    k_str
                ),
            }
        }

        // WISATA_METHOD
        if let Ok(method_str) = env::var("WISATA_METHOD") {
            match method_str.parse::<PointMethod>() {
                Ok(method) => self.method.update(method, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid WISATA_METHOD value '{}': expected representative or centroid",
                    method_str
                ),
            }
        }

        // WISATA_PORT
        if let Ok(port_str) = env::var("WISATA_PORT") {
            match port_str.parse::<u16>() {
                Ok(port) => self.port.update(port, ConfigSource::Environment),
                Err(_) => {
                    tracing::warn!("Invalid WISATA_PORT value '{}': expected a port number", port_str)
                }
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(data) = overrides.data_path {
            self.data_path.update(data, ConfigSource::Cli);
        }

        if let Some(k) = overrides.default_k {
            self.default_k.update(k, ConfigSource::Cli);
        }

        if let Some(method) = overrides.method {
            self.method.update(method, ConfigSource::Cli);
        }

        if let Some(port) = overrides.port {
            self.port.update(port, ConfigSource::Cli);
        }
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    data: Option<PathBuf>,
    k: Option<usize>,
    method: Option<PointMethod>,
    port: Option<u16>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub data_path: Option<PathBuf>,
    pub default_k: Option<usize>,
    pub method: Option<PointMethod>,
    pub port: Option<u16>,
}
