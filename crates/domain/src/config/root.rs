use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::metrics::MetricsConfig;
use super::server::ServerConfig;
use super::shipper::ShipperConfig;
use super::source::SourceConfig;

/// Main configuration structure for the exporter
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Metrics endpoint listen settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Pi-hole API connection settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Scrape-cycle cadence
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Log shipper settings
    #[serde(default)]
    pub shipper: ShipperConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line overrides applied on top of the loaded file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub pihole_host: Option<String>,
    pub api_token: Option<String>,
    pub port: Option<u16>,
    pub loki_url: Option<String>,
    pub state_file: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. pihole-exporter.toml in current directory
    /// 3. /etc/pihole-exporter/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("pihole-exporter.toml").exists() {
            Self::from_file("pihole-exporter.toml")?
        } else if std::path::Path::new("/etc/pihole-exporter/config.toml").exists() {
            Self::from_file("/etc/pihole-exporter/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(host) = overrides.pihole_host {
            self.source.host = host;
        }
        if let Some(token) = overrides.api_token {
            self.source.api_token = Some(token);
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(url) = overrides.loki_url {
            self.shipper.loki_url = Some(url);
        }
        if let Some(path) = overrides.state_file {
            self.shipper.state_file = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics.scrape_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "metrics.scrape_interval_secs must be positive".to_string(),
            ));
        }
        if self.shipper.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "shipper.interval_secs must be positive".to_string(),
            ));
        }
        if self.shipper.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "shipper.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
