//! Configuration management for tracklog.
//!
//! Configuration is resolved with the usual precedence:
//! CLI arguments over environment variables over a YAML config file over
//! built-in defaults.

use crate::core::{Result, TrackError};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Complete configuration for tracklog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Track ingestion configuration
    pub ingest: IngestConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Debug mode
    #[serde(skip)]
    pub debug: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to serve the REST API on
    pub port: u16,
    /// Bind address
    pub bind_address: IpAddr,
    /// Enable CORS headers
    pub enable_cors: bool,
}

/// Ingestion configuration for fetching remote track files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Upper bound on one track-file fetch
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,
    /// Maximum accepted track-file size in bytes
    pub max_body_bytes: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is unset
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "0.0.0.0".parse().expect("valid default bind address"),
            enable_cors: true,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(TrackError::config("server port must be non-zero"));
        }
        if self.ingest.fetch_timeout.is_zero() {
            return Err(TrackError::config("fetch timeout must be non-zero"));
        }
        if self.ingest.max_body_bytes == 0 {
            return Err(TrackError::config("max body size must be non-zero"));
        }
        Ok(())
    }
}

/// Builder applying configuration sources in precedence order.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from YAML, replacing anything set so far.
    pub fn from_yaml(mut self, content: &str) -> Result<Self> {
        self.config = serde_yaml::from_str(content)
            .map_err(|e| TrackError::config(format!("invalid config file: {}", e)))?;
        Ok(self)
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn bind_address(mut self, addr: IpAddr) -> Self {
        self.config.server.bind_address = addr;
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.ingest.fetch_timeout = timeout;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Validate and produce the final configuration.
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8080);
        assert!(config.server.enable_cors);
        assert_eq!(config.ingest.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConfigBuilder::new()
            .port(9000)
            .fetch_timeout(Duration::from_secs(3))
            .debug(true)
            .build()
            .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.ingest.fetch_timeout, Duration::from_secs(3));
        assert!(config.debug);
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = r#"
server:
  port: 8888
ingest:
  fetch_timeout: 5s
  max_body_bytes: 1048576
logging:
  level: debug
"#;
        let config = ConfigBuilder::new().from_yaml(yaml).unwrap().build().unwrap();
        assert_eq!(config.server.port, 8888);
        assert_eq!(config.ingest.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.ingest.max_body_bytes, 1_048_576);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = ConfigBuilder::new().port(0).build();
        assert!(matches!(result, Err(TrackError::Config(_))));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        assert!(ConfigBuilder::new().from_yaml("server: [").is_err());
    }
}
