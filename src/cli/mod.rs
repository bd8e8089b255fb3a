//! Command-line interface for tracklog.
//!
//! Running `tracklog` with no arguments starts the service on the default
//! port with an in-memory store.

use crate::api::{self, ApiState};
use crate::core::{Config, ConfigBuilder, Result, TrackError};
use crate::parser::HttpTrackParser;
use crate::storage::InMemoryStore;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Paragliding track ingestion and lookup service
#[derive(Parser, Debug)]
#[command(name = "tracklog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Port to serve the REST API on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Bind address
    #[arg(long, env = "TRACKLOG_BIND")]
    pub bind: Option<std::net::IpAddr>,

    /// Configuration file path (default: ~/.config/tracklog/config.yaml)
    #[arg(short, long, env = "TRACKLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, env = "TRACKLOG_DEBUG")]
    pub debug: bool,

    /// Validate configuration and exit
    #[arg(long)]
    pub check_config: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Load configuration with the usual precedence: CLI arguments over
    /// environment variables over config file over defaults.
    pub async fn load_config(&self) -> Result<Config> {
        let mut builder = ConfigBuilder::new();

        let config_path = if let Some(path) = &self.config {
            path.clone()
        } else {
            let default_path = dirs::config_dir()
                .map(|d| d.join("tracklog").join("config.yaml"))
                .unwrap_or_else(|| PathBuf::from("~/.config/tracklog/config.yaml"));
            if default_path.exists() {
                default_path
            } else {
                return self.build_config_from_args(builder);
            }
        };

        match tokio::fs::read_to_string(&config_path).await {
            Ok(content) => {
                builder = builder.from_yaml(&content)?;
                tracing::info!("loaded configuration from {:?}", config_path);
            },
            Err(e) if self.config.is_some() => {
                return Err(TrackError::config(format!(
                    "failed to read config file {:?}: {}",
                    config_path, e
                )));
            },
            Err(_) => {
                tracing::debug!("no config file at {:?}, using defaults", config_path);
            },
        }

        self.build_config_from_args(builder)
    }

    fn build_config_from_args(&self, mut builder: ConfigBuilder) -> Result<Config> {
        if let Some(port) = self.port {
            builder = builder.port(port);
        }
        if let Some(bind) = self.bind {
            builder = builder.bind_address(bind);
        }
        builder.debug(self.debug).build()
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self, config: &Config) -> Result<()> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let log_level = if self.debug {
            "debug"
        } else {
            config.logging.level.as_str()
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).compact())
            .try_init()
            .map_err(|e| TrackError::config(format!("failed to initialize logging: {}", e)))?;

        Ok(())
    }
}

/// Execute the tracklog service.
pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.load_config().await?;
    cli.init_logging(&config)?;

    if cli.check_config {
        config.validate()?;
        println!("Configuration is valid!");
        println!("  port: {}", config.server.port);
        println!("  bind address: {}", config.server.bind_address);
        println!("  fetch timeout: {:?}", config.ingest.fetch_timeout);
        return Ok(());
    }

    let store = Arc::new(InMemoryStore::new());
    let parser = Arc::new(HttpTrackParser::new(&config.ingest)?);
    let state = ApiState::new(store, parser);

    api::start_server(state, &config).await
}
