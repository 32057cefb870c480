//! Configuration management for the health dashboard

use crate::errors::{DashboardError, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Path to the JSON service registry
    pub registry_path: PathBuf,

    /// Directory holding the dashboard's static assets
    pub public_dir: PathBuf,

    /// Interval between scheduled health-check runs
    pub poll_interval: Duration,

    /// Delay before the first run after startup
    pub warmup_delay: Duration,

    /// Upper bound for a single outbound health request
    pub probe_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9100,
            registry_path: PathBuf::from("config.json"),
            public_dir: PathBuf::from("public"),
            poll_interval: Duration::from_secs(60),
            warmup_delay: Duration::from_secs(2),
            probe_timeout: Duration::from_secs(10),
        }
    }
}

/// Command-line overrides, applied on top of the environment
#[derive(Debug, Default, Parser)]
#[command(name = "health-dashboard", version, about = "Backend service health dashboard")]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Path to the service registry file
    #[arg(long = "config", short = 'c')]
    pub registry_path: Option<PathBuf>,

    /// Directory with the dashboard's static files
    #[arg(long)]
    pub public_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }

        if let Ok(path) = env::var("CONFIG_PATH") {
            config.registry_path = PathBuf::from(path);
        }

        if let Ok(dir) = env::var("PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }

        if let Ok(interval) = env::var("POLL_INTERVAL_SECONDS") {
            if let Ok(seconds) = interval.parse::<u64>() {
                config.poll_interval = Duration::from_secs(seconds);
            }
        }

        if let Ok(delay) = env::var("WARMUP_DELAY_SECONDS") {
            if let Ok(seconds) = delay.parse::<u64>() {
                config.warmup_delay = Duration::from_secs(seconds);
            }
        }

        if let Ok(timeout) = env::var("PROBE_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.probe_timeout = Duration::from_secs(seconds);
            }
        }

        config
    }

    /// Apply command-line overrides
    pub fn with_cli(mut self, cli: Cli) -> Self {
        if let Some(host) = cli.host {
            self.host = host;
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(path) = cli.registry_path {
            self.registry_path = path;
        }
        if let Some(dir) = cli.public_dir {
            self.public_dir = dir;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(DashboardError::Config("host cannot be empty".to_string()));
        }

        if self.port == 0 {
            return Err(DashboardError::Config("port must be greater than 0".to_string()));
        }

        if self.registry_path.as_os_str().is_empty() {
            return Err(DashboardError::Config("registry_path cannot be empty".to_string()));
        }

        if self.public_dir.as_os_str().is_empty() {
            return Err(DashboardError::Config("public_dir cannot be empty".to_string()));
        }

        if self.poll_interval.is_zero() {
            return Err(DashboardError::Config("poll_interval must be greater than 0".to_string()));
        }

        if self.probe_timeout.is_zero() {
            return Err(DashboardError::Config("probe_timeout must be greater than 0".to_string()));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
