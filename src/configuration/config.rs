use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error_handling::types::ConfigError;

/// Runtime configuration for the decoy service.
///
/// Values come either from command-line flags (with defaults matching the
/// deployed service) or from a TOML file via [`Config::from_file`]. The CLI
/// and file schemas are identical; a file, when given, replaces the flag
/// values wholesale.
#[derive(Parser, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Network address to bind the server to.
    ///
    /// # Command Line
    /// Use `--bind-address <ADDRESS>` to set this value from the CLI
    #[arg(long, default_value = "0.0.0.0")]
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// TCP port the decoy listens on.
    ///
    /// # Command Line
    /// Use `--port <PORT>` to set this value from the CLI
    #[arg(long, default_value_t = 81)]
    #[serde(default = "default_port")]
    pub port: u16,

    /// File the capture log is appended to. Parent directories are created
    /// on startup.
    ///
    /// # Command Line
    /// Use `--log-path <PATH>` to set this value from the CLI
    #[arg(long, default_value = "/var/log/honeyweb/honeyweb.log")]
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    81
}

fn default_log_path() -> PathBuf {
    PathBuf::from("/var/log/honeyweb/honeyweb.log")
}

impl Config {
    /// Reads and validates a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can actually be served.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_address.parse::<IpAddr>().map_err(|e| {
            ConfigError::BadBindAddress(format!("{}: {}", self.bind_address, e))
        })?;
        if self.port == 0 {
            return Err(ConfigError::BadPort("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// The socket address the web server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self.bind_address.parse::<IpAddr>().map_err(|e| {
            ConfigError::BadBindAddress(format!("{}: {}", self.bind_address, e))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
