use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::{fs, path::Path, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use crate::errors::ConfigError;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Address to listen on, as `HOST:PORT`.
    pub address: String,

    /// Path to the JSON file holding the records.
    pub data_file: PathBuf,

    /// Log level for tracing (e.g. "info", "debug").
    pub log_level: String,

    pub server_version: String,

    /// Write through `<file>.tmp` and rename, instead of truncating the
    /// data file in place.
    pub atomic_writes: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: "localhost:80".to_string(),
            data_file: PathBuf::from("file.json"),
            log_level: "info".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            atomic_writes: true,
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        serde_json::from_str::<AppConfig>(&file).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Start from the config file (if any) and let command-line flags win.
    pub fn resolve(args: &ServeArgs) -> Result<Self, ConfigError> {
        let mut cfg = match &args.config {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        if let Some(address) = &args.address {
            cfg.address = address.clone();
        }
        if let Some(file) = &args.file {
            cfg.data_file = file.clone();
        }
        if let Some(level) = &args.log_level {
            cfg.log_level = level.clone();
        }

        Ok(cfg)
    }
}

#[derive(Debug, Parser)]
#[command(name = "auriga", version, arg_required_else_help = true, about = "Record service backed by a single JSON file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server.
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (default: localhost:80).
    #[arg(long, value_name = "ADDRESS:PORT")]
    pub address: Option<String>,

    /// JSON file used as the record database (default: file.json).
    #[arg(long, value_name = "JSON_PATH")]
    pub file: Option<PathBuf>,

    /// JSON config file; flags given on the command line override it.
    #[arg(long, value_name = "CONFIG_JSON")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// A validated `HOST:PORT`, where host is `localhost` or an IP address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenAddress {
    pub ip: IpAddr,
    pub port: u16,
}

impl ListenAddress {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let Some((host, port)) = raw.split_once(':') else {
            return Err(ConfigError::InvalidAddress(raw.to_string()));
        };
        if port.contains(':') {
            return Err(ConfigError::InvalidAddress(raw.to_string()));
        }

        let ip = if host == "localhost" {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            host.parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidAddress(host.to_string()))?
        };

        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port.to_string()))?;

        Ok(Self { ip, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}
