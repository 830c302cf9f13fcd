//! Process configuration read from the environment (and `.env`, loaded by
//! the binary before `Config::from_env` runs).

use std::env;
use std::num::ParseIntError;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db";
pub const DEFAULT_MAX_CONNECTIONS: &str = "5";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid DATABASE_MAX_CONNECTIONS: {0}")]
    InvalidMaxConnections(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = get("PORT", DEFAULT_PORT)
            .parse::<u16>()
            .map_err(ConfigError::InvalidPort)?;
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let raw_connections = get("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);
        let max_connections = raw_connections
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::InvalidMaxConnections(raw_connections))?;

        Ok(Config {
            host: get("HOST", DEFAULT_HOST),
            port,
            database_url: get("DATABASE_URL", DEFAULT_DATABASE_URL),
            max_connections,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
