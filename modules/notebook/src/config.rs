use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const HOST: &str = "NOTEBOOK_HOST";
    pub const PORT: &str = "NOTEBOOK_PORT";
    /// Path of the JSON document holding every topic and note.
    pub const DATABASE: &str = "NOTEBOOK_DATABASE";
    /// Opensearch endpoint queried by `lookup_reference`.
    pub const ENCYCLOPEDIA_URL: &str = "ENCYCLOPEDIA_URL";
    pub const ENCYCLOPEDIA_TIMEOUT_SECS: &str = "ENCYCLOPEDIA_TIMEOUT_SECS";
}

/// Default values
pub mod defaults {
    pub const HOST: &str = "127.0.0.1";
    pub const PORT: u16 = 8000;
    pub const DATABASE: &str = "notebook.json";
    pub const ENCYCLOPEDIA_URL: &str = "https://en.wikipedia.org/w/api.php";
    pub const ENCYCLOPEDIA_TIMEOUT_SECS: u64 = 10;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a valid number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub encyclopedia_url: String,
    pub encyclopedia_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source (the process environment in
    /// production, a map in tests).
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_secs = parse_var(
            &var,
            env_vars::ENCYCLOPEDIA_TIMEOUT_SECS,
            defaults::ENCYCLOPEDIA_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Zero(env_vars::ENCYCLOPEDIA_TIMEOUT_SECS));
        }

        Ok(Self {
            host: var(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_string()),
            port: parse_var(&var, env_vars::PORT, defaults::PORT)?,
            database_path: var(env_vars::DATABASE)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(defaults::DATABASE)),
            encyclopedia_url: var(env_vars::ENCYCLOPEDIA_URL)
                .unwrap_or_else(|| defaults::ENCYCLOPEDIA_URL.to_string()),
            encyclopedia_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match var(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            var: name,
            value,
        }),
        None => Ok(default),
    }
}
