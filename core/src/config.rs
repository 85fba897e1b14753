//! Where the harness finds the service under test.
//!
//! Values come from the environment with the service's stock defaults:
//! `ALASKA_HOST` (`0.0.0.0`), `ALASKA_PORT` (`8091`) and
//! `ALASKA_CONNECT_TIMEOUT` in seconds (`60`).

use std::time::Duration;

use crate::error::ConfigError;

pub const HOST_VAR: &str = "ALASKA_HOST";
pub const PORT_VAR: &str = "ALASKA_PORT";
pub const CONNECT_TIMEOUT_VAR: &str = "ALASKA_CONNECT_TIMEOUT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8091;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl HarnessConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(host) = lookup(HOST_VAR) {
            config.host = host;
        }
        if let Some(value) = lookup(PORT_VAR) {
            config.port = value.trim().parse().map_err(|_| ConfigError::InvalidVar {
                var: PORT_VAR,
                expected: "a TCP port",
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(CONNECT_TIMEOUT_VAR) {
            let secs: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidVar {
                var: CONNECT_TIMEOUT_VAR,
                expected: "a whole number of seconds",
                value: value.clone(),
            })?;
            config.connect_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
