//! Gateway configuration with validation.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default maximum size of a delta body (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Bind address
    pub host: IpAddr,
    /// Bind port
    pub port: u16,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// Per-request timeout, sink write included
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 80,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl GatewayConfig {
    /// Read configuration from the environment.
    ///
    /// - `RM_HTTP_HOST` (default `0.0.0.0`)
    /// - `RM_HTTP_PORT` (default `80`)
    /// - `RM_MAX_BODY_BYTES` (default 10 MiB)
    /// - `RM_REQUEST_TIMEOUT_SECS` (default `60`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: parse_var(&lookup, "RM_HTTP_HOST")?.unwrap_or(defaults.host),
            port: parse_var(&lookup, "RM_HTTP_PORT")?.unwrap_or(defaults.port),
            max_body_bytes: parse_var(&lookup, "RM_MAX_BODY_BYTES")?
                .unwrap_or(defaults.max_body_bytes),
            request_timeout: parse_var(&lookup, "RM_REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Socket address to bind.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse an optional variable; unset and empty both mean "use the default".
pub fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable could not be parsed
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    /// Port 0 is not allowed
    #[error("port cannot be 0")]
    InvalidPort,
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
