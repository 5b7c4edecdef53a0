//! Service configuration, read from environment variables.
//!
//! - `CRM_BIND_ADDR`: listen address (default `0.0.0.0:8080`)
//! - `CRM_USERNAME` / `CRM_PASSWORD`: Basic credentials for read endpoints
//!   (default `admin` / `admin`)
//! - `CRM_LOG_FORMAT`: `json` (default) or `pretty`

use std::net::SocketAddr;

use thiserror::Error;

use crm_auth::Credentials;
use crm_observability::{LogFormat, ParseLogFormatError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CRM_BIND_ADDR '{value}' is not a socket address: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("CRM_LOG_FORMAT: {0}")]
    LogFormat(#[from] ParseLogFormatError),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub credentials: Credentials,
    pub log_format: LogFormat,
    /// Set when either credential fell back to its built-in default.
    pub default_credentials: bool,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test maps).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup("CRM_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::BindAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let log_format = match lookup("CRM_LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        let username = lookup("CRM_USERNAME");
        let password = lookup("CRM_PASSWORD");
        let default_credentials = username.is_none() || password.is_none();
        let credentials = Credentials::new(
            username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password.unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        );

        Ok(Self {
            bind_addr,
            credentials,
            log_format,
            default_credentials,
        })
    }
}
