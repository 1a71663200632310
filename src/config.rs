// Process configuration loaded from the environment
//
// Variables (all optional):
//   BASTION_ADDR               listen address, default 0.0.0.0:8080
//   BASTION_LOG_LEVEL          filter used when RUST_LOG is unset, default "debug"
//   BASTION_INTERNAL_ERR_MSG   message returned for masked 500 responses
//   BASTION_DISABLE_PING       "true"/"1" removes the /ping route
//   BASTION_REQUEST_ID_HEADER  header carrying the request id, default x-request-id
//   APP_ENV / APP_ENVIRONMENT  "production" or "prod" enables production mode

use std::net::{AddrParseError, SocketAddr};

use axum::http::header::{HeaderName, InvalidHeaderName};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const DEFAULT_INTERNAL_ERR_MSG: &str = "looks like something went wrong";
pub const DEFAULT_REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BASTION_ADDR `{value}`: {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid BASTION_REQUEST_ID_HEADER `{value}`: {source}")]
    InvalidRequestIdHeader {
        value: String,
        #[source]
        source: InvalidHeaderName,
    },
}

/// Application settings shared by the server and its middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub log_level: String,
    pub production: bool,
    pub internal_err_msg: String,
    pub disable_ping: bool,
    pub request_id_header: HeaderName,
}

impl AppConfig {
    /// Loads settings from the process environment (after `.env`, if any).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_value = lookup("BASTION_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidAddr {
                value: addr_value.clone(),
                source,
            })?;

        let header_value = lookup("BASTION_REQUEST_ID_HEADER")
            .unwrap_or_else(|| DEFAULT_REQUEST_ID_HEADER.to_string());
        let request_id_header = header_value
            .parse::<HeaderName>()
            .map_err(|source| ConfigError::InvalidRequestIdHeader {
                value: header_value.clone(),
                source,
            })?;

        let environment = lookup("APP_ENV")
            .filter(|v| !v.is_empty())
            .or_else(|| lookup("APP_ENVIRONMENT"))
            .unwrap_or_default();

        Ok(Self {
            addr,
            log_level: lookup("BASTION_LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            production: matches!(environment.as_str(), "production" | "prod"),
            internal_err_msg: lookup("BASTION_INTERNAL_ERR_MSG")
                .unwrap_or_else(|| DEFAULT_INTERNAL_ERR_MSG.to_string()),
            disable_ping: lookup("BASTION_DISABLE_PING")
                .is_some_and(|v| matches!(v.as_str(), "1" | "true")),
            request_id_header,
        })
    }

    /// Installs the global tracing subscriber.
    ///
    /// `RUST_LOG` wins over `log_level`. Production mode logs JSON lines,
    /// otherwise human-readable output. Subsequent calls are no-ops.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let _ = if self.production {
            builder.json().with_target(false).try_init()
        } else {
            builder.try_init()
        };
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            production: false,
            internal_err_msg: DEFAULT_INTERNAL_ERR_MSG.to_string(),
            disable_ping: false,
            request_id_header: HeaderName::from_static(DEFAULT_REQUEST_ID_HEADER),
        }
    }
}
