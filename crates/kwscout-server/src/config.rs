//! Server configuration from environment variables.
//!
//! Credential variables are required and their absence is a startup-time
//! fatal error. Quantitative knobs (timeout, retry bound) have domain
//! defaults and optional overrides.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use kwscout_provider::{Credentials, GoogleAdsConfig};

use crate::error::{ServerError, ServerResult};

/// Default listen port.
const DEFAULT_PORT: u16 = 8080;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,

    /// Provider client configuration, credentials included.
    pub provider: GoogleAdsConfig,
}

impl ServerConfig {
    /// Loads the full configuration from the environment.
    ///
    /// Required: `DEVELOPER_TOKEN`, `CLIENT_ID`, `CLIENT_SECRET`,
    /// `REFRESH_TOKEN`, `LOGIN_CUSTOMER_ID`. Optional: `PORT`,
    /// `KWSCOUT_TIMEOUT_SECS`, `KWSCOUT_MAX_RETRIES`.
    pub fn from_env() -> ServerResult<Self> {
        let credentials =
            Credentials::from_env().map_err(|e| ServerError::config(e.to_string()))?;

        let mut provider = GoogleAdsConfig::new(credentials);

        if let Some(secs) = parse_var::<u64>("KWSCOUT_TIMEOUT_SECS")? {
            provider = provider.with_timeout(Duration::from_secs(secs));
        }
        if let Some(max) = parse_var::<u32>("KWSCOUT_MAX_RETRIES")? {
            provider = provider.with_max_retries(max);
        }

        let port = parse_var::<u16>("PORT")?.unwrap_or(DEFAULT_PORT);

        Ok(Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            provider,
        })
    }
}

/// Parses an optional environment variable, failing on unparseable values
/// rather than silently ignoring them.
fn parse_var<T: std::str::FromStr>(name: &str) -> ServerResult<Option<T>> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ServerError::config(format!("invalid value for {name}: {value}"))),
        _ => Ok(None),
    }
}
