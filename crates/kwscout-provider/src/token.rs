//! Access token cache with single-flight refresh.
//!
//! The token slot is the only shared mutable state in the whole service.
//! Refresh is a critical section: the slot lives behind an async mutex held
//! across the exchange, so when several requests observe an expired token
//! at once, exactly one refresh call reaches the authorization server and
//! the rest wait for its result.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::SourceResult;
use crate::source::BoxFuture;

/// An opaque bearer token with its expiry timestamp.
#[derive(Debug, Clone)]
pub struct AccessToken {
    secret: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a token expiring `expires_in_secs` from now.
    pub fn new(secret: impl Into<String>, expires_in_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            expires_at: Utc::now() + chrono::Duration::seconds(expires_in_secs),
        }
    }

    /// Returns the bearer secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Returns when the token expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the token expires within the given margin.
    ///
    /// A token inside the margin is treated as absent so callers always
    /// hold a token usable for at least the margin.
    pub fn expires_within(&self, margin: Duration) -> bool {
        let margin = chrono::Duration::seconds(margin.as_secs() as i64);
        Utc::now() + margin >= self.expires_at
    }
}

/// Exchanges the long-lived refresh token for a fresh access token.
///
/// Implemented by [`OAuthClient`] against the real authorization server and
/// by counting stubs in tests.
///
/// [`OAuthClient`]: crate::oauth::OAuthClient
pub trait TokenExchanger: Send + Sync {
    /// Performs one refresh exchange.
    ///
    /// A rejection is terminal; implementations must not retry internally.
    /// Transport failures surface as transient provider errors so the
    /// caller's retry loop can take another pass.
    fn refresh(&self) -> BoxFuture<'_, SourceResult<AccessToken>>;
}

/// Single-slot token cache shared by all request handlers.
pub struct TokenStore {
    exchanger: Arc<dyn TokenExchanger>,
    margin: Duration,
    slot: tokio::sync::Mutex<Option<AccessToken>>,
}

impl TokenStore {
    /// Creates a store with an empty slot.
    pub fn new(exchanger: Arc<dyn TokenExchanger>, margin: Duration) -> Self {
        Self {
            exchanger,
            margin,
            slot: tokio::sync::Mutex::new(None),
        }
    }

    /// Returns a token guaranteed usable for at least the safety margin.
    ///
    /// Refreshes when the slot is empty or the cached token's expiry falls
    /// within the margin. The mutex is held across the exchange, which is
    /// what enforces the one-refresh-per-expiry invariant.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`](crate::error::AuthError) if the authorization
    /// server rejects the refresh token or client credentials, and a
    /// transient provider error if the token endpoint could not be reached.
    /// The slot is left as-is either way; a later request will attempt a
    /// fresh exchange.
    pub async fn get_valid_token(&self) -> SourceResult<AccessToken> {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref()
            && !token.expires_within(self.margin)
        {
            return Ok(token.clone());
        }

        debug!("access token absent or expiring, refreshing");
        let token = self.exchanger.refresh().await?;
        info!(expires_at = %token.expires_at(), "access token refreshed");
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Drops the cached token.
    ///
    /// Called when the provider rejects a token that local expiry tracking
    /// still considered valid; the next [`get_valid_token`] call performs a
    /// fresh exchange.
    ///
    /// [`get_valid_token`]: TokenStore::get_valid_token
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}
