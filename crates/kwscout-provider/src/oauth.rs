//! OAuth2 refresh-token exchange against the authorization server.
//!
//! The service holds a single long-lived refresh token obtained out of
//! band; this module exchanges it for short-lived access tokens. There is
//! no interactive authorization flow here. Only an actual rejection by the
//! authorization server is an auth failure; a timeout or connection error
//! on the way there classifies as transient, like any outbound call.

use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::config::Credentials;
use crate::error::{AuthError, ProviderError, SourceResult};
use crate::source::BoxFuture;
use crate::token::{AccessToken, TokenExchanger};

/// Lifetime assumed when the token response omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// OAuth2 client performing the refresh-token grant.
#[derive(Debug)]
pub struct OAuthClient {
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Creates a new OAuth client for the given credential set.
    pub fn new(credentials: &Credentials, token_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            token_url: token_url.into(),
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            refresh_token: credentials.refresh_token.clone(),
            http_client,
        }
    }

    /// Performs one refresh-token exchange.
    ///
    /// A non-success status is terminal: the refresh token or client
    /// credentials are wrong and retrying cannot help. A transport failure
    /// reaching the token endpoint is transient and retryable.
    async fn exchange(&self) -> SourceResult<AccessToken> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::unavailable("token refresh timed out")
                } else {
                    ProviderError::unavailable(format!("token refresh request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ProviderError::unavailable(format!("failed to read token response: {e}"))
        })?;

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        info!("obtained fresh access token from authorization server");
        Ok(AccessToken::new(
            token_response.access_token,
            token_response
                .expires_in
                .unwrap_or(DEFAULT_EXPIRES_IN_SECS),
        ))
    }
}

impl TokenExchanger for OAuthClient {
    fn refresh(&self) -> BoxFuture<'_, SourceResult<AccessToken>> {
        Box::pin(self.exchange())
    }
}

/// Response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    #[allow(dead_code)]
    token_type: Option<String>,
}
