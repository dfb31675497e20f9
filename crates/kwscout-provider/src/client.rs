//! Google Ads keyword-planning API client.
//!
//! Performs authenticated `generateKeywordIdeas` calls on behalf of the
//! manager account, classifies failures, and applies the retry policy:
//! transient failures back off and retry up to the configured bound, a
//! provider-reported auth failure forces exactly one token refresh, and
//! everything else fails immediately.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use kwscout_core::KeywordQuery;

use crate::backoff::{BackoffPolicy, ExponentialBackoff};
use crate::config::{CredentialsError, GoogleAdsConfig};
use crate::error::{ErrorKind, ProviderError, SourceError, SourceResult};
use crate::oauth::OAuthClient;
use crate::raw::RawIdeaResponse;
use crate::retry::retry_with_policy;
use crate::source::{BoxFuture, KeywordSource};
use crate::targeting::{geo_target_constant, language_constant};
use crate::token::TokenStore;

/// Client for the Google Ads Keyword Plan Idea service.
pub struct GoogleAdsClient {
    config: GoogleAdsConfig,
    token_store: TokenStore,
    backoff: Box<dyn BackoffPolicy>,
    http_client: reqwest::Client,
}

impl GoogleAdsClient {
    /// Creates a new client, wiring up the OAuth exchanger and token store.
    pub fn new(config: GoogleAdsConfig) -> Result<Self, CredentialsError> {
        config.validate()?;

        let oauth = OAuthClient::new(&config.credentials, &config.token_url, config.timeout);
        let token_store = TokenStore::new(Arc::new(oauth), config.token_margin);

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Ok(Self {
            config,
            token_store,
            backoff: Box::new(ExponentialBackoff::default()),
            http_client,
        })
    }

    /// Replaces the backoff policy.
    #[must_use]
    pub fn with_backoff(mut self, backoff: impl BackoffPolicy + 'static) -> Self {
        self.backoff = Box::new(backoff);
        self
    }

    /// Fetches keyword ideas for a validated query, following pagination up
    /// to the configured result cap.
    pub async fn fetch_keyword_ideas(
        &self,
        query: &KeywordQuery,
    ) -> SourceResult<RawIdeaResponse> {
        let mut results = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(query, page_token.take()).await?;
            let fetched = page.results.len();
            results.extend(page.results);

            // An empty page means the provider has nothing more, whatever
            // its continuation token claims.
            if fetched == 0 || results.len() >= self.config.max_results {
                results.truncate(self.config.max_results);
                break;
            }
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(count = results.len(), "fetched keyword ideas");
        Ok(RawIdeaResponse {
            results,
            next_page_token: None,
        })
    }

    /// Fetches one page, with transient retries and the single forced
    /// refresh on a provider-reported auth failure.
    async fn fetch_page(
        &self,
        query: &KeywordQuery,
        page_token: Option<String>,
    ) -> SourceResult<RawIdeaResponse> {
        let body = self.build_request_body(query, page_token)?;
        let mut forced_refresh = false;

        loop {
            let result = retry_with_policy(
                self.backoff.as_ref(),
                self.config.max_retries,
                |e: &SourceError| matches!(e, SourceError::Provider(p) if p.is_retryable()),
                |_attempt| self.send_page(&body),
            )
            .await;

            match result {
                Err(SourceError::Provider(e))
                    if e.kind() == ErrorKind::AuthFailure && !forced_refresh =>
                {
                    warn!("provider rejected the access token, forcing one refresh");
                    self.token_store.invalidate().await;
                    forced_refresh = true;
                }
                other => return other,
            }
        }
    }

    /// Sends a single `generateKeywordIdeas` call.
    async fn send_page(&self, body: &str) -> SourceResult<RawIdeaResponse> {
        let token = self.token_store.get_valid_token().await?;

        let url = format!(
            "{}/{}/customers/{}:generateKeywordIdeas",
            self.config.endpoint,
            self.config.api_version,
            self.config.credentials.login_customer_id
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token.secret())
            .header("developer-token", &self.config.credentials.developer_token)
            .header(
                "login-customer-id",
                &self.config.credentials.login_customer_id,
            )
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| SourceError::Provider(classify_transport(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &error_body).into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::unavailable(format!("failed to read response: {e}")))?;

        let parsed: RawIdeaResponse = serde_json::from_str(&text).map_err(|e| {
            ProviderError::unknown(format!("failed to parse keyword ideas response: {e}"))
        })?;
        Ok(parsed)
    }

    /// Builds the JSON request body for one page.
    fn build_request_body(
        &self,
        query: &KeywordQuery,
        page_token: Option<String>,
    ) -> Result<String, ProviderError> {
        let request = GenerateKeywordIdeasRequest {
            language: language_constant(query.language.as_deref()),
            geo_target_constants: vec![geo_target_constant(query.location.as_deref())],
            keyword_seed: KeywordSeed {
                keywords: query.trimmed_seeds(),
            },
            page_size: self.config.page_size,
            page_token,
        };

        serde_json::to_string(&request)
            .map_err(|e| ProviderError::unknown(format!("failed to encode request: {e}")))
    }
}

impl KeywordSource for GoogleAdsClient {
    fn name(&self) -> &str {
        "google-ads"
    }

    fn fetch_ideas(&self, query: KeywordQuery) -> BoxFuture<'_, SourceResult<RawIdeaResponse>> {
        Box::pin(async move { self.fetch_keyword_ideas(&query).await })
    }
}

/// Classifies a transport-level failure. All of these are transient.
fn classify_transport(error: &reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::unavailable("request timed out")
    } else if error.is_connect() {
        ProviderError::unavailable(format!("connection failed: {error}"))
    } else {
        ProviderError::unavailable(format!("request failed: {error}"))
    }
}

/// Classifies a non-success HTTP status into a failure kind.
fn classify_status(status: reqwest::StatusCode, body: &str) -> ProviderError {
    let detail = truncate_body(body);
    match status {
        reqwest::StatusCode::TOO_MANY_REQUESTS => {
            ProviderError::rate_limited(format!("rate limit exceeded: {detail}"))
        }
        reqwest::StatusCode::UNAUTHORIZED => {
            ProviderError::auth_failure("access token expired or invalid")
        }
        // Quota exhaustion arrives as 403 with a RESOURCE_EXHAUSTED error code.
        reqwest::StatusCode::FORBIDDEN if body.contains("RESOURCE_EXHAUSTED") => {
            ProviderError::rate_limited(format!("quota exhausted: {detail}"))
        }
        reqwest::StatusCode::FORBIDDEN => {
            ProviderError::invalid_request(format!("permission denied: {detail}"))
        }
        reqwest::StatusCode::BAD_REQUEST => {
            ProviderError::invalid_request(format!("provider rejected request: {detail}"))
        }
        s if s.is_server_error() => {
            ProviderError::unavailable(format!("server error ({s}): {detail}"))
        }
        s => ProviderError::unknown(format!("unexpected status {s}: {detail}")),
    }
}

/// Caps an error body for log and message hygiene.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 300;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    }
}

/// Request body for `customers/{id}:generateKeywordIdeas`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateKeywordIdeasRequest {
    language: String,
    geo_target_constants: Vec<String>,
    keyword_seed: KeywordSeed,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeywordSeed {
    keywords: Vec<String>,
}
