//! Provider configuration and credential set.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default Google OAuth2 token endpoint.
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Default Google Ads API endpoint.
pub const GOOGLE_ADS_ENDPOINT: &str = "https://googleads.googleapis.com";

/// Google Ads API version used for keyword-planning calls.
pub const GOOGLE_ADS_API_VERSION: &str = "v19";

/// Errors loading or validating the credential set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    /// A required environment variable is absent.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A credential field failed validation.
    #[error("invalid credentials: {0}")]
    Invalid(&'static str),
}

/// The service-wide credential set for Google Ads API access.
///
/// Loaded once at startup and immutable for the process lifetime. There is
/// no multi-tenant storage: a single fixed set authorizes every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Google Ads developer token.
    pub developer_token: String,
    /// OAuth2 client ID.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// Long-lived refresh token exchanged for access tokens.
    pub refresh_token: String,
    /// Manager account (login customer) ID, digits only.
    pub login_customer_id: String,
}

impl Credentials {
    /// Creates a new credential set.
    ///
    /// Dashes in the customer ID are stripped, since the API expects the
    /// bare digits while operators commonly paste the `123-456-7890` form.
    pub fn new(
        developer_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
        login_customer_id: impl Into<String>,
    ) -> Self {
        Self {
            developer_token: developer_token.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            login_customer_id: login_customer_id.into().replace('-', ""),
        }
    }

    /// Loads the credential set from environment variables.
    ///
    /// Absence of any required variable is a startup-time fatal error, not
    /// a per-request error.
    pub fn from_env() -> Result<Self, CredentialsError> {
        Ok(Self::new(
            require_var("DEVELOPER_TOKEN")?,
            require_var("CLIENT_ID")?,
            require_var("CLIENT_SECRET")?,
            require_var("REFRESH_TOKEN")?,
            require_var("LOGIN_CUSTOMER_ID")?,
        ))
    }

    /// Validates that every credential field is non-empty and the customer
    /// ID is numeric.
    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.developer_token.is_empty() {
            return Err(CredentialsError::Invalid("developer_token is required"));
        }
        if self.client_id.is_empty() {
            return Err(CredentialsError::Invalid("client_id is required"));
        }
        if self.client_secret.is_empty() {
            return Err(CredentialsError::Invalid("client_secret is required"));
        }
        if self.refresh_token.is_empty() {
            return Err(CredentialsError::Invalid("refresh_token is required"));
        }
        if self.login_customer_id.is_empty()
            || !self.login_customer_id.chars().all(|c| c.is_ascii_digit())
        {
            return Err(CredentialsError::Invalid(
                "login_customer_id must be a numeric customer id",
            ));
        }
        Ok(())
    }
}

fn require_var(name: &'static str) -> Result<String, CredentialsError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CredentialsError::MissingVar(name)),
    }
}

/// Configuration for the Google Ads keyword-planning client.
#[derive(Debug, Clone)]
pub struct GoogleAdsConfig {
    /// The credential set.
    pub credentials: Credentials,

    /// API endpoint base URL.
    pub endpoint: String,

    /// API version segment.
    pub api_version: String,

    /// OAuth2 token endpoint URL.
    pub token_url: String,

    /// Timeout applied to every outbound call.
    pub timeout: Duration,

    /// Maximum attempts for transient failures (first try included).
    pub max_retries: u32,

    /// Page size requested per keyword-ideas page.
    pub page_size: u32,

    /// Cap on the total number of ideas collected across pages.
    pub max_results: usize,

    /// Safety margin before token expiry at which a refresh is forced.
    pub token_margin: Duration,
}

impl GoogleAdsConfig {
    /// Creates a configuration with domain defaults.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: GOOGLE_ADS_ENDPOINT.to_string(),
            api_version: GOOGLE_ADS_API_VERSION.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            timeout: Duration::from_secs(15),
            max_retries: 3,
            page_size: 1000,
            max_results: 500,
            token_margin: Duration::from_secs(30),
        }
    }

    /// Builder: set the outbound call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: set the transient retry bound.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Builder: set the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Builder: set the API endpoint (used by tests against a local stub).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Builder: set the token endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), CredentialsError> {
        self.credentials.validate()?;
        if self.max_retries == 0 {
            return Err(CredentialsError::Invalid("max_retries must be at least 1"));
        }
        Ok(())
    }
}
