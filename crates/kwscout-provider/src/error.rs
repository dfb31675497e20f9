//! Error types for provider-API operations.
//!
//! Two families of failure exist here: [`AuthError`] for rejection by the
//! authorization server during the refresh exchange (terminal, never
//! retried), and [`ProviderError`] for classified failures of outbound
//! calls (retried only when the kind is transient). A transport failure
//! reaching the token endpoint is not an auth failure: it classifies as a
//! transient [`ProviderError`] like any other unreachable upstream.

use std::fmt;

use thiserror::Error;

/// The failure class of a provider error.
///
/// Classification decides retry eligibility: only `RateLimited` and
/// `Unavailable` are worth retrying; everything else fails immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rate limit or quota rejection.
    RateLimited,
    /// Transient server failure: timeout, connection error, 5xx.
    Unavailable,
    /// The provider rejected the request: malformed request, invalid
    /// argument, permission denied.
    InvalidRequest,
    /// The provider rejected the access token, despite local expiry
    /// tracking considering it valid.
    AuthFailure,
    /// Anything that could not be classified.
    Unknown,
}

impl ErrorKind {
    /// Returns true if this failure class is transient and the call may be
    /// retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Unavailable)
    }

    /// Returns a stable name for this failure class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::Unavailable => "unavailable",
            Self::InvalidRequest => "invalid_request",
            Self::AuthFailure => "auth_failure",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified failure of the keyword-planning API.
#[derive(Debug, Error)]
pub struct ProviderError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a rate-limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, message)
    }

    /// Creates a transient-unavailability error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }

    /// Creates an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// Creates an auth-failure error.
    pub fn auth_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthFailure, message)
    }

    /// Creates an unclassified error.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the failure class.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// A rejection from the OAuth2 refresh exchange.
///
/// These are terminal for the current request: stale or invalid credentials
/// will not self-correct, so the exchange is never retried. Timeouts and
/// connection failures on the way to the token endpoint are transient and
/// surface as [`ProviderError`] instead.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The authorization server rejected the refresh token or client
    /// credentials.
    #[error("authorization server rejected refresh exchange ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The authorization server returned an unparseable body.
    #[error("invalid token response: {0}")]
    InvalidResponse(String),
}

/// A failure surfaced by a keyword source: either the token lifecycle or
/// the provider call.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Token refresh failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The provider call failed after any applicable retries.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A specialized Result type for keyword-source operations.
pub type SourceResult<T> = Result<T, SourceError>;
