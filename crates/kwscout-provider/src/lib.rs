//! Keyword-planning provider access layer.
//!
//! This crate owns everything between the HTTP orchestrator and the Google
//! Ads API:
//!
//! - [`TokenStore`] - single-slot OAuth2 access-token cache with
//!   single-flight refresh
//! - [`GoogleAdsClient`] - authenticated keyword-idea calls with bounded
//!   retry/backoff and failure classification
//! - [`normalize`] - pure pipeline from the raw provider schema to
//!   [`KeywordIdea`](kwscout_core::KeywordIdea)
//! - [`KeywordSource`] - the trait seam the orchestrator consumes
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐      ┌─────────────────────┐
//! │ Authorization    │      │ Google Ads API      │
//! │ server (OAuth2)  │      │ (keyword planning)  │
//! └───────┬──────────┘      └─────────┬───────────┘
//!         │ refresh exchange          │ generateKeywordIdeas
//!         ▼                           ▼
//! ┌──────────────────┐      ┌─────────────────────┐
//! │ TokenStore       │◄─────┤ GoogleAdsClient     │
//! └──────────────────┘      └─────────┬───────────┘
//!                                     │ RawIdeaResponse
//!                                     ▼ normalize()
//!                           ┌─────────────────────┐
//!                           │ Vec<KeywordIdea>    │
//!                           └─────────────────────┘
//! ```

pub mod backoff;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod oauth;
pub mod raw;
pub mod retry;
pub mod source;
pub mod targeting;
pub mod token;

pub use backoff::{BackoffPolicy, ExponentialBackoff};
pub use client::GoogleAdsClient;
pub use config::{Credentials, CredentialsError, GoogleAdsConfig};
pub use error::{AuthError, ErrorKind, ProviderError, ProviderResult, SourceError, SourceResult};
pub use normalize::normalize;
pub use oauth::OAuthClient;
pub use raw::{RawIdeaMetrics, RawIdeaResponse, RawKeywordIdea, RawMonthlyVolume};
pub use retry::retry_with_policy;
pub use source::{BoxFuture, KeywordSource};
pub use token::{AccessToken, TokenExchanger, TokenStore};
