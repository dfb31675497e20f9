//! HTTP service: request orchestrator and axum routing layer.
//!
//! This crate wires the provider access layer to the outside world:
//! - Environment-sourced configuration (startup-fatal when incomplete)
//! - The [`KeywordService`] orchestrator: validate, fetch, normalize
//! - A thin axum router mapping the error taxonomy to status codes
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kwscout_provider::GoogleAdsClient;
//! use kwscout_server::{AppState, KeywordService, ServerConfig, router};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let client = GoogleAdsClient::new(config.provider.clone())?;
//! let service = Arc::new(KeywordService::new(Arc::new(client)));
//! let app = router(AppState { service });
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod http;
mod service;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use http::{ApiError, AppState, router};
pub use service::{KeywordService, ServiceError};
