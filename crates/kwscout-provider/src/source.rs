//! KeywordSource trait definition.
//!
//! The seam between the request orchestrator and the concrete provider
//! client. The orchestrator only ever talks to this trait, which keeps the
//! HTTP layer testable against in-memory sources.

use std::future::Future;
use std::pin::Pin;

use kwscout_core::KeywordQuery;

use crate::error::SourceResult;
use crate::raw::RawIdeaResponse;

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe for dynamic dispatch.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A source of keyword ideas.
///
/// Implementations own their authentication state and retry policy; callers
/// get back either a raw provider response or one classified error.
pub trait KeywordSource: Send + Sync {
    /// Returns the name of this source (e.g., "google-ads").
    fn name(&self) -> &str;

    /// Fetches raw keyword ideas for a validated query.
    ///
    /// The query is assumed valid; validation happens in the orchestrator
    /// before any network I/O.
    fn fetch_ideas(&self, query: KeywordQuery) -> BoxFuture<'_, SourceResult<RawIdeaResponse>>;
}
