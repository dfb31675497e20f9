//! Request orchestrator.
//!
//! The entry point invoked by the HTTP layer: validates the query, fetches
//! raw ideas through the [`KeywordSource`] seam, and normalizes the result.
//! Lower-layer errors pass through unchanged; nothing is cached, every call
//! is a fresh round trip.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use kwscout_core::{KeywordIdea, KeywordQuery, ValidationError};
use kwscout_provider::{AuthError, KeywordSource, ProviderError, SourceError, normalize};

/// Errors surfaced by [`KeywordService::handle`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller's query violated an invariant. No network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The token lifecycle failed. Usually operator misconfiguration.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The provider call failed after any applicable retries.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<SourceError> for ServiceError {
    fn from(error: SourceError) -> Self {
        match error {
            SourceError::Auth(e) => Self::Auth(e),
            SourceError::Provider(e) => Self::Provider(e),
        }
    }
}

/// Orchestrates keyword-idea requests against a [`KeywordSource`].
pub struct KeywordService {
    source: Arc<dyn KeywordSource>,
}

impl KeywordService {
    /// Creates a service over the given source.
    pub fn new(source: Arc<dyn KeywordSource>) -> Self {
        Self { source }
    }

    /// Handles one keyword-idea request.
    ///
    /// Validation happens before anything else; an invalid query fails fast
    /// without touching the network.
    pub async fn handle(&self, query: KeywordQuery) -> Result<Vec<KeywordIdea>, ServiceError> {
        query.validate()?;

        debug!(
            source = self.source.name(),
            seeds = query.seed_keywords.len(),
            "dispatching keyword idea request"
        );

        let raw = self.source.fetch_ideas(query).await?;
        let ideas = normalize(&raw);

        info!(count = ideas.len(), "normalized keyword ideas");
        Ok(ideas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kwscout_core::CompetitionLevel;
    use kwscout_provider::{
        BoxFuture, RawIdeaMetrics, RawIdeaResponse, RawKeywordIdea, RawMonthlyVolume,
        SourceResult,
    };

    /// In-memory source that counts calls and replays a canned response.
    struct StubSource {
        calls: AtomicUsize,
        response: fn() -> SourceResult<RawIdeaResponse>,
    }

    impl StubSource {
        fn new(response: fn() -> SourceResult<RawIdeaResponse>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl KeywordSource for StubSource {
        fn name(&self) -> &str {
            "stub"
        }

        fn fetch_ideas(
            &self,
            _query: KeywordQuery,
        ) -> BoxFuture<'_, SourceResult<RawIdeaResponse>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let response = (self.response)();
            Box::pin(async move { response })
        }
    }

    fn running_shoes_response() -> SourceResult<RawIdeaResponse> {
        let months = [
            "JANUARY", "FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE", "JULY", "AUGUST",
            "SEPTEMBER", "OCTOBER", "NOVEMBER", "DECEMBER",
        ];
        let series = months
            .iter()
            .map(|m| RawMonthlyVolume {
                month: Some(m.to_string()),
                year: Some(2025),
                monthly_searches: Some(10_000),
            })
            .collect();

        Ok(RawIdeaResponse {
            results: vec![RawKeywordIdea {
                text: Some("running shoes".to_string()),
                keyword_idea_metrics: Some(RawIdeaMetrics {
                    avg_monthly_searches: Some(10_000),
                    competition: Some("HIGH".to_string()),
                    monthly_search_volumes: series,
                    ..Default::default()
                }),
            }],
            next_page_token: None,
        })
    }

    #[tokio::test]
    async fn invalid_query_makes_no_source_call() {
        let source = StubSource::new(running_shoes_response);
        let service = KeywordService::new(source.clone());

        let result = service.handle(KeywordQuery::new(vec![])).await;

        assert!(matches!(
            result,
            Err(ServiceError::Validation(ValidationError::NoSeedKeywords))
        ));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn valid_query_fetches_and_normalizes() {
        let source = StubSource::new(running_shoes_response);
        let service = KeywordService::new(source.clone());

        let ideas = service
            .handle(KeywordQuery::new(vec!["running shoes".to_string()]))
            .await
            .unwrap();

        assert_eq!(ideas.len(), 1);
        let idea = &ideas[0];
        assert_eq!(idea.keyword, "running shoes");
        assert_eq!(idea.avg_monthly_searches, 10_000);
        assert_eq!(idea.competition, CompetitionLevel::High);
        assert_eq!(idea.monthly_series.len(), 12);
        assert!(idea.series_is_ordered());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn provider_error_passes_through_unchanged() {
        let source = StubSource::new(|| {
            Err(ProviderError::rate_limited("quota exhausted").into())
        });
        let service = KeywordService::new(source);

        let err = service
            .handle(KeywordQuery::new(vec!["shoes".to_string()]))
            .await
            .unwrap_err();

        match err {
            ServiceError::Provider(e) => {
                assert_eq!(e.kind(), kwscout_provider::ErrorKind::RateLimited);
                assert_eq!(e.message(), "quota exhausted");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn auth_error_passes_through_unchanged() {
        let source = StubSource::new(|| {
            Err(AuthError::Rejected {
                status: 400,
                body: "invalid_grant".to_string(),
            }
            .into())
        });
        let service = KeywordService::new(source);

        let err = service
            .handle(KeywordQuery::new(vec!["shoes".to_string()]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Auth(AuthError::Rejected { status: 400, .. })
        ));
    }
}
