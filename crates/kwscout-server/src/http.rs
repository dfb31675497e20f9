//! HTTP routing layer.
//!
//! Thin axum router over the [`KeywordService`]: three routes and a mapping
//! from the internal error taxonomy to stable external status codes. The
//! orchestrator does the real work; nothing here reinterprets failures.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRequest, Request, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use kwscout_core::{KeywordIdea, KeywordQuery};
use kwscout_provider::ErrorKind;

use crate::service::{KeywordService, ServiceError};

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The request orchestrator.
    pub service: Arc<KeywordService>,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/keywords/ideas", post(keyword_ideas))
        .with_state(state)
}

/// `GET /` - endpoint listing.
async fn home() -> Json<serde_json::Value> {
    Json(json!({
        "message": "kwscout keyword research service",
        "endpoints": {
            "/health": "liveness check",
            "/keywords/ideas": "POST seed keywords, get keyword ideas"
        }
    }))
}

/// `GET /health` - static liveness body, touches no other component.
async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy"}))
}

/// `POST /keywords/ideas` - the keyword-research endpoint.
async fn keyword_ideas(
    State(state): State<AppState>,
    ApiJson(query): ApiJson<KeywordQuery>,
) -> Result<Json<Vec<KeywordIdea>>, ApiError> {
    let ideas = state.service.handle(query).await?;
    Ok(Json(ideas))
}

/// `Json` extractor that keeps the `{code, message}` error body when the
/// request body itself is unreadable, instead of axum's plain-text default.
struct ApiJson<T>(T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = (StatusCode, Json<ErrorBody>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err((
                rejection.status(),
                Json(ErrorBody {
                    code: "invalid_request",
                    message: rejection.body_text(),
                }),
            )),
        }
    }
}

/// JSON error body returned for every failure.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

/// A service error carried to the HTTP boundary.
#[derive(Debug)]
pub struct ApiError {
    error: ServiceError,
}

impl ApiError {
    /// Maps the internal error taxonomy to a status code and a stable
    /// external error code.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.error {
            ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            ServiceError::Auth(_) => (StatusCode::BAD_GATEWAY, "upstream_auth_failed"),
            ServiceError::Provider(e) => match e.kind() {
                ErrorKind::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
                ErrorKind::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable"),
                ErrorKind::InvalidRequest => (StatusCode::BAD_GATEWAY, "upstream_rejected"),
                ErrorKind::AuthFailure => (StatusCode::BAD_GATEWAY, "upstream_auth_failed"),
                ErrorKind::Unknown => (StatusCode::BAD_GATEWAY, "upstream_error"),
            },
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        Self { error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Auth failures usually mean operator misconfiguration; log them
        // at error level so they stand out from caller mistakes.
        match &self.error {
            ServiceError::Auth(e) => error!(%e, "upstream authentication failed"),
            ServiceError::Provider(e) => warn!(kind = e.kind().as_str(), %e, "provider call failed"),
            ServiceError::Validation(e) => warn!(%e, "rejected invalid request"),
        }

        let body = ErrorBody {
            code,
            message: self.error.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kwscout_core::ValidationError;
    use kwscout_provider::{
        AuthError, BoxFuture, KeywordSource, ProviderError, RawIdeaMetrics, RawIdeaResponse,
        RawKeywordIdea, SourceResult,
    };

    struct StubSource {
        calls: AtomicUsize,
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
            Box::pin(async {
                Ok(RawIdeaResponse {
                    results: vec![RawKeywordIdea {
                        text: Some("running shoes".to_string()),
                        keyword_idea_metrics: Some(RawIdeaMetrics {
                            avg_monthly_searches: Some(10_000),
                            competition: Some("HIGH".to_string()),
                            ..Default::default()
                        }),
                    }],
                    next_page_token: None,
                })
            })
        }
    }

    fn state_with_stub() -> (AppState, Arc<StubSource>) {
        let source = Arc::new(StubSource {
            calls: AtomicUsize::new(0),
        });
        let service = Arc::new(KeywordService::new(source.clone()));
        (AppState { service }, source)
    }

    #[tokio::test]
    async fn health_returns_static_body() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn home_lists_endpoints() {
        let Json(body) = home().await;
        assert!(body["endpoints"].get("/keywords/ideas").is_some());
    }

    #[tokio::test]
    async fn keyword_ideas_success() {
        let (state, _source) = state_with_stub();
        let query = KeywordQuery::new(vec!["running shoes".to_string()]);

        let Json(ideas) = keyword_ideas(State(state), ApiJson(query)).await.unwrap();
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].keyword, "running shoes");
    }

    #[tokio::test]
    async fn empty_seeds_yield_400_and_no_outbound_call() {
        let (state, source) = state_with_stub();
        let query = KeywordQuery::new(vec![]);

        let err = keyword_ideas(State(state), ApiJson(query)).await.unwrap_err();
        let (status, code) = err.status_and_code();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "invalid_request");
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_body_keeps_error_shape() {
        let req = Request::builder()
            .method("POST")
            .uri("/keywords/ideas")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();

        let Err((status, Json(body))) = ApiJson::<KeywordQuery>::from_request(req, &()).await
        else {
            panic!("expected a rejection for malformed json");
        };

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "invalid_request");
        assert!(!body.message.is_empty());
    }

    #[test]
    fn status_mapping_covers_the_taxonomy() {
        let cases: Vec<(ServiceError, StatusCode, &str)> = vec![
            (
                ValidationError::NoSeedKeywords.into(),
                StatusCode::BAD_REQUEST,
                "invalid_request",
            ),
            (
                AuthError::InvalidResponse("truncated body".to_string()).into(),
                StatusCode::BAD_GATEWAY,
                "upstream_auth_failed",
            ),
            (
                ProviderError::rate_limited("quota").into(),
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
            ),
            (
                ProviderError::unavailable("503").into(),
                StatusCode::SERVICE_UNAVAILABLE,
                "upstream_unavailable",
            ),
            (
                ProviderError::invalid_request("bad arg").into(),
                StatusCode::BAD_GATEWAY,
                "upstream_rejected",
            ),
            (
                ProviderError::auth_failure("expired").into(),
                StatusCode::BAD_GATEWAY,
                "upstream_auth_failed",
            ),
            (
                ProviderError::unknown("???").into(),
                StatusCode::BAD_GATEWAY,
                "upstream_error",
            ),
        ];

        for (error, expected_status, expected_code) in cases {
            let api_error = ApiError::from(error);
            let (status, code) = api_error.status_and_code();
            assert_eq!(status, expected_status);
            assert_eq!(code, expected_code);
        }
    }
}
