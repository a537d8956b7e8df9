mod coordinates;
mod groups;
mod overlay;
mod subscriptions;
mod tags;
mod territories;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use jotimap_core::TagAssignments;
use jotimap_subscriptions::{SubscriptionsClient, SubscriptionsError, SubscriptionsSource};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<SubscriptionsClient>,
    pub tags: Arc<RwLock<TagAssignments>>,
    /// Snapshot used for `?archive=1` without `ts`.
    pub default_archive_ts: Arc<str>,
}

impl AppState {
    pub fn new(client: SubscriptionsClient, tags: TagAssignments, default_archive_ts: &str) -> Self {
        Self {
            client: Arc::new(client),
            tags: Arc::new(RwLock::new(tags)),
            default_archive_ts: Arc::from(default_archive_ts),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(request_id: String, data: T) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(request_id),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// `?archive=1&ts=20231005142154` on every route that reads the feed.
#[derive(Debug, Default, Deserialize)]
pub(super) struct SourceQuery {
    pub archive: Option<String>,
    pub ts: Option<String>,
}

impl SourceQuery {
    pub(super) fn resolve(&self, default_ts: &str) -> Result<SubscriptionsSource, SubscriptionsError> {
        SubscriptionsSource::from_query(self.archive.as_deref(), self.ts.as_deref(), default_ts)
    }
}

pub(super) fn map_upstream_error(request_id: String, error: &SubscriptionsError) -> ApiError {
    match error {
        SubscriptionsError::InvalidTimestamp(_) => {
            ApiError::new(request_id, "validation_error", error.to_string())
        }
        e if e.is_bad_gateway() => {
            tracing::warn!(error = %e, "upstream returned an unusable response");
            ApiError::new(request_id, "upstream_error", "upstream returned an unusable response")
        }
        e => {
            tracing::error!(error = %e, "upstream request failed");
            ApiError::new(request_id, "internal_error", "upstream request failed")
        }
    }
}

/// Resolves the source from `query` and fetches its parsed groups.
pub(super) async fn fetch_groups(
    state: &AppState,
    query: &SourceQuery,
    request_id: &str,
) -> Result<Vec<jotimap_core::ParsedGroup>, ApiError> {
    let source = query
        .resolve(&state.default_archive_ts)
        .map_err(|e| map_upstream_error(request_id.to_owned(), &e))?;
    state
        .client
        .fetch_groups(&source)
        .await
        .map_err(|e| map_upstream_error(request_id.to_owned(), &e))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn limited_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/jotihunt/subscriptions",
            get(subscriptions::passthrough),
        )
        .route("/api/v1/groups", get(groups::list_groups))
        .route(
            "/api/v1/coordinates/parse",
            get(coordinates::parse_coordinates),
        )
        .route("/api/v1/coordinates/rd", get(coordinates::convert_rd))
        .route("/api/v1/hull", post(territories::compute_hull))
        .route("/api/v1/territories", get(territories::list_territories))
        .route("/api/v1/tags", get(tags::list_tags))
        .route(
            "/api/v1/tags/{id}",
            put(tags::assign_tag).delete(tags::remove_tag),
        )
        .route("/api/v1/overlay", get(overlay::get_overlay))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(limited_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    ApiResponse::new(req_id.0, HealthData { status: "ok" })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
