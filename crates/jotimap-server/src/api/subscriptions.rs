//! Raw passthrough of the upstream feed for the map front end.
//!
//! Unlike `/api/v1`, responses here are not enveloped: success is the
//! upstream body byte for byte and failures are `{"error": "..."}`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jotimap_subscriptions::SubscriptionsError;
use serde_json::json;

use super::{AppState, SourceQuery};

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn status_for(error: &SubscriptionsError) -> StatusCode {
    match error {
        SubscriptionsError::InvalidTimestamp(_) => StatusCode::BAD_REQUEST,
        e if e.is_bad_gateway() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(super) async fn passthrough(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Response {
    let result = match query.resolve(&state.default_archive_ts) {
        Ok(source) => state.client.fetch_verbatim(&source).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::warn!(error = %e, %status, "subscriptions passthrough failed");
            }
            error_response(status, e.to_string())
        }
    }
}
