use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use jotimap_core::{convex_hull, territories, Point, Territory};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{fetch_groups, ApiError, ApiResponse, AppState, SourceQuery};

#[derive(Debug, Deserialize)]
pub(super) struct HullRequest {
    points: Vec<Point>,
}

#[derive(Debug, Serialize)]
pub(super) struct HullItem {
    pub hull: Vec<Point>,
    /// `false` when the hull degenerates to a point or a segment.
    pub polygon: bool,
}

pub(super) async fn compute_hull(
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<HullRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<HullItem>>, ApiError> {
    let Json(request) =
        body.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;

    let hull = convex_hull(&request.points);
    let polygon = hull.len() >= jotimap_core::territory::MIN_POLYGON_POINTS;
    Ok(ApiResponse::new(req_id.0, HullItem { hull, polygon }))
}

pub(super) async fn list_territories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SourceQuery>,
) -> Result<Json<ApiResponse<Vec<Territory>>>, ApiError> {
    let groups = fetch_groups(&state, &query, &req_id.0).await?;
    let data = territories(&groups, &*state.tags.read().await);
    Ok(ApiResponse::new(req_id.0, data))
}
