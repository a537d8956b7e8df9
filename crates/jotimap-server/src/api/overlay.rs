use axum::{
    extract::{Query, State},
    Extension, Json,
};
use jotimap_core::{render_overlay, GeoJsonRenderer};
use serde_json::Value;

use crate::middleware::RequestId;

use super::{fetch_groups, ApiError, ApiResponse, AppState, SourceQuery};

/// GeoJSON `FeatureCollection` of group markers and territory polygons.
pub(super) async fn get_overlay(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SourceQuery>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let groups = fetch_groups(&state, &query, &req_id.0).await?;
    let collection = render_overlay(GeoJsonRenderer::new(), &groups, &*state.tags.read().await);
    Ok(ApiResponse::new(req_id.0, collection))
}
