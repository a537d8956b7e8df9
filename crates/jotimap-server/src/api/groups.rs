use axum::{
    extract::{Query, State},
    Extension, Json,
};
use jotimap_core::{is_within_netherlands, ColorTag, ParsedGroup};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{fetch_groups, ApiError, ApiResponse, AppState, SourceQuery};

#[derive(Debug, Serialize)]
pub(super) struct GroupItem {
    #[serde(flatten)]
    pub group: ParsedGroup,
    pub tag: Option<ColorTag>,
    pub within_netherlands: bool,
}

pub(super) async fn list_groups(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SourceQuery>,
) -> Result<Json<ApiResponse<Vec<GroupItem>>>, ApiError> {
    let groups = fetch_groups(&state, &query, &req_id.0).await?;
    let tags = state.tags.read().await;

    let data = groups
        .into_iter()
        .map(|group| GroupItem {
            tag: tags.get(&group.id),
            within_netherlands: is_within_netherlands(&group.position),
            group,
        })
        .collect();

    Ok(ApiResponse::new(req_id.0, data))
}
