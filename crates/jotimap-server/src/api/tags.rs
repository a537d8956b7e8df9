use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use jotimap_core::{ColorTag, TagAssignments};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AssignTagRequest {
    tag: String,
}

#[derive(Debug, Serialize)]
pub(super) struct TagItem {
    pub id: String,
    pub tag: ColorTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<ColorTag>,
}

pub(super) async fn list_tags(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<TagAssignments>> {
    let tags = state.tags.read().await.clone();
    ApiResponse::new(req_id.0, tags)
}

pub(super) async fn assign_tag(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
    body: Result<Json<AssignTagRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TagItem>>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "group id must be non-empty",
        ));
    }
    let Json(request) =
        body.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;
    let tag: ColorTag = request
        .tag
        .parse()
        .map_err(|e: jotimap_core::tags::UnknownColorTag| {
            ApiError::new(req_id.0.clone(), "validation_error", e.to_string())
        })?;

    let previous = state.tags.write().await.assign(id.clone(), tag);
    tracing::info!(group_id = %id, %tag, ?previous, "color tag assigned");

    Ok(ApiResponse::new(req_id.0, TagItem { id, tag, previous }))
}

pub(super) async fn remove_tag(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TagItem>>, ApiError> {
    let Some(tag) = state.tags.write().await.remove(&id) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("group {id} has no color tag"),
        ));
    };
    tracing::info!(group_id = %id, %tag, "color tag removed");

    Ok(ApiResponse::new(
        req_id.0,
        TagItem {
            id,
            tag,
            previous: None,
        },
    ))
}
