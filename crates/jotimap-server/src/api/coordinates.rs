use axum::{extract::Query, Extension, Json};
use jotimap_core::{
    is_within_netherlands, parse_coord_input_detailed, ParsedCoordinate, Point, RdCoordinate,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse};

#[derive(Debug, Deserialize)]
pub(super) struct ParseQuery {
    q: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ParsedCoordinateItem {
    #[serde(flatten)]
    pub parsed: ParsedCoordinate,
    pub within_netherlands: bool,
}

pub(super) async fn parse_coordinates(
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ParseQuery>,
) -> Result<Json<ApiResponse<ParsedCoordinateItem>>, ApiError> {
    let input = query.q.unwrap_or_default();
    let Some(parsed) = parse_coord_input_detailed(&input) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "expected two coordinates: \"lat lng\" or RD \"x y\"",
        ));
    };

    let within_netherlands = is_within_netherlands(&parsed.point);
    Ok(ApiResponse::new(
        req_id.0,
        ParsedCoordinateItem {
            parsed,
            within_netherlands,
        },
    ))
}

/// Raw strings so a bad number becomes an enveloped validation error rather
/// than a bare extractor rejection.
#[derive(Debug, Deserialize)]
pub(super) struct RdQuery {
    x: Option<String>,
    y: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct RdConversionItem {
    pub rd: RdCoordinate,
    pub point: Point,
    pub within_netherlands: bool,
}

fn finite(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(super) async fn convert_rd(
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RdQuery>,
) -> Result<Json<ApiResponse<RdConversionItem>>, ApiError> {
    let (Some(x), Some(y)) = (finite(query.x.as_deref()), finite(query.y.as_deref())) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "x and y must be finite numbers in metres",
        ));
    };

    let rd = RdCoordinate { x, y };
    let point = rd.to_wgs84();
    Ok(ApiResponse::new(
        req_id.0,
        RdConversionItem {
            rd,
            point,
            within_netherlands: is_within_netherlands(&point),
        },
    ))
}
