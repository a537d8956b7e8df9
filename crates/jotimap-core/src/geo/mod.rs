//! Planar geometry helpers for the Netherlands map overlay.
//!
//! All functions here are pure: no I/O, no shared state, identical output
//! for identical input.

mod hull;
mod input;
mod rd;
mod region;

pub use hull::{convex_hull, cross};
pub use input::{parse_coord_input, parse_coord_input_detailed, CoordinateSystem, ParsedCoordinate};
pub use rd::{rd_to_wgs84, RdCoordinate, RD_ORIGIN_LAT, RD_ORIGIN_LNG, RD_ORIGIN_X, RD_ORIGIN_Y};
pub use region::{is_within_netherlands, BoundingBox, NETHERLANDS_BOUNDS};

use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `true` when both axes lie within the WGS84 degree ranges.
    #[must_use]
    pub fn is_valid_wgs84(&self) -> bool {
        self.lat.abs() <= 90.0 && self.lng.abs() <= 180.0
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}
