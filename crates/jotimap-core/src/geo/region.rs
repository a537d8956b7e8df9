use serde::Serialize;

use super::Point;

/// Axis-aligned lat/lng rectangle, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }
}

/// Coarse box around the Netherlands. Also covers slivers of Belgium,
/// Germany and the North Sea; only good enough to flag typos.
pub const NETHERLANDS_BOUNDS: BoundingBox = BoundingBox {
    min_lat: 50.5,
    max_lat: 53.7,
    min_lng: 3.3,
    max_lng: 7.3,
};

/// Flags points that are probably not meant to be in the Netherlands.
///
/// A classification, not a validation: callers warn, they do not reject.
#[must_use]
pub fn is_within_netherlands(point: &Point) -> bool {
    NETHERLANDS_BOUNDS.contains(point)
}
