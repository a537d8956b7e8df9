//! Rendering seam between the geometry core and whatever draws the map.
//!
//! The core only hands out plain data. A renderer decides how markers and
//! territories are displayed; [`GeoJsonRenderer`] is the built-in strategy
//! used by the HTTP API and CLI.

use serde_json::{json, Map, Value};

use crate::geo::{is_within_netherlands, Point};
use crate::record::ParsedGroup;
use crate::tags::{ColorTag, TagAssignments};
use crate::territory::{territories, Territory};

pub trait OverlayRenderer {
    type Output;

    /// Called once per group, in input order.
    fn marker(&mut self, group: &ParsedGroup, tag: Option<ColorTag>, in_region: bool);

    /// Called once per territory after all markers.
    fn territory(&mut self, territory: &Territory);

    fn finish(self) -> Self::Output;
}

/// Feed every group and every territory through `renderer`.
pub fn render_overlay<R: OverlayRenderer>(
    mut renderer: R,
    groups: &[ParsedGroup],
    tags: &TagAssignments,
) -> R::Output {
    for group in groups {
        renderer.marker(
            group,
            tags.get(&group.id),
            is_within_netherlands(&group.position),
        );
    }
    for territory in territories(groups, tags) {
        renderer.territory(&territory);
    }
    renderer.finish()
}

/// Builds a GeoJSON `FeatureCollection`.
#[derive(Debug, Default)]
pub struct GeoJsonRenderer {
    features: Vec<Value>,
}

impl GeoJsonRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// GeoJSON positions are `[lng, lat]`.
fn position(point: &Point) -> Value {
    json!([point.lng, point.lat])
}

impl OverlayRenderer for GeoJsonRenderer {
    type Output = Value;

    fn marker(&mut self, group: &ParsedGroup, tag: Option<ColorTag>, in_region: bool) {
        let mut properties = Map::new();
        properties.insert("kind".into(), json!("group"));
        properties.insert("id".into(), json!(group.id));
        properties.insert("name".into(), json!(group.name));
        properties.insert("tag".into(), json!(tag));
        properties.insert("within_netherlands".into(), json!(in_region));
        for (key, value) in [
            ("accomodation", &group.accomodation),
            ("street", &group.street),
            ("housenumber", &group.housenumber),
            ("housenumber_addition", &group.housenumber_addition),
            ("postcode", &group.postcode),
            ("city", &group.city),
        ] {
            if let Some(value) = value {
                properties.insert(key.into(), value.clone());
            }
        }

        self.features.push(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": position(&group.position)},
            "properties": properties,
        }));
    }

    fn territory(&mut self, territory: &Territory) {
        let mut ring: Vec<Value> = territory.hull.iter().map(position).collect();
        if let Some(first) = ring.first().cloned() {
            ring.push(first);
        }

        self.features.push(json!({
            "type": "Feature",
            "geometry": {"type": "Polygon", "coordinates": [ring]},
            "properties": {"kind": "territory", "tag": territory.tag},
        }));
    }

    fn finish(self) -> Value {
        json!({"type": "FeatureCollection", "features": self.features})
    }
}
