//! Domain core for the Jotihunt map: geometry, record parsing, color-tag
//! territories, overlay rendering and configuration loading.
//!
//! Everything outside [`config`] and [`load_tags`] is pure and synchronous.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod overlay;
pub mod record;
pub mod tags;
pub mod territory;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{
    convex_hull, is_within_netherlands, parse_coord_input, parse_coord_input_detailed,
    rd_to_wgs84, BoundingBox, CoordinateSystem, ParsedCoordinate, Point, RdCoordinate,
    NETHERLANDS_BOUNDS,
};
pub use overlay::{render_overlay, GeoJsonRenderer, OverlayRenderer};
pub use record::{extract_position, parse_group, parse_groups, record_list, ParsedGroup};
pub use tags::{load_tags, ColorTag, TagAssignments};
pub use territory::{group_points_by_tag, territories, Territory};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read tags file {path}: {source}")]
    TagsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tags file: {0}")]
    TagsFileParse(#[from] serde_yaml::Error),

    #[error("tags validation failed: {0}")]
    Validation(String),
}
