//! Rijksdriehoek (RD) grid to WGS84 conversion.
//!
//! Uses the published polynomial approximation around the Amersfoort
//! reference point. Accurate to roughly a metre inside the Netherlands; outside
//! it still yields finite numbers, they just stop meaning anything.

use serde::{Deserialize, Serialize};

use super::Point;

pub const RD_ORIGIN_X: f64 = 155_000.0;
pub const RD_ORIGIN_Y: f64 = 463_000.0;
pub const RD_ORIGIN_LAT: f64 = 52.155_174_4;
pub const RD_ORIGIN_LNG: f64 = 5.387_206_21;

const ARCSECONDS_PER_DEGREE: f64 = 3600.0;
const DELTA_SCALE: f64 = 1e-5;

/// One polynomial term: `coefficient * dx^p * dy^q`, result in arcseconds.
struct Term {
    p: i32,
    q: i32,
    coefficient: f64,
}

const fn term(p: i32, q: i32, coefficient: f64) -> Term {
    Term { p, q, coefficient }
}

// Coefficient tables are fixed constants. Do not refit or reorder them:
// summation order is part of the output.
const LATITUDE_TERMS: [Term; 11] = [
    term(0, 1, 3235.653_89),
    term(2, 0, -32.582_97),
    term(0, 2, -0.247_50),
    term(2, 1, -0.849_78),
    term(0, 3, -0.065_50),
    term(2, 2, -0.017_09),
    term(1, 0, -0.007_38),
    term(4, 0, 0.005_30),
    term(2, 3, -0.000_39),
    term(4, 1, 0.000_33),
    term(1, 1, -0.000_12),
];

const LONGITUDE_TERMS: [Term; 12] = [
    term(1, 0, 5260.529_16),
    term(1, 1, 105.946_84),
    term(1, 2, 2.456_56),
    term(3, 0, -0.818_85),
    term(1, 3, 0.055_94),
    term(3, 1, -0.056_07),
    term(0, 1, 0.011_99),
    term(3, 2, -0.002_56),
    term(1, 4, 0.001_28),
    term(0, 2, 0.000_22),
    term(2, 0, -0.000_22),
    term(5, 0, 0.000_26),
];

fn sum_terms(terms: &[Term], dx: f64, dy: f64) -> f64 {
    terms
        .iter()
        .map(|t| t.coefficient * dx.powi(t.p) * dy.powi(t.q))
        .sum()
}

/// Convert an RD grid coordinate (metres) to WGS84 degrees.
///
/// Total for finite input. The origin `(155000, 463000)` maps exactly onto
/// `(52.1551744, 5.38720621)` since every term vanishes there.
#[must_use]
pub fn rd_to_wgs84(x: f64, y: f64) -> Point {
    let dx = (x - RD_ORIGIN_X) * DELTA_SCALE;
    let dy = (y - RD_ORIGIN_Y) * DELTA_SCALE;

    let lat = RD_ORIGIN_LAT + sum_terms(&LATITUDE_TERMS, dx, dy) / ARCSECONDS_PER_DEGREE;
    let lng = RD_ORIGIN_LNG + sum_terms(&LONGITUDE_TERMS, dx, dy) / ARCSECONDS_PER_DEGREE;

    Point { lat, lng }
}

/// A grid reference in the Dutch national triangulation system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RdCoordinate {
    pub x: f64,
    pub y: f64,
}

impl RdCoordinate {
    #[must_use]
    pub fn to_wgs84(self) -> Point {
        rd_to_wgs84(self.x, self.y)
    }
}
