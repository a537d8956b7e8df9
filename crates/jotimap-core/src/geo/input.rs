//! Free-text coordinate entry.
//!
//! Accepts either decimal WGS84 (`"52.1 5.3"`, `"52,1 5,3"`, `"52.1, 5.3"`) or
//! RD grid references given as two integers (`"155000 463000"`), including
//! the abbreviated forms used on paper maps (`"1550 4630"`, `"15500 46300"`).

use serde::Serialize;

use super::rd::RdCoordinate;
use super::Point;

/// Which reference system the input was read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSystem {
    Wgs84,
    Rd,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParsedCoordinate {
    pub point: Point,
    pub system: CoordinateSystem,
    /// The full grid reference that was converted, after abbreviation scaling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rd: Option<RdCoordinate>,
}

/// Parse user input into a WGS84 point, or `None` when it cannot be read.
#[must_use]
pub fn parse_coord_input(input: &str) -> Option<Point> {
    parse_coord_input_detailed(input).map(|parsed| parsed.point)
}

/// Like [`parse_coord_input`] but also reports how the input was interpreted.
///
/// Exactly two tokens are required. If either token carries a `.` or `,` the
/// pair is read as decimal `lat lng` and range-checked; otherwise both must be
/// integers and are treated as an RD grid reference.
#[must_use]
pub fn parse_coord_input_detailed(input: &str) -> Option<ParsedCoordinate> {
    let normalized = normalize_separator(input.trim());
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let [first, second] = tokens.as_slice() else {
        return None;
    };

    if has_decimal_mark(first) || has_decimal_mark(second) {
        let lat = parse_decimal(first)?;
        let lng = parse_decimal(second)?;
        let point = Point::new(lat, lng);
        if !point.is_valid_wgs84() {
            return None;
        }
        return Some(ParsedCoordinate {
            point,
            system: CoordinateSystem::Wgs84,
            rd: None,
        });
    }

    let rd = RdCoordinate {
        x: expand_grid_reference(parse_integer(first)?),
        y: expand_grid_reference(parse_integer(second)?),
    };
    Some(ParsedCoordinate {
        point: rd.to_wgs84(),
        system: CoordinateSystem::Rd,
        rd: Some(rd),
    })
}

/// Turns one comma that separates the two values into a space.
///
/// A comma counts as the separator when whitespace touches it (`"52.1, 5.3"`),
/// or when it is the only comma in input without any whitespace
/// (`"52.1,5.3"`). Commas inside `"52,1 5,3"` are decimal marks and stay.
fn normalize_separator(input: &str) -> String {
    let touching_whitespace = input.char_indices().find_map(|(i, c)| {
        let is_separator = c == ','
            && (input[..i].ends_with(char::is_whitespace)
                || input[i + 1..].starts_with(char::is_whitespace));
        is_separator.then_some(i)
    });

    let separator = touching_whitespace.or_else(|| {
        let lone_comma =
            !input.contains(char::is_whitespace) && input.matches(',').count() == 1;
        if lone_comma {
            input.find(',')
        } else {
            None
        }
    });

    match separator {
        Some(i) => format!("{} {}", &input[..i], &input[i + 1..]),
        None => input.to_owned(),
    }
}

fn has_decimal_mark(token: &str) -> bool {
    token.contains(['.', ','])
}

fn parse_decimal(token: &str) -> Option<f64> {
    token
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn parse_integer(token: &str) -> Option<f64> {
    let value = token.parse::<i64>().ok()?;
    // Grid references are at most seven digits; the cast is exact for them.
    #[allow(clippy::cast_precision_loss)]
    Some(value as f64)
}

/// Scale abbreviated grid references up to full metres: four-digit values are
/// hectometres, five-digit values decametres.
fn expand_grid_reference(value: f64) -> f64 {
    if value < 10_000.0 {
        value * 100.0
    } else if value < 100_000.0 {
        value * 10.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{is_within_netherlands, rd_to_wgs84};

    #[test]
    fn decimal_pair_is_taken_as_lat_lng() {
        assert_eq!(parse_coord_input("52.1 5.3"), Some(Point::new(52.1, 5.3)));
    }

    #[test]
    fn comma_decimal_marks_are_accepted() {
        assert_eq!(parse_coord_input("52,1 5,3"), Some(Point::new(52.1, 5.3)));
    }

    #[test]
    fn comma_separator_with_space_is_accepted() {
        assert_eq!(parse_coord_input("52.1, 5.3"), Some(Point::new(52.1, 5.3)));
    }

    #[test]
    fn comma_separator_without_space_is_accepted() {
        assert_eq!(parse_coord_input("52.1,5.3"), Some(Point::new(52.1, 5.3)));
    }

    #[test]
    fn comma_decimals_with_comma_separator_are_accepted() {
        assert_eq!(parse_coord_input("52,1, 5,3"), Some(Point::new(52.1, 5.3)));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            parse_coord_input("   52.1    5.3 \n"),
            Some(Point::new(52.1, 5.3))
        );
    }

    #[test]
    fn mixed_decimal_and_integer_is_decimal() {
        assert_eq!(parse_coord_input("52 5.3"), Some(Point::new(52.0, 5.3)));
    }

    #[test]
    fn out_of_range_decimal_is_rejected() {
        assert_eq!(parse_coord_input("95.0 5.3"), None);
        assert_eq!(parse_coord_input("52.0 181.5"), None);
    }

    #[test]
    fn abbreviated_grid_reference_is_scaled_by_hundred() {
        let parsed = parse_coord_input_detailed("1234 5678").expect("grid input");
        assert_eq!(parsed.system, CoordinateSystem::Rd);
        assert_eq!(
            parsed.rd,
            Some(RdCoordinate {
                x: 123_400.0,
                y: 567_800.0
            })
        );
        assert!(is_within_netherlands(&parsed.point), "{}", parsed.point);
    }

    #[test]
    fn five_digit_grid_reference_is_scaled_by_ten() {
        let parsed = parse_coord_input_detailed("15500 46300").expect("grid input");
        assert_eq!(
            parsed.rd,
            Some(RdCoordinate {
                x: 155_000.0,
                y: 463_000.0
            })
        );
        assert_eq!(parsed.point, rd_to_wgs84(155_000.0, 463_000.0));
    }

    #[test]
    fn full_grid_reference_is_converted_as_is() {
        let point = parse_coord_input("155000 463000").expect("grid input");
        assert_eq!(point, rd_to_wgs84(155_000.0, 463_000.0));
    }

    #[test]
    fn grid_reference_with_comma_separator_and_no_space() {
        let parsed = parse_coord_input_detailed("155000,463000").expect("grid input");
        assert_eq!(parsed.system, CoordinateSystem::Rd);
    }

    #[test]
    fn words_are_rejected() {
        assert_eq!(parse_coord_input("abc def"), None);
    }

    #[test]
    fn wrong_token_count_is_rejected() {
        assert_eq!(parse_coord_input("1 2 3"), None);
        assert_eq!(parse_coord_input("52.1"), None);
        assert_eq!(parse_coord_input(""), None);
    }

    #[test]
    fn integers_beyond_i64_are_rejected() {
        assert_eq!(parse_coord_input("99999999999999999999 1"), None);
        assert_eq!(parse_coord_input("1 -99999999999999999999"), None);
    }

    #[test]
    fn non_finite_decimal_is_rejected() {
        assert_eq!(parse_coord_input("NaN. 5.3"), None);
        assert_eq!(parse_coord_input("inf. 5.3"), None);
    }

    #[test]
    fn parsed_coordinate_serializes_system_in_lowercase() {
        let parsed = parse_coord_input_detailed("52.1 5.3").expect("decimal input");
        let json = serde_json::to_value(parsed).expect("serialize");
        assert_eq!(json["system"], "wgs84");
        assert!(json.get("rd").is_none());
    }
}
