use serde_json::json;

use super::*;

// -----------------------------------------------------------------------
// coerce_f64
// -----------------------------------------------------------------------

#[test]
fn coerce_accepts_numbers_and_numeric_strings() {
    assert_eq!(coerce_f64(&json!(52.1)), Some(52.1));
    assert_eq!(coerce_f64(&json!(5)), Some(5.0));
    assert_eq!(coerce_f64(&json!("52.1")), Some(52.1));
    assert_eq!(coerce_f64(&json!("52,1")), Some(52.1));
    assert_eq!(coerce_f64(&json!(" 5.3 ")), Some(5.3));
}

#[test]
fn coerce_rejects_non_numeric_values() {
    assert_eq!(coerce_f64(&json!("abc")), None);
    assert_eq!(coerce_f64(&json!("")), None);
    assert_eq!(coerce_f64(&json!("NaN")), None);
    assert_eq!(coerce_f64(&json!("inf")), None);
    assert_eq!(coerce_f64(&json!(null)), None);
    assert_eq!(coerce_f64(&json!(true)), None);
    assert_eq!(coerce_f64(&json!([52.1])), None);
}

// -----------------------------------------------------------------------
// extract_position
// -----------------------------------------------------------------------

#[test]
fn flat_lat_lng_with_comma_decimals() {
    let record = json!({"lat": "52,1", "lng": "5,3"});
    assert_eq!(extract_position(&record), Some(Point::new(52.1, 5.3)));
}

#[test]
fn flat_alternate_key_spellings() {
    let record = json!({"latitude": 52.1, "long": 5.3});
    assert_eq!(extract_position(&record), Some(Point::new(52.1, 5.3)));

    let record = json!({"lat": 52.1, "lon": "5.3"});
    assert_eq!(extract_position(&record), Some(Point::new(52.1, 5.3)));

    let record = json!({"latitude": "52.1", "longitude": "5.3"});
    assert_eq!(extract_position(&record), Some(Point::new(52.1, 5.3)));
}

#[test]
fn unparsable_primary_key_falls_back_to_alternate_spelling() {
    let record = json!({"lat": "n/a", "latitude": 52.1, "lng": 5.3});
    assert_eq!(extract_position(&record), Some(Point::new(52.1, 5.3)));
}

#[test]
fn nested_location_object_fields() {
    let record = json!({"location": {"lat": 52.1, "lng": 5.3}});
    assert_eq!(extract_position(&record), Some(Point::new(52.1, 5.3)));
}

#[test]
fn geojson_coordinates_are_lng_lat() {
    let record = json!({"location": {"coordinates": [5.3, 52.1]}});
    assert_eq!(extract_position(&record), Some(Point::new(52.1, 5.3)));
}

#[test]
fn geojson_coordinates_accept_extra_elevation() {
    let record = json!({"location": {"type": "Point", "coordinates": [5.3, 52.1, 12.0]}});
    assert_eq!(extract_position(&record), Some(Point::new(52.1, 5.3)));
}

#[test]
fn short_geojson_array_has_no_position() {
    let record = json!({"location": {"coordinates": [5.3]}});
    assert_eq!(extract_position(&record), None);
}

#[test]
fn coordinate_string_is_lat_lng() {
    let record = json!({"coordinates": "52.1,5.3"});
    assert_eq!(extract_position(&record), Some(Point::new(52.1, 5.3)));
}

#[test]
fn coordinate_string_without_comma_has_no_position() {
    let record = json!({"coordinates": "52.1 5.3"});
    assert_eq!(extract_position(&record), None);
}

#[test]
fn flat_fields_win_over_nested_location() {
    let record = json!({
        "lat": 51.0,
        "lng": 4.0,
        "location": {"lat": 52.1, "lng": 5.3},
        "coordinates": "53.0,6.0"
    });
    assert_eq!(extract_position(&record), Some(Point::new(51.0, 4.0)));
}

#[test]
fn broken_flat_fields_fall_through_to_coordinate_string() {
    let record = json!({"lat": "unknown", "lng": 5.3, "coordinates": "52.1,5.3"});
    assert_eq!(extract_position(&record), Some(Point::new(52.1, 5.3)));
}

#[test]
fn record_without_position_shapes_has_no_position() {
    let record = json!({"name": "De Gidsen", "city": "Arnhem"});
    assert_eq!(extract_position(&record), None);
}

#[test]
fn non_object_records_have_no_position() {
    assert_eq!(extract_position(&json!(null)), None);
    assert_eq!(extract_position(&json!("52.1,5.3")), None);
    assert_eq!(extract_position(&json!([5.3, 52.1])), None);
    assert_eq!(extract_position(&json!(42)), None);
}

// -----------------------------------------------------------------------
// parse_group
// -----------------------------------------------------------------------

#[test]
fn parse_group_copies_identity_name_and_address() {
    let record = json!({
        "id": 17,
        "name": "Scouting Putten",
        "lat": 52.26,
        "lng": 5.6,
        "accomodation": "Clubhuis",
        "street": "Bosweg",
        "housenumber": 12,
        "housenumber_addition": null,
        "postcode": "3881 AA",
        "city": "Putten"
    });

    let group = parse_group(&record).expect("group with position");
    assert_eq!(group.id, "17");
    assert_eq!(group.name, "Scouting Putten");
    assert_eq!(group.position, Point::new(52.26, 5.6));
    assert_eq!(group.accomodation, Some(json!("Clubhuis")));
    assert_eq!(group.street, Some(json!("Bosweg")));
    assert_eq!(group.housenumber, Some(json!(12)), "details are not coerced");
    assert_eq!(group.housenumber_addition, None, "null details are absent");
    assert_eq!(group.postcode, Some(json!("3881 AA")));
    assert_eq!(group.city, Some(json!("Putten")));
}

#[test]
fn id_falls_back_through_slug_code_and_name() {
    let with_slug = json!({"slug": "putten", "code": "P1", "name": "Putten", "lat": 52, "lng": 5});
    assert_eq!(parse_group(&with_slug).map(|g| g.id).as_deref(), Some("putten"));

    let with_code = json!({"code": "P1", "name": "Putten", "lat": 52, "lng": 5});
    assert_eq!(parse_group(&with_code).map(|g| g.id).as_deref(), Some("P1"));

    let with_name = json!({"name": "Putten", "lat": 52, "lng": 5});
    assert_eq!(parse_group(&with_name).map(|g| g.id).as_deref(), Some("Putten"));
}

#[test]
fn missing_identity_gets_random_token() {
    let record = json!({"lat": 52, "lng": 5});
    let first = parse_group(&record).expect("group");
    let second = parse_group(&record).expect("group");
    assert!(first.id.starts_with("group-"), "got {}", first.id);
    assert_eq!(first.id.len(), "group-".len() + 16);
    assert_ne!(first.id, second.id, "fallback ids are not stable");
}

#[test]
fn name_falls_back_through_title_and_group() {
    let with_title = json!({"title": "Titel", "group": "Groep", "lat": 52, "lng": 5});
    assert_eq!(parse_group(&with_title).map(|g| g.name).as_deref(), Some("Titel"));

    let with_group = json!({"group": "Groep", "lat": 52, "lng": 5});
    assert_eq!(parse_group(&with_group).map(|g| g.name).as_deref(), Some("Groep"));

    let nameless = json!({"id": 1, "lat": 52, "lng": 5});
    assert_eq!(parse_group(&nameless).map(|g| g.name).as_deref(), Some("Unknown"));
}

#[test]
fn parse_group_without_position_is_none() {
    assert!(parse_group(&json!({"id": 1, "name": "Nowhere"})).is_none());
}

// -----------------------------------------------------------------------
// record_list / parse_groups
// -----------------------------------------------------------------------

#[test]
fn record_list_reads_data_field() {
    let body = json!({"data": [{"id": 1}, {"id": 2}], "meta": {}});
    assert_eq!(record_list(&body).len(), 2);
}

#[test]
fn record_list_reads_root_array() {
    let body = json!([{"id": 1}]);
    assert_eq!(record_list(&body).len(), 1);
}

#[test]
fn record_list_is_empty_for_other_shapes() {
    assert!(record_list(&json!({"data": "nope"})).is_empty());
    assert!(record_list(&json!({"error": "down"})).is_empty());
    assert!(record_list(&json!(null)).is_empty());
}

#[test]
fn parse_groups_drops_records_without_position() {
    let body = json!({"data": [
        {"id": "a", "name": "A", "lat": 52.0, "lng": 5.0},
        {"id": "b", "name": "B"},
        null,
        {"id": "c", "name": "C", "location": {"coordinates": [6.0, 53.0]}}
    ]});

    let groups = parse_groups(&body);
    let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(groups[1].position, Point::new(53.0, 6.0));
}

#[test]
fn parsed_group_serializes_without_absent_details() {
    let group = parse_group(&json!({"id": "a", "name": "A", "lat": 52.0, "lng": 5.0}))
        .expect("group");
    let value = serde_json::to_value(&group).expect("serialize");
    assert_eq!(value["position"]["lat"], 52.0);
    assert!(value.get("street").is_none());
}
