//! Territories: one convex hull per color tag.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::geo::{convex_hull, Point};
use crate::record::ParsedGroup;
use crate::tags::{ColorTag, TagAssignments};

/// Smallest hull worth drawing as a polygon.
pub const MIN_POLYGON_POINTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Territory {
    pub tag: ColorTag,
    pub hull: Vec<Point>,
}

/// Positions of all tagged groups, bucketed by tag. Untagged groups are
/// skipped.
#[must_use]
pub fn group_points_by_tag(
    groups: &[ParsedGroup],
    tags: &TagAssignments,
) -> BTreeMap<ColorTag, Vec<Point>> {
    let mut buckets: BTreeMap<ColorTag, Vec<Point>> = BTreeMap::new();
    for group in groups {
        if let Some(tag) = tags.get(&group.id) {
            buckets.entry(tag).or_default().push(group.position);
        }
    }
    buckets
}

/// Hull per tag, keeping only hulls that form a polygon.
#[must_use]
pub fn territories(groups: &[ParsedGroup], tags: &TagAssignments) -> Vec<Territory> {
    group_points_by_tag(groups, tags)
        .into_iter()
        .filter_map(|(tag, points)| {
            let hull = convex_hull(&points);
            (hull.len() >= MIN_POLYGON_POINTS).then_some(Territory { tag, hull })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str, lat: f64, lng: f64) -> ParsedGroup {
        ParsedGroup {
            id: id.to_string(),
            name: format!("Group {id}"),
            position: Point::new(lat, lng),
            accomodation: None,
            street: None,
            housenumber: None,
            housenumber_addition: None,
            postcode: None,
            city: None,
        }
    }

    fn tags(pairs: &[(&str, ColorTag)]) -> TagAssignments {
        pairs
            .iter()
            .map(|(id, tag)| ((*id).to_string(), *tag))
            .collect()
    }

    #[test]
    fn untagged_groups_are_not_grouped() {
        let groups = vec![group("a", 52.0, 5.0), group("b", 52.1, 5.1)];
        let buckets = group_points_by_tag(&groups, &tags(&[("a", ColorTag::Red)]));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&ColorTag::Red], vec![Point::new(52.0, 5.0)]);
    }

    #[test]
    fn tags_for_unknown_ids_are_ignored() {
        let groups = vec![group("a", 52.0, 5.0)];
        let buckets = group_points_by_tag(&groups, &tags(&[("zzz", ColorTag::Blue)]));
        assert!(buckets.is_empty());
    }

    #[test]
    fn territory_is_emitted_only_with_three_hull_points() {
        let groups = vec![
            group("r1", 52.0, 5.0),
            group("r2", 52.0, 6.0),
            group("r3", 53.0, 5.5),
            group("b1", 51.0, 4.0),
            group("b2", 51.5, 4.5),
        ];
        let assignments = tags(&[
            ("r1", ColorTag::Red),
            ("r2", ColorTag::Red),
            ("r3", ColorTag::Red),
            ("b1", ColorTag::Blue),
            ("b2", ColorTag::Blue),
        ]);

        let result = territories(&groups, &assignments);
        assert_eq!(result.len(), 1, "blue has only two points");
        assert_eq!(result[0].tag, ColorTag::Red);
        assert_eq!(result[0].hull.len(), 3);
    }

    #[test]
    fn collinear_group_produces_no_territory() {
        let groups = vec![
            group("a", 52.0, 5.0),
            group("b", 52.5, 5.5),
            group("c", 53.0, 6.0),
        ];
        let assignments = tags(&[
            ("a", ColorTag::Orange),
            ("b", ColorTag::Orange),
            ("c", ColorTag::Orange),
        ]);
        assert!(territories(&groups, &assignments).is_empty());
    }

    #[test]
    fn territories_follow_tag_declaration_order() {
        let mut groups = Vec::new();
        let mut pairs = Vec::new();
        for (n, tag) in [ColorTag::Purple, ColorTag::Orange].into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let offset = n as f64;
            for (i, (lat, lng)) in [(52.0, 5.0), (52.0, 6.0), (53.0, 5.5)].into_iter().enumerate() {
                let id = format!("{tag}-{i}");
                groups.push(group(&id, lat + offset, lng));
                pairs.push((id, tag));
            }
        }
        let assignments: TagAssignments = pairs.into_iter().collect();

        let order: Vec<ColorTag> = territories(&groups, &assignments)
            .into_iter()
            .map(|t| t.tag)
            .collect();
        assert_eq!(order, vec![ColorTag::Orange, ColorTag::Purple]);
    }
}
