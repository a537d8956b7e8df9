//! Convex hull over map points (Andrew's monotone chain).
//!
//! Longitude is the x axis and latitude the y axis. That planar treatment is
//! fine at the scale of one country and wrong across the antimeridian.

use std::cmp::Ordering;

use super::Point;

/// Z component of `(a - o) x (b - o)` in the (lng, lat) plane.
///
/// Positive for a left (counter-clockwise) turn, zero for collinear points.
#[must_use]
pub fn cross(o: &Point, a: &Point, b: &Point) -> f64 {
    (a.lng - o.lng) * (b.lat - o.lat) - (a.lat - o.lat) * (b.lng - o.lng)
}

fn by_lng_then_lat(a: &Point, b: &Point) -> Ordering {
    a.lng.total_cmp(&b.lng).then(a.lat.total_cmp(&b.lat))
}

/// Appends `p` to `chain`, first dropping every trailing point that would make
/// a right turn or lie on a straight line (`cross <= 0`).
fn push_left_turn(chain: &mut Vec<Point>, p: Point) {
    while chain.len() >= 2 && cross(&chain[chain.len() - 2], &chain[chain.len() - 1], &p) <= 0.0 {
        chain.pop();
    }
    chain.push(p);
}

/// Convex hull boundary in counter-clockwise order, starting at the
/// westernmost (then southernmost) point.
///
/// Exactly collinear boundary points are dropped. Inputs with fewer than two
/// points come back unchanged; callers should only draw a polygon when the
/// result holds at least three points.
#[must_use]
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    if points.len() <= 1 {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(by_lng_then_lat);

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for p in &sorted {
        push_left_turn(&mut lower, *p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for p in sorted.iter().rev() {
        push_left_turn(&mut upper, *p);
    }

    // Each chain ends where the other begins.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a point from planar (x = lng, y = lat) coordinates.
    fn xy(x: f64, y: f64) -> Point {
        Point::new(y, x)
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(convex_hull(&[]).is_empty());
    }

    #[test]
    fn single_point_is_returned_unchanged() {
        let pts = [xy(5.0, 52.0)];
        assert_eq!(convex_hull(&pts), pts.to_vec());
    }

    #[test]
    fn two_points_come_back_in_sorted_order() {
        let sorted = vec![xy(4.0, 52.0), xy(5.0, 53.0)];
        assert_eq!(convex_hull(&[xy(4.0, 52.0), xy(5.0, 53.0)]), sorted);
        assert_eq!(convex_hull(&[xy(5.0, 53.0), xy(4.0, 52.0)]), sorted);
    }

    #[test]
    fn two_points_in_any_order_yield_the_same_pair() {
        let forward = convex_hull(&[xy(4.0, 52.0), xy(5.0, 53.0)]);
        let backward = convex_hull(&[xy(5.0, 53.0), xy(4.0, 52.0)]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn triangle_keeps_all_three_points_counter_clockwise() {
        let a = xy(0.0, 0.0);
        let b = xy(2.0, 0.0);
        let c = xy(1.0, 1.0);
        let hull = convex_hull(&[c, a, b]);
        assert_eq!(hull, vec![a, b, c]);
        assert!(cross(&hull[0], &hull[1], &hull[2]) > 0.0);
    }

    #[test]
    fn interior_point_is_dropped() {
        let a = xy(0.0, 0.0);
        let b = xy(2.0, 0.0);
        let c = xy(1.0, 1.0);
        let inside = xy(1.0, 0.3);
        let hull = convex_hull(&[inside, b, c, a]);
        assert_eq!(hull, vec![a, b, c]);
    }

    #[test]
    fn collinear_points_reduce_to_endpoints() {
        let pts = [xy(1.0, 1.0), xy(3.0, 3.0), xy(0.0, 0.0), xy(2.0, 2.0)];
        let hull = convex_hull(&pts);
        assert_eq!(hull, vec![xy(0.0, 0.0), xy(3.0, 3.0)]);
    }

    #[test]
    fn collinear_point_on_square_edge_is_dropped() {
        let square = [
            xy(0.0, 0.0),
            xy(1.0, 0.0),
            xy(2.0, 0.0),
            xy(2.0, 2.0),
            xy(0.0, 2.0),
        ];
        let hull = convex_hull(&square);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&xy(1.0, 0.0)));
    }

    #[test]
    fn duplicates_do_not_change_the_hull() {
        let a = xy(0.0, 0.0);
        let b = xy(2.0, 0.0);
        let c = xy(1.0, 1.0);
        let hull = convex_hull(&[a, a, b, c, c, b]);
        assert_eq!(hull, vec![a, b, c]);
    }

    #[test]
    fn result_is_independent_of_input_order() {
        let pts = vec![
            xy(5.1, 52.0),
            xy(5.3, 52.4),
            xy(4.9, 52.2),
            xy(5.2, 52.1),
            xy(5.0, 52.5),
        ];
        let mut reversed = pts.clone();
        reversed.reverse();
        assert_eq!(convex_hull(&pts), convex_hull(&reversed));
    }

    #[test]
    fn cross_sign_convention() {
        let o = xy(0.0, 0.0);
        assert!(cross(&o, &xy(1.0, 0.0), &xy(1.0, 1.0)) > 0.0);
        assert!(cross(&o, &xy(1.0, 0.0), &xy(1.0, -1.0)) < 0.0);
        assert!(cross(&o, &xy(1.0, 1.0), &xy(2.0, 2.0)).abs() < f64::EPSILON);
    }
}
