#![allow(clippy::float_cmp)]

use super::*;

fn stroke_through(points: Vec<Point>) -> Stroke {
    Stroke {
        color: "#000000".to_owned(),
        size: 3,
        points,
        timestamp: 0,
    }
}

#[test]
fn erase_tolerance_is_three_times_brush_size() {
    assert_eq!(erase_tolerance(1), 3.0);
    assert_eq!(erase_tolerance(10), 30.0);
}

#[test]
fn point_exactly_at_tolerance_hits() {
    let stroke = stroke_through(vec![Point::new(0.0, 0.0)]);
    assert!(stroke_hit(&stroke, Point::new(3.0, 0.0), 3.0));
}

#[test]
fn point_just_outside_tolerance_misses() {
    let stroke = stroke_through(vec![Point::new(0.0, 0.0)]);
    assert!(!stroke_hit(&stroke, Point::new(3.01, 0.0), 3.0));
}

#[test]
fn diagonal_distance_is_euclidean() {
    let stroke = stroke_through(vec![Point::new(0.0, 0.0)]);
    // (3, 4) is distance 5 from the origin.
    assert!(stroke_hit(&stroke, Point::new(3.0, 4.0), 5.0));
    assert!(!stroke_hit(&stroke, Point::new(3.0, 4.0), 4.9));
}

#[test]
fn any_point_of_the_stroke_can_match() {
    let stroke = stroke_through(vec![
        Point::new(0.0, 0.0),
        Point::new(50.0, 0.0),
        Point::new(100.0, 0.0),
    ]);
    assert!(stroke_hit(&stroke, Point::new(51.0, 1.0), 3.0));
}

#[test]
fn empty_stroke_never_hits() {
    let stroke = stroke_through(Vec::new());
    assert!(!stroke_hit(&stroke, Point::new(0.0, 0.0), 1_000.0));
}
