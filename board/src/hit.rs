//! Erase hit-testing against strokes.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::ERASE_TOLERANCE_FACTOR;
use crate::doc::{Point, Stroke};

/// Eraser hit radius for the given brush size.
#[must_use]
pub fn erase_tolerance(brush_size: u32) -> f64 {
    f64::from(brush_size) * ERASE_TOLERANCE_FACTOR
}

/// Whether any point of `stroke` lies within Euclidean distance `tolerance`
/// of `at`.
#[must_use]
pub fn stroke_hit(stroke: &Stroke, at: Point, tolerance: f64) -> bool {
    stroke
        .points
        .iter()
        .any(|point| (point.x - at.x).hypot(point.y - at.y) <= tolerance)
}
