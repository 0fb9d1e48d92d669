//! Rendering: builds the full canvas scene as a display list.
//!
//! The renderer never draws pixels itself; it emits a [`Scene`] of draw
//! operations for the host to rasterize (or serialize). Every call rebuilds
//! the whole scene from engine state with no incremental diffing, so it is
//! safe to invoke on any state change.
//!
//! Layer order matches the page: background fill, grid guidelines,
//! collaborator cursors, then strokes bottom-up in draw order with the
//! in-progress stroke on top.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::consts::{
    BACKGROUND_COLOR, CURSOR_COLOR, CURSOR_FONT, CURSOR_LABEL_OFFSET, GRID_COLOR, GRID_LINE_WIDTH,
    GRID_STEP,
};
use crate::doc::{Point, Stroke};
use crate::engine::{Cursor, EngineCore};

/// One primitive draw operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum DrawOp {
    /// Fill the whole viewport.
    Fill { color: String },
    /// Straight line segment.
    Line {
        from: Point,
        to: Point,
        color: String,
        width: f64,
    },
    /// Connected segments through `points` with round line caps.
    Polyline {
        points: Vec<Point>,
        color: String,
        width: f64,
    },
    /// Closed filled polygon.
    Polygon { points: Vec<Point>, color: String },
    /// Text drawn at `at`.
    Label {
        text: String,
        at: Point,
        color: String,
        font: String,
    },
}

/// A full frame, ready for the host to rasterize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

/// Build the complete scene for the current engine state.
#[must_use]
pub fn render(core: &EngineCore) -> Scene {
    let width = core.viewport_width;
    let height = core.viewport_height;
    let mut ops = Vec::new();

    // Layer 1: background and guidelines.
    ops.push(DrawOp::Fill { color: BACKGROUND_COLOR.to_owned() });
    push_grid(&mut ops, width, height);

    // Layer 2: collaborator cursors, sorted for deterministic output.
    let mut cursors: Vec<&Cursor> = core.collaborators.values().collect();
    cursors.sort_by(|a, b| a.username.cmp(&b.username));
    for cursor in cursors {
        push_cursor(&mut ops, cursor);
    }

    // Layer 3: strokes in draw order, in-progress stroke last.
    for stroke in core.doc.board().strokes.iter().chain(core.current_stroke()) {
        push_stroke(&mut ops, stroke);
    }

    Scene { width, height, ops }
}

fn push_grid(ops: &mut Vec<DrawOp>, width: f64, height: f64) {
    let mut x = GRID_STEP;
    while x < width {
        ops.push(grid_line(Point::new(x, 0.0), Point::new(x, height)));
        x += GRID_STEP;
    }
    let mut y = GRID_STEP;
    while y < height {
        ops.push(grid_line(Point::new(0.0, y), Point::new(width, y)));
        y += GRID_STEP;
    }
}

fn grid_line(from: Point, to: Point) -> DrawOp {
    DrawOp::Line {
        from,
        to,
        color: GRID_COLOR.to_owned(),
        width: GRID_LINE_WIDTH,
    }
}

fn push_cursor(ops: &mut Vec<DrawOp>, cursor: &Cursor) {
    let (x, y) = (cursor.x, cursor.y);
    ops.push(DrawOp::Label {
        text: cursor.username.clone(),
        at: Point::new(x + CURSOR_LABEL_OFFSET, y + CURSOR_LABEL_OFFSET),
        color: CURSOR_COLOR.to_owned(),
        font: CURSOR_FONT.to_owned(),
    });
    // Arrow-shaped marker with the tip at the cursor position.
    ops.push(DrawOp::Polygon {
        points: vec![
            Point::new(x, y),
            Point::new(x + 16.0, y + 8.0),
            Point::new(x + 8.0, y + 8.0),
            Point::new(x + 8.0, y + 16.0),
        ],
        color: CURSOR_COLOR.to_owned(),
    });
}

fn push_stroke(ops: &mut Vec<DrawOp>, stroke: &Stroke) {
    if stroke.points.is_empty() {
        return;
    }
    ops.push(DrawOp::Polyline {
        points: stroke.points.clone(),
        color: stroke.color.clone(),
        width: f64::from(stroke.size),
    });
}
