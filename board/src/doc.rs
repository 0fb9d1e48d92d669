//! Document model: the board, its strokes, and undo/redo history.
//!
//! `Board` is the value that round-trips through the REST API and the
//! realtime channel; `BoardDoc` wraps it with the redo stack and the
//! mutations the input engine performs. Data flows into this layer from the
//! network (JSON deserialization) and from the engine (mutations). The
//! renderer reads strokes in append order, which is also draw order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::hit;

/// A single point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One continuous pen path with its style.
///
/// Immutable once committed to the board; removal (undo, eraser) is always
/// whole-stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Brush color as a CSS color string.
    pub color: String,
    /// Brush width in pixels.
    pub size: u32,
    /// Path points in the order they were drawn.
    pub points: Vec<Point>,
    /// Milliseconds since the Unix epoch when the stroke was started.
    pub timestamp: i64,
}

/// The persisted drawing document as stored on the server and on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Server-assigned identifier.
    pub id: String,
    /// Strokes in append order; z-order equals draw order.
    #[serde(default)]
    pub strokes: Vec<Stroke>,
}

/// In-memory board plus redo history.
///
/// Committing a new stroke after an undo leaves the redo stack in place, and
/// `clear` empties only the strokes. Both match the observed behavior of the
/// page this client talks to; see DESIGN.md before changing either.
#[derive(Debug, Clone, Default)]
pub struct BoardDoc {
    board: Board,
    redo_stack: Vec<Stroke>,
}

impl BoardDoc {
    /// Wrap a board loaded from the server.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self { board, redo_stack: Vec::new() }
    }

    /// The current board value, e.g. for persistence.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The server-assigned board id.
    #[must_use]
    pub fn board_id(&self) -> &str {
        &self.board.id
    }

    /// Append a committed stroke.
    pub fn push_stroke(&mut self, stroke: Stroke) {
        self.board.strokes.push(stroke);
    }

    /// Pop the most recent stroke onto the redo stack.
    /// Returns `false` (and does nothing) if there are no strokes.
    pub fn undo(&mut self) -> bool {
        let Some(stroke) = self.board.strokes.pop() else {
            return false;
        };
        self.redo_stack.push(stroke);
        true
    }

    /// Move the most recently undone stroke back onto the board.
    /// Returns `false` (and does nothing) if the redo stack is empty.
    pub fn redo(&mut self) -> bool {
        let Some(stroke) = self.redo_stack.pop() else {
            return false;
        };
        self.board.strokes.push(stroke);
        true
    }

    /// Remove every stroke with at least one point within `tolerance` of
    /// `at`, returning how many strokes were removed.
    pub fn erase_at(&mut self, at: Point, tolerance: f64) -> usize {
        let before = self.board.strokes.len();
        self.board
            .strokes
            .retain(|stroke| !hit::stroke_hit(stroke, at, tolerance));
        before - self.board.strokes.len()
    }

    /// Empty the board. The redo stack is left untouched.
    pub fn clear(&mut self) {
        self.board.strokes.clear();
    }

    /// Overwrite the whole board atomically (remote sync).
    pub fn replace(&mut self, board: Board) {
        self.board = board;
    }

    /// Number of strokes currently on the board.
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.board.strokes.len()
    }

    /// Number of strokes available for redo.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Returns `true` if the board has no strokes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.board.strokes.is_empty()
    }
}
