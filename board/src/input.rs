//! Input model: tools, input events, and the gesture state machine.
//!
//! `InputEvent` is the boundary between the host and the engine. The CLI
//! streams events as JSON lines, so the enum is serde-tagged on `event` with
//! lowercase names (`pointerdown`, `keydown`, ...). `InputState` is the
//! active gesture between pointer-down and pointer-up; while the pen is down
//! it carries the in-progress stroke.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BRUSH_COLOR, DEFAULT_BRUSH_SIZE};
use crate::doc::Stroke;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand drawing (default).
    #[default]
    Pen,
    /// Whole-stroke eraser.
    Eraser,
}

/// A host event in wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum InputEvent {
    /// Pointer pressed at canvas coordinates.
    PointerDown { x: f64, y: f64 },
    /// Pointer moved; also the trigger for cursor broadcasts.
    PointerMove { x: f64, y: f64 },
    /// Pointer released.
    PointerUp,
    /// Key pressed. Ctrl+Z is undo, Ctrl+R is redo.
    KeyDown {
        key: String,
        #[serde(default)]
        ctrl: bool,
    },
    /// Tool button clicked.
    SetTool { tool: Tool },
    /// Brush color picker changed.
    SetColor { color: String },
    /// Brush size picker changed.
    SetSize { size: u32 },
    /// Viewport resized; the canvas raster is discarded and re-rendered.
    Resized { width: f64, height: f64 },
    /// Clear button clicked.
    Clear,
    /// Undo button clicked.
    Undo,
    /// Redo button clicked.
    Redo,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Brush color for new strokes.
    pub brush_color: String,
    /// Brush size for new strokes; also drives the eraser tolerance.
    pub brush_size: u32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            brush_color: DEFAULT_BRUSH_COLOR.to_owned(),
            brush_size: DEFAULT_BRUSH_SIZE,
        }
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The pen is down; the stroke accumulates points until pointer-up.
    Drawing {
        /// The in-progress stroke, not yet committed to the board.
        stroke: Stroke,
    },
}
