//! Shared visual and geometry constants for the board crate.

// ── Background & grid ───────────────────────────────────────────

/// Canvas background fill color.
pub const BACKGROUND_COLOR: &str = "#f2f2f2";

/// Distance between grid guidelines in canvas pixels.
pub const GRID_STEP: f64 = 60.0;

/// Grid guideline stroke color.
pub const GRID_COLOR: &str = "#cccccc";

/// Grid guideline stroke width.
pub const GRID_LINE_WIDTH: f64 = 0.5;

// ── Collaborator cursors ────────────────────────────────────────

/// Fill color for remote cursor markers and their labels.
pub const CURSOR_COLOR: &str = "purple";

/// Font for the username label next to a remote cursor.
pub const CURSOR_FONT: &str = "12px Arial";

/// Offset of the username label from the cursor tip, applied on both axes.
pub const CURSOR_LABEL_OFFSET: f64 = 20.0;

// ── Brush & eraser ──────────────────────────────────────────────

/// Brush color used before the user picks one.
pub const DEFAULT_BRUSH_COLOR: &str = "#000000";

/// Brush size in pixels used before the user picks one.
pub const DEFAULT_BRUSH_SIZE: u32 = 5;

/// Multiplier applied to the brush size to get the eraser hit radius.
pub const ERASE_TOLERANCE_FACTOR: f64 = 3.0;
