//! Session state and the input-to-mutation engine.
//!
//! `EngineCore` owns everything the original page kept as top-level globals:
//! the board document, undo/redo history, UI state, the active gesture, and
//! the collaborator cursor map. The host feeds it [`InputEvent`]s and remote
//! frames; each call returns an [`Action`] telling the host whether to
//! re-render and whether the board needs to be persisted. The engine itself
//! performs no I/O.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use crate::doc::{Board, BoardDoc, Point, Stroke};
use crate::hit;
use crate::input::{InputEvent, InputState, Tool, UiState};

/// Another connected user's identity and last cursor position.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub username: String,
    pub x: f64,
    pub y: f64,
}

/// What the host should do after handing an event or frame to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing changed.
    None,
    /// Visible state changed; re-render.
    RenderNeeded,
    /// The board mutated; re-render and persist.
    BoardChanged,
}

/// Core session state for one board.
pub struct EngineCore {
    pub doc: BoardDoc,
    pub ui: UiState,
    pub input: InputState,
    /// Remote cursors keyed by username. Entries never expire.
    pub collaborators: HashMap<String, Cursor>,
    /// Our own username; cursor frames echoing it are ignored.
    pub username: String,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl EngineCore {
    #[must_use]
    pub fn new(username: String, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            doc: BoardDoc::default(),
            ui: UiState::default(),
            input: InputState::default(),
            collaborators: HashMap::new(),
            username,
            viewport_width,
            viewport_height,
        }
    }

    // --- Remote inputs ---

    /// Hydrate the document from a freshly loaded board.
    pub fn load_board(&mut self, board: Board) {
        self.doc = BoardDoc::from_board(board);
    }

    /// Apply a remote board frame: the whole board is replaced atomically,
    /// last writer wins.
    pub fn replace_board(&mut self, board: Board) -> Action {
        self.doc.replace(board);
        Action::RenderNeeded
    }

    /// Apply a remote cursor frame, skipping our own echoes.
    pub fn apply_cursor(&mut self, cursor: Cursor) -> Action {
        if cursor.username == self.username {
            return Action::None;
        }
        self.collaborators.insert(cursor.username.clone(), cursor);
        Action::RenderNeeded
    }

    // --- Local input ---

    /// Feed one host event through the gesture state machine.
    ///
    /// `now_ms` stamps new strokes, injected so tests control time.
    pub fn handle_event(&mut self, event: InputEvent, now_ms: i64) -> Action {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y), now_ms),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::KeyDown { key, ctrl } => self.key_down(&key, ctrl),
            InputEvent::SetTool { tool } => {
                self.ui.tool = tool;
                Action::None
            }
            InputEvent::SetColor { color } => {
                self.ui.brush_color = color;
                Action::None
            }
            InputEvent::SetSize { size } => {
                self.ui.brush_size = size;
                Action::None
            }
            InputEvent::Resized { width, height } => {
                self.viewport_width = width;
                self.viewport_height = height;
                Action::RenderNeeded
            }
            InputEvent::Clear => {
                self.doc.clear();
                Action::BoardChanged
            }
            InputEvent::Undo => self.undo(),
            InputEvent::Redo => self.redo(),
        }
    }

    fn pointer_down(&mut self, at: Point, now_ms: i64) -> Action {
        match self.ui.tool {
            Tool::Eraser => self.erase(at),
            Tool::Pen => {
                self.input = InputState::Drawing {
                    stroke: Stroke {
                        color: self.ui.brush_color.clone(),
                        size: self.ui.brush_size,
                        points: vec![at],
                        timestamp: now_ms,
                    },
                };
                Action::RenderNeeded
            }
        }
    }

    fn pointer_move(&mut self, at: Point) -> Action {
        match self.ui.tool {
            // The eraser acts on every move, pressed or not.
            Tool::Eraser => self.erase(at),
            Tool::Pen => match &mut self.input {
                InputState::Drawing { stroke } => {
                    stroke.points.push(at);
                    Action::RenderNeeded
                }
                InputState::Idle => Action::None,
            },
        }
    }

    fn pointer_up(&mut self) -> Action {
        match std::mem::take(&mut self.input) {
            InputState::Drawing { stroke } if !stroke.points.is_empty() => {
                self.doc.push_stroke(stroke);
                Action::BoardChanged
            }
            InputState::Drawing { .. } | InputState::Idle => Action::None,
        }
    }

    fn key_down(&mut self, key: &str, ctrl: bool) -> Action {
        if !ctrl {
            return Action::None;
        }
        match key {
            "z" => self.undo(),
            "r" => self.redo(),
            _ => Action::None,
        }
    }

    fn erase(&mut self, at: Point) -> Action {
        // A save fires even when nothing was removed, as the page does.
        self.doc.erase_at(at, hit::erase_tolerance(self.ui.brush_size));
        Action::BoardChanged
    }

    fn undo(&mut self) -> Action {
        if self.doc.undo() {
            Action::BoardChanged
        } else {
            Action::None
        }
    }

    fn redo(&mut self) -> Action {
        if self.doc.redo() {
            Action::BoardChanged
        } else {
            Action::None
        }
    }

    // --- Queries ---

    /// The stroke being drawn right now, if any.
    #[must_use]
    pub fn current_stroke(&self) -> Option<&Stroke> {
        match &self.input {
            InputState::Drawing { stroke } => Some(stroke),
            InputState::Idle => None,
        }
    }
}
