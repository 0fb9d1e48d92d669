//! Drawing engine for the collaborative whiteboard client.
//!
//! This crate owns everything that happens between an input event and a
//! redraw, with no I/O of its own: the board document and its undo/redo
//! history, erase hit-testing, the pointer/keyboard gesture state machine,
//! and scene rendering. The host (the CLI binary) feeds events in, persists
//! the board when an [`engine::Action`] asks for it, and rasterizes the
//! [`render::Scene`] the renderer produces.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session state and the testable [`engine::EngineCore`] |
//! | [`doc`] | Board document, strokes, and undo/redo history |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Erase hit-testing against strokes |
//! | [`render`] | Full-scene display list generation |
//! | [`consts`] | Shared visual and geometry constants |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
