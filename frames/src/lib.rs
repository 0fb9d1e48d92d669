//! Shared frame model and JSON codec for the realtime WS channel.
//!
//! This crate owns the wire representation the client exchanges with the
//! relay server. Frames are JSON text messages dispatched on a `messagetype`
//! discriminator; the enum here is closed over the known message kinds, with
//! an explicit [`ServerFrame::Unknown`] arm so unrecognized discriminators
//! become no-ops instead of errors.

use board::doc::Board;
use serde::{Deserialize, Serialize};

/// Error returned by the codec functions.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The frame could not be serialized to JSON text.
    #[error("failed to encode frame: {0}")]
    Encode(serde_json::Error),
    /// The text could not be decoded as a known frame shape.
    #[error("failed to decode frame: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The join message sent once, right after the socket opens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JoinFrame {
    pub username: String,
    /// Topic scoping broadcasts to one board's viewers, `boards/{id}`.
    pub channel: String,
}

/// A collaborator's cursor position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CursorPayload {
    pub username: String,
    pub x: f64,
    pub y: f64,
}

/// A message sent by the client after joining.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "messagetype", rename_all = "lowercase")]
pub enum ClientFrame {
    /// Broadcast our cursor position to the board's channel.
    Cursor {
        channel: String,
        payload: CursorPayload,
    },
}

/// Envelope for a board sync message. The relay nests the board one level
/// deeper than cursor payloads, so the full path is `payload.payload`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSync {
    pub payload: Board,
}

/// A message received from the relay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "messagetype", rename_all = "lowercase")]
pub enum ServerFrame {
    /// Another user's cursor moved.
    Cursor { payload: CursorPayload },
    /// The board was replaced wholesale by another client's save.
    Board { payload: BoardSync },
    /// Recognized JSON with an unknown discriminator; ignored by the client.
    #[serde(other)]
    Unknown,
}

/// The channel name for a board id.
#[must_use]
pub fn board_channel(board_id: &str) -> String {
    format!("boards/{board_id}")
}

/// Encode the join frame as JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_join(frame: &JoinFrame) -> Result<String, CodecError> {
    serde_json::to_string(frame).map_err(CodecError::Encode)
}

/// Encode a client frame as JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_client_frame(frame: &ClientFrame) -> Result<String, CodecError> {
    serde_json::to_string(frame).map_err(CodecError::Encode)
}

/// Decode JSON text into a server frame.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed JSON or a frame missing the
/// `messagetype` discriminator. Frames carrying an unknown discriminator
/// decode successfully as [`ServerFrame::Unknown`].
pub fn decode_server_frame(text: &str) -> Result<ServerFrame, CodecError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
