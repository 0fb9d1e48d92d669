//! Client error taxonomy shared across the CLI modules.

/// Anything that can go wrong talking to the whiteboard server.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status} for {operation}")]
    Api { operation: &'static str, status: u16 },
    #[error("server rejected the board save")]
    SaveRejected,
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("frame codec failed: {0}")]
    Codec(#[from] frames::CodecError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
