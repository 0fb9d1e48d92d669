//! WebSocket lifecycle: endpoint derivation, connect/join, and the
//! reconnect backoff policy.
//!
//! The original page opened one socket per load and never reconnected; here
//! the connection is an explicit state machine ([`ConnectionStatus`]) with
//! exponential backoff, so a dropped relay does not silently end cursor and
//! board sync for the rest of the session.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::time::Duration;

use frames::JoinFrame;
use futures_util::SinkExt;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::error::ClientError;

/// The realtime stream type used by the session loop.
pub type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Connection lifecycle for the realtime channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// Waiting out a reconnect delay after a failure.
    Backoff,
}

/// Exponential reconnect delay: 1s doubling to a 10s cap.
#[derive(Clone, Copy, Debug)]
pub struct Backoff {
    delay: Duration,
}

impl Backoff {
    const INITIAL: Duration = Duration::from_secs(1);
    const MAX: Duration = Duration::from_secs(10);

    #[must_use]
    pub fn new() -> Self {
        Self { delay: Self::INITIAL }
    }

    /// The delay to wait before the next attempt; doubles for the one after.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.delay;
        self.delay = (self.delay * 2).min(Self::MAX);
        delay
    }

    /// Reset after a successful connect.
    pub fn reset(&mut self) {
        self.delay = Self::INITIAL;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the websocket endpoint from the HTTP base URL.
///
/// # Errors
///
/// Returns [`ClientError::InvalidBaseUrl`] when the base URL has no
/// recognized scheme.
pub fn ws_url(base_url: &str) -> Result<String, ClientError> {
    if let Some(rest) = base_url.strip_prefix("http://") {
        return Ok(format!("ws://{}/ws", rest.trim_end_matches('/')));
    }
    if let Some(rest) = base_url.strip_prefix("https://") {
        return Ok(format!("wss://{}/ws", rest.trim_end_matches('/')));
    }

    Err(ClientError::InvalidBaseUrl(base_url.to_owned()))
}

/// Connect to the relay and announce ourselves on the board's channel.
///
/// # Errors
///
/// Returns [`ClientError::WsConnect`] when the handshake or the join send
/// fails, [`ClientError::Codec`] when the join frame fails to encode, and
/// [`ClientError::InvalidBaseUrl`] for an unusable base URL.
pub async fn connect(base_url: &str, join: &JoinFrame) -> Result<WsStream, ClientError> {
    let url = ws_url(base_url)?;
    let (mut stream, _) = connect_async(url)
        .await
        .map_err(|error| ClientError::WsConnect(Box::new(error)))?;

    stream
        .send(Message::Text(frames::encode_join(join)?.into()))
        .await
        .map_err(|error| ClientError::WsConnect(Box::new(error)))?;

    Ok(stream)
}
