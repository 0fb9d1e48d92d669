//! The interactive board session.
//!
//! `run` bootstraps the board (load by id, or create and log the shareable
//! URLs), then drives a single select loop over four sources: JSONL input
//! events, frames from the realtime channel, the reconnect timer, and the
//! trailing-cursor timer. The realtime link is its own select arm, so input
//! handling, rendering, and saves keep working while the relay is down or
//! reconnecting; only cursor broadcasts are dropped. All mutation happens on
//! this one task; saves are spawned fire-and-forget so the loop never waits
//! on the network.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use board::engine::{Action, Cursor, EngineCore};
use board::input::InputEvent;
use board::render;
use frames::{ClientFrame, CursorPayload, JoinFrame, ServerFrame};
use futures_util::{SinkExt, StreamExt};
use rand::seq::IndexedRandom;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_tungstenite::tungstenite::Message;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::rate_limit::{Decision, ThrottleDebounce};
use crate::sync::{self, Backoff, ConnectionStatus, WsStream};

const ADJECTIVES: [&str; 10] = [
    "Happy", "Brave", "Clever", "Swift", "Calm", "Fierce", "Gentle", "Wise", "Bold", "Sly",
];
const ANIMALS: [&str; 10] = [
    "Lion", "Tiger", "Bear", "Wolf", "Fox", "Eagle", "Hawk", "Shark", "Panther", "Falcon",
];

/// Pick a random `Adjective Animal` display name for this session.
#[must_use]
pub fn generate_username() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("Calm");
    let animal = ANIMALS.choose(&mut rng).copied().unwrap_or("Fox");
    format!("{adjective} {animal}")
}

/// Everything `run` needs beyond the API client.
pub struct SessionConfig {
    /// Board to join; a fresh board is created when absent.
    pub board_id: Option<String>,
    /// Display name; randomly generated when absent.
    pub username: Option<String>,
    /// Input events path (JSONL), or `-` for stdin.
    pub input: String,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Cursor broadcast window.
    pub cursor_window: Duration,
    /// Write each rendered scene to stdout as a JSON line.
    pub emit_scenes: bool,
}

/// Realtime link state. Input flows through the engine either way; a down
/// link only drops outgoing cursor broadcasts.
enum Link {
    /// No socket; the next connect attempt fires at `retry_at`.
    Down { retry_at: Instant },
    Up(WsStream),
}

struct Session {
    engine: EngineCore,
    api: ApiClient,
    gate: ThrottleDebounce,
    channel: String,
    status: ConnectionStatus,
    emit_scenes: bool,
}

/// Run a session to completion (input exhausted) or a fatal error.
///
/// # Errors
///
/// Returns an error when the board cannot be loaded or created, or on I/O
/// failures reading the input stream. Realtime-channel failures reconnect
/// with backoff instead of erroring; save failures are logged and dropped.
pub async fn run(api: ApiClient, config: SessionConfig) -> Result<(), ClientError> {
    let username = config.username.clone().unwrap_or_else(generate_username);

    let board = match &config.board_id {
        Some(id) => api.load(id).await?,
        None => {
            let board = api.create().await?;
            tracing::info!(board_id = %board.id, "created board");
            board
        }
    };
    tracing::info!(
        username = %username,
        board = %api.board_url(&board.id),
        share = %api.svg_url(&board.id),
        "board ready"
    );

    let channel = frames::board_channel(&board.id);
    let mut engine = EngineCore::new(
        username.clone(),
        config.viewport_width,
        config.viewport_height,
    );
    engine.load_board(board);

    let reader: Box<dyn AsyncRead + Unpin> = if config.input == "-" {
        Box::new(tokio::io::stdin())
    } else {
        Box::new(tokio::fs::File::open(&config.input).await?)
    };

    let mut session = Session {
        engine,
        api,
        gate: ThrottleDebounce::new(config.cursor_window),
        channel,
        status: ConnectionStatus::Disconnected,
        emit_scenes: config.emit_scenes,
    };
    session.emit_scene();
    session.run_loop(&username, reader).await
}

impl Session {
    async fn run_loop(
        &mut self,
        username: &str,
        reader: Box<dyn AsyncRead + Unpin>,
    ) -> Result<(), ClientError> {
        let mut lines = BufReader::new(reader).lines();
        let mut backoff = Backoff::new();
        let mut trailing: Option<(Instant, CursorPayload)> = None;
        let mut link = Link::Down { retry_at: Instant::now() };
        let join = JoinFrame {
            username: username.to_owned(),
            channel: self.channel.clone(),
        };
        self.set_status(ConnectionStatus::Connecting);

        loop {
            let deadline = trailing.as_ref().map(|(deadline, _)| *deadline);
            let retry_at = match &link {
                Link::Down { retry_at } => Some(*retry_at),
                Link::Up(_) => None,
            };
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        // Input exhausted: flush the pending cursor and finish.
                        if let Some((_, payload)) = trailing.take() {
                            if self.gate.commit_trailing() {
                                self.send_cursor(&mut link, payload).await;
                            }
                        }
                        return Ok(());
                    };
                    self.handle_line(&line, &mut link, &mut trailing).await;
                }
                message = next_frame(&mut link) => {
                    match message {
                        Some(Ok(Message::Close(_))) | None => {
                            tracing::warn!("realtime channel closed");
                            self.set_status(ConnectionStatus::Backoff);
                            link = Link::Down { retry_at: Instant::now() + backoff.next_delay() };
                        }
                        Some(Ok(message)) => self.handle_frame(&message),
                        Some(Err(error)) => {
                            tracing::warn!(error = %error, "realtime channel error");
                            self.set_status(ConnectionStatus::Backoff);
                            link = Link::Down { retry_at: Instant::now() + backoff.next_delay() };
                        }
                    }
                }
                connected = connect_after(&self.api, &join, retry_at), if retry_at.is_some() => {
                    match connected {
                        Ok(stream) => {
                            self.set_status(ConnectionStatus::Connected);
                            backoff.reset();
                            tracing::info!(channel = %self.channel, "joined realtime channel");
                            link = Link::Up(stream);
                        }
                        Err(error) => {
                            self.set_status(ConnectionStatus::Backoff);
                            let delay = backoff.next_delay();
                            tracing::warn!(error = %error, ?delay, "websocket connect failed");
                            link = Link::Down { retry_at: Instant::now() + delay };
                        }
                    }
                }
                () = sleep_until(deadline), if deadline.is_some() => {
                    if let Some((_, payload)) = trailing.take() {
                        if self.gate.commit_trailing() {
                            self.send_cursor(&mut link, payload).await;
                        }
                    }
                }
            }
        }
    }

    /// Parse one input line and feed it through the engine. Unrecognized
    /// lines are skipped, matching how the page ignores events it has no
    /// handler for.
    async fn handle_line(
        &mut self,
        line: &str,
        link: &mut Link,
        trailing: &mut Option<(Instant, CursorPayload)>,
    ) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        let event: InputEvent = match serde_json::from_str(trimmed) {
            Ok(event) => event,
            Err(error) => {
                tracing::debug!(error = %error, "skipping unrecognized input line");
                return;
            }
        };

        // Every pointer move broadcasts the cursor, gated to one frame per
        // window with a guaranteed trailing send.
        if let InputEvent::PointerMove { x, y } = &event {
            let payload = CursorPayload {
                username: self.engine.username.clone(),
                x: *x,
                y: *y,
            };
            match self.gate.record_call() {
                Decision::Execute => {
                    *trailing = None;
                    self.send_cursor(link, payload).await;
                }
                Decision::Deferred(deadline) => {
                    *trailing = Some((deadline, payload));
                }
            }
        }

        let action = self.engine.handle_event(event, now_ms());
        self.apply_action(action);
    }

    /// Dispatch one frame from the relay. Malformed or unknown frames are
    /// no-ops and do not force a redraw.
    fn handle_frame(&mut self, message: &Message) {
        let Message::Text(text) = message else {
            return;
        };
        match frames::decode_server_frame(text.as_str()) {
            Ok(ServerFrame::Cursor { payload }) => {
                let action = self.engine.apply_cursor(Cursor {
                    username: payload.username,
                    x: payload.x,
                    y: payload.y,
                });
                self.apply_action(action);
            }
            Ok(ServerFrame::Board { payload }) => {
                let action = self.engine.replace_board(payload.payload);
                self.apply_action(action);
            }
            Ok(ServerFrame::Unknown) => tracing::debug!("ignoring unknown frame"),
            Err(error) => tracing::debug!(error = %error, "ignoring malformed frame"),
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::RenderNeeded => self.emit_scene(),
            Action::BoardChanged => {
                self.emit_scene();
                self.spawn_save();
            }
        }
    }

    /// Persist the current board on a spawned task; the session never waits
    /// for the response and applies local mutations optimistically.
    fn spawn_save(&self) {
        let api = self.api.clone();
        let board = self.engine.doc.board().clone();
        tokio::spawn(async move {
            match api.save(&board).await {
                Ok(true) => {}
                Ok(false) => tracing::warn!(board_id = %board.id, "save rejected by server"),
                Err(error) => tracing::warn!(error = %error, "save failed"),
            }
        });
    }

    fn emit_scene(&self) {
        if !self.emit_scenes {
            return;
        }
        let scene = render::render(&self.engine);
        // One JSON line per frame for the host rasterizer.
        if let Ok(json) = serde_json::to_string(&scene) {
            println!("{json}");
        }
    }

    async fn send_cursor(&self, link: &mut Link, payload: CursorPayload) {
        let Link::Up(stream) = link else {
            tracing::debug!("cursor broadcast dropped while the channel is down");
            return;
        };
        let frame = ClientFrame::Cursor {
            channel: self.channel.clone(),
            payload,
        };
        let text = match frames::encode_client_frame(&frame) {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(error = %error, "cursor frame encode failed");
                return;
            }
        };
        if let Err(error) = stream.send(Message::Text(text.into())).await {
            tracing::warn!(error = %error, "cursor broadcast failed");
        }
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        if self.status != status {
            tracing::debug!(from = ?self.status, to = ?status, "connection status");
            self.status = status;
        }
    }
}

/// Next inbound frame, or pending forever while the link is down.
async fn next_frame(
    link: &mut Link,
) -> Option<Result<Message, tokio_tungstenite::tungstenite::Error>> {
    match link {
        Link::Up(stream) => stream.next().await,
        Link::Down { .. } => std::future::pending().await,
    }
}

/// Wait out the retry delay, then attempt a connect. Pending forever when no
/// retry is scheduled; the select arm's precondition keeps it unpolled then.
async fn connect_after(
    api: &ApiClient,
    join: &JoinFrame,
    retry_at: Option<Instant>,
) -> Result<WsStream, ClientError> {
    let Some(retry_at) = retry_at else {
        return std::future::pending().await;
    };
    tokio::time::sleep_until(tokio::time::Instant::from_std(retry_at)).await;
    sync::connect(api.base_url(), join).await
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        }
        None => std::future::pending().await,
    }
}

fn now_ms() -> i64 {
    let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(duration.as_millis()).unwrap_or(0)
}
