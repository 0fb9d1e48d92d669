//! REST persistence client for board documents.
//!
//! Three round trips, one per board operation: load, create, save. Saves are
//! deliberately fire-and-forget from the session's perspective: callers get
//! only a success flag and the board is never re-read from the response, so
//! out-of-order PUT completions cannot corrupt local state.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use board::doc::Board;

use crate::error::ClientError;

/// HTTP client bound to one server base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The normalized server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a board by id via `GET /api/boards/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on a non-success status and
    /// [`ClientError::Http`] on transport failures.
    pub async fn load(&self, board_id: &str) -> Result<Board, ClientError> {
        let url = format!("{}/api/boards/{board_id}", self.base_url);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                operation: "load board",
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    /// Allocate a fresh board via `POST /api/boards`. The server assigns
    /// the id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on a non-success status and
    /// [`ClientError::Http`] on transport failures.
    pub async fn create(&self) -> Result<Board, ClientError> {
        let url = format!("{}/api/boards", self.base_url);
        let response = self.http.post(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                operation: "create board",
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    /// PUT the full board via `PUT /api/boards/{id}`. Returns whether the
    /// server acknowledged success; the response body is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport failures only; a rejecting
    /// status code is reported through the `Ok` flag.
    pub async fn save(&self, board: &Board) -> Result<bool, ClientError> {
        let url = format!("{}/api/boards/{}", self.base_url, board.id);
        let response = self.http.put(url).json(board).send().await?;
        Ok(response.status().is_success())
    }

    /// The address-bar URL for a board.
    #[must_use]
    pub fn board_url(&self, board_id: &str) -> String {
        format!("{}/boards/{board_id}", self.base_url)
    }

    /// The adjacent shareable SVG export URL for a board.
    #[must_use]
    pub fn svg_url(&self, board_id: &str) -> String {
        format!("{}.svg", self.board_url(board_id))
    }
}
