//! Client for the drawing server's save/load endpoints.
//!
//! Every call needs a non-empty username; an empty one fails before any
//! request is sent. Failures are returned as-is with no retry.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use canvas::doc::Drawing;
use canvas::persist::{self, ImportError, SavedDrawing, SavedRow};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("a username is required")]
    MissingUsername,
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("no saved drawings for {0}")]
    NoDrawings(String),
    #[error("saved drawing is not valid: {0}")]
    Invalid(#[from] ImportError),
}

#[derive(Deserialize)]
struct SaveResponse {
    id: i64,
}

pub struct RemoteStore {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteStore {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), client: reqwest::Client::new() }
    }

    /// Check that the server answers its health endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not a success.
    pub async fn ping(&self) -> Result<(), RemoteError> {
        let url = endpoint(&self.base_url, &["healthz"])?;
        let response = self.client.get(url).send().await?;
        check_status(response).await.map(|_| ())
    }

    /// Save `drawing` under `username` and return the stored id.
    ///
    /// # Errors
    ///
    /// Returns `MissingUsername` for an empty username, otherwise any HTTP or
    /// server error.
    pub async fn save(&self, username: &str, drawing: &Drawing) -> Result<i64, RemoteError> {
        require_username(username)?;
        let url = endpoint(&self.base_url, &["save", "drawing"])?;
        let response = self.client.post(url).json(&save_body(username, drawing)).send().await?;
        let saved: SaveResponse = check_status(response).await?.json().await?;
        Ok(saved.id)
    }

    /// Fetch the most recently saved drawing for `username`, with its row id.
    ///
    /// # Errors
    ///
    /// Returns `MissingUsername` for an empty username, `NoDrawings` if the
    /// user has none, `Invalid` if the stored drawing does not validate, or
    /// any HTTP or server error.
    pub async fn load(&self, username: &str) -> Result<SavedDrawing, RemoteError> {
        require_username(username)?;
        let url = endpoint(&self.base_url, &["load", "drawing", username])?;
        let response = self.client.get(url).send().await?;
        let rows: Vec<SavedRow> = check_status(response).await?.json().await?;
        latest_drawing(username, rows)
    }
}

fn require_username(username: &str) -> Result<(), RemoteError> {
    if username.is_empty() {
        return Err(RemoteError::MissingUsername);
    }
    Ok(())
}

/// Join path segments onto the base URL, percent-encoding each one.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, RemoteError> {
    let mut url = Url::parse(base_url).map_err(|e| RemoteError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| RemoteError::InvalidBaseUrl(base_url.to_owned()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn save_body(username: &str, drawing: &Drawing) -> Value {
    serde_json::json!({ "username": username, "data": drawing })
}

/// The first row is the most recent; validate it as a drawing.
pub(crate) fn latest_drawing(username: &str, rows: Vec<SavedRow>) -> Result<SavedDrawing, RemoteError> {
    persist::latest_saved(rows).map_err(|e| match e {
        ImportError::NoSavedDrawing => RemoteError::NoDrawings(username.to_owned()),
        other => RemoteError::Invalid(other),
    })
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<Value>()
        .await
        .map(|body| body.get("error").and_then(Value::as_str).map_or_else(|| body.to_string(), str::to_owned))
        .unwrap_or_default();
    Err(RemoteError::Server { status: status.as_u16(), message })
}
