//! Drawing service: save and load drawings keyed by username.
//!
//! DESIGN
//! ======
//! A drawing is stored as an opaque JSON document. Every save inserts a new
//! row; nothing is updated or deleted. Loads return all of a user's rows,
//! most recent first, and the caller decides which one to use.
//!
//! ERROR HANDLING
//! ==============
//! Payloads are not validated beyond being JSON. A stored row that no longer
//! parses is reported as `Corrupt` rather than skipped.

#[cfg(test)]
#[path = "drawing_test.rs"]
mod drawing_test;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DrawingError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to encode drawing: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("stored drawing {id} is not valid JSON: {source}")]
    Corrupt { id: i64, source: serde_json::Error },
}

/// One stored drawing as returned by the load endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedDrawing {
    pub id: i64,
    pub data: serde_json::Value,
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

// =============================================================================
// SAVE / LOAD
// =============================================================================

/// Store a drawing for `username` and return its row id.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn save_drawing(pool: &SqlitePool, username: &str, data: &serde_json::Value) -> Result<i64, DrawingError> {
    let text = serde_json::to_string(data)?;
    let result = sqlx::query("INSERT INTO drawings (username, data, created_at) VALUES (?, ?, ?)")
        .bind(username)
        .bind(text)
        .bind(now_ms())
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    info!(%username, id, "drawing saved");
    Ok(id)
}

/// All drawings stored for `username`, most recent first.
///
/// Rows saved within the same millisecond are ordered by id, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails, or `Corrupt` if a stored
/// document is not valid JSON.
pub async fn load_drawings(pool: &SqlitePool, username: &str) -> Result<Vec<SavedDrawing>, DrawingError> {
    let rows = sqlx::query_as::<_, (i64, String)>(
        "SELECT id, data
         FROM drawings
         WHERE username = ?
         ORDER BY created_at DESC, id DESC",
    )
    .bind(username)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(id, text)| {
            serde_json::from_str(&text)
                .map(|data| SavedDrawing { id, data })
                .map_err(|source| DrawingError::Corrupt { id, source })
        })
        .collect()
}
