//! Drawing save/load routes.

#[cfg(test)]
#[path = "drawings_test.rs"]
mod drawings_test;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::services::drawing::{self, SavedDrawing};
use crate::state::AppState;

const MISSING_FIELDS: &str = "username and data required";
const STORAGE_FAILURE: &str = "storage failure";

/// Error response: a status code and a `{ "error": message }` body.
#[derive(Debug, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

pub(crate) fn drawing_error_to_status(err: drawing::DrawingError) -> ApiError {
    error!(error = %err, "drawing storage failed");
    ApiError { status: StatusCode::INTERNAL_SERVER_ERROR, message: STORAGE_FAILURE }
}

#[derive(Debug, Deserialize)]
pub struct SaveDrawingBody {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SaveDrawingResponse {
    pub id: i64,
}

fn missing_fields() -> ApiError {
    ApiError { status: StatusCode::BAD_REQUEST, message: MISSING_FIELDS }
}

/// `POST /save/drawing`: store a drawing for a user.
pub async fn save_drawing(
    State(state): State<AppState>,
    body: Result<Json<SaveDrawingBody>, JsonRejection>,
) -> Result<Json<SaveDrawingResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        warn!(%rejection, "save body rejected");
        missing_fields()
    })?;
    let (Some(username), Some(data)) = (body.username, body.data) else {
        return Err(missing_fields());
    };
    if username.is_empty() {
        return Err(missing_fields());
    }

    let id = drawing::save_drawing(&state.pool, &username, &data)
        .await
        .map_err(drawing_error_to_status)?;

    Ok(Json(SaveDrawingResponse { id }))
}

/// `GET /load/drawing/{username}`: a user's drawings, most recent first.
pub async fn load_drawings(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<SavedDrawing>>, ApiError> {
    let rows = drawing::load_drawings(&state.pool, &username)
        .await
        .map_err(drawing_error_to_status)?;

    Ok(Json(rows))
}
