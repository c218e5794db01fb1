//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the drawing endpoints under a single Axum router. The
//! browser app is served from a different origin, so CORS is fully open.

pub mod drawings;


use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/save/drawing", post(drawings::save_drawing))
        .route("/load/drawing/{username}", get(drawings::load_drawings))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
