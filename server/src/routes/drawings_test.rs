use serde_json::json;

use super::*;
use crate::state::test_helpers::{drawing_payload, test_app_state};

fn body(value: serde_json::Value) -> Result<Json<SaveDrawingBody>, JsonRejection> {
    Ok(Json(serde_json::from_value(value).unwrap()))
}

#[test]
fn drawing_error_maps_to_internal_error() {
    let err = drawing::DrawingError::Database(sqlx::Error::RowNotFound);
    let api = drawing_error_to_status(err);
    assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(api.message, "storage failure");
}

#[tokio::test]
async fn save_returns_id() {
    let state = test_app_state().await;
    let Json(resp) = save_drawing(State(state), body(json!({ "username": "alice", "data": drawing_payload("x") })))
        .await
        .unwrap();
    assert!(resp.id > 0);
}

#[tokio::test]
async fn save_without_username_is_bad_request() {
    let state = test_app_state().await;
    let err = save_drawing(State(state), body(json!({ "data": drawing_payload("x") })))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError { status: StatusCode::BAD_REQUEST, message: "username and data required" });
}

#[tokio::test]
async fn save_with_empty_username_is_bad_request() {
    let state = test_app_state().await;
    let err = save_drawing(State(state), body(json!({ "username": "", "data": drawing_payload("x") })))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_with_null_data_is_bad_request() {
    let state = test_app_state().await;
    let err = save_drawing(State(state), body(json!({ "username": "alice", "data": null })))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejected_request_stores_nothing() {
    let state = test_app_state().await;
    let err = save_drawing(State(state.clone()), body(json!({ "username": "alice" }))).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    let Json(rows) = load_drawings(State(state), Path("alice".into())).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn load_returns_saved_drawings_newest_first() {
    let state = test_app_state().await;
    let mut ids = Vec::new();
    for name in ["first", "second"] {
        let Json(saved) =
            save_drawing(State(state.clone()), body(json!({ "username": "alice", "data": drawing_payload(name) })))
                .await
                .unwrap();
        ids.push(saved.id);
    }
    assert!(ids[0] < ids[1]);

    let Json(rows) = load_drawings(State(state), Path("alice".into())).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].data["drawingName"], "second");
    assert_eq!(rows[1].data["drawingName"], "first");
}

#[tokio::test]
async fn load_response_shape() {
    let state = test_app_state().await;
    let Json(saved) =
        save_drawing(State(state.clone()), body(json!({ "username": "bob", "data": drawing_payload("shape") })))
            .await
            .unwrap();
    let Json(rows) = load_drawings(State(state), Path("bob".into())).await.unwrap();
    let value = serde_json::to_value(&rows).unwrap();
    assert_eq!(value[0]["id"], saved.id);
    assert_eq!(value[0]["data"]["canvasItems"][1]["shape"], "Triangle");
}
