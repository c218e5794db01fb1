use canvas::doc::{CanvasItem, ShapeKind};
use serde_json::json;

use super::*;

fn drawing() -> Drawing {
    Drawing {
        drawing_name: "yard".into(),
        canvas_items: vec![CanvasItem { id: 7, shape: ShapeKind::Square, x: 10.0, y: 20.0, size: 80.0 }],
    }
}

// =============================================================
// endpoint
// =============================================================

#[test]
fn endpoint_joins_segments() {
    let url = endpoint("http://127.0.0.1:4000", &["save", "drawing"]).unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:4000/save/drawing");
}

#[test]
fn endpoint_tolerates_trailing_slash() {
    let url = endpoint("http://127.0.0.1:4000/", &["healthz"]).unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:4000/healthz");
}

#[test]
fn endpoint_encodes_username() {
    let url = endpoint("http://h", &["load", "drawing", "ana maria/2"]).unwrap();
    assert_eq!(url.as_str(), "http://h/load/drawing/ana%20maria%2F2");
}

#[test]
fn endpoint_rejects_bad_base() {
    assert!(matches!(endpoint("not a url", &["healthz"]), Err(RemoteError::InvalidBaseUrl(_))));
}

// =============================================================
// payloads
// =============================================================

#[test]
fn save_body_wraps_drawing() {
    let body = save_body("alice", &drawing());
    assert_eq!(body["username"], "alice");
    assert_eq!(body["data"]["drawingName"], "yard");
    assert_eq!(body["data"]["canvasItems"][0]["shape"], "Square");
}

#[test]
fn latest_drawing_uses_first_row() {
    let rows = vec![
        SavedRow { id: 9, data: json!({ "drawingName": "newest", "canvasItems": [] }) },
        SavedRow { id: 3, data: json!({ "drawingName": "oldest", "canvasItems": [] }) },
    ];
    let saved = latest_drawing("alice", rows).unwrap();
    assert_eq!(saved.id, 9);
    assert_eq!(saved.drawing.drawing_name, "newest");
}

#[test]
fn latest_drawing_without_rows_fails() {
    assert!(matches!(latest_drawing("alice", vec![]), Err(RemoteError::NoDrawings(u)) if u == "alice"));
}

#[test]
fn latest_drawing_validates_payload() {
    let rows = vec![SavedRow { id: 1, data: json!({ "canvasItems": [{ "id": 1, "shape": "Star", "x": 0, "y": 0, "size": 80 }] }) }];
    assert!(matches!(latest_drawing("alice", rows), Err(RemoteError::Invalid(_))));
}

// =============================================================
// username precondition
// =============================================================

#[tokio::test]
async fn save_requires_username() {
    let store = RemoteStore::new("http://127.0.0.1:1");
    assert!(matches!(store.save("", &drawing()).await, Err(RemoteError::MissingUsername)));
}

#[tokio::test]
async fn load_requires_username() {
    let store = RemoteStore::new("http://127.0.0.1:1");
    assert!(matches!(store.load("").await, Err(RemoteError::MissingUsername)));
}
