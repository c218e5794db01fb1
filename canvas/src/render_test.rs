#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::CanvasItem;
use crate::input::{DragSession, PlacementSession};

fn doc_with(items: &[CanvasItem]) -> DocStore {
    let mut doc = DocStore::new();
    for item in items {
        doc.insert(item.clone());
    }
    doc
}

fn circle(id: ItemId, x: f64, y: f64) -> CanvasItem {
    CanvasItem { id, shape: ShapeKind::Circle, x, y, size: 80.0 }
}

// =============================================================
// shape_primitive
// =============================================================

#[test]
fn circle_is_disc_of_size() {
    assert_eq!(shape_primitive(ShapeKind::Circle, 80.0), Primitive::Disc { diameter: 80.0, fill: CIRCLE_FILL });
}

#[test]
fn square_is_square_of_size() {
    assert_eq!(shape_primitive(ShapeKind::Square, 50.0), Primitive::Square { side: 50.0, fill: SQUARE_FILL });
}

#[test]
fn triangle_base_and_height_equal_size() {
    let p = shape_primitive(ShapeKind::Triangle, 120.0);
    assert_eq!(p.extent(), (120.0, 120.0));
}

#[test]
fn kinds_have_distinct_fills() {
    let fills: Vec<&str> = ShapeKind::ALL
        .iter()
        .map(|k| match shape_primitive(*k, 10.0) {
            Primitive::Disc { fill, .. } | Primitive::Square { fill, .. } | Primitive::Triangle { fill, .. } => fill,
        })
        .collect();
    assert_ne!(fills[0], fills[1]);
    assert_ne!(fills[1], fills[2]);
    assert_ne!(fills[0], fills[2]);
}

// =============================================================
// scene
// =============================================================

#[test]
fn empty_scene() {
    let ops = scene(&DocStore::new(), &UiState::default(), &InputState::Idle);
    assert!(ops.is_empty());
}

#[test]
fn items_drawn_in_list_order_at_full_opacity() {
    let doc = doc_with(&[circle(1, 0.0, 0.0), circle(2, 50.0, 60.0)]);
    let ops = scene(&doc, &UiState::default(), &InputState::Idle);
    assert_eq!(ops.len(), 2);
    let DrawOp::Shape { item_id, origin, opacity, .. } = ops[1] else {
        panic!("expected shape op");
    };
    assert_eq!(item_id, Some(2));
    assert_eq!(origin, Point::new(50.0, 60.0));
    assert_eq!(opacity, 1.0);
}

#[test]
fn selected_item_gets_ring_and_handle() {
    let doc = doc_with(&[circle(1, 10.0, 20.0)]);
    let ui = UiState { selected_id: Some(1), ..Default::default() };
    let ops = scene(&doc, &ui, &InputState::Idle);
    assert!(ops.contains(&DrawOp::SelectionRing { origin: Point::new(10.0, 20.0), size: 80.0 }));
    assert!(ops.contains(&DrawOp::Handle { center: Point::new(90.0, 100.0), radius: HANDLE_RADIUS_PX }));
}

#[test]
fn unselected_items_have_no_handle() {
    let doc = doc_with(&[circle(1, 10.0, 20.0)]);
    let ops = scene(&doc, &UiState::default(), &InputState::Idle);
    assert!(!ops.iter().any(|op| matches!(op, DrawOp::Handle { .. })));
}

#[test]
fn ghost_follows_preview_at_half_opacity() {
    let ui = UiState { preview: Some(Point::new(100.0, 100.0)), ..Default::default() };
    let input = InputState::Placing(PlacementSession::centred(ShapeKind::Triangle));
    let ops = scene(&DocStore::new(), &ui, &input);
    assert_eq!(
        ops,
        vec![DrawOp::Shape {
            item_id: None,
            origin: Point::new(60.0, 60.0),
            primitive: shape_primitive(ShapeKind::Triangle, 80.0),
            opacity: 0.5,
        }]
    );
}

#[test]
fn no_ghost_before_first_pointer_move() {
    let input = InputState::Placing(PlacementSession::centred(ShapeKind::Circle));
    let ops = scene(&DocStore::new(), &UiState::default(), &input);
    assert!(ops.is_empty());
}

#[test]
fn no_ghost_outside_placement() {
    let doc = doc_with(&[circle(1, 0.0, 0.0)]);
    let ui = UiState { preview: Some(Point::new(5.0, 5.0)), ..Default::default() };
    let input = InputState::Dragging(DragSession { id: 1, offset_x: 0.0, offset_y: 0.0, moved: true });
    let ops = scene(&doc, &ui, &input);
    assert_eq!(ops.len(), 1);
}
