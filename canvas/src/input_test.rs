#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Key
// =============================================================

#[test]
fn key_enter_detection() {
    assert!(Key("Enter".into()).is_enter());
    assert!(!Key("Escape".into()).is_enter());
    assert!(!Key("enter".into()).is_enter());
}

// =============================================================
// PlacementSession
// =============================================================

#[test]
fn placement_centred_uses_fixed_offset() {
    let s = PlacementSession::centred(ShapeKind::Circle);
    assert_eq!(s.offset_x, 40.0);
    assert_eq!(s.offset_y, 40.0);
}

#[test]
fn placement_origin_subtracts_offset() {
    let s = PlacementSession::centred(ShapeKind::Circle);
    assert_eq!(s.origin_at(Point::new(100.0, 100.0)), Point::new(60.0, 60.0));
}

#[test]
fn placement_origin_near_edge_goes_negative() {
    let s = PlacementSession::centred(ShapeKind::Square);
    assert_eq!(s.origin_at(Point::new(10.0, 0.0)), Point::new(-30.0, -40.0));
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}

#[test]
fn idle_holds_no_listeners() {
    assert_eq!(InputState::Idle.listeners(), None);
}

#[test]
fn placing_listens_to_move_only() {
    let state = InputState::Placing(PlacementSession::centred(ShapeKind::Triangle));
    assert_eq!(state.listeners(), Some(Listen::Move));
}

#[test]
fn drag_and_resize_listen_to_move_and_up() {
    let drag = InputState::Dragging(DragSession { id: 1, offset_x: 0.0, offset_y: 0.0, moved: false });
    let resize = InputState::Resizing(ResizeSession { id: 1, start_x: 0.0, start_y: 0.0, start_size: 80.0 });
    assert_eq!(drag.listeners(), Some(Listen::MoveAndUp));
    assert_eq!(resize.listeners(), Some(Listen::MoveAndUp));
}

#[test]
fn target_id_only_for_item_sessions() {
    let drag = InputState::Dragging(DragSession { id: 7, offset_x: 0.0, offset_y: 0.0, moved: false });
    let resize = InputState::Resizing(ResizeSession { id: 9, start_x: 0.0, start_y: 0.0, start_size: 80.0 });
    assert_eq!(drag.target_id(), Some(7));
    assert_eq!(resize.target_id(), Some(9));
    assert_eq!(InputState::Idle.target_id(), None);
    assert_eq!(InputState::Placing(PlacementSession::centred(ShapeKind::Circle)).target_id(), None);
}

#[test]
fn input_state_names() {
    assert_eq!(InputState::Idle.name(), "idle");
    assert_eq!(InputState::Placing(PlacementSession::centred(ShapeKind::Circle)).name(), "placing");
}

// =============================================================
// Listen / UiState
// =============================================================

#[test]
fn listen_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&Listen::MoveAndUp).unwrap(), "\"move_and_up\"");
}

#[test]
fn ui_state_default_is_blank() {
    let ui = UiState::default();
    assert!(ui.selected_id.is_none());
    assert!(ui.preview.is_none());
    assert!(!ui.editing_name);
}
