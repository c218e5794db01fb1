//! Input model: sessions, window listener sets, and the gesture state machine.
//!
//! `InputState` is the single active interaction, tracked from the gesture's
//! start (palette press, item press, handle press) until it ends. Each active
//! variant carries the context captured at its start so later pointer events
//! can be resolved without consulting anything else. `UiState` is the
//! persistent, renderer-visible state that outlives sessions.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::PLACEMENT_OFFSET;
use crate::doc::{ItemId, ShapeKind};
use crate::surface::Point;

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Enter"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_enter(&self) -> bool {
        self.0 == "Enter"
    }
}

/// A shape chosen from the palette whose location is not yet committed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementSession {
    pub shape: ShapeKind,
    /// Pointer offset from the future item's left edge.
    pub offset_x: f64,
    /// Pointer offset from the future item's top edge.
    pub offset_y: f64,
}

impl PlacementSession {
    /// A placement centred on the pointer for the default preview size.
    #[must_use]
    pub fn centred(shape: ShapeKind) -> Self {
        Self { shape, offset_x: PLACEMENT_OFFSET, offset_y: PLACEMENT_OFFSET }
    }

    /// Top-left corner of the item this session would create at `pointer`.
    #[must_use]
    pub fn origin_at(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.offset_x, pointer.y - self.offset_y)
    }
}

/// An in-progress move of an existing item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub id: ItemId,
    /// Pointer x minus item x at drag start.
    pub offset_x: f64,
    /// Pointer y minus item y at drag start.
    pub offset_y: f64,
    /// Whether the pointer moved since the press. A press without movement is a click.
    pub moved: bool,
}

/// An in-progress size change of an existing item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    pub id: ItemId,
    /// Pointer x at resize start.
    pub start_x: f64,
    /// Pointer y at resize start.
    pub start_y: f64,
    /// Item size at resize start.
    pub start_size: f64,
}

/// The active interaction. Exactly one variant is live at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A palette shape follows the pointer until the next canvas press.
    Placing(PlacementSession),
    /// An item follows the pointer until release.
    Dragging(DragSession),
    /// An item grows or shrinks with the pointer until release.
    Resizing(ResizeSession),
}

impl InputState {
    /// Window-level listeners this state needs while it is active.
    #[must_use]
    pub fn listeners(&self) -> Option<Listen> {
        match self {
            Self::Idle => None,
            Self::Placing(_) => Some(Listen::Move),
            Self::Dragging(_) | Self::Resizing(_) => Some(Listen::MoveAndUp),
        }
    }

    /// Id of the item a drag or resize is operating on.
    #[must_use]
    pub fn target_id(&self) -> Option<ItemId> {
        match self {
            Self::Dragging(s) => Some(s.id),
            Self::Resizing(s) => Some(s.id),
            Self::Idle | Self::Placing(_) => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Placing(_) => "placing",
            Self::Dragging(_) => "dragging",
            Self::Resizing(_) => "resizing",
        }
    }
}

/// A set of window-level listeners a session holds for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Listen {
    /// Pointer-move only (placement preview tracking).
    Move,
    /// Pointer-move and pointer-up (drag and resize).
    MoveAndUp,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// The id of the currently selected item, if any.
    pub selected_id: Option<ItemId>,
    /// Live pointer position (canvas-local) while placing; drives the ghost.
    pub preview: Option<Point>,
    /// Whether the header's drawing-name editor is open.
    pub editing_name: bool,
}
