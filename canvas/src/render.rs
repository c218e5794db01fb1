//! Rendering: shape primitives, the scene display list, and the 2D painter.
//!
//! Rendering is split in two. [`scene`] turns read-only views of document and
//! UI state into a flat list of [`DrawOp`]s; it is pure and testable without a
//! browser. [`paint`] is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]; it replays the list and mutates no
//! application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{DEFAULT_SIZE, HANDLE_RADIUS_PX, PREVIEW_OPACITY, SELECTION_RING_PX};
use crate::doc::{DocStore, ItemId, ShapeKind};
use crate::hit::handle_center;
use crate::input::{InputState, UiState};
use crate::surface::Point;

const CIRCLE_FILL: &str = "#60A5FA";
const SQUARE_FILL: &str = "#4ADE80";
const TRIANGLE_FILL: &str = "#EF4444";
const SELECTION_STROKE: &str = "#60A5FA";
const HANDLE_STROKE: &str = "#3B82F6";
const HANDLE_FILL: &str = "#FFFFFF";

/// A visual primitive for one shape at one size, positioned at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Filled disc inscribed in a `diameter` square.
    Disc { diameter: f64, fill: &'static str },
    /// Filled axis-aligned square.
    Square { side: f64, fill: &'static str },
    /// Filled isoceles triangle, apex at top centre.
    Triangle { base: f64, height: f64, fill: &'static str },
}

impl Primitive {
    /// Width and height of the primitive's bounding box.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        match *self {
            Self::Disc { diameter, .. } => (diameter, diameter),
            Self::Square { side, .. } => (side, side),
            Self::Triangle { base, height, .. } => (base, height),
        }
    }
}

/// Map a shape kind and size to its visual primitive.
#[must_use]
pub fn shape_primitive(shape: ShapeKind, size: f64) -> Primitive {
    match shape {
        ShapeKind::Circle => Primitive::Disc { diameter: size, fill: CIRCLE_FILL },
        ShapeKind::Square => Primitive::Square { side: size, fill: SQUARE_FILL },
        ShapeKind::Triangle => Primitive::Triangle { base: size, height: size, fill: TRIANGLE_FILL },
    }
}

/// One entry of the display list, in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    /// A placed item or the placement ghost.
    Shape {
        /// The item drawn, `None` for the ghost.
        item_id: Option<ItemId>,
        origin: Point,
        primitive: Primitive,
        opacity: f64,
    },
    /// Ring around the selected item's bounding square.
    SelectionRing { origin: Point, size: f64 },
    /// Resize affordance on the selected item's bottom-right corner.
    Handle { center: Point, radius: f64 },
}

/// Build the display list: items bottom first, selection chrome, then the ghost.
#[must_use]
pub fn scene(doc: &DocStore, ui: &UiState, input: &InputState) -> Vec<DrawOp> {
    let mut ops: Vec<DrawOp> = doc
        .items()
        .iter()
        .map(|item| DrawOp::Shape {
            item_id: Some(item.id),
            origin: Point::new(item.x, item.y),
            primitive: shape_primitive(item.shape, item.size),
            opacity: 1.0,
        })
        .collect();

    if let Some(item) = ui.selected_id.and_then(|id| doc.get(id)) {
        ops.push(DrawOp::SelectionRing { origin: Point::new(item.x, item.y), size: item.size });
        ops.push(DrawOp::Handle { center: handle_center(item), radius: HANDLE_RADIUS_PX });
    }

    if let (InputState::Placing(session), Some(preview)) = (input, ui.preview) {
        ops.push(DrawOp::Shape {
            item_id: None,
            origin: session.origin_at(preview),
            primitive: shape_primitive(session.shape, DEFAULT_SIZE),
            opacity: PREVIEW_OPACITY,
        });
    }

    ops
}

/// Replay a display list onto a 2D context.
///
/// `width` and `height` are the surface size in CSS pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn paint(ctx: &CanvasRenderingContext2d, ops: &[DrawOp], width: f64, height: f64) -> Result<(), JsValue> {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, width, height);

    for op in ops {
        match *op {
            DrawOp::Shape { origin, primitive, opacity, .. } => {
                ctx.save();
                ctx.set_global_alpha(opacity);
                paint_primitive(ctx, origin, primitive)?;
                ctx.restore();
            }
            DrawOp::SelectionRing { origin, size } => {
                ctx.set_stroke_style_str(SELECTION_STROKE);
                ctx.set_line_width(SELECTION_RING_PX);
                let pad = SELECTION_RING_PX / 2.0;
                ctx.stroke_rect(origin.x - pad, origin.y - pad, size + SELECTION_RING_PX, size + SELECTION_RING_PX);
            }
            DrawOp::Handle { center, radius } => {
                ctx.begin_path();
                ctx.arc(center.x, center.y, radius - 1.0, 0.0, 2.0 * PI)?;
                ctx.set_fill_style_str(HANDLE_FILL);
                ctx.fill();
                ctx.set_stroke_style_str(HANDLE_STROKE);
                ctx.set_line_width(2.0);
                ctx.stroke();
            }
        }
    }

    Ok(())
}

fn paint_primitive(ctx: &CanvasRenderingContext2d, origin: Point, primitive: Primitive) -> Result<(), JsValue> {
    match primitive {
        Primitive::Disc { diameter, fill } => {
            let r = diameter / 2.0;
            ctx.begin_path();
            ctx.arc(origin.x + r, origin.y + r, r, 0.0, 2.0 * PI)?;
            ctx.set_fill_style_str(fill);
            ctx.fill();
        }
        Primitive::Square { side, fill } => {
            ctx.set_fill_style_str(fill);
            ctx.fill_rect(origin.x, origin.y, side, side);
        }
        Primitive::Triangle { base, height, fill } => {
            ctx.begin_path();
            ctx.move_to(origin.x + base / 2.0, origin.y);
            ctx.line_to(origin.x + base, origin.y + height);
            ctx.line_to(origin.x, origin.y + height);
            ctx.close_path();
            ctx.set_fill_style_str(fill);
            ctx.fill();
        }
    }
    Ok(())
}
