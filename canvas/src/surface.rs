//! Canvas-local coordinates.
//!
//! Pointer events arrive in viewport (client) coordinates. Everything the
//! engine stores or computes is relative to the canvas surface's own bounding
//! box, so page scroll and surface placement never leak into item positions.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use serde::{Deserialize, Serialize};

/// A point in either client or canvas-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn minus(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Bounding box of the canvas surface in client coordinates.
///
/// `left` / `top` are the surface origin as reported by the host
/// (e.g. `getBoundingClientRect()`); `width` / `height` its extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surface {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Surface {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a client-space point to canvas-local coordinates.
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        Point { x: client.x - self.left, y: client.y - self.top }
    }

    /// Whether a canvas-local point lies within the surface bounds.
    #[must_use]
    pub fn contains_local(&self, local: Point) -> bool {
        local.x >= 0.0 && local.y >= 0.0 && local.x <= self.width && local.y <= self.height
    }
}
