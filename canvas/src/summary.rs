//! Summary: per-kind item counts shown beneath the canvas.
//!
//! Recomputed from the item list on every render; nothing is cached.

#[cfg(test)]
#[path = "summary_test.rs"]
mod summary_test;

use serde::Serialize;

use crate::consts::SUMMARY_ICON_SIZE;
use crate::doc::{CanvasItem, ShapeKind};
use crate::render::{Primitive, shape_primitive};

/// How many items of each kind are on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShapeCounts {
    pub circle: usize,
    pub square: usize,
    pub triangle: usize,
}

impl ShapeCounts {
    /// Count items by kind.
    #[must_use]
    pub fn tally(items: &[CanvasItem]) -> Self {
        let mut counts = Self::default();
        for item in items {
            *counts.slot(item.shape) += 1;
        }
        counts
    }

    #[must_use]
    pub fn get(&self, shape: ShapeKind) -> usize {
        match shape {
            ShapeKind::Circle => self.circle,
            ShapeKind::Square => self.square,
            ShapeKind::Triangle => self.triangle,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.circle + self.square + self.triangle
    }

    /// `(kind, icon, count)` rows in palette order, zero counts included.
    #[must_use]
    pub fn entries(&self) -> Vec<(ShapeKind, Primitive, usize)> {
        ShapeKind::ALL
            .into_iter()
            .map(|shape| (shape, shape_primitive(shape, SUMMARY_ICON_SIZE), self.get(shape)))
            .collect()
    }

    fn slot(&mut self, shape: ShapeKind) -> &mut usize {
        match shape {
            ShapeKind::Circle => &mut self.circle,
            ShapeKind::Square => &mut self.square,
            ShapeKind::Triangle => &mut self.triangle,
        }
    }
}
