//! Palette: the shape kinds a user can start placing, with their icons.
//!
//! Engaging an entry (pointer-down in the host's sidebar) hands its kind to
//! [`crate::engine::EngineCore::begin_placement`].

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use crate::consts::PALETTE_ICON_SIZE;
use crate::doc::ShapeKind;
use crate::render::{Primitive, shape_primitive};

/// One selectable shape in the palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    pub shape: ShapeKind,
    pub icon: Primitive,
}

/// All palette entries, in display order.
#[must_use]
pub fn entries() -> Vec<PaletteEntry> {
    ShapeKind::ALL
        .into_iter()
        .map(|shape| PaletteEntry { shape, icon: shape_primitive(shape, PALETTE_ICON_SIZE) })
        .collect()
}
