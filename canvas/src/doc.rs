//! Document model: placed items, shape kinds, and the in-memory store.
//!
//! This module defines what is on the canvas (`CanvasItem`, `ShapeKind`), a
//! sparse-update type for incremental edits (`ItemPatch`), the persisted unit
//! (`Drawing`), the runtime store that owns all live items (`DocStore`), and
//! the id allocator that hands out never-reused item ids (`IdAllocator`).
//!
//! Data flows into this layer from file/remote imports (JSON deserialization)
//! and from the engine (commands). The renderer reads `DocStore::items` in
//! order: later items paint on top.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DRAWING_NAME, MAX_ITEM_ID, MIN_SIZE};

/// Unique identifier for a placed item.
pub type ItemId = i64;

/// The kind of a placed item. Closed set; names are the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    /// Every kind, in palette order.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "Circle",
            Self::Square => "Square",
            Self::Triangle => "Triangle",
        }
    }

    /// Parse a wire name. Case-sensitive, matching the file format.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// A placed shape on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasItem {
    /// Identity key; never reused within a drawing.
    pub id: ItemId,
    /// Which shape this item draws.
    pub shape: ShapeKind,
    /// Left edge in canvas-local coordinates.
    pub x: f64,
    /// Top edge in canvas-local coordinates.
    pub y: f64,
    /// Side length of the bounding square. Always `>= MIN_SIZE`.
    pub size: f64,
}

/// Sparse update for an item. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl ItemPatch {
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), size: None }
    }

    #[must_use]
    pub fn size(size: f64) -> Self {
        Self { size: Some(size), ..Default::default() }
    }
}

/// The persisted unit: a named list of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub drawing_name: String,
    pub canvas_items: Vec<CanvasItem>,
}

impl Default for Drawing {
    fn default() -> Self {
        Self { drawing_name: DEFAULT_DRAWING_NAME.to_owned(), canvas_items: Vec::new() }
    }
}

/// In-memory, ordered store of placed items.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    items: Vec<CanvasItem>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an item on top. An item with the same `id` is replaced in place.
    pub fn insert(&mut self, item: CanvasItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            *existing = item;
        } else {
            self.items.push(item);
        }
    }

    /// Remove an item by id, returning it if it was present. Unknown ids are a no-op.
    pub fn remove(&mut self, id: ItemId) -> Option<CanvasItem> {
        let idx = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Apply a partial update. Returns false if the item doesn't exist.
    ///
    /// Size patches are clamped to [`MIN_SIZE`].
    pub fn apply_patch(&mut self, id: ItemId, patch: &ItemPatch) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        if let Some(x) = patch.x {
            item.x = x;
        }
        if let Some(y) = patch.y {
            item.y = y;
        }
        if let Some(size) = patch.size {
            item.size = size.max(MIN_SIZE);
        }
        true
    }

    /// Replace all items with a full snapshot, keeping its order.
    pub fn load_snapshot(&mut self, items: Vec<CanvasItem>) {
        self.items = items;
    }

    /// Items in paint order (bottom first).
    #[must_use]
    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Largest id currently in the store.
    #[must_use]
    pub fn max_id(&self) -> Option<ItemId> {
        self.items.iter().map(|i| i.id).max()
    }
}

/// Hands out strictly increasing item ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdAllocator {
    last: ItemId,
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Next fresh id, greater than every id handed out or observed so far.
    ///
    /// Returns `None` once [`MAX_ITEM_ID`] has been reached; ids are never reissued.
    pub fn next_id(&mut self) -> Option<ItemId> {
        if self.last >= MAX_ITEM_ID {
            return None;
        }
        self.last += 1;
        Some(self.last)
    }

    /// Record an id that exists elsewhere (e.g. from an import) so it is never handed out.
    pub fn observe(&mut self, id: ItemId) {
        self.last = self.last.max(id);
    }
}
