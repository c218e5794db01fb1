#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{CanvasItem, DocStore, ItemId};
use crate::surface::Point;

/// Which part of an item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub item_id: ItemId,
    pub part: HitPart,
}

/// Centre of an item's resize handle: its bottom-right corner.
#[must_use]
pub fn handle_center(item: &CanvasItem) -> Point {
    Point::new(item.x + item.size, item.y + item.size)
}

/// Whether `pt` falls inside the item's bounding square.
#[must_use]
pub fn body_contains(item: &CanvasItem, pt: Point) -> bool {
    pt.x >= item.x && pt.x <= item.x + item.size && pt.y >= item.y && pt.y <= item.y + item.size
}

/// Whether `pt` falls on the item's resize handle.
#[must_use]
pub fn handle_contains(item: &CanvasItem, pt: Point) -> bool {
    let c = handle_center(item);
    let (dx, dy) = (pt.x - c.x, pt.y - c.y);
    dx * dx + dy * dy <= HANDLE_RADIUS_PX * HANDLE_RADIUS_PX
}

/// Test which item (if any) is under `pt`, checking the selected item's handle first.
///
/// Only the selected item exposes a handle. Bodies are tested topmost first.
#[must_use]
pub fn hit_test(pt: Point, doc: &DocStore, selected_id: Option<ItemId>) -> Option<Hit> {
    if let Some(item) = selected_id.and_then(|id| doc.get(id)) {
        if handle_contains(item, pt) {
            return Some(Hit { item_id: item.id, part: HitPart::ResizeHandle });
        }
    }

    doc.items()
        .iter()
        .rev()
        .find(|item| body_contains(item, pt))
        .map(|item| Hit { item_id: item.id, part: HitPart::Body })
}
