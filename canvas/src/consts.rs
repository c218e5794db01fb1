//! Shared numeric constants for the canvas crate.

// ── Items ───────────────────────────────────────────────────────

/// Side length of a freshly placed item and of the placement ghost.
pub const DEFAULT_SIZE: f64 = 80.0;

/// Lower bound on item size. Resizing never shrinks an item below this.
pub const MIN_SIZE: f64 = 40.0;

/// Largest item id. Ids above this cannot round-trip through a JavaScript number.
pub const MAX_ITEM_ID: i64 = 9_007_199_254_740_991;

/// Pointer offset from the future top-left corner during placement.
///
/// Half of [`DEFAULT_SIZE`], so the ghost is centred on the pointer.
pub const PLACEMENT_OFFSET: f64 = 40.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Radius of the bottom-right resize handle, in pixels.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

// ── Rendering ───────────────────────────────────────────────────

/// Opacity of the placement ghost that follows the pointer.
pub const PREVIEW_OPACITY: f64 = 0.5;

/// Width of the ring drawn around the selected item.
pub const SELECTION_RING_PX: f64 = 2.0;

/// Icon size for palette entries.
pub const PALETTE_ICON_SIZE: f64 = 32.0;

/// Icon size for summary entries.
pub const SUMMARY_ICON_SIZE: f64 = 24.0;

// ── Persistence ─────────────────────────────────────────────────

/// Name given to a new drawing, and to imported drawings that carry none.
pub const DEFAULT_DRAWING_NAME: &str = "نقاشی من";
