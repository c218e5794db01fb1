//! Drawing file format: export to and validated import from JSON text.
//!
//! The format is `{ "drawingName": string, "canvasItems": [CanvasItem] }` with
//! no version field. Exports are written verbatim. Imports are fully
//! validated before the caller replaces anything.
//! Missing or null `drawingName` / `canvasItems` fall back to a default name
//! and an empty list.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashSet;

use serde::Deserialize;

use crate::consts::{DEFAULT_DRAWING_NAME, MAX_ITEM_ID, MIN_SIZE};
use crate::doc::{CanvasItem, Drawing, ItemId};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("malformed drawing: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("a drawing must be a JSON object")]
    NotAnObject,
    #[error("item id {0} is outside the supported range")]
    IdOutOfRange(ItemId),
    #[error("item {id} has a non-finite position or size")]
    NonFinite { id: ItemId },
    #[error("item {id} has size {size}, below the minimum item size")]
    TooSmall { id: ItemId, size: f64 },
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
    #[error("no saved drawings")]
    NoSavedDrawing,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode drawing: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A drawing serialized for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested file name, `"{drawingName}.json"`.
    pub file_name: String,
    /// JSON text of the drawing.
    pub contents: String,
}

/// One row of the server's load response, most recent first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedRow {
    pub id: i64,
    pub data: serde_json::Value,
}

/// A validated drawing from the server, with the row id it was stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedDrawing {
    pub id: i64,
    pub drawing: Drawing,
}

/// Wire shape accepted on import; every field optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDrawing {
    #[serde(default)]
    drawing_name: Option<String>,
    #[serde(default)]
    canvas_items: Option<Vec<CanvasItem>>,
}

/// Serialize a drawing for download.
///
/// # Errors
///
/// Returns `ExportError::Encode` if serialization fails.
pub fn export_drawing(drawing: &Drawing) -> Result<ExportFile, ExportError> {
    let contents = serde_json::to_string_pretty(drawing)?;
    Ok(ExportFile { file_name: file_name_for(&drawing.drawing_name), contents })
}

/// Parse and validate drawing file text.
///
/// # Errors
///
/// Returns an `ImportError` if the text is not a drawing object, an item is
/// malformed, an item is smaller than the minimum size, an id is above
/// [`MAX_ITEM_ID`], or ids repeat.
pub fn import_drawing(text: &str) -> Result<Drawing, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    drawing_from_value(value)
}

/// Validate an already-parsed JSON value as a drawing.
///
/// # Errors
///
/// Same as [`import_drawing`].
pub fn drawing_from_value(value: serde_json::Value) -> Result<Drawing, ImportError> {
    if !value.is_object() {
        return Err(ImportError::NotAnObject);
    }
    let raw: RawDrawing = serde_json::from_value(value)?;
    let canvas_items = raw.canvas_items.unwrap_or_default();
    validate_items(&canvas_items)?;

    Ok(Drawing {
        drawing_name: raw.drawing_name.unwrap_or_else(|| DEFAULT_DRAWING_NAME.to_owned()),
        canvas_items,
    })
}

/// Validate the most recent row of a load response.
///
/// # Errors
///
/// Returns `ImportError::NoSavedDrawing` for an empty list, otherwise the same
/// errors as [`drawing_from_value`].
pub fn latest_saved(rows: Vec<SavedRow>) -> Result<SavedDrawing, ImportError> {
    let row = rows.into_iter().next().ok_or(ImportError::NoSavedDrawing)?;
    Ok(SavedDrawing { id: row.id, drawing: drawing_from_value(row.data)? })
}

/// Parse a load response body (`[{ "id": n, "data": drawing }, ...]`) and
/// validate its most recent drawing.
///
/// # Errors
///
/// Returns `ImportError::Malformed` if the body is not a list of rows,
/// otherwise the same errors as [`latest_saved`].
pub fn import_saved_rows(text: &str) -> Result<SavedDrawing, ImportError> {
    let rows: Vec<SavedRow> = serde_json::from_str(text)?;
    latest_saved(rows)
}

fn validate_items(items: &[CanvasItem]) -> Result<(), ImportError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !(item.x.is_finite() && item.y.is_finite() && item.size.is_finite()) {
            return Err(ImportError::NonFinite { id: item.id });
        }
        if item.id > MAX_ITEM_ID {
            return Err(ImportError::IdOutOfRange(item.id));
        }
        if item.size < MIN_SIZE {
            return Err(ImportError::TooSmall { id: item.id, size: item.size });
        }
        if !seen.insert(item.id) {
            return Err(ImportError::DuplicateId(item.id));
        }
    }
    Ok(())
}

fn file_name_for(drawing_name: &str) -> String {
    let stem: String = drawing_name
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    if stem.is_empty() { "drawing.json".to_owned() } else { format!("{stem}.json") }
}
