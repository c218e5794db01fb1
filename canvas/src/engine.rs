use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, Url};

use serde::Serialize;

use crate::consts::{DEFAULT_DRAWING_NAME, DEFAULT_SIZE, MIN_SIZE};
use crate::doc::{CanvasItem, DocStore, Drawing, IdAllocator, ItemId, ItemPatch, ShapeKind};
use crate::hit::{HitPart, hit_test};
use crate::input::{DragSession, InputState, Key, Listen, PlacementSession, ResizeSession, UiState};
use crate::palette;
use crate::persist::{self, ExportError, ExportFile, ImportError};
use crate::render::{self, DrawOp};
use crate::summary::ShapeCounts;
use crate::surface::{Point, Surface};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ItemCreated { item: CanvasItem },
    ItemUpdated { id: ItemId, fields: ItemPatch },
    ItemDeleted { id: ItemId },
    SelectionChanged { id: Option<ItemId> },
    /// Attach window-level listeners for the session that just started.
    Subscribe { listeners: Listen },
    /// Detach the listeners of the session that just ended.
    Unsubscribe { listeners: Listen },
    SetCursor { cursor: &'static str },
    RenderNeeded,
}

/// Discrete mutation requests. Every change to the item list goes through
/// [`EngineCore::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Create a default-sized item with its top-left corner at `at`.
    Place { shape: ShapeKind, at: Point },
    /// Move an item's top-left corner.
    Move { id: ItemId, x: f64, y: f64 },
    /// Set an item's size; values below the minimum are clamped.
    Resize { id: ItemId, size: f64 },
    /// Delete an item. Unknown ids are a no-op.
    Remove { id: ItemId },
    /// Change (or clear) the selection.
    Select(Option<ItemId>),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Pointer handlers take canvas-local points; [`Surface::to_local`] converts.
pub struct EngineCore {
    pub doc: DocStore,
    pub ui: UiState,
    pub input: InputState,
    pub surface: Surface,
    drawing_name: String,
    ids: IdAllocator,
    subscription: Option<Listen>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: DocStore::new(),
            ui: UiState::default(),
            input: InputState::Idle,
            surface: Surface::default(),
            drawing_name: DEFAULT_DRAWING_NAME.to_owned(),
            ids: IdAllocator::new(),
            subscription: None,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Commands ---

    /// Apply one mutation and report what changed.
    pub fn apply(&mut self, command: Command) -> Vec<Action> {
        match command {
            Command::Place { shape, at } => {
                let Some(id) = self.ids.next_id() else {
                    log::warn!("item ids exhausted; {} not placed", shape.as_str());
                    return Vec::new();
                };
                let item = CanvasItem { id, shape, x: at.x, y: at.y, size: DEFAULT_SIZE };
                self.doc.insert(item.clone());
                vec![Action::ItemCreated { item }, Action::RenderNeeded]
            }
            Command::Move { id, x, y } => self.patch(id, ItemPatch::position(x, y)),
            Command::Resize { id, size } => self.patch(id, ItemPatch::size(size.max(MIN_SIZE))),
            Command::Remove { id } => {
                if self.doc.remove(id).is_none() {
                    return Vec::new();
                }
                let mut actions = vec![Action::ItemDeleted { id }];
                if self.ui.selected_id == Some(id) {
                    self.ui.selected_id = None;
                    actions.push(Action::SelectionChanged { id: None });
                }
                if self.input.target_id() == Some(id) {
                    actions.extend(self.transition(InputState::Idle));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            Command::Select(id) => {
                if id.is_some_and(|id| self.doc.get(id).is_none()) || self.ui.selected_id == id {
                    return Vec::new();
                }
                self.ui.selected_id = id;
                vec![Action::SelectionChanged { id }, Action::RenderNeeded]
            }
        }
    }

    fn patch(&mut self, id: ItemId, fields: ItemPatch) -> Vec<Action> {
        if !self.doc.apply_patch(id, &fields) {
            return Vec::new();
        }
        vec![Action::ItemUpdated { id, fields }, Action::RenderNeeded]
    }

    /// Replace the active session, releasing the old session's window
    /// listeners before the new session's are attached.
    fn transition(&mut self, next: InputState) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(listeners) = self.subscription.take() {
            actions.push(Action::Unsubscribe { listeners });
        }
        log::debug!("input {} -> {}", self.input.name(), next.name());
        self.input = next;
        self.ui.preview = None;
        if let Some(listeners) = next.listeners() {
            self.subscription = Some(listeners);
            actions.push(Action::Subscribe { listeners });
        }
        actions
    }

    // --- Sessions ---

    /// Start placing a shape chosen from the palette. Preempts any active session.
    pub fn begin_placement(&mut self, shape: ShapeKind) -> Vec<Action> {
        let mut actions = self.transition(InputState::Placing(PlacementSession::centred(shape)));
        actions.push(Action::SetCursor { cursor: "crosshair" });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// End whatever session is active and release its listeners (host teardown).
    pub fn teardown(&mut self) -> Vec<Action> {
        if self.input == InputState::Idle {
            return Vec::new();
        }
        let mut actions = self.transition(InputState::Idle);
        actions.push(Action::SetCursor { cursor: "default" });
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Pointer input (canvas-local points) ---

    /// Pointer pressed on the canvas surface.
    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        match hit_test(pt, &self.doc, self.ui.selected_id) {
            Some(hit) if hit.part == HitPart::ResizeHandle => self.start_resize(hit.item_id, pt),
            Some(hit) => self.start_drag(hit.item_id, pt),
            None => self.press_empty(pt),
        }
    }

    fn start_drag(&mut self, id: ItemId, pt: Point) -> Vec<Action> {
        let Some(item) = self.doc.get(id) else {
            return Vec::new();
        };
        let offset = pt.minus(Point::new(item.x, item.y));
        let session = DragSession { id, offset_x: offset.x, offset_y: offset.y, moved: false };
        let mut actions = self.transition(InputState::Dragging(session));
        actions.push(Action::SetCursor { cursor: "move" });
        actions
    }

    fn start_resize(&mut self, id: ItemId, pt: Point) -> Vec<Action> {
        let Some(item) = self.doc.get(id) else {
            return Vec::new();
        };
        let session = ResizeSession { id, start_x: pt.x, start_y: pt.y, start_size: item.size };
        let mut actions = self.transition(InputState::Resizing(session));
        actions.push(Action::SetCursor { cursor: "nwse-resize" });
        actions
    }

    /// A press on empty canvas commits a pending placement and acts as a
    /// canvas click, clearing the selection.
    fn press_empty(&mut self, pt: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        if let InputState::Placing(session) = self.input {
            actions.extend(self.apply(Command::Place { shape: session.shape, at: session.origin_at(pt) }));
            actions.extend(self.transition(InputState::Idle));
            actions.push(Action::SetCursor { cursor: "default" });
        }
        actions.extend(self.apply(Command::Select(None)));
        actions
    }

    /// Pointer moved anywhere in the window.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Placing(_) => {
                self.ui.preview = Some(pt);
                vec![Action::RenderNeeded]
            }
            InputState::Dragging(session) => {
                let Some(item) = self.doc.get(session.id) else {
                    return self.transition(InputState::Idle);
                };
                let (x, y) = (pt.x - session.offset_x, pt.y - session.offset_y);
                if Point::new(x, y) == Point::new(item.x, item.y) {
                    return Vec::new();
                }
                self.input = InputState::Dragging(DragSession { moved: true, ..session });
                self.apply(Command::Move { id: session.id, x, y })
            }
            InputState::Resizing(session) => {
                if self.doc.get(session.id).is_none() {
                    return self.transition(InputState::Idle);
                }
                let delta = (pt.x - session.start_x).max(pt.y - session.start_y);
                self.apply(Command::Resize { id: session.id, size: session.start_size + delta })
            }
        }
    }

    /// Pointer released anywhere in the window.
    ///
    /// Releasing a drag that never moved is a click: the item becomes selected.
    pub fn on_pointer_up(&mut self, _pt: Point) -> Vec<Action> {
        match self.input {
            InputState::Idle | InputState::Placing(_) => Vec::new(),
            InputState::Dragging(session) => {
                let mut actions = self.transition(InputState::Idle);
                actions.push(Action::SetCursor { cursor: "default" });
                if !session.moved {
                    actions.extend(self.apply(Command::Select(Some(session.id))));
                }
                actions
            }
            InputState::Resizing(_) => {
                let mut actions = self.transition(InputState::Idle);
                actions.push(Action::SetCursor { cursor: "default" });
                actions
            }
        }
    }

    /// Double-click removes the item under the pointer, selected or not.
    pub fn on_double_click(&mut self, pt: Point) -> Vec<Action> {
        match hit_test(pt, &self.doc, self.ui.selected_id) {
            Some(hit) => self.apply(Command::Remove { id: hit.item_id }),
            None => Vec::new(),
        }
    }

    // --- Header ---

    #[must_use]
    pub fn drawing_name(&self) -> &str {
        &self.drawing_name
    }

    /// Open the drawing-name editor.
    pub fn begin_rename(&mut self) -> Vec<Action> {
        self.ui.editing_name = true;
        vec![Action::RenderNeeded]
    }

    pub fn set_drawing_name(&mut self, name: impl Into<String>) {
        self.drawing_name = name.into();
    }

    /// Keyboard input. `Enter` closes the name editor.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if self.ui.editing_name && key.is_enter() {
            self.ui.editing_name = false;
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    // --- Persistence ---

    /// Snapshot of the current drawing.
    #[must_use]
    pub fn drawing(&self) -> Drawing {
        Drawing { drawing_name: self.drawing_name.clone(), canvas_items: self.doc.items().to_vec() }
    }

    /// Replace the whole drawing. Ends any session and clears the selection.
    pub fn load_drawing(&mut self, drawing: Drawing) -> Vec<Action> {
        let mut actions = self.teardown();
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged { id: None });
        }
        self.ui.editing_name = false;
        log::info!("loaded drawing {:?} with {} items", drawing.drawing_name, drawing.canvas_items.len());
        self.drawing_name = drawing.drawing_name;
        self.doc.load_snapshot(drawing.canvas_items);
        if let Some(max) = self.doc.max_id() {
            self.ids.observe(max);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Serialize the current drawing for download.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if serialization fails.
    pub fn export_file(&self) -> Result<ExportFile, ExportError> {
        persist::export_drawing(&self.drawing())
    }

    /// Validate drawing file text and, only if it is valid, replace the drawing.
    ///
    /// # Errors
    ///
    /// Returns `ImportError` and leaves all state untouched if the text is not
    /// a valid drawing.
    pub fn import_json(&mut self, text: &str) -> Result<Vec<Action>, ImportError> {
        let drawing = persist::import_drawing(text).inspect_err(|e| log::warn!("import rejected: {e}"))?;
        Ok(self.load_drawing(drawing))
    }

    /// Replace the drawing with the most recent row of a server load response.
    ///
    /// # Errors
    ///
    /// Returns `ImportError` and leaves all state untouched if the response
    /// holds no rows or its latest drawing is not valid.
    pub fn import_saved_rows(&mut self, text: &str) -> Result<Vec<Action>, ImportError> {
        let saved = persist::import_saved_rows(text).inspect_err(|e| log::warn!("remote load rejected: {e}"))?;
        log::info!("restoring saved drawing #{}", saved.id);
        Ok(self.load_drawing(saved.drawing))
    }

    // --- Queries ---

    /// The currently selected item, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.ui.selected_id
    }

    /// Look up an item by ID.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&CanvasItem> {
        self.doc.get(id)
    }

    /// Window listeners currently held by the active session.
    #[must_use]
    pub fn subscription(&self) -> Option<Listen> {
        self.subscription
    }

    /// Per-kind item counts for the summary.
    #[must_use]
    pub fn summary(&self) -> ShapeCounts {
        ShapeCounts::tally(self.doc.items())
    }

    /// Display list for the current state.
    #[must_use]
    pub fn scene(&self) -> Vec<DrawOp> {
        render::scene(&self.doc, &self.ui, &self.input)
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
///
/// Handlers take client (viewport) coordinates and return the resulting
/// actions as a JSON array for the host.
#[wasm_bindgen]
pub struct Engine {
    canvas: HtmlCanvasElement,
    core: EngineCore,
}

#[wasm_bindgen]
impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    /// Palette pressed: start placing `shape` (`"Circle"`, `"Square"` or `"Triangle"`).
    ///
    /// # Errors
    ///
    /// Returns `Err` for an unknown shape name.
    pub fn begin_placement(&mut self, shape: &str) -> Result<String, JsValue> {
        let kind = ShapeKind::from_name(shape).ok_or_else(|| JsValue::from_str(&format!("unknown shape: {shape}")))?;
        encode(&self.core.begin_placement(kind))
    }

    /// Pointer pressed; presses outside the canvas bounds are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the actions cannot be encoded.
    pub fn on_pointer_down(&mut self, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let pt = self.local(client_x, client_y);
        if !self.core.surface.contains_local(pt) {
            return encode(&[]);
        }
        encode(&self.core.on_pointer_down(pt))
    }

    /// # Errors
    ///
    /// Returns `Err` if the actions cannot be encoded.
    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let pt = self.local(client_x, client_y);
        encode(&self.core.on_pointer_move(pt))
    }

    /// # Errors
    ///
    /// Returns `Err` if the actions cannot be encoded.
    pub fn on_pointer_up(&mut self, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let pt = self.local(client_x, client_y);
        encode(&self.core.on_pointer_up(pt))
    }

    /// # Errors
    ///
    /// Returns `Err` if the actions cannot be encoded.
    pub fn on_double_click(&mut self, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let pt = self.local(client_x, client_y);
        encode(&self.core.on_double_click(pt))
    }

    /// # Errors
    ///
    /// Returns `Err` if the actions cannot be encoded.
    pub fn on_key_down(&mut self, key: String) -> Result<String, JsValue> {
        encode(&self.core.on_key_down(&Key(key)))
    }

    /// # Errors
    ///
    /// Returns `Err` if the actions cannot be encoded.
    pub fn begin_rename(&mut self) -> Result<String, JsValue> {
        encode(&self.core.begin_rename())
    }

    pub fn set_drawing_name(&mut self, name: String) {
        self.core.set_drawing_name(name);
    }

    #[must_use]
    pub fn drawing_name(&self) -> String {
        self.core.drawing_name().to_owned()
    }

    /// Release any session listeners; call when the host unmounts the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the actions cannot be encoded.
    pub fn teardown(&mut self) -> Result<String, JsValue> {
        encode(&self.core.teardown())
    }

    /// Replace the drawing with the contents of a user-chosen file.
    ///
    /// # Errors
    ///
    /// Returns `Err` with a user-presentable message if the file is not a
    /// valid drawing; the canvas is left unchanged.
    pub fn import_json(&mut self, text: &str) -> Result<String, JsValue> {
        let actions = self.core.import_json(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        encode(&actions)
    }

    /// Replace the drawing with the latest entry of a `GET /load/drawing/{username}`
    /// response body.
    ///
    /// # Errors
    ///
    /// Returns `Err` with a user-presentable message if the response holds no
    /// valid drawing; the canvas is left unchanged.
    pub fn import_saved_rows(&mut self, text: &str) -> Result<String, JsValue> {
        let actions = self.core.import_saved_rows(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        encode(&actions)
    }

    /// The current drawing as file text.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization fails.
    pub fn export_json(&self) -> Result<String, JsValue> {
        let file = self.core.export_file().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(file.contents)
    }

    /// Download the current drawing as `"{drawingName}.json"`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization or any DOM call fails.
    pub fn download_export(&self) -> Result<(), JsValue> {
        let file = self.core.export_file().map_err(|e| JsValue::from_str(&e.to_string()))?;
        download_file(&file)
    }

    /// Shape names offered by the palette, in display order.
    #[must_use]
    pub fn palette(&self) -> Vec<String> {
        palette::entries().iter().map(|entry| entry.shape.as_str().to_owned()).collect()
    }

    /// Per-kind counts as `{"circle":n,"square":n,"triangle":n}`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the counts cannot be encoded.
    pub fn summary_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.core.summary()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let ops = self.core.scene();
        render::paint(&ctx, &ops, f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }
}

impl Engine {
    /// Borrow the browser-independent core.
    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    /// Refresh the surface from the canvas bounding box and convert a client point.
    fn local(&mut self, client_x: f64, client_y: f64) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        self.core.surface = Surface::new(rect.left(), rect.top(), rect.width(), rect.height());
        self.core.surface.to_local(Point::new(client_x, client_y))
    }
}

fn encode(actions: &[Action]) -> Result<String, JsValue> {
    serde_json::to_string(actions).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn download_file(file: &ExportFile) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&file.contents));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor = document.create_element("a")?.dyn_into::<HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(&file.file_name);
    anchor.click();

    Url::revoke_object_url(&url)
}
