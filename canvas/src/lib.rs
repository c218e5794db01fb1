//! Canvas interaction engine for the drawing board.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interactive core of the board: turning pointer and keyboard events into
//! item mutations, tracking the single active placement/drag/resize session,
//! hit-testing items, and painting the scene. The host JavaScript layer only
//! wires DOM events to the engine and carries out the returned
//! [`engine::Action`]s (attaching window listeners, setting the cursor,
//! re-rendering).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine, commands, and testable [`engine::EngineCore`] |
//! | [`doc`] | Item list, item and drawing types, id allocation |
//! | [`surface`] | Canvas bounding box and client/local coordinate conversion |
//! | [`input`] | Sessions, listener sets, and the gesture state machine |
//! | [`hit`] | Hit-testing against item bodies and the resize handle |
//! | [`render`] | Shape primitives, scene display list, 2D painter |
//! | [`palette`] | Shape choices offered for placement |
//! | [`summary`] | Per-kind item counts |
//! | [`persist`] | Drawing file export and validated import |
//! | [`consts`] | Shared sizes and defaults |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod palette;
pub mod persist;
pub mod render;
pub mod summary;
pub mod surface;
