//! Layout positioner for rifa ticket sheets.
//!
//! This crate owns the testable core of the print-layout builder: fixed A4
//! canvas geometry, the per-element position map mutated by drag-end events,
//! random and saved-layout population, and the ordered serialization of
//! stub/ticket pair positions into the print submission payload. The hosting
//! HTTP service holds one [`engine::LayoutEngine`] per builder session and
//! forwards the resulting payloads to the remote backend.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Per-session positioner lifecycle |
//! | [`canvas`] | Orientation, canvas geometry, pair/element index arithmetic |
//! | [`doc`] | Position map and the drag accumulator |
//! | [`wire`] | Saved-layout parsing and print payload serialization |
//! | [`consts`] | Shared numeric constants (sheet size, element size, bounds) |

pub mod canvas;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod wire;
