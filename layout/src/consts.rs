//! Shared numeric constants for the layout crate.

// ── Sheet geometry ──────────────────────────────────────────────

/// A4 short edge in logical units (portrait width, landscape height).
pub const A4_SHORT_EDGE: f64 = 595.0;

/// A4 long edge in logical units (portrait height, landscape width).
pub const A4_LONG_EDGE: f64 = 842.0;

// ── Elements ────────────────────────────────────────────────────

/// Width of one draggable stub/ticket tile in logical units.
pub const ELEMENT_WIDTH: f64 = 100.0;

/// Height of one draggable stub/ticket tile in logical units.
pub const ELEMENT_HEIGHT: f64 = 100.0;

// ── Configuration bounds ────────────────────────────────────────

/// Fewest printable positions a sheet can carry.
pub const MIN_PAIRS: u8 = 1;

/// Most printable positions a sheet can carry.
pub const MAX_PAIRS: u8 = 8;
