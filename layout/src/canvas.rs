//! Canvas geometry: sheet orientation, element size, and pair/element
//! index arithmetic.
//!
//! A configured canvas is an A4 sheet in one of two orientations, carrying
//! `2 * pairs` draggable elements. Elements `2k` and `2k+1` form printable
//! pair `k`: the even index is the seller's retained stub (canhoto), the odd
//! index the customer ticket (bilhete). Geometry is fixed once configured;
//! changing it is a reconfiguration that discards all positions.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use serde::{Deserialize, Serialize};

use crate::consts::{A4_LONG_EDGE, A4_SHORT_EDGE, ELEMENT_HEIGHT, ELEMENT_WIDTH};

/// A position in canvas-local coordinates (logical units, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates rounded to the nearest integer value.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self { x: self.x.round(), y: self.y.round() }
    }
}

/// Sheet orientation.
///
/// Wire values follow the backend (`RETRATO`/`PAISAGEM`); the lowercase forms
/// used by the configuration UI are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Portrait: 595 × 842 logical units.
    #[serde(rename = "RETRATO", alias = "retrato")]
    Portrait,
    /// Landscape: 842 × 595 logical units.
    #[serde(rename = "PAISAGEM", alias = "paisagem")]
    Landscape,
}

impl Orientation {
    /// Backend wire name (`"RETRATO"` / `"PAISAGEM"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "RETRATO",
            Self::Landscape => "PAISAGEM",
        }
    }

    /// Canvas width in logical units.
    #[must_use]
    pub fn width(self) -> f64 {
        match self {
            Self::Portrait => A4_SHORT_EDGE,
            Self::Landscape => A4_LONG_EDGE,
        }
    }

    /// Canvas height in logical units.
    #[must_use]
    pub fn height(self) -> f64 {
        match self {
            Self::Portrait => A4_LONG_EDGE,
            Self::Landscape => A4_SHORT_EDGE,
        }
    }
}

/// Immutable geometry for one configuration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Sheet orientation, fixed at configuration time.
    pub orientation: Orientation,
    /// Number of printable stub/ticket pairs on the sheet.
    pub pairs: u8,
}

impl CanvasConfig {
    #[must_use]
    pub fn new(pairs: u8, orientation: Orientation) -> Self {
        Self { orientation, pairs }
    }

    /// Total draggable elements: one stub plus one ticket per pair.
    #[must_use]
    pub fn element_count(self) -> usize {
        usize::from(self.pairs) * 2
    }

    /// Canvas width in logical units.
    #[must_use]
    pub fn width(self) -> f64 {
        self.orientation.width()
    }

    /// Canvas height in logical units.
    #[must_use]
    pub fn height(self) -> f64 {
        self.orientation.height()
    }

    /// Largest x at which an element still starts inside the canvas.
    #[must_use]
    pub fn max_x(self) -> f64 {
        (self.width() - ELEMENT_WIDTH).max(0.0)
    }

    /// Largest y at which an element still starts inside the canvas.
    #[must_use]
    pub fn max_y(self) -> f64 {
        (self.height() - ELEMENT_HEIGHT).max(0.0)
    }
}

/// Whether `element` is a stub (canhoto) slot. Stubs sit at even indices.
#[must_use]
pub fn is_stub(element: usize) -> bool {
    element % 2 == 0
}

/// Pair index that `element` belongs to.
#[must_use]
pub fn pair_of(element: usize) -> usize {
    element / 2
}

/// Element index of pair `pair`'s stub half.
#[must_use]
pub fn stub_element(pair: usize) -> usize {
    pair * 2
}

/// Element index of pair `pair`'s ticket half.
#[must_use]
pub fn ticket_element(pair: usize) -> usize {
    pair * 2 + 1
}
