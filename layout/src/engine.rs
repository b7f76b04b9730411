//! Layout engine: one configuration session's canvas and positions.
//!
//! Lifecycle: `configure` fixes the canvas geometry and starts with an empty
//! map; `randomize` or `load_saved` place every element; `apply_drag` nudges
//! individual elements; `serialize` reads the whole map into the print
//! payload and is the only operation that can fail. Reconfiguring discards
//! all prior positions. Submission is a side effect of the hosting service;
//! the map stays live and re-submittable afterwards.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use rand::Rng;

use crate::canvas::{CanvasConfig, Orientation, Point};
use crate::doc::{ElementIndex, PositionMap};
use crate::wire::{LayoutError, PrintPosition, SavedLayout, serialize};

/// Core positioner state for one configuration session.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: CanvasConfig,
    positions: PositionMap,
}

impl LayoutEngine {
    /// Start a session: canvas geometry fixed, no element placed yet.
    #[must_use]
    pub fn configure(pairs: u8, orientation: Orientation) -> Self {
        Self { config: CanvasConfig::new(pairs, orientation), positions: PositionMap::new() }
    }

    /// Replace the configuration, discarding every recorded position.
    pub fn reconfigure(&mut self, pairs: u8, orientation: Orientation) {
        *self = Self::configure(pairs, orientation);
    }

    /// The session's fixed canvas geometry.
    #[must_use]
    pub fn config(&self) -> CanvasConfig {
        self.config
    }

    /// Current element positions.
    #[must_use]
    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    /// Place all elements uniformly at random within the canvas.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::rng());
    }

    /// Seedable variant of [`randomize`](Self::randomize).
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.positions = PositionMap::randomized(self.config, rng);
    }

    /// Replace all positions with those from a saved layout. Malformed pairs
    /// stay unplaced; a later [`serialize`](Self::serialize) surfaces the gap.
    pub fn load_saved(&mut self, saved: &SavedLayout) {
        self.positions = saved.to_position_map();
    }

    /// Accumulate a drag-end delta onto one element, returning its new position.
    pub fn apply_drag(&mut self, element: ElementIndex, dx: f64, dy: f64) -> Point {
        self.positions.apply_drag(element, dx, dy)
    }

    /// Build the print submission payload, one record per pair in pair order.
    ///
    /// # Errors
    ///
    /// [`LayoutError::MissingPosition`] when any element of any pair is
    /// unplaced.
    pub fn serialize(&self) -> Result<Vec<PrintPosition>, LayoutError> {
        serialize(&self.positions, usize::from(self.config.pairs))
    }
}
