//! Position store: per-element coordinates and the drag accumulator.
//!
//! `PositionMap` is the single piece of mutable state in a configuration
//! session. It is populated by random placement or a saved layout, mutated
//! one entry at a time by drag-end events, and read whole at serialization
//! time. Entries are keyed by element index, so drags on different elements
//! are independent and commute.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use rand::Rng;

use crate::canvas::{CanvasConfig, Point};

/// Index of a draggable element on the canvas (`0..element_count`).
pub type ElementIndex = usize;

/// Mapping from element index to canvas-local position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionMap {
    positions: HashMap<ElementIndex, Point>,
}

impl PositionMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self { positions: HashMap::new() }
    }

    /// Place every element of `config` uniformly at random within
    /// `[0, W-w] × [0, H-h]`, floored to integer coordinates.
    ///
    /// Elements may overlap; the builder is a free-form layout surface, not
    /// a packer.
    #[must_use]
    pub fn randomized<R: Rng + ?Sized>(config: CanvasConfig, rng: &mut R) -> Self {
        let mut map = Self::new();
        for element in 0..config.element_count() {
            let x = rng.random_range(0.0..=config.max_x()).floor().max(0.0);
            let y = rng.random_range(0.0..=config.max_y()).floor().max(0.0);
            map.set(element, Point::new(x, y));
        }
        map
    }

    /// Record `position` for `element`, replacing any prior entry.
    pub fn set(&mut self, element: ElementIndex, position: Point) {
        self.positions.insert(element, position);
    }

    /// Position of `element`, if placed.
    #[must_use]
    pub fn get(&self, element: ElementIndex) -> Option<Point> {
        self.positions.get(&element).copied()
    }

    /// Accumulate a drag-end delta onto `element`, returning the new position.
    ///
    /// An element that was never placed is treated as sitting at the origin,
    /// so the net position after any drag sequence is the starting point plus
    /// the vector sum of the deltas. No clamping: an element may end up
    /// outside the visible canvas.
    pub fn apply_drag(&mut self, element: ElementIndex, dx: f64, dy: f64) -> Point {
        let entry = self.positions.entry(element).or_insert(Point { x: 0.0, y: 0.0 });
        entry.x += dx;
        entry.y += dy;
        *entry
    }

    /// Whether every element `0..count` has a recorded position.
    #[must_use]
    pub fn is_complete(&self, count: usize) -> bool {
        (0..count).all(|element| self.positions.contains_key(&element))
    }

    /// Number of placed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if no element has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Drop all recorded positions.
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Placed positions as `(element, position)`, ascending by element index.
    #[must_use]
    pub fn entries(&self) -> Vec<(ElementIndex, Point)> {
        let mut entries: Vec<_> = self.positions.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|&(element, _)| element);
        entries
    }
}
