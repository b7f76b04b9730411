//! Wire shapes at the backend boundary: the dynamically-keyed saved-layout
//! record and the ordered print submission payload.
//!
//! The saved-layout endpoint returns flat fields `xCanhoto1`, `yCanhoto1`,
//! `xBilhete1`, ... keyed by 1-based pair number. That open-ended key scheme
//! is confined to this module: parsing turns it into an ordered list of
//! typed pair positions, and nothing downstream touches string keys again.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canvas::{Orientation, Point, stub_element, ticket_element};
use crate::doc::PositionMap;

/// Failure raised when assembling a print payload from an incomplete map.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// An element of some pair has no recorded position; no partial payload
    /// is produced and submission must be rejected.
    #[error("element {element} of pair {pair} has no position")]
    MissingPosition { element: usize, pair: usize },
}

/// A saved layout as returned by the backend: orientation and pair count,
/// plus the flat per-pair coordinate fields kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedLayout {
    /// Sheet orientation the layout was saved under.
    pub orientacao: Orientation,
    /// Number of stub/ticket pairs the layout covers.
    pub quantidade: u32,
    /// Dynamically-keyed coordinate fields (`xCanhoto{i}`, `yCanhoto{i}`,
    /// `xBilhete{i}`, `yBilhete{i}` for `i = 1..=quantidade`).
    #[serde(flatten)]
    fields: serde_json::Map<String, Value>,
}

/// Stub and ticket positions for one printable pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairPoints {
    /// Position of the seller's retained stub (canhoto) half.
    pub stub: Point,
    /// Position of the customer ticket (bilhete) half.
    pub ticket: Point,
}

impl SavedLayout {
    /// Typed pair positions in pair order `0..quantidade`.
    ///
    /// A pair with any coordinate field missing or non-numeric yields `None`
    /// with a warning; the remaining pairs still load. Coordinates are
    /// rounded to the nearest integer on the way in.
    #[must_use]
    pub fn pairs(&self) -> Vec<Option<PairPoints>> {
        (1..=self.quantidade)
            .map(|i| {
                let pair = self.pair_points(i);
                if pair.is_none() {
                    tracing::warn!(pair = i, "saved layout pair has missing or non-numeric coordinates, skipping");
                }
                pair
            })
            .collect()
    }

    /// Build a position map from this layout. Pair `i` (1-based) populates
    /// elements `2*(i-1)` and `2*(i-1)+1`; malformed pairs leave their two
    /// elements unset, and a later serialization surfaces the gap.
    #[must_use]
    pub fn to_position_map(&self) -> PositionMap {
        let mut map = PositionMap::new();
        for (pair, points) in self.pairs().into_iter().enumerate() {
            if let Some(points) = points {
                map.set(stub_element(pair), points.stub);
                map.set(ticket_element(pair), points.ticket);
            }
        }
        map
    }

    fn coord(&self, prefix: &str, i: u32) -> Option<f64> {
        self.fields.get(&format!("{prefix}{i}"))?.as_f64()
    }

    fn pair_points(&self, i: u32) -> Option<PairPoints> {
        let stub = Point::new(self.coord("xCanhoto", i)?, self.coord("yCanhoto", i)?).rounded();
        let ticket = Point::new(self.coord("xBilhete", i)?, self.coord("yBilhete", i)?).rounded();
        Some(PairPoints { stub, ticket })
    }
}

/// One pair's entry in the print submission payload.
///
/// The backend associates array position with pair number, so the payload is
/// always produced ascending by pair index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintPosition {
    #[serde(rename = "xCanhoto")]
    pub x_canhoto: i64,
    #[serde(rename = "yCanhoto")]
    pub y_canhoto: i64,
    #[serde(rename = "xBilhete")]
    pub x_bilhete: i64,
    #[serde(rename = "yBilhete")]
    pub y_bilhete: i64,
}

/// Assemble the submission payload: one record per pair, ascending by pair
/// index, coordinates rounded to the nearest integer.
///
/// # Errors
///
/// Returns [`LayoutError::MissingPosition`] for the first element without a
/// recorded position. No partial payload is produced.
pub fn serialize(map: &PositionMap, pair_count: usize) -> Result<Vec<PrintPosition>, LayoutError> {
    let mut payload = Vec::with_capacity(pair_count);
    for pair in 0..pair_count {
        let stub = placed(map, stub_element(pair), pair)?;
        let ticket = placed(map, ticket_element(pair), pair)?;
        payload.push(PrintPosition {
            x_canhoto: round_i64(stub.x),
            y_canhoto: round_i64(stub.y),
            x_bilhete: round_i64(ticket.x),
            y_bilhete: round_i64(ticket.y),
        });
    }
    Ok(payload)
}

fn placed(map: &PositionMap, element: usize, pair: usize) -> Result<Point, LayoutError> {
    map.get(element).ok_or(LayoutError::MissingPosition { element, pair })
}

#[allow(clippy::cast_possible_truncation)]
fn round_i64(v: f64) -> i64 {
    v.round() as i64
}
