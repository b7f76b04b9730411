#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::canvas::Orientation;
use crate::consts::{ELEMENT_HEIGHT, ELEMENT_WIDTH};

fn portrait(pairs: u8) -> CanvasConfig {
    CanvasConfig::new(pairs, Orientation::Portrait)
}

// =============================================================
// set / get
// =============================================================

#[test]
fn new_map_is_empty() {
    let map = PositionMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
}

#[test]
fn set_then_get() {
    let mut map = PositionMap::new();
    map.set(3, Point::new(10.0, 20.0));
    assert_eq!(map.get(3), Some(Point::new(10.0, 20.0)));
}

#[test]
fn get_unplaced_is_none() {
    let map = PositionMap::new();
    assert_eq!(map.get(0), None);
}

#[test]
fn set_replaces_prior_entry() {
    let mut map = PositionMap::new();
    map.set(0, Point::new(1.0, 1.0));
    map.set(0, Point::new(9.0, 9.0));
    assert_eq!(map.get(0), Some(Point::new(9.0, 9.0)));
    assert_eq!(map.len(), 1);
}

// =============================================================
// apply_drag
// =============================================================

#[test]
fn drag_accumulates_from_existing_position() {
    let mut map = PositionMap::new();
    map.set(0, Point::new(100.0, 200.0));
    let p = map.apply_drag(0, 10.0, -5.0);
    assert_eq!(p, Point::new(110.0, 195.0));
    assert_eq!(map.get(0), Some(Point::new(110.0, 195.0)));
}

#[test]
fn drag_on_unplaced_element_starts_at_origin() {
    let mut map = PositionMap::new();
    let p = map.apply_drag(5, 30.0, 40.0);
    assert_eq!(p, Point::new(30.0, 40.0));
}

#[test]
fn drag_sequence_equals_vector_sum() {
    let mut map = PositionMap::new();
    map.set(0, Point::new(50.0, 50.0));
    let deltas = [(10.0, -5.0), (5.0, 5.0), (-2.5, 7.5), (0.0, 0.0)];
    for (dx, dy) in deltas {
        map.apply_drag(0, dx, dy);
    }
    let sum_x: f64 = deltas.iter().map(|d| d.0).sum();
    let sum_y: f64 = deltas.iter().map(|d| d.1).sum();
    assert_eq!(map.get(0), Some(Point::new(50.0 + sum_x, 50.0 + sum_y)));
}

#[test]
fn drags_on_different_elements_are_independent() {
    let mut map = PositionMap::new();
    map.set(0, Point::new(0.0, 0.0));
    map.set(1, Point::new(100.0, 100.0));
    map.apply_drag(0, 5.0, 5.0);
    map.apply_drag(1, -5.0, -5.0);
    map.apply_drag(0, 5.0, 5.0);
    assert_eq!(map.get(0), Some(Point::new(10.0, 10.0)));
    assert_eq!(map.get(1), Some(Point::new(95.0, 95.0)));
}

#[test]
fn drag_allows_negative_positions() {
    let mut map = PositionMap::new();
    map.set(0, Point::new(10.0, 10.0));
    let p = map.apply_drag(0, -50.0, -50.0);
    assert_eq!(p, Point::new(-40.0, -40.0));
}

// =============================================================
// randomized
// =============================================================

#[test]
fn randomized_places_every_element() {
    let mut rng = StdRng::seed_from_u64(7);
    let config = portrait(8);
    let map = PositionMap::randomized(config, &mut rng);
    assert_eq!(map.len(), 16);
    assert!(map.is_complete(config.element_count()));
}

#[test]
fn randomized_positions_within_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    for orientation in [Orientation::Portrait, Orientation::Landscape] {
        let config = CanvasConfig::new(8, orientation);
        let map = PositionMap::randomized(config, &mut rng);
        for (_, p) in map.entries() {
            assert!(p.x >= 0.0);
            assert!(p.y >= 0.0);
            assert!(p.x <= config.width() - ELEMENT_WIDTH);
            assert!(p.y <= config.height() - ELEMENT_HEIGHT);
        }
    }
}

#[test]
fn randomized_positions_are_integers() {
    let mut rng = StdRng::seed_from_u64(1);
    let map = PositionMap::randomized(portrait(4), &mut rng);
    for (_, p) in map.entries() {
        assert_eq!(p.x, p.x.floor());
        assert_eq!(p.y, p.y.floor());
    }
}

#[test]
fn randomized_is_deterministic_for_a_seed() {
    let a = PositionMap::randomized(portrait(3), &mut StdRng::seed_from_u64(99));
    let b = PositionMap::randomized(portrait(3), &mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}

// =============================================================
// completeness / reset
// =============================================================

#[test]
fn is_complete_requires_every_index() {
    let mut map = PositionMap::new();
    map.set(0, Point::new(0.0, 0.0));
    map.set(1, Point::new(0.0, 0.0));
    map.set(3, Point::new(0.0, 0.0));
    assert!(map.is_complete(2));
    assert!(!map.is_complete(4));
}

#[test]
fn empty_map_is_complete_for_zero_elements() {
    let map = PositionMap::new();
    assert!(map.is_complete(0));
}

#[test]
fn clear_drops_all_positions() {
    let mut map = PositionMap::randomized(portrait(2), &mut StdRng::seed_from_u64(5));
    assert!(!map.is_empty());
    map.clear();
    assert!(map.is_empty());
}

#[test]
fn entries_are_sorted_by_element() {
    let mut map = PositionMap::new();
    map.set(4, Point::new(4.0, 0.0));
    map.set(0, Point::new(0.0, 0.0));
    map.set(2, Point::new(2.0, 0.0));
    let elements: Vec<usize> = map.entries().iter().map(|&(e, _)| e).collect();
    assert_eq!(elements, vec![0, 2, 4]);
}
