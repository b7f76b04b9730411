#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::canvas::Point;

fn saved_layout(value: serde_json::Value) -> SavedLayout {
    serde_json::from_value(value).unwrap()
}

fn full_layout_of_three() -> SavedLayout {
    saved_layout(json!({
        "orientacao": "RETRATO",
        "quantidade": 3,
        "xCanhoto1": 10, "yCanhoto1": 20, "xBilhete1": 30, "yBilhete1": 40,
        "xCanhoto2": 50, "yCanhoto2": 60, "xBilhete2": 70, "yBilhete2": 80,
        "xCanhoto3": 90, "yCanhoto3": 100, "xBilhete3": 110, "yBilhete3": 120,
    }))
}

// =============================================================
// SavedLayout parsing
// =============================================================

#[test]
fn saved_layout_reads_header_fields() {
    let layout = full_layout_of_three();
    assert_eq!(layout.orientacao, Orientation::Portrait);
    assert_eq!(layout.quantidade, 3);
}

#[test]
fn pairs_are_ordered_and_fully_populated() {
    let pairs = full_layout_of_three().pairs();
    assert_eq!(pairs.len(), 3);
    let first = pairs[0].unwrap();
    assert_eq!(first.stub, Point::new(10.0, 20.0));
    assert_eq!(first.ticket, Point::new(30.0, 40.0));
    let third = pairs[2].unwrap();
    assert_eq!(third.stub, Point::new(90.0, 100.0));
    assert_eq!(third.ticket, Point::new(110.0, 120.0));
}

#[test]
fn pair_i_populates_elements_two_i_minus_two_and_minus_one() {
    let map = full_layout_of_three().to_position_map();
    // i = 1 -> elements 0, 1
    assert_eq!(map.get(0), Some(Point::new(10.0, 20.0)));
    assert_eq!(map.get(1), Some(Point::new(30.0, 40.0)));
    // i = 2 -> elements 2, 3
    assert_eq!(map.get(2), Some(Point::new(50.0, 60.0)));
    assert_eq!(map.get(3), Some(Point::new(70.0, 80.0)));
    // i = 3 -> elements 4, 5
    assert_eq!(map.get(4), Some(Point::new(90.0, 100.0)));
    assert_eq!(map.get(5), Some(Point::new(110.0, 120.0)));
}

#[test]
fn missing_coordinate_skips_only_that_pair() {
    let layout = saved_layout(json!({
        "orientacao": "RETRATO",
        "quantidade": 3,
        "xCanhoto1": 10, "yCanhoto1": 20, "xBilhete1": 30, "yBilhete1": 40,
        "xCanhoto2": 50, "yCanhoto2": 60,                  "yBilhete2": 80,
        "xCanhoto3": 90, "yCanhoto3": 100, "xBilhete3": 110, "yBilhete3": 120,
    }));
    let pairs = layout.pairs();
    assert!(pairs[0].is_some());
    assert!(pairs[1].is_none());
    assert!(pairs[2].is_some());

    let map = layout.to_position_map();
    assert_eq!(map.get(2), None);
    assert_eq!(map.get(3), None);
    assert!(map.get(0).is_some());
    assert!(map.get(5).is_some());
}

#[test]
fn non_numeric_coordinate_skips_the_pair() {
    let layout = saved_layout(json!({
        "orientacao": "PAISAGEM",
        "quantidade": 1,
        "xCanhoto1": "left", "yCanhoto1": 20, "xBilhete1": 30, "yBilhete1": 40,
    }));
    assert_eq!(layout.pairs(), vec![None]);
    assert!(layout.to_position_map().is_empty());
}

#[test]
fn fractional_coordinates_round_on_ingest() {
    let layout = saved_layout(json!({
        "orientacao": "RETRATO",
        "quantidade": 1,
        "xCanhoto1": 10.6, "yCanhoto1": 19.4, "xBilhete1": 30.5, "yBilhete1": 40.0,
    }));
    let pair = layout.pairs()[0].unwrap();
    assert_eq!(pair.stub, Point::new(11.0, 19.0));
    assert_eq!(pair.ticket, Point::new(31.0, 40.0));
}

#[test]
fn zero_quantity_yields_no_pairs() {
    let layout = saved_layout(json!({"orientacao": "RETRATO", "quantidade": 0}));
    assert!(layout.pairs().is_empty());
    assert!(layout.to_position_map().is_empty());
}

// =============================================================
// serialize
// =============================================================

#[test]
fn serialize_orders_records_by_pair() {
    let mut map = PositionMap::new();
    for pair in 0..3 {
        let base = (pair * 100) as f64;
        map.set(stub_element(pair), Point::new(base, base + 1.0));
        map.set(ticket_element(pair), Point::new(base + 2.0, base + 3.0));
    }
    let payload = serialize(&map, 3).unwrap();
    assert_eq!(payload.len(), 3);
    for (pair, record) in payload.iter().enumerate() {
        let base = (pair * 100) as i64;
        assert_eq!(record.x_canhoto, base);
        assert_eq!(record.y_canhoto, base + 1);
        assert_eq!(record.x_bilhete, base + 2);
        assert_eq!(record.y_bilhete, base + 3);
    }
}

#[test]
fn serialize_rounds_fractional_positions() {
    let mut map = PositionMap::new();
    map.set(0, Point::new(10.5, 19.4));
    map.set(1, Point::new(0.49, 99.51));
    let payload = serialize(&map, 1).unwrap();
    assert_eq!(payload[0].x_canhoto, 11);
    assert_eq!(payload[0].y_canhoto, 19);
    assert_eq!(payload[0].x_bilhete, 0);
    assert_eq!(payload[0].y_bilhete, 100);
}

#[test]
fn serialize_missing_stub_fails() {
    let mut map = PositionMap::new();
    map.set(1, Point::new(1.0, 1.0));
    let err = serialize(&map, 1).unwrap_err();
    assert!(matches!(err, LayoutError::MissingPosition { element: 0, pair: 0 }));
}

#[test]
fn serialize_missing_ticket_fails() {
    let mut map = PositionMap::new();
    map.set(0, Point::new(1.0, 1.0));
    map.set(1, Point::new(2.0, 2.0));
    map.set(2, Point::new(3.0, 3.0));
    let err = serialize(&map, 2).unwrap_err();
    assert!(matches!(err, LayoutError::MissingPosition { element: 3, pair: 1 }));
}

#[test]
fn serialize_produces_no_partial_payload() {
    let mut map = PositionMap::new();
    map.set(0, Point::new(1.0, 1.0));
    map.set(1, Point::new(2.0, 2.0));
    // pair 1 entirely missing
    let result = serialize(&map, 2);
    assert!(result.is_err());
}

#[test]
fn serialize_empty_map_zero_pairs_is_empty_payload() {
    let payload = serialize(&PositionMap::new(), 0).unwrap();
    assert!(payload.is_empty());
}

// =============================================================
// PrintPosition wire shape
// =============================================================

#[test]
fn print_position_uses_backend_field_names() {
    let record = PrintPosition { x_canhoto: 1, y_canhoto: 2, x_bilhete: 3, y_bilhete: 4 };
    let value = serde_json::to_value(record).unwrap();
    assert_eq!(value, json!({"xCanhoto": 1, "yCanhoto": 2, "xBilhete": 3, "yBilhete": 4}));
}

#[test]
fn print_position_round_trip() {
    let record = PrintPosition { x_canhoto: 9, y_canhoto: 8, x_bilhete: 7, y_bilhete: 6 };
    let json = serde_json::to_string(&record).unwrap();
    let back: PrintPosition = serde_json::from_str(&json).unwrap();
    assert_eq!(record, back);
}

#[test]
fn layout_error_mentions_element_and_pair() {
    let err = LayoutError::MissingPosition { element: 3, pair: 1 };
    let msg = err.to_string();
    assert!(msg.contains('3'));
    assert!(msg.contains('1'));
}
