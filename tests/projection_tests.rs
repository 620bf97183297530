//! Select and discard


use rowcross::{cartesian, discard, select, steps, ColumnBlock, Row, Step};
use serde_json::json;
use test_data_gen::{keys, rows};

fn base() -> Vec<Step> {
    steps![
        json!({"a": [1, 2]}),
        json!({"b": [3, 4]}),
        ColumnBlock::new().col_fn("c", |s| json!(s.get_i64("b").unwrap_or(0) * 2)),
    ]
}

fn expected() -> Vec<Row> {
    rows(json!([
        {"a": 1, "c": 6},
        {"a": 1, "c": 8},
        {"a": 2, "c": 6},
        {"a": 2, "c": 8},
    ]))
}

#[test]
fn test_select_columns() {
    let mut steps = base();
    steps.push(select(["a", "c"]));
    assert_eq!(cartesian(steps).unwrap(), expected());
}

#[test]
fn test_discard_columns() {
    let mut steps = base();
    steps.push(discard(["b"]));
    assert_eq!(cartesian(steps).unwrap(), expected());
}

#[test]
fn test_select_order_follows_names() {
    let mut steps = base();
    steps.push(select(["c", "missing", "a"]));
    let out = cartesian(steps).unwrap();
    assert_eq!(out.len(), 4);
    assert!(out.iter().all(|r| keys(r) == vec!["c", "a"]));
}

#[test]
fn test_select_discard_partition_agree() {
    let mut selected = base();
    selected.push(select(["a", "c"]));
    let mut discarded = base();
    discarded.push(discard(["b"]));

    let left = cartesian(selected).unwrap();
    let right = cartesian(discarded).unwrap();
    assert_eq!(left, right);
}

#[test]
fn test_discarded_column_hidden_from_later_functions() {
    let mut steps = base();
    steps.push(discard(["b"]));
    steps.push(
        ColumnBlock::new()
            .col_fn("b_seen", |s| json!(s.contains_key("b")))
            .into(),
    );
    let out = cartesian(steps).unwrap();
    assert!(out.iter().all(|r| r.get("b_seen") == Some(&json!(false))));
}

#[test]
fn test_discard_unknown_name_is_noop() {
    let out = cartesian(steps![json!({"a": [1]}), discard(["zzz"])]).unwrap();
    assert_eq!(out, rows(json!([{"a": 1}])));
}
