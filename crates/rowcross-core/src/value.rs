//! Classification of raw JSON values into step shapes and column data.
//!
//! Only arrays are iterable. Strings stay atomic so a column of `"abc"` is one
//! value, not three characters.

use serde_json::Value;

/// True for values the column and merge operators iterate over.
pub fn is_iterable(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

/// Wrap anything that is not iterable as a single-element sequence.
pub fn make_iterable(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// A column block is an object literal with at least one entry.
pub fn is_column_block(value: &Value) -> bool {
    matches!(value, Value::Object(fields) if !fields.is_empty())
}

/// Equality used by equi-joins.
///
/// Scalars compare by value, with numbers compared numerically so `1` and
/// `1.0` match. Arrays and objects never match.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => false,
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        _ => a == b,
    }
}
