//! Ordered column maps used for both emitted rows and evaluation scopes.
//!
//! Every operation here is copy-on-write: a step builds a new `Record` from
//! the one it was handed, so sibling branches never observe each other.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An ordered mapping from column name to value.
///
/// Key order is insertion order; overwriting an existing key keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

/// The record being assembled for output.
pub type Row = Record;

/// Evaluation context for column functions and merge predicates.
///
/// Tracks the same keys as the row until a `group` resets the row; after
/// that it keeps every outer column so nested steps can still see them.
pub type Scope = Record;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Integer view of a column, if present and integral.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Copy of `self` with `key` set to `value`.
    pub fn with(&self, key: &str, value: Value) -> Record {
        let mut fields = self.fields.clone();
        fields.insert(key.to_string(), value);
        Record { fields }
    }

    /// Copy of `self` with every field of `other` laid over it.
    ///
    /// `other` wins on key collision.
    pub fn merged(&self, other: &Map<String, Value>) -> Record {
        let mut fields = self.fields.clone();
        for (k, v) in other {
            fields.insert(k.clone(), v.clone());
        }
        Record { fields }
    }

    /// Only the named keys present in `self`, in the order of `names`.
    pub fn selected<S: AsRef<str>>(&self, names: &[S]) -> Record {
        let mut fields = Map::new();
        for name in names {
            let name = name.as_ref();
            if let Some(v) = self.fields.get(name) {
                fields.insert(name.to_string(), v.clone());
            }
        }
        Record { fields }
    }

    /// Copy of `self` minus the named keys, keeping the remaining order.
    pub fn without<S: AsRef<str>>(&self, names: &[S]) -> Record {
        if !names.iter().any(|n| self.fields.contains_key(n.as_ref())) {
            return self.clone();
        }
        let fields = self
            .fields
            .iter()
            .filter(|(k, _)| !names.iter().any(|n| n.as_ref() == k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Record { fields }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl TryFrom<Value> for Record {
    type Error = Value;

    /// Succeeds only for JSON objects; hands the value back otherwise.
    fn try_from(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(other),
        }
    }
}

impl PartialEq<Value> for Record {
    fn eq(&self, other: &Value) -> bool {
        matches!(other, Value::Object(m) if *m == self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Record {
        Record::try_from(v).unwrap()
    }

    #[test]
    fn test_with_overwrites_in_place() {
        let r = record(json!({"a": 1, "b": 2}));
        let out = r.with("a", json!(9));
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(out.get_i64("a"), Some(9));
        // original untouched
        assert_eq!(r.get_i64("a"), Some(1));
    }

    #[test]
    fn test_merged_other_wins() {
        let r = record(json!({"a": 1, "b": "x"}));
        let other = json!({"b": "y", "c": 3});
        let out = r.merged(other.as_object().unwrap());
        assert_eq!(out, json!({"a": 1, "b": "y", "c": 3}));
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_selected_follows_name_order_and_skips_missing() {
        let r = record(json!({"a": 1, "b": 2, "c": 3}));
        let out = r.selected(&["c", "missing", "a"]);
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["c", "a"]);
    }

    #[test]
    fn test_without_keeps_order() {
        let r = record(json!({"a": 1, "b": 2, "c": 3}));
        let out = r.without(&["b", "zzz"]);
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn test_try_from_rejects_scalars() {
        assert!(Record::try_from(json!(5)).is_err());
        assert!(Record::try_from(json!([{"a": 1}])).is_err());
        assert!(Record::try_from(json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let r = record(json!({"b": 1, "a": [{"d": 4}]}));
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"b":1,"a":[{"d":4}]}"#);
    }
}
