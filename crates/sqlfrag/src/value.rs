//! Scalar bind values and the named binding map.

use crate::error::FragResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar value bound to a named placeholder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Borrow the text payload, if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value as it appears when placed verbatim into SQL.
    ///
    /// `Null` and `false` render empty, `true` renders `1`.
    pub fn to_sql_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Bool(false) => Ok(()),
            Value::Bool(true) => f.write_str("1"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    /// Arrays and objects are kept as their JSON text.
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Text(other.to_string()),
        }
    }
}

/// Insertion-ordered map from placeholder name (no leading colon) to value.
///
/// Re-binding an existing name replaces the value but keeps the position of
/// the first insertion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings(IndexMap<String, Value>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Placeholder names in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` into this map; incoming values win on collision.
    pub fn merge(&mut self, other: &Bindings) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Render the bindings as a JSON object for an execution layer.
    pub fn to_json(&self) -> FragResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }
}

impl<K, V> FromIterator<(K, V)> for Bindings
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (k, v) in iter {
            bindings.insert(k, v);
        }
        bindings
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Bindings
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Bindings {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rendering_matches_verbatim_placement() {
        assert_eq!(Value::from(1).to_sql_text(), "1");
        assert_eq!(Value::from(1.5).to_sql_text(), "1.5");
        assert_eq!(Value::from(true).to_sql_text(), "1");
        assert_eq!(Value::from(false).to_sql_text(), "");
        assert_eq!(Value::Null.to_sql_text(), "");
        assert_eq!(Value::from("id").to_sql_text(), "id");
    }

    #[test]
    fn floats_render_in_shortest_round_trip_form() {
        assert_eq!(Value::from(0.1 + 0.2).to_sql_text(), "0.30000000000000004");
        assert_eq!(Value::from(1e20).to_sql_text(), "100000000000000000000");
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn json_scalars_convert() {
        assert_eq!(Value::from(serde_json::json!(7)), Value::Int(7));
        assert_eq!(Value::from(serde_json::json!(2.5)), Value::Float(2.5));
        assert_eq!(Value::from(serde_json::json!("a")), Value::from("a"));
        assert_eq!(
            Value::from(serde_json::json!([1, 2])),
            Value::Text("[1,2]".into())
        );
    }

    #[test]
    fn rebinding_keeps_first_position() {
        let mut b = Bindings::new();
        b.insert("a", 1);
        b.insert("b", 2);
        assert_eq!(b.insert("a", 3), Some(Value::Int(1)));
        assert_eq!(b.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(b.get("a"), Some(&Value::Int(3)));
    }

    #[test]
    fn merge_is_last_write_wins() {
        let mut left = Bindings::from([("id", 1), ("x", 2)]);
        let right = Bindings::from([("x", 9), ("y", 3)]);
        left.merge(&right);
        assert_eq!(left, Bindings::from([("id", 1), ("x", 9), ("y", 3)]));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let b = Bindings::from([
            ("id", Value::from(1)),
            ("name", Value::from("test")),
            ("gone", Value::Null),
        ]);
        assert_eq!(
            serde_json::to_string(&b).unwrap(),
            r#"{"id":1,"name":"test","gone":null}"#
        );
        let json = serde_json::json!({"id": 1, "name": "test", "gone": null});
        assert_eq!(b.to_json().unwrap(), json);
    }
}
