//! Request parameter classification and normalization.
//!
//! Callers hand the client parameters of any shape. They are classified once
//! into [`Params`] and then normalized against the configured default
//! parameters into the [`NormalizedParams`] that go on the wire.
//!
//! Merge rules:
//! - Keyed maps are merged over the defaults (caller keys win).
//! - Non-empty positional lists pass through untouched. Some Zabbix methods
//!   (the `*.delete` family) expect a bare array of ids, not an object.
//! - Empty input becomes the defaults, so omitted parameters still pick up
//!   configured values such as `output = "extend"`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied parameters, classified by shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Params {
    /// No parameters (`null`, `false`, `()`).
    #[default]
    Absent,
    /// A single string, number or `true`.
    Scalar(Value),
    /// A list whose keys are the contiguous sequence `0..n-1`.
    Positional(Vec<Value>),
    /// A string-keyed map.
    Keyed(Map<String, Value>),
}

impl Params {
    /// Classify an arbitrary JSON value.
    ///
    /// An object whose keys are exactly `"0"`, `"1"`, ... in order counts as
    /// positional; its values are taken in key order.
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => Params::Absent,
            scalar @ (Value::Bool(true) | Value::Number(_) | Value::String(_)) => {
                Params::Scalar(scalar)
            }
            Value::Array(items) => Params::Positional(items),
            Value::Object(map) => {
                if has_positional_keys(&map) {
                    Params::Positional(map.into_iter().map(|(_, v)| v).collect())
                } else {
                    Params::Keyed(map)
                }
            }
        }
    }

    /// Returns true if there is nothing to send.
    pub fn is_empty(&self) -> bool {
        match self {
            Params::Absent => true,
            Params::Scalar(_) => false,
            Params::Positional(items) => items.is_empty(),
            Params::Keyed(map) => map.is_empty(),
        }
    }
}

fn has_positional_keys(map: &Map<String, Value>) -> bool {
    map.keys()
        .enumerate()
        .all(|(index, key)| *key == index.to_string())
}

impl From<Value> for Params {
    fn from(value: Value) -> Self {
        Params::classify(value)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Params::classify(Value::Object(map))
    }
}

impl From<Vec<Value>> for Params {
    fn from(items: Vec<Value>) -> Self {
        Params::Positional(items)
    }
}

impl From<&str> for Params {
    fn from(s: &str) -> Self {
        Params::Scalar(Value::String(s.to_string()))
    }
}

impl From<String> for Params {
    fn from(s: String) -> Self {
        Params::Scalar(Value::String(s))
    }
}

impl From<i64> for Params {
    fn from(n: i64) -> Self {
        Params::Scalar(Value::from(n))
    }
}

impl From<u64> for Params {
    fn from(n: u64) -> Self {
        Params::Scalar(Value::from(n))
    }
}

impl From<f64> for Params {
    /// Non-finite values have no JSON form and count as absent.
    fn from(n: f64) -> Self {
        Params::classify(Value::from(n))
    }
}

impl From<bool> for Params {
    fn from(b: bool) -> Self {
        Params::classify(Value::Bool(b))
    }
}

impl From<()> for Params {
    fn from(_: ()) -> Self {
        Params::Absent
    }
}

impl<T: Into<Params>> From<Option<T>> for Params {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Parameter set ready for transmission.
///
/// Serializes as a bare JSON array or object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedParams {
    Positional(Vec<Value>),
    Keyed(Map<String, Value>),
}

impl NormalizedParams {
    /// Look up a keyed parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            NormalizedParams::Keyed(map) => map.get(key),
            NormalizedParams::Positional(_) => None,
        }
    }

    /// Convert into a plain JSON value.
    pub fn into_value(self) -> Value {
        match self {
            NormalizedParams::Positional(items) => Value::Array(items),
            NormalizedParams::Keyed(map) => Value::Object(map),
        }
    }
}

impl Default for NormalizedParams {
    fn default() -> Self {
        NormalizedParams::Positional(Vec::new())
    }
}

/// Normalize caller parameters against the default parameters.
///
/// An empty merge result is sent as `[]`, which every Zabbix version accepts
/// for parameterless methods such as `apiinfo.version`.
pub fn normalize(params: Params, defaults: &Map<String, Value>) -> NormalizedParams {
    let merged = match params {
        Params::Scalar(value) => return NormalizedParams::Positional(vec![value]),
        Params::Positional(items) if !items.is_empty() => {
            return NormalizedParams::Positional(items)
        }
        Params::Keyed(map) => merge_over(defaults, map),
        Params::Absent | Params::Positional(_) => defaults.clone(),
    };
    if merged.is_empty() {
        NormalizedParams::Positional(Vec::new())
    } else {
        NormalizedParams::Keyed(merged)
    }
}

/// Shallow merge: default key order is kept, caller values replace defaults,
/// caller-only keys are appended.
fn merge_over(defaults: &Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    let mut merged = defaults.clone();
    for (key, value) in overlay {
        merged.insert(key, value);
    }
    merged
}
