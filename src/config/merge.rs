//! Layer merge
//!
//! Tables merge key by key; arrays and scalars from the higher layer replace
//! the lower one outright. Keys keep the position they first appeared at.

use serde_json::Value;

/// Merge `overlay` onto `base`.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut merged), Value::Object(upper)) => {
            for (key, upper_value) in upper {
                match merged.get_mut(&key) {
                    Some(slot) => {
                        let lower_value = std::mem::take(slot);
                        *slot = deep_merge(lower_value, upper_value);
                    }
                    None => {
                        merged.insert(key, upper_value);
                    }
                }
            }
            Value::Object(merged)
        }
        (_, upper) => upper,
    }
}

/// Fold layers in precedence order (first is lowest).
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}
