//! RPC response types and result post-processing.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ProtocolError, RemoteError};

/// RPC response envelope.
///
/// A well-formed response carries exactly one of `result` or `error`.
/// `result` is kept as `Some(Value::Null)` when the server sent an explicit
/// `null`, and `None` only when the key is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RemoteError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl RpcResponse {
    /// Create a success response.
    pub fn success(id: impl Into<String>, result: Value) -> Self {
        Self {
            jsonrpc: Some(crate::JSONRPC_VERSION.to_string()),
            result: Some(result),
            error: None,
            id: Some(Value::String(id.into())),
        }
    }

    /// Create an error response.
    pub fn failure(id: impl Into<String>, error: RemoteError) -> Self {
        Self {
            jsonrpc: Some(crate::JSONRPC_VERSION.to_string()),
            result: None,
            error: Some(error),
            id: Some(Value::String(id.into())),
        }
    }

    /// Decode a raw response body.
    pub fn parse(body: &[u8]) -> Result<Self, ProtocolError> {
        let decoded: Value = serde_json::from_slice(body)
            .map_err(|e| ProtocolError::malformed(format!("invalid JSON: {}", e)))?;

        let mut object = match decoded {
            Value::Object(object) => object,
            other => {
                return Err(ProtocolError::malformed(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let error = match object.remove("error") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(RemoteError::from_value(raw)),
        };

        Ok(Self {
            jsonrpc: object
                .remove("jsonrpc")
                .and_then(|v| v.as_str().map(String::from)),
            result: object.remove("result"),
            error,
            id: object.remove("id"),
        })
    }

    /// Extract the success payload.
    ///
    /// An embedded error wins over any result. A response with neither is
    /// malformed unless `allow_missing_result` is set, in which case the
    /// payload is `null`.
    pub fn into_result(self, allow_missing_result: bool) -> Result<Value, ProtocolError> {
        if let Some(error) = self.error {
            return Err(ProtocolError::Remote(error));
        }
        match self.result {
            Some(result) => Ok(result),
            None if allow_missing_result => Ok(Value::Null),
            None => Err(ProtocolError::malformed(
                "response contains neither 'result' nor 'error'",
            )),
        }
    }
}

/// Re-key a list result by one of its elements' properties.
///
/// Non-lists, an empty property name, an empty list, or a list whose first
/// element lacks the property are returned unchanged. Later elements that lack
/// the property are an error. On duplicate keys the later element wins.
pub fn rekey(result: Value, property: &str) -> Result<Value, ProtocolError> {
    if property.is_empty() {
        return Ok(result);
    }
    let items = match result {
        Value::Array(items) => items,
        other => return Ok(other),
    };
    if items.first().and_then(|first| first.get(property)).is_none() {
        return Ok(Value::Array(items));
    }

    let mut keyed = Map::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let key = match item.get(property) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => {
                return Err(ProtocolError::Rekey {
                    property: property.to_string(),
                    index,
                })
            }
        };
        keyed.insert(key, item);
    }
    Ok(Value::Object(keyed))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
