//! Error types for the Zabbix protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Error object embedded in a Zabbix response.
///
/// Zabbix puts the short description in `message` ("Invalid params.") and the
/// useful detail in `data`. Either may be missing on older servers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteError {
    /// JSON-RPC error code (e.g. -32602), 0 when the server sent none.
    #[serde(default)]
    pub code: i64,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Detail, usually a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RemoteError {
    /// Create a remote error with a string detail.
    pub fn new(code: i64, data: impl Into<String>) -> Self {
        Self {
            code,
            message: None,
            data: Some(Value::String(data.into())),
        }
    }

    /// Read whatever a server put under `error`.
    ///
    /// A bare string becomes the detail. In an object, `code` may be a number
    /// or a numeric string, and a non-string `message` is kept as JSON text.
    /// Any other value is kept as `data`.
    pub fn from_value(value: Value) -> Self {
        let mut object = match value {
            Value::String(detail) => return Self::new(0, detail),
            Value::Object(object) => object,
            other => {
                return Self {
                    code: 0,
                    message: None,
                    data: Some(other),
                }
            }
        };
        let code = match object.remove("code") {
            Some(Value::Number(n)) => n.as_i64().unwrap_or_default(),
            Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        };
        let message = match object.remove("message") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        let data = match object.remove("data") {
            None | Some(Value::Null) => None,
            Some(data) => Some(data),
        };
        Self { code, message, data }
    }

    /// Attach the short description.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Human-readable detail: `data` when it is a string, otherwise
    /// `message`, otherwise the JSON text of `data`.
    pub fn detail(&self) -> String {
        match (&self.data, &self.message) {
            (Some(Value::String(data)), _) => data.clone(),
            (_, Some(message)) => message.clone(),
            (Some(other), None) => other.to_string(),
            (None, None) => String::new(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error {}: {}", self.code, self.detail())
    }
}

impl std::error::Error for RemoteError {}

/// Failures while interpreting a response body.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed response: {reason}")]
    Malformed { reason: String },

    #[error(transparent)]
    Remote(RemoteError),

    #[error("cannot re-key result by '{property}': element {index} lacks the property")]
    Rekey { property: String, index: usize },
}

impl ProtocolError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}
