//! RPC request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::params::NormalizedParams;
use crate::JSONRPC_VERSION;

/// Width of the request id: microseconds since the epoch fit in 16 digits
/// until the year 2286.
const REQUEST_ID_WIDTH: usize = 16;

/// RPC request envelope.
///
/// One envelope is built per call and serialized as the POST body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol marker, always "2.0".
    pub jsonrpc: String,
    /// Remote method, `resource.action`.
    pub method: String,
    /// Positional list or keyed map.
    pub params: NormalizedParams,
    /// Session token, or empty when the call is unauthenticated.
    pub auth: String,
    /// Correlation id derived from wall-clock time.
    /// Not unique under rapid sequential calls.
    pub id: String,
}

impl RpcRequest {
    /// Build an envelope with a fresh request id.
    ///
    /// `auth` of `None` (or an empty token) produces an empty auth field.
    pub fn new(method: impl Into<String>, params: NormalizedParams, auth: Option<&str>) -> Self {
        Self::with_id(method, params, auth, next_request_id())
    }

    /// Build an envelope with a caller-chosen id.
    pub fn with_id(
        method: impl Into<String>,
        params: NormalizedParams,
        auth: Option<&str>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            auth: auth.unwrap_or_default().to_string(),
            id: id.into(),
        }
    }

    /// Returns true if the envelope carries a session token.
    pub fn is_authenticated(&self) -> bool {
        !self.auth.is_empty()
    }

    /// Serialize to the wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Generate a request id from the current time.
pub fn next_request_id() -> String {
    request_id_at(Utc::now())
}

/// Request id for a given instant: microseconds since the Unix epoch,
/// zero-padded, no separators.
pub fn request_id_at(at: DateTime<Utc>) -> String {
    let micros = at.timestamp_micros().max(0);
    format!("{:0width$}", micros, width = REQUEST_ID_WIDTH)
}
