//! API client errors

use serde_json::Value;
use zabbix_protocol::ProtocolError;

use super::transport::TransportError;

/// API client errors
///
/// Every variant that stems from a call carries the remote method name.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid method name: '{0}'")]
    InvalidMethod(String),

    #[error("Could not connect to \"{endpoint}\" calling {method}: {reason}")]
    ConnectionFailure {
        endpoint: String,
        method: String,
        reason: String,
    },

    #[error("Could not read data from \"{endpoint}\" calling {method}: {reason}")]
    ReadFailure {
        endpoint: String,
        method: String,
        reason: String,
    },

    #[error("API error {code} calling {method}: {message}")]
    Api {
        method: String,
        code: i64,
        message: String,
        data: Option<Value>,
    },

    #[error("Malformed response to {method}: {reason}")]
    MalformedResponse { method: String, reason: String },

    #[error("Cannot re-key {method} result by '{property}': element {index} lacks the property")]
    Rekey {
        method: String,
        property: String,
        index: usize,
    },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure kind for exit code mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Bad configuration or caller input (exit code 1)
    Config = 1,
    /// Endpoint unreachable or unreadable (exit code 2)
    Transport = 2,
    /// Remote returned an error object (exit code 3)
    Api = 3,
    /// Response could not be interpreted (exit code 4)
    Protocol = 4,
}

impl ApiClientError {
    pub(crate) fn from_transport(err: TransportError, method: &str) -> Self {
        match err {
            TransportError::Connect { endpoint, reason } => ApiClientError::ConnectionFailure {
                endpoint,
                method: method.to_string(),
                reason,
            },
            TransportError::Read { endpoint, source } => ApiClientError::ReadFailure {
                endpoint,
                method: method.to_string(),
                reason: source.to_string(),
            },
        }
    }

    pub(crate) fn from_protocol(err: ProtocolError, method: &str) -> Self {
        let method = method.to_string();
        match err {
            ProtocolError::Malformed { reason } => ApiClientError::MalformedResponse { method, reason },
            ProtocolError::Remote(remote) => ApiClientError::Api {
                method,
                code: remote.code,
                message: remote.detail(),
                data: remote.data,
            },
            ProtocolError::Rekey { property, index } => ApiClientError::Rekey {
                method,
                property,
                index,
            },
        }
    }

    /// Map error to failure kind for exit code
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            ApiClientError::Configuration(_) | ApiClientError::InvalidMethod(_) => FailureKind::Config,
            ApiClientError::ConnectionFailure { .. } | ApiClientError::ReadFailure { .. } => {
                FailureKind::Transport
            }
            ApiClientError::Api { .. } => FailureKind::Api,
            ApiClientError::MalformedResponse { .. }
            | ApiClientError::Rekey { .. }
            | ApiClientError::Serialization(_) => FailureKind::Protocol,
        }
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> i32 {
        self.failure_kind() as i32
    }

    /// Remote error code, for `Api` errors
    pub fn remote_code(&self) -> Option<i64> {
        match self {
            ApiClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiClientError>;
