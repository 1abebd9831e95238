//! Transport Layer for the API Client
//!
//! Abstracts the HTTP round trip for testability. Provides:
//! - Transport trait: one POST of a JSON-RPC body, raw bytes back
//! - HttpTransport: blocking HTTP via ureq for production
//! - MockTransport: in-process mock API for tests

use std::io::{self, Read};
use std::time::Duration;

use zabbix_protocol::CONTENT_TYPE;

use crate::mock::MockApi;

/// Transport trait for API communication
///
/// Implementations perform exactly one round trip per call and never retry.
pub trait Transport: Send + Sync {
    /// POST `body` to `endpoint` and return the full response body
    fn post(&self, endpoint: &str, body: &[u8]) -> Result<Vec<u8>, TransportError>;
}

/// Transport errors
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The endpoint could not be opened (DNS, refused, bad URL, HTTP status)
    #[error("Could not connect to \"{endpoint}\": {reason}")]
    Connect { endpoint: String, reason: String },

    /// The endpoint answered but the body could not be read
    #[error("Could not read data from \"{endpoint}\": {source}")]
    Read {
        endpoint: String,
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    /// Shorthand for a connect failure
    pub fn connect(endpoint: &str, reason: impl Into<String>) -> Self {
        TransportError::Connect {
            endpoint: endpoint.to_string(),
            reason: reason.into(),
        }
    }

    /// Endpoint the failure refers to
    pub fn endpoint(&self) -> &str {
        match self {
            TransportError::Connect { endpoint, .. } | TransportError::Read { endpoint, .. } => {
                endpoint
            }
        }
    }
}

/// HTTP transport configuration
///
/// Unset timeouts leave ureq's defaults in place.
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    /// Socket connect timeout
    pub connect_timeout: Option<Duration>,
    /// Per-read socket timeout
    pub read_timeout: Option<Duration>,
}

/// Blocking HTTP transport
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    /// Create a transport with the given configuration
    pub fn new(config: HttpConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.timeout_connect(timeout);
        }
        if let Some(timeout) = config.read_timeout {
            builder = builder.timeout_read(timeout);
        }
        Self {
            agent: builder.build(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(HttpConfig::default())
    }
}

impl Transport for HttpTransport {
    fn post(&self, endpoint: &str, body: &[u8]) -> Result<Vec<u8>, TransportError> {
        let response = self
            .agent
            .post(endpoint)
            .set("Content-type", CONTENT_TYPE)
            .send_bytes(body)
            .map_err(|err| TransportError::connect(endpoint, describe_http_error(err)))?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|source| TransportError::Read {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Ok(bytes)
    }
}

fn describe_http_error(err: ureq::Error) -> String {
    match err {
        ureq::Error::Status(code, response) => {
            format!("HTTP status {} {}", code, response.status_text())
        }
        ureq::Error::Transport(transport) => {
            let category = match transport.kind() {
                ureq::ErrorKind::Dns => "dns lookup failed",
                ureq::ErrorKind::ConnectionFailed => "connection refused or target unavailable",
                ureq::ErrorKind::InvalidUrl => "invalid url",
                ureq::ErrorKind::UnknownScheme => "unsupported url scheme",
                ureq::ErrorKind::Io => "network i/o error",
                _ => "transport error",
            };
            match transport.message() {
                Some(detail) => format!("{}: {}", category, detail),
                None => category.to_string(),
            }
        }
    }
}

/// Mock transport for testing - routes bodies directly to a MockApi in-process
pub struct MockTransport {
    api: MockApi,
}

impl MockTransport {
    /// Create a new mock transport with a fresh mock API
    pub fn new() -> Self {
        Self {
            api: MockApi::new(),
        }
    }

    /// Create a mock transport around a pre-configured mock API
    pub fn with_api(api: MockApi) -> Self {
        Self { api }
    }

    /// Get a reference to the underlying mock API for test configuration
    pub fn api(&self) -> &MockApi {
        &self.api
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn post(&self, endpoint: &str, body: &[u8]) -> Result<Vec<u8>, TransportError> {
        self.api.handle(endpoint, body)
    }
}
