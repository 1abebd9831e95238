//! Zabbix API client
//!
//! - Transport abstraction (HTTP and in-process mock)
//! - Session token state
//! - The call pipeline and login/logout
//! - Error types with exit code mapping

mod error;
mod rpc;
mod session;
mod transport;

pub use error::{ApiClientError, ApiResult, FailureKind};
pub use rpc::ApiClient;
pub use session::{token_from_login_result, Session, SessionState};
pub use transport::{HttpConfig, HttpTransport, MockTransport, Transport, TransportError};
