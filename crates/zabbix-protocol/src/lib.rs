//! Zabbix JSON-RPC Protocol Types
//!
//! Defines the request/response envelope spoken by the Zabbix API endpoint
//! (`api_jsonrpc.php`), plus the pure transformations applied around it:
//! parameter normalization and re-keying of list results.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod params;
pub mod request;
pub mod response;

pub use error::{ProtocolError, RemoteError};
pub use params::{normalize, NormalizedParams, Params};
pub use request::{next_request_id, RpcRequest};
pub use response::{rekey, RpcResponse};

/// JSON-RPC protocol marker sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Content type the Zabbix endpoint expects on the POST body.
pub const CONTENT_TYPE: &str = "application/json-rpc";

/// Remote method that exchanges credentials for an auth token.
pub const LOGIN_METHOD: &str = "user.login";

/// Remote method that invalidates the current auth token.
pub const LOGOUT_METHOD: &str = "user.logout";
