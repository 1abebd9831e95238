//! zabbix-rpc - Zabbix JSON-RPC API client
//!
//! A synchronous client for the Zabbix monitoring API. One pipeline carries
//! every call: caller parameters are normalized against the default
//! parameters, wrapped in a JSON-RPC envelope with the session token, posted
//! to `api_jsonrpc.php`, and the result is optionally re-keyed by a property.
//!
//! ```no_run
//! use serde_json::json;
//! use zabbix_rpc::{ApiClient, ClientConfig};
//!
//! let config = ClientConfig::new("http://zabbix.example/api_jsonrpc.php")
//!     .with_credentials("Admin", "zabbix");
//! let mut client = ApiClient::connect(&config)?;
//! let hosts = client.host_get(json!({"output": ["host"]}), "hostid")?;
//! # Ok::<(), zabbix_rpc::ApiClientError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod mock;

pub use api::{ApiMethod, API_METHODS};
pub use client::{ApiClient, ApiClientError, ApiResult, FailureKind, Session, SessionState};
pub use config::{ClientConfig, ConfigError, EffectiveConfig};
pub use zabbix_protocol::{NormalizedParams, Params, RemoteError, RpcRequest, RpcResponse};
