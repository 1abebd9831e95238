//! Mock Zabbix API
//!
//! Configurable in-process API endpoint for testing the client without a
//! server. Plugged in through [`MockTransport`](crate::client::MockTransport).
//!
//! # Methods
//!
//! - `apiinfo.version`: unauthenticated, rejects an auth token
//! - `user.login`: checks credentials, issues a session token
//! - `user.logout`: ends the named session, accepts a bare logout
//! - `host.get` / `host.create` / `host.delete`: small host inventory
//! - `hostgroup.get`: fixed group list
//!
//! Other methods answer "Method not found." unless given a canned result.

mod api;
mod failure;

pub use api::{MockApi, MOCK_API_VERSION, MOCK_PASSWORD, MOCK_USER};
pub use failure::{FailureConfig, FailureInjector, FailureMode};
