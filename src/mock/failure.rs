//! Failure Injection for the Mock API
//!
//! Supports configurable failure injection for testing error paths.

use std::collections::HashMap;

use zabbix_protocol::RemoteError;

/// What the mock does instead of answering normally
#[derive(Debug, Clone, PartialEq)]
pub enum FailureMode {
    /// Answer with an embedded error object
    Remote(RemoteError),
    /// Fail the round trip as if the endpoint could not be opened
    ConnectionRefused,
    /// Fail the round trip as if the body could not be read
    ReadError,
    /// Answer with this body verbatim
    RawBody(String),
}

/// Failure configuration for a method
#[derive(Debug, Clone)]
pub struct FailureConfig {
    pub mode: FailureMode,
    /// Number of times to fail before succeeding (None = always fail)
    pub fail_count: Option<u32>,
}

impl FailureConfig {
    /// Return an API error object
    pub fn remote(code: i64, message: impl Into<String>, data: impl Into<String>) -> Self {
        Self::from_mode(FailureMode::Remote(
            RemoteError::new(code, data).with_message(message),
        ))
    }

    /// Refuse the connection
    pub fn connection_refused() -> Self {
        Self::from_mode(FailureMode::ConnectionRefused)
    }

    /// Break the body read
    pub fn read_error() -> Self {
        Self::from_mode(FailureMode::ReadError)
    }

    /// Return a raw body instead of a JSON-RPC reply
    pub fn raw_body(body: impl Into<String>) -> Self {
        Self::from_mode(FailureMode::RawBody(body.into()))
    }

    fn from_mode(mode: FailureMode) -> Self {
        Self {
            mode,
            fail_count: None,
        }
    }

    /// Set the number of times to fail before succeeding
    pub fn with_fail_count(mut self, count: u32) -> Self {
        self.fail_count = Some(count);
        self
    }
}

/// Failure injector for the mock API
#[derive(Debug, Default)]
pub struct FailureInjector {
    /// Per-method failure configs
    configs: HashMap<String, FailureConfig>,
    /// Call counts per method (for fail_count tracking)
    call_counts: HashMap<String, u32>,
}

impl FailureInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a failure for a method
    pub fn inject(&mut self, method: &str, config: FailureConfig) {
        self.configs.insert(method.to_string(), config);
        self.call_counts.insert(method.to_string(), 0);
    }

    /// Clear all failure injections
    pub fn clear(&mut self) {
        self.configs.clear();
        self.call_counts.clear();
    }

    /// Clear failure injection for a specific method
    pub fn clear_method(&mut self, method: &str) {
        self.configs.remove(method);
        self.call_counts.remove(method);
    }

    /// Check if a failure should occur for a method
    pub fn check(&mut self, method: &str) -> Option<FailureMode> {
        let config = self.configs.get(method)?;
        let count = self.call_counts.entry(method.to_string()).or_insert(0);
        *count += 1;

        if let Some(fail_limit) = config.fail_count {
            if *count > fail_limit {
                return None;
            }
        }

        Some(config.mode.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_config_remote() {
        let config = FailureConfig::remote(-32500, "Application error.", "No permissions.");
        match config.mode {
            FailureMode::Remote(err) => {
                assert_eq!(err.code, -32500);
                assert_eq!(err.detail(), "No permissions.");
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn test_failure_injector_basic() {
        let mut injector = FailureInjector::new();
        assert!(injector.check("host.get").is_none());

        injector.inject("host.get", FailureConfig::connection_refused());
        assert_eq!(injector.check("host.get"), Some(FailureMode::ConnectionRefused));
        assert!(injector.check("item.get").is_none());
    }

    #[test]
    fn test_failure_injector_fail_count() {
        let mut injector = FailureInjector::new();

        // Fail twice, then succeed
        injector.inject("host.get", FailureConfig::read_error().with_fail_count(2));

        assert!(injector.check("host.get").is_some());
        assert!(injector.check("host.get").is_some());
        assert!(injector.check("host.get").is_none());
    }

    #[test]
    fn test_failure_injector_clear() {
        let mut injector = FailureInjector::new();

        injector.inject("host.get", FailureConfig::raw_body("<html>"));
        injector.inject("item.get", FailureConfig::raw_body("<html>"));
        injector.clear_method("host.get");
        assert!(injector.check("host.get").is_none());
        assert!(injector.check("item.get").is_some());

        injector.clear();
        assert!(injector.check("item.get").is_none());
    }
}
