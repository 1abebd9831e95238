//! Resolved client settings

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::effective::ConfigError;
use crate::client::HttpConfig;

/// Settings needed to construct an [`ApiClient`](crate::ApiClient)
#[derive(Clone, Default, PartialEq)]
pub struct ClientConfig {
    /// Endpoint, e.g. `http://zabbix.example/api_jsonrpc.php`
    pub api_url: String,
    /// Login user for the implicit login on connect
    pub user: Option<String>,
    /// Login password for the implicit login on connect
    pub password: Option<String>,
    /// Merged into every keyed parameter set
    pub default_params: Map<String, Value>,
    /// Echo raw requests/responses to stdout
    pub print_communication: bool,
    /// Treat a response with neither result nor error as `null`
    pub allow_missing_result: bool,
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
}

#[derive(Debug, Default, Deserialize)]
struct FileShape {
    #[serde(default)]
    api: ApiTable,
    #[serde(default)]
    default_params: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiTable {
    #[serde(default)]
    url: String,
    user: Option<String>,
    password: Option<String>,
    #[serde(default)]
    print_communication: bool,
    #[serde(default)]
    allow_missing_result: bool,
    connect_timeout_seconds: Option<u64>,
    read_timeout_seconds: Option<u64>,
}

impl ClientConfig {
    /// Config for an endpoint with everything else defaulted
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Set credentials for the implicit login
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Set default parameters
    pub fn with_default_params(mut self, default_params: Map<String, Value>) -> Self {
        self.default_params = default_params;
        self
    }

    /// Both user and password, when both are non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user.as_deref(), self.password.as_deref()) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                Some((user, password))
            }
            _ => None,
        }
    }

    /// Transport settings derived from the timeouts
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
        }
    }

    /// Read the merged layered value (`[api]` + `[default_params]`)
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let shape: FileShape = if value.is_null() {
            FileShape::default()
        } else {
            serde_json::from_value(value.clone())
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?
        };
        Ok(Self {
            api_url: shape.api.url,
            user: shape.api.user,
            password: shape.api.password,
            default_params: shape.default_params,
            print_communication: shape.api.print_communication,
            allow_missing_result: shape.api.allow_missing_result,
            connect_timeout: shape.api.connect_timeout_seconds.map(Duration::from_secs),
            read_timeout: shape.api.read_timeout_seconds.map(Duration::from_secs),
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("default_params", &self.default_params)
            .field("print_communication", &self.print_communication)
            .field("allow_missing_result", &self.allow_missing_result)
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}
