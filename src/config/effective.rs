//! Effective configuration with provenance
//!
//! Records the merged configuration together with where each layer came
//! from. The serialized form is redacted; the client settings are read from
//! the unredacted merge.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::client::ClientConfig;
use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;

/// Schema version for the serialized effective config
pub const SCHEMA_VERSION: u32 = 1;

/// Longest accepted timeout, in seconds
const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Keys whose values are replaced when the config is displayed
const SECRET_KEYS: &[&str] = &["password", "token", "secret", "auth"];

/// Placeholder written over secret values
const REDACTED: &str = "[REDACTED]";

/// Origin of a configuration layer
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Env,
    Cli,
}

/// A contributing layer
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (file layer only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 of the raw file bytes (file layer only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No API url configured (set [api].url, ZABBIX_URL or --url)")]
    MissingUrl,
}

/// Merged configuration with provenance
#[derive(Clone, Serialize)]
pub struct EffectiveConfig {
    pub schema_version: u32,

    /// When this config was computed
    pub created_at: DateTime<Utc>,

    /// Merged configuration, secrets redacted
    pub config: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,

    /// Key paths that were redacted in `config`
    pub redactions: Vec<String>,

    #[serde(skip)]
    merged: Value,
}

impl EffectiveConfig {
    /// Merge built-in defaults, an optional config file, and optional env and CLI layers.
    ///
    /// A file path that does not exist is skipped.
    pub fn build(
        config_path: Option<&Path>,
        env_layer: Option<Value>,
        cli_layer: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        }];

        if let Some(path) = config_path.filter(|p| p.exists()) {
            let (value, digest) = load_toml_file(path)?;
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        for (origin, layer) in [(ConfigOrigin::Env, env_layer), (ConfigOrigin::Cli, cli_layer)] {
            if let Some(value) = layer {
                layers.push(value);
                sources.push(ConfigSource {
                    origin,
                    path: None,
                    digest: None,
                });
            }
        }

        let merged = merge_layers(layers);
        validate(&merged)?;

        let mut config = merged.clone();
        let mut redactions = Vec::new();
        redact(&mut config, "", &mut redactions);

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            created_at: Utc::now(),
            config,
            sources,
            redactions,
            merged,
        })
    }

    /// Client settings from the merged layers; requires an API url
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let config = ClientConfig::from_value(&self.merged)?;
        if config.api_url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        Ok(config)
    }

    /// Get a redacted value by dot-separated path
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.config, |current, part| current.get(part))
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    /// Pretty JSON of the redacted view
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Debug for EffectiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveConfig")
            .field("config", &self.config)
            .field("sources", &self.sources)
            .field("redactions", &self.redactions)
            .finish()
    }
}

fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let digest = hex::encode(Sha256::digest(&bytes));

    let parse_error = |message: String| ConfigError::ParseError {
        path: path.to_path_buf(),
        message,
    };
    let text = String::from_utf8(bytes).map_err(|e| parse_error(format!("invalid UTF-8: {}", e)))?;
    let table: toml::Value = toml::from_str(&text).map_err(|e| parse_error(e.to_string()))?;

    Ok((toml_to_json(table), digest))
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

fn validate(config: &Value) -> Result<(), ConfigError> {
    let api = config.get("api");

    if let Some(url) = api.and_then(|a| a.get("url")).and_then(Value::as_str) {
        if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "api.url must be an http(s) url, got '{}'",
                url
            )));
        }
    }

    for key in ["connect_timeout_seconds", "read_timeout_seconds"] {
        if let Some(raw) = api.and_then(|a| a.get(key)) {
            match raw.as_u64() {
                Some(seconds) if seconds > 0 && seconds <= MAX_TIMEOUT_SECONDS => {}
                _ => {
                    return Err(ConfigError::ValidationError(format!(
                        "api.{} must be in (0, {}]",
                        key, MAX_TIMEOUT_SECONDS
                    )))
                }
            }
        }
    }

    if let Some(params) = config.get("default_params") {
        if !params.is_object() {
            return Err(ConfigError::ValidationError(
                "default_params must be a table".to_string(),
            ));
        }
    }

    Ok(())
}

fn redact(value: &mut Value, path: &str, redactions: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                let lower = key.to_lowercase();
                let secret = SECRET_KEYS.iter().any(|s| lower.contains(s));
                if secret && !child.is_object() && !child.is_array() {
                    *child = Value::String(REDACTED.to_string());
                    redactions.push(child_path);
                } else {
                    redact(child, &child_path, redactions);
                }
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter_mut().enumerate() {
                redact(child, &format!("{}[{}]", path, index), redactions);
            }
        }
        _ => {}
    }
}
