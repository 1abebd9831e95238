//! Configuration layering
//!
//! Client settings are merged from four layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. User config file (`~/.config/zabbix-rpc/config.toml`)
//! 3. Environment (`ZABBIX_URL`, `ZABBIX_USER`, `ZABBIX_PASSWORD`)
//! 4. CLI flags

mod client;
mod defaults;
mod effective;
mod merge;

use std::path::PathBuf;

use serde_json::{json, Map, Value};

pub use client::ClientConfig;
pub use defaults::BuiltinDefaults;
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig};
pub use merge::{deep_merge, merge_layers};

/// Environment variables read by [`env_layer`], with the key they set under `[api]`.
pub const ENV_VARS: &[(&str, &str)] = &[
    ("ZABBIX_URL", "url"),
    ("ZABBIX_USER", "user"),
    ("ZABBIX_PASSWORD", "password"),
];

/// Default location of the user config file.
///
/// `$XDG_CONFIG_HOME/zabbix-rpc/config.toml`, falling back to
/// `$HOME/.config/zabbix-rpc/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("zabbix-rpc").join("config.toml"))
}

/// Build the environment layer from a variable lookup.
///
/// Returns `None` when none of [`ENV_VARS`] is set.
pub fn env_layer(lookup: impl Fn(&str) -> Option<String>) -> Option<Value> {
    let api: Map<String, Value> = ENV_VARS
        .iter()
        .filter_map(|(var, key)| lookup(var).map(|v| (key.to_string(), Value::String(v))))
        .collect();
    if api.is_empty() {
        None
    } else {
        Some(json!({ "api": api }))
    }
}
