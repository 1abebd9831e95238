//! Configuration layering tests
//!
//! Config file, environment and CLI layers feeding a client.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tempfile::{NamedTempFile, TempDir};
use zabbix_rpc::client::MockTransport;
use zabbix_rpc::config::{env_layer, ConfigOrigin};
use zabbix_rpc::mock::{MockApi, MOCK_PASSWORD, MOCK_USER};
use zabbix_rpc::{ApiClient, ConfigError, EffectiveConfig};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn test_file_config_drives_client() {
    let file = write_config(&format!(
        r#"
[api]
url = "http://zabbix.test/api_jsonrpc.php"
user = "{}"
password = "{}"
read_timeout_seconds = 20

[default_params]
output = "extend"
"#,
        MOCK_USER, MOCK_PASSWORD
    ));

    let effective = EffectiveConfig::build(Some(file.path()), None, None).unwrap();
    let config = effective.client_config().unwrap();
    assert_eq!(config.read_timeout, Some(Duration::from_secs(20)));

    let api = MockApi::new();
    let mut client =
        ApiClient::connect_with_transport(&config, Arc::new(MockTransport::with_api(api.clone())))
            .unwrap();
    assert!(client.is_authenticated());

    client.hostgroup_get(json!({"limit": 1}), "").unwrap();
    let sent = api.last_request().unwrap().params.into_value();
    assert_eq!(sent, json!({"output": "extend", "limit": 1}));
    assert_eq!(api.endpoints()[0], "http://zabbix.test/api_jsonrpc.php");
}

#[test]
fn test_env_overrides_file_and_cli_overrides_env() {
    let file = write_config(
        r#"
[api]
url = "http://file.test/api_jsonrpc.php"
user = "file-user"
"#,
    );
    let env = env_layer(|var| match var {
        "ZABBIX_URL" => Some("http://env.test/api_jsonrpc.php".to_string()),
        "ZABBIX_USER" => Some("env-user".to_string()),
        _ => None,
    });
    let cli = Some(json!({"api": {"user": "cli-user", "print_communication": true}}));

    let effective = EffectiveConfig::build(Some(file.path()), env, cli).unwrap();
    let config = effective.client_config().unwrap();
    assert_eq!(config.api_url, "http://env.test/api_jsonrpc.php");
    assert_eq!(config.user.as_deref(), Some("cli-user"));
    assert!(config.print_communication);

    let origins: Vec<_> = effective.sources.iter().map(|s| s.origin.clone()).collect();
    assert_eq!(
        origins,
        vec![ConfigOrigin::Builtin, ConfigOrigin::File, ConfigOrigin::Env, ConfigOrigin::Cli]
    );
}

#[test]
fn test_serialized_config_hides_password() {
    let file = write_config(
        r#"
[api]
url = "http://zabbix.test/api_jsonrpc.php"
password = "hunter2"
"#,
    );
    let effective = EffectiveConfig::build(Some(file.path()), None, None).unwrap();
    let json = effective.to_json().unwrap();
    assert!(!json.contains("hunter2"));
    assert!(json.contains("[REDACTED]"));
    assert!(json.contains("\"origin\": \"file\""));
}

#[test]
fn test_missing_url_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[default_params]\noutput = \"extend\"\n").unwrap();

    let effective = EffectiveConfig::build(Some(&path), None, None).unwrap();
    assert!(matches!(effective.client_config(), Err(ConfigError::MissingUrl)));
}

#[test]
fn test_non_table_default_params_rejected() {
    let file = write_config("default_params = [\"output\"]\n");
    let err = EffectiveConfig::build(Some(file.path()), None, None).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn test_digest_tracks_file_contents() {
    let first = write_config("[api]\nurl = \"http://a.test/api_jsonrpc.php\"\n");
    let second = write_config("[api]\nurl = \"http://b.test/api_jsonrpc.php\"\n");

    let digest = |file: &NamedTempFile| {
        EffectiveConfig::build(Some(file.path()), None, None).unwrap().sources[1]
            .digest
            .clone()
            .unwrap()
    };
    assert_eq!(digest(&first), digest(&first));
    assert_ne!(digest(&first), digest(&second));
}

#[test]
fn test_file_defaults_reach_wire_in_file_order() {
    let file = write_config(
        r#"
[api]
url = "http://zabbix.test/api_jsonrpc.php"
user = "Admin"
password = "zabbix"

[default_params]
output = "extend"
limit = 10
sortfield = "name"
"#,
    );
    let env = env_layer(|var| match var {
        "ZABBIX_URL" => Some("http://env.test/api_jsonrpc.php".to_string()),
        _ => None,
    });
    let effective = EffectiveConfig::build(Some(file.path()), env, None).unwrap();
    let config = effective.client_config().unwrap();
    let keys: Vec<_> = config.default_params.keys().cloned().collect();
    assert_eq!(keys, ["output", "limit", "sortfield"]);

    let api = MockApi::new();
    let mut client =
        ApiClient::connect_with_transport(&config, Arc::new(MockTransport::with_api(api.clone())))
            .unwrap();
    client.hostgroup_get((), "").unwrap();
    let raw = api.raw_bodies().pop().unwrap();
    assert!(
        raw.contains(r#""params":{"output":"extend","limit":10,"sortfield":"name"}"#),
        "unexpected body: {}",
        raw
    );
}
