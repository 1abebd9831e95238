//! Client pipeline tests
//!
//! End-to-end behavior of the call pipeline against the in-process mock API:
//! - Parameter normalization on the wire
//! - Envelope shape and request ids
//! - Response processing and re-keying
//! - Facade methods routing through the generic call

use std::sync::Arc;

use serde_json::{json, Value};
use zabbix_rpc::client::MockTransport;
use zabbix_rpc::mock::{FailureConfig, MockApi, MOCK_API_VERSION, MOCK_PASSWORD, MOCK_USER};
use zabbix_rpc::{ApiClient, ApiClientError, ClientConfig};

fn client_for(api: &MockApi, config: ClientConfig) -> ApiClient {
    ApiClient::connect_with_transport(&config, Arc::new(MockTransport::with_api(api.clone())))
        .expect("connect should succeed")
}

fn logged_in(api: &MockApi) -> ApiClient {
    client_for(
        api,
        ClientConfig::new("http://zabbix.test/api_jsonrpc.php").with_credentials(MOCK_USER, MOCK_PASSWORD),
    )
}

fn last_body(api: &MockApi) -> Value {
    let raw = api.raw_bodies().pop().expect("a request was sent");
    serde_json::from_str(&raw).expect("request body is JSON")
}

// =============================================================================
// Parameter normalization
// =============================================================================

#[test]
fn test_scalar_becomes_single_element_list() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    api.respond_with("host.exists", json!(true));

    client.host_exists("web-01", "").unwrap();
    assert_eq!(last_body(&api)["params"], json!(["web-01"]));

    client.host_exists(42i64, "").unwrap();
    assert_eq!(last_body(&api)["params"], json!([42]));
}

#[test]
fn test_absent_params_send_defaults() {
    let api = MockApi::new();
    let mut client = logged_in(&api);

    client.hostgroup_get((), "").unwrap();
    assert_eq!(last_body(&api)["params"], json!([]));

    client.set_default_params(json!({"output": "extend"})).unwrap();
    client.hostgroup_get(Value::Null, "").unwrap();
    assert_eq!(last_body(&api)["params"], json!({"output": "extend"}));

    client.hostgroup_get(false, "").unwrap();
    assert_eq!(last_body(&api)["params"], json!({"output": "extend"}));
}

#[test]
fn test_keyed_params_merge_over_defaults_in_order() {
    let api = MockApi::new();
    let config = ClientConfig::new("http://zabbix.test/api_jsonrpc.php")
        .with_credentials(MOCK_USER, MOCK_PASSWORD)
        .with_default_params(
            json!({"output": "extend", "limit": 100})
                .as_object()
                .cloned()
                .unwrap(),
        );
    let mut client = client_for(&api, config);

    client
        .host_get(json!({"limit": 1, "selectGroups": "extend"}), "")
        .unwrap();
    let raw = api.raw_bodies().pop().unwrap();
    assert!(
        raw.contains(r#""params":{"output":"extend","limit":1,"selectGroups":"extend"}"#),
        "unexpected body: {}",
        raw
    );
}

#[test]
fn test_positional_params_skip_defaults() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    client.set_default_params(json!({"output": "extend"})).unwrap();

    let deleted = client.host_delete(json!(["10085"]), "").unwrap();
    assert_eq!(deleted, json!({"hostids": ["10085"]}));
    assert_eq!(last_body(&api)["params"], json!(["10085"]));

    // Index-keyed objects are list-like
    api.respond_with("item.delete", json!({"itemids": ["1", "2"]}));
    client.item_delete(json!({"0": "1", "1": "2"}), "").unwrap();
    assert_eq!(last_body(&api)["params"], json!(["1", "2"]));
}

#[test]
fn test_login_params_merge_defaults() {
    let api = MockApi::new();
    let mut client = ApiClient::with_transport(
        "http://zabbix.test/api_jsonrpc.php",
        Arc::new(MockTransport::with_api(api.clone())),
    );
    client.set_default_params(json!({"output": "extend"})).unwrap();
    client.login_with_credentials(MOCK_USER, MOCK_PASSWORD).unwrap();

    let body = last_body(&api);
    assert_eq!(body["params"]["user"], MOCK_USER);
    assert_eq!(body["params"]["output"], "extend");
}

// =============================================================================
// Envelope
// =============================================================================

#[test]
fn test_envelope_wire_form() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    let token = client.auth_token().unwrap().to_string();

    client.hostgroup_get(json!({"output": ["name"]}), "").unwrap();
    let raw = api.raw_bodies().pop().unwrap();
    let id = last_body(&api)["id"].as_str().unwrap().to_string();
    assert_eq!(
        raw,
        format!(
            r#"{{"jsonrpc":"2.0","method":"hostgroup.get","params":{{"output":["name"]}},"auth":"{}","id":"{}"}}"#,
            token, id
        )
    );
    assert_eq!(id.len(), 16);
    assert!(id.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_identical_gets_differ_only_by_id() {
    let api = MockApi::new();
    let mut client = logged_in(&api);

    client.host_get(json!({"output": "extend"}), "").unwrap();
    let mut first = last_body(&api);
    client.host_get(json!({"output": "extend"}), "").unwrap();
    let mut second = last_body(&api);

    first.as_object_mut().unwrap().remove("id");
    second.as_object_mut().unwrap().remove("id");
    assert_eq!(first, second);
}

#[test]
fn test_endpoint_replaceable() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    client.set_api_url("http://other.test/api_jsonrpc.php");
    client.hostgroup_get((), "").unwrap();
    assert_eq!(
        api.endpoints().last().map(String::as_str),
        Some("http://other.test/api_jsonrpc.php")
    );
}

// =============================================================================
// Response processing
// =============================================================================

#[test]
fn test_rekey_by_property() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    api.respond_with(
        "template.get",
        json!([{"id": "5", "name": "a"}, {"id": "7", "name": "b"}]),
    );

    let keyed = client.template_get((), "id").unwrap();
    assert_eq!(
        keyed,
        json!({"5": {"id": "5", "name": "a"}, "7": {"id": "7", "name": "b"}})
    );

    let plain = client.template_get((), "").unwrap();
    assert_eq!(plain, json!([{"id": "5", "name": "a"}, {"id": "7", "name": "b"}]));

    // First element lacks the property: unchanged
    let unchanged = client.template_get((), "templateid").unwrap();
    assert!(unchanged.is_array());
}

#[test]
fn test_rekey_ignores_non_list_results() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    let created = client.host_create(json!({"host": "db-01"}), "hostid").unwrap();
    assert!(created["hostids"].is_array());
}

#[test]
fn test_error_object_becomes_api_error() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    api.inject_failure(
        "host.get",
        FailureConfig::raw_body(r#"{"error":{"code":-32602,"data":"Invalid params"}}"#),
    );

    let err = client.host_get(json!({}), "").unwrap_err();
    match &err {
        ApiClientError::Api { code, message, method, .. } => {
            assert_eq!(*code, -32602);
            assert_eq!(message, "Invalid params");
            assert_eq!(method, "host.get");
        }
        other => panic!("expected API error, got {:?}", other),
    }
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_unparseable_response_is_malformed() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    api.inject_failure("host.get", FailureConfig::raw_body("<html>502 Bad Gateway</html>"));

    let err = client.host_get(json!({}), "").unwrap_err();
    assert!(matches!(err, ApiClientError::MalformedResponse { .. }));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(client.last_response(), Some("<html>502 Bad Gateway</html>"));
}

#[test]
fn test_explicit_null_result_is_success() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    api.respond_with("history.get", Value::Null);
    assert_eq!(client.history_get(json!({}), "").unwrap(), Value::Null);
}

#[test]
fn test_no_retry_after_failure() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    api.inject_failure("host.get", FailureConfig::connection_refused().with_fail_count(1));
    let before = api.requests().len();

    assert!(client.host_get(json!({}), "").is_err());
    assert_eq!(api.requests().len(), before + 1);
    assert!(client.host_get(json!({}), "").is_ok());
}

// =============================================================================
// Facade
// =============================================================================

#[test]
fn test_facade_equals_generic_call() {
    let api = MockApi::new();
    let mut client = logged_in(&api);

    let via_facade = client.hostgroup_get(json!({}), "groupid").unwrap();
    let facade_body = last_body(&api);
    let via_call = client.call("hostgroup.get", json!({}), "groupid").unwrap();
    let call_body = last_body(&api);

    assert_eq!(via_facade, via_call);
    assert_eq!(facade_body["method"], call_body["method"]);
    assert_eq!(facade_body["params"], call_body["params"]);
    assert_eq!(facade_body["auth"], call_body["auth"]);
}

#[test]
fn test_version_facade_is_unauthenticated() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    assert_eq!(client.apiinfo_version((), "").unwrap(), json!(MOCK_API_VERSION));
    assert_eq!(last_body(&api)["auth"], "");
}

#[test]
fn test_unknown_remote_method() {
    let api = MockApi::new();
    let mut client = logged_in(&api);
    let err = client.invoke("widget.get", json!({}), "").unwrap_err();
    assert_eq!(err.remote_code(), Some(-32601));
}
