//! Session lifecycle tests
//!
//! Login and logout transitions and how the token is threaded into the
//! following calls.

use std::sync::Arc;

use serde_json::json;
use zabbix_rpc::client::MockTransport;
use zabbix_rpc::mock::{FailureConfig, MockApi, MOCK_PASSWORD, MOCK_USER};
use zabbix_rpc::{ApiClient, ApiClientError, ClientConfig, SessionState};

const URL: &str = "http://zabbix.test/api_jsonrpc.php";

fn anonymous(api: &MockApi) -> ApiClient {
    ApiClient::with_transport(URL, Arc::new(MockTransport::with_api(api.clone())))
}

/// Log in with the default account and check the login went out without auth
fn login(client: &mut ApiClient, api: &MockApi) {
    let result = client.login_with_credentials(MOCK_USER, MOCK_PASSWORD).unwrap();
    assert_eq!(result.as_str(), client.auth_token());
    assert!(api.last_request().unwrap().auth.is_empty());
}

// =============================================================================
// Login
// =============================================================================

#[test]
fn test_login_token_carried_by_next_call() {
    let api = MockApi::new();
    api.queue_token("T1");
    let mut client = anonymous(&api);
    assert_eq!(client.session().state(), SessionState::Unauthenticated);

    login(&mut client, &api);
    assert_eq!(client.session().state(), SessionState::Authenticated);

    client.host_get(json!({}), "").unwrap();
    assert_eq!(api.last_request().unwrap().auth, "T1");
}

#[test]
fn test_relogin_overwrites_token() {
    let api = MockApi::new();
    api.queue_token("T1");
    api.queue_token("T2");
    let mut client = anonymous(&api);

    login(&mut client, &api);
    login(&mut client, &api);
    assert_eq!(client.auth_token(), Some("T2"));

    client.hostgroup_get((), "").unwrap();
    assert_eq!(api.last_request().unwrap().auth, "T2");
}

#[test]
fn test_failed_login_stays_unauthenticated() {
    let api = MockApi::new();
    let mut client = anonymous(&api);

    let err = client.login_with_credentials(MOCK_USER, "wrong").unwrap_err();
    match err {
        ApiClientError::Api { code, message, .. } => {
            assert_eq!(code, -32602);
            assert!(message.contains("Incorrect user name or password"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
    assert!(!client.is_authenticated());

    let err = client.host_get(json!({}), "").unwrap_err();
    assert_eq!(err.remote_code(), Some(-32602));
    assert_eq!(api.last_request().unwrap().auth, "");
}

#[test]
fn test_connect_performs_implicit_login() {
    let api = MockApi::new();
    api.add_user("monitor", "s3cret");
    api.queue_token("T9");
    let config = ClientConfig::new(URL).with_credentials("monitor", "s3cret");

    let client =
        ApiClient::connect_with_transport(&config, Arc::new(MockTransport::with_api(api.clone())))
            .unwrap();
    assert_eq!(client.auth_token(), Some("T9"));
    assert_eq!(api.requests()[0].method, "user.login");
}

#[test]
fn test_connect_propagates_login_failure() {
    let api = MockApi::new();
    let config = ClientConfig::new(URL).with_credentials(MOCK_USER, "wrong");
    let result =
        ApiClient::connect_with_transport(&config, Arc::new(MockTransport::with_api(api.clone())));
    assert!(matches!(result, Err(ApiClientError::Api { .. })));
}

// =============================================================================
// Logout
// =============================================================================

#[test]
fn test_logout_sends_no_auth() {
    let api = MockApi::new();
    let mut client = anonymous(&api);
    login(&mut client, &api);

    client.logout(()).unwrap();
    let logout = api.last_request().unwrap();
    assert_eq!(logout.method, "user.logout");
    assert_eq!(logout.auth, "");
    assert!(!client.is_authenticated());
}

#[test]
fn test_logout_clears_even_when_remote_fails() {
    let api = MockApi::new();
    let mut client = anonymous(&api);
    login(&mut client, &api);
    api.inject_failure("user.logout", FailureConfig::connection_refused());

    let err = client.logout(()).unwrap_err();
    assert!(matches!(err, ApiClientError::ConnectionFailure { .. }));
    assert_eq!(client.session().state(), SessionState::Unauthenticated);

    api.clear_failures();
    let _ = client.host_get(json!({}), "");
    assert_eq!(api.last_request().unwrap().auth, "");
}

#[test]
fn test_logout_then_login_again() {
    let api = MockApi::new();
    api.queue_token("T1");
    api.queue_token("T2");
    let mut client = anonymous(&api);

    login(&mut client, &api);
    client.logout(()).unwrap();
    login(&mut client, &api);

    client.host_get(json!({}), "").unwrap();
    assert_eq!(api.last_request().unwrap().auth, "T2");
}

// =============================================================================
// Independence
// =============================================================================

#[test]
fn test_clients_share_nothing() {
    let api = MockApi::new();
    api.queue_token("A");
    let mut first = anonymous(&api);
    let mut second = anonymous(&api);

    login(&mut first, &api);
    second.set_default_params(json!({"output": "extend"})).unwrap();

    assert!(!second.is_authenticated());
    assert!(first.default_params().is_empty());
}

#[test]
fn test_client_behind_mutex() {
    use std::sync::Mutex;
    use std::thread;

    let api = MockApi::new();
    let client = Arc::new(Mutex::new(anonymous(&api)));
    login(&mut client.lock().unwrap(), &api);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            thread::spawn(move || client.lock().unwrap().hostgroup_get((), "").is_ok())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(api.requests().len(), 5);
}
