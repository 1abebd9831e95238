//! Mock API Implementation
//!
//! In-process stand-in for a Zabbix `api_jsonrpc.php` endpoint. Handles the
//! session methods and a small host inventory; anything else can be given a
//! canned result.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use zabbix_protocol::{NormalizedParams, RemoteError, RpcRequest, RpcResponse, JSONRPC_VERSION};

use super::failure::{FailureConfig, FailureInjector, FailureMode};
use crate::client::TransportError;

/// Version reported by `apiinfo.version`
pub const MOCK_API_VERSION: &str = "6.0.0";

/// Account present in every fresh mock
pub const MOCK_USER: &str = "Admin";
pub const MOCK_PASSWORD: &str = "zabbix";

/// Mutable mock state
#[derive(Debug, Default)]
struct MockState {
    /// user name -> password
    users: HashMap<String, String>,
    /// token -> user name
    sessions: HashMap<String, String>,
    /// Tokens handed out before generated ones
    queued_tokens: VecDeque<String>,
    token_counter: u64,
    hosts: Vec<Value>,
    next_hostid: u64,
    groups: Vec<Value>,
    /// Results returned for methods without a built-in handler
    canned: HashMap<String, Value>,
    /// Every decodable request, in arrival order
    requests: Vec<RpcRequest>,
    /// Every body as received
    raw_bodies: Vec<String>,
    endpoints: Vec<String>,
}

/// Configurable mock API for testing
///
/// Clones share state, so a test can keep a handle while the client owns
/// another one inside its transport.
#[derive(Clone)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
    failures: Arc<Mutex<FailureInjector>>,
}

impl MockApi {
    /// Create a mock with the default account and inventory
    pub fn new() -> Self {
        let mut state = MockState {
            next_hostid: 10086,
            ..MockState::default()
        };
        state
            .users
            .insert(MOCK_USER.to_string(), MOCK_PASSWORD.to_string());
        state.hosts = vec![
            json!({"hostid": "10084", "host": "Zabbix server", "name": "Zabbix server", "status": "0"}),
            json!({"hostid": "10085", "host": "web-01", "name": "Web 01", "status": "0"}),
        ];
        state.groups = vec![
            json!({"groupid": "2", "name": "Linux servers"}),
            json!({"groupid": "4", "name": "Zabbix servers"}),
        ];
        Self {
            state: Arc::new(Mutex::new(state)),
            failures: Arc::new(Mutex::new(FailureInjector::new())),
        }
    }

    // === Public API for test configuration ===

    /// Add or replace an account
    pub fn add_user(&self, user: &str, password: &str) {
        let mut state = self.state.lock().unwrap();
        state.users.insert(user.to_string(), password.to_string());
    }

    /// Hand out `token` on the next successful login
    pub fn queue_token(&self, token: &str) {
        let mut state = self.state.lock().unwrap();
        state.queued_tokens.push_back(token.to_string());
    }

    /// Answer `method` with `result` (after the auth check)
    pub fn respond_with(&self, method: &str, result: Value) {
        let mut state = self.state.lock().unwrap();
        state.canned.insert(method.to_string(), result);
    }

    /// Add a host object to the inventory
    pub fn add_host(&self, host: Value) {
        let mut state = self.state.lock().unwrap();
        state.hosts.push(host);
    }

    /// Inject a failure for a method
    pub fn inject_failure(&self, method: &str, config: FailureConfig) {
        self.failures.lock().unwrap().inject(method, config);
    }

    /// Clear all injected failures
    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
    }

    // === Inspection ===

    /// Decoded requests received so far
    pub fn requests(&self) -> Vec<RpcRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Most recent decoded request
    pub fn last_request(&self) -> Option<RpcRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    /// Bodies exactly as received
    pub fn raw_bodies(&self) -> Vec<String> {
        self.state.lock().unwrap().raw_bodies.clone()
    }

    /// Endpoints the requests were posted to
    pub fn endpoints(&self) -> Vec<String> {
        self.state.lock().unwrap().endpoints.clone()
    }

    /// Returns true if `token` is a live session
    pub fn is_session_active(&self, token: &str) -> bool {
        self.state.lock().unwrap().sessions.contains_key(token)
    }

    pub fn active_sessions(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    // === Request handling ===

    /// Handle one POST body and produce the response body
    pub fn handle(&self, endpoint: &str, body: &[u8]) -> Result<Vec<u8>, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.endpoints.push(endpoint.to_string());
        state
            .raw_bodies
            .push(String::from_utf8_lossy(body).into_owned());

        let request: RpcRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(_) => {
                let parse_error = RemoteError::new(
                    -32700,
                    "Invalid JSON. An error occurred on the server while parsing the JSON text.",
                )
                .with_message("Parse error.");
                let response = RpcResponse {
                    jsonrpc: Some(JSONRPC_VERSION.to_string()),
                    result: None,
                    error: Some(parse_error),
                    id: Some(Value::Null),
                };
                return Ok(encode(&response));
            }
        };
        state.requests.push(request.clone());

        if let Some(mode) = self.failures.lock().unwrap().check(&request.method) {
            return match mode {
                FailureMode::Remote(error) => Ok(encode(&RpcResponse::failure(request.id, error))),
                FailureMode::ConnectionRefused => Err(TransportError::connect(
                    endpoint,
                    "connection refused or target unavailable",
                )),
                FailureMode::ReadError => Err(TransportError::Read {
                    endpoint: endpoint.to_string(),
                    source: io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer"),
                }),
                FailureMode::RawBody(raw) => Ok(raw.into_bytes()),
            };
        }

        let response = match dispatch(&mut state, &request) {
            Ok(result) => RpcResponse::success(request.id, result),
            Err(error) => RpcResponse::failure(request.id, error),
        };
        Ok(encode(&response))
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(response: &RpcResponse) -> Vec<u8> {
    serde_json::to_vec(response).unwrap_or_default()
}

fn invalid_params(data: impl Into<String>) -> RemoteError {
    RemoteError::new(-32602, data).with_message("Invalid params.")
}

fn dispatch(state: &mut MockState, request: &RpcRequest) -> Result<Value, RemoteError> {
    match request.method.as_str() {
        "apiinfo.version" => {
            if request.is_authenticated() {
                return Err(invalid_params(
                    "The \"apiinfo.version\" method must be called without the \"auth\" parameter.",
                ));
            }
            Ok(json!(MOCK_API_VERSION))
        }
        "user.login" => login(state, &request.params),
        // Ends the named session if there is one; a bare logout is accepted.
        "user.logout" => {
            if request.is_authenticated() {
                authorize(state, &request.auth)?;
                state.sessions.remove(&request.auth);
            }
            Ok(json!(true))
        }
        method => {
            authorize(state, &request.auth)?;
            if let Some(result) = state.canned.get(method) {
                return Ok(result.clone());
            }
            match method {
                "host.get" => Ok(host_get(state, &request.params)),
                "host.create" => host_create(state, &request.params),
                "host.delete" => host_delete(state, &request.params),
                "hostgroup.get" => Ok(Value::Array(state.groups.clone())),
                other => Err(RemoteError::new(-32601, format!("Incorrect method \"{}\".", other))
                    .with_message("Method not found.")),
            }
        }
    }
}

fn authorize(state: &MockState, auth: &str) -> Result<(), RemoteError> {
    if auth.is_empty() {
        return Err(invalid_params("Not authorised."));
    }
    if !state.sessions.contains_key(auth) {
        return Err(invalid_params("Session terminated, re-login, please."));
    }
    Ok(())
}

fn login(state: &mut MockState, params: &NormalizedParams) -> Result<Value, RemoteError> {
    let user = params
        .get("user")
        .or_else(|| params.get("username"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let password = params.get("password").and_then(Value::as_str);

    let valid = password.is_some() && state.users.get(user).map(String::as_str) == password;
    if !valid {
        return Err(invalid_params(
            "Incorrect user name or password or account is temporarily blocked.",
        ));
    }

    let token = match state.queued_tokens.pop_front() {
        Some(token) => token,
        None => {
            state.token_counter += 1;
            format!("{:032x}", state.token_counter)
        }
    };
    state.sessions.insert(token.clone(), user.to_string());

    if params.get("userData").and_then(Value::as_bool) == Some(true) {
        Ok(json!({"userid": "1", "username": user, "sessionid": token}))
    } else {
        Ok(Value::String(token))
    }
}

fn id_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::String(id) => Some(vec![id.clone()]),
        Value::Array(ids) => Some(
            ids.iter()
                .map(|id| id.as_str().map(String::from).unwrap_or_else(|| id.to_string()))
                .collect(),
        ),
        _ => None,
    }
}

fn host_get(state: &MockState, params: &NormalizedParams) -> Value {
    let wanted = id_list(params.get("hostids"));
    let limit = params
        .get("limit")
        .and_then(Value::as_u64)
        .map(|l| l as usize)
        .unwrap_or(usize::MAX);

    let hosts: Vec<Value> = state
        .hosts
        .iter()
        .filter(|host| match (&wanted, host.get("hostid").and_then(Value::as_str)) {
            (Some(ids), Some(hostid)) => ids.iter().any(|id| id == hostid),
            (Some(_), None) => false,
            (None, _) => true,
        })
        .take(limit)
        .cloned()
        .collect();
    Value::Array(hosts)
}

fn host_create(state: &mut MockState, params: &NormalizedParams) -> Result<Value, RemoteError> {
    let name = params
        .get("host")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid_params("Invalid parameter \"/\": the parameter \"host\" is missing."))?
        .to_string();
    if state.hosts.iter().any(|h| h.get("host").and_then(Value::as_str) == Some(name.as_str())) {
        return Err(invalid_params(format!("Host with the same name \"{}\" already exists.", name)));
    }

    let hostid = state.next_hostid.to_string();
    state.next_hostid += 1;
    state
        .hosts
        .push(json!({"hostid": hostid, "host": name, "name": name, "status": "0"}));
    Ok(json!({"hostids": [hostid]}))
}

fn host_delete(state: &mut MockState, params: &NormalizedParams) -> Result<Value, RemoteError> {
    let ids: Vec<String> = match params {
        NormalizedParams::Positional(items) => items
            .iter()
            .map(|id| id.as_str().map(String::from).unwrap_or_else(|| id.to_string()))
            .collect(),
        NormalizedParams::Keyed(_) => {
            return Err(invalid_params("Invalid parameter \"/\": an array is expected."))
        }
    };

    for id in &ids {
        let known = state
            .hosts
            .iter()
            .any(|h| h.get("hostid").and_then(Value::as_str) == Some(id.as_str()));
        if !known {
            return Err(invalid_params(
                "No permissions to referred object or it does not exist!",
            ));
        }
    }
    state.hosts.retain(|h| {
        h.get("hostid")
            .and_then(Value::as_str)
            .map_or(true, |hostid| !ids.iter().any(|id| id == hostid))
    });
    Ok(json!({ "hostids": ids }))
}
