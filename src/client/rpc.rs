//! API Client
//!
//! Owns the endpoint, default parameters and session token, and runs every
//! call through one pipeline: normalize, build, send, process.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::{debug, info, trace, warn};
use zabbix_protocol::{
    normalize, rekey, Params, RpcRequest, RpcResponse, LOGIN_METHOD, LOGOUT_METHOD,
};

use super::error::{ApiClientError, ApiResult};
use super::session::{token_from_login_result, Session};
use super::transport::{HttpTransport, Transport};
use crate::api;
use crate::config::ClientConfig;

/// Zabbix API client
///
/// Not shareable across threads without a `Mutex`: login and logout mutate
/// the session in place.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    api_url: String,
    default_params: Map<String, Value>,
    session: Session,
    print_communication: bool,
    allow_missing_result: bool,
    last_request: Option<String>,
    last_response: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_url", &self.api_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `api_url` over HTTP
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_transport(api_url, Arc::new(HttpTransport::default()))
    }

    /// Create a client with a custom transport
    pub fn with_transport(api_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            api_url: api_url.into(),
            default_params: Map::new(),
            session: Session::new(),
            print_communication: false,
            allow_missing_result: false,
            last_request: None,
            last_response: None,
        }
    }

    /// Create an unauthenticated client from resolved settings
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::from_config_with_transport(config, Arc::new(HttpTransport::new(config.http_config())))
    }

    /// Create an unauthenticated client from resolved settings and a custom transport
    pub fn from_config_with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let mut client = Self::with_transport(config.api_url.clone(), transport);
        client.default_params = config.default_params.clone();
        client.print_communication = config.print_communication;
        client.allow_missing_result = config.allow_missing_result;
        client
    }

    /// Create a client and log in when credentials are configured
    pub fn connect(config: &ClientConfig) -> ApiResult<Self> {
        Self::connect_with_transport(config, Arc::new(HttpTransport::new(config.http_config())))
    }

    /// [`connect`](Self::connect) over a custom transport
    pub fn connect_with_transport(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> ApiResult<Self> {
        let mut client = Self::from_config_with_transport(config, transport);
        if let Some((user, password)) = config.credentials() {
            client.login_with_credentials(user, password)?;
        }
        Ok(client)
    }

    // === Configuration ===

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Replace the endpoint for all following calls
    pub fn set_api_url(&mut self, api_url: impl Into<String>) -> &mut Self {
        self.api_url = api_url.into();
        self
    }

    pub fn default_params(&self) -> &Map<String, Value> {
        &self.default_params
    }

    /// Replace the default parameters; anything but a JSON object is rejected
    pub fn set_default_params(&mut self, default_params: Value) -> ApiResult<&mut Self> {
        match default_params {
            Value::Object(map) => Ok(self.set_default_params_map(map)),
            other => Err(ApiClientError::Configuration(format!(
                "default params must be an object, got {}",
                other
            ))),
        }
    }

    pub fn set_default_params_map(&mut self, default_params: Map<String, Value>) -> &mut Self {
        self.default_params = default_params;
        self
    }

    /// Echo every request and response to stdout
    pub fn print_communication(&mut self, enabled: bool) -> &mut Self {
        self.print_communication = enabled;
        self
    }

    /// Accept a response with neither result nor error as `null`
    pub fn allow_missing_result(&mut self, allowed: bool) -> &mut Self {
        self.allow_missing_result = allowed;
        self
    }

    // === Session ===

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Current auth token, if logged in
    pub fn auth_token(&self) -> Option<&str> {
        self.session.token()
    }

    /// Log in and keep the returned token.
    ///
    /// Sent without auth even when already logged in; a successful re-login
    /// replaces the token. On failure the session is left as it was.
    pub fn login(&mut self, params: impl Into<Params>) -> ApiResult<Value> {
        let request = self.build_request(LOGIN_METHOD, params.into(), false);
        let result = self.send(&request)?;

        let token = token_from_login_result(&result).ok_or_else(|| {
            ApiClientError::MalformedResponse {
                method: LOGIN_METHOD.to_string(),
                reason: format!("login result carries no token: {}", result),
            }
        })?;
        self.session.authenticate(token);
        info!(api_url = %self.api_url, "logged in");
        Ok(result)
    }

    /// Log in with a user name and password
    pub fn login_with_credentials(&mut self, user: &str, password: &str) -> ApiResult<Value> {
        self.login(json!({ "user": user, "password": password }))
    }

    /// Drop the token, then send `user.logout` without auth.
    ///
    /// The session is cleared even when the remote call fails.
    pub fn logout(&mut self, params: impl Into<Params>) -> ApiResult<Value> {
        if self.session.clear() {
            info!(api_url = %self.api_url, "logged out");
        }
        self.call_with_auth(LOGOUT_METHOD, params, "", false)
    }

    // === Calls ===

    /// Call a remote method with auth
    pub fn call(
        &mut self,
        method: &str,
        params: impl Into<Params>,
        rekey_property: &str,
    ) -> ApiResult<Value> {
        self.call_with_auth(method, params, rekey_property, true)
    }

    /// Call a remote method, choosing whether the token is sent.
    ///
    /// A non-empty `rekey_property` turns a list result into a map keyed by
    /// that property of each element.
    pub fn call_with_auth(
        &mut self,
        method: &str,
        params: impl Into<Params>,
        rekey_property: &str,
        include_auth: bool,
    ) -> ApiResult<Value> {
        let request = self.build_request(method, params.into(), include_auth);
        let result = self.send(&request)?;
        rekey(result, rekey_property).map_err(|err| ApiClientError::from_protocol(err, method))
    }

    /// Call a remote method through [`ApiClient::invoke`] and deserialize the result
    pub fn call_typed<T: DeserializeOwned>(
        &mut self,
        method: &str,
        params: impl Into<Params>,
        rekey_property: &str,
    ) -> ApiResult<T> {
        let result = self.invoke(method, params, rekey_property)?;
        Ok(serde_json::from_value(result)?)
    }

    /// Call any method by name, taking auth inclusion from the method table
    pub fn invoke(
        &mut self,
        method: &str,
        params: impl Into<Params>,
        rekey_property: &str,
    ) -> ApiResult<Value> {
        if !api::is_valid_method_name(method) {
            return Err(ApiClientError::InvalidMethod(method.to_string()));
        }
        match method {
            LOGIN_METHOD => self.login(params),
            LOGOUT_METHOD => self.logout(params),
            _ => self.call_with_auth(method, params, rekey_property, api::requires_auth(method)),
        }
    }

    /// Build the envelope a call would send, without sending it
    pub fn build_request(&self, method: &str, params: Params, include_auth: bool) -> RpcRequest {
        let params = normalize(params, &self.default_params);
        RpcRequest::new(method, params, self.session.auth_for(include_auth))
    }

    // === Diagnostics ===

    /// Last serialized request body
    pub fn last_request(&self) -> Option<&str> {
        self.last_request.as_deref()
    }

    /// Last raw response body
    pub fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }

    fn send(&mut self, request: &RpcRequest) -> ApiResult<Value> {
        let method = request.method.as_str();
        if self.api_url.is_empty() {
            return Err(ApiClientError::Configuration(format!(
                "no API url configured for {}",
                method
            )));
        }

        let body = request.to_json()?;
        debug!(
            method,
            id = %request.id,
            authenticated = request.is_authenticated(),
            "sending request"
        );
        trace!(%body, "request body");
        if self.print_communication {
            println!("API request: {}", body);
        }
        self.last_request = Some(body.clone());
        self.last_response = None;

        let raw = self
            .transport
            .post(&self.api_url, body.as_bytes())
            .map_err(|err| ApiClientError::from_transport(err, method))?;

        let text = String::from_utf8_lossy(&raw).into_owned();
        trace!(body = %text, "response body");
        if self.print_communication {
            println!("{}", text);
        }
        self.last_response = Some(text);

        let processed = RpcResponse::parse(&raw)
            .and_then(|response| response.into_result(self.allow_missing_result));
        processed.map_err(|err| {
            let err = ApiClientError::from_protocol(err, method);
            if let Some(code) = err.remote_code() {
                warn!(method, code, "remote API error");
            }
            err
        })
    }
}
