//! Session/auth state
//!
//! Holds the token returned by `user.login`. An empty token means the client
//! is unauthenticated.

use std::fmt;

use serde_json::Value;

/// Authentication state of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Unauthenticated => write!(f, "unauthenticated"),
            SessionState::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Session token holder
#[derive(Clone, Default)]
pub struct Session {
    token: String,
}

impl Session {
    /// Create an unauthenticated session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        if self.token.is_empty() {
            SessionState::Unauthenticated
        } else {
            SessionState::Authenticated
        }
    }

    /// Returns true if a token is held
    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// The token, if any
    pub fn token(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(&self.token)
        }
    }

    /// Token to place in an outgoing envelope
    pub fn auth_for(&self, include_auth: bool) -> Option<&str> {
        if include_auth {
            self.token()
        } else {
            None
        }
    }

    /// Store a token, replacing any previous one
    pub fn authenticate(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    /// Drop the token. Returns true if one was held.
    pub fn clear(&mut self) -> bool {
        let was_authenticated = self.is_authenticated();
        self.token.clear();
        was_authenticated
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .field("token", &self.token().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Extract the auth token from a `user.login` result.
///
/// Plain logins return the token as a string. With `userData: true` the
/// server returns the user object and the token is its `sessionid`.
pub fn token_from_login_result(result: &Value) -> Option<String> {
    let token = match result {
        Value::String(token) => token.as_str(),
        Value::Object(user) => user.get("sessionid")?.as_str()?,
        _ => return None,
    };
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
