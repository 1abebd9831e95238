//! API method facade
//!
//! Named entry points for the remote methods, plus the table they are
//! generated from. A facade call is exactly a generic call with the method
//! name filled in.

mod methods;

use std::sync::OnceLock;

use regex_lite::Regex;

pub use methods::API_METHODS;

/// One remote method exposed by the facade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiMethod {
    /// Remote name, `resource.action`
    pub method: &'static str,
    /// Name of the generated `ApiClient` method
    pub facade: &'static str,
    /// Whether the call carries the session token
    pub requires_auth: bool,
}

impl ApiMethod {
    /// Resource part of the method name
    pub fn resource(&self) -> &'static str {
        self.method.split('.').next().unwrap_or(self.method)
    }

    /// Action part of the method name
    pub fn action(&self) -> &'static str {
        self.method.split_once('.').map_or("", |(_, action)| action)
    }
}

fn method_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z]+\.[A-Za-z]+$").expect("static pattern"))
}

/// Returns true if `method` has the `resource.action` shape
pub fn is_valid_method_name(method: &str) -> bool {
    method_name_pattern().is_match(method)
}

/// Look up a method in the facade table
pub fn find_method(method: &str) -> Option<&'static ApiMethod> {
    API_METHODS.iter().find(|m| m.method == method)
}

/// Look up a method by its facade name
pub fn find_facade(facade: &str) -> Option<&'static ApiMethod> {
    API_METHODS.iter().find(|m| m.facade == facade)
}

/// Whether a call to `method` carries the session token.
///
/// Methods outside the table are assumed to need it.
pub fn requires_auth(method: &str) -> bool {
    find_method(method).map_or(true, |m| m.requires_auth)
}

/// Facade name for a remote method: `host.massAdd` becomes `host_mass_add`
pub fn facade_name(method: &str) -> Option<String> {
    if !is_valid_method_name(method) {
        return None;
    }
    let (resource, action) = method.split_once('.')?;
    let mut name = String::with_capacity(method.len() + 4);
    name.push_str(resource);
    name.push('_');
    for ch in action.chars() {
        if ch.is_ascii_uppercase() {
            name.push('_');
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }
    Some(name)
}

/// Methods of one resource, in table order
pub fn methods_for_resource(resource: &str) -> Vec<&'static ApiMethod> {
    API_METHODS.iter().filter(|m| m.resource() == resource).collect()
}

/// Distinct resources, in table order
pub fn resources() -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for method in API_METHODS {
        if !seen.contains(&method.resource()) {
            seen.push(method.resource());
        }
    }
    seen
}
