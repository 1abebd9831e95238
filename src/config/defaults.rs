//! Built-in defaults (layer 1)

use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Echo raw requests/responses to stdout (default: false)
    pub print_communication: bool,

    /// Accept responses with neither result nor error as `null` (default: false)
    pub allow_missing_result: bool,
}

impl BuiltinDefaults {
    /// Convert to the layered config shape for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "api": {
                "print_communication": self.print_communication,
                "allow_missing_result": self.allow_missing_result,
            },
            "default_params": {}
        })
    }
}
