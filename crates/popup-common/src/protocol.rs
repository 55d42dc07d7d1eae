//! Wire protocol for the popup endpoint.
//!
//! One endpoint, one body shape: the requester POSTs
//! `{"definition": ..., "timeout_ms": ...}` to `{host}/popup` and the server's
//! JSON response is the final result. There is no versioning and no other
//! endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path of the popup endpoint, appended to the configured host.
pub const POPUP_PATH: &str = "/popup";

/// Default popup timeout: 5 minutes.
pub const DEFAULT_TIMEOUT_MS: u64 = 300_000;

/// Request body posted to the popup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupRequest {
    /// Popup structure definition, passed through verbatim.
    pub definition: Value,
    /// Timeout in milliseconds before the server auto-cancels the popup.
    pub timeout_ms: u64,
}

impl PopupRequest {
    /// Create a request body for a definition and timeout.
    pub fn new(definition: Value, timeout_ms: u64) -> Self {
        Self {
            definition,
            timeout_ms,
        }
    }
}
