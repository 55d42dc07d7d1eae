//! Popup result wrapper and status values.
//!
//! The server's response body is returned to callers verbatim, with no schema
//! enforcement: [`PopupResult`] wraps the raw JSON object and offers accessors
//! for the fields that are conventionally present. Locally-constructed results
//! (the error paths) always carry a `status` key.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known values of the `status` field.
///
/// `completed`, `cancelled`, and `timeout` are reported by the remote server;
/// `error` is either reported remotely or generated locally for transport
/// failures. A local transport timeout is an `error` (message
/// `"Request timed out"`), distinct from a server-reported `timeout`, so the
/// two remain distinguishable downstream. Unknown status strings are preserved
/// as [`PopupStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupStatus {
    Completed,
    Cancelled,
    Timeout,
    Error,
    Other(String),
}

impl PopupStatus {
    /// Parse a wire status string.
    pub fn parse(s: &str) -> Self {
        match s {
            "completed" => PopupStatus::Completed,
            "cancelled" => PopupStatus::Cancelled,
            "timeout" => PopupStatus::Timeout,
            "error" => PopupStatus::Error,
            other => PopupStatus::Other(other.to_string()),
        }
    }

    /// The wire string for this status.
    pub fn as_str(&self) -> &str {
        match self {
            PopupStatus::Completed => "completed",
            PopupStatus::Cancelled => "cancelled",
            PopupStatus::Timeout => "timeout",
            PopupStatus::Error => "error",
            PopupStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for PopupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A popup result: the response JSON object, verbatim.
///
/// Constructed fresh per call and handed to the caller; nothing is retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PopupResult(Map<String, Value>);

impl PopupResult {
    /// Build the `{"status": "error", "message": ...}` mapping used by every
    /// local failure path.
    pub fn error(message: impl fmt::Display) -> Self {
        let mut map = Map::new();
        map.insert("status".to_string(), Value::String("error".to_string()));
        map.insert(
            "message".to_string(),
            Value::String(message.to_string()),
        );
        PopupResult(map)
    }

    /// Wrap a response object verbatim. Returns `None` when the value is not a
    /// JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(PopupResult(map)),
            _ => None,
        }
    }

    /// The raw `status` string, if present.
    pub fn status_str(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// The parsed status, if present.
    pub fn status(&self) -> Option<PopupStatus> {
        self.status_str().map(PopupStatus::parse)
    }

    /// Whether the status is `error` (locally generated or server-reported).
    pub fn is_error(&self) -> bool {
        self.status_str() == Some("error")
    }

    /// The `message` string, conventionally present on `error` results.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// The submitted field values, conventionally present on `completed`.
    pub fn values(&self) -> Option<&Value> {
        self.0.get("values")
    }

    /// Any field of the underlying mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The underlying mapping.
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the wrapper, yielding the raw JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
