//! Blocking client for a remote popup server.
//!
//! A popup request is one synchronous HTTP POST: the definition and timeout go
//! to `{host}/popup` with a bearer credential, and the server's JSON response
//! is the result, returned verbatim. Every failure (missing credential,
//! transport timeout, unreachable host, malformed body) comes back as an
//! `error`-status result mapping instead of an error type, so callers always
//! receive a mapping with a `status` key and never have to handle a panic or
//! propagated error.
//!
//! Two entry points:
//! - [`PopupClient`] with an explicit [`PopupConfig`]: construct once, test
//!   without touching the process environment.
//! - [`show_popup`]: reads the environment on every call, for tool-style
//!   callers that want the one-function contract.
//!
//! ## Environment Variables
//! - `POPUP_AUTH_TOKEN` (required): bearer token for authenticating with the
//!   popup server. If absent or empty the request is not sent at all.
//! - `HOST` (required): base URL of the popup server, used as-is.

pub mod client;
pub mod config;
pub mod error;

pub use client::PopupClient;
pub use config::PopupConfig;
pub use error::RequestError;
pub use popup_common::{Element, PopupDefinition, PopupResult, PopupStatus, DEFAULT_TIMEOUT_MS};

use serde_json::Value;

/// Show a popup using configuration read fresh from the process environment.
///
/// Reads `POPUP_AUTH_TOKEN` and `HOST`, issues a single blocking POST to
/// `{HOST}/popup`, and returns the server's JSON response verbatim. The
/// transport deadline is `timeout_ms` plus a 5-second buffer, giving the
/// server room to time the popup out itself and still respond. Exactly one
/// outbound request per call, or zero when the token is missing.
pub fn show_popup(definition: &Value, timeout_ms: u64) -> PopupResult {
    match PopupClient::new(PopupConfig::from_env()) {
        Ok(client) => client.show(definition, timeout_ms),
        Err(e) => PopupResult::error(e),
    }
}

/// [`show_popup`] with the default 5-minute timeout.
pub fn show_popup_with_default_timeout(definition: &Value) -> PopupResult {
    show_popup(definition, DEFAULT_TIMEOUT_MS)
}
