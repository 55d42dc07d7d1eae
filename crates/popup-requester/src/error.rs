//! Error taxonomy for popup requests.

use thiserror::Error;

/// Failures a popup request can hit.
///
/// None of these reach callers of the public entry points: every variant is
/// rendered into an `error`-status result mapping, with the `Display` string
/// below as its `message`.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The bearer credential is absent or empty. No network call is made.
    #[error("POPUP_AUTH_TOKEN environment variable not set")]
    MissingToken,

    /// The transport gave up before the server answered.
    #[error("Request timed out")]
    TimedOut,

    /// The popup server could not be reached.
    #[error("Cannot connect to popup server at {host}")]
    Connect { host: String },

    /// Anything else: malformed response body, invalid request target,
    /// client build failure.
    #[error("{0}")]
    Other(String),
}

impl RequestError {
    /// Classify a transport error.
    ///
    /// Timeout is checked before connect: a connect timeout reports both, and
    /// that pair resolves to the timeout message.
    pub fn from_transport(err: reqwest::Error, host: &str) -> Self {
        if err.is_timeout() {
            RequestError::TimedOut
        } else if err.is_connect() {
            RequestError::Connect {
                host: host.to_string(),
            }
        } else {
            RequestError::Other(err.to_string())
        }
    }
}
