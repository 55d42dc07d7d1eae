//! Client configuration.
//!
//! The popup server's location and the bearer credential come from two
//! process environment variables, `HOST` and `POPUP_AUTH_TOKEN`. Ambient
//! environment reads are confined to [`PopupConfig::from_env`] so the client
//! itself can be constructed and tested without touching the environment.

/// Configuration for the popup client.
#[derive(Debug, Clone)]
pub struct PopupConfig {
    /// Base URL of the popup server. Unvalidated: no scheme or format check.
    pub host: String,
    /// Bearer credential sent in the `Authorization` header. A missing or
    /// empty token turns every request into an immediate error result.
    pub auth_token: Option<String>,
}

impl PopupConfig {
    /// Create a configuration for the given host.
    pub fn new(host: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Set the bearer credential.
    pub fn with_auth_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    /// Create configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HOST`: base URL of the popup server
    /// - `POPUP_AUTH_TOKEN`: bearer credential
    ///
    /// Neither is required here. An absent token surfaces at request time as
    /// an error result without any network call; an absent host leaves the
    /// request target malformed, which fails naturally at the network layer.
    pub fn from_env() -> Self {
        let mut config = Self::new(&std::env::var("HOST").unwrap_or_default());

        if let Ok(token) = std::env::var("POPUP_AUTH_TOKEN") {
            config = config.with_auth_token(&token);
        }

        config
    }

    /// The bearer token, treating an empty string as absent.
    pub(crate) fn token(&self) -> Option<&str> {
        self.auth_token.as_deref().filter(|t| !t.is_empty())
    }
}
