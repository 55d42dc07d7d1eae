//! The blocking popup client.

use std::time::Duration;

use popup_common::{PopupRequest, PopupResult, DEFAULT_TIMEOUT_MS, POPUP_PATH};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::PopupConfig;
use crate::error::RequestError;

/// Extra time granted to the transport beyond the popup timeout, so the
/// server can itself time the popup out and still get its answer through
/// before the transport gives up.
const TRANSPORT_BUFFER: Duration = Duration::from_secs(5);

/// Deadline for the HTTP request serving a popup with the given timeout.
fn transport_deadline(timeout_ms: u64) -> Duration {
    Duration::from_millis(timeout_ms) + TRANSPORT_BUFFER
}

/// Client for the remote popup server.
///
/// Issues one blocking HTTP POST per [`show`](PopupClient::show) call and maps
/// every outcome to a result mapping with a `status` key. The caller's thread
/// blocks for up to `timeout_ms + 5s`; there is no retry and no cancellation
/// beyond the transport deadline. The client holds no shared mutable state, so
/// concurrent calls from multiple threads are independent.
pub struct PopupClient {
    config: PopupConfig,
    client: Client,
}

impl PopupClient {
    /// Create a new popup client.
    pub fn new(config: PopupConfig) -> Result<Self, RequestError> {
        let client = Client::builder()
            .build()
            .map_err(|e| RequestError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Show a popup and block until the server answers or the transport
    /// deadline passes.
    ///
    /// Never fails: every error is rendered as an `error`-status result with
    /// the failure's message. The definition is passed through verbatim.
    pub fn show(&self, definition: &Value, timeout_ms: u64) -> PopupResult {
        match self.dispatch(definition, timeout_ms, transport_deadline(timeout_ms)) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("popup request failed: {}", e);
                PopupResult::error(e)
            }
        }
    }

    /// [`show`](PopupClient::show) with the default 5-minute timeout.
    pub fn show_with_default_timeout(&self, definition: &Value) -> PopupResult {
        self.show(definition, DEFAULT_TIMEOUT_MS)
    }

    fn dispatch(
        &self,
        definition: &Value,
        timeout_ms: u64,
        deadline: Duration,
    ) -> Result<PopupResult, RequestError> {
        let token = self.config.token().ok_or(RequestError::MissingToken)?;

        let url = format!("{}{}", self.config.host, POPUP_PATH);
        let body = PopupRequest::new(definition.clone(), timeout_ms);

        log::debug!("posting popup request to {} (timeout {} ms)", url, timeout_ms);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .timeout(deadline)
            .json(&body)
            .send()
            .map_err(|e| RequestError::from_transport(e, &self.config.host))?;

        // The body of any response, success or not, is the result; the HTTP
        // status code is not inspected.
        let value: Value = response
            .json()
            .map_err(|e| RequestError::from_transport(e, &self.config.host))?;

        PopupResult::from_value(value)
            .ok_or_else(|| RequestError::Other("response body is not a JSON object".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(uri: &str) -> PopupClient {
        PopupClient::new(PopupConfig::new(uri).with_auth_token("test-token")).unwrap()
    }

    fn sample_definition() -> Value {
        json!({
            "title": "Confirmation",
            "elements": [{"type": "text", "content": "Are you sure?"}]
        })
    }

    #[test]
    fn test_transport_deadline() {
        assert_eq!(transport_deadline(300_000), Duration::from_secs(305));
        assert_eq!(
            transport_deadline(1_500),
            Duration::from_millis(1_500) + Duration::from_secs(5)
        );
        assert_eq!(transport_deadline(0), Duration::from_secs(5));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_response_passed_through_verbatim() {
        let server = MockServer::start().await;
        let response_body = json!({
            "status": "completed",
            "values": {"confirm": true},
            "button": "ok",
            "unknown_field": 42
        });

        Mock::given(method("POST"))
            .and(path("/popup"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_json(json!({
                "definition": sample_definition(),
                "timeout_ms": 30_000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body.clone()))
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            client_for(&uri).show(&sample_definition(), 30_000)
        })
        .await
        .unwrap();

        assert_eq!(result.into_value(), response_body);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_non_success_status_body_still_returned() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/popup"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "status": "error",
                "message": "popup server overloaded"
            })))
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            client_for(&uri).show(&sample_definition(), 10_000)
        })
        .await
        .unwrap();

        assert!(result.is_error());
        assert_eq!(result.message(), Some("popup server overloaded"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_malformed_body_becomes_error_result() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/popup"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            client_for(&uri).show(&sample_definition(), 10_000)
        })
        .await
        .unwrap();

        assert!(result.is_error());
        assert!(result.message().is_some());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_non_object_body_becomes_error_result() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/popup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a", "list"])))
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            client_for(&uri).show(&sample_definition(), 10_000)
        })
        .await
        .unwrap();

        assert!(result.is_error());
        assert_eq!(result.message(), Some("response body is not a JSON object"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_missing_token_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "completed"})))
            .expect(0)
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            let client = PopupClient::new(PopupConfig::new(&uri)).unwrap();
            client.show(&sample_definition(), 30_000)
        })
        .await
        .unwrap();

        assert!(result.is_error());
        assert_eq!(
            result.message(),
            Some("POPUP_AUTH_TOKEN environment variable not set")
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_token_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "completed"})))
            .expect(0)
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            let client = PopupClient::new(PopupConfig::new(&uri).with_auth_token("")).unwrap();
            client.show(&sample_definition(), 30_000)
        })
        .await
        .unwrap();

        assert_eq!(
            result.message(),
            Some("POPUP_AUTH_TOKEN environment variable not set")
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_transport_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/popup"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "completed"}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let uri = server.uri();
        let err = tokio::task::spawn_blocking(move || {
            client_for(&uri)
                .dispatch(&sample_definition(), 60_000, Duration::from_millis(200))
                .unwrap_err()
        })
        .await
        .unwrap();

        assert!(matches!(err, RequestError::TimedOut));
        assert_eq!(err.to_string(), "Request timed out");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_connection_refused() {
        // Bind a port, then drop the listener so connecting to it is refused.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let host = format!("http://127.0.0.1:{}", port);

        let expected = format!("Cannot connect to popup server at {}", host);
        let result = tokio::task::spawn_blocking(move || {
            client_for(&host).show(&sample_definition(), 5_000)
        })
        .await
        .unwrap();

        assert!(result.is_error());
        assert_eq!(result.message(), Some(expected.as_str()));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_invalid_request_target_never_panics() {
        // An empty host makes the request target relative and unusable; the
        // failure still comes back as an error result.
        let result = tokio::task::spawn_blocking(move || {
            client_for("").show(&sample_definition(), 5_000)
        })
        .await
        .unwrap();

        assert!(result.is_error());
        assert!(result.message().is_some());
    }
}
