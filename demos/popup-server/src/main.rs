//! Demo popup server for popup-requester.
//!
//! Stands in for the real popup service during development: each popup POSTed
//! by a client is held open until an operator completes or cancels it in a
//! small web UI, or until the requested timeout elapses.
//!
//! ## Usage
//!
//! ```bash
//! # Start the server
//! POPUP_AUTH_TOKEN=demo-token cargo run -p popup-server
//!
//! # Point the client at it
//! export HOST=http://localhost:3000
//! export POPUP_AUTH_TOKEN=demo-token
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /popup` - Show a popup; the response is the final result
//! - `POST /popup/{id}/complete` - Complete a pending popup (demo UI)
//! - `POST /popup/{id}/cancel` - Cancel a pending popup (demo UI)
//! - `GET /` - Web UI listing pending popups

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use popup_common::PopupRequest;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
    time::Duration,
};
use tokio::sync::oneshot;
use tracing::{info, warn};

/// A popup waiting for an operator decision.
struct PendingPopup {
    title: Option<String>,
    element_count: usize,
    created_at: i64,
    expires_at: i64,
    /// Resolves the held request; taken when the operator decides.
    decision: Option<oneshot::Sender<Value>>,
}

/// Application state.
struct AppState {
    pending: RwLock<HashMap<String, PendingPopup>>,
    /// Bearer token required on `POST /popup`, when configured.
    auth_token: Option<String>,
}

type SharedState = Arc<AppState>;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let auth_token = std::env::var("POPUP_AUTH_TOKEN").ok().filter(|t| !t.is_empty());
    if auth_token.is_none() {
        warn!("POPUP_AUTH_TOKEN not set; accepting unauthenticated requests");
    }

    let state = Arc::new(AppState {
        pending: RwLock::new(HashMap::new()),
        auth_token,
    });

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/popup", post(show_popup))
        .route("/popup/{id}/complete", post(complete_popup))
        .route("/popup/{id}/cancel", post(cancel_popup))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Popup demo server listening on http://0.0.0.0:3000");
    info!("Configure the client with: HOST=http://localhost:3000");

    axum::serve(listener, app).await.unwrap();
}

/// Show a popup: hold the request open until an operator decides or the
/// requested timeout elapses.
async fn show_popup(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<PopupRequest>,
) -> impl IntoResponse {
    if let Some(expected) = &state.auth_token {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {}", expected))
            .unwrap_or(false);

        if !authorized {
            warn!("Rejected popup request with missing or wrong bearer token");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"status": "error", "message": "Invalid or missing bearer token"})),
            );
        }
    }

    let id = generate_popup_id();
    let now = chrono::Utc::now().timestamp();
    let timeout_ms = request.timeout_ms;

    let title = request.definition.get("title").and_then(Value::as_str);
    let element_count = request
        .definition
        .get("elements")
        .and_then(Value::as_array)
        .map(|e| e.len())
        .unwrap_or(0);

    info!(
        popup_id = %id,
        title = ?title,
        element_count,
        timeout_ms,
        "New popup request"
    );

    let (tx, rx) = oneshot::channel();

    {
        let mut pending = state.pending.write().unwrap();
        pending.insert(
            id.clone(),
            PendingPopup {
                title: title.map(String::from),
                element_count,
                created_at: now,
                expires_at: now + (timeout_ms / 1000) as i64,
                decision: Some(tx),
            },
        );
    }

    let result = match tokio::time::timeout(Duration::from_millis(timeout_ms), rx).await {
        Ok(Ok(result)) => result,
        // Timed out, or the sender was dropped without a decision.
        _ => {
            info!(popup_id = %id, "Popup timed out");
            json!({
                "status": "timeout",
                "message": format!("Popup timed out after {} ms", timeout_ms)
            })
        }
    };

    state.pending.write().unwrap().remove(&id);

    (StatusCode::OK, Json(result))
}

/// Complete a pending popup (demo UI action).
async fn complete_popup(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    resolve(
        &state,
        &id,
        json!({"status": "completed", "values": {}, "button": "ok"}),
    )
}

/// Cancel a pending popup (demo UI action).
async fn cancel_popup(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    resolve(&state, &id, json!({"status": "cancelled"}))
}

/// Resolve a held popup request with the given result.
fn resolve(state: &AppState, id: &str, result: Value) -> axum::response::Response {
    let mut pending = state.pending.write().unwrap();

    match pending.get_mut(id).and_then(|p| p.decision.take()) {
        Some(tx) => {
            let status = result["status"].clone();
            if tx.send(result).is_err() {
                // Requester already gave up (transport deadline passed).
                warn!(popup_id = %id, "Decision arrived after the requester disconnected");
            } else {
                info!(popup_id = %id, status = %status, "Popup resolved");
            }
            pending.remove(id);
            (StatusCode::OK, Json(json!({"resolved": id}))).into_response()
        }
        None => {
            warn!(popup_id = %id, "Popup not found or already decided");
            (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Popup not found or already decided"})),
            )
                .into_response()
        }
    }
}

/// Generate a unique popup ID.
fn generate_popup_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("pop-{:x}", timestamp)
}

/// Web UI listing pending popups.
async fn index_handler(State(state): State<SharedState>) -> Html<String> {
    let pending = state.pending.read().unwrap();
    let now = chrono::Utc::now().timestamp();

    let mut html = String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Popup Demo Server</title>
    <meta http-equiv="refresh" content="5">
    <style>
        body { font-family: system-ui, -apple-system, sans-serif; max-width: 900px; margin: 40px auto; padding: 0 20px; }
        h1 { color: #333; }
        .popup { border: 1px solid #f0ad4e; border-radius: 8px; padding: 16px; margin: 16px 0; background: #fcf8e3; }
        .title { font-weight: bold; }
        .meta { color: #666; font-size: 0.9em; margin: 8px 0; }
        .actions { margin-top: 12px; }
        button { padding: 8px 16px; border: none; border-radius: 4px; cursor: pointer; font-size: 14px; margin-right: 8px; }
        .complete-btn { background: #5cb85c; color: white; }
        .complete-btn:hover { background: #449d44; }
        .cancel-btn { background: #d9534f; color: white; }
        .cancel-btn:hover { background: #c9302c; }
        .no-popups { color: #666; font-style: italic; padding: 40px; text-align: center; }
        .header { display: flex; justify-content: space-between; align-items: center; }
        .refresh { color: #666; font-size: 0.9em; }
    </style>
</head>
<body>
    <div class="header">
        <h1>Popup Demo Server</h1>
        <span class="refresh">Auto-refreshes every 5s</span>
    </div>
"#,
    );

    let mut popups: Vec<_> = pending.iter().collect();
    popups.sort_by(|a, b| b.1.created_at.cmp(&a.1.created_at));

    if popups.is_empty() {
        html.push_str(
            r#"<div class="no-popups">No pending popups. Send one with popup-cli to see it here.</div>"#,
        );
    } else {
        html.push_str("<h2>Pending Popups</h2>");
        for (id, popup) in &popups {
            let remaining = popup.expires_at - now;

            html.push_str(&format!(
                r#"<div class="popup">
                    <div class="title">{}</div>
                    <div class="meta">
                        <strong>ID:</strong> {} |
                        <strong>Elements:</strong> {} |
                        <strong>Expires:</strong> {}s
                    </div>
                    <div class="actions">
                        <button class="complete-btn" onclick="decide('{}', 'complete')">&#10003; Complete</button>
                        <button class="cancel-btn" onclick="decide('{}', 'cancel')">&#10007; Cancel</button>
                    </div>
                </div>"#,
                popup.title.as_deref().unwrap_or("(untitled)"),
                id,
                popup.element_count,
                remaining.max(0),
                id,
                id
            ));
        }
    }

    html.push_str(
        r#"
    <script>
        async function decide(id, action) {
            await fetch(`/popup/${id}/${action}`, { method: 'POST' });
            location.reload();
        }
    </script>
</body>
</html>"#,
    );

    Html(html)
}
