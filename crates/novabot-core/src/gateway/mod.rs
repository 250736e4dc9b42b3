//! HTTP gateway: the assistant endpoint and the lead-capture relays.
//!
//! Routes:
//! - `POST /api/chat`    — `{ "message": string }` in, `{ "message": string }` out
//! - `POST /api/contact` — contact form, relayed to the spreadsheet webhook
//! - `POST /api/audit`   — website-audit form, relayed likewise
//! - `GET  /api/health`  — liveness probe
//!
//! Request and response bodies are typed structs; malformed JSON is
//! rejected at the boundary with a client error instead of being probed
//! at runtime. Handler errors map to structured JSON bodies; nothing in
//! here panics on bad input.

pub mod forms;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::engine::{Engine, ReplyError};
use forms::{AuditForm, ContactForm, FormRelay, RelayError};

/// Application state shared across handlers.
///
/// The engine is read-only, so plain `Arc` sharing is enough; no lock.
pub struct AppState {
    pub engine: Engine,
    pub relay: FormRelay,
}

type SharedState = Arc<AppState>;

// ── Wire Types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Response shape shared by both form endpoints: `{success, result}` on
/// success, `{success, message}` on failure.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormResponse {
    fn ok(result: String) -> Self {
        Self {
            success: true,
            result: Some(result),
            message: None,
        }
    }

    fn fail(message: String) -> Self {
        Self {
            success: false,
            result: None,
            message: Some(message),
        }
    }
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the gateway router over shared state.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/contact", post(contact))
        .route("/api/audit", post(audit))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the gateway until shutdown (Ctrl+C).
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        engine: Engine::new(),
        relay: FormRelay::new(reqwest::Client::new(), &config.forms),
    });

    if !state.relay.contact_configured() || !state.relay.audit_configured() {
        tracing::warn!("One or more form webhooks unconfigured; those endpoints will answer 503");
    }

    let app = router(state);
    let addr = config.gateway.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

// ── Handlers ────────────────────────────────────────────────────────

async fn chat(
    State(state): State<SharedState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorBody>)> {
    match state.engine.reply(&req.message) {
        Ok(reply) => Ok(Json(ChatResponse {
            message: reply.to_string(),
        })),
        Err(ReplyError::EmptyInput) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Invalid message".into(),
            }),
        )),
    }
}

async fn contact(
    State(state): State<SharedState>,
    Json(form): Json<ContactForm>,
) -> (StatusCode, Json<FormResponse>) {
    match state.relay.relay_contact(&form).await {
        Ok(result) => (StatusCode::OK, Json(FormResponse::ok(result))),
        Err(e) => relay_failure("contact", e),
    }
}

async fn audit(
    State(state): State<SharedState>,
    Json(form): Json<AuditForm>,
) -> (StatusCode, Json<FormResponse>) {
    match state.relay.relay_audit(&form).await {
        Ok(result) => (StatusCode::OK, Json(FormResponse::ok(result))),
        Err(e) => relay_failure("audit", e),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn relay_failure(form: &str, e: RelayError) -> (StatusCode, Json<FormResponse>) {
    error!(form, "Form relay failed: {}", e);
    let status = match e {
        RelayError::NotConfigured { .. } => StatusCode::SERVICE_UNAVAILABLE,
        RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(FormResponse::fail(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormsConfig;

    fn state() -> SharedState {
        Arc::new(AppState {
            engine: Engine::new(),
            relay: FormRelay::new(reqwest::Client::new(), &FormsConfig::default()),
        })
    }

    #[tokio::test]
    async fn test_chat_returns_reply() {
        let res = chat(
            State(state()),
            Json(ChatRequest {
                message: "Do you offer AI chatbots?".into(),
            }),
        )
        .await
        .unwrap();
        assert!(res.0.message.starts_with("We specialize in AI-integrated websites!"));
    }

    #[tokio::test]
    async fn test_chat_off_topic_gets_fallback() {
        let res = chat(
            State(state()),
            Json(ChatRequest {
                message: "asdkjasdkj random gibberish".into(),
            }),
        )
        .await
        .unwrap();
        assert!(res.0.message.starts_with("Thanks for your question!"));
    }

    #[tokio::test]
    async fn test_chat_empty_message_is_400() {
        let err = chat(
            State(state()),
            Json(ChatRequest {
                message: "   ".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1 .0.error, "Invalid message");
    }

    #[tokio::test]
    async fn test_contact_unconfigured_is_503() {
        let (status, body) = contact(State(state()), Json(ContactForm::default())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body.0.success);
        assert!(body.0.message.is_some());
    }

    #[tokio::test]
    async fn test_audit_unconfigured_is_503() {
        let (status, body) = audit(State(state()), Json(AuditForm::default())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body.0.success);
    }

    #[test]
    fn test_form_response_serialization() {
        let ok = serde_json::to_value(FormResponse::ok("row 42".into())).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "result": "row 42"}));

        let fail = serde_json::to_value(FormResponse::fail("boom".into())).unwrap();
        assert_eq!(fail, serde_json::json!({"success": false, "message": "boom"}));
    }
}
