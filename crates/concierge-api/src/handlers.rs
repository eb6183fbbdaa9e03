//! Route handler functions for all API endpoints.
//!
//! The message endpoint answers HTTP 200 for both relay outcomes; the
//! `{ok, reply|errorMessage}` envelope carries success or failure. Raw
//! failure detail goes to the log only; the envelope always carries the
//! short configured line.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use concierge_core::config::{TemplateConfig, WidgetConfig};
use concierge_core::types::{RelayReply, RelayRequest, TranscriptAck, TranscriptRequest};
use concierge_session::relay::{MessageRelay, RelayError, TranscriptSink};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub relay_configured: bool,
}

/// Bootstrap payload consumed by the embedding page: widget chrome plus
/// message templates, opaque to this layer.
#[derive(Debug, Serialize)]
pub struct WidgetBootstrap {
    pub widget: WidgetConfig,
    pub templates: TemplateConfig,
}

// =============================================================================
// Handler functions
// =============================================================================

/// GET /health - liveness and relay configuration state.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        relay_configured: state.relay.is_configured(),
    })
}

/// GET /widget - widget chrome and templates for the embedding page.
pub async fn widget(State(state): State<AppState>) -> Json<WidgetBootstrap> {
    Json(WidgetBootstrap {
        widget: state.config.widget.clone(),
        templates: state.config.templates.clone(),
    })
}

/// POST /api/message - relay one user message.
pub async fn message(
    State(state): State<AppState>,
    Json(request): Json<RelayRequest>,
) -> Result<Json<RelayReply>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Field 'message' must not be empty".to_string(),
        ));
    }

    let outcome = state
        .relay
        .relay(
            &request.message,
            &request.display_name,
            request.live_agent_mode,
        )
        .await;

    let reply = match outcome {
        Ok(text) => RelayReply::success(text),
        Err(e) => {
            tracing::warn!(error = %e, name = %request.display_name, "Relay failed");
            let line = match e {
                RelayError::NotConfigured => &state.config.templates.not_configured_error,
                RelayError::Transport(_) | RelayError::Upstream(_) => {
                    &state.config.templates.relay_error
                }
            };
            RelayReply::failure(line.clone())
        }
    };

    Ok(Json(reply))
}

/// POST /api/transcript - accept a session's full transcript.
pub async fn transcript(
    State(state): State<AppState>,
    Json(request): Json<TranscriptRequest>,
) -> Result<Json<TranscriptAck>, ApiError> {
    let ack = state
        .transcripts
        .deliver(&request.display_name, &request.messages)
        .await?;
    Ok(Json(ack))
}
