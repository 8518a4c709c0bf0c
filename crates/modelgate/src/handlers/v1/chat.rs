//! Chat completion handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::gateway::GatewayError;
use crate::llm::Message;
use crate::response;
use crate::server::AppState;

const INTERNAL_ERROR_MESSAGE: &str = "Failed to process chat request";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    messages: Option<Vec<Message>>,
    /// `None` when absent, `Some(None)` when explicitly null.
    #[serde(default, deserialize_with = "present")]
    model: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/chat
///
/// Request body: `{"messages": [...], "model": "..."}`; an absent `model`
/// selects the default, an explicit `null` is rejected as unknown.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ChatBody = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            error!(error = %e, "Failed to parse chat request");
            return response::internal_error(INTERNAL_ERROR_MESSAGE).into_response();
        }
    };

    let messages = request.messages.unwrap_or_default();
    let model = match request.model {
        None => state.default_model.clone(),
        Some(model) => model.unwrap_or_default(),
    };

    // Dropping the handler future (client disconnect) cancels the upstream call.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match state
        .gateway
        .complete_with_cancel(&model, &messages, &cancel)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(GatewayError::Validation(e)) => {
            info!(model = %model, error = ?e, "Rejected chat request");
            response::bad_request(e.to_string()).into_response()
        }
        Err(GatewayError::Cancelled) => {
            response::internal_error(INTERNAL_ERROR_MESSAGE).into_response()
        }
    }
}
