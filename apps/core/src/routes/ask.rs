use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{field, info, instrument, Instrument, Span};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct AskResponse {
    pub response: String,
    pub tool_called: String,
    pub demo_mode: bool,
}

/// POST /ask
///
/// Routing runs on its own task so that a panicking capability surfaces as
/// a 500 with a detail message instead of a dropped connection.
#[instrument(skip_all, fields(request_id = %Uuid::new_v4(), tool = field::Empty))]
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let task_state = Arc::clone(&state);
    let routed = tokio::spawn(
        async move { task_state.router.classify_and_respond(&request.message).await }
            .in_current_span(),
    )
    .await
    .map_err(|e| AppError::Internal(format!("message routing aborted: {}", e)))?;

    Span::current().record("tool", routed.classification.tool_name.as_str());
    info!(intent = %routed.classification.intent, "Message answered");

    Ok(Json(AskResponse {
        response: routed.response_text,
        tool_called: routed.classification.tool_name,
        demo_mode: state.router.config().demo_mode,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ask", post(ask))
}
