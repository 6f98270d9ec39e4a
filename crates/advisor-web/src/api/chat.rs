use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use advisor_core::{expand_paragraphs, QuickAction};

use crate::state::AppState;

/// Shown in place of a reply when the backend call fails. No retry happens
/// server-side; the user is nudged to try again.
const BACKEND_ERROR_REPLY: &str = "Something went wrong talking to the assistant.\n\n\
Please try again in a moment, for example by asking \"Show my day\".";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub session_id: String,
    pub action: QuickAction,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub error: bool,
}

/// Free-text chat: forward the user's text to the assistant as-is.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    ensure_session(&state, &request.session_id).await?;
    Ok(Json(ask_assistant(&state, &request.message).await))
}

/// Quick action: queue the button's action into the session's pending slot,
/// then dispatch it.
pub async fn quick_action(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    {
        let mut sessions = state.sessions.lock().await;
        let session = sessions
            .get_mut(&request.session_id)
            .ok_or(StatusCode::NOT_FOUND)?;
        session.queue_action(request.action);
    }

    dispatch_pending(&state, &request.session_id).await
}

/// The single dispatch point for the pending-action slot. Taking the action
/// clears the slot before the completion call goes out, so a failed call
/// never leaves a stale pending action behind.
async fn dispatch_pending(
    state: &Arc<AppState>,
    session_id: &str,
) -> Result<Json<ChatResponse>, StatusCode> {
    let action = {
        let mut sessions = state.sessions.lock().await;
        let session = sessions.get_mut(session_id).ok_or(StatusCode::NOT_FOUND)?;
        session.take_pending_action()
    };

    // Empty slot: another request for this session already handled it.
    let action = action.ok_or(StatusCode::CONFLICT)?;

    Ok(Json(ask_assistant(state, action.instruction()).await))
}

/// One call to the backend; failures become the generic on-page message.
async fn ask_assistant(state: &Arc<AppState>, instruction: &str) -> ChatResponse {
    match state.assistant.ask(instruction).await {
        Ok(text) => ChatResponse {
            reply: expand_paragraphs(&text),
            error: false,
        },
        Err(e) => {
            error!("Backend call failed: {:#}", e);
            ChatResponse {
                reply: BACKEND_ERROR_REPLY.to_string(),
                error: true,
            }
        }
    }
}

async fn ensure_session(state: &Arc<AppState>, session_id: &str) -> Result<(), StatusCode> {
    if state.sessions.lock().await.contains(session_id) {
        Ok(())
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
