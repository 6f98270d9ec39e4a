use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use advisor_core::{briefing, expand_paragraphs, PracticeSnapshot};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BriefingResponse {
    pub briefing: String,
    /// false when the cached text was returned without re-composing
    pub fresh: bool,
}

/// Return the session's briefing. It is composed once per session; until an
/// explicit refresh, later fetches return the cached text.
pub async fn get_briefing(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<BriefingResponse>, StatusCode> {
    {
        let mut sessions = state.sessions.lock().await;
        let session = sessions.get_mut(&session_id).ok_or(StatusCode::NOT_FOUND)?;

        if let Some(text) = session.briefing() {
            return Ok(Json(BriefingResponse {
                briefing: expand_paragraphs(text),
                fresh: false,
            }));
        }
    }

    // Compose outside the lock, then record. If two tabs race here the
    // later write wins, which only re-caches an identical template.
    let snapshot = PracticeSnapshot::gather(state.book.as_ref()).await;
    let text = briefing::compose_today(&snapshot);

    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(&session_id).ok_or(StatusCode::NOT_FOUND)?;
    session.record_briefing(text.clone());

    Ok(Json(BriefingResponse {
        briefing: expand_paragraphs(&text),
        fresh: true,
    }))
}

/// Explicit refresh: clear the flag so the next fetch re-composes. The page
/// re-renders itself after calling this.
pub async fn refresh_briefing(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(&session_id).ok_or(StatusCode::NOT_FOUND)?;

    session.reset_briefing();
    info!("Briefing reset for session {}", session_id);

    Ok(Json(serde_json::json!({
        "status": "refreshed"
    })))
}
