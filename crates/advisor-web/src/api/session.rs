use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
}

/// Issue a fresh session id with blank flags. Each browser tab requests one
/// on load and sends it with every call.
pub async fn create_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let id = Uuid::new_v4().to_string();
    state.sessions.lock().await.insert(id.clone());

    info!("Created session {}", id);
    Json(SessionResponse { id })
}
