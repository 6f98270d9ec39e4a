use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: String,
}

/// The version stamp resolved at startup (file, then git, then built-in).
pub async fn get_version(State(state): State<Arc<AppState>>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: state.version.clone(),
    })
}
