use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use advisor_core::PracticeSnapshot;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PracticeResponse {
    pub total_clients: u32,
    pub overdue_reviews: u32,
    pub compliance_rate: u32,
}

/// Practice counts for the stats row. Falls back to the fixed demo numbers
/// inside the snapshot when the book is unreachable, so this never fails.
pub async fn get_practice(State(state): State<Arc<AppState>>) -> Json<PracticeResponse> {
    let snapshot = PracticeSnapshot::gather(state.book.as_ref()).await;

    Json(PracticeResponse {
        total_clients: snapshot.total_clients,
        overdue_reviews: snapshot.overdue_reviews,
        compliance_rate: snapshot.compliance_rate(),
    })
}
