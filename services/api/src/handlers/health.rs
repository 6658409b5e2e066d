use axum::extract::State;
use axum::http::StatusCode;

use degreedash_core::health::db_readiness;

use crate::state::AppState;

// ── GET /readyz ──────────────────────────────────────────────────────────────

pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    db_readiness(&state.db).await
}
