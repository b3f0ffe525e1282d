use axum::{extract::State, http::StatusCode};
use tracing::warn;

use signage_core::error::AppError;

use crate::state::AppState;

/// Handler for `GET /readyz`: ready once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.db.ping().await.map_err(|e| {
        warn!(error = %e, "readiness ping failed");
        AppError::Unavailable
    })?;
    Ok(StatusCode::OK)
}
