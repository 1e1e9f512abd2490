//! Reset endpoint: clear the registry and its backing collections

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::ResetResponse;

/// POST /api/reset - Drop every registered index
///
/// Holds the registry's exclusive gate, so the reset never interleaves with
/// an in-flight build or query. Subsequent questions rebuild from scratch.
pub async fn reset(State(state): State<AppState>) -> Result<Json<ResetResponse>> {
    let cleared = state.registry().clear_all().await;

    Ok(Json(ResetResponse {
        message: format!("Index store reset, {} upload(s) cleared", cleared),
    }))
}
