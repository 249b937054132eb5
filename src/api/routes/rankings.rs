use axum::extract::State;
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::stats::rankings::{build_rankings, Rankings};

/// Cross-user win-count rankings by archetype and class.
pub async fn rankings(State(state): State<AppState>) -> Result<Json<Rankings>, ApiError> {
    let archetypes = state.store.load_archetypes()?;
    let rankings = build_rankings(state.store.as_ref(), &archetypes)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(rankings))
}
