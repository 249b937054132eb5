use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ArchetypeId, MatchRecord, MatchResult, TurnOrder, UserId};

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub matches: Vec<MatchRecord>,
    pub total: u32,
}

pub async fn list(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<MatchesResponse>, ApiError> {
    let mut matches = state.store.load_matches(&UserId::from(user))?;
    matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = matches.len() as u32;
    Ok(Json(MatchesResponse { matches, total }))
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub archetype_id: String,
    pub opponent_archetype_id: String,
    pub turn: TurnOrder,
    pub result: MatchResult,
    pub note: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(req): Json<MatchRequest>,
) -> Result<(StatusCode, Json<MatchRecord>), ApiError> {
    let mut record = MatchRecord::new(
        UserId::from(user),
        ArchetypeId::from(req.archetype_id),
        ArchetypeId::from(req.opponent_archetype_id),
        req.turn,
        req.result,
    );
    if let Some(note) = req.note {
        record = record.with_note(note);
    }

    state.store.append_match(&record)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn replace(
    State(state): State<AppState>,
    Path((user, id)): Path<(String, Uuid)>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchRecord>, ApiError> {
    let user = UserId::from(user);
    let existing = state
        .store
        .load_matches(&user)?
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| ApiError::NotFound(format!("match {}", id)))?;

    // Full replacement: identity and creation time survive the edit.
    let record = MatchRecord {
        id: existing.id,
        created_at: existing.created_at,
        user_id: user,
        archetype_id: ArchetypeId::from(req.archetype_id),
        opponent_archetype_id: ArchetypeId::from(req.opponent_archetype_id),
        turn: req.turn,
        result: req.result,
        note: req.note,
    };

    state.store.replace_match(&record)?;
    Ok(Json(record))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((user, id)): Path<(String, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_match(&UserId::from(user), id)?;
    Ok(StatusCode::NO_CONTENT)
}
