use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Archetype, ArchetypeId, GameClass};

/// Render-ready archetype entry.
#[derive(Debug, Serialize)]
pub struct ArchetypeView {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub class: GameClass,
    pub class_name: String,
    pub icon: String,
    pub is_default: bool,
}

impl From<&Archetype> for ArchetypeView {
    fn from(archetype: &Archetype) -> Self {
        Self {
            id: archetype.id.as_str().to_string(),
            name: archetype.name.clone(),
            abbreviation: archetype.abbreviation.clone(),
            class: archetype.class,
            class_name: archetype.class.display_name().to_string(),
            icon: archetype.class.icon().to_string(),
            is_default: archetype.is_default,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArchetypesResponse {
    pub archetypes: Vec<ArchetypeView>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<ArchetypesResponse>, ApiError> {
    let archetypes = state.store.load_archetypes()?;
    Ok(Json(ArchetypesResponse {
        archetypes: archetypes.iter().map(ArchetypeView::from).collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateArchetypeRequest {
    pub name: String,
    pub abbreviation: String,
    pub class: GameClass,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateArchetypeRequest>,
) -> Result<(StatusCode, Json<ArchetypeView>), ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("archetype name is empty".to_string()));
    }

    let archetype = Archetype::new(name.to_string(), req.abbreviation.trim().to_string(), req.class);
    state.store.add_archetype(archetype.clone())?;

    Ok((StatusCode::CREATED, Json(ArchetypeView::from(&archetype))))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_archetype(&ArchetypeId::from(id))?;
    Ok(StatusCode::NO_CONTENT)
}
