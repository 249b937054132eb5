use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ArchetypeId, UserId};
use crate::stats::dimensions::{self, ArchetypeStats, ClassStats, TurnSplit};
use crate::stats::matchup::{self, MatchupFilter, MatchupMatrix};
use crate::stats::WinRateStats;

// ── Overview ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub overall: WinRateStats,
    pub turns: TurnSplit,
}

pub async fn overview(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let matches = state.store.load_matches(&UserId::from(user))?;

    Ok(Json(OverviewResponse {
        overall: WinRateStats::from_matches(&matches),
        turns: dimensions::by_turn(&matches),
    }))
}

// ── Archetype Split ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ArchetypeSplitResponse {
    pub entries: Vec<ArchetypeStats>,
}

pub async fn archetype_split(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<ArchetypeSplitResponse>, ApiError> {
    let archetypes = state.store.load_archetypes()?;
    let matches = state.store.load_matches(&UserId::from(user))?;

    Ok(Json(ArchetypeSplitResponse {
        entries: dimensions::by_archetype(&matches, &archetypes),
    }))
}

// ── Class Split ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ClassSplitResponse {
    pub entries: Vec<ClassStats>,
}

pub async fn class_split(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<ClassSplitResponse>, ApiError> {
    let archetypes = state.store.load_archetypes()?;
    let matches = state.store.load_matches(&UserId::from(user))?;

    Ok(Json(ClassSplitResponse {
        entries: dimensions::by_class(&matches, &archetypes),
    }))
}

// ── Matchup Matrix ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchupParams {
    pub user_archetype: Option<String>,
    pub opponent_archetype: Option<String>,
}

pub async fn matchups(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Query(params): Query<MatchupParams>,
) -> Result<Json<MatchupMatrix>, ApiError> {
    let archetypes = state.store.load_archetypes()?;
    let matches = state.store.load_matches(&UserId::from(user))?;

    let filter = MatchupFilter {
        user_archetype: params.user_archetype.map(ArchetypeId::from),
        opponent_archetype: params.opponent_archetype.map(ArchetypeId::from),
    };

    Ok(Json(matchup::build_matrix(&matches, &archetypes, &filter)))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::storage::{MatchStore, StorageConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn setup_test_state(dir: &std::path::Path) -> AppState {
        AppState::new(MatchStore::new(StorageConfig::new(dir.to_path_buf())))
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    async fn post_json(app: axum::Router, uri: &str, body: Value) -> Value {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    }

    /// Create an archetype through the API, returning its id.
    async fn create_archetype(state: &AppState, name: &str, class: &str) -> String {
        let app = build_router(state.clone());
        let created = post_json(
            app,
            "/api/archetypes",
            json!({"name": name, "abbreviation": name, "class": class}),
        )
        .await;
        created["id"].as_str().unwrap().to_string()
    }

    async fn record_match(
        state: &AppState,
        user: &str,
        archetype: &str,
        opponent: &str,
        turn: &str,
        result: &str,
    ) {
        let app = build_router(state.clone());
        post_json(
            app,
            &format!("/api/users/{}/matches", user),
            json!({
                "archetype_id": archetype,
                "opponent_archetype_id": opponent,
                "turn": turn,
                "result": result,
            }),
        )
        .await;
    }

    #[tokio::test]
    async fn test_overview_turn_scenario() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let forest = create_archetype(&state, "Control Forest", "forest").await;
        let sword = create_archetype(&state, "Midrange Sword", "sword").await;

        record_match(&state, "alice", &forest, &sword, "first", "win").await;
        record_match(&state, "alice", &forest, &sword, "second", "loss").await;

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/users/alice/stats/overview").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["overall"]["count"], 2);
        assert_eq!(json["overall"]["win_rate"], 50.0);
        assert_eq!(json["turns"]["first"]["win_rate"], 100.0);
        assert_eq!(json["turns"]["second"]["win_rate"], 0.0);
        assert_eq!(json["turns"]["unknown"]["count"], 0);
    }

    #[tokio::test]
    async fn test_overview_empty_user() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/users/nobody/stats/overview").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["overall"]["count"], 0);
        assert_eq!(json["overall"]["win_rate"], 0.0);
    }

    #[tokio::test]
    async fn test_overview_draw_excluded_from_denominator() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let forest = create_archetype(&state, "Control Forest", "forest").await;
        let sword = create_archetype(&state, "Midrange Sword", "sword").await;

        for result in ["win", "win", "win", "loss", "draw"] {
            record_match(&state, "alice", &forest, &sword, "first", result).await;
        }

        let app = build_router(state);
        let (_, json) = get_json(app, "/api/users/alice/stats/overview").await;

        assert_eq!(json["overall"]["count"], 5);
        assert_eq!(json["overall"]["win_rate"], 75.0);
    }

    #[tokio::test]
    async fn test_archetype_split_sorted_with_unknown() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let forest = create_archetype(&state, "Control Forest", "forest").await;
        let sword = create_archetype(&state, "Midrange Sword", "sword").await;

        record_match(&state, "alice", &sword, &forest, "first", "win").await;
        record_match(&state, "alice", &sword, &forest, "second", "win").await;
        record_match(&state, "alice", &forest, &sword, "first", "loss").await;

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/users/alice/stats/archetypes").await;

        assert_eq!(status, StatusCode::OK);
        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries[0]["archetype"]["name"], "Midrange Sword");
        assert_eq!(entries[0]["stats"]["count"], 2);
        assert_eq!(
            entries.last().unwrap()["archetype"]["id"],
            "unknown"
        );
    }

    #[tokio::test]
    async fn test_class_split_omits_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let forest = create_archetype(&state, "Control Forest", "forest").await;
        let sword = create_archetype(&state, "Midrange Sword", "sword").await;

        record_match(&state, "alice", &forest, &sword, "first", "win").await;

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/users/alice/stats/classes").await;

        assert_eq!(status, StatusCode::OK);
        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["class"], "forest");
        assert_eq!(entries[0]["class_name"], "Forest");
    }

    #[tokio::test]
    async fn test_matchup_matrix_absent_vs_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let forest = create_archetype(&state, "Control Forest", "forest").await;
        let sword = create_archetype(&state, "Midrange Sword", "sword").await;
        let rune = create_archetype(&state, "Spell Rune", "rune").await;

        record_match(&state, "alice", &forest, &sword, "first", "loss").await;
        record_match(&state, "alice", &forest, &sword, "second", "loss").await;
        record_match(&state, "alice", &rune, &rune, "first", "win").await;

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/users/alice/stats/matchups").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rows"].as_array().unwrap();
        let columns = json["columns"].as_array().unwrap();
        let forest_row = rows.iter().position(|h| h["id"] == forest.as_str()).unwrap();
        let sword_col = columns
            .iter()
            .position(|h| h["id"] == sword.as_str())
            .unwrap();
        let rune_col = columns.iter().position(|h| h["id"] == rune.as_str()).unwrap();

        let zero_cell = &json["cells"][forest_row][sword_col];
        assert_eq!(zero_cell["stats"]["win_rate"], 0.0);
        assert_eq!(zero_cell["band"], "strongly_unfavorable");

        // Forest never met Rune: no data, not 0%.
        assert!(json["cells"][forest_row][rune_col].is_null());
    }

    #[tokio::test]
    async fn test_matchup_matrix_filters() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let forest = create_archetype(&state, "Control Forest", "forest").await;
        let sword = create_archetype(&state, "Midrange Sword", "sword").await;

        record_match(&state, "alice", &forest, &sword, "first", "win").await;
        record_match(&state, "alice", &sword, &forest, "first", "loss").await;

        let app = build_router(state);
        let (status, json) = get_json(
            app,
            &format!("/api/users/alice/stats/matchups?user_archetype={}", forest),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rows"].as_array().unwrap().len(), 1);
        assert_eq!(json["rows"][0]["id"], forest.as_str());
    }

    #[tokio::test]
    async fn test_matchup_matrix_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/users/nobody/stats/matchups").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["rows"].as_array().unwrap().is_empty());
        assert!(json["cells"].as_array().unwrap().is_empty());
    }
}
