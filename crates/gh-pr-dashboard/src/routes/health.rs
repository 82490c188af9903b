use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguredSummary {
    pub has_token: bool,
    pub repositories: usize,
    pub team_members: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub configured: ConfiguredSummary,
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        configured: ConfiguredSummary {
            has_token: state.has_token(),
            repositories: state.config.repositories.len(),
            team_members: state.config.team_members.len(),
        },
    })
}
