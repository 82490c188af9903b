use crate::aggregate::{aggregate_pull_requests, attach_work_items};
use crate::error::ApiError;
use crate::filter::{Facets, PrFilter, PrQuery};
use crate::state::AppState;
use crate::summary::PullRequestSummary;
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrListResponse {
    pub prs: Vec<PullRequestSummary>,
    pub total_count: usize,
    /// Number of configured repositories
    pub repositories: usize,
    /// Number of configured team members
    pub team_members: usize,
    /// Filter options, computed before the query filter is applied
    pub facets: Facets,
}

/// `GET /api/prs`
pub async fn list_prs(
    State(state): State<AppState>,
    Query(query): Query<PrQuery>,
) -> Result<Json<PrListResponse>, ApiError> {
    let client = state.client()?;
    let config = &state.config;
    if config.repositories.is_empty() {
        return Err(ApiError::NoRepositories);
    }
    let filter = PrFilter::try_from(&query)?;

    let mut prs =
        aggregate_pull_requests(client, &config.repositories, &config.team_members).await;
    let facets = Facets::from_prs(&prs);
    prs = filter.apply(prs);

    if let Some(provider) = state.work_items() {
        attach_work_items(provider, &mut prs).await;
    }

    Ok(Json(PrListResponse {
        total_count: prs.len(),
        prs,
        repositories: config.repositories.len(),
        team_members: config.team_members.len(),
        facets,
    }))
}
