use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use gh_diff_viewer::{ChangedFile, DiffViewerState, ViewType, ViewerSnapshot};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Diff algorithm GitHub uses for the patches it returns
const ALGORITHM: &str = "myers";

#[derive(Debug, Serialize)]
pub struct FilesResponse {
    pub files: Vec<ChangedFile>,
    pub algorithm: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQuery {
    pub view_type: Option<String>,
}

async fn fetch_changed_files(
    state: &AppState,
    owner: &str,
    repo: &str,
    pr_number: u64,
) -> Result<Vec<ChangedFile>, ApiError> {
    let client = state.client()?;
    let files = client
        .fetch_pull_request_files(owner, repo, pr_number)
        .await
        .map_err(ApiError::from_files_error)?;

    info!(
        "Fetched {} files for PR #{} in {}/{}",
        files.len(),
        pr_number,
        owner,
        repo
    );
    Ok(files.into_iter().map(ChangedFile::from).collect())
}

/// `GET /api/prs/{owner}/{repo}/{pr_number}/files`
pub async fn list_files(
    State(state): State<AppState>,
    Path((owner, repo, pr_number)): Path<(String, String, u64)>,
) -> Result<Json<FilesResponse>, ApiError> {
    let files = fetch_changed_files(&state, &owner, &repo, pr_number).await?;
    Ok(Json(FilesResponse {
        files,
        algorithm: ALGORITHM,
    }))
}

/// `GET /api/prs/{owner}/{repo}/{pr_number}/view?viewType=split|unified`
///
/// Initial viewer state: auto-expanded files, collapsed directories, tokens
/// applied.
pub async fn view_files(
    State(state): State<AppState>,
    Path((owner, repo, pr_number)): Path<(String, String, u64)>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ViewerSnapshot>, ApiError> {
    let view_type = match query.view_type.as_deref() {
        Some(value) => ViewType::parse(value)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown viewType: {}", value)))?,
        None => ViewType::default(),
    };

    let files = fetch_changed_files(&state, &owner, &repo, pr_number).await?;
    let snapshot = tokio::task::spawn_blocking(move || render_snapshot(files, view_type))
        .await
        .map_err(|e| ApiError::Internal(format!("Internal server error: {}", e)))?;

    Ok(Json(snapshot))
}

fn render_snapshot(files: Vec<ChangedFile>, view_type: ViewType) -> ViewerSnapshot {
    let mut viewer = DiffViewerState::new().with_view_type(view_type);
    viewer.load_files(files);
    let highlighted = viewer.run_deferred();
    debug!("Highlighted {} files for initial view", highlighted);
    viewer.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{pull_request_file, StubClient};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use gh_pr_config::AppConfig;
    use std::sync::Arc;

    const PATCH: &str = "@@ -1,2 +1,2 @@\n-fn old() {}\n+fn new() {}\n // tail";

    fn state(client: StubClient) -> AppState {
        AppState::new(AppConfig::default(), Some(Arc::new(client)))
    }

    fn path(repo: &str) -> Path<(String, String, u64)> {
        Path(("acme".to_string(), repo.to_string(), 42))
    }

    #[tokio::test]
    async fn test_files_are_paged_and_mapped() {
        let files: Vec<_> = (0..150)
            .map(|i| pull_request_file(&format!("src/f{}.rs", i), "modified", Some(PATCH)))
            .collect();
        let client = StubClient::new().with_files("acme/api", files);

        let Json(response) = list_files(State(state(client)), path("api")).await.unwrap();
        assert_eq!(response.files.len(), 150);
        assert_eq!(response.algorithm, "myers");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["files"][0]["filename"], "src/f0.rs");
        assert_eq!(json["files"][0]["status"], "modified");
        assert!(json["files"][0].get("previousFilename").is_none());
    }

    #[tokio::test]
    async fn test_upstream_failure_keeps_status() {
        let client = StubClient::new().with_files_failure("acme/api", 403);

        let err = list_files(State(state(client)), path("api")).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch PR files: Forbidden");
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_files_need_token() {
        let state = AppState::new(AppConfig::default(), None);
        let err = list_files(State(state), path("api")).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
    }

    #[tokio::test]
    async fn test_view_renders_initial_state() {
        let client = StubClient::new().with_files(
            "acme/api",
            vec![
                pull_request_file("a/b.rs", "modified", Some(PATCH)),
                pull_request_file("a/logo.png", "added", None),
            ],
        );
        let query = ViewQuery {
            view_type: Some("unified".into()),
        };

        let Json(snapshot) = view_files(State(state(client)), path("api"), Query(query))
            .await
            .unwrap();

        assert_eq!(snapshot.view_type, ViewType::Unified);
        assert_eq!(snapshot.totals.files, 2);
        assert_eq!(snapshot.files.len(), 2);
        assert_eq!(snapshot.tree.len(), 1);
        assert!(snapshot.tree[0].is_dir && !snapshot.tree[0].is_expanded);
        assert!(snapshot.files.iter().all(|f| f.header.expanded));
    }

    #[tokio::test]
    async fn test_view_rejects_unknown_layout() {
        let query = ViewQuery {
            view_type: Some("sideways".into()),
        };
        let err = view_files(State(state(StubClient::new())), path("api"), Query(query))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
