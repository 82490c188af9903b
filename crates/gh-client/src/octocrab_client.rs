//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.
//! Requests go through octocrab's raw `_get` so the upstream status is checked
//! before any decoding: an error page from GitHub's edge (HTML 502/503/504)
//! still surfaces as [`ClientError::Api`] with its real status.

use crate::client::GitHubClient;
use crate::error::ClientError;
use crate::types::{ApiFile, ApiPullRequest, PullRequest, PullRequestFile};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

/// Longest error body excerpt kept when GitHub's answer is not JSON
const MAX_ERROR_EXCERPT: usize = 200;

/// Query string for list endpoints
fn list_query(state: Option<&str>, per_page: u8, page: u32) -> String {
    match state {
        Some(state) => format!("?state={}&per_page={}&page={}", state, per_page, page),
        None => format!("?per_page={}&page={}", per_page, page),
    }
}

/// Turn a raw response into `T`, or into an API error carrying `status`
fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ClientError> {
    if !(200..300).contains(&status) {
        return Err(ClientError::Api {
            status,
            message: error_message(body),
        });
    }
    serde_json::from_str(body)
        .map_err(|e| ClientError::Transport(format!("Invalid response body: {}", e)))
}

/// GitHub's `{"message": ...}` if present, otherwise the start of the body
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct GitHubErrorBody {
        message: String,
    }

    match serde_json::from_str::<GitHubErrorBody>(body) {
        Ok(error) => error.message,
        Err(_) => body.trim().chars().take(MAX_ERROR_EXCERPT).collect(),
    }
}

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Build a client authenticated with a personal access token
    pub fn with_token(token: impl Into<String>) -> anyhow::Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .context("Failed to build Octocrab client")?;
        Ok(Self::new(Arc::new(octocrab)))
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }

    async fn get_json<T: DeserializeOwned>(&self, uri: &str) -> Result<T, ClientError> {
        let response = self.octocrab._get(uri).await?;
        let status = response.status().as_u16();
        let body = self.octocrab.body_to_string(response).await?;
        decode_response(status, &body)
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_pull_requests_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<PullRequest>, ClientError> {
        debug!("Fetching open PRs for {}/{} (page {})", owner, repo, page);

        let uri = format!(
            "/repos/{}/{}/pulls{}",
            owner,
            repo,
            list_query(Some("open"), per_page, page)
        );
        let prs: Vec<ApiPullRequest> = self.get_json(&uri).await?;

        debug!("Fetched {} PRs for {}/{}", prs.len(), owner, repo);
        Ok(prs.into_iter().map(PullRequest::from).collect())
    }

    async fn fetch_pull_request_files_page(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<PullRequestFile>, ClientError> {
        debug!(
            "Fetching files for {}/{}#{} (page {})",
            owner, repo, pr_number, page
        );

        let uri = format!(
            "/repos/{}/{}/pulls/{}/files{}",
            owner,
            repo,
            pr_number,
            list_query(None, per_page, page)
        );
        let files: Vec<ApiFile> = self.get_json(&uri).await?;

        Ok(files.into_iter().map(PullRequestFile::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query() {
        assert_eq!(
            list_query(Some("open"), 100, 2),
            "?state=open&per_page=100&page=2"
        );
        assert_eq!(list_query(None, 100, 1), "?per_page=100&page=1");
    }

    #[test]
    fn test_html_error_page_keeps_status() {
        let body = "<html><body><h1>502 Bad Gateway</h1></body></html>";
        let err = decode_response::<Vec<ApiFile>>(502, body).unwrap_err();

        assert_eq!(err.status_code(), Some(502));
        assert!(matches!(err, ClientError::Api { ref message, .. } if message.starts_with("<html>")));
    }

    #[test]
    fn test_json_error_message_is_extracted() {
        let body = r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#;
        let err = decode_response::<Vec<ApiFile>>(404, body).unwrap_err();

        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "GitHub API returned 404: Not Found");
    }

    #[test]
    fn test_error_excerpt_is_bounded() {
        let body = "x".repeat(5000);
        assert_eq!(error_message(&body).len(), MAX_ERROR_EXCERPT);
    }

    #[test]
    fn test_success_body_is_decoded() {
        let body = r#"[{"filename":"src/lib.rs","status":"modified","additions":1,"deletions":0,"changes":1}]"#;
        let files: Vec<ApiFile> = decode_response(200, body).unwrap();
        assert_eq!(files.len(), 1);

        let err = decode_response::<Vec<ApiFile>>(200, "not json").unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
