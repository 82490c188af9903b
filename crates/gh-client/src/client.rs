//! GitHub client trait
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy.

use crate::error::ClientError;
use crate::pagination::{collect_pages, PER_PAGE};
use crate::types::{PullRequest, PullRequestFile};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Implementations provide single-page fetches; the full-list methods page
/// through them with [`collect_pages`].
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, PullRequest};
///
/// async fn list_prs(client: &dyn GitHubClient) -> Result<Vec<PullRequest>, gh_client::ClientError> {
///     client.fetch_open_pull_requests("rust-lang", "rust").await
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch one page of open pull requests (`state=open`)
    async fn fetch_pull_requests_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<PullRequest>, ClientError>;

    /// Fetch one page of a pull request's changed files
    async fn fetch_pull_request_files_page(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<PullRequestFile>, ClientError>;

    /// Fetch all open pull requests for a repository
    async fn fetch_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<PullRequest>, ClientError> {
        collect_pages(PER_PAGE, |page| {
            self.fetch_pull_requests_page(owner, repo, page, PER_PAGE)
        })
        .await
    }

    /// Fetch every changed file of a pull request, sequentially page by page
    ///
    /// A failing page fails the whole call, carrying the upstream status.
    async fn fetch_pull_request_files(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> Result<Vec<PullRequestFile>, ClientError> {
        collect_pages(PER_PAGE, |page| {
            self.fetch_pull_request_files_page(owner, repo, pr_number, page, PER_PAGE)
        })
        .await
    }
}
