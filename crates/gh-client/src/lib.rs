//! GitHub API client for the PR dashboard
//!
//! This crate provides a trait-based GitHub API client plus the lookups the
//! dashboard layers on top of pull requests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_pull_requests_page()                    │
//! │  - fetch_pull_request_files_page()               │
//! │  - fetch_open_pull_requests()   (paginated)      │
//! │  - fetch_pull_request_files()   (paginated)      │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!               ┌─────────────────┐
//!               │ OctocrabClient  │
//!               │ (direct API)    │
//!               └─────────────────┘
//!
//! ┌─────────────────────────────────────────────────┐
//! │            WorkItemProvider trait                │
//! │  ShellWorkItemProvider: command -> JSON stdout   │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{GitHubClient, OctocrabClient, TokenResolver};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let token = TokenResolver::new()
//!     .with_token(std::env::var("GITHUB_TOKEN").ok())
//!     .with_gh_cli(true)
//!     .resolve()
//!     .await
//!     .unwrap_or_default();
//! let client = OctocrabClient::with_token(token)?;
//!
//! let prs = client.fetch_open_pull_requests("owner", "repo").await?;
//! for pr in &prs {
//!     let files = client.fetch_pull_request_files("owner", "repo", pr.number).await?;
//!     println!("#{} {} ({} files)", pr.number, pr.title, files.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod octocrab_client;
pub mod pagination;
pub mod token;
pub mod types;
pub mod workitems;

pub use client::GitHubClient;
pub use error::ClientError;
pub use octocrab_client::OctocrabClient;
pub use pagination::{collect_pages, MAX_PAGES, PER_PAGE};
pub use token::TokenResolver;
pub use types::{PullRequest, PullRequestFile, RequestedTeam, Reviewer, WorkItem};
pub use workitems::{
    extract_work_item_ids, lookup_work_items, ShellWorkItemProvider, WorkItemProvider,
};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
