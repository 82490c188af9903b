//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from application domain models
//! to keep this crate pure and reusable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An open pull request from the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Global PR id
    pub id: u64,

    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// PR body/description
    pub body: Option<String>,

    /// Author's GitHub username
    pub author: String,

    /// Author's avatar URL
    pub author_avatar: Option<String>,

    /// PR state as reported by GitHub ("open", "closed")
    pub state: String,

    /// Whether the PR is a draft
    pub draft: bool,

    /// Base branch name (e.g., "main")
    pub base_branch: String,

    /// HEAD branch name (e.g., "feature/foo")
    pub head_branch: String,

    /// When the PR was created
    pub created_at: DateTime<Utc>,

    /// When the PR was last updated
    pub updated_at: DateTime<Utc>,

    /// PR URL for opening in browser
    pub html_url: String,

    /// Users asked to review
    pub requested_reviewers: Vec<Reviewer>,

    /// Teams asked to review
    pub requested_teams: Vec<RequestedTeam>,
}

/// A user requested to review a PR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub login: String,
    pub avatar_url: Option<String>,
}

/// A team requested to review a PR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedTeam {
    pub name: String,
    pub slug: String,
}

/// One changed file of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestFile {
    /// Current path
    pub filename: String,

    /// Raw status string ("added", "removed", "modified", "renamed", ...)
    pub status: String,

    /// Number of lines added
    pub additions: u32,

    /// Number of lines deleted
    pub deletions: u32,

    /// Total changed lines as reported by GitHub
    pub changes: u32,

    /// Unified diff body; absent for binary or oversized files
    pub patch: Option<String>,

    /// Prior path for renames
    pub previous_filename: Option<String>,

    /// Link to the blob at the head commit
    pub blob_url: Option<String>,

    /// Link to the raw file at the head commit
    pub raw_url: Option<String>,
}

/// A ticketing-system record referenced from a PR body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: u32,
    pub title: Option<String>,
    pub state: Option<String>,
    pub work_item_type: Option<String>,
    pub url: Option<String>,
}

// === Wire shapes (GitHub REST, snake_case) ===

#[derive(Debug, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub id: u64,
    pub number: u64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub user: Option<ApiUser>,
    pub state: Option<String>,
    pub draft: Option<bool>,
    pub html_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub base: ApiRef,
    pub head: ApiRef,
    #[serde(default)]
    pub requested_reviewers: Option<Vec<ApiUser>>,
    #[serde(default)]
    pub requested_teams: Option<Vec<ApiTeam>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiUser {
    pub login: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiRef {
    #[serde(rename = "ref")]
    pub ref_field: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiTeam {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiFile {
    pub filename: String,
    pub status: String,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
    #[serde(default)]
    pub changes: u32,
    pub patch: Option<String>,
    pub previous_filename: Option<String>,
    pub blob_url: Option<String>,
    pub raw_url: Option<String>,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(pr: ApiPullRequest) -> Self {
        let (author, author_avatar) = match pr.user {
            Some(user) => (user.login, user.avatar_url),
            None => ("unknown".to_string(), None),
        };

        PullRequest {
            id: pr.id,
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            body: pr.body,
            author,
            author_avatar,
            state: pr.state.unwrap_or_else(|| "open".to_string()),
            draft: pr.draft.unwrap_or(false),
            base_branch: pr.base.ref_field,
            head_branch: pr.head.ref_field,
            created_at: pr.created_at,
            updated_at: pr.updated_at,
            html_url: pr.html_url.unwrap_or_default(),
            requested_reviewers: pr
                .requested_reviewers
                .unwrap_or_default()
                .into_iter()
                .map(|u| Reviewer {
                    login: u.login,
                    avatar_url: u.avatar_url,
                })
                .collect(),
            requested_teams: pr
                .requested_teams
                .unwrap_or_default()
                .into_iter()
                .map(|t| RequestedTeam {
                    name: t.name,
                    slug: t.slug,
                })
                .collect(),
        }
    }
}

impl From<ApiFile> for PullRequestFile {
    fn from(file: ApiFile) -> Self {
        PullRequestFile {
            filename: file.filename,
            status: file.status,
            additions: file.additions,
            deletions: file.deletions,
            changes: file.changes,
            patch: file.patch,
            previous_filename: file.previous_filename,
            blob_url: file.blob_url,
            raw_url: file.raw_url,
        }
    }
}
