//! Pull request records as served to the dashboard

use chrono::{DateTime, Utc};
use gh_client::{PullRequest, RequestedTeam, WorkItem};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewerSummary {
    pub login: String,
    pub avatar: Option<String>,
}

/// One open PR, tagged with the repository it was fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestSummary {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub author: String,
    pub author_avatar: Option<String>,
    /// `owner/repo` as configured
    pub repository: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: String,
    pub draft: bool,
    pub target_branch: String,
    pub source_branch: String,
    pub requested_reviewers: Vec<ReviewerSummary>,
    pub requested_teams: Vec<RequestedTeam>,
    pub work_items: Vec<WorkItem>,
}

impl PullRequestSummary {
    pub fn new(pr: PullRequest, repository: &str) -> Self {
        Self {
            id: pr.id,
            number: pr.number,
            title: pr.title,
            body: pr.body,
            author: pr.author,
            author_avatar: pr.author_avatar,
            repository: repository.to_string(),
            url: pr.html_url,
            created_at: pr.created_at,
            updated_at: pr.updated_at,
            state: pr.state,
            draft: pr.draft,
            target_branch: pr.base_branch,
            source_branch: pr.head_branch,
            requested_reviewers: pr
                .requested_reviewers
                .into_iter()
                .map(|r| ReviewerSummary {
                    login: r.login,
                    avatar: r.avatar_url,
                })
                .collect(),
            requested_teams: pr.requested_teams,
            work_items: Vec::new(),
        }
    }
}
