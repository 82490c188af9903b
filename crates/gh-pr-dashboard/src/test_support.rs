//! In-memory GitHub and ticketing backends for handler tests

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use gh_client::{ClientError, GitHubClient, PullRequest, PullRequestFile, WorkItem, WorkItemProvider};
use std::collections::HashMap;

/// An open PR by `author`, last updated on day `updated_day` of January 2024.
pub fn pull_request(number: u64, author: &str, updated_day: u32) -> PullRequest {
    PullRequest {
        id: number * 1000,
        number,
        title: format!("PR {}", number),
        body: None,
        author: author.to_string(),
        author_avatar: None,
        state: "open".into(),
        draft: false,
        base_branch: "main".into(),
        head_branch: format!("feature-{}", number),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, updated_day, 12, 0, 0).unwrap(),
        html_url: format!("https://github.com/acme/api/pull/{}", number),
        requested_reviewers: Vec::new(),
        requested_teams: Vec::new(),
    }
}

pub fn pull_request_file(filename: &str, status: &str, patch: Option<&str>) -> PullRequestFile {
    PullRequestFile {
        filename: filename.to_string(),
        status: status.to_string(),
        additions: 1,
        deletions: 1,
        changes: 2,
        patch: patch.map(str::to_string),
        previous_filename: None,
        blob_url: None,
        raw_url: None,
    }
}

/// Serves canned responses keyed by `owner/repo`; unknown repositories
/// answer 404.
#[derive(Default)]
pub struct StubClient {
    prs: HashMap<String, Result<Vec<PullRequest>, u16>>,
    files: HashMap<String, Result<Vec<PullRequestFile>, u16>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prs(mut self, repository: &str, prs: Vec<PullRequest>) -> Self {
        self.prs.insert(repository.to_string(), Ok(prs));
        self
    }

    pub fn with_failure(mut self, repository: &str, status: u16) -> Self {
        self.prs.insert(repository.to_string(), Err(status));
        self
    }

    pub fn with_files(mut self, repository: &str, files: Vec<PullRequestFile>) -> Self {
        self.files.insert(repository.to_string(), Ok(files));
        self
    }

    pub fn with_files_failure(mut self, repository: &str, status: u16) -> Self {
        self.files.insert(repository.to_string(), Err(status));
        self
    }
}

fn api_error(status: u16) -> ClientError {
    ClientError::Api {
        status,
        message: "stub".into(),
    }
}

fn page_of<T: Clone>(items: &[T], page: u32, per_page: u8) -> Vec<T> {
    items
        .iter()
        .skip((page as usize - 1) * per_page as usize)
        .take(per_page as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl GitHubClient for StubClient {
    async fn fetch_pull_requests_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<PullRequest>, ClientError> {
        match self.prs.get(&format!("{}/{}", owner, repo)) {
            Some(Ok(prs)) => Ok(page_of(prs, page, per_page)),
            Some(Err(status)) => Err(api_error(*status)),
            None => Err(api_error(404)),
        }
    }

    async fn fetch_pull_request_files_page(
        &self,
        owner: &str,
        repo: &str,
        _pr_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<PullRequestFile>, ClientError> {
        match self.files.get(&format!("{}/{}", owner, repo)) {
            Some(Ok(files)) => Ok(page_of(files, page, per_page)),
            Some(Err(status)) => Err(api_error(*status)),
            None => Err(api_error(404)),
        }
    }
}

/// Knows every id; titles echo the id.
pub struct StubWorkItems;

#[async_trait]
impl WorkItemProvider for StubWorkItems {
    async fn fetch_work_item(&self, id: u32) -> Result<WorkItem, ClientError> {
        Ok(WorkItem {
            id,
            title: Some(format!("Work item {}", id)),
            state: Some("Active".into()),
            work_item_type: Some("Task".into()),
            url: None,
        })
    }
}
