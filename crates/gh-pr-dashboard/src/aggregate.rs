//! Fetch open PRs across repositories and merge them into one list

use crate::summary::PullRequestSummary;
use futures::future::join_all;
use gh_client::{lookup_work_items, GitHubClient, WorkItemProvider};
use log::{debug, error, info};

/// Fetch one repository. Failures are logged and yield no PRs.
pub async fn fetch_repository(
    client: &dyn GitHubClient,
    repository: &str,
) -> Vec<PullRequestSummary> {
    let Some((owner, repo)) = repository.split_once('/') else {
        error!("Invalid repository {:?}, expected owner/repo", repository);
        return Vec::new();
    };

    match client.fetch_open_pull_requests(owner, repo).await {
        Ok(prs) => {
            debug!("Fetched {} open PRs from {}", prs.len(), repository);
            prs.into_iter()
                .map(|pr| PullRequestSummary::new(pr, repository))
                .collect()
        }
        Err(e) => {
            error!("Error fetching PRs from {}: {}", repository, e);
            Vec::new()
        }
    }
}

/// Fetch all repositories concurrently, then filter by team and sort.
pub async fn aggregate_pull_requests(
    client: &dyn GitHubClient,
    repositories: &[String],
    team_members: &[String],
) -> Vec<PullRequestSummary> {
    let batches = join_all(
        repositories
            .iter()
            .map(|repository| fetch_repository(client, repository)),
    )
    .await;

    let mut prs: Vec<PullRequestSummary> = batches.into_iter().flatten().collect();
    let fetched = prs.len();

    retain_team_members(&mut prs, team_members);
    sort_by_recent_update(&mut prs);

    info!(
        "Aggregated {} PRs from {} repositories ({} before team filter)",
        prs.len(),
        repositories.len(),
        fetched
    );
    prs
}

/// Keep PRs authored by a team member. An empty team keeps everything.
pub fn retain_team_members(prs: &mut Vec<PullRequestSummary>, team_members: &[String]) {
    if team_members.is_empty() {
        return;
    }
    prs.retain(|pr| team_members.iter().any(|member| *member == pr.author));
}

/// Most recently updated first; ties keep fetch order.
pub fn sort_by_recent_update(prs: &mut [PullRequestSummary]) {
    prs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

/// Resolve work-item references in every PR body concurrently.
pub async fn attach_work_items(provider: &dyn WorkItemProvider, prs: &mut [PullRequestSummary]) {
    let lookups = prs.iter().map(|pr| async move {
        match pr.body.as_deref() {
            Some(body) => lookup_work_items(provider, body).await,
            None => Vec::new(),
        }
    });
    let results = join_all(lookups).await;

    for (pr, items) in prs.iter_mut().zip(results) {
        pr.work_items = items;
    }
}
