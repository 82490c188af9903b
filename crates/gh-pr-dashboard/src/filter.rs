//! Filter bar model for the PR list
//!
//! Each facet is a set of accepted values; an empty set accepts everything.

use crate::error::ApiError;
use crate::summary::PullRequestSummary;
use gh_pr_config::split_list;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Draft,
    Ready,
}

impl StatusFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(StatusFilter::All),
            "draft" => Some(StatusFilter::Draft),
            "ready" => Some(StatusFilter::Ready),
            _ => None,
        }
    }

    pub fn matches(self, draft: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Draft => draft,
            StatusFilter::Ready => !draft,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrFilter {
    pub status: StatusFilter,
    pub repositories: Vec<String>,
    pub authors: Vec<String>,
    pub target_branches: Vec<String>,
}

impl PrFilter {
    pub fn is_empty(&self) -> bool {
        self.status == StatusFilter::All
            && self.repositories.is_empty()
            && self.authors.is_empty()
            && self.target_branches.is_empty()
    }

    /// A PR passes when every non-empty constraint matches.
    pub fn matches(&self, pr: &PullRequestSummary) -> bool {
        self.status.matches(pr.draft)
            && accepts(&self.repositories, &pr.repository)
            && accepts(&self.authors, &pr.author)
            && accepts(&self.target_branches, &pr.target_branch)
    }

    pub fn apply(&self, prs: Vec<PullRequestSummary>) -> Vec<PullRequestSummary> {
        if self.is_empty() {
            return prs;
        }
        prs.into_iter().filter(|pr| self.matches(pr)).collect()
    }
}

fn accepts(allowed: &[String], value: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|a| a == value)
}

/// Query parameters of `GET /api/prs`, lists comma-separated
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrQuery {
    pub status: Option<String>,
    pub repository: Option<String>,
    pub author: Option<String>,
    pub target_branch: Option<String>,
}

impl TryFrom<&PrQuery> for PrFilter {
    type Error = ApiError;

    fn try_from(query: &PrQuery) -> Result<Self, Self::Error> {
        let status = match query.status.as_deref() {
            Some(value) => StatusFilter::parse(value)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown status filter: {}", value)))?,
            None => StatusFilter::All,
        };
        let list = |value: &Option<String>| value.as_deref().map(split_list).unwrap_or_default();

        Ok(PrFilter {
            status,
            repositories: list(&query.repository),
            authors: list(&query.author),
            target_branches: list(&query.target_branch),
        })
    }
}

/// Distinct values per facet, sorted, for populating the filter dropdowns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub repositories: Vec<String>,
    pub authors: Vec<String>,
    pub target_branches: Vec<String>,
}

impl Facets {
    pub fn from_prs(prs: &[PullRequestSummary]) -> Self {
        Self {
            repositories: distinct(prs, |pr| &pr.repository),
            authors: distinct(prs, |pr| &pr.author),
            target_branches: distinct(prs, |pr| &pr.target_branch),
        }
    }
}

fn distinct<F>(prs: &[PullRequestSummary], field: F) -> Vec<String>
where
    F: Fn(&PullRequestSummary) -> &String,
{
    prs.iter()
        .map(field)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pull_request;

    fn sample() -> Vec<PullRequestSummary> {
        let mut draft = pull_request(1, "alice", 1);
        draft.draft = true;
        let mut release = pull_request(2, "bob", 2);
        release.base_branch = "release".into();
        vec![
            PullRequestSummary::new(draft, "acme/api"),
            PullRequestSummary::new(release, "acme/web"),
            PullRequestSummary::new(pull_request(3, "alice", 3), "acme/web"),
        ]
    }

    fn numbers(prs: &[PullRequestSummary]) -> Vec<u64> {
        prs.iter().map(|pr| pr.number).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = PrFilter::default();
        assert!(filter.is_empty());
        assert_eq!(numbers(&filter.apply(sample())), vec![1, 2, 3]);
    }

    #[test]
    fn test_status_filter() {
        let drafts = PrFilter {
            status: StatusFilter::Draft,
            ..Default::default()
        };
        assert_eq!(numbers(&drafts.apply(sample())), vec![1]);

        let ready = PrFilter {
            status: StatusFilter::Ready,
            ..Default::default()
        };
        assert_eq!(numbers(&ready.apply(sample())), vec![2, 3]);
    }

    #[test]
    fn test_all_constraints_must_match() {
        let filter = PrFilter {
            status: StatusFilter::All,
            repositories: vec!["acme/web".into()],
            authors: vec!["alice".into(), "bob".into()],
            target_branches: vec!["main".into()],
        };
        assert_eq!(numbers(&filter.apply(sample())), vec![3]);
    }

    #[test]
    fn test_from_query() {
        let query = PrQuery {
            status: Some("Ready".into()),
            repository: Some("acme/api, acme/web".into()),
            author: None,
            target_branch: Some("".into()),
        };
        let filter = PrFilter::try_from(&query).unwrap();
        assert_eq!(filter.status, StatusFilter::Ready);
        assert_eq!(filter.repositories, vec!["acme/api", "acme/web"]);
        assert!(filter.authors.is_empty());
        assert!(filter.target_branches.is_empty());

        let bad = PrQuery {
            status: Some("merged".into()),
            ..Default::default()
        };
        assert!(matches!(PrFilter::try_from(&bad), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_facets_sorted_and_distinct() {
        let facets = Facets::from_prs(&sample());
        assert_eq!(facets.repositories, vec!["acme/api", "acme/web"]);
        assert_eq!(facets.authors, vec!["alice", "bob"]);
        assert_eq!(facets.target_branches, vec!["main", "release"]);
    }
}
