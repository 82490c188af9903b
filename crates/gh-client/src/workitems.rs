//! Work-item references in PR bodies and their lookup
//!
//! PR descriptions reference tickets as `#` followed by exactly six digits.
//! Lookups go through a [`WorkItemProvider`]; the bundled
//! [`ShellWorkItemProvider`] runs a configured command (typically a CLI that
//! already holds the ticketing system's credentials) and reads JSON from its
//! stdout.

use crate::error::ClientError;
use crate::types::WorkItem;
use async_trait::async_trait;
use log::{debug, warn};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// At most this many distinct references are looked up per PR.
pub const MAX_WORK_ITEMS: usize = 3;

/// Placeholder replaced with the work-item id in command and URL templates.
pub const ID_PLACEHOLDER: &str = "{id}";

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\d+)").unwrap());

/// Extract up to [`MAX_WORK_ITEMS`] distinct ids, in order of appearance.
///
/// Only runs of exactly six digits count; `#1234567` is not a reference.
pub fn extract_work_item_ids(body: &str) -> Vec<u32> {
    let mut ids = Vec::new();
    for captures in REFERENCE.captures_iter(body) {
        let digits = &captures[1];
        if digits.len() != 6 {
            continue;
        }
        let Ok(id) = digits.parse::<u32>() else {
            continue;
        };
        if !ids.contains(&id) {
            ids.push(id);
        }
        if ids.len() == MAX_WORK_ITEMS {
            break;
        }
    }
    ids
}

/// Source of work-item records
#[async_trait]
pub trait WorkItemProvider: Send + Sync {
    async fn fetch_work_item(&self, id: u32) -> Result<WorkItem, ClientError>;
}

/// Look up every reference in `body`; failures are logged and skipped.
pub async fn lookup_work_items(provider: &dyn WorkItemProvider, body: &str) -> Vec<WorkItem> {
    let mut items = Vec::new();
    for id in extract_work_item_ids(body) {
        match provider.fetch_work_item(id).await {
            Ok(item) => items.push(item),
            Err(e) => warn!("Skipping work item {}: {}", id, e),
        }
    }
    items
}

/// Runs a shell command per lookup and parses its stdout as JSON
///
/// Accepts either a flat object (`id`, `title`, `state`, `workItemType`,
/// `url`) or an Azure DevOps style record (`fields."System.Title"`, ...).
#[derive(Debug, Clone)]
pub struct ShellWorkItemProvider {
    command_template: String,
    url_template: Option<String>,
}

impl ShellWorkItemProvider {
    pub fn new(command_template: impl Into<String>, url_template: Option<String>) -> Self {
        Self {
            command_template: command_template.into(),
            url_template,
        }
    }

    fn command_for(&self, id: u32) -> String {
        self.command_template
            .replace(ID_PLACEHOLDER, &id.to_string())
    }

    fn parse_output(&self, id: u32, stdout: &[u8]) -> Result<WorkItem, ClientError> {
        let value: Value = serde_json::from_slice(stdout).map_err(|e| ClientError::WorkItem {
            id,
            reason: format!("invalid JSON: {}", e),
        })?;

        let text = |pointers: &[&str]| -> Option<String> {
            pointers
                .iter()
                .find_map(|p| value.pointer(p).and_then(Value::as_str))
                .map(str::to_string)
        };

        let url = self
            .url_template
            .as_ref()
            .map(|template| template.replace(ID_PLACEHOLDER, &id.to_string()))
            .or_else(|| text(&["/url", "/_links/html/href"]));

        Ok(WorkItem {
            id,
            title: text(&["/title", "/fields/System.Title"]),
            state: text(&["/state", "/fields/System.State"]),
            work_item_type: text(&["/workItemType", "/fields/System.WorkItemType"]),
            url,
        })
    }
}

#[async_trait]
impl WorkItemProvider for ShellWorkItemProvider {
    async fn fetch_work_item(&self, id: u32) -> Result<WorkItem, ClientError> {
        let command = self.command_for(id);
        debug!("Looking up work item {}", id);

        let output = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&command)
            .output()
            .await
            .map_err(|e| ClientError::WorkItem {
                id,
                reason: format!("failed to run command: {}", e),
            })?;

        if !output.status.success() {
            return Err(ClientError::WorkItem {
                id,
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        self.parse_output(id, &output.stdout)
    }
}
