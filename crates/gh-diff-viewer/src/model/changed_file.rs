//! Changed-file records as delivered by the pull-request files endpoint.

use serde::{Deserialize, Serialize};

/// One entry per file touched by a pull request.
///
/// Immutable for the lifetime of a viewing session. `changes` is taken from
/// upstream as-is and never re-derived from `additions + deletions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedFile {
    /// Current path, forward-slash separated.
    pub filename: String,
    /// File status.
    pub status: FileStatus,
    /// Number of added lines.
    pub additions: u32,
    /// Number of deleted lines.
    pub deletions: u32,
    /// Total changed lines as reported upstream.
    pub changes: u32,
    /// Unified diff body (hunks only, no file header).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
    /// Prior path if renamed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_filename: Option<String>,
    /// Link to the file blob at the head commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_url: Option<String>,
    /// Link to the raw file at the head commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
}

impl ChangedFile {
    /// Create a modified file with no patch.
    pub fn new(filename: impl Into<String>, status: FileStatus) -> Self {
        Self {
            filename: filename.into(),
            status,
            additions: 0,
            deletions: 0,
            changes: 0,
            patch: None,
            previous_filename: None,
            blob_url: None,
            raw_url: None,
        }
    }

    /// Attach a patch body.
    pub fn with_patch(mut self, patch: impl Into<String>) -> Self {
        self.patch = Some(patch.into());
        self
    }

    /// Set line statistics; `changes` becomes their sum.
    pub fn with_stats(mut self, additions: u32, deletions: u32) -> Self {
        self.additions = additions;
        self.deletions = deletions;
        self.changes = additions + deletions;
        self
    }

    /// Set the previous path (renames).
    pub fn with_previous_filename(mut self, previous: impl Into<String>) -> Self {
        self.previous_filename = Some(previous.into());
        self
    }

    /// Last path segment.
    pub fn basename(&self) -> &str {
        self.filename.rsplit('/').next().unwrap_or(&self.filename)
    }

    /// Whether the file was renamed to a different path.
    pub fn is_rename(&self) -> bool {
        self.previous_filename
            .as_deref()
            .is_some_and(|previous| previous != self.filename)
    }

    /// Header label, `old → new` for renames.
    pub fn display_name(&self) -> String {
        match self.previous_filename.as_deref() {
            Some(previous) if previous != self.filename => {
                format!("{} → {}", previous, self.filename)
            }
            _ => self.filename.clone(),
        }
    }
}

/// File status as reported by GitHub.
///
/// GitHub documents `copied`, `changed` and `unchanged` in addition to the four
/// statuses the dashboard distinguishes; those display like `modified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
}

impl FileStatus {
    /// Parse a status string, falling back to `Modified` for unknown values.
    pub fn from_api(status: &str) -> Self {
        match status {
            "added" => FileStatus::Added,
            "removed" => FileStatus::Removed,
            "renamed" => FileStatus::Renamed,
            "copied" => FileStatus::Copied,
            "changed" => FileStatus::Changed,
            "unchanged" => FileStatus::Unchanged,
            _ => FileStatus::Modified,
        }
    }

    /// Status icon shown in headers and the tree.
    pub fn icon(&self) -> &'static str {
        match self {
            FileStatus::Added => "+",
            FileStatus::Removed => "−",
            FileStatus::Renamed => "→",
            _ => "~",
        }
    }

    /// CSS class suffix.
    pub fn class_name(&self) -> &'static str {
        match self {
            FileStatus::Added => "file-status-added",
            FileStatus::Removed => "file-status-removed",
            FileStatus::Renamed => "file-status-renamed",
            _ => "file-status-modified",
        }
    }

    /// Message shown instead of a diff body when the file has no patch.
    pub fn missing_patch_message(&self) -> &'static str {
        match self {
            FileStatus::Added => "File added (binary or too large to display)",
            FileStatus::Removed => "File removed (binary or too large to display)",
            FileStatus::Renamed => "File renamed",
            _ => "No diff available",
        }
    }
}
