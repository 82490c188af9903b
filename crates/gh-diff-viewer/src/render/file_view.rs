//! Per-file view model.

use super::rows::{split_rows, unified_rows, SplitRow, UnifiedRow};
use super::ViewType;
use crate::highlight::Language;
use crate::model::{
    ChangedFile, FileStatus, FlatTreeEntry, Hunk, ParsedDiff, Token, TokenizedHunks,
};
use serde::Serialize;

/// Header shown for every file, expanded or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHeader {
    pub index: usize,
    pub filename: String,
    pub previous_filename: Option<String>,
    pub display_name: String,
    pub status: FileStatus,
    pub status_icon: &'static str,
    pub status_class: &'static str,
    pub additions: u32,
    pub deletions: u32,
    pub language: Language,
    pub expanded: bool,
}

impl FileHeader {
    pub fn new(index: usize, file: &ChangedFile, expanded: bool) -> Self {
        Self {
            index,
            filename: file.filename.clone(),
            previous_filename: file.previous_filename.clone(),
            display_name: file.display_name(),
            status: file.status,
            status_icon: file.status.icon(),
            status_class: file.status.class_name(),
            additions: file.additions,
            deletions: file.deletions,
            language: Language::from_filename(&file.filename),
            expanded,
        }
    }
}

/// Rows of one hunk in the active layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HunkRows {
    Unified(Vec<UnifiedRow>),
    Split(Vec<SplitRow>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HunkView {
    pub header: String,
    pub layout: ViewType,
    pub rows: HunkRows,
}

impl HunkView {
    pub fn build(hunk: &Hunk, tokens: Option<&[Vec<Token>]>, layout: ViewType) -> Self {
        let rows = match layout {
            ViewType::Unified => HunkRows::Unified(unified_rows(hunk, tokens)),
            ViewType::Split => HunkRows::Split(split_rows(hunk, tokens)),
        };
        Self {
            header: hunk.header.clone(),
            layout,
            rows,
        }
    }
}

/// Diff body of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FileBody {
    /// Header only.
    Collapsed,
    /// No patch; a status-specific message instead.
    Placeholder { message: String },
    /// Patch could not be parsed; shown verbatim.
    Raw { patch: String },
    /// Parsed hunks. `highlighted` is false until tokenization has applied.
    Hunks {
        highlighted: bool,
        hunks: Vec<HunkView>,
    },
}

impl FileBody {
    pub fn placeholder(status: FileStatus) -> Self {
        FileBody::Placeholder {
            message: status.missing_patch_message().to_string(),
        }
    }

    pub fn from_parsed(
        parsed: &ParsedDiff,
        tokens: Option<&TokenizedHunks>,
        view_type: ViewType,
    ) -> Self {
        let hunks = parsed
            .hunks
            .iter()
            .enumerate()
            .map(|(i, hunk)| {
                let hunk_tokens = tokens.and_then(|t| t.get(i)).map(|t| t.as_slice());
                HunkView::build(hunk, hunk_tokens, view_type)
            })
            .collect();

        FileBody::Hunks {
            highlighted: tokens.is_some(),
            hunks,
        }
    }
}

/// Header plus body for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileView {
    pub header: FileHeader,
    pub body: FileBody,
}

/// Aggregate counts shown above the file list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffTotals {
    pub files: usize,
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
}

impl DiffTotals {
    pub fn from_files(files: &[ChangedFile]) -> Self {
        let additions: u64 = files.iter().map(|f| u64::from(f.additions)).sum();
        let deletions: u64 = files.iter().map(|f| u64::from(f.deletions)).sum();
        Self {
            files: files.len(),
            additions,
            deletions,
            changes: additions + deletions,
        }
    }
}

/// Complete viewer state as served to the browser.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerSnapshot {
    pub generation: u64,
    pub view_type: ViewType,
    pub totals: DiffTotals,
    pub tree: Vec<FlatTreeEntry>,
    pub files: Vec<FileView>,
}
