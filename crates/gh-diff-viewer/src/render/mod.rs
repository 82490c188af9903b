//! View models produced by the controller.

mod file_view;
mod rows;

pub use file_view::{DiffTotals, FileBody, FileHeader, FileView, HunkRows, HunkView, ViewerSnapshot};
pub use rows::{split_rows, unified_rows, SplitCell, SplitRow, UnifiedRow};

use serde::{Deserialize, Serialize};

/// Diff layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Split,
    Unified,
}

impl ViewType {
    /// Parse a query value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "split" => Some(ViewType::Split),
            "unified" => Some(ViewType::Unified),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewType::Split => ViewType::Unified,
            ViewType::Unified => ViewType::Split,
        }
    }
}
