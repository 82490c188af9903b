//! Diff Viewer Actions
//!
//! Tagged actions that the diff viewer can process. The hosting application
//! maps clicks (or keys) to these and dispatches them to the viewer state.

use crate::render::ViewType;

/// Actions that can be performed on the diff viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffAction {
    // === Files ===
    /// Flip one file between expanded and collapsed
    ToggleFile(usize),
    /// Expand one file
    ExpandFile(usize),
    /// Collapse one file
    CollapseFile(usize),
    /// Expand every file, regardless of tree visibility
    ExpandAllFiles,
    /// Collapse every file
    CollapseAllFiles,
    /// Select a file from the tree: expand it, then scroll to it
    SelectFile(usize),

    // === File Tree ===
    /// Flip a directory by its slash-joined path
    ToggleDirectory(String),
    /// Open every directory
    ExpandAllDirectories,
    /// Close every directory
    CollapseAllDirectories,

    // === Layout ===
    /// Switch between split and unified rows
    SetViewType(ViewType),
}

impl DiffAction {
    /// Check if this action changes file expansion
    pub fn affects_files(&self) -> bool {
        matches!(
            self,
            DiffAction::ToggleFile(_)
                | DiffAction::ExpandFile(_)
                | DiffAction::CollapseFile(_)
                | DiffAction::ExpandAllFiles
                | DiffAction::CollapseAllFiles
                | DiffAction::SelectFile(_)
        )
    }

    /// Check if this action only touches the file tree
    pub fn is_tree_action(&self) -> bool {
        matches!(
            self,
            DiffAction::ToggleDirectory(_)
                | DiffAction::ExpandAllDirectories
                | DiffAction::CollapseAllDirectories
        )
    }
}
