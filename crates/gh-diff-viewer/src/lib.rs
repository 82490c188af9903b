//! # gh-diff-viewer
//!
//! Turns a pull request's changed-file list into a browsable, incrementally
//! rendered view: a directory tree, per-file expansion, unified and
//! split layouts, and syntax-highlighted hunks.
//!
//! ## Design Principles
//!
//! This crate is **instrumented**: it receives data and emits events without
//! calling external APIs. The orchestrating application fetches the file list
//! (optionally through the `github` feature's conversions) and hands it over.
//!
//! ## Action-Based Architecture
//!
//! The orchestrator maps user input to [`DiffAction`] variants and dispatches
//! them to [`DiffViewerState`], which answers with [`DiffEvent`]s.
//!
//! Rendering is two-phase. A file shows plain text as soon as it is expanded;
//! highlighting is queued as a deferred task and picked up by
//! [`DiffViewerState::run_deferred`]. Loading a new file list cancels the
//! pending work of files that are gone.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gh_diff_viewer::{ChangedFile, DiffAction, DiffViewerState, FileStatus};
//!
//! let mut state = DiffViewerState::new();
//! state.load_files(vec![
//!     ChangedFile::new("src/lib.rs", FileStatus::Modified).with_patch("@@ -1 +1 @@\n-a\n+b"),
//! ]);
//!
//! // Plain rows are available immediately, highlighted ones after this
//! state.run_deferred();
//!
//! let events = state.handle_action(DiffAction::CollapseAllFiles);
//! let snapshot = state.snapshot();
//! ```

pub mod action;
pub mod event;
#[cfg(feature = "github")]
pub mod github;
pub mod highlight;
pub mod model;
pub mod parser;
pub mod render;
pub mod state;

// Re-export commonly used types
pub use action::DiffAction;
pub use event::DiffEvent;
pub use highlight::{Highlighter, Language, SyntectHighlighter};
pub use model::{
    build_file_tree, ChangeKind, ChangedFile, DirectoryNode, FileStatus, FlatTreeEntry, Hunk,
    ParsedDiff, Token, TokenCategory,
};
pub use parser::{parse_changed_file, parse_patch, ParseError};
pub use render::{FileView, ViewType, ViewerSnapshot};
pub use state::DiffViewerState;
