//! Data models for diff representation.

mod changed_file;
mod diff;
mod file_tree;

pub use changed_file::{ChangedFile, FileStatus};
pub use diff::{
    Change, ChangeKind, ChangeType, Hunk, ParsedDiff, Token, TokenCategory, TokenizedHunks,
};
pub use file_tree::{build_file_tree, DirectoryNode, FlatTreeEntry, TreeFile};
