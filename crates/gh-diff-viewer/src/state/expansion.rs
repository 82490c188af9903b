//! File and directory expansion state.

use crate::model::ChangedFile;
use std::collections::{BTreeSet, HashSet};

/// Files with at least this many changed lines never auto-expand.
pub const AUTO_EXPAND_MAX_CHANGES: u32 = 500;

/// Pull requests with more files than this get the smaller cap.
pub const LARGE_PR_FILE_COUNT: usize = 50;

/// Auto-expand cap for large pull requests.
pub const LARGE_PR_AUTO_EXPAND_CAP: usize = 10;

/// Auto-expand cap otherwise.
pub const DEFAULT_AUTO_EXPAND_CAP: usize = 20;

/// Maximum number of files expanded on initial load.
pub fn auto_expand_cap(total_files: usize) -> usize {
    if total_files > LARGE_PR_FILE_COUNT {
        LARGE_PR_AUTO_EXPAND_CAP
    } else {
        DEFAULT_AUTO_EXPAND_CAP
    }
}

/// Indices of files to expand on initial load.
///
/// Walks the list in order and takes files below the change threshold
/// until the cap is reached.
pub fn auto_expand(files: &[ChangedFile]) -> BTreeSet<usize> {
    let cap = auto_expand_cap(files.len());
    files
        .iter()
        .enumerate()
        .filter(|(_, file)| file.changes < AUTO_EXPAND_MAX_CHANGES)
        .map(|(index, _)| index)
        .take(cap)
        .collect()
}

/// Which files are materialized and which tree directories are open.
///
/// The two sets are independent: collapsing a directory never collapses the
/// files inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    files: BTreeSet<usize>,
    directories: HashSet<String>,
}

impl ExpansionState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the auto-expand policy for `files`.
    pub fn with_auto_expand(files: &[ChangedFile]) -> Self {
        Self {
            files: auto_expand(files),
            directories: HashSet::new(),
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.files.contains(&index)
    }

    /// Expand a file. Returns `true` if it was collapsed before.
    pub fn expand(&mut self, index: usize) -> bool {
        self.files.insert(index)
    }

    /// Collapse a file. Returns `true` if it was expanded before.
    pub fn collapse(&mut self, index: usize) -> bool {
        self.files.remove(&index)
    }

    /// Flip a file. Returns the new state.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.collapse(index) {
            false
        } else {
            self.expand(index)
        }
    }

    /// Expand `0..total`. Returns the newly expanded indices.
    pub fn expand_all(&mut self, total: usize) -> Vec<usize> {
        (0..total).filter(|&i| self.files.insert(i)).collect()
    }

    pub fn collapse_all(&mut self) {
        self.files.clear();
    }

    /// Expanded file indices, ascending.
    pub fn expanded_files(&self) -> impl Iterator<Item = usize> + '_ {
        self.files.iter().copied()
    }

    pub fn expanded_count(&self) -> usize {
        self.files.len()
    }

    // === Directories ===

    /// Flip a directory. Returns the new state.
    pub fn toggle_dir(&mut self, path: &str) -> bool {
        if self.directories.remove(path) {
            false
        } else {
            self.directories.insert(path.to_string());
            true
        }
    }

    pub fn expand_dirs<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.directories.extend(paths);
    }

    pub fn collapse_all_dirs(&mut self) {
        self.directories.clear();
    }

    pub fn expanded_dirs(&self) -> &HashSet<String> {
        &self.directories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileStatus;

    fn files_with_changes(changes: &[u32]) -> Vec<ChangedFile> {
        changes
            .iter()
            .enumerate()
            .map(|(i, &c)| ChangedFile::new(format!("f{}.rs", i), FileStatus::Modified).with_stats(c, 0))
            .collect()
    }

    #[test]
    fn test_cap_depends_on_file_count() {
        assert_eq!(auto_expand_cap(1), 20);
        assert_eq!(auto_expand_cap(50), 20);
        assert_eq!(auto_expand_cap(51), 10);
    }

    #[test]
    fn test_auto_expand_respects_threshold_and_cap() {
        for total in [1usize, 5, 30, 50, 51, 200] {
            let changes: Vec<u32> = (0..total).map(|i| if i % 3 == 0 { 700 } else { 10 }).collect();
            let files = files_with_changes(&changes);
            let expanded = auto_expand(&files);

            assert!(expanded.len() <= total.min(auto_expand_cap(total)));
            for index in &expanded {
                assert!(files[*index].changes < AUTO_EXPAND_MAX_CHANGES);
            }
        }
    }

    #[test]
    fn test_auto_expand_takes_earliest_files() {
        let files = files_with_changes(&[10; 60]);
        let expanded: Vec<usize> = auto_expand(&files).into_iter().collect();
        assert_eq!(expanded, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let files = files_with_changes(&[499, 500, 501]);
        let expanded: Vec<usize> = auto_expand(&files).into_iter().collect();
        assert_eq!(expanded, vec![0]);
    }

    #[test]
    fn test_toggle_and_bulk_operations() {
        let mut state = ExpansionState::new();
        assert!(state.toggle(3));
        assert!(state.is_expanded(3));
        assert!(!state.toggle(3));
        assert!(!state.is_expanded(3));

        state.expand(1);
        assert_eq!(state.expand_all(4), vec![0, 2, 3]);
        assert_eq!(state.expanded_count(), 4);

        state.collapse_all();
        assert_eq!(state.expanded_count(), 0);
    }

    #[test]
    fn test_directories_are_independent_of_files() {
        let mut state = ExpansionState::new();
        state.expand(0);
        assert!(state.toggle_dir("src"));
        state.collapse_all_dirs();
        assert!(state.expanded_dirs().is_empty());
        assert!(state.is_expanded(0));

        state.expand_dirs(vec!["a".to_string(), "a/b".to_string()]);
        assert!(!state.toggle_dir("a/b"));
        assert!(state.expanded_dirs().contains("a"));
        assert!(!state.expanded_dirs().contains("a/b"));
    }
}
