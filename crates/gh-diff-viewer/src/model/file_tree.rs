//! Directory tree reconstructed from a flat changed-file list.

use super::{ChangedFile, FileStatus};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// A file leaf living directly in a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeFile {
    /// Position in the original flat file list.
    pub index: usize,
    /// Full path.
    pub filename: String,
    /// Last path segment.
    pub name: String,
    /// File status.
    pub status: FileStatus,
    /// Number of additions.
    pub additions: u32,
    /// Number of deletions.
    pub deletions: u32,
}

/// Directory node. The root has an empty name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Path segment.
    pub name: String,
    /// Sub-directories keyed (and ordered) by segment name.
    pub children: BTreeMap<String, DirectoryNode>,
    /// Files directly in this directory, ordered by full filename.
    pub files: Vec<TreeFile>,
}

/// Build the directory tree for a flat file list.
///
/// Pure: the same input always yields the same tree. Callers rebuild the
/// tree wholesale whenever the list changes.
pub fn build_file_tree(files: &[ChangedFile]) -> DirectoryNode {
    DirectoryNode::from_files(files)
}

impl DirectoryNode {
    /// Create an empty directory node.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: BTreeMap::new(),
            files: Vec::new(),
        }
    }

    /// Build a tree from a flat list of changed files.
    pub fn from_files(files: &[ChangedFile]) -> Self {
        let mut root = DirectoryNode::directory("");

        for (index, file) in files.iter().enumerate() {
            let parts: Vec<&str> = file.filename.split('/').collect();
            let (leaf, dirs) = match parts.split_last() {
                Some(split) => split,
                None => continue,
            };

            let mut current = &mut root;
            for dir in dirs {
                current = current
                    .children
                    .entry((*dir).to_string())
                    .or_insert_with(|| DirectoryNode::directory(*dir));
            }

            current.files.push(TreeFile {
                index,
                filename: file.filename.clone(),
                name: (*leaf).to_string(),
                status: file.status,
                additions: file.additions,
                deletions: file.deletions,
            });
        }

        root.sort_files_recursive();
        root
    }

    fn sort_files_recursive(&mut self) {
        self.files
            .sort_by(|a, b| a.filename.cmp(&b.filename).then(a.index.cmp(&b.index)));
        for child in self.children.values_mut() {
            child.sort_files_recursive();
        }
    }

    /// Number of files in this directory and all descendants.
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .children
                .values()
                .map(DirectoryNode::file_count)
                .sum::<usize>()
    }

    /// Look up a descendant directory by its slash-joined path.
    pub fn find_directory(&self, path: &str) -> Option<&DirectoryNode> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('/')
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    /// Slash-joined paths of every directory below this node.
    pub fn directory_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_directory_paths("", &mut paths);
        paths
    }

    fn collect_directory_paths(&self, base: &str, paths: &mut Vec<String>) {
        for (name, child) in &self.children {
            let path = join_path(base, name);
            child.collect_directory_paths(&path, paths);
            paths.push(path);
        }
    }

    /// Flatten the tree for rendering, descending only into expanded directories.
    pub fn flatten(&self, expanded_dirs: &HashSet<String>) -> Vec<FlatTreeEntry> {
        let mut result = Vec::new();
        self.flatten_recursive("", 0, expanded_dirs, &[], &mut result);
        result
    }

    fn flatten_recursive(
        &self,
        base: &str,
        depth: usize,
        expanded_dirs: &HashSet<String>,
        ancestor_has_next: &[bool],
        result: &mut Vec<FlatTreeEntry>,
    ) {
        let total = self.children.len() + self.files.len();

        for (i, (name, child)) in self.children.iter().enumerate() {
            let is_last = i + 1 == total;
            let path = join_path(base, name);
            let is_expanded = expanded_dirs.contains(&path);

            result.push(FlatTreeEntry {
                depth,
                name: name.clone(),
                path: path.clone(),
                is_dir: true,
                is_expanded,
                file_count: child.file_count(),
                index: None,
                status: None,
                additions: 0,
                deletions: 0,
                is_last,
                ancestor_has_next: ancestor_has_next.to_vec(),
            });

            if is_expanded {
                let mut child_ancestors = ancestor_has_next.to_vec();
                if depth > 0 {
                    child_ancestors.push(!is_last);
                }
                child.flatten_recursive(&path, depth + 1, expanded_dirs, &child_ancestors, result);
            }
        }

        for (i, file) in self.files.iter().enumerate() {
            result.push(FlatTreeEntry {
                depth,
                name: file.name.clone(),
                path: file.filename.clone(),
                is_dir: false,
                is_expanded: false,
                file_count: 1,
                index: Some(file.index),
                status: Some(file.status),
                additions: file.additions,
                deletions: file.deletions,
                is_last: self.children.len() + i + 1 == total,
                ancestor_has_next: ancestor_has_next.to_vec(),
            });
        }
    }
}

fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base, name)
    }
}

/// A flattened tree entry for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatTreeEntry {
    /// Nesting depth (0 = top level).
    pub depth: usize,
    /// Display name (file or directory name).
    pub name: String,
    /// Directory path from root, or the file's full filename.
    pub path: String,
    /// Whether this is a directory.
    pub is_dir: bool,
    /// Whether this directory is expanded.
    pub is_expanded: bool,
    /// Aggregate file count (1 for files).
    pub file_count: usize,
    /// Flat-list index (files only).
    pub index: Option<usize>,
    /// File status (files only).
    pub status: Option<FileStatus>,
    /// Number of additions (files only).
    pub additions: u32,
    /// Number of deletions (files only).
    pub deletions: u32,
    /// Whether this is the last item in its parent.
    pub is_last: bool,
    /// For each ancestor level, whether that ancestor has more siblings below.
    pub ancestor_has_next: Vec<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> ChangedFile {
        ChangedFile::new(path, FileStatus::Modified).with_stats(1, 1)
    }

    fn all_expanded(tree: &DirectoryNode) -> HashSet<String> {
        tree.directory_paths().into_iter().collect()
    }

    #[test]
    fn test_one_leaf_per_file_and_root_count() {
        let files = vec![
            file("src/main.rs"),
            file("src/lib.rs"),
            file("src/model/diff.rs"),
            file("tests/test.rs"),
            file("Cargo.toml"),
        ];

        let tree = build_file_tree(&files);
        assert_eq!(tree.name, "");
        assert_eq!(tree.file_count(), files.len());

        let mut indices: Vec<usize> = tree
            .flatten(&all_expanded(&tree))
            .into_iter()
            .filter_map(|e| e.index)
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_ordering_is_independent_of_input_order() {
        let forward = vec![file("b/z.rs"), file("a/y.rs"), file("b/a.rs"), file("a/x.rs")];
        let mut reversed = forward.clone();
        reversed.reverse();

        let names = |files: &[ChangedFile]| -> Vec<String> {
            let tree = build_file_tree(files);
            tree.flatten(&all_expanded(&tree))
                .into_iter()
                .map(|e| e.path)
                .collect()
        };

        let expected = vec!["a", "a/x.rs", "a/y.rs", "b", "b/a.rs", "b/z.rs"];
        assert_eq!(names(&forward), expected);
        assert_eq!(names(&reversed), expected);
    }

    #[test]
    fn test_files_keep_original_index() {
        let files = vec![file("a/c.py"), file("a/b.cs")];
        let tree = build_file_tree(&files);
        let dir = tree.find_directory("a").unwrap();
        assert_eq!(dir.files[0].filename, "a/b.cs");
        assert_eq!(dir.files[0].index, 1);
        assert_eq!(dir.files[1].index, 0);
    }

    #[test]
    fn test_aggregate_counts() {
        let files = vec![
            file("src/a.rs"),
            file("src/model/b.rs"),
            file("src/model/deep/c.rs"),
            file("README.md"),
        ];
        let tree = build_file_tree(&files);
        assert_eq!(tree.find_directory("src").unwrap().file_count(), 3);
        assert_eq!(tree.find_directory("src/model").unwrap().file_count(), 2);
        assert_eq!(tree.find_directory("src/model/deep").unwrap().file_count(), 1);
        assert!(tree.find_directory("missing").is_none());
        assert_eq!(tree.file_count(), 4);
    }

    #[test]
    fn test_collapsed_directories_hide_children() {
        let files = vec![file("src/main.rs"), file("src/lib.rs"), file("Cargo.toml")];
        let tree = build_file_tree(&files);

        let collapsed = tree.flatten(&HashSet::new());
        assert_eq!(collapsed.len(), 2); // src/, Cargo.toml
        assert!(collapsed[0].is_dir);
        assert_eq!(collapsed[0].file_count, 2);
        assert!(!collapsed[0].is_expanded);

        let expanded = tree.flatten(&all_expanded(&tree));
        assert_eq!(expanded.len(), 4);
        assert_eq!(expanded[1].name, "lib.rs");
        assert_eq!(expanded[1].depth, 1);
    }

    #[test]
    fn test_directory_paths() {
        let files = vec![file("a/b/c.rs"), file("a/d.rs"), file("e/f.rs")];
        let tree = build_file_tree(&files);
        let mut paths = tree.directory_paths();
        paths.sort();
        assert_eq!(paths, vec!["a", "a/b", "e"]);
    }

    #[test]
    fn test_guide_line_flags() {
        let files = vec![file("src/utils/mod.rs"), file("src/lib.rs"), file("z.rs")];
        let tree = build_file_tree(&files);
        let flat = tree.flatten(&all_expanded(&tree));

        let flags: Vec<(&str, bool, Vec<bool>)> = flat
            .iter()
            .map(|e| (e.path.as_str(), e.is_last, e.ancestor_has_next.clone()))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("src", false, vec![]),
                ("src/utils", false, vec![]),
                ("src/utils/mod.rs", true, vec![true]),
                ("src/lib.rs", true, vec![]),
                ("z.rs", true, vec![]),
            ]
        );
    }
}
