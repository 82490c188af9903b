//! Parse per-file unified diff bodies (as returned by the GitHub files API).
//!
//! GitHub delivers each file's patch without the `diff --git`/`---`/`+++`
//! header, so a minimal header is synthesized from the file metadata before
//! handing the text to `unidiff`.

use crate::model::{
    Change, ChangeKind, ChangeType, ChangedFile, FileStatus, Hunk, ParsedDiff,
};
use thiserror::Error;
use unidiff::{Hunk as UnidiffHunk, Line as UnidiffLine, PatchSet, PatchedFile};

const DEV_NULL: &str = "/dev/null";

/// Errors that can occur during patch parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Failed to parse diff: {0}")]
    ParseFailed(String),
    #[error("Expected exactly one file in patch, found {0}")]
    FileCount(usize),
    #[error(
        "Hunk {index} body does not match its header: expected -{expected_old}/+{expected_new}, found -{actual_old}/+{actual_new}"
    )]
    CountMismatch {
        index: usize,
        expected_old: usize,
        expected_new: usize,
        actual_old: usize,
        actual_new: usize,
    },
    #[error("Hunk {0} starts before the previous hunk")]
    OutOfOrder(usize),
}

/// Build the `diff --git`/`---`/`+++` header GitHub strips from file patches.
///
/// The old side uses `previous_filename` when present. Added files get
/// `/dev/null` as the old side and removed files as the new side.
pub fn synthesize_header(
    filename: &str,
    previous_filename: Option<&str>,
    status: FileStatus,
) -> String {
    let old_name = previous_filename.unwrap_or(filename);
    let old_side = match status {
        FileStatus::Added => DEV_NULL.to_string(),
        _ => format!("a/{}", old_name),
    };
    let new_side = match status {
        FileStatus::Removed => DEV_NULL.to_string(),
        _ => format!("b/{}", filename),
    };

    format!(
        "diff --git a/{} b/{}\n--- {}\n+++ {}\n",
        old_name, filename, old_side, new_side
    )
}

/// Parse one file's patch body into a [`ParsedDiff`].
pub fn parse_patch(
    patch: &str,
    filename: &str,
    previous_filename: Option<&str>,
    status: FileStatus,
) -> Result<ParsedDiff, ParseError> {
    let mut text = synthesize_header(filename, previous_filename, status);
    for line in patch.trim_end_matches('\n').split('\n') {
        // "\ No newline at end of file" carries no content
        if line.starts_with('\\') {
            continue;
        }
        text.push_str(line.strip_suffix('\r').unwrap_or(line));
        text.push('\n');
    }

    let mut patch_set = PatchSet::new();
    patch_set
        .parse(&text)
        .map_err(|e| ParseError::ParseFailed(e.to_string()))?;

    let files = patch_set.files();
    if files.len() != 1 {
        return Err(ParseError::FileCount(files.len()));
    }

    parse_patched_file(&files[0])
}

/// Parse the patch carried by a [`ChangedFile`], if any.
///
/// Returns `None` when the file has no (or an empty) patch.
pub fn parse_changed_file(file: &ChangedFile) -> Option<Result<ParsedDiff, ParseError>> {
    let patch = file.patch.as_deref().filter(|p| !p.is_empty())?;
    Some(parse_patch(
        patch,
        &file.filename,
        file.previous_filename.as_deref(),
        file.status,
    ))
}

fn parse_patched_file(file: &PatchedFile) -> Result<ParsedDiff, ParseError> {
    let source = clean_path(&file.source_file);
    let target = clean_path(&file.target_file);

    let change_type = determine_change_type(&source, &target);
    let old_path = (source != DEV_NULL && !source.is_empty()).then(|| source.clone());
    let new_path = (target != DEV_NULL && !target.is_empty()).then(|| target.clone());

    let mut hunks: Vec<Hunk> = Vec::new();
    for (index, hunk) in file.hunks().iter().enumerate() {
        let parsed = parse_hunk(index, hunk)?;
        if let Some(prev) = hunks.last() {
            if parsed.old_start <= prev.old_start {
                return Err(ParseError::OutOfOrder(index));
            }
        }
        hunks.push(parsed);
    }

    Ok(ParsedDiff {
        change_type,
        old_path,
        new_path,
        hunks,
    })
}

fn parse_hunk(index: usize, hunk: &UnidiffHunk) -> Result<Hunk, ParseError> {
    let mut parsed = Hunk::with_context(
        hunk.source_start as u32,
        hunk.source_length as u32,
        hunk.target_start as u32,
        hunk.target_length as u32,
        hunk.section_header.trim(),
    );

    parsed.changes = hunk.lines().iter().filter_map(parse_line).collect();

    let actual_old = parsed.old_side_len();
    let actual_new = parsed.new_side_len();
    if actual_old != hunk.source_length || actual_new != hunk.target_length {
        return Err(ParseError::CountMismatch {
            index,
            expected_old: hunk.source_length,
            expected_new: hunk.target_length,
            actual_old,
            actual_new,
        });
    }

    Ok(parsed)
}

fn parse_line(line: &UnidiffLine) -> Option<Change> {
    let kind = match line.line_type.as_str() {
        " " => ChangeKind::Normal,
        "+" => ChangeKind::Insert,
        "-" => ChangeKind::Delete,
        // "\ No newline at end of file"
        _ => return None,
    };

    Some(Change {
        kind,
        content: line.value.clone(),
        old_line: line.source_line_no.map(|n| n as u32),
        new_line: line.target_line_no.map(|n| n as u32),
    })
}

fn determine_change_type(source: &str, target: &str) -> ChangeType {
    if source == DEV_NULL || source.is_empty() {
        ChangeType::Add
    } else if target == DEV_NULL || target.is_empty() {
        ChangeType::Delete
    } else if source != target {
        ChangeType::Rename
    } else {
        ChangeType::Modify
    }
}

/// Clean the path by removing a/b prefixes from git diff output.
fn clean_path(path: &str) -> String {
    let path = path.trim();

    if let Some(stripped) = path.strip_prefix("a/") {
        return stripped.to_string();
    }
    if let Some(stripped) = path.strip_prefix("b/") {
        return stripped.to_string();
    }

    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MODIFIED_PATCH: &str = "@@ -10,3 +10,4 @@ fn main()\n     let a = 1;\n-    let b = 2;\n+    let b = 3;\n+    let c = 4;\n     a + b";

    #[test]
    fn test_synthesize_header() {
        assert_eq!(
            synthesize_header("src/lib.rs", None, FileStatus::Modified),
            "diff --git a/src/lib.rs b/src/lib.rs\n--- a/src/lib.rs\n+++ b/src/lib.rs\n"
        );
        assert_eq!(
            synthesize_header("new.rs", None, FileStatus::Added),
            "diff --git a/new.rs b/new.rs\n--- /dev/null\n+++ b/new.rs\n"
        );
        assert_eq!(
            synthesize_header("gone.rs", None, FileStatus::Removed),
            "diff --git a/gone.rs b/gone.rs\n--- a/gone.rs\n+++ /dev/null\n"
        );
        assert_eq!(
            synthesize_header("new_name.rs", Some("old_name.rs"), FileStatus::Renamed),
            "diff --git a/old_name.rs b/new_name.rs\n--- a/old_name.rs\n+++ b/new_name.rs\n"
        );
    }

    #[test]
    fn test_hunk_ranges_and_change_count() {
        let diff = parse_patch(MODIFIED_PATCH, "src/main.rs", None, FileStatus::Modified).unwrap();

        assert_eq!(diff.change_type, ChangeType::Modify);
        assert_eq!(diff.hunks.len(), 1);

        let hunk = &diff.hunks[0];
        assert_eq!(hunk.old_range(), (10, 3));
        assert_eq!(hunk.new_range(), (10, 4));
        // 3 + 4 - 2 shared context lines
        assert_eq!(hunk.changes.len(), 5);
        assert_eq!(hunk.header, "@@ -10,3 +10,4 @@ fn main()");

        let kinds: Vec<ChangeKind> = hunk.changes.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Normal,
                ChangeKind::Delete,
                ChangeKind::Insert,
                ChangeKind::Insert,
                ChangeKind::Normal,
            ]
        );
    }

    #[test]
    fn test_line_numbers() {
        let diff = parse_patch(MODIFIED_PATCH, "src/main.rs", None, FileStatus::Modified).unwrap();
        let changes = &diff.hunks[0].changes;

        assert_eq!(changes[0].old_line, Some(10));
        assert_eq!(changes[0].new_line, Some(10));
        assert_eq!(changes[1].old_line, Some(11));
        assert_eq!(changes[1].new_line, None);
        assert_eq!(changes[2].old_line, None);
        assert_eq!(changes[2].new_line, Some(11));
        assert_eq!(changes[4].old_line, Some(12));
        assert_eq!(changes[4].new_line, Some(13));
        assert_eq!(changes[1].content, "    let b = 2;");
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let first = parse_patch(MODIFIED_PATCH, "src/main.rs", None, FileStatus::Modified).unwrap();
        let second = parse_patch(MODIFIED_PATCH, "src/main.rs", None, FileStatus::Modified).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_added_file() {
        let patch = "@@ -0,0 +1,3 @@\n+fn new_function() {\n+    // new code\n+}";
        let diff = parse_patch(patch, "new_file.rs", None, FileStatus::Added).unwrap();
        assert_eq!(diff.change_type, ChangeType::Add);
        assert_eq!(diff.old_path, None);
        assert_eq!(diff.new_path.as_deref(), Some("new_file.rs"));
        assert_eq!(diff.change_count(), 3);
    }

    #[test]
    fn test_removed_file() {
        let patch = "@@ -1,2 +0,0 @@\n-fn old() {\n-}";
        let diff = parse_patch(patch, "old_file.rs", None, FileStatus::Removed).unwrap();
        assert_eq!(diff.change_type, ChangeType::Delete);
        assert_eq!(diff.new_path, None);
        assert_eq!(diff.change_count(), 2);
    }

    #[test]
    fn test_renamed_file() {
        let patch = "@@ -1,3 +1,3 @@\n fn example() {\n-    // old\n+    // new\n }";
        let diff = parse_patch(patch, "new_name.rs", Some("old_name.rs"), FileStatus::Renamed)
            .unwrap();
        assert_eq!(diff.change_type, ChangeType::Rename);
        assert_eq!(diff.old_path.as_deref(), Some("old_name.rs"));
        assert_eq!(diff.new_path.as_deref(), Some("new_name.rs"));
    }

    #[test]
    fn test_multiple_hunks_in_order() {
        let patch = "@@ -1,2 +1,2 @@\n-a\n+b\n c\n@@ -20,1 +20,2 @@\n x\n+y";
        let diff = parse_patch(patch, "f.txt", None, FileStatus::Modified).unwrap();
        assert_eq!(diff.hunks.len(), 2);
        assert!(diff.hunks[0].old_start < diff.hunks[1].old_start);
    }

    #[test]
    fn test_no_newline_marker_is_dropped() {
        let patch = "@@ -1 +1 @@\n-old\n\\ No newline at end of file\n+new\n\\ No newline at end of file";
        let diff = parse_patch(patch, "f.txt", None, FileStatus::Modified).unwrap();
        let hunk = &diff.hunks[0];
        assert_eq!(hunk.changes.len(), 2);
        assert_eq!(hunk.changes[0].kind, ChangeKind::Delete);
        assert_eq!(hunk.changes[1].kind, ChangeKind::Insert);
    }

    #[test]
    fn test_garbage_is_unparseable_not_a_panic() {
        let result = parse_patch("this is not a diff", "f.txt", None, FileStatus::Modified);
        assert!(result.is_err() || result.unwrap().hunks.is_empty());
    }

    #[test]
    fn test_changed_file_without_patch() {
        let file = ChangedFile::new("image.png", FileStatus::Added);
        assert!(parse_changed_file(&file).is_none());

        let file = ChangedFile::new("empty.txt", FileStatus::Modified).with_patch("");
        assert!(parse_changed_file(&file).is_none());

        let file = ChangedFile::new("src/main.rs", FileStatus::Modified).with_patch(MODIFIED_PATCH);
        assert!(matches!(parse_changed_file(&file), Some(Ok(_))));
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("a/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("b/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("/dev/null"), "/dev/null");
    }
}
