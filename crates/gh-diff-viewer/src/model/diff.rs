//! Parsed diff structures for a single file.

use serde::Serialize;

/// Structured result of parsing one file's patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDiff {
    /// Change type inferred from the (synthesized) file header.
    pub change_type: ChangeType,
    /// Old path (`None` for additions).
    pub old_path: Option<String>,
    /// New path (`None` for deletions).
    pub new_path: Option<String>,
    /// Hunks ordered by increasing old start.
    pub hunks: Vec<Hunk>,
}

impl ParsedDiff {
    /// Total number of changes across all hunks.
    pub fn change_count(&self) -> usize {
        self.hunks.iter().map(|h| h.changes.len()).sum()
    }
}

/// Change type derived from old/new header paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Add,
    Delete,
    Rename,
    Modify,
}

/// A contiguous region of changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    /// Header line (e.g., "@@ -10,5 +10,7 @@ fn example()").
    pub header: String,
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in old version.
    pub old_lines: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in new version.
    pub new_lines: u32,
    /// Changes in patch order.
    pub changes: Vec<Change>,
}

impl Hunk {
    /// Create a new hunk with the given header info.
    pub fn new(old_start: u32, old_lines: u32, new_start: u32, new_lines: u32) -> Self {
        Self {
            header: format!(
                "@@ -{},{} +{},{} @@",
                old_start, old_lines, new_start, new_lines
            ),
            old_start,
            old_lines,
            new_start,
            new_lines,
            changes: Vec::new(),
        }
    }

    /// Create a hunk with a function context in header.
    pub fn with_context(
        old_start: u32,
        old_lines: u32,
        new_start: u32,
        new_lines: u32,
        context: &str,
    ) -> Self {
        let mut hunk = Self::new(old_start, old_lines, new_start, new_lines);
        if !context.is_empty() {
            hunk.header = format!("{} {}", hunk.header, context);
        }
        hunk
    }

    /// Old range as `(start, count)`.
    pub fn old_range(&self) -> (u32, u32) {
        (self.old_start, self.old_lines)
    }

    /// New range as `(start, count)`.
    pub fn new_range(&self) -> (u32, u32) {
        (self.new_start, self.new_lines)
    }

    /// Number of changes that exist on the old side (normal + delete).
    pub fn old_side_len(&self) -> usize {
        self.changes.iter().filter(|c| c.kind != ChangeKind::Insert).count()
    }

    /// Number of changes that exist on the new side (normal + insert).
    pub fn new_side_len(&self) -> usize {
        self.changes.iter().filter(|c| c.kind != ChangeKind::Delete).count()
    }
}

/// A single line within a hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// Line type.
    pub kind: ChangeKind,
    /// Line content (without leading +/-/ ).
    pub content: String,
    /// Line number in old file (normal and delete).
    pub old_line: Option<u32>,
    /// Line number in new file (normal and insert).
    pub new_line: Option<u32>,
}

impl Change {
    /// Create an unchanged line.
    pub fn normal(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: ChangeKind::Normal,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create an inserted line.
    pub fn insert(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: ChangeKind::Insert,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a deleted line.
    pub fn delete(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: ChangeKind::Delete,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Unchanged line (context).
    Normal,
    /// Added line (+).
    Insert,
    /// Removed line (-).
    Delete,
}

impl ChangeKind {
    /// Get the prefix character for this line type.
    pub fn prefix(&self) -> char {
        match self {
            ChangeKind::Normal => ' ',
            ChangeKind::Insert => '+',
            ChangeKind::Delete => '-',
        }
    }
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Plain,
    Comment,
    String,
    Keyword,
    Number,
    Constant,
    Function,
    Type,
    Tag,
    Attribute,
    Operator,
    Punctuation,
    Variable,
}

/// A categorized sub-span of a line's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Category label.
    pub category: TokenCategory,
    /// Covered text.
    pub text: String,
}

impl Token {
    /// Create a plain token.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            category: TokenCategory::Plain,
            text: text.into(),
        }
    }

    /// Create a token of the given category.
    pub fn new(category: TokenCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// Tokens for a parsed file, indexed `[hunk][change]`.
pub type TokenizedHunks = Vec<Vec<Vec<Token>>>;
