//! Row layouts for unified and split display.

use crate::model::{Change, ChangeKind, Hunk, Token};
use serde::Serialize;

/// One line of the unified view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedRow {
    pub kind: ChangeKind,
    pub old_line: Option<u32>,
    pub new_line: Option<u32>,
    pub tokens: Vec<Token>,
}

/// One side of a split-view row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitCell {
    pub kind: ChangeKind,
    pub line: Option<u32>,
    pub tokens: Vec<Token>,
}

/// One row of the split view. Either side may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRow {
    pub old: Option<SplitCell>,
    pub new: Option<SplitCell>,
}

fn tokens_for(change: &Change, tokens: Option<&Vec<Token>>) -> Vec<Token> {
    match tokens {
        Some(tokens) => tokens.clone(),
        None => vec![Token::plain(change.content.clone())],
    }
}

/// Unified rows in patch order.
///
/// `tokens` is indexed like `hunk.changes`; when absent, every row carries a
/// single plain token.
pub fn unified_rows(hunk: &Hunk, tokens: Option<&[Vec<Token>]>) -> Vec<UnifiedRow> {
    hunk.changes
        .iter()
        .enumerate()
        .map(|(i, change)| UnifiedRow {
            kind: change.kind,
            old_line: change.old_line,
            new_line: change.new_line,
            tokens: tokens_for(change, tokens.and_then(|t| t.get(i))),
        })
        .collect()
}

/// Split rows using the zip pairing.
///
/// A run of deletions immediately followed by a run of insertions is paired
/// line by line; leftovers get a row with an empty opposite side. Normal
/// lines appear on both sides. The hunk itself is left untouched.
pub fn split_rows(hunk: &Hunk, tokens: Option<&[Vec<Token>]>) -> Vec<SplitRow> {
    let cell = |i: usize| -> SplitCell {
        let change = &hunk.changes[i];
        let line = match change.kind {
            ChangeKind::Insert => change.new_line,
            _ => change.old_line,
        };
        SplitCell {
            kind: change.kind,
            line,
            tokens: tokens_for(change, tokens.and_then(|t| t.get(i))),
        }
    };

    let changes = &hunk.changes;
    let mut rows = Vec::with_capacity(changes.len());
    let mut i = 0;

    while i < changes.len() {
        match changes[i].kind {
            ChangeKind::Normal => {
                let old = cell(i);
                let mut new = old.clone();
                new.line = changes[i].new_line;
                rows.push(SplitRow {
                    old: Some(old),
                    new: Some(new),
                });
                i += 1;
            }
            ChangeKind::Delete => {
                let deletes_start = i;
                while i < changes.len() && changes[i].kind == ChangeKind::Delete {
                    i += 1;
                }
                let inserts_start = i;
                while i < changes.len() && changes[i].kind == ChangeKind::Insert {
                    i += 1;
                }

                let deletes = inserts_start - deletes_start;
                let inserts = i - inserts_start;
                for k in 0..deletes.max(inserts) {
                    rows.push(SplitRow {
                        old: (k < deletes).then(|| cell(deletes_start + k)),
                        new: (k < inserts).then(|| cell(inserts_start + k)),
                    });
                }
            }
            ChangeKind::Insert => {
                rows.push(SplitRow {
                    old: None,
                    new: Some(cell(i)),
                });
                i += 1;
            }
        }
    }

    rows
}
