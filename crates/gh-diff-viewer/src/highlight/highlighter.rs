//! Syntax highlighter using syntect.

use super::Language;
use crate::model::{ChangeKind, Hunk, Token, TokenCategory, TokenizedHunks};
use std::sync::LazyLock;
use syntect::easy::ScopeRangeIterator;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use thiserror::Error;

/// Errors that can occur while tokenizing.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("No grammar available for {0}")]
    Unsupported(Language),
    #[error("Syntax parse failed: {0}")]
    Parse(String),
    #[error("Scope stack error: {0}")]
    Scope(String),
}

/// Attaches lexical tokens to parsed hunks.
pub trait Highlighter: Send + Sync {
    /// Whether this highlighter has a grammar for `language`.
    fn is_supported(&self, language: Language) -> bool;

    /// Tokenize every change of every hunk, indexed `[hunk][change]`.
    fn tokenize(&self, hunks: &[Hunk], language: Language)
        -> Result<TokenizedHunks, HighlightError>;
}

static SHARED: LazyLock<SyntectHighlighter> = LazyLock::new(SyntectHighlighter::new);

/// Highlighter backed by syntect, with the extended grammar set from two-face
/// (TypeScript, TSX and friends are missing from syntect's defaults).
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
}

impl std::fmt::Debug for SyntectHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntectHighlighter")
            .field("syntaxes", &self.syntax_set.syntaxes().len())
            .finish()
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectHighlighter {
    /// Load the extended syntax set.
    ///
    /// Loading takes a noticeable moment; prefer [`SyntectHighlighter::shared`].
    pub fn new() -> Self {
        Self::with_syntax_set(two_face::syntax::extra_newlines())
    }

    /// Use a caller-provided syntax set (must be built with newlines).
    pub fn with_syntax_set(syntax_set: SyntaxSet) -> Self {
        Self { syntax_set }
    }

    /// Process-wide instance, initialized on first use.
    pub fn shared() -> &'static SyntectHighlighter {
        &SHARED
    }

    fn syntax_for(&self, language: Language) -> Option<&SyntaxReference> {
        language
            .syntax_extension()
            .and_then(|ext| self.syntax_set.find_syntax_by_extension(ext))
    }

    /// Tokenize one side of the diff as a continuous source.
    fn tokenize_side(
        &self,
        syntax: &SyntaxReference,
        hunks: &[Hunk],
        side: Side,
        out: &mut TokenizedHunks,
    ) -> Result<(), HighlightError> {
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();

        for (h, hunk) in hunks.iter().enumerate() {
            for (c, change) in hunk.changes.iter().enumerate() {
                if !side.includes(change.kind) {
                    continue;
                }

                let line = format!("{}\n", change.content);
                let ops = state
                    .parse_line(&line, &self.syntax_set)
                    .map_err(|e| HighlightError::Parse(e.to_string()))?;

                let mut tokens: Vec<Token> = Vec::new();
                for (range, op) in ScopeRangeIterator::new(&ops, &line) {
                    stack
                        .apply(op)
                        .map_err(|e| HighlightError::Scope(format!("{:?}", e)))?;

                    let end = range.end.min(change.content.len());
                    if range.start >= end {
                        continue;
                    }
                    push_merged(&mut tokens, categorize(&stack), &line[range.start..end]);
                }

                if tokens.is_empty() {
                    tokens.push(Token::plain(""));
                }
                out[h][c] = tokens;
            }
        }

        Ok(())
    }
}

impl Highlighter for SyntectHighlighter {
    fn is_supported(&self, language: Language) -> bool {
        self.syntax_for(language).is_some()
    }

    fn tokenize(
        &self,
        hunks: &[Hunk],
        language: Language,
    ) -> Result<TokenizedHunks, HighlightError> {
        let syntax = self
            .syntax_for(language)
            .ok_or(HighlightError::Unsupported(language))?;

        let mut out = tokenize_plain(hunks);
        self.tokenize_side(syntax, hunks, Side::Old, &mut out)?;
        self.tokenize_side(syntax, hunks, Side::New, &mut out)?;
        Ok(out)
    }
}

/// Old side: normal + delete. New side: normal + insert.
#[derive(Debug, Clone, Copy)]
enum Side {
    Old,
    New,
}

impl Side {
    fn includes(self, kind: ChangeKind) -> bool {
        match self {
            Side::Old => kind != ChangeKind::Insert,
            Side::New => kind != ChangeKind::Delete,
        }
    }
}

/// One plain token per line.
pub fn tokenize_plain(hunks: &[Hunk]) -> TokenizedHunks {
    hunks
        .iter()
        .map(|hunk| {
            hunk.changes
                .iter()
                .map(|change| vec![Token::plain(change.content.clone())])
                .collect()
        })
        .collect()
}

/// Tokenize with `highlighter`, degrading to plain tokens for unsupported
/// languages or on failure.
pub fn tokenize_or_plain(
    highlighter: &dyn Highlighter,
    hunks: &[Hunk],
    language: Language,
) -> TokenizedHunks {
    if !highlighter.is_supported(language) {
        return tokenize_plain(hunks);
    }

    match highlighter.tokenize(hunks, language) {
        Ok(tokens) => tokens,
        Err(e) => {
            log::warn!("Tokenization failed for {}: {}", language, e);
            tokenize_plain(hunks)
        }
    }
}

fn push_merged(tokens: &mut Vec<Token>, category: TokenCategory, text: &str) {
    match tokens.last_mut() {
        Some(last) if last.category == category => last.text.push_str(text),
        _ => tokens.push(Token::new(category, text)),
    }
}

/// Map a scope stack to a token category.
///
/// Comments and strings win at any depth; otherwise the innermost scope
/// with a known prefix decides.
fn categorize(stack: &ScopeStack) -> TokenCategory {
    let scopes: Vec<String> = stack
        .as_slice()
        .iter()
        .map(|scope| scope.build_string())
        .collect();

    if scopes.iter().any(|s| s.starts_with("comment")) {
        return TokenCategory::Comment;
    }
    if scopes.iter().any(|s| s.starts_with("string")) {
        return TokenCategory::String;
    }

    scopes
        .iter()
        .rev()
        .find_map(|s| category_for_scope(s))
        .unwrap_or(TokenCategory::Plain)
}

fn category_for_scope(scope: &str) -> Option<TokenCategory> {
    const RULES: &[(&str, TokenCategory)] = &[
        ("constant.numeric", TokenCategory::Number),
        ("constant", TokenCategory::Constant),
        ("entity.name.function", TokenCategory::Function),
        ("support.function", TokenCategory::Function),
        ("variable.function", TokenCategory::Function),
        ("entity.name.type", TokenCategory::Type),
        ("entity.name.class", TokenCategory::Type),
        ("entity.name.struct", TokenCategory::Type),
        ("entity.name.enum", TokenCategory::Type),
        ("support.type", TokenCategory::Type),
        ("support.class", TokenCategory::Type),
        ("entity.name.tag", TokenCategory::Tag),
        ("entity.other.attribute-name", TokenCategory::Attribute),
        ("keyword.operator", TokenCategory::Operator),
        ("keyword", TokenCategory::Keyword),
        ("storage", TokenCategory::Keyword),
        ("punctuation", TokenCategory::Punctuation),
        ("variable", TokenCategory::Variable),
    ];

    RULES
        .iter()
        .find(|(prefix, _)| scope.starts_with(prefix))
        .map(|(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Change;

    fn hunk(changes: Vec<Change>) -> Hunk {
        let mut hunk = Hunk::new(1, 0, 1, 0);
        hunk.changes = changes;
        hunk
    }

    fn joined(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokens_partition_each_line() {
        let hunks = vec![hunk(vec![
            Change::normal("fn main() {", 1, 1),
            Change::delete("    let x = \"old\";", 2),
            Change::insert("    let x = 42;", 2),
            Change::normal("}", 3, 3),
        ])];

        let tokens = SyntectHighlighter::shared()
            .tokenize(&hunks, Language::Rust)
            .unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].len(), 4);
        for (change, line_tokens) in hunks[0].changes.iter().zip(&tokens[0]) {
            assert_eq!(joined(line_tokens), change.content);
        }
    }

    #[test]
    fn test_categories() {
        let hunks = vec![hunk(vec![
            Change::insert("// a comment", 1),
            Change::insert("fn main() {}", 2),
        ])];

        let tokens = SyntectHighlighter::shared()
            .tokenize(&hunks, Language::Rust)
            .unwrap();

        assert!(tokens[0][0]
            .iter()
            .all(|t| t.category == TokenCategory::Comment));
        assert!(tokens[0][1]
            .iter()
            .any(|t| t.category == TokenCategory::Keyword && t.text == "fn"));
    }

    #[test]
    fn test_multiline_state_carries_across_lines() {
        let hunks = vec![hunk(vec![
            Change::normal("/* start", 1, 1),
            Change::normal("middle", 2, 2),
            Change::normal("end */", 3, 3),
        ])];

        let tokens = SyntectHighlighter::shared()
            .tokenize(&hunks, Language::Rust)
            .unwrap();

        assert_eq!(tokens[0][1], vec![Token::new(TokenCategory::Comment, "middle")]);
    }

    #[test]
    fn test_plain_text_passthrough() {
        let hunks = vec![hunk(vec![Change::insert("anything at all", 1)])];
        let highlighter = SyntectHighlighter::shared();

        assert!(!highlighter.is_supported(Language::PlainText));
        assert!(highlighter.tokenize(&hunks, Language::PlainText).is_err());

        let tokens = tokenize_or_plain(highlighter, &hunks, Language::PlainText);
        assert_eq!(tokens, vec![vec![vec![Token::plain("anything at all")]]]);
    }

    #[test]
    fn test_supported_languages() {
        let highlighter = SyntectHighlighter::shared();
        assert!(highlighter.is_supported(Language::CSharp));
        assert!(highlighter.is_supported(Language::Rust));
        assert!(highlighter.is_supported(Language::Python));
        assert!(highlighter.is_supported(Language::Jsx));
        assert!(highlighter.is_supported(Language::TypeScript));
        assert!(highlighter.is_supported(Language::Tsx));
    }

    #[test]
    fn test_typescript_is_highlighted() {
        let hunks = vec![hunk(vec![Change::insert("const answer: number = 42; // ok", 1)])];
        let tokens = tokenize_or_plain(SyntectHighlighter::shared(), &hunks, Language::TypeScript);

        let line = &tokens[0][0];
        assert!(line.iter().any(|t| t.category == TokenCategory::Keyword));
        assert!(line.iter().any(|t| t.category == TokenCategory::Comment));
    }

    #[test]
    fn test_default_syntax_set_lacks_typescript() {
        let highlighter = SyntectHighlighter::with_syntax_set(SyntaxSet::load_defaults_newlines());
        assert!(!highlighter.is_supported(Language::TypeScript));
        assert!(highlighter.is_supported(Language::Rust));
    }

    #[test]
    fn test_failing_highlighter_degrades() {
        struct Broken;
        impl Highlighter for Broken {
            fn is_supported(&self, _: Language) -> bool {
                true
            }
            fn tokenize(&self, _: &[Hunk], _: Language) -> Result<TokenizedHunks, HighlightError> {
                Err(HighlightError::Parse("boom".into()))
            }
        }

        let hunks = vec![hunk(vec![Change::insert("x", 1)])];
        let tokens = tokenize_or_plain(&Broken, &hunks, Language::Rust);
        assert_eq!(tokens, vec![vec![vec![Token::plain("x")]]]);
    }

    #[test]
    fn test_empty_line_has_one_token() {
        let hunks = vec![hunk(vec![Change::normal("", 1, 1)])];
        let tokens = SyntectHighlighter::shared()
            .tokenize(&hunks, Language::Rust)
            .unwrap();
        assert_eq!(tokens[0][0], vec![Token::plain("")]);
    }
}
