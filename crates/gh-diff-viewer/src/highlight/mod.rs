//! Language resolution and syntax tokenization.

mod highlighter;
mod languages;

pub use highlighter::{
    tokenize_or_plain, tokenize_plain, HighlightError, Highlighter, SyntectHighlighter,
};
pub use languages::Language;
