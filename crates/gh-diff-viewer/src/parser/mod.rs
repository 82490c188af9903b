//! Diff parsing.

mod unified;

pub use unified::{parse_changed_file, parse_patch, synthesize_header, ParseError};
