//! Syntax highlighting module
//!
//! Provides tree-sitter based tokenization of code-block text:
//! - Language resolution from code-block identifiers
//! - Per-line parsing into classified tokens
//!
//! ## Architecture
//!
//! ```text
//! raw text ─split('\n')→ line ─tree-sitter parse→ captures ─flatten→ Vec<Token>
//! ```
//!
//! Each line is tokenized independently; a line's tokens are always rebuilt
//! from its full text rather than patched.

mod highlights;
mod languages;
mod tokenizer;

pub use highlights::{lines_to_text, Line, Token, TokenClass};
pub use languages::LanguageId;
pub use tokenizer::{tokenize, tokenize_line, Tokenizer};
