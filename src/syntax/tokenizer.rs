//! Per-line tree-sitter tokenizer
//!
//! Every line is parsed on its own and its highlight captures are flattened
//! into a gap-free sequence of tokens. Lexer state never crosses a line
//! break, so constructs spanning lines (block comments, multi-line strings)
//! are classified line by line.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Parser, Query, QueryCursor, Tree};

use super::highlights::{Line, Token, TokenClass};
use super::languages::LanguageId;

// Grammars that ship their highlight queries
const RUST_HIGHLIGHTS: &str = tree_sitter_rust::HIGHLIGHTS_QUERY;
const PYTHON_HIGHLIGHTS: &str = tree_sitter_python::HIGHLIGHTS_QUERY;
const GO_HIGHLIGHTS: &str = tree_sitter_go::HIGHLIGHTS_QUERY;
const C_HIGHLIGHTS: &str = tree_sitter_c::HIGHLIGHT_QUERY;
const CPP_HIGHLIGHTS: &str = tree_sitter_cpp::HIGHLIGHT_QUERY;
const JAVA_HIGHLIGHTS: &str = tree_sitter_java::HIGHLIGHTS_QUERY;
const BASH_HIGHLIGHTS: &str = tree_sitter_bash::HIGHLIGHT_QUERY;
const HTML_HIGHLIGHTS: &str = tree_sitter_html::HIGHLIGHTS_QUERY;
const CSS_HIGHLIGHTS: &str = tree_sitter_css::HIGHLIGHTS_QUERY;

// Embedded query files
const JAVASCRIPT_HIGHLIGHTS: &str = include_str!("../../queries/javascript/highlights.scm");

/// Grammar and highlight query for a language, `None` for plain text
fn grammar(lang: LanguageId) -> Option<(Language, &'static str)> {
    let grammar = match lang {
        LanguageId::Rust => (tree_sitter_rust::LANGUAGE.into(), RUST_HIGHLIGHTS),
        LanguageId::JavaScript => (
            tree_sitter_javascript::LANGUAGE.into(),
            JAVASCRIPT_HIGHLIGHTS,
        ),
        LanguageId::Python => (tree_sitter_python::LANGUAGE.into(), PYTHON_HIGHLIGHTS),
        LanguageId::Go => (tree_sitter_go::LANGUAGE.into(), GO_HIGHLIGHTS),
        LanguageId::C => (tree_sitter_c::LANGUAGE.into(), C_HIGHLIGHTS),
        LanguageId::Cpp => (tree_sitter_cpp::LANGUAGE.into(), CPP_HIGHLIGHTS),
        LanguageId::Java => (tree_sitter_java::LANGUAGE.into(), JAVA_HIGHLIGHTS),
        LanguageId::Bash => (tree_sitter_bash::LANGUAGE.into(), BASH_HIGHLIGHTS),
        LanguageId::Html => (tree_sitter_html::LANGUAGE.into(), HTML_HIGHLIGHTS),
        LanguageId::Css => (tree_sitter_css::LANGUAGE.into(), CSS_HIGHLIGHTS),
        LanguageId::PlainText => return None,
    };
    Some(grammar)
}

/// Winning capture for one byte of a line
#[derive(Debug, Clone, Copy)]
struct Slot {
    /// Byte length of the captured node; shorter (innermost) wins
    span: usize,
    /// Query pattern index; earlier wins on equal span
    pattern: usize,
    class: TokenClass,
}

/// Parser state (tree-sitter parsers are !Sync)
///
/// Parsers and queries are created lazily the first time a language is
/// tokenized.
pub struct Tokenizer {
    /// Parser instances per language
    parsers: HashMap<LanguageId, Parser>,
    /// Compiled queries per language
    queries: HashMap<LanguageId, Query>,
    /// Languages whose grammar or query failed to load
    broken: HashSet<LanguageId>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
            queries: HashMap::new(),
            broken: HashSet::new(),
        }
    }

    /// Initialize a language's parser and query, returning whether both are usable
    fn ensure_language(&mut self, lang: LanguageId) -> bool {
        if self.parsers.contains_key(&lang) && self.queries.contains_key(&lang) {
            return true;
        }
        if self.broken.contains(&lang) {
            return false;
        }

        let Some((ts_lang, highlights_scm)) = grammar(lang) else {
            return false;
        };

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&ts_lang) {
            tracing::error!("Failed to set language for {:?}: {}", lang, e);
            self.broken.insert(lang);
            return false;
        }

        match Query::new(&ts_lang, highlights_scm) {
            Ok(query) => {
                tracing::debug!(
                    "Loaded {} grammar ({} captures)",
                    lang,
                    query.capture_names().len()
                );
                self.parsers.insert(lang, parser);
                self.queries.insert(lang, query);
                true
            }
            Err(e) => {
                tracing::error!("Failed to compile query for {:?}: {:?}", lang, e);
                self.broken.insert(lang);
                false
            }
        }
    }

    /// Tokenize a whole source text. Lines are split on `'\n'` only; a
    /// trailing `'\r'` stays part of its line so the round-trip is exact.
    pub fn tokenize(&mut self, source: &str, language: LanguageId) -> Vec<Line> {
        source
            .split('\n')
            .map(|line| self.tokenize_line(line, language))
            .collect()
    }

    /// Tokenize a single line (must not contain `'\n'`)
    pub fn tokenize_line(&mut self, text: &str, language: LanguageId) -> Line {
        if text.is_empty() {
            return Line::default();
        }
        if !language.has_highlighting() || !self.ensure_language(language) {
            return plain_line(text);
        }

        let Some(parser) = self.parsers.get_mut(&language) else {
            return plain_line(text);
        };
        let Some(tree) = parser.parse(text, None) else {
            tracing::warn!("Parse failed for {:?}, using plain text", language);
            return plain_line(text);
        };
        let Some(query) = self.queries.get(&language) else {
            return plain_line(text);
        };

        let slots = classify(text, &tree, query);
        let line = build_line(text, &slots);
        tracing::trace!(
            "Tokenized {:?} line into {} tokens",
            language,
            line.tokens.len()
        );
        line
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn plain_line(text: &str) -> Line {
    Line::new(vec![Token::plain(text)])
}

/// Assign each byte of the line the class of the innermost capture covering it
fn classify(text: &str, tree: &Tree, query: &Query) -> Vec<Option<Slot>> {
    let mut slots: Vec<Option<Slot>> = vec![None; text.len()];
    let mut cursor = QueryCursor::new();
    let capture_names = query.capture_names();

    let mut captures = cursor.captures(query, tree.root_node(), text.as_bytes());
    while let Some((query_match, capture_idx)) = captures.next() {
        let capture = &query_match.captures[*capture_idx];
        let name: &str = capture_names[capture.index as usize];

        let Some(class) = TokenClass::from_capture(name) else {
            continue;
        };

        let range = capture.node.byte_range();
        let start = range.start.min(text.len());
        let end = range.end.min(text.len());
        if start >= end {
            continue;
        }

        let candidate = Slot {
            span: end - start,
            pattern: query_match.pattern_index,
            class,
        };
        for slot in &mut slots[start..end] {
            let wins = match slot {
                Some(current) => {
                    (candidate.span, candidate.pattern) < (current.span, current.pattern)
                }
                None => true,
            };
            if wins {
                *slot = Some(candidate);
            }
        }
    }

    slots
}

/// Merge runs of equally classified chars into tokens
fn build_line(text: &str, slots: &[Option<Slot>]) -> Line {
    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut run_class = None;

    for (i, _) in text.char_indices() {
        let class = slots.get(i).copied().flatten().map(|s| s.class);
        if i == 0 {
            run_class = class;
            continue;
        }
        if class != run_class {
            tokens.push(Token::new(&text[run_start..i], run_class));
            run_start = i;
            run_class = class;
        }
    }
    if run_start < text.len() {
        tokens.push(Token::new(&text[run_start..], run_class));
    }

    Line::new(tokens)
}

thread_local! {
    static TOKENIZER: RefCell<Tokenizer> = RefCell::new(Tokenizer::new());
}

/// Tokenize source text with this thread's shared tokenizer
pub fn tokenize(source: &str, language: LanguageId) -> Vec<Line> {
    TOKENIZER.with(|t| t.borrow_mut().tokenize(source, language))
}

/// Tokenize one line with this thread's shared tokenizer
pub fn tokenize_line(text: &str, language: LanguageId) -> Line {
    TOKENIZER.with(|t| t.borrow_mut().tokenize_line(text, language))
}
