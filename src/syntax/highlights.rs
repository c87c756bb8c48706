//! Token data structures
//!
//! Defines token classes, tokens and lines, and the mapping from
//! tree-sitter capture names to token classes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic class of a token. Plain text has no class (`None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    Attribute,
    Boolean,
    Builtin,
    Comment,
    Constant,
    Constructor,
    Escape,
    Function,
    Keyword,
    Label,
    Number,
    Operator,
    Property,
    Punctuation,
    String,
    Tag,
    Type,
}

/// Capture names mapped to classes. Hierarchical names not listed here
/// fall back to their dotted parents (see [`TokenClass::from_capture`]).
const CAPTURE_CLASSES: &[(&str, Option<TokenClass>)] = &[
    ("attribute", Some(TokenClass::Attribute)),
    ("boolean", Some(TokenClass::Boolean)),
    ("comment", Some(TokenClass::Comment)),
    ("constant", Some(TokenClass::Constant)),
    ("constant.builtin", Some(TokenClass::Builtin)),
    ("constructor", Some(TokenClass::Constructor)),
    ("escape", Some(TokenClass::Escape)),
    ("function", Some(TokenClass::Function)),
    ("function.builtin", Some(TokenClass::Builtin)),
    ("function.macro", Some(TokenClass::Function)),
    ("keyword", Some(TokenClass::Keyword)),
    ("label", Some(TokenClass::Label)),
    ("number", Some(TokenClass::Number)),
    ("float", Some(TokenClass::Number)),
    ("operator", Some(TokenClass::Operator)),
    ("property", Some(TokenClass::Property)),
    ("punctuation", Some(TokenClass::Punctuation)),
    ("string", Some(TokenClass::String)),
    ("string.escape", Some(TokenClass::Escape)),
    ("tag", Some(TokenClass::Tag)),
    ("type", Some(TokenClass::Type)),
    ("type.builtin", Some(TokenClass::Builtin)),
    // Plain identifiers stay unstyled
    ("variable", None),
    ("variable.builtin", Some(TokenClass::Builtin)),
];

impl TokenClass {
    /// All classes, in declaration order
    pub const ALL: &'static [TokenClass] = &[
        TokenClass::Attribute,
        TokenClass::Boolean,
        TokenClass::Builtin,
        TokenClass::Comment,
        TokenClass::Constant,
        TokenClass::Constructor,
        TokenClass::Escape,
        TokenClass::Function,
        TokenClass::Keyword,
        TokenClass::Label,
        TokenClass::Number,
        TokenClass::Operator,
        TokenClass::Property,
        TokenClass::Punctuation,
        TokenClass::String,
        TokenClass::Tag,
        TokenClass::Type,
    ];

    /// Look up the class for a tree-sitter capture name.
    ///
    /// Tries an exact match first, then progressively shorter parents
    /// (e.g. "keyword.control.import" -> "keyword.control" -> "keyword").
    /// Returns `None` for unknown captures and for captures that map to
    /// plain text.
    pub fn from_capture(name: &str) -> Option<TokenClass> {
        let mut current = name;
        loop {
            if let Some((_, class)) = CAPTURE_CLASSES.iter().find(|(n, _)| *n == current) {
                return *class;
            }

            let dot_pos = current.rfind('.')?;
            current = &current[..dot_pos];
        }
    }

    /// The `highlightType` string used in exports and theme lookups
    pub fn as_str(self) -> &'static str {
        match self {
            TokenClass::Attribute => "attribute",
            TokenClass::Boolean => "boolean",
            TokenClass::Builtin => "builtin",
            TokenClass::Comment => "comment",
            TokenClass::Constant => "constant",
            TokenClass::Constructor => "constructor",
            TokenClass::Escape => "escape",
            TokenClass::Function => "function",
            TokenClass::Keyword => "keyword",
            TokenClass::Label => "label",
            TokenClass::Number => "number",
            TokenClass::Operator => "operator",
            TokenClass::Property => "property",
            TokenClass::Punctuation => "punctuation",
            TokenClass::String => "string",
            TokenClass::Tag => "tag",
            TokenClass::Type => "type",
        }
    }

    /// Parse a `highlightType` string
    pub fn from_name(name: &str) -> Option<TokenClass> {
        Self::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A run of classified text within a single line. Never empty and never
/// contains a line break once it is part of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub class: Option<TokenClass>,
}

impl Token {
    pub fn new(text: impl Into<String>, class: Option<TokenClass>) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }

    /// An unstyled token
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    /// Length in chars (the unit selection offsets are measured in)
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether `other` has the same text and class
    pub fn same_content(&self, other: &Token) -> bool {
        self.class == other.class && self.text == other.text
    }
}

/// One line of a code block: tokens sorted by position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub tokens: Vec<Token>,
}

impl Line {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Full text of the line (concatenated token text)
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.tokens.iter().map(Token::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get the class for a given char column, if any
    pub fn class_at(&self, col: usize) -> Option<TokenClass> {
        let mut start = 0;
        for token in &self.tokens {
            let end = start + token.len();
            if col >= start && col < end {
                return token.class;
            }
            start = end;
        }
        None
    }
}

/// Join lines back into source text
pub fn lines_to_text(lines: &[Line]) -> String {
    lines.iter().map(Line::text).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_lookup() {
        assert_eq!(TokenClass::from_capture("keyword"), Some(TokenClass::Keyword));
        assert_eq!(
            TokenClass::from_capture("keyword.function"),
            Some(TokenClass::Keyword)
        );
        assert_eq!(
            TokenClass::from_capture("keyword.control.import"),
            Some(TokenClass::Keyword)
        );
        assert_eq!(
            TokenClass::from_capture("function.builtin"),
            Some(TokenClass::Builtin)
        );
        assert_eq!(
            TokenClass::from_capture("punctuation.bracket"),
            Some(TokenClass::Punctuation)
        );
        assert_eq!(TokenClass::from_capture("variable"), None);
        assert_eq!(TokenClass::from_capture("variable.parameter"), None);
        assert_eq!(TokenClass::from_capture("nonexistent"), None);
    }

    #[test]
    fn test_class_names_round_trip() {
        for &class in TokenClass::ALL {
            assert_eq!(TokenClass::from_name(class.as_str()), Some(class));
        }
        assert_eq!(TokenClass::from_name("bogus"), None);
    }

    #[test]
    fn test_line_class_at() {
        let line = Line::new(vec![
            Token::new("fn", Some(TokenClass::Keyword)),
            Token::plain(" main"),
            Token::new("()", Some(TokenClass::Punctuation)),
        ]);

        assert_eq!(line.text(), "fn main()");
        assert_eq!(line.len(), 9);
        assert_eq!(line.class_at(0), Some(TokenClass::Keyword));
        assert_eq!(line.class_at(1), Some(TokenClass::Keyword));
        assert_eq!(line.class_at(2), None);
        assert_eq!(line.class_at(7), Some(TokenClass::Punctuation));
        assert_eq!(line.class_at(9), None);
    }

    #[test]
    fn test_lines_to_text() {
        let lines = vec![
            Line::new(vec![Token::plain("a")]),
            Line::default(),
            Line::new(vec![Token::plain("b")]),
        ];
        assert_eq!(lines_to_text(&lines), "a\n\nb");
    }
}
