//! Code-block nodes
//!
//! A block is a flat sequence of highlight tokens and line breaks. The kind
//! of a node is a closed set; callers match on [`CodeNode`] instead of
//! probing types.

use std::fmt;

use crate::syntax::Token;

/// Stable identity of a node within one block. Keys are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u32);

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discriminant of a [`CodeNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Highlight,
    LineBreak,
}

/// A node of a code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeNode {
    /// A classified run of text within a line
    Highlight(Token),
    /// Separator between two lines
    LineBreak,
}

impl CodeNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            CodeNode::Highlight(_) => NodeKind::Highlight,
            CodeNode::LineBreak => NodeKind::LineBreak,
        }
    }

    /// Length in chars. A line break counts as one char, so a point at
    /// offset 0 sits before it and offset 1 after it.
    pub fn len(&self) -> usize {
        match self {
            CodeNode::Highlight(token) => token.len(),
            CodeNode::LineBreak => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text content, `"\n"` for a line break
    pub fn text(&self) -> &str {
        match self {
            CodeNode::Highlight(token) => &token.text,
            CodeNode::LineBreak => "\n",
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            CodeNode::Highlight(token) => Some(token),
            CodeNode::LineBreak => None,
        }
    }

    pub fn as_token_mut(&mut self) -> Option<&mut Token> {
        match self {
            CodeNode::Highlight(token) => Some(token),
            CodeNode::LineBreak => None,
        }
    }

    pub fn is_line_break(&self) -> bool {
        matches!(self, CodeNode::LineBreak)
    }
}

impl From<Token> for CodeNode {
    fn from(token: Token) -> Self {
        CodeNode::Highlight(token)
    }
}
