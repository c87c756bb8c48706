//! Abstract node sequence
//!
//! The editing operations only need previous/next traversal and
//! insert/detach/remove on a flat sequence of [`CodeNode`]s. [`NodeTree`]
//! captures exactly that, so a host can back it with its own node graph;
//! [`crate::model::CodeBlock`] is the arena-backed implementation.
//!
//! Line navigation is derived from the primitives as provided methods.

use super::node::{CodeNode, NodeKey};
use super::selection::{Point, Position, Selection};
use crate::syntax::Token;

/// Nodes making up one line, plus the breaks around it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBounds {
    /// Line break ending the previous line (`None` for the first line)
    pub before: Option<NodeKey>,
    /// Token nodes of the line, in order
    pub tokens: Vec<NodeKey>,
    /// Line break ending this line (`None` for the last line)
    pub terminator: Option<NodeKey>,
}

impl LineBounds {
    /// Last node before the line's content, if any
    pub fn last_node(&self) -> Option<NodeKey> {
        self.tokens.last().copied().or(self.before)
    }
}

pub trait NodeTree {
    /// A live node (attached or detached). `None` for unknown keys.
    fn node(&self, key: NodeKey) -> Option<&CodeNode>;

    fn node_mut(&mut self, key: NodeKey) -> Option<&mut CodeNode>;

    /// Whether the node is currently part of the sequence
    fn contains(&self, key: NodeKey) -> bool;

    fn first(&self) -> Option<NodeKey>;

    fn last(&self) -> Option<NodeKey>;

    fn previous(&self, key: NodeKey) -> Option<NodeKey>;

    fn next(&self, key: NodeKey) -> Option<NodeKey>;

    /// Create a detached node
    fn create(&mut self, node: CodeNode) -> NodeKey;

    /// Attach `key` directly before `anchor`. Returns false if `anchor` is
    /// not attached or `key` is unknown.
    fn insert_before(&mut self, anchor: NodeKey, key: NodeKey) -> bool;

    /// Attach `key` directly after `anchor`
    fn insert_after(&mut self, anchor: NodeKey, key: NodeKey) -> bool;

    /// Attach `key` at the start of the sequence
    fn prepend(&mut self, key: NodeKey) -> bool;

    /// Attach `key` at the end of the sequence
    fn append(&mut self, key: NodeKey) -> bool;

    /// Unlink a node, keeping it alive for re-insertion
    fn detach(&mut self, key: NodeKey) -> bool;

    /// Unlink and drop a node
    fn remove(&mut self, key: NodeKey) -> Option<CodeNode>;

    // ------------------------------------------------------------------
    // Provided helpers
    // ------------------------------------------------------------------

    /// The token of an attached highlight node
    fn token(&self, key: NodeKey) -> Option<&Token> {
        if !self.contains(key) {
            return None;
        }
        self.node(key).and_then(CodeNode::as_token)
    }

    fn is_line_break(&self, key: NodeKey) -> bool {
        self.contains(key) && self.node(key).is_some_and(CodeNode::is_line_break)
    }

    /// Attach `key` after `anchor`, or at the start when `anchor` is `None`
    fn insert_after_or_prepend(&mut self, anchor: Option<NodeKey>, key: NodeKey) -> bool {
        match anchor {
            Some(anchor) => self.insert_after(anchor, key),
            None => self.prepend(key),
        }
    }

    /// All attached keys in order
    fn keys(&self) -> Vec<NodeKey> {
        let mut keys = Vec::new();
        let mut current = self.first();
        while let Some(key) = current {
            keys.push(key);
            current = self.next(key);
        }
        keys
    }

    fn line_count(&self) -> usize {
        1 + self
            .keys()
            .into_iter()
            .filter(|&k| self.is_line_break(k))
            .count()
    }

    /// Line index of an attached node. A line break belongs to the line it ends.
    fn line_of(&self, key: NodeKey) -> Option<usize> {
        if !self.contains(key) {
            return None;
        }
        let mut line = 0;
        let mut current = self.first();
        while let Some(k) = current {
            if k == key {
                return Some(line);
            }
            if self.is_line_break(k) {
                line += 1;
            }
            current = self.next(k);
        }
        None
    }

    /// Nodes of a line. `None` if the line does not exist.
    fn line_bounds(&self, line: usize) -> Option<LineBounds> {
        let mut current_line = 0;
        let mut before = None;
        let mut tokens = Vec::new();

        let mut current = self.first();
        while let Some(key) = current {
            match self.node(key)? {
                CodeNode::LineBreak => {
                    if current_line == line {
                        return Some(LineBounds {
                            before,
                            tokens,
                            terminator: Some(key),
                        });
                    }
                    current_line += 1;
                    before = Some(key);
                }
                CodeNode::Highlight(_) => {
                    if current_line == line {
                        tokens.push(key);
                    }
                }
            }
            current = self.next(key);
        }

        (current_line == line).then_some(LineBounds {
            before,
            tokens,
            terminator: None,
        })
    }

    /// Nodes of every line, collected in a single walk
    fn all_line_bounds(&self) -> Vec<LineBounds> {
        let mut lines = Vec::new();
        let mut current_line = LineBounds::default();

        let mut current = self.first();
        while let Some(key) = current {
            match self.node(key) {
                Some(CodeNode::LineBreak) => {
                    current_line.terminator = Some(key);
                    lines.push(std::mem::replace(
                        &mut current_line,
                        LineBounds {
                            before: Some(key),
                            ..LineBounds::default()
                        },
                    ));
                }
                Some(CodeNode::Highlight(_)) => current_line.tokens.push(key),
                None => break,
            }
            current = self.next(key);
        }

        lines.push(current_line);
        lines
    }

    /// Concatenated text of a line's tokens
    fn bounds_text(&self, bounds: &LineBounds) -> String {
        bounds
            .tokens
            .iter()
            .filter_map(|&k| self.token(k))
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Full text of a line
    fn line_text(&self, line: usize) -> Option<String> {
        let bounds = self.line_bounds(line)?;
        Some(self.bounds_text(&bounds))
    }

    /// Length of a line in chars
    fn line_len(&self, line: usize) -> Option<usize> {
        let bounds = self.line_bounds(line)?;
        Some(
            bounds
                .tokens
                .iter()
                .filter_map(|&k| self.token(k))
                .map(Token::len)
                .sum(),
        )
    }

    /// First token of the line containing `key`, walking back over tokens
    fn first_token_of_line(&self, key: NodeKey) -> Option<NodeKey> {
        self.token(key)?;
        let mut first = key;
        while let Some(prev) = self.previous(first) {
            if self.token(prev).is_none() {
                break;
            }
            first = prev;
        }
        Some(first)
    }

    /// Last token of the line containing `key`, walking forward over tokens
    fn last_token_of_line(&self, key: NodeKey) -> Option<NodeKey> {
        self.token(key)?;
        let mut last = key;
        while let Some(next) = self.next(last) {
            if self.token(next).is_none() {
                break;
            }
            last = next;
        }
        Some(last)
    }

    /// Resolve a point to (line, column). `None` if the node is not attached.
    fn position_of(&self, point: Point) -> Option<Position> {
        if !self.contains(point.key) {
            return None;
        }

        let mut line = 0;
        let mut column = 0;
        let mut current = self.first();
        while let Some(key) = current {
            let node = self.node(key)?;
            if key == point.key {
                return Some(match node {
                    CodeNode::Highlight(token) => {
                        Position::new(line, column + point.offset.min(token.len()))
                    }
                    CodeNode::LineBreak if point.offset == 0 => Position::new(line, column),
                    CodeNode::LineBreak => Position::new(line + 1, 0),
                });
            }
            match node {
                CodeNode::Highlight(token) => column += token.len(),
                CodeNode::LineBreak => {
                    line += 1;
                    column = 0;
                }
            }
            current = self.next(key);
        }
        None
    }

    /// Resolve (line, column) to a point, clamping the column to the line.
    ///
    /// A column on a token boundary resolves to the end of the preceding
    /// token, except column 0 which is the start of the first token. On an
    /// empty line the point sits on an adjacent line break. `None` if the
    /// line does not exist or the block has no nodes at all.
    fn point_at(&self, position: Position) -> Option<Point> {
        let bounds = self.line_bounds(position.line)?;

        let mut start = 0;
        let total: usize = bounds
            .tokens
            .iter()
            .filter_map(|&k| self.token(k))
            .map(Token::len)
            .sum();
        let column = position.column.min(total);

        for (i, &key) in bounds.tokens.iter().enumerate() {
            let len = self.token(key).map(Token::len).unwrap_or(0);
            if column <= start + len && (column > start || i == 0) {
                return Some(Point::new(key, column - start));
            }
            start += len;
        }

        bounds
            .before
            .map(|b| Point::new(b, 1))
            .or(bounds.terminator.map(|t| Point::new(t, 0)))
    }

    /// Start and end positions of a selection in document order.
    /// `None` if either end is not in the block.
    fn selection_range(&self, selection: &Selection) -> Option<(Position, Position)> {
        let anchor = self.position_of(selection.anchor)?;
        let focus = self.position_of(selection.focus)?;
        Some(if anchor <= focus {
            (anchor, focus)
        } else {
            (focus, anchor)
        })
    }
}
