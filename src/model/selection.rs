//! Selection addressing into a code block
//!
//! Points reference a node by key plus a char offset inside it; the block
//! never hands out ownership of its nodes.

use super::node::NodeKey;

/// A (line, column) position in a block's text, both 0-indexed, column in chars
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A node-relative caret position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub key: NodeKey,
    /// Char offset within the node (0..=len)
    pub offset: usize,
}

impl Point {
    pub const fn new(key: NodeKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// A selection with a fixed anchor and a moving focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed selection
    pub fn caret(point: Point) -> Self {
        Self {
            anchor: point,
            focus: point,
        }
    }

    /// Anchor and focus are the same node and offset.
    ///
    /// Two points can denote the same text position through different
    /// nodes; use [`crate::model::NodeTree::selection_range`] to compare
    /// positions.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Whether either end references `key`
    pub fn touches(&self, key: NodeKey) -> bool {
        self.anchor.key == key || self.focus.key == key
    }
}
