//! Editing operations on a code block
//!
//! Structural operations ([`indent`], [`shift`], [`motion`]) are generic over
//! [`NodeTree`] and never re-tokenize. Text mutations ([`text_edit`]) need the
//! tokenizer and therefore work on [`CodeBlock`](crate::model::CodeBlock).
//!
//! Every operation returns `false` (or `None`) when it does not apply, leaving
//! the block untouched so the next command handler can run.

pub mod indent;
pub mod motion;
pub mod shift;
pub mod text_edit;

use crate::model::{CodeNode, NodeKey, NodeTree, Point, Selection};

pub use indent::{indent_lines, IndentDirection};
pub use motion::{boundary_exit, move_to_line_boundary, LineBoundary};
pub use shift::{shift_lines, ShiftDirection};
pub use text_edit::{delete_backward, insert_newline, insert_text, Newline, NewlineOptions};

/// Request for the host to move the caret out of the block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockExit {
    /// Before the block (caret was at the very start)
    Before,
    /// After the block (caret was at the very end)
    After,
}

/// Space or tab. Other Unicode whitespace counts as content.
pub(crate) fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Blank for caret motion: also skips the `'\r'` a CRLF line keeps
pub(crate) fn is_line_blank(ch: char) -> bool {
    is_blank(ch) || ch == '\r'
}

/// The text position where `key` starts, expressed through a neighbouring
/// node. Used to relocate points before `key` is removed.
pub(crate) fn point_replacing<T: NodeTree>(tree: &T, key: NodeKey) -> Option<Point> {
    let previous = tree.previous(key);
    let next = tree.next(key);

    if let Some(next) = next.filter(|&k| tree.token(k).is_some()) {
        return Some(Point::new(next, 0));
    }
    if let Some(previous) = previous {
        return Some(match tree.node(previous)? {
            CodeNode::Highlight(token) => Point::new(previous, token.len()),
            CodeNode::LineBreak => Point::new(previous, 1),
        });
    }
    next.map(|k| Point::new(k, 0))
}

/// Apply `f` to each end of the selection that references `key`
pub(crate) fn map_points(selection: &mut Selection, key: NodeKey, f: impl Fn(Point) -> Point) {
    if selection.anchor.key == key {
        selection.anchor = f(selection.anchor);
    }
    if selection.focus.key == key {
        selection.focus = f(selection.focus);
    }
}
