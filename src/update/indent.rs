//! Indent and outdent of selected lines
//!
//! One tab per line. A line whose first token already starts with whitespace
//! gets the tab merged into that token so leading whitespace stays a single
//! token, matching what the tokenizer would produce for the new text.

use crate::model::{CodeNode, NodeKey, NodeTree, Selection};
use crate::syntax::Token;

use super::{map_points, point_replacing};

pub const INDENT: &str = "\t";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentDirection {
    Indent,
    Outdent,
}

/// Indent or outdent every non-empty line touched by the selection.
///
/// Returns false for a collapsed selection or one that leaves the block.
pub fn indent_lines<T: NodeTree>(
    tree: &mut T,
    selection: &mut Selection,
    direction: IndentDirection,
) -> bool {
    if selection.is_collapsed() {
        return false;
    }
    let Some((start, end)) = tree.selection_range(selection) else {
        return false;
    };
    if start == end {
        return false;
    }

    // Each line's edit only touches its own first token
    let firsts: Vec<NodeKey> = tree
        .all_line_bounds()
        .iter()
        .skip(start.line)
        .take(end.line - start.line + 1)
        .filter_map(|bounds| bounds.tokens.first().copied())
        .collect();

    let mut changed = 0;
    for first in firsts {
        let applied = match direction {
            IndentDirection::Indent => indent_token(tree, first, selection),
            IndentDirection::Outdent => outdent_token(tree, first, selection),
        };
        if applied {
            changed += 1;
        }
    }

    tracing::debug!(
        ?direction,
        first_line = start.line,
        last_line = end.line,
        changed,
        "indent lines"
    );
    true
}

fn indent_token<T: NodeTree>(tree: &mut T, key: NodeKey, selection: &mut Selection) -> bool {
    let leading_whitespace = tree
        .token(key)
        .is_some_and(|token| token.text.starts_with(char::is_whitespace));

    if leading_whitespace {
        let Some(token) = tree.node_mut(key).and_then(CodeNode::as_token_mut) else {
            return false;
        };
        token.text.insert_str(0, INDENT);
        map_points(selection, key, |mut point| {
            point.offset += 1;
            point
        });
        true
    } else {
        let tab = tree.create(CodeNode::Highlight(Token::plain(INDENT)));
        tree.insert_before(key, tab)
    }
}

fn outdent_token<T: NodeTree>(tree: &mut T, key: NodeKey, selection: &mut Selection) -> bool {
    let Some(token) = tree.token(key) else {
        return false;
    };
    if !token.text.starts_with(INDENT) {
        return false;
    }

    if token.text == INDENT {
        if selection.touches(key) {
            if let Some(replacement) = point_replacing(tree, key) {
                map_points(selection, key, |_| replacement);
            }
        }
        return tree.remove(key).is_some();
    }

    let Some(token) = tree.node_mut(key).and_then(CodeNode::as_token_mut) else {
        return false;
    };
    token.text.remove(0);
    map_points(selection, key, |mut point| {
        point.offset = point.offset.saturating_sub(1);
        point
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeBlock, Point, Position};

    fn select(block: &CodeBlock, from: (usize, usize), to: (usize, usize)) -> Selection {
        Selection::new(
            block.point_at(Position::new(from.0, from.1)).unwrap(),
            block.point_at(Position::new(to.0, to.1)).unwrap(),
        )
    }

    #[test]
    fn test_indent_inserts_tab_token() {
        let mut block = CodeBlock::from_text("foo\nbar", None);
        let mut selection = select(&block, (0, 1), (1, 2));

        assert!(indent_lines(&mut block, &mut selection, IndentDirection::Indent));
        assert_eq!(block.text(), "\tfoo\n\tbar");
        assert_eq!(block.line_bounds(0).unwrap().tokens.len(), 2);
        // Points stay with their characters
        assert_eq!(block.position_of(selection.anchor), Some(Position::new(0, 2)));
        assert_eq!(block.position_of(selection.focus), Some(Position::new(1, 3)));
    }

    #[test]
    fn test_indent_merges_into_leading_whitespace() {
        let mut block = CodeBlock::from_text("  foo", None);
        let first = block.first().unwrap();
        let mut selection = Selection::new(Point::new(first, 0), Point::new(first, 5));

        assert!(indent_lines(&mut block, &mut selection, IndentDirection::Indent));
        assert_eq!(block.text(), "\t  foo");
        assert_eq!(block.node_count(), 1);
        assert_eq!(selection.focus.offset, 6);
    }

    #[test]
    fn test_outdent_removes_tab_token() {
        let mut block = CodeBlock::from_text("foo", None);
        let first = block.first().unwrap();
        let mut selection = Selection::new(Point::new(first, 0), Point::new(first, 3));

        indent_lines(&mut block, &mut selection, IndentDirection::Indent);
        assert!(indent_lines(&mut block, &mut selection, IndentDirection::Outdent));

        assert_eq!(block.text(), "foo");
        assert_eq!(block.keys(), vec![first]);
        assert!(!block.has_empty_tokens());
    }

    #[test]
    fn test_outdent_without_tab_is_noop() {
        let mut block = CodeBlock::from_text("  foo", None);
        let first = block.first().unwrap();
        let mut selection = Selection::new(Point::new(first, 0), Point::new(first, 5));

        assert!(indent_lines(&mut block, &mut selection, IndentDirection::Outdent));
        assert_eq!(block.text(), "  foo");
    }

    #[test]
    fn test_collapsed_selection_not_applicable() {
        let mut block = CodeBlock::from_text("foo", None);
        let first = block.first().unwrap();
        let mut selection = Selection::caret(Point::new(first, 1));

        assert!(!indent_lines(&mut block, &mut selection, IndentDirection::Indent));
        assert_eq!(block.text(), "foo");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let mut block = CodeBlock::from_text("a\n\nb", None);
        let mut selection = select(&block, (0, 0), (2, 1));

        assert!(indent_lines(&mut block, &mut selection, IndentDirection::Indent));
        assert_eq!(block.text(), "\ta\n\n\tb");
    }
}
