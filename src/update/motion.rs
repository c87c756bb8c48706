//! Caret motion within a line (Home/End) and block-boundary arrows
//!
//! Home and End target code, not the physical line edges: the first and
//! last non-blank characters of the line.

use crate::model::{NodeKey, NodeTree, Point, Position, Selection};

use super::{is_line_blank, BlockExit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBoundary {
    Start,
    End,
}

/// Collapse the selection to the start or end of code on the focus's line.
///
/// A line of only spaces and tabs targets the line end for both boundaries;
/// an empty line leaves the caret at the focus. Returns false only when the
/// selection leaves the block.
pub fn move_to_line_boundary<T: NodeTree>(
    tree: &T,
    selection: &mut Selection,
    boundary: LineBoundary,
) -> bool {
    if !tree.contains(selection.anchor.key) || !tree.contains(selection.focus.key) {
        return false;
    }

    // A focus on a line break may still denote a position on a non-empty line
    let focus = tree
        .position_of(selection.focus)
        .and_then(|position| tree.point_at(position))
        .unwrap_or(selection.focus);

    let target = match tree.token(focus.key) {
        Some(_) => code_boundary(tree, focus.key, boundary).or_else(|| line_end(tree, focus.key)),
        None => None,
    }
    .unwrap_or(focus);

    tracing::debug!(?boundary, key = %target.key, offset = target.offset, "move to line boundary");
    *selection = Selection::caret(target);
    true
}

/// First or last non-blank character of the line containing `key`
fn code_boundary<T: NodeTree>(tree: &T, key: NodeKey, boundary: LineBoundary) -> Option<Point> {
    let tokens = line_tokens(tree, key)?;
    let mut hits = tokens.iter().filter_map(|&k| {
        let text = &tree.token(k)?.text;
        let chars: Vec<char> = text.chars().collect();
        match boundary {
            LineBoundary::Start => chars
                .iter()
                .position(|&c| !is_line_blank(c))
                .map(|i| Point::new(k, i)),
            LineBoundary::End => chars
                .iter()
                .rposition(|&c| !is_line_blank(c))
                .map(|i| Point::new(k, i + 1)),
        }
    });

    match boundary {
        LineBoundary::Start => hits.next(),
        LineBoundary::End => hits.last(),
    }
}

/// End of the line's text, before a trailing `'\r'`
fn line_end<T: NodeTree>(tree: &T, key: NodeKey) -> Option<Point> {
    let last = tree.last_token_of_line(key)?;
    let token = tree.token(last)?;
    let len = token.len() - usize::from(token.text.ends_with('\r'));
    Some(Point::new(last, len))
}

fn line_tokens<T: NodeTree>(tree: &T, key: NodeKey) -> Option<Vec<NodeKey>> {
    let mut current = Some(tree.first_token_of_line(key)?);
    let mut tokens = Vec::new();
    while let Some(k) = current {
        if tree.token(k).is_none() {
            break;
        }
        tokens.push(k);
        current = tree.next(k);
    }
    Some(tokens)
}

/// Whether a plain Up/Down arrow should leave the block.
///
/// Applies to a collapsed caret at the very start (up) or very end (down).
pub fn boundary_exit<T: NodeTree>(tree: &T, selection: &Selection, up: bool) -> Option<BlockExit> {
    let (start, end) = tree.selection_range(selection)?;
    if start != end {
        return None;
    }

    if up {
        (start == Position::new(0, 0)).then_some(BlockExit::Before)
    } else {
        let last_line = tree.line_count() - 1;
        let last_len = tree.line_len(last_line)?;
        (end == Position::new(last_line, last_len)).then_some(BlockExit::After)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CodeBlock;

    fn caret(block: &CodeBlock, line: usize, column: usize) -> Selection {
        Selection::caret(block.point_at(Position::new(line, column)).unwrap())
    }

    fn moved(block: &CodeBlock, line: usize, column: usize, boundary: LineBoundary) -> Position {
        let mut selection = caret(block, line, column);
        assert!(move_to_line_boundary(block, &mut selection, boundary));
        assert!(selection.is_collapsed());
        block.position_of(selection.focus).unwrap()
    }

    #[test]
    fn test_end_stops_before_carriage_return() {
        let block = CodeBlock::from_text("  foo;\r\n\t\r\nbar", Some("rust"));
        assert_eq!(moved(&block, 0, 0, LineBoundary::End), Position::new(0, 6));
        assert_eq!(moved(&block, 0, 7, LineBoundary::Start), Position::new(0, 2));
        // Blank CRLF line: both boundaries land before the '\r'
        assert_eq!(moved(&block, 1, 0, LineBoundary::End), Position::new(1, 1));
        assert_eq!(moved(&block, 1, 0, LineBoundary::Start), Position::new(1, 1));
    }

    #[test]
    fn test_start_skips_indentation() {
        let block = CodeBlock::from_text("  foo bar  ", None);
        assert_eq!(moved(&block, 0, 8, LineBoundary::Start), Position::new(0, 2));
        assert_eq!(moved(&block, 0, 0, LineBoundary::Start), Position::new(0, 2));
    }

    #[test]
    fn test_end_skips_trailing_whitespace() {
        let block = CodeBlock::from_text("  foo bar  ", None);
        assert_eq!(moved(&block, 0, 3, LineBoundary::End), Position::new(0, 9));
    }

    #[test]
    fn test_whitespace_only_line_targets_line_end() {
        let block = CodeBlock::from_text("x\n\t\t\ny", None);
        assert_eq!(moved(&block, 1, 1, LineBoundary::Start), Position::new(1, 2));
        assert_eq!(moved(&block, 1, 0, LineBoundary::End), Position::new(1, 2));
    }

    #[test]
    fn test_empty_line_keeps_caret() {
        let block = CodeBlock::from_text("x\n\ny", None);
        assert_eq!(moved(&block, 1, 0, LineBoundary::Start), Position::new(1, 0));
        assert_eq!(moved(&block, 1, 0, LineBoundary::End), Position::new(1, 0));
    }

    #[test]
    fn test_outside_selection_not_applicable() {
        let block = CodeBlock::from_text("x", None);
        let mut selection = Selection::caret(Point::new(NodeKey(999), 0));
        assert!(!move_to_line_boundary(&block, &mut selection, LineBoundary::End));
    }

    #[test]
    fn test_boundary_exit() {
        let block = CodeBlock::from_text("ab\ncd", None);

        assert_eq!(boundary_exit(&block, &caret(&block, 0, 0), true), Some(BlockExit::Before));
        assert_eq!(boundary_exit(&block, &caret(&block, 1, 2), false), Some(BlockExit::After));
        assert_eq!(boundary_exit(&block, &caret(&block, 0, 1), true), None);
        assert_eq!(boundary_exit(&block, &caret(&block, 1, 2), true), None);
    }
}
