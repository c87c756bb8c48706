//! Text mutations inside a code block
//!
//! Every edit rewrites whole lines through [`CodeBlock::replace_lines`], so
//! touched lines are always re-tokenized from their full text. The caret is
//! restored by (line, column) afterwards since token keys in the rewritten
//! range may change.

use crate::model::{CodeBlock, NodeTree, Position, Selection};

use super::is_blank;

/// Behaviour switches for [`insert_newline`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewlineOptions {
    /// Start the new line with the current line's leading spaces and tabs
    pub preserve_indent: bool,
    /// A newline on an empty last line after another empty line leaves the block
    pub exit_on_double_blank: bool,
}

impl Default for NewlineOptions {
    fn default() -> Self {
        Self {
            preserve_indent: true,
            exit_on_double_blank: true,
        }
    }
}

/// What [`insert_newline`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    /// The line was split at the caret
    Split,
    /// Two trailing empty lines were removed; the caret should leave the block
    ExitBlock,
}

/// Range an edit applies to. An empty block has no node to select, so it
/// accepts edits at its only position.
fn edit_range(block: &CodeBlock, selection: Option<&Selection>) -> Option<(Position, Position)> {
    match selection {
        Some(selection) => block.selection_range(selection),
        None if block.node_count() == 0 => Some((Position::new(0, 0), Position::new(0, 0))),
        None => None,
    }
}

/// Replace the text between two positions, returning the caret position
/// after the inserted text
fn replace_range(block: &mut CodeBlock, start: Position, end: Position, text: &str) -> Option<Position> {
    let first = block.line_text(start.line)?;
    let last = block.line_text(end.line)?;

    let prefix: String = first.chars().take(start.column).collect();
    let suffix: String = last.chars().skip(end.column).collect();
    if !block.replace_lines(start.line, end.line, &format!("{prefix}{text}{suffix}")) {
        return None;
    }

    let inserted: Vec<&str> = text.split('\n').collect();
    let tail = inserted.last().map_or(0, |s| s.chars().count());
    Some(if inserted.len() == 1 {
        Position::new(start.line, prefix.chars().count() + tail)
    } else {
        Position::new(start.line + inserted.len() - 1, tail)
    })
}

fn place_caret(block: &CodeBlock, selection: &mut Option<Selection>, caret: Position) {
    *selection = block.point_at(caret).map(Selection::caret);
}

/// Insert `text` at the caret, replacing a non-collapsed selection.
pub fn insert_text(block: &mut CodeBlock, selection: &mut Option<Selection>, text: &str) -> bool {
    let Some((start, end)) = edit_range(block, selection.as_ref()) else {
        return false;
    };
    if text.is_empty() && start == end {
        return false;
    }

    let Some(caret) = replace_range(block, start, end, text) else {
        return false;
    };
    place_caret(block, selection, caret);
    tracing::debug!(line = start.line, column = start.column, len = text.len(), "insert text");
    true
}

/// Delete the selected range, or the char before a collapsed caret (joining
/// with the previous line at column 0). Returns false at the block start.
pub fn delete_backward(block: &mut CodeBlock, selection: &mut Option<Selection>) -> bool {
    let Some((mut start, end)) = edit_range(block, selection.as_ref()) else {
        return false;
    };

    if start == end {
        if start.column > 0 {
            start.column -= 1;
        } else if start.line > 0 {
            let line = start.line - 1;
            let Some(len) = block.line_len(line) else {
                return false;
            };
            start = Position::new(line, len);
        } else {
            return false;
        }
    }

    let Some(caret) = replace_range(block, start, end, "") else {
        return false;
    };
    place_caret(block, selection, caret);
    tracing::debug!(?start, ?end, "delete backward");
    true
}

/// Split the line at the caret.
///
/// With `exit_on_double_blank`, a caret on an empty last line whose previous
/// line is also empty removes both lines instead and clears the selection.
pub fn insert_newline(
    block: &mut CodeBlock,
    selection: &mut Option<Selection>,
    options: NewlineOptions,
) -> Option<Newline> {
    let (start, end) = edit_range(block, selection.as_ref())?;

    if options.exit_on_double_blank && start == end && is_double_blank_tail(block, start.line) {
        let line = start.line;
        let replaced = if line >= 2 {
            let keep = block.line_text(line - 2)?;
            block.replace_lines(line - 2, line, &keep)
        } else {
            block.replace_lines(0, line, "")
        };
        if !replaced {
            return None;
        }
        *selection = None;
        tracing::debug!(line, "double newline leaves code block");
        return Some(Newline::ExitBlock);
    }

    let mut text = String::from("\n");
    if options.preserve_indent {
        let current = block.line_text(start.line)?;
        text.extend(current.chars().take(start.column).take_while(|&c| is_blank(c)));
    }

    let caret = replace_range(block, start, end, &text)?;
    place_caret(block, selection, caret);
    tracing::debug!(line = start.line, indent = text.len() - 1, "insert newline");
    Some(Newline::Split)
}

fn is_double_blank_tail(block: &CodeBlock, line: usize) -> bool {
    line > 0
        && line + 1 == block.line_count()
        && block.line_len(line) == Some(0)
        && block.line_len(line - 1) == Some(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caret(block: &CodeBlock, line: usize, column: usize) -> Option<Selection> {
        block.point_at(Position::new(line, column)).map(Selection::caret)
    }

    fn caret_position(block: &CodeBlock, selection: &Option<Selection>) -> Position {
        block.position_of(selection.unwrap().focus).unwrap()
    }

    #[test]
    fn test_insert_text_at_caret() {
        let mut block = CodeBlock::from_text("let x = 1;", Some("rust"));
        let mut selection = caret(&block, 0, 9);

        assert!(insert_text(&mut block, &mut selection, "23"));
        assert_eq!(block.text(), "let x = 123;");
        assert_eq!(caret_position(&block, &selection), Position::new(0, 11));
        assert!(!block.has_empty_tokens());
    }

    #[test]
    fn test_insert_multi_line_text() {
        let mut block = CodeBlock::from_text("ab", None);
        let mut selection = caret(&block, 0, 1);

        assert!(insert_text(&mut block, &mut selection, "x\ny\nz"));
        assert_eq!(block.text(), "ax\ny\nzb");
        assert_eq!(caret_position(&block, &selection), Position::new(2, 1));
    }

    #[test]
    fn test_insert_into_empty_block() {
        let mut block = CodeBlock::new(None);
        let mut selection = None;

        assert!(insert_text(&mut block, &mut selection, "hi"));
        assert_eq!(block.text(), "hi");
        assert_eq!(caret_position(&block, &selection), Position::new(0, 2));
    }

    #[test]
    fn test_delete_backward_joins_lines() {
        let mut block = CodeBlock::from_text("ab\ncd", None);
        let mut selection = caret(&block, 1, 0);

        assert!(delete_backward(&mut block, &mut selection));
        assert_eq!(block.text(), "abcd");
        assert_eq!(caret_position(&block, &selection), Position::new(0, 2));
    }

    #[test]
    fn test_delete_backward_at_block_start() {
        let mut block = CodeBlock::from_text("ab", None);
        let mut selection = caret(&block, 0, 0);

        assert!(!delete_backward(&mut block, &mut selection));
        assert_eq!(block.text(), "ab");
    }

    #[test]
    fn test_delete_selected_range() {
        let mut block = CodeBlock::from_text("one\ntwo\nthree", None);
        let anchor = block.point_at(Position::new(0, 1)).unwrap();
        let focus = block.point_at(Position::new(2, 2)).unwrap();
        let mut selection = Some(Selection::new(focus, anchor));

        assert!(delete_backward(&mut block, &mut selection));
        assert_eq!(block.text(), "oree");
        assert_eq!(caret_position(&block, &selection), Position::new(0, 1));
    }

    #[test]
    fn test_newline_carries_indentation() {
        let mut block = CodeBlock::from_text("\t  foo()", None);
        let mut selection = caret(&block, 0, 8);

        let result = insert_newline(&mut block, &mut selection, NewlineOptions::default());
        assert_eq!(result, Some(Newline::Split));
        assert_eq!(block.text(), "\t  foo()\n\t  ");
        assert_eq!(caret_position(&block, &selection), Position::new(1, 3));
    }

    #[test]
    fn test_newline_splits_at_caret() {
        let mut block = CodeBlock::from_text("  ab", None);
        let mut selection = caret(&block, 0, 3);
        let options = NewlineOptions {
            preserve_indent: false,
            ..NewlineOptions::default()
        };

        insert_newline(&mut block, &mut selection, options);
        assert_eq!(block.text(), "  a\nb");
        assert_eq!(caret_position(&block, &selection), Position::new(1, 0));
    }

    #[test]
    fn test_double_newline_exits_block() {
        let mut block = CodeBlock::from_text("foo\n\n", None);
        let mut selection = caret(&block, 2, 0);

        let result = insert_newline(&mut block, &mut selection, NewlineOptions::default());
        assert_eq!(result, Some(Newline::ExitBlock));
        assert_eq!(block.text(), "foo");
        assert!(selection.is_none());
    }

    #[test]
    fn test_double_newline_disabled() {
        let mut block = CodeBlock::from_text("foo\n\n", None);
        let mut selection = caret(&block, 2, 0);
        let options = NewlineOptions {
            exit_on_double_blank: false,
            ..NewlineOptions::default()
        };

        assert_eq!(
            insert_newline(&mut block, &mut selection, options),
            Some(Newline::Split)
        );
        assert_eq!(block.text(), "foo\n\n\n");
    }
}
