//! Home / End motion and block-boundary arrows

mod common;

use codeblock::commands::{CodeCommand, Modifiers};
use codeblock::model::{CodeBlock, NodeTree, Position};
use codeblock::update::{move_to_line_boundary, BlockExit, LineBoundary};
use common::{caret, select, test_editor, test_editor_in, test_editor_with_selection};

// ========================================================================
// Move to line start
// ========================================================================

#[test]
fn test_home_goes_to_first_code_char() {
    let mut editor = test_editor("\t\tlet x = 1;", 0, 9);
    assert!(editor.dispatch(CodeCommand::MoveToLineStart));
    assert_eq!(caret(&editor), Position::new(0, 2));
}

#[test]
fn test_home_across_highlighted_tokens() {
    let mut editor = test_editor_in("    return foo(bar);", Some("js"), 0, 18);
    assert!(editor.dispatch(CodeCommand::MoveToLineStart));
    assert_eq!(caret(&editor), Position::new(0, 4));
}

#[test]
fn test_home_from_inside_indentation() {
    let mut editor = test_editor_in("    x = 1", Some("python"), 0, 1);
    assert!(editor.dispatch(CodeCommand::MoveToLineStart));
    assert_eq!(caret(&editor), Position::new(0, 4));
}

#[test]
fn test_home_on_tab_only_line_is_valid_offset() {
    let block = CodeBlock::from_text("a\n\t\t\nb", None);
    let mut selection = select(&block, (1, 1), (1, 1));

    assert!(move_to_line_boundary(&block, &mut selection, LineBoundary::Start));
    let token = block.token(selection.focus.key).expect("caret on a token");
    assert!(selection.focus.offset <= token.len());
    assert_eq!(block.position_of(selection.focus), Some(Position::new(1, 2)));
}

// ========================================================================
// Move to line end
// ========================================================================

#[test]
fn test_end_stops_before_trailing_whitespace() {
    let mut editor = test_editor_in("  foo();   ", Some("rust"), 0, 0);
    assert!(editor.dispatch(CodeCommand::MoveToLineEnd));
    assert_eq!(caret(&editor), Position::new(0, 8));
}

#[test]
fn test_end_on_second_line() {
    let mut editor = test_editor_in("a\n\tb // c\nd", Some("js"), 1, 0);
    assert!(editor.dispatch(CodeCommand::MoveToLineEnd));
    assert_eq!(caret(&editor), Position::new(1, 7));
}

#[test]
fn test_motion_collapses_selection() {
    let mut editor = test_editor_with_selection("  abc  ", (0, 3), (0, 5));
    assert!(editor.dispatch(CodeCommand::MoveToLineEnd));

    let selection = editor.selection().unwrap();
    assert!(selection.is_collapsed());
    assert_eq!(caret(&editor), Position::new(0, 5));
}

#[test]
fn test_motion_on_empty_line_keeps_caret() {
    let mut editor = test_editor("a\n\nb", 1, 0);
    assert!(editor.dispatch(CodeCommand::MoveToLineStart));
    assert_eq!(caret(&editor), Position::new(1, 0));
    assert!(editor.dispatch(CodeCommand::MoveToLineEnd));
    assert_eq!(caret(&editor), Position::new(1, 0));
}

#[test]
fn test_motion_does_not_mutate() {
    let mut editor = test_editor("  x  ", 0, 0);
    let revision = editor.block().revision();
    editor.dispatch(CodeCommand::MoveToLineEnd);
    editor.dispatch(CodeCommand::MoveToLineStart);
    assert_eq!(editor.block().revision(), revision);
    assert_eq!(editor.gutter().renders(), 1);
}

// ========================================================================
// Block boundary exit
// ========================================================================

#[test]
fn test_up_at_block_start_requests_exit() {
    let mut editor = test_editor("ab\ncd", 0, 0);
    assert!(editor.dispatch(CodeCommand::ArrowUp(Modifiers::NONE)));
    assert_eq!(editor.take_exit(), Some(BlockExit::Before));
}

#[test]
fn test_down_at_block_end_requests_exit() {
    let mut editor = test_editor("ab\ncd", 1, 2);
    assert!(editor.dispatch(CodeCommand::ArrowDown(Modifiers::NONE)));
    assert_eq!(editor.take_exit(), Some(BlockExit::After));
}

#[test]
fn test_arrow_inside_block_passes_through() {
    let mut editor = test_editor("ab\ncd", 1, 0);
    assert!(!editor.dispatch(CodeCommand::ArrowUp(Modifiers::NONE)));
    assert!(!editor.dispatch(CodeCommand::ArrowDown(Modifiers::NONE)));
    assert_eq!(editor.take_exit(), None);
}

#[test]
fn test_arrow_with_range_selection_passes_through() {
    let mut editor = test_editor_with_selection("ab", (0, 0), (0, 2));
    assert!(!editor.dispatch(CodeCommand::ArrowUp(Modifiers::NONE)));
    assert!(!editor.dispatch(CodeCommand::ArrowDown(Modifiers::NONE)));
}
