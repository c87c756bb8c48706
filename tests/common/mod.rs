//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use codeblock::config::EditorConfig;
use codeblock::model::{CodeBlock, CodeEditor, NodeTree, Position, Selection};

/// Create an editor over plain text with the caret at (line, column)
pub fn test_editor(text: &str, line: usize, column: usize) -> CodeEditor {
    test_editor_in(text, None, line, column)
}

/// Create an editor in `language` with the caret at (line, column)
pub fn test_editor_in(
    text: &str,
    language: Option<&str>,
    line: usize,
    column: usize,
) -> CodeEditor {
    let mut editor = CodeEditor::new(CodeBlock::from_text(text, language), EditorConfig::default());
    assert!(
        editor.set_caret(Position::new(line, column)),
        "caret ({}, {}) outside test text",
        line,
        column
    );
    editor
}

/// Create an editor with a selection from anchor to focus, as (line, column)
pub fn test_editor_with_selection(
    text: &str,
    anchor: (usize, usize),
    focus: (usize, usize),
) -> CodeEditor {
    let mut editor = CodeEditor::new(CodeBlock::from_text(text, None), EditorConfig::default());
    assert!(editor.select(
        Position::new(anchor.0, anchor.1),
        Position::new(focus.0, focus.1)
    ));
    editor
}

/// Anchor and focus of the editor's selection as positions
pub fn selection_positions(editor: &CodeEditor) -> (Position, Position) {
    let selection = editor.selection().expect("editor has a selection");
    let block = editor.block();
    (
        block.position_of(selection.anchor).expect("anchor in block"),
        block.position_of(selection.focus).expect("focus in block"),
    )
}

pub fn caret(editor: &CodeEditor) -> Position {
    editor.caret_position().expect("editor has a caret")
}

/// Selection over a block from (line, column) to (line, column)
pub fn select(block: &CodeBlock, anchor: (usize, usize), focus: (usize, usize)) -> Selection {
    Selection::new(
        block.point_at(Position::new(anchor.0, anchor.1)).expect("anchor position"),
        block.point_at(Position::new(focus.0, focus.1)).expect("focus position"),
    )
}

/// Token texts per line, for asserting token structure
pub fn token_texts(block: &CodeBlock) -> Vec<Vec<String>> {
    block
        .lines()
        .into_iter()
        .map(|line| line.tokens.into_iter().map(|t| t.text).collect())
        .collect()
}
