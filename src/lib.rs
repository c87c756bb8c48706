//! Tokenized code blocks for rich-text editors
//!
//! A code block is a flat sequence of syntax-highlight tokens and line
//! breaks. This crate provides the per-line tokenizer, the block model and
//! the line-aware editing commands (indent, move lines, Home/End) that run
//! on it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod gutter;
pub mod model;
pub mod serialization;
pub mod syntax;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::{CodeCommand, CommandChain, CommandPriority, Modifiers};
pub use config::EditorConfig;
pub use model::{CodeBlock, CodeEditor, CodeNode, NodeKey, NodeTree, Point, Position, Selection};
pub use syntax::{LanguageId, Token, TokenClass};
pub use update::BlockExit;
