//! Code-block data model
//!
//! - [`node`]: node keys and the closed set of node kinds
//! - [`tree`]: the [`NodeTree`] abstraction the editing operations run against
//! - [`block`]: [`CodeBlock`], the arena-backed tree
//! - [`selection`]: node-relative points and selections
//! - [`editor`]: [`CodeEditor`], block + selection + command chain

pub mod block;
pub mod editor;
pub mod node;
pub mod selection;
pub mod tree;

pub use block::CodeBlock;
pub use editor::CodeEditor;
pub use node::{CodeNode, NodeKey, NodeKind};
pub use selection::{Point, Position, Selection};
pub use tree::{LineBounds, NodeTree};
