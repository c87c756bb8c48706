//! Line-number gutter
//!
//! The gutter is a plain string of line numbers, one per line, kept in sync
//! with the block by re-rendering after every content mutation.

use crate::model::NodeTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gutter {
    start: usize,
    text: String,
    renders: u64,
}

impl Default for Gutter {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Gutter {
    /// A gutter numbering lines from `start`
    pub fn new(start: usize) -> Self {
        Self {
            start,
            text: gutter_text(1, start),
            renders: 0,
        }
    }

    pub fn render<T: NodeTree>(&mut self, tree: &T) {
        self.text = gutter_text(tree.line_count(), self.start);
        self.renders += 1;
    }

    /// Numbers joined by `\n`
    pub fn text(&self) -> &str {
        &self.text
    }

    /// How many times [`Gutter::render`] ran
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Width in chars of the widest number
    pub fn width(&self) -> usize {
        self.text.lines().map(str::len).max().unwrap_or(1)
    }
}

/// Line numbers `start..start + line_count` joined by `\n`
pub fn gutter_text(line_count: usize, start: usize) -> String {
    (start..start + line_count.max(1))
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
