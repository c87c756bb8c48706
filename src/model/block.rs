//! Arena-backed code block
//!
//! Nodes live in a `Vec` of slots addressed by [`NodeKey`]; sequence order is
//! kept as prev/next links stored alongside each node. Slots of removed
//! nodes are never reused, so a stale key can only ever miss.

use super::node::{CodeNode, NodeKey};
use super::tree::{LineBounds, NodeTree};
use crate::syntax::{tokenize, tokenize_line, LanguageId, Line, Token};

#[derive(Debug, Clone)]
struct Slot {
    node: CodeNode,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
    attached: bool,
}

/// A tokenized code block: lines of highlight tokens separated by line breaks
#[derive(Debug, Clone, Default)]
pub struct CodeBlock {
    slots: Vec<Option<Slot>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    /// Language identifier as given by the host (`None` = no highlighting)
    language: Option<String>,
    /// Bumped on every structural or content change
    revision: u64,
}

impl CodeBlock {
    /// Create an empty block (one empty line)
    pub fn new(language: Option<&str>) -> Self {
        Self {
            language: language.map(str::to_owned),
            ..Self::default()
        }
    }

    /// Tokenize `text` and build a block from it
    pub fn from_text(text: &str, language: Option<&str>) -> Self {
        let lines = tokenize(text, LanguageId::resolve(language));
        Self::from_lines(lines, language)
    }

    /// Build a block from already tokenized lines.
    ///
    /// Empty tokens are dropped.
    pub fn from_lines(lines: Vec<Line>, language: Option<&str>) -> Self {
        let mut block = Self::new(language);
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                let key = block.create(CodeNode::LineBreak);
                block.append(key);
            }
            for token in line.tokens.into_iter().filter(|t| !t.is_empty()) {
                let key = block.create(CodeNode::Highlight(token));
                block.append(key);
            }
        }
        block.revision = 0;
        block
    }

    /// Language identifier as given by the host
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Grammar used for tokenization
    pub fn language_id(&self) -> LanguageId {
        LanguageId::resolve(self.language())
    }

    /// Change the language and re-tokenize every line
    pub fn set_language(&mut self, language: Option<&str>) {
        self.language = language.map(str::to_owned);
        self.revision += 1;
        self.rehighlight();
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of attached nodes
    pub fn node_count(&self) -> usize {
        self.keys().len()
    }

    /// Raw source text (lossless)
    pub fn text(&self) -> String {
        let mut text = String::new();
        let mut current = self.head;
        while let Some(key) = current {
            if let Some(slot) = self.slot(key) {
                text.push_str(slot.node.text());
                current = slot.next;
            } else {
                break;
            }
        }
        text
    }

    /// Snapshot of all lines
    pub fn lines(&self) -> Vec<Line> {
        let mut lines = vec![Line::default()];
        let mut current = self.head;
        while let Some(key) = current {
            let Some(slot) = self.slot(key) else {
                break;
            };
            match &slot.node {
                CodeNode::Highlight(token) => {
                    if let Some(line) = lines.last_mut() {
                        line.tokens.push(token.clone());
                    }
                }
                CodeNode::LineBreak => lines.push(Line::default()),
            }
            current = slot.next;
        }
        lines
    }

    /// Whether any attached token has empty text
    pub fn has_empty_tokens(&self) -> bool {
        self.keys()
            .into_iter()
            .filter_map(|k| self.token(k))
            .any(Token::is_empty)
    }

    /// Replace a line's text, re-tokenizing it.
    ///
    /// Tokens matching the old sequence by text and class at the start and
    /// end of the line keep their keys; only the differing middle run is
    /// replaced. Returns whether any node changed. `text` must not contain
    /// a line break.
    pub fn set_line_text(&mut self, line: usize, text: &str) -> bool {
        match self.line_bounds(line) {
            Some(bounds) => self.set_bounds_text(line, &bounds, text),
            None => false,
        }
    }

    /// [`CodeBlock::set_line_text`] for a line whose bounds are already known.
    ///
    /// Only the line's own tokens are touched, so bounds collected for other
    /// lines stay valid afterwards.
    fn set_bounds_text(&mut self, line: usize, bounds: &LineBounds, text: &str) -> bool {
        let new_tokens = tokenize_line(text, self.language_id()).tokens;
        let old = &bounds.tokens;

        let same = |block: &Self, key: NodeKey, token: &Token| {
            block.token(key).is_some_and(|t| t.same_content(token))
        };

        let mut prefix = 0;
        while prefix < old.len()
            && prefix < new_tokens.len()
            && same(self, old[prefix], &new_tokens[prefix])
        {
            prefix += 1;
        }

        let mut suffix = 0;
        while suffix < old.len() - prefix
            && suffix < new_tokens.len() - prefix
            && same(
                self,
                old[old.len() - 1 - suffix],
                &new_tokens[new_tokens.len() - 1 - suffix],
            )
        {
            suffix += 1;
        }

        let stale = &old[prefix..old.len() - suffix];
        let fresh = &new_tokens[prefix..new_tokens.len() - suffix];
        if stale.is_empty() && fresh.is_empty() {
            return false;
        }

        for &key in stale {
            self.remove(key);
        }

        let mut after = if prefix > 0 {
            Some(old[prefix - 1])
        } else {
            bounds.before
        };
        for token in fresh {
            let key = self.create(CodeNode::Highlight(token.clone()));
            self.insert_after_or_prepend(after, key);
            after = Some(key);
        }

        tracing::trace!(
            line,
            reused = prefix + suffix,
            replaced = stale.len(),
            inserted = fresh.len(),
            "Re-tokenized line"
        );
        true
    }

    /// Re-tokenize a line from its current text
    pub fn retokenize_line(&mut self, line: usize) -> bool {
        match self.line_text(line) {
            Some(text) => self.set_line_text(line, &text),
            None => false,
        }
    }

    /// Re-tokenize every line
    pub fn rehighlight(&mut self) {
        let mut changed = 0;
        for (line, bounds) in self.all_line_bounds().iter().enumerate() {
            let text = self.bounds_text(bounds);
            if self.set_bounds_text(line, bounds, &text) {
                changed += 1;
            }
        }
        tracing::debug!(
            language = ?self.language_id(),
            changed,
            "Re-highlighted code block"
        );
    }

    /// Replace lines `start..=end` with the lines of `text` (which may
    /// contain line breaks), re-tokenizing each resulting line.
    ///
    /// Returns false if the range does not exist.
    pub fn replace_lines(&mut self, start: usize, end: usize, text: &str) -> bool {
        let all = self.all_line_bounds();
        if start > end || end >= all.len() {
            return false;
        }

        let new_lines: Vec<&str> = text.split('\n').collect();
        let old_count = end - start + 1;
        let new_count = new_lines.len();

        let mut bounds: Vec<LineBounds> = all[start..=end].to_vec();
        if new_count > old_count {
            // Open empty lines after `end`
            let mut after = bounds.last().and_then(LineBounds::last_node);
            let terminator = bounds.last_mut().and_then(|b| b.terminator.take());
            for _ in old_count..new_count {
                let key = self.create(CodeNode::LineBreak);
                self.insert_after_or_prepend(after, key);
                if let Some(last) = bounds.last_mut() {
                    last.terminator = Some(key);
                }
                bounds.push(LineBounds {
                    before: Some(key),
                    ..LineBounds::default()
                });
                after = Some(key);
            }
            if let Some(last) = bounds.last_mut() {
                last.terminator = terminator;
            }
        } else if new_count < old_count {
            // Drop surplus lines together with the break in front of each
            for surplus in bounds.drain(new_count..).rev() {
                for key in surplus.tokens {
                    self.remove(key);
                }
                if let Some(before) = surplus.before {
                    self.remove(before);
                }
            }
        }

        for (i, (bounds, line_text)) in bounds.iter().zip(&new_lines).enumerate() {
            self.set_bounds_text(start + i, bounds, line_text);
        }
        true
    }

    fn slot(&self, key: NodeKey) -> Option<&Slot> {
        self.slots.get(key.0 as usize)?.as_ref()
    }

    fn slot_mut(&mut self, key: NodeKey) -> Option<&mut Slot> {
        self.slots.get_mut(key.0 as usize)?.as_mut()
    }

    /// Link a detached node between `prev` and `next`
    fn link(&mut self, key: NodeKey, prev: Option<NodeKey>, next: Option<NodeKey>) -> bool {
        match self.slot_mut(key) {
            Some(slot) if !slot.attached => {
                slot.prev = prev;
                slot.next = next;
                slot.attached = true;
            }
            _ => return false,
        }

        match prev.and_then(|p| self.slot_mut(p)) {
            Some(slot) => slot.next = Some(key),
            None => self.head = Some(key),
        }
        match next.and_then(|n| self.slot_mut(n)) {
            Some(slot) => slot.prev = Some(key),
            None => self.tail = Some(key),
        }

        self.revision += 1;
        true
    }

    fn is_attached(&self, key: NodeKey) -> bool {
        self.slot(key).is_some_and(|s| s.attached)
    }
}

impl NodeTree for CodeBlock {
    fn node(&self, key: NodeKey) -> Option<&CodeNode> {
        self.slot(key).map(|s| &s.node)
    }

    fn node_mut(&mut self, key: NodeKey) -> Option<&mut CodeNode> {
        if self.slot(key).is_none() {
            return None;
        }
        self.revision += 1;
        self.slot_mut(key).map(|s| &mut s.node)
    }

    fn contains(&self, key: NodeKey) -> bool {
        self.is_attached(key)
    }

    fn first(&self) -> Option<NodeKey> {
        self.head
    }

    fn last(&self) -> Option<NodeKey> {
        self.tail
    }

    fn previous(&self, key: NodeKey) -> Option<NodeKey> {
        self.slot(key).filter(|s| s.attached).and_then(|s| s.prev)
    }

    fn next(&self, key: NodeKey) -> Option<NodeKey> {
        self.slot(key).filter(|s| s.attached).and_then(|s| s.next)
    }

    fn create(&mut self, node: CodeNode) -> NodeKey {
        let key = NodeKey(self.slots.len() as u32);
        self.slots.push(Some(Slot {
            node,
            prev: None,
            next: None,
            attached: false,
        }));
        key
    }

    fn insert_before(&mut self, anchor: NodeKey, key: NodeKey) -> bool {
        if anchor == key || !self.is_attached(anchor) {
            return false;
        }
        self.detach(key);
        let prev = self.previous(anchor);
        self.link(key, prev, Some(anchor))
    }

    fn insert_after(&mut self, anchor: NodeKey, key: NodeKey) -> bool {
        if anchor == key || !self.is_attached(anchor) {
            return false;
        }
        self.detach(key);
        let next = self.next(anchor);
        self.link(key, Some(anchor), next)
    }

    fn prepend(&mut self, key: NodeKey) -> bool {
        self.detach(key);
        let head = self.head;
        self.link(key, None, head)
    }

    fn append(&mut self, key: NodeKey) -> bool {
        self.detach(key);
        let tail = self.tail;
        self.link(key, tail, None)
    }

    fn detach(&mut self, key: NodeKey) -> bool {
        let (prev, next) = match self.slot_mut(key) {
            Some(slot) if slot.attached => {
                slot.attached = false;
                (slot.prev.take(), slot.next.take())
            }
            _ => return false,
        };

        match prev.and_then(|p| self.slot_mut(p)) {
            Some(slot) => slot.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.slot_mut(n)) {
            Some(slot) => slot.prev = prev,
            None => self.tail = prev,
        }

        self.revision += 1;
        true
    }

    fn remove(&mut self, key: NodeKey) -> Option<CodeNode> {
        self.detach(key);
        let slot = self.slots.get_mut(key.0 as usize)?.take()?;
        self.revision += 1;
        Some(slot.node)
    }
}
