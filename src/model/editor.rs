//! Host-facing code-block editor
//!
//! Owns a [`CodeBlock`], the current selection and a [`CommandChain`] with
//! the code-block handlers installed. After a dispatch that changed content
//! the gutter is re-rendered and mutation listeners run.

use super::block::CodeBlock;
use super::selection::{Position, Selection};
use super::tree::NodeTree;
use crate::commands::{register_code_handlers, CodeCommand, CommandChain};
use crate::config::EditorConfig;
use crate::gutter::Gutter;
use crate::update::BlockExit;

type MutationListener = Box<dyn FnMut(&CodeBlock)>;

pub struct CodeEditor {
    block: CodeBlock,
    selection: Option<Selection>,
    config: EditorConfig,
    chain: CommandChain,
    gutter: Gutter,
    listeners: Vec<MutationListener>,
    exit: Option<BlockExit>,
}

impl CodeEditor {
    pub fn new(block: CodeBlock, config: EditorConfig) -> Self {
        let mut chain = CommandChain::new();
        register_code_handlers(&mut chain);

        let mut gutter = Gutter::new(config.gutter_start);
        gutter.render(&block);

        Self {
            block,
            selection: None,
            config,
            chain,
            gutter,
            listeners: Vec::new(),
            exit: None,
        }
    }

    /// Tokenize `text` into a new block. Without a language the config's
    /// default language is used.
    pub fn from_text(text: &str, language: Option<&str>, config: EditorConfig) -> Self {
        let language = language.or(config.default_language.as_deref());
        let block = CodeBlock::from_text(text, language);
        Self::new(block, config)
    }

    pub fn block(&self) -> &CodeBlock {
        &self.block
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn gutter(&self) -> &Gutter {
        &self.gutter
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    /// Select from `anchor` to `focus`. Returns false if either position
    /// does not exist in the block.
    pub fn select(&mut self, anchor: Position, focus: Position) -> bool {
        match (self.block.point_at(anchor), self.block.point_at(focus)) {
            (Some(anchor), Some(focus)) => {
                self.selection = Some(Selection::new(anchor, focus));
                true
            }
            _ => false,
        }
    }

    /// Collapse the selection at `position`
    pub fn set_caret(&mut self, position: Position) -> bool {
        self.select(position, position)
    }

    /// (line, column) of the selection focus
    pub fn caret_position(&self) -> Option<Position> {
        self.block.position_of(self.selection?.focus)
    }

    /// Handlers may be added at any priority to override the built-in ones
    pub fn chain_mut(&mut self) -> &mut CommandChain {
        &mut self.chain
    }

    /// Register a callback run after every content-changing dispatch
    pub fn on_mutation(&mut self, listener: impl FnMut(&CodeBlock) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The pending block-exit request, if any
    pub fn take_exit(&mut self) -> Option<BlockExit> {
        self.exit.take()
    }

    /// Change the block's language and re-tokenize every line
    pub fn set_language(&mut self, language: Option<&str>) {
        let revision = self.block.revision();
        self.block.set_language(language);
        if self.block.revision() != revision {
            self.notify();
        }
    }

    /// Run a command through the chain. Returns whether a handler took it.
    pub fn dispatch(&mut self, command: CodeCommand) -> bool {
        let revision = self.block.revision();

        let mut ctx = crate::commands::CommandContext {
            block: &mut self.block,
            selection: &mut self.selection,
            config: &self.config,
            exit: None,
        };
        let handled = self.chain.dispatch(&command, &mut ctx);
        let exit = ctx.exit;

        if exit.is_some() {
            self.exit = exit;
        }

        // A selection left pointing at removed nodes is dropped
        if let Some(selection) = self.selection {
            if !self.block.contains(selection.anchor.key) || !self.block.contains(selection.focus.key) {
                tracing::debug!("selection left the block, clearing it");
                self.selection = None;
            }
        }

        if self.block.revision() != revision {
            self.notify();
        }
        handled
    }

    fn notify(&mut self) {
        self.gutter.render(&self.block);
        for listener in &mut self.listeners {
            listener(&self.block);
        }
    }
}
