//! Command dispatch for code blocks
//!
//! Commands flow through a [`CommandChain`]: handlers are tried from the
//! highest [`CommandPriority`] down, in registration order within a
//! priority, until one returns `true`. The code-block handlers register at
//! [`CommandPriority::Low`] so hosts can override them at any higher level.

use crate::config::EditorConfig;
use crate::model::{CodeBlock, Selection};
use crate::update::{
    boundary_exit, delete_backward, indent_lines, insert_newline, insert_text,
    move_to_line_boundary, shift_lines, BlockExit, IndentDirection, LineBoundary, Newline,
    ShiftDirection,
};

/// Keyboard modifiers held with a key command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub alt: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        shift: false,
        ctrl: false,
        meta: false,
    };

    pub const ALT: Modifiers = Modifiers {
        alt: true,
        shift: false,
        ctrl: false,
        meta: false,
    };
}

/// Commands a code block responds to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeCommand {
    /// Tab with a selection
    Indent,
    /// Shift+Tab
    Outdent,
    ArrowUp(Modifiers),
    ArrowDown(Modifiers),
    /// Home
    MoveToLineStart,
    /// End
    MoveToLineEnd,
    InsertText(String),
    InsertNewline,
    DeleteBackward,
}

impl CodeCommand {
    /// Human-readable name, used in logs
    pub fn display_name(&self) -> &'static str {
        match self {
            CodeCommand::Indent => "Indent",
            CodeCommand::Outdent => "Outdent",
            CodeCommand::ArrowUp(m) if m.alt => "Move Lines Up",
            CodeCommand::ArrowUp(_) => "Arrow Up",
            CodeCommand::ArrowDown(m) if m.alt => "Move Lines Down",
            CodeCommand::ArrowDown(_) => "Arrow Down",
            CodeCommand::MoveToLineStart => "Move To Line Start",
            CodeCommand::MoveToLineEnd => "Move To Line End",
            CodeCommand::InsertText(_) => "Insert Text",
            CodeCommand::InsertNewline => "Insert Newline",
            CodeCommand::DeleteBackward => "Delete Backward",
        }
    }
}

/// Handler priority. Higher priorities run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandPriority {
    Editor,
    Low,
    Normal,
    High,
    Critical,
}

/// State a handler may read and mutate
pub struct CommandContext<'a> {
    pub block: &'a mut CodeBlock,
    pub selection: &'a mut Option<Selection>,
    pub config: &'a EditorConfig,
    /// Set by a handler that wants the caret to leave the block
    pub exit: Option<BlockExit>,
}

/// Identifies a registration for [`CommandChain::unregister`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler = Box<dyn FnMut(&CodeCommand, &mut CommandContext<'_>) -> bool>;

struct Registration {
    id: HandlerId,
    name: &'static str,
    priority: CommandPriority,
    handler: Handler,
}

/// Priority-ordered chain of responsibility
#[derive(Default)]
pub struct CommandChain {
    handlers: Vec<Registration>,
    next_id: u64,
}

impl CommandChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Among equal priorities, earlier registrations run
    /// first.
    pub fn register<F>(&mut self, name: &'static str, priority: CommandPriority, handler: F) -> HandlerId
    where
        F: FnMut(&CodeCommand, &mut CommandContext<'_>) -> bool + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;

        // Kept sorted by descending priority; insert after every handler of
        // equal or higher priority
        let index = self
            .handlers
            .iter()
            .position(|r| r.priority < priority)
            .unwrap_or(self.handlers.len());
        self.handlers.insert(
            index,
            Registration {
                id,
                name,
                priority,
                handler: Box::new(handler),
            },
        );
        id
    }

    pub fn unregister(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|r| r.id != id);
        self.handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run handlers until one reports the command handled
    pub fn dispatch(&mut self, command: &CodeCommand, ctx: &mut CommandContext<'_>) -> bool {
        for registration in &mut self.handlers {
            if (registration.handler)(command, ctx) {
                tracing::debug!(
                    command = command.display_name(),
                    handler = registration.name,
                    priority = ?registration.priority,
                    "command handled"
                );
                return true;
            }
        }
        tracing::trace!(command = command.display_name(), "command not handled");
        false
    }
}

impl std::fmt::Debug for CommandChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|r| (r.name, r.priority)))
            .finish()
    }
}

/// Install the code-block handlers at [`CommandPriority::Low`]
pub fn register_code_handlers(chain: &mut CommandChain) -> Vec<HandlerId> {
    let priority = CommandPriority::Low;
    vec![
        chain.register("indent", priority, |command, ctx| {
            *command == CodeCommand::Indent && indent(ctx, IndentDirection::Indent)
        }),
        chain.register("outdent", priority, |command, ctx| {
            *command == CodeCommand::Outdent && indent(ctx, IndentDirection::Outdent)
        }),
        chain.register("arrow-up", priority, |command, ctx| match command {
            CodeCommand::ArrowUp(modifiers) => arrow(ctx, *modifiers, ShiftDirection::Up),
            _ => false,
        }),
        chain.register("arrow-down", priority, |command, ctx| match command {
            CodeCommand::ArrowDown(modifiers) => arrow(ctx, *modifiers, ShiftDirection::Down),
            _ => false,
        }),
        chain.register("move-to-line-start", priority, |command, ctx| {
            *command == CodeCommand::MoveToLineStart && line_boundary(ctx, LineBoundary::Start)
        }),
        chain.register("move-to-line-end", priority, |command, ctx| {
            *command == CodeCommand::MoveToLineEnd && line_boundary(ctx, LineBoundary::End)
        }),
        chain.register("insert-text", priority, |command, ctx| match command {
            CodeCommand::InsertText(text) => insert_text(ctx.block, ctx.selection, text),
            _ => false,
        }),
        chain.register("insert-newline", priority, |command, ctx| {
            *command == CodeCommand::InsertNewline && newline(ctx)
        }),
        chain.register("delete-backward", priority, |command, ctx| {
            *command == CodeCommand::DeleteBackward && delete_backward(ctx.block, ctx.selection)
        }),
    ]
}

fn indent(ctx: &mut CommandContext<'_>, direction: IndentDirection) -> bool {
    let Some(selection) = ctx.selection.as_mut() else {
        return false;
    };
    indent_lines(&mut *ctx.block, selection, direction)
}

fn arrow(ctx: &mut CommandContext<'_>, modifiers: Modifiers, direction: ShiftDirection) -> bool {
    let Some(selection) = ctx.selection.as_mut() else {
        return false;
    };

    if modifiers.alt {
        return shift_lines(&mut *ctx.block, selection, direction);
    }

    match boundary_exit(&*ctx.block, selection, direction == ShiftDirection::Up) {
        Some(exit) => {
            ctx.exit = Some(exit);
            true
        }
        None => false,
    }
}

fn line_boundary(ctx: &mut CommandContext<'_>, boundary: LineBoundary) -> bool {
    let Some(selection) = ctx.selection.as_mut() else {
        return false;
    };
    move_to_line_boundary(&*ctx.block, selection, boundary)
}

fn newline(ctx: &mut CommandContext<'_>) -> bool {
    match insert_newline(ctx.block, ctx.selection, ctx.config.newline_options()) {
        Some(Newline::ExitBlock) => {
            ctx.exit = Some(BlockExit::After);
            true
        }
        Some(Newline::Split) => true,
        None => false,
    }
}
