//! Moving a run of lines past its neighbour (Alt+Up / Alt+Down)
//!
//! Nodes are detached and re-inserted, never recreated, so every key and
//! every token's class survive the move.

use crate::model::{NodeKey, NodeTree, Point, Position, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Up,
    Down,
}

/// Move the lines spanned by the selection one line up or down.
///
/// Returns false when the selection leaves the block or the run already sits
/// at the block boundary in `direction`.
pub fn shift_lines<T: NodeTree>(
    tree: &mut T,
    selection: &mut Selection,
    direction: ShiftDirection,
) -> bool {
    let Some((start, end)) = tree.selection_range(selection) else {
        return false;
    };
    let (first_line, last_line) = (start.line, end.line);

    match direction {
        ShiftDirection::Up if first_line == 0 => return false,
        ShiftDirection::Down if last_line + 1 >= tree.line_count() => return false,
        _ => {}
    }

    // Points on line breaks would otherwise change meaning when the breaks move
    let anchor = break_position(tree, selection.anchor);
    let focus = break_position(tree, selection.focus);

    let (Some(first), Some(last)) = (tree.line_bounds(first_line), tree.line_bounds(last_line))
    else {
        return false;
    };

    let moved = match direction {
        ShiftDirection::Up => {
            let Some(above) = tree.line_bounds(first_line - 1) else {
                return false;
            };
            let Some(separator) = first.before else {
                return false;
            };
            let mut nodes = run_between(tree, first.before, last.terminator);
            nodes.push(separator);
            move_after(tree, &nodes, above.before)
        }
        ShiftDirection::Down => {
            let Some(below) = tree.line_bounds(last_line + 1) else {
                return false;
            };
            let Some(separator) = last.terminator else {
                return false;
            };
            let mut nodes = below.tokens;
            nodes.push(separator);
            move_after(tree, &nodes, first.before)
        }
    };

    if !moved {
        tracing::warn!(?direction, first_line, last_line, "line shift left block inconsistent");
        return false;
    }

    let delta = |position: Position| match direction {
        ShiftDirection::Up => Position::new(position.line - 1, position.column),
        ShiftDirection::Down => Position::new(position.line + 1, position.column),
    };
    if let Some(point) = anchor.and_then(|p| tree.point_at(delta(p))) {
        selection.anchor = point;
    }
    if let Some(point) = focus.and_then(|p| tree.point_at(delta(p))) {
        selection.focus = point;
    }

    tracing::debug!(?direction, first_line, last_line, "shifted lines");
    true
}

/// Position of a point that sits on a line break
fn break_position<T: NodeTree>(tree: &T, point: Point) -> Option<Position> {
    if tree.is_line_break(point.key) {
        tree.position_of(point)
    } else {
        None
    }
}

/// Attached nodes strictly between `after` and `until` (block start/end for `None`)
fn run_between<T: NodeTree>(
    tree: &T,
    after: Option<NodeKey>,
    until: Option<NodeKey>,
) -> Vec<NodeKey> {
    let mut nodes = Vec::new();
    let mut current = match after {
        Some(key) => tree.next(key),
        None => tree.first(),
    };
    while let Some(key) = current {
        if Some(key) == until {
            break;
        }
        nodes.push(key);
        current = tree.next(key);
    }
    nodes
}

/// Detach `nodes` and re-insert them in order after `anchor` (or at the start)
fn move_after<T: NodeTree>(tree: &mut T, nodes: &[NodeKey], anchor: Option<NodeKey>) -> bool {
    for &key in nodes {
        if !tree.detach(key) {
            return false;
        }
    }

    let mut previous = anchor;
    for &key in nodes {
        if !tree.insert_after_or_prepend(previous, key) {
            return false;
        }
        previous = Some(key);
    }
    true
}
