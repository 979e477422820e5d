use super::{checked_selection, touched_blocks};
use crate::config::MAX_INDENT;
use crate::document::{Block, BlockType, Document};
use crate::selection::{Position, Selection};
use crate::state::EditorState;
use crate::step::Step;
use crate::transaction::Transaction;

/// Number of blocks right after `index` whose indent is strictly greater than
/// its own (the block's nested children).
pub fn count_indent_children(doc: &Document, index: usize) -> usize {
    let Some(block) = doc.block(index) else {
        return 0;
    };
    doc.blocks()[index + 1..]
        .iter()
        .take_while(|child| child.indent() > block.indent())
        .count()
}

/// Swap the block at `index` (with its children) and the sibling unit above.
///
/// `None` at the top of the document or when the block above belongs to a
/// different indent level (no sibling to swap with).
pub fn move_block_up(state: &EditorState, index: usize) -> Option<Transaction> {
    let doc = state.doc();
    let indent = doc.block(index)?.indent();
    if index == 0 {
        return None;
    }
    let count = 1 + count_indent_children(doc, index);
    let mut above = index - 1;
    while above > 0 && doc.blocks()[above].indent() > indent {
        above -= 1;
    }
    if doc.blocks()[above].indent() != indent {
        return None;
    }
    let moved = index..index + count;
    let sibling = above..index;
    let shift = |block: usize| {
        if moved.contains(&block) {
            block - (index - above)
        } else if sibling.contains(&block) {
            block + count
        } else {
            block
        }
    };
    let tr = Transaction::new()
        .step(Step::MoveBlocks {
            from: index,
            to: above,
            count,
        })
        .with_selection(remap_blocks(state.selection(), shift));
    Some(tr)
}

/// Swap the block at `index` (with its children) and the sibling unit below.
///
/// `None` at the bottom of the document or when the next block after the unit
/// is shallower (no sibling to swap with).
pub fn move_block_down(state: &EditorState, index: usize) -> Option<Transaction> {
    let doc = state.doc();
    let indent = doc.block(index)?.indent();
    let count = 1 + count_indent_children(doc, index);
    let next = index + count;
    if doc.block(next)?.indent() != indent {
        return None;
    }
    let next_count = 1 + count_indent_children(doc, next);
    let moved = index..next;
    let sibling = next..next + next_count;
    let shift = |block: usize| {
        if moved.contains(&block) {
            block + next_count
        } else if sibling.contains(&block) {
            block - count
        } else {
            block
        }
    };
    let tr = Transaction::new()
        .step(Step::MoveBlocks {
            from: index,
            to: index + next_count,
            count,
        })
        .with_selection(remap_blocks(state.selection(), shift));
    Some(tr)
}

fn remap_blocks(selection: Selection, shift: impl Fn(usize) -> usize) -> Selection {
    let remap = |pos: Position| Position::new(shift(pos.block), pos.offset);
    Selection::new(remap(selection.anchor), remap(selection.head))
}

/// Indent every touched block by one level, skipping blocks already at the
/// maximum. `None` if nothing changes.
pub fn indent(state: &EditorState) -> Option<Transaction> {
    shift_indent(state, 1)
}

/// Outdent every touched block by one level, skipping blocks already at zero.
/// `None` if nothing changes.
pub fn outdent(state: &EditorState) -> Option<Transaction> {
    shift_indent(state, -1)
}

fn shift_indent(state: &EditorState, delta: i32) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    let doc = state.doc();
    let mut tr = Transaction::new();
    for index in touched_blocks(selection) {
        let current = i32::from(doc.block(index)?.indent());
        let target = current + delta;
        if (0..=i32::from(MAX_INDENT)).contains(&target) {
            tr.push(Step::SetBlockIndent {
                index,
                indent: target as u8,
            });
        }
    }
    tr.has_steps().then(|| tr.with_selection(selection))
}

/// Set the type of every touched block. `None` if all already have it.
pub fn set_block_type(state: &EditorState, block_type: BlockType) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    let doc = state.doc();
    let mut tr = Transaction::new();
    for index in touched_blocks(selection) {
        if doc.block(index)?.block_type() != &block_type {
            tr.push(Step::SetBlockType {
                index,
                block_type: block_type.clone(),
            });
        }
    }
    tr.has_steps().then(|| tr.with_selection(selection))
}

/// Set every touched block to `block_type`, or back to a paragraph if they
/// all already are `block_type`.
pub fn toggle_block_type(state: &EditorState, block_type: BlockType) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    let doc = state.doc();
    let all_match = touched_blocks(selection)
        .all(|index| doc.block(index).is_some_and(|b| b.block_type() == &block_type));
    if all_match {
        set_block_type(state, BlockType::Paragraph)
    } else {
        set_block_type(state, block_type)
    }
}

/// Set (`Some`) or remove (`None`) a metadata key on the block holding the
/// start of the selection. `None` for an empty key or when nothing changes.
pub fn set_block_meta(state: &EditorState, key: &str, value: Option<&str>) -> Option<Transaction> {
    if key.is_empty() {
        return None;
    }
    let selection = checked_selection(state)?;
    let index = selection.from().block;
    let current = state.doc().block(index)?.meta().get(key).map(String::as_str);
    if current == value {
        return None;
    }
    let tr = Transaction::new()
        .step(Step::SetBlockMeta {
            index,
            key: key.to_string(),
            value: value.map(str::to_string),
        })
        .with_selection(selection);
    Some(tr)
}

/// Insert a copy of block `index` right after it and move the cursor there.
pub fn duplicate_block(state: &EditorState, index: usize) -> Option<Transaction> {
    let copy = state.doc().block(index)?.clone();
    Some(insert_at(index + 1, copy))
}

/// Insert an empty block of `block_type` before block `index`.
pub fn insert_block_before(
    state: &EditorState,
    index: usize,
    block_type: BlockType,
) -> Option<Transaction> {
    state.doc().block(index)?;
    Some(insert_at(index, Block::new(block_type)))
}

/// Insert an empty block of `block_type` after block `index`.
pub fn insert_block_after(
    state: &EditorState,
    index: usize,
    block_type: BlockType,
) -> Option<Transaction> {
    state.doc().block(index)?;
    Some(insert_at(index + 1, Block::new(block_type)))
}

fn insert_at(index: usize, block: Block) -> Transaction {
    Transaction::new()
        .step(Step::InsertBlock { index, block })
        .with_selection(Selection::cursor(index, 0))
}

/// Remove block `index`. The cursor moves to the start of the block before
/// it (or of the new first block). `None` for the only block.
pub fn delete_block(state: &EditorState, index: usize) -> Option<Transaction> {
    let doc = state.doc();
    doc.block(index)?;
    if doc.len() == 1 {
        return None;
    }
    let tr = Transaction::new()
        .step(Step::DeleteBlock { index })
        .with_selection(Selection::cursor(index.saturating_sub(1), 0));
    Some(tr)
}

/// Replace block `index` wholesale. The cursor moves to its start.
pub fn replace_block(state: &EditorState, index: usize, block: Block) -> Option<Transaction> {
    state.doc().block(index)?;
    let tr = Transaction::new()
        .step(Step::ReplaceBlock { index, block })
        .with_selection(Selection::cursor(index, 0));
    Some(tr)
}

/// Select the whole document. `None` if that is already the selection.
pub fn select_all(state: &EditorState) -> Option<Transaction> {
    let doc = state.doc();
    let last = doc.len() - 1;
    let start = Position::new(0, 0);
    let end = Position::new(last, doc.blocks()[last].content_size());
    let current = state.selection();
    if current.from() == start && current.to() == end {
        return None;
    }
    Some(Transaction::new().with_selection(Selection::new(start, end)))
}
