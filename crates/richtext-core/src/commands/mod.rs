//! Editing commands.
//!
//! # Overview
//!
//! A command turns a user intent (typing, backspace, indent, paste, ...) into a
//! [`Transaction`] built against a snapshot of an [`EditorState`]. Commands
//! never mutate the state; the caller applies the returned transaction and
//! records its inverse.
//!
//! `None` means the command does not apply to the current state (a cursor-only
//! command on a range, an index out of bounds, nothing left to change). The
//! caller must leave state and history alone in that case.
//!
//! Commands fall into four groups:
//!
//! - **Text**: [`insert_text`], [`delete_char_before`], [`delete_char_after`],
//!   [`delete_word_before`], [`delete_word_after`], [`delete_selection`],
//!   [`split_block`], [`insert_line_break`], [`join_with_previous`],
//!   [`join_with_next`], [`force_join_with_previous`], [`force_join_with_next`]
//! - **Blocks**: [`move_block_up`], [`move_block_down`], [`indent`],
//!   [`outdent`], [`set_block_type`], [`toggle_block_type`],
//!   [`set_block_meta`], [`duplicate_block`], [`insert_block_before`],
//!   [`insert_block_after`], [`delete_block`], [`replace_block`],
//!   [`select_all`]
//! - **Formatting**: [`apply_format`], [`remove_format`], [`toggle_format`],
//!   [`apply_link`], [`update_link`], [`remove_link`], [`clear_formatting`]
//! - **Clipboard**: [`extract_selection`], [`paste`], [`paste_text`]
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{commands, Document, EditorState, Selection};
//!
//! let mut state = EditorState::new(Document::from_paragraphs(["Hello"]), Selection::range(0, 1, 0, 4));
//! let tr = commands::insert_text(&state, "a").unwrap();
//! state.apply(&tr).unwrap();
//!
//! assert_eq!(state.doc().block_texts(), ["Hao"]);
//! assert_eq!(state.selection(), Selection::cursor(0, 2));
//! ```

mod block;
mod clipboard;
mod format;
mod text;

pub use block::{
    count_indent_children, delete_block, duplicate_block, indent, insert_block_after,
    insert_block_before, move_block_down, move_block_up, outdent, replace_block, select_all,
    set_block_meta, set_block_type, toggle_block_type,
};
pub use clipboard::{extract_selection, paste, paste_text};
pub use format::{
    apply_format, apply_link, clear_formatting, remove_format, remove_link, toggle_format,
    update_link,
};
pub use text::{
    delete_char_after, delete_char_before, delete_selection, delete_word_after,
    delete_word_before, force_join_with_next, force_join_with_previous, insert_line_break,
    insert_text, join_with_next, join_with_previous, split_block,
};

use crate::document::Document;
use crate::selection::{Position, Selection};
use crate::state::EditorState;
use crate::step::Step;
use crate::transaction::Transaction;

/// The state's selection, if both endpoints address the document.
fn checked_selection(state: &EditorState) -> Option<Selection> {
    let selection = state.selection();
    let doc = state.doc();
    let valid = |pos: Position| {
        doc.block(pos.block)
            .is_some_and(|block| pos.offset <= block.content_size())
    };
    (valid(selection.anchor) && valid(selection.head)).then_some(selection)
}

/// Push the steps removing `from..to`.
///
/// A range inside one block becomes a single text deletion. Across blocks, the
/// last block loses its head, the enclosed blocks go, the first block loses its
/// tail, and the two remnants are joined when their types match.
fn push_delete_range(tr: &mut Transaction, doc: &Document, from: Position, to: Position) {
    if from.block == to.block {
        if to.offset > from.offset {
            tr.push(Step::delete_text(from.block, from.offset, to.offset - from.offset));
        }
        return;
    }
    let (Some(first), Some(last)) = (doc.block(from.block), doc.block(to.block)) else {
        return;
    };
    if to.offset > 0 {
        tr.push(Step::delete_text(to.block, 0, to.offset));
    }
    for index in (from.block + 1..to.block).rev() {
        tr.push(Step::DeleteBlock { index });
    }
    let size = first.content_size();
    if size > from.offset {
        tr.push(Step::delete_text(from.block, from.offset, size - from.offset));
    }
    if first.block_type() == last.block_type() {
        tr.push(Step::JoinBlocks { index: from.block });
    }
}

/// Remove a range selection (if any) and return where the cursor ends up.
fn collapse(tr: &mut Transaction, doc: &Document, selection: Selection) -> Position {
    if !selection.is_cursor() {
        push_delete_range(tr, doc, selection.from(), selection.to());
    }
    selection.from()
}

/// `(block, start, len)` for every block the selection touches that has
/// chars inside the selected part.
fn touched_ranges(doc: &Document, selection: Selection) -> Vec<(usize, usize, usize)> {
    let (from, to) = (selection.from(), selection.to());
    (from.block..=to.block)
        .filter_map(|index| {
            let block = doc.block(index)?;
            let start = if index == from.block { from.offset } else { 0 };
            let end = if index == to.block {
                to.offset
            } else {
                block.content_size()
            };
            (end > start && block.chars_in(start, end - start) > 0)
                .then_some((index, start, end - start))
        })
        .collect()
}

/// Block indices the selection touches.
fn touched_blocks(selection: Selection) -> std::ops::RangeInclusive<usize> {
    selection.from().block..=selection.to().block
}
