use super::{checked_selection, collapse};
use crate::document::{Block, Document};
use crate::line::Line;
use crate::selection::Selection;
use crate::state::EditorState;
use crate::step::Step;
use crate::transaction::Transaction;
use regex::Regex;
use std::sync::LazyLock;

/// Control and bidi-override chars that must not reach the document. Tab and
/// line feed are kept.
static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x08\x0B-\x1F\x7F-\x9F\x{200B}\x{200E}\x{200F}\x{202A}-\x{202E}\x{2066}-\x{2069}\x{FEFF}]")
        .expect("valid pattern")
});

static LINE_ENDINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n?").expect("valid pattern"));

/// Copy the selected content as a standalone document.
///
/// The first and last touched blocks are cut down to the selected part; the
/// blocks in between are copied whole. `None` for a cursor.
pub fn extract_selection(state: &EditorState) -> Option<Document> {
    let selection = checked_selection(state)?;
    if selection.is_cursor() {
        return None;
    }
    let doc = state.doc();
    let (from, to) = (selection.from(), selection.to());
    if from.block == to.block {
        let block = doc.block(from.block)?;
        return Some(Document::new(vec![block.slice(from.offset, to.offset)]));
    }
    let first = doc.block(from.block)?;
    let mut blocks = vec![first.slice(from.offset, first.content_size())];
    blocks.extend(doc.blocks()[from.block + 1..to.block].iter().cloned());
    blocks.push(doc.block(to.block)?.slice(0, to.offset));
    Some(Document::new(blocks))
}

/// Paste a document fragment at the selection.
///
/// The selection is removed first. A single-block fragment is spliced into
/// the current block with its formatting. A longer fragment splits the
/// current block: the part before the cursor absorbs the first fragment
/// block, middle blocks are inserted as they are, and the last fragment block
/// absorbs the part after the cursor, taking the type of the block that part
/// came from. The cursor ends after the pasted content. `None` for an empty
/// fragment.
pub fn paste(state: &EditorState, fragment: &Document) -> Option<Transaction> {
    if fragment.is_empty() {
        return None;
    }
    let selection = checked_selection(state)?;
    let doc = state.doc();
    let pasted = fragment.blocks();

    if let [single] = pasted {
        let mut tr = Transaction::new();
        let at = collapse(&mut tr, doc, selection);
        tr.push(Step::insert_lines(at.block, at.offset, single.lines().to_vec()));
        let end = at.offset + single.content_size();
        return Some(tr.with_selection(Selection::cursor(at.block, end)));
    }

    let (from, to) = (selection.from(), selection.to());
    let first = doc.block(from.block)?;
    let last = doc.block(to.block)?;
    let mut head = first.slice(0, from.offset);
    let tail = last.slice(to.offset, last.content_size());

    let mut tr = Transaction::new();
    for index in (from.block + 1..=to.block).rev() {
        tr.push(Step::DeleteBlock { index });
    }
    let (opening, rest) = pasted.split_first()?;
    let (closing, middle) = rest.split_last()?;
    head.append(opening.clone());
    tr.push(Step::ReplaceBlock {
        index: from.block,
        block: head,
    });
    for (k, block) in middle.iter().enumerate() {
        tr.push(Step::InsertBlock {
            index: from.block + 1 + k,
            block: block.clone(),
        });
    }
    let cursor_block = from.block + pasted.len() - 1;
    let cursor_offset = closing.content_size();
    let mut closing = closing.clone();
    closing.set_type(last.block_type().clone());
    closing.append(tail);
    tr.push(Step::InsertBlock {
        index: cursor_block,
        block: closing,
    });
    Some(tr.with_selection(Selection::cursor(cursor_block, cursor_offset)))
}

/// Paste plain text. Each non-empty line of `text` becomes a block of the
/// current block's type, then [`paste`] applies.
///
/// Control chars are dropped, line endings normalized and non-breaking spaces
/// turned into plain spaces. Empty lines are skipped. `None` if nothing is
/// left.
pub fn paste_text(state: &EditorState, text: &str) -> Option<Transaction> {
    let text = sanitize(text);
    let selection = checked_selection(state)?;
    let block_type = state.doc().block(selection.from().block)?.block_type().clone();
    let blocks: Vec<Block> = text
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| Block::from_lines(block_type.clone(), vec![Line::plain(line)]))
        .collect();
    if blocks.is_empty() {
        return None;
    }
    paste(state, &Document::new(blocks))
}

fn sanitize(text: &str) -> String {
    let text = LINE_ENDINGS.replace_all(text, "\n");
    UNSAFE_CHARS
        .replace_all(&text, "")
        .replace('\u{00A0}', " ")
}
