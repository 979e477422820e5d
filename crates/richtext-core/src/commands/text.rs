use super::{checked_selection, collapse, push_delete_range};
use crate::document::Block;
use crate::line::Line;
use crate::selection::Selection;
use crate::state::EditorState;
use crate::step::Step;
use crate::transaction::Transaction;
use unicode_segmentation::UnicodeSegmentation;

/// Type `text` at the cursor, replacing the selection if there is one.
///
/// The cursor ends up after the inserted text. `'\n'` in `text` starts a new
/// line within the block.
pub fn insert_text(state: &EditorState, text: &str) -> Option<Transaction> {
    if text.is_empty() {
        return None;
    }
    let selection = checked_selection(state)?;
    let mut tr = Transaction::new();
    let at = collapse(&mut tr, state.doc(), selection);
    tr.push(Step::insert_text(at.block, at.offset, text));
    let end = at.offset + text.chars().count();
    Some(tr.with_selection(Selection::cursor(at.block, end)))
}

/// Remove the selected content. `None` for a cursor.
pub fn delete_selection(state: &EditorState) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    if selection.is_cursor() {
        return None;
    }
    let mut tr = Transaction::new();
    push_delete_range(&mut tr, state.doc(), selection.from(), selection.to());
    let at = selection.from();
    Some(tr.with_selection(Selection::cursor(at.block, at.offset)))
}

/// Backspace.
///
/// Removes the grapheme before the cursor, or the line break when the cursor
/// starts a line. At the start of a block the block is merged into the
/// previous one (whatever its type); at the start of the document there is
/// nothing to do.
pub fn delete_char_before(state: &EditorState) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    if !selection.is_cursor() {
        return delete_selection(state);
    }
    let at = selection.head;
    if at.offset == 0 {
        return merge_into_previous(state, at.block);
    }
    let block = state.doc().block(at.block)?;
    let len = grapheme_len_before(block, at.offset);
    let start = at.offset - len;
    let tr = Transaction::new()
        .step(Step::delete_text(at.block, start, len))
        .with_selection(Selection::cursor(at.block, start));
    Some(tr)
}

/// Forward delete.
///
/// Removes the grapheme after the cursor, or the line break when the cursor
/// ends a line. At the end of a block the next block is merged in only when
/// both have the same type.
pub fn delete_char_after(state: &EditorState) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    if !selection.is_cursor() {
        return delete_selection(state);
    }
    let at = selection.head;
    let block = state.doc().block(at.block)?;
    if at.offset >= block.content_size() {
        return join_with_next(state);
    }
    let len = grapheme_len_after(block, at.offset);
    let tr = Transaction::new()
        .step(Step::delete_text(at.block, at.offset, len))
        .with_selection(Selection::cursor(at.block, at.offset));
    Some(tr)
}

/// Delete back to the start of the previous word.
///
/// The run of chars before the cursor sharing the class of the char right
/// before it is consumed; if that run is not made of word chars, the word run
/// before it goes too. Line breaks count as non-word chars. At the start of a
/// block this behaves like [`delete_char_before`].
pub fn delete_word_before(state: &EditorState) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    if !selection.is_cursor() {
        return delete_selection(state);
    }
    let at = selection.head;
    if at.offset == 0 {
        return merge_into_previous(state, at.block);
    }
    let chars: Vec<char> = state.doc().block(at.block)?.text().chars().collect();
    let mut start = at.offset;
    let word = is_word_char(chars[start - 1]);
    while start > 0 && is_word_char(chars[start - 1]) == word {
        start -= 1;
    }
    if !word {
        while start > 0 && is_word_char(chars[start - 1]) {
            start -= 1;
        }
    }
    let tr = Transaction::new()
        .step(Step::delete_text(at.block, start, at.offset - start))
        .with_selection(Selection::cursor(at.block, start));
    Some(tr)
}

/// Delete forward to the end of the next word. Mirrors
/// [`delete_word_before`]; at the end of a block this behaves like
/// [`delete_char_after`].
pub fn delete_word_after(state: &EditorState) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    if !selection.is_cursor() {
        return delete_selection(state);
    }
    let at = selection.head;
    let chars: Vec<char> = state.doc().block(at.block)?.text().chars().collect();
    if at.offset >= chars.len() {
        return join_with_next(state);
    }
    let mut end = at.offset;
    let word = is_word_char(chars[end]);
    while end < chars.len() && is_word_char(chars[end]) == word {
        end += 1;
    }
    if !word {
        while end < chars.len() && is_word_char(chars[end]) {
            end += 1;
        }
    }
    let tr = Transaction::new()
        .step(Step::delete_text(at.block, at.offset, end - at.offset))
        .with_selection(Selection::cursor(at.block, at.offset));
    Some(tr)
}

/// Split the block at the cursor (after removing any selection). The cursor
/// moves to the start of the new block.
pub fn split_block(state: &EditorState) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    let mut tr = Transaction::new();
    let at = collapse(&mut tr, state.doc(), selection);
    tr.push(Step::SplitBlock {
        index: at.block,
        offset: at.offset,
    });
    Some(tr.with_selection(Selection::cursor(at.block + 1, 0)))
}

/// Start a new line within the block at the cursor (after removing any
/// selection).
pub fn insert_line_break(state: &EditorState) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    let mut tr = Transaction::new();
    let at = collapse(&mut tr, state.doc(), selection);
    tr.push(Step::insert_text(at.block, at.offset, "\n"));
    Some(tr.with_selection(Selection::cursor(at.block, at.offset + 1)))
}

/// Merge the cursor's block into the previous block of the same type. Only
/// valid with the cursor at the start of a block.
pub fn join_with_previous(state: &EditorState) -> Option<Transaction> {
    let at = checked_selection(state)?.head;
    let doc = state.doc();
    let previous = doc.block(at.block.checked_sub(1)?)?;
    if previous.block_type() != doc.block(at.block)?.block_type() {
        return None;
    }
    force_join_with_previous(state)
}

/// Merge the next block of the same type into the cursor's block. Only valid
/// with the cursor at the end of a block.
pub fn join_with_next(state: &EditorState) -> Option<Transaction> {
    let at = checked_selection(state)?.head;
    let doc = state.doc();
    let next = doc.block(at.block + 1)?;
    if next.block_type() != doc.block(at.block)?.block_type() {
        return None;
    }
    force_join_with_next(state)
}

/// Like [`join_with_previous`], for blocks of any type. The merged block
/// keeps the previous block's type, indent and meta.
pub fn force_join_with_previous(state: &EditorState) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    if !selection.is_cursor() || selection.head.offset != 0 {
        return None;
    }
    merge_into_previous(state, selection.head.block)
}

/// Like [`join_with_next`], for blocks of any type. The merged block keeps
/// the cursor block's type, indent and meta.
pub fn force_join_with_next(state: &EditorState) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    let at = selection.head;
    let doc = state.doc();
    let block = doc.block(at.block)?;
    if !selection.is_cursor() || at.offset != block.content_size() {
        return None;
    }
    doc.block(at.block + 1)?;
    Some(join_at(at.block, block))
}

fn merge_into_previous(state: &EditorState, index: usize) -> Option<Transaction> {
    let previous = state.doc().block(index.checked_sub(1)?)?;
    Some(join_at(index - 1, previous))
}

/// Join `index` with its successor, leaving the cursor at the seam.
fn join_at(index: usize, first: &Block) -> Transaction {
    Transaction::new()
        .step(Step::JoinBlocks { index })
        .with_selection(Selection::cursor(index, first.content_size()))
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Size of the grapheme ending at block offset `offset` (`1` for a line break).
fn grapheme_len_before(block: &Block, offset: usize) -> usize {
    let (line, ch) = block.locate(offset);
    if ch == 0 {
        return 1;
    }
    line_graphemes(&block.lines()[line])
        .into_iter()
        .find_map(|(start, len)| (start + len == ch).then_some(len))
        .unwrap_or(1)
}

/// Size of the grapheme starting at block offset `offset` (`1` for a line
/// break).
fn grapheme_len_after(block: &Block, offset: usize) -> usize {
    let (line, ch) = block.locate(offset);
    let line = &block.lines()[line];
    if ch >= line.len() {
        return 1;
    }
    line_graphemes(line)
        .into_iter()
        .find_map(|(start, len)| (start == ch).then_some(len))
        .unwrap_or(1)
}

/// `(char start, char len)` of every extended grapheme cluster in `line`.
fn line_graphemes(line: &Line) -> Vec<(usize, usize)> {
    let text = line.text();
    let mut start = 0;
    text.graphemes(true)
        .map(|grapheme| {
            let len = grapheme.chars().count();
            let span = (start, len);
            start += len;
            span
        })
        .collect()
}
