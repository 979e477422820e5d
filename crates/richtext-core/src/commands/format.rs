use super::{checked_selection, touched_ranges};
use crate::config::LINK_META_KEY;
use crate::document::Block;
use crate::line::{Formats, Meta};
use crate::selection::Selection;
use crate::state::EditorState;
use crate::step::Step;
use crate::transaction::Transaction;

/// Add `tag` over the selection. `None` for a cursor or a range without chars.
pub fn apply_format(state: &EditorState, tag: Formats) -> Option<Transaction> {
    change_format(state, tag, true)
}

/// Remove `tag` over the selection. `None` for a cursor or a range without
/// chars.
pub fn remove_format(state: &EditorState, tag: Formats) -> Option<Transaction> {
    change_format(state, tag, false)
}

/// Remove `tag` if every selected char already has it, otherwise add it
/// everywhere selected.
pub fn toggle_format(state: &EditorState, tag: Formats) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    let doc = state.doc();
    let all = touched_ranges(doc, selection)
        .into_iter()
        .all(|(index, start, len)| {
            doc.block(index)
                .is_some_and(|block| block.has_format(start, len, tag))
        });
    change_format(state, tag, !all)
}

fn change_format(state: &EditorState, tag: Formats, add: bool) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    if selection.is_cursor() {
        return None;
    }
    let mut tr = Transaction::new();
    for (index, offset, len) in touched_ranges(state.doc(), selection) {
        tr.push(Step::ChangeFormat {
            index,
            offset,
            len,
            format: tag,
            add,
        });
    }
    tr.has_steps().then(|| tr.with_selection(selection))
}

/// Link the selection to `url`. `None` for a cursor or an empty URL.
pub fn apply_link(state: &EditorState, url: &str) -> Option<Transaction> {
    if url.is_empty() {
        return None;
    }
    let selection = checked_selection(state)?;
    if selection.is_cursor() {
        return None;
    }
    restyle_ranges(state, selection, |formats, meta| set_link(formats, meta, url))
}

/// Point the link under the cursor at `url`. With a range selection this is
/// [`apply_link`].
pub fn update_link(state: &EditorState, url: &str) -> Option<Transaction> {
    if url.is_empty() {
        return None;
    }
    let selection = checked_selection(state)?;
    if !selection.is_cursor() {
        return apply_link(state, url);
    }
    restyle_link_at(state, selection, |formats, meta| set_link(formats, meta, url))
}

/// Unlink the selection, or the whole link under the cursor.
pub fn remove_link(state: &EditorState) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    if selection.is_cursor() {
        return restyle_link_at(state, selection, clear_link);
    }
    restyle_ranges(state, selection, clear_link)
}

/// Strip every tag and all run metadata from the selection. Range only.
pub fn clear_formatting(state: &EditorState) -> Option<Transaction> {
    let selection = checked_selection(state)?;
    if selection.is_cursor() {
        return None;
    }
    restyle_ranges(state, selection, |formats, meta| {
        *formats = Formats::empty();
        meta.clear();
    })
}

fn set_link(formats: &mut Formats, meta: &mut Meta, url: &str) {
    formats.insert(Formats::LINK);
    meta.insert(LINK_META_KEY.to_string(), url.to_string());
}

fn clear_link(formats: &mut Formats, meta: &mut Meta) {
    formats.remove(Formats::LINK);
    meta.remove(LINK_META_KEY);
}

/// Restyle every touched range, one [`Step::SetFormatting`] per block whose
/// runs actually change.
fn restyle_ranges<F>(state: &EditorState, selection: Selection, mut edit: F) -> Option<Transaction>
where
    F: FnMut(&mut Formats, &mut Meta),
{
    let doc = state.doc();
    let mut tr = Transaction::new();
    for (index, offset, len) in touched_ranges(doc, selection) {
        let block = doc.block(index)?;
        let mut restyled = block.clone();
        restyled.edit_formatting(offset, len, &mut edit);
        push_if_changed(&mut tr, index, block, &restyled);
    }
    tr.has_steps().then(|| tr.with_selection(selection))
}

/// Restyle the linked span around the cursor: the contiguous runs carrying
/// the same URL as the link touching the cursor.
fn restyle_link_at<F>(state: &EditorState, selection: Selection, edit: F) -> Option<Transaction>
where
    F: FnMut(&mut Formats, &mut Meta),
{
    let at = selection.head;
    let block = state.doc().block(at.block)?;
    let (line_index, ch) = block.locate(at.offset);
    let line = &block.lines()[line_index];
    let runs = line.runs();
    let hit = runs
        .iter()
        .position(|run| run.link().is_some() && run.start <= ch && ch <= run.end())?;
    let url = runs[hit].link();
    let mut first = hit;
    while first > 0 && runs[first - 1].end() == runs[first].start && runs[first - 1].link() == url {
        first -= 1;
    }
    let mut last = hit;
    while last + 1 < runs.len()
        && runs[last].end() == runs[last + 1].start
        && runs[last + 1].link() == url
    {
        last += 1;
    }
    let line_start = block.line_start(line_index);
    let start = runs[first].start;
    let len = runs[last].end() - start;

    let mut restyled = block.clone();
    restyled.edit_formatting(line_start + start, len, edit);
    let mut tr = Transaction::new();
    push_if_changed(&mut tr, at.block, block, &restyled);
    tr.has_steps().then(|| tr.with_selection(selection))
}

fn push_if_changed(tr: &mut Transaction, index: usize, before: &Block, after: &Block) {
    if before != after {
        tr.push(Step::SetFormatting {
            index,
            runs: after.formatting(),
        });
    }
}
