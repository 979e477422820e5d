//! Command executor.
//!
//! # Overview
//!
//! [`Editor`] pairs one [`EditorState`] with its [`History`] and runs
//! [`EditCommand`]s against them: the command builds a transaction, the state
//! applies it, and the inverse is recorded for undo. It is the entry point a
//! presentation layer drives from key bindings and menus.
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{Document, EditCommand, Editor, Formats, Selection};
//!
//! let mut editor = Editor::new(Document::from_paragraphs(["Hello"]));
//! editor.set_selection(Selection::cursor(0, 5));
//!
//! editor.execute(EditCommand::InsertText { text: " World".to_string() }).unwrap();
//! editor.execute(EditCommand::SelectAll).unwrap();
//! editor.execute(EditCommand::ToggleFormat(Formats::BOLD)).unwrap();
//! assert!(editor.doc().blocks()[0].has_format(0, 11, Formats::BOLD));
//!
//! editor.execute(EditCommand::Undo).unwrap();
//! editor.execute(EditCommand::Undo).unwrap();
//! assert_eq!(editor.doc().block_texts(), ["Hello"]);
//! ```

use crate::commands;
use crate::config::EditorConfig;
use crate::document::{Block, BlockType, Document};
use crate::error::StepError;
use crate::history::History;
use crate::line::Formats;
use crate::selection::Selection;
use crate::state::EditorState;
use crate::transaction::Transaction;
use tracing::debug;

/// An editing intent understood by [`Editor::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Type text at the cursor, replacing the selection.
    InsertText {
        /// Text to type.
        text: String,
    },
    /// Backspace.
    DeleteBackward,
    /// Forward delete.
    DeleteForward,
    /// Delete to the start of the previous word.
    DeleteWordBackward,
    /// Delete to the end of the next word.
    DeleteWordForward,
    /// Remove the selection.
    DeleteSelection,
    /// Split the block at the cursor.
    SplitBlock,
    /// Start a new line inside the block.
    InsertLineBreak,
    /// Merge the cursor block into the previous block of the same type.
    JoinWithPrevious,
    /// Merge the next block of the same type into the cursor block.
    JoinWithNext,
    /// Merge the cursor block into the previous block, whatever the types.
    ForceJoinWithPrevious,
    /// Merge the next block into the cursor block, whatever the types.
    ForceJoinWithNext,
    /// Swap a block unit with the sibling unit above.
    MoveBlockUp {
        /// Root block of the unit.
        index: usize,
    },
    /// Swap a block unit with the sibling unit below.
    MoveBlockDown {
        /// Root block of the unit.
        index: usize,
    },
    /// Indent touched blocks.
    Indent,
    /// Outdent touched blocks.
    Outdent,
    /// Set the type of touched blocks.
    SetBlockType(BlockType),
    /// Toggle the type of touched blocks.
    ToggleBlockType(BlockType),
    /// Set or remove a metadata key on the selection's first block.
    SetBlockMeta {
        /// Metadata key.
        key: String,
        /// New value (`None` removes).
        value: Option<String>,
    },
    /// Add a format tag over the selection.
    ApplyFormat(Formats),
    /// Remove a format tag over the selection.
    RemoveFormat(Formats),
    /// Toggle a format tag over the selection.
    ToggleFormat(Formats),
    /// Link the selection.
    ApplyLink {
        /// Link target.
        url: String,
    },
    /// Retarget the link under the cursor (or link the selection).
    UpdateLink {
        /// Link target.
        url: String,
    },
    /// Remove the link from the selection or under the cursor.
    RemoveLink,
    /// Strip all formatting from the selection.
    ClearFormatting,
    /// Copy a block right after itself.
    DuplicateBlock {
        /// Block to copy.
        index: usize,
    },
    /// Insert an empty block before a block.
    InsertBlockBefore {
        /// Reference block.
        index: usize,
        /// Type of the new block.
        block_type: BlockType,
    },
    /// Insert an empty block after a block.
    InsertBlockAfter {
        /// Reference block.
        index: usize,
        /// Type of the new block.
        block_type: BlockType,
    },
    /// Remove a block.
    DeleteBlock {
        /// Block to remove.
        index: usize,
    },
    /// Replace a block wholesale.
    ReplaceBlock {
        /// Block to replace.
        index: usize,
        /// Replacement.
        block: Block,
    },
    /// Select the whole document.
    SelectAll,
    /// Paste a document fragment.
    Paste(Document),
    /// Paste plain text.
    PasteText(String),
    /// Remove the selection (after the caller copied it with [`Editor::copy`]).
    Cut,
    /// Undo the last edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
}

/// An editor state with its undo history.
#[derive(Debug, Clone)]
pub struct Editor {
    state: EditorState,
    history: History,
}

impl Editor {
    /// Create an editor with the cursor at the start of `doc`.
    pub fn new(doc: Document) -> Self {
        Self::with_config(doc, &EditorConfig::default())
    }

    /// Create an editor with explicit configuration.
    pub fn with_config(doc: Document, config: &EditorConfig) -> Self {
        Self {
            state: EditorState::with_doc(doc),
            history: History::from_config(config),
        }
    }

    /// The live state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The live document.
    pub fn doc(&self) -> &Document {
        self.state.doc()
    }

    /// The live selection.
    pub fn selection(&self) -> Selection {
        self.state.selection()
    }

    /// The undo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable access to the history (save points, clearing).
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Move the selection without editing.
    pub fn set_selection(&mut self, selection: Selection) {
        self.state.set_selection(selection);
    }

    /// Copy the selection. `None` for a cursor.
    pub fn copy(&self) -> Option<Document> {
        commands::extract_selection(&self.state)
    }

    /// Run a command.
    ///
    /// Returns `Ok(false)` when the command does not apply (nothing changes).
    /// Transactions without steps only move the selection and are not recorded
    /// in history.
    pub fn execute(&mut self, command: EditCommand) -> Result<bool, StepError> {
        match command {
            EditCommand::Undo => return self.history.undo(&mut self.state),
            EditCommand::Redo => return self.history.redo(&mut self.state),
            _ => {}
        }
        let Some(tr) = self.build(command) else {
            return Ok(false);
        };
        self.dispatch(&tr)?;
        Ok(true)
    }

    /// Apply a hand-built transaction and record its inverse.
    pub fn dispatch(&mut self, tr: &Transaction) -> Result<(), StepError> {
        let inverse = self.state.apply(tr)?;
        if tr.has_steps() {
            self.history.push(inverse);
        }
        debug!(undo_depth = self.history.undo_depth(), "dispatched transaction");
        Ok(())
    }

    fn build(&self, command: EditCommand) -> Option<Transaction> {
        let state = &self.state;
        match command {
            EditCommand::InsertText { text } => commands::insert_text(state, &text),
            EditCommand::DeleteBackward => commands::delete_char_before(state),
            EditCommand::DeleteForward => commands::delete_char_after(state),
            EditCommand::DeleteWordBackward => commands::delete_word_before(state),
            EditCommand::DeleteWordForward => commands::delete_word_after(state),
            EditCommand::DeleteSelection | EditCommand::Cut => commands::delete_selection(state),
            EditCommand::SplitBlock => commands::split_block(state),
            EditCommand::InsertLineBreak => commands::insert_line_break(state),
            EditCommand::JoinWithPrevious => commands::join_with_previous(state),
            EditCommand::JoinWithNext => commands::join_with_next(state),
            EditCommand::ForceJoinWithPrevious => commands::force_join_with_previous(state),
            EditCommand::ForceJoinWithNext => commands::force_join_with_next(state),
            EditCommand::MoveBlockUp { index } => commands::move_block_up(state, index),
            EditCommand::MoveBlockDown { index } => commands::move_block_down(state, index),
            EditCommand::Indent => commands::indent(state),
            EditCommand::Outdent => commands::outdent(state),
            EditCommand::SetBlockType(block_type) => commands::set_block_type(state, block_type),
            EditCommand::ToggleBlockType(block_type) => {
                commands::toggle_block_type(state, block_type)
            }
            EditCommand::SetBlockMeta { key, value } => {
                commands::set_block_meta(state, &key, value.as_deref())
            }
            EditCommand::ApplyFormat(tag) => commands::apply_format(state, tag),
            EditCommand::RemoveFormat(tag) => commands::remove_format(state, tag),
            EditCommand::ToggleFormat(tag) => commands::toggle_format(state, tag),
            EditCommand::ApplyLink { url } => commands::apply_link(state, &url),
            EditCommand::UpdateLink { url } => commands::update_link(state, &url),
            EditCommand::RemoveLink => commands::remove_link(state),
            EditCommand::ClearFormatting => commands::clear_formatting(state),
            EditCommand::DuplicateBlock { index } => commands::duplicate_block(state, index),
            EditCommand::InsertBlockBefore { index, block_type } => {
                commands::insert_block_before(state, index, block_type)
            }
            EditCommand::InsertBlockAfter { index, block_type } => {
                commands::insert_block_after(state, index, block_type)
            }
            EditCommand::DeleteBlock { index } => commands::delete_block(state, index),
            EditCommand::ReplaceBlock { index, block } => {
                commands::replace_block(state, index, block)
            }
            EditCommand::SelectAll => commands::select_all(state),
            EditCommand::Paste(fragment) => commands::paste(state, &fragment),
            EditCommand::PasteText(text) => commands::paste_text(state, &text),
            EditCommand::Undo | EditCommand::Redo => None,
        }
    }
}
