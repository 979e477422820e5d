//! Live editor state.
//!
//! # Overview
//!
//! [`EditorState`] owns the document being edited and the live selection.
//! All document changes go through [`EditorState::apply`], which returns the
//! transaction that undoes the change; that inverse is what
//! [`History`](crate::History) stores.
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{Document, EditorState, Selection, Step, Transaction};
//!
//! let mut state = EditorState::new(Document::from_paragraphs(["Hello"]), Selection::cursor(0, 5));
//! let inverse = state
//!     .apply(&Transaction::new().step(Step::insert_text(0, 5, "!")))
//!     .unwrap();
//!
//! assert_eq!(state.doc().block_texts(), ["Hello!"]);
//! assert_eq!(state.selection(), Selection::cursor(0, 6));
//!
//! state.apply(&inverse).unwrap();
//! assert_eq!(state.doc().block_texts(), ["Hello"]);
//! assert_eq!(state.selection(), Selection::cursor(0, 5));
//! ```

use crate::document::Document;
use crate::error::StepError;
use crate::selection::Selection;
use crate::transaction::Transaction;
use tracing::debug;

/// The document being edited plus its selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    doc: Document,
    selection: Selection,
}

impl EditorState {
    /// Create a state. The selection is clamped into the document.
    pub fn new(doc: Document, selection: Selection) -> Self {
        let selection = selection.clamp(&doc);
        Self { doc, selection }
    }

    /// Create a state with the cursor at the start of the document.
    pub fn with_doc(doc: Document) -> Self {
        Self::new(doc, Selection::cursor(0, 0))
    }

    /// The live document.
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    /// The live selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Move the selection without editing (clamped into the document).
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp(&self.doc);
    }

    /// Apply a transaction and return its inverse.
    ///
    /// The new selection is the transaction's explicit selection if it has one;
    /// otherwise the previous selection is mapped through the steps. The
    /// inverse carries the previous selection so undo puts the user back
    /// exactly where they were.
    ///
    /// If a step fails, nothing changes and the error is returned.
    pub fn apply(&mut self, tr: &Transaction) -> Result<Transaction, StepError> {
        let before = self.selection;
        let anchor = before.anchor_flat(&self.doc);
        let head = before.head_flat(&self.doc);

        let (inverse, mapping) = tr.apply(&mut self.doc)?.into_parts();
        self.selection = match tr.selection() {
            Some(selection) => selection,
            None => before.map_flat(anchor, head, &mapping, &self.doc),
        };
        debug!(
            steps = tr.steps().len(),
            explicit_selection = tr.selection().is_some(),
            selection = ?self.selection,
            "applied transaction"
        );
        Ok(inverse.with_selection(before))
    }
}
