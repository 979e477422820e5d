//! Undo/redo history.
//!
//! Two stacks of inverse transactions. Recording a new edit clears the redo
//! stack; undo moves an entry from the undo stack to the redo stack (as the
//! inverse of the inverse) and redo does the opposite.
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{Document, EditorState, History, Step, Transaction};
//!
//! let mut state = EditorState::with_doc(Document::from_paragraphs(["abc"]));
//! let mut history = History::new();
//!
//! let inverse = state.apply(&Transaction::new().step(Step::insert_text(0, 3, "d"))).unwrap();
//! history.push(inverse);
//!
//! assert!(history.undo(&mut state).unwrap());
//! assert_eq!(state.doc().block_texts(), ["abc"]);
//! assert!(history.can_redo());
//!
//! assert!(history.redo(&mut state).unwrap());
//! assert_eq!(state.doc().block_texts(), ["abcd"]);
//! ```

use crate::config::{DEFAULT_HISTORY_LIMIT, EditorConfig};
use crate::error::StepError;
use crate::state::EditorState;
use crate::transaction::Transaction;
use tracing::debug;

/// Undo and redo stacks of inverse transactions.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    limit: usize,
    /// Undo depth at the last save. `None` when that point was evicted or
    /// dropped along with the redo stack.
    clean_index: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a history with the default limit.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a history keeping at most `limit` undo entries (`0` = unbounded).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
            clean_index: Some(0),
        }
    }

    /// Create a history from editor configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::with_limit(config.history_limit)
    }

    /// Whether undo is possible.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether redo is possible.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo entries.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo entries.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Record the inverse of a fresh edit. Clears the redo stack.
    pub fn push(&mut self, inverse: Transaction) {
        if !self.redo_stack.is_empty() {
            if let Some(clean) = self.clean_index
                && clean > self.undo_stack.len()
            {
                self.clean_index = None;
            }
            self.redo_stack.clear();
        }

        if self.limit > 0 && self.undo_stack.len() >= self.limit {
            self.undo_stack.remove(0);
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(clean) => Some(clean - 1),
            };
        }
        self.undo_stack.push(inverse);
    }

    /// Undo the most recent edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, state: &mut EditorState) -> Result<bool, StepError> {
        let Some(inverse) = self.undo_stack.pop() else {
            return Ok(false);
        };
        match state.apply(&inverse) {
            Ok(redo) => {
                self.redo_stack.push(redo);
                debug!(
                    undo_depth = self.undo_stack.len(),
                    redo_depth = self.redo_stack.len(),
                    "undo"
                );
                Ok(true)
            }
            Err(err) => {
                self.undo_stack.push(inverse);
                Err(err)
            }
        }
    }

    /// Redo the most recently undone edit. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self, state: &mut EditorState) -> Result<bool, StepError> {
        let Some(forward) = self.redo_stack.pop() else {
            return Ok(false);
        };
        match state.apply(&forward) {
            Ok(undo) => {
                self.undo_stack.push(undo);
                debug!(
                    undo_depth = self.undo_stack.len(),
                    redo_depth = self.redo_stack.len(),
                    "redo"
                );
                Ok(true)
            }
            Err(err) => {
                self.redo_stack.push(forward);
                Err(err)
            }
        }
    }

    /// Drop all entries. The current state becomes the clean point.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.clean_index = Some(0);
    }

    /// Mark the current state as saved.
    pub fn mark_clean(&mut self) {
        self.clean_index = Some(self.undo_stack.len());
    }

    /// Whether the current state matches the last save.
    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.undo_stack.len())
    }
}
