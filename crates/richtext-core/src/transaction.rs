//! Transactions: ordered batches of steps.

use crate::document::Document;
use crate::error::StepError;
use crate::mapping::Mapping;
use crate::selection::Selection;
use crate::step::Step;
use tracing::{error, trace, warn};

/// An ordered list of steps plus an optional selection to set afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    steps: Vec<Step>,
    selection: Option<Selection>,
}

/// Result of applying a transaction to a bare document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResult {
    inverse: Transaction,
    mapping: Mapping,
}

impl TransactionResult {
    /// Transaction undoing the one applied (no selection attached).
    pub fn inverse(&self) -> &Transaction {
        &self.inverse
    }

    /// Position mapping of the applied steps.
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Split into inverse and mapping.
    pub fn into_parts(self) -> (Transaction, Mapping) {
        (self.inverse, self.mapping)
    }
}

impl Transaction {
    /// Create an empty transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a step.
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Builder: set the selection to apply afterwards.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Append a step.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Set the selection to apply afterwards.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    /// Steps in apply order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Explicit selection, if any.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Whether the transaction carries steps.
    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Apply every step to `doc`.
    ///
    /// Either all steps apply, or the ones already applied are rolled back and
    /// the error of the failing step is returned.
    pub fn apply(&self, doc: &mut Document) -> Result<TransactionResult, StepError> {
        let mut inverses = Vec::with_capacity(self.steps.len());
        let mut mapping = Mapping::new();
        for (index, step) in self.steps.iter().enumerate() {
            match step.apply(doc) {
                Ok(outcome) => {
                    trace!(index, map = ?outcome.map, "applied step");
                    inverses.push(outcome.inverse);
                    mapping.push(outcome.map);
                }
                Err(err) => {
                    warn!(index, %err, "step failed, rolling back transaction");
                    rollback(doc, &inverses);
                    return Err(err);
                }
            }
        }
        inverses.reverse();
        Ok(TransactionResult {
            inverse: Transaction {
                steps: inverses,
                selection: None,
            },
            mapping,
        })
    }
}

fn rollback(doc: &mut Document, inverses: &[Step]) {
    for step in inverses.iter().rev() {
        if let Err(err) = step.apply(doc) {
            error!(%err, "rollback step failed");
        }
    }
}
