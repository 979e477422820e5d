//! Atomic, invertible document mutations.
//!
//! # Overview
//!
//! A [`Step`] is a single edit. Applying it validates the target against the
//! document, captures whatever it is about to remove, mutates the document in
//! place and returns a [`StepOutcome`]: the inverse step built from the
//! captured snapshot, and the [`StepMap`] describing how flat positions moved.
//!
//! Applying a step and then its inverse leaves the document equal to what it
//! was before, formatting and metadata included.
//!
//! | Step | Map window |
//! |---|---|
//! | `InsertBlock` | `(block_start(i), 0, node_size(block))` |
//! | `DeleteBlock` | `(block_start(i), node_size(removed), 0)` |
//! | `ReplaceBlock` | `(block_start(i), node_size(old), node_size(new))` |
//! | `SetBlockType`, `SetBlockIndent`, `SetBlockMeta` | empty |
//! | `MoveBlocks` | empty |
//! | `InsertText` | `(to_flat(i, offset), 0, len)` |
//! | `DeleteText` | `(to_flat(i, offset), len, 0)` |
//! | `SplitBlock` | `(to_flat(i, offset), 0, 2)` |
//! | `JoinBlocks` | `(block_start(i + 1) - 1, 2, 0)` |
//! | `RestoreJoined` | `(to_flat(i, content_size(first)), 0, 2)` |
//! | `ChangeFormat`, `SetFormatting` | empty |
//!
//! `MoveBlocks` reports an empty map: positions inside the moved blocks are
//! not carried along. Commands that move blocks set the selection explicitly.
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{Block, Document, Step};
//!
//! let mut doc = Document::from_paragraphs(["A", "B"]);
//! let outcome = Step::InsertBlock { index: 1, block: Block::paragraph("X") }
//!     .apply(&mut doc)
//!     .unwrap();
//! assert_eq!(doc.block_texts(), ["A", "X", "B"]);
//!
//! outcome.inverse.apply(&mut doc).unwrap();
//! assert_eq!(doc.block_texts(), ["A", "B"]);
//! ```

use crate::document::{Block, BlockType, Document};
use crate::error::StepError;
use crate::line::{FormatRun, Formats, Line};
use crate::mapping::StepMap;
use crate::position::{block_start, to_flat};

/// Text carried by an [`Step::InsertText`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextContent {
    /// Plain text; `'\n'` starts a new line. It continues the formatting of
    /// the run it is typed into.
    Plain(String),
    /// Formatted lines, spliced with their runs exactly.
    Formatted(Vec<Line>),
}

impl TextContent {
    /// Size in block-offset units (chars plus line separators).
    pub fn len(&self) -> usize {
        match self {
            TextContent::Plain(text) => text.chars().count(),
            TextContent::Formatted(lines) => {
                lines.iter().map(Line::len).sum::<usize>() + lines.len().saturating_sub(1)
            }
        }
    }

    /// Whether there is nothing to insert.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One invertible edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Insert `block` so it lands at `index`.
    InsertBlock {
        /// Destination index (`0..=len`).
        index: usize,
        /// Block to insert.
        block: Block,
    },
    /// Remove block `index`.
    DeleteBlock {
        /// Block to remove.
        index: usize,
    },
    /// Swap block `index` for `block`.
    ReplaceBlock {
        /// Block to replace.
        index: usize,
        /// Replacement.
        block: Block,
    },
    /// Change the type of block `index`.
    SetBlockType {
        /// Target block.
        index: usize,
        /// New type.
        block_type: BlockType,
    },
    /// Change the indent of block `index` (clamped to `0..=MAX_INDENT`).
    SetBlockIndent {
        /// Target block.
        index: usize,
        /// New indent level.
        indent: u8,
    },
    /// Set (`Some`) or remove (`None`) one metadata key of block `index`.
    SetBlockMeta {
        /// Target block.
        index: usize,
        /// Metadata key.
        key: String,
        /// New value.
        value: Option<String>,
    },
    /// Move `count` blocks starting at `from` so the first of them ends up at
    /// index `to`.
    MoveBlocks {
        /// First moved block.
        from: usize,
        /// Final index of the first moved block.
        to: usize,
        /// Number of blocks moved.
        count: usize,
    },
    /// Insert text at a block offset.
    InsertText {
        /// Target block.
        index: usize,
        /// Block offset.
        offset: usize,
        /// Text to insert.
        content: TextContent,
    },
    /// Remove `len` units of content at a block offset. Line separators inside
    /// the range are removed too, merging lines.
    DeleteText {
        /// Target block.
        index: usize,
        /// Block offset.
        offset: usize,
        /// Units to remove.
        len: usize,
    },
    /// Split block `index` at `offset` into two blocks of the same type.
    SplitBlock {
        /// Target block.
        index: usize,
        /// Block offset of the split.
        offset: usize,
    },
    /// Merge block `index + 1` into block `index`.
    JoinBlocks {
        /// First of the two blocks.
        index: usize,
    },
    /// Undo a join: replace block `index` with `first` followed by `second`.
    RestoreJoined {
        /// Merged block.
        index: usize,
        /// Block as it was before the join.
        first: Box<Block>,
        /// Following block as it was before the join.
        second: Box<Block>,
    },
    /// Add or remove one format tag over a block range.
    ChangeFormat {
        /// Target block.
        index: usize,
        /// Block offset.
        offset: usize,
        /// Range length.
        len: usize,
        /// Tag to change.
        format: Formats,
        /// `true` adds, `false` removes.
        add: bool,
    },
    /// Replace the runs of every line of block `index`.
    SetFormatting {
        /// Target block.
        index: usize,
        /// Runs per line.
        runs: Vec<Vec<FormatRun>>,
    },
}

/// Result of applying a [`Step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Step that undoes the one applied.
    pub inverse: Step,
    /// Effect of the step on flat positions.
    pub map: StepMap,
}

impl StepOutcome {
    fn new(inverse: Step, map: StepMap) -> Self {
        Self { inverse, map }
    }
}

impl Step {
    /// Plain text insertion.
    pub fn insert_text(index: usize, offset: usize, text: impl Into<String>) -> Self {
        Step::InsertText {
            index,
            offset,
            content: TextContent::Plain(text.into()),
        }
    }

    /// Formatted insertion.
    pub fn insert_lines(index: usize, offset: usize, lines: Vec<Line>) -> Self {
        Step::InsertText {
            index,
            offset,
            content: TextContent::Formatted(lines),
        }
    }

    /// Text removal.
    pub fn delete_text(index: usize, offset: usize, len: usize) -> Self {
        Step::DeleteText { index, offset, len }
    }

    /// Apply the step to `doc`.
    ///
    /// On error the document is left untouched.
    pub fn apply(&self, doc: &mut Document) -> Result<StepOutcome, StepError> {
        match self {
            Step::InsertBlock { index, block } => {
                let index = *index;
                if index > doc.len() {
                    return Err(out_of_bounds(doc, index));
                }
                let map = StepMap::new(block_start(doc, index), 0, block.node_size());
                doc.insert_block(index, block.clone());
                Ok(StepOutcome::new(Step::DeleteBlock { index }, map))
            }
            Step::DeleteBlock { index } => {
                let index = *index;
                let size = target(doc, index)?.node_size();
                if doc.len() == 1 {
                    return Err(StepError::LastBlock);
                }
                let map = StepMap::new(block_start(doc, index), size, 0);
                let block = doc.remove_block(index);
                Ok(StepOutcome::new(Step::InsertBlock { index, block }, map))
            }
            Step::ReplaceBlock { index, block } => {
                let index = *index;
                let size = target(doc, index)?.node_size();
                let map = StepMap::new(block_start(doc, index), size, block.node_size());
                let old = doc.replace_block(index, block.clone());
                Ok(StepOutcome::new(
                    Step::ReplaceBlock { index, block: old },
                    map,
                ))
            }
            Step::SetBlockType { index, block_type } => {
                let index = *index;
                let block = target_mut(doc, index)?;
                let old = block.block_type().clone();
                block.set_type(block_type.clone());
                Ok(StepOutcome::new(
                    Step::SetBlockType {
                        index,
                        block_type: old,
                    },
                    StepMap::EMPTY,
                ))
            }
            Step::SetBlockIndent { index, indent } => {
                let index = *index;
                let block = target_mut(doc, index)?;
                let old = block.indent();
                block.set_indent(i32::from(*indent));
                Ok(StepOutcome::new(
                    Step::SetBlockIndent { index, indent: old },
                    StepMap::EMPTY,
                ))
            }
            Step::SetBlockMeta { index, key, value } => {
                let index = *index;
                let block = target_mut(doc, index)?;
                let old = block.set_meta(key, value.clone());
                Ok(StepOutcome::new(
                    Step::SetBlockMeta {
                        index,
                        key: key.clone(),
                        value: old,
                    },
                    StepMap::EMPTY,
                ))
            }
            Step::MoveBlocks { from, to, count } => {
                let (from, to, count) = (*from, *to, *count);
                let len = doc.len();
                if count == 0 || from + count > len || to + count > len {
                    return Err(StepError::InvalidMove {
                        from,
                        to,
                        count,
                        len,
                    });
                }
                doc.move_blocks(from, to, count);
                Ok(StepOutcome::new(
                    Step::MoveBlocks {
                        from: to,
                        to: from,
                        count,
                    },
                    StepMap::EMPTY,
                ))
            }
            Step::InsertText {
                index,
                offset,
                content,
            } => {
                let (index, offset) = (*index, *offset);
                check_range(doc, index, offset, 0)?;
                let len = content.len();
                let map = StepMap::new(to_flat(doc, index, offset), 0, len);
                let block = target_mut(doc, index)?;
                match content {
                    TextContent::Plain(text) => block.insert_text(offset, text),
                    TextContent::Formatted(lines) => block.insert_lines(offset, lines),
                }
                Ok(StepOutcome::new(Step::delete_text(index, offset, len), map))
            }
            Step::DeleteText { index, offset, len } => {
                let (index, offset, len) = (*index, *offset, *len);
                check_range(doc, index, offset, len)?;
                let map = StepMap::new(to_flat(doc, index, offset), len, 0);
                let block = target_mut(doc, index)?;
                let removed = block.fragment(offset, offset + len);
                block.remove(offset, len);
                Ok(StepOutcome::new(
                    Step::insert_lines(index, offset, removed),
                    map,
                ))
            }
            Step::SplitBlock { index, offset } => {
                let (index, offset) = (*index, *offset);
                check_range(doc, index, offset, 0)?;
                let map = StepMap::new(to_flat(doc, index, offset), 0, 2);
                let right = target_mut(doc, index)?.split_off(offset);
                doc.insert_block(index + 1, right);
                Ok(StepOutcome::new(Step::JoinBlocks { index }, map))
            }
            Step::JoinBlocks { index } => {
                let index = *index;
                target(doc, index)?;
                if index + 1 >= doc.len() {
                    return Err(StepError::NothingToJoin(index));
                }
                let map = StepMap::new(block_start(doc, index + 1) - 1, 2, 0);
                let second = doc.remove_block(index + 1);
                let block = target_mut(doc, index)?;
                let first = block.clone();
                block.append(second.clone());
                Ok(StepOutcome::new(
                    Step::RestoreJoined {
                        index,
                        first: Box::new(first),
                        second: Box::new(second),
                    },
                    map,
                ))
            }
            Step::RestoreJoined {
                index,
                first,
                second,
            } => {
                let index = *index;
                target(doc, index)?;
                let map = StepMap::new(to_flat(doc, index, first.content_size()), 0, 2);
                doc.replace_block(index, first.as_ref().clone());
                doc.insert_block(index + 1, second.as_ref().clone());
                Ok(StepOutcome::new(Step::JoinBlocks { index }, map))
            }
            Step::ChangeFormat {
                index,
                offset,
                len,
                format,
                add,
            } => {
                let (index, offset, len) = (*index, *offset, *len);
                check_range(doc, index, offset, len)?;
                let block = target_mut(doc, index)?;
                let snapshot = block.formatting();
                if *add {
                    block.add_format(offset, len, *format);
                } else {
                    block.remove_format(offset, len, *format);
                }
                Ok(StepOutcome::new(
                    Step::SetFormatting {
                        index,
                        runs: snapshot,
                    },
                    StepMap::EMPTY,
                ))
            }
            Step::SetFormatting { index, runs } => {
                let index = *index;
                let block = target_mut(doc, index)?;
                let snapshot = block.formatting();
                if !block.restore_formatting(runs.clone()) {
                    return Err(StepError::FormattingMismatch(index));
                }
                Ok(StepOutcome::new(
                    Step::SetFormatting {
                        index,
                        runs: snapshot,
                    },
                    StepMap::EMPTY,
                ))
            }
        }
    }
}

fn out_of_bounds(doc: &Document, index: usize) -> StepError {
    StepError::BlockOutOfBounds {
        index,
        len: doc.len(),
    }
}

fn target(doc: &Document, index: usize) -> Result<&Block, StepError> {
    doc.block(index).ok_or_else(|| out_of_bounds(doc, index))
}

fn target_mut(doc: &mut Document, index: usize) -> Result<&mut Block, StepError> {
    let len = doc.len();
    doc.block_mut(index)
        .ok_or(StepError::BlockOutOfBounds { index, len })
}

fn check_range(doc: &Document, index: usize, offset: usize, len: usize) -> Result<(), StepError> {
    let size = target(doc, index)?.content_size();
    let end = offset.saturating_add(len);
    if end > size {
        return Err(StepError::OffsetOutOfBounds {
            block: index,
            start: offset,
            end,
            size,
        });
    }
    Ok(())
}
