//! Cursor and selection.
//!
//! A [`Selection`] is an anchor and a head [`Position`], each a
//! `(block, offset)` pair. The anchor is where the selection started and the
//! head is where it currently ends, so `head` may come before `anchor`.
//! [`Selection::from`] and [`Selection::to`] give the endpoints in document
//! order.

use crate::document::Document;
use crate::mapping::{Bias, Mapping};
use crate::position::{resolve, to_flat};
use std::cmp::Ordering;

/// A point in the document: block index and offset within its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Block index.
    pub block: usize,
    /// Offset within the block content.
    pub offset: usize,
}

impl Position {
    /// Create a position.
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }

    /// Flat position against `doc`.
    pub fn to_flat(self, doc: &Document) -> usize {
        to_flat(doc, self.block, self.offset)
    }

    /// Position of a flat offset in `doc`.
    pub fn from_flat(doc: &Document, pos: usize) -> Self {
        let resolved = resolve(doc, pos);
        Self::new(resolved.block, resolved.block_offset)
    }

    /// Pull the position inside `doc`. A block index past the last block
    /// lands at the end of the document.
    pub fn clamp(self, doc: &Document) -> Self {
        let last = doc.len() - 1;
        if self.block > last {
            return Self::new(last, doc.blocks()[last].content_size());
        }
        let size = doc.blocks()[self.block].content_size();
        Self::new(self.block, self.offset.min(size))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.block
            .cmp(&other.block)
            .then_with(|| self.offset.cmp(&other.offset))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selection direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    /// Anchor at or before head.
    Forward,
    /// Head before anchor.
    Backward,
}

/// Anchor and head of the live selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    /// Where the selection started.
    pub anchor: Position,
    /// Where the selection ends (the caret).
    pub head: Position,
}

impl Selection {
    /// Selection between two positions.
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Collapsed selection.
    pub fn cursor(block: usize, offset: usize) -> Self {
        let at = Position::new(block, offset);
        Self::new(at, at)
    }

    /// Range selection from `(anchor_block, anchor_offset)` to
    /// `(head_block, head_offset)`.
    pub fn range(
        anchor_block: usize,
        anchor_offset: usize,
        head_block: usize,
        head_offset: usize,
    ) -> Self {
        Self::new(
            Position::new(anchor_block, anchor_offset),
            Position::new(head_block, head_offset),
        )
    }

    /// Selection from flat anchor and head positions.
    pub fn from_flat(doc: &Document, anchor: usize, head: usize) -> Self {
        Self::new(Position::from_flat(doc, anchor), Position::from_flat(doc, head))
    }

    /// Whether anchor and head coincide.
    pub fn is_cursor(&self) -> bool {
        self.anchor == self.head
    }

    /// The endpoint earlier in the document.
    pub fn from(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// The endpoint later in the document.
    pub fn to(&self) -> Position {
        self.anchor.max(self.head)
    }

    /// Direction of the selection.
    pub fn direction(&self) -> SelectionDirection {
        if self.head < self.anchor {
            SelectionDirection::Backward
        } else {
            SelectionDirection::Forward
        }
    }

    /// Whether the selection spans more than one block.
    pub fn is_multi_block(&self) -> bool {
        self.anchor.block != self.head.block
    }

    /// Flat anchor against `doc`.
    pub fn anchor_flat(&self, doc: &Document) -> usize {
        self.anchor.to_flat(doc)
    }

    /// Flat head against `doc`.
    pub fn head_flat(&self, doc: &Document) -> usize {
        self.head.to_flat(doc)
    }

    /// Pull both endpoints inside `doc`.
    pub fn clamp(&self, doc: &Document) -> Self {
        Self::new(self.anchor.clamp(doc), self.head.clamp(doc))
    }

    /// Carry a selection through `mapping`.
    ///
    /// `anchor` and `head` are the flat endpoints against the document before
    /// the edit; the result is resolved against `doc`, the document after it.
    /// A cursor maps with right bias. A range maps its start with left bias
    /// and its end with right bias, keeping its direction.
    pub fn map_flat(
        &self,
        anchor: usize,
        head: usize,
        mapping: &Mapping,
        doc: &Document,
    ) -> Self {
        if self.is_cursor() {
            let pos = mapping.map(head, Bias::Right);
            return Self::from_flat(doc, pos, pos);
        }
        let (from, to) = (anchor.min(head), anchor.max(head));
        let from = mapping.map(from, Bias::Left);
        let to = mapping.map(to, Bias::Right);
        match self.direction() {
            SelectionDirection::Forward => Self::from_flat(doc, from, to),
            SelectionDirection::Backward => Self::from_flat(doc, to, from),
        }
    }
}
