//! Flat position addressing.
//!
//! The document is addressed as one token stream: every block contributes an
//! open boundary token, its content (chars, one token per line separator) and
//! a close boundary token. For `["Hi", "Yo"]`:
//!
//! ```text
//! pos:   0   1   2   3   4   5   6   7
//!        <p> H   i   </p><p> Y   o   </p>
//! ```
//!
//! Position 1 is block 0 offset 0, position 7 is block 1 offset 2 (block 1's
//! close boundary), and [`length`] is 8.
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{Document, position};
//!
//! let doc = Document::from_paragraphs(["Hi", "Yo"]);
//! assert_eq!(position::block_start(&doc, 1), 4);
//! assert_eq!(position::to_flat(&doc, 1, 2), 7);
//! assert_eq!(position::resolve(&doc, 7).block_offset, 2);
//! ```

use crate::document::{Block, Document};

/// Which boundary token a resolved position sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The block's open token (just before its content).
    Open,
    /// The block's close token (just after its content).
    Close,
}

/// A flat position resolved against a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPos {
    /// The flat position that was resolved (clamped into the document).
    pub pos: usize,
    /// Block containing the position.
    pub block: usize,
    /// Boundary token the position sits on, if any.
    pub boundary: Option<Boundary>,
    /// Line within the block (`None` on the open boundary).
    pub line: Option<usize>,
    /// Char within the line (`None` on the open boundary).
    pub char_in_line: Option<usize>,
    /// Offset within the block content. `0` on the open boundary, the content
    /// size on the close boundary.
    pub block_offset: usize,
}

/// Content size of a block: chars plus line separators.
pub fn content_size(block: &Block) -> usize {
    block.content_size()
}

/// Node size of a block: content plus its two boundary tokens.
pub fn node_size(block: &Block) -> usize {
    block.node_size()
}

/// Flat position of block `index`'s open token.
///
/// Indices past the end give the document length.
pub fn block_start(doc: &Document, index: usize) -> usize {
    doc.blocks().iter().take(index).map(Block::node_size).sum()
}

/// Flat position of a block offset.
pub fn to_flat(doc: &Document, block: usize, offset: usize) -> usize {
    block_start(doc, block) + 1 + offset
}

/// Total size of the document token stream.
pub fn length(doc: &Document) -> usize {
    block_start(doc, doc.len())
}

/// Resolve a flat position.
///
/// Positions at or past the end of the document resolve to the last block's
/// close boundary.
pub fn resolve(doc: &Document, pos: usize) -> ResolvedPos {
    let mut start = 0;
    for (index, block) in doc.blocks().iter().enumerate() {
        let size = block.node_size();
        if pos < start + size {
            return resolve_in_block(block, index, pos, pos - start);
        }
        start += size;
    }
    let last = doc.len() - 1;
    let block = &doc.blocks()[last];
    let end = start - 1;
    resolve_in_block(block, last, end, end - (start - block.node_size()))
}

fn resolve_in_block(block: &Block, index: usize, pos: usize, local: usize) -> ResolvedPos {
    if local == 0 {
        return ResolvedPos {
            pos,
            block: index,
            boundary: Some(Boundary::Open),
            line: None,
            char_in_line: None,
            block_offset: 0,
        };
    }
    let offset = local - 1;
    let (line, char_in_line) = block.locate(offset);
    let boundary = (offset == block.content_size()).then_some(Boundary::Close);
    ResolvedPos {
        pos,
        block: index,
        boundary,
        line: Some(line),
        char_in_line: Some(char_in_line),
        block_offset: offset,
    }
}
