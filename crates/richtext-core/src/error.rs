//! Error types.

use thiserror::Error;

/// A step could not be applied to the document it was given.
///
/// Steps built by [`commands`](crate::commands) are validated before they are
/// constructed, so these errors indicate a step assembled by hand against the
/// wrong document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// Block index outside the document.
    #[error("block index {index} out of bounds (document has {len} blocks)")]
    BlockOutOfBounds {
        /// Requested block index.
        index: usize,
        /// Number of blocks in the document.
        len: usize,
    },
    /// Offset range outside a block's content.
    #[error("range {start}..{end} out of bounds for block {block} (content size {size})")]
    OffsetOutOfBounds {
        /// Block index.
        block: usize,
        /// Range start (block offset).
        start: usize,
        /// Range end (block offset).
        end: usize,
        /// Content size of the block.
        size: usize,
    },
    /// The only remaining block cannot be removed.
    #[error("cannot remove the last remaining block")]
    LastBlock,
    /// Join requested on the final block.
    #[error("block {0} has no following block to join with")]
    NothingToJoin(usize),
    /// Move range does not fit in the document.
    #[error("cannot move {count} blocks from {from} to {to} in a document of {len} blocks")]
    InvalidMove {
        /// First moved block.
        from: usize,
        /// Destination index of the first moved block.
        to: usize,
        /// Number of blocks moved.
        count: usize,
        /// Number of blocks in the document.
        len: usize,
    },
    /// A formatting snapshot does not line up with the block it targets.
    #[error("formatting snapshot does not match the lines of block {0}")]
    FormattingMismatch(usize),
}
