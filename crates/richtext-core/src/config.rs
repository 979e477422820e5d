//! Editor configuration and shared limits.

/// Highest indent level a block may carry. Indents are clamped to `0..=MAX_INDENT`.
pub const MAX_INDENT: u8 = 5;

/// Default number of undo entries kept by [`History`](crate::History).
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Metadata key under which a link run stores its URL.
pub const LINK_META_KEY: &str = "link";

/// Tunables for an [`Editor`](crate::Editor) and its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Maximum number of undo entries. `0` keeps every entry.
    pub history_limit: usize,
}

impl EditorConfig {
    /// Override the history limit.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Clamp a requested indent level into the supported range.
pub fn clamp_indent(level: i32) -> u8 {
    level.clamp(0, MAX_INDENT as i32) as u8
}
