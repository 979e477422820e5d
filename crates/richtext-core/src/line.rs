//! Formatted lines and the format algebra.
//!
//! # Overview
//!
//! A [`Line`] is a run of text plus a list of [`FormatRun`]s describing which
//! [`Formats`] (and which run metadata, such as a link URL) apply to which
//! characters. Runs are kept normalized after every mutation:
//!
//! - sorted by start and never overlapping
//! - never empty, and never without at least one tag or metadata entry
//! - adjacent runs with identical tags and metadata are merged
//!
//! Because of this, two lines that render the same compare equal, which is what
//! lets an undo restore a line to a value equal to its original.
//!
//! All offsets are measured in chars (Unicode scalar values).
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{Formats, Line};
//!
//! let mut line = Line::plain("Hello World");
//! line.add_format(0, 5, Formats::BOLD);
//! line.add_format(3, 5, Formats::ITALIC);
//!
//! assert!(line.has_format(0, 5, Formats::BOLD));
//! assert!(!line.has_format(0, 8, Formats::BOLD));
//! assert_eq!(line.runs().len(), 3);
//!
//! line.remove_format(0, 11, Formats::BOLD);
//! assert_eq!(line.runs().len(), 1);
//! ```

use crate::config::LINK_META_KEY;
use bitflags::bitflags;
use ropey::Rope;
use std::collections::BTreeMap;

/// String-keyed metadata attached to runs and blocks.
pub type Meta = BTreeMap<String, String>;

bitflags! {
    /// Set of format tags applied to a run of text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Formats: u16 {
        /// Bold.
        const BOLD = 1 << 0;
        /// Italic.
        const ITALIC = 1 << 1;
        /// Underline.
        const UNDERLINE = 1 << 2;
        /// Strikethrough.
        const STRIKETHROUGH = 1 << 3;
        /// Superscript.
        const SUPERSCRIPT = 1 << 4;
        /// Subscript.
        const SUBSCRIPT = 1 << 5;
        /// Inline code.
        const CODE = 1 << 6;
        /// Highlight.
        const HIGHLIGHT = 1 << 7;
        /// Hyperlink. The URL lives in the run metadata under [`LINK_META_KEY`].
        const LINK = 1 << 8;
    }
}

/// A formatted span of a [`Line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRun {
    /// First char covered by the run.
    pub start: usize,
    /// Number of chars covered.
    pub len: usize,
    /// Tags applied over the span.
    pub formats: Formats,
    /// Extra run data (link URL and similar).
    pub meta: Meta,
}

impl FormatRun {
    /// Create a run without metadata.
    pub fn new(start: usize, len: usize, formats: Formats) -> Self {
        Self {
            start,
            len,
            formats,
            meta: Meta::new(),
        }
    }

    /// Builder: attach a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Exclusive end of the run.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The link URL carried by this run, if any.
    pub fn link(&self) -> Option<&str> {
        self.meta.get(LINK_META_KEY).map(String::as_str)
    }

    fn is_blank(&self) -> bool {
        self.formats.is_empty() && self.meta.is_empty()
    }

    fn same_style(&self, other: &FormatRun) -> bool {
        self.formats == other.formats && self.meta == other.meta
    }
}

/// A single line of formatted text within a block.
#[derive(Debug, Clone)]
pub struct Line {
    text: Rope,
    runs: Vec<FormatRun>,
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.runs == other.runs && self.text == other.text
    }
}

impl Eq for Line {}

impl Line {
    /// Create an empty line.
    pub fn new() -> Self {
        Self {
            text: Rope::new(),
            runs: Vec::new(),
        }
    }

    /// Create an unformatted line.
    pub fn plain(text: &str) -> Self {
        Self {
            text: Rope::from_str(text),
            runs: Vec::new(),
        }
    }

    /// Create a line from text and runs.
    ///
    /// Runs may overlap; overlapping tags and metadata are unioned. Runs past the
    /// end of the text are clipped.
    pub fn from_parts(text: &str, runs: impl IntoIterator<Item = FormatRun>) -> Self {
        let mut line = Self::plain(text);
        for run in runs {
            let FormatRun {
                start,
                len,
                formats,
                meta,
            } = run;
            line.edit_formatting(start, len, |tags, data| {
                *tags |= formats;
                data.extend(meta.iter().map(|(k, v)| (k.clone(), v.clone())));
            });
        }
        line
    }

    /// Builder: append a segment of text carrying `formats`.
    pub fn with(mut self, text: &str, formats: Formats) -> Self {
        self.push_segment(text, formats, None);
        self
    }

    /// Builder: append a linked segment of text.
    pub fn with_link(mut self, text: &str, url: &str, formats: Formats) -> Self {
        self.push_segment(text, formats | Formats::LINK, Some(url));
        self
    }

    fn push_segment(&mut self, text: &str, formats: Formats, url: Option<&str>) {
        let start = self.len();
        let len = text.chars().count();
        self.text.insert(start, text);
        let mut run = FormatRun::new(start, len, formats);
        if let Some(url) = url {
            run.meta.insert(LINK_META_KEY.to_string(), url.to_string());
        }
        self.runs.push(run);
        self.normalize();
    }

    /// The text of the line.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// The underlying rope.
    pub fn rope(&self) -> &Rope {
        &self.text
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.text.len_chars()
    }

    /// Whether the line has no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalized format runs.
    pub fn runs(&self) -> &[FormatRun] {
        &self.runs
    }

    /// Whether any run is present.
    pub fn is_formatted(&self) -> bool {
        !self.runs.is_empty()
    }

    /// Char at `index`.
    pub fn char_at(&self, index: usize) -> Option<char> {
        (index < self.len()).then(|| self.text.char(index))
    }

    /// Tags applied at char `index` (empty when unformatted).
    pub fn formats_at(&self, index: usize) -> Formats {
        self.run_at(index)
            .map(|run| run.formats)
            .unwrap_or_else(Formats::empty)
    }

    /// The run covering char `index`.
    pub fn run_at(&self, index: usize) -> Option<&FormatRun> {
        self.runs
            .iter()
            .find(|run| run.start <= index && index < run.end())
    }

    /// Insert plain text at `at`.
    ///
    /// A run that contains `at` or ends exactly at `at` grows to cover the new
    /// text; runs starting at or after `at` shift right.
    pub fn insert_text(&mut self, at: usize, text: &str) {
        let at = at.min(self.len());
        let count = text.chars().count();
        if count == 0 {
            return;
        }
        self.text.insert(at, text);
        for run in &mut self.runs {
            if run.start >= at {
                run.start += count;
            } else if run.end() >= at {
                run.len += count;
            }
        }
        self.normalize();
    }

    /// Insert a formatted line at `at`, keeping its runs exactly.
    pub fn insert_line(&mut self, at: usize, other: &Line) {
        let at = at.min(self.len());
        let count = other.len();
        if count == 0 {
            return;
        }
        self.split_runs_at(at);
        for run in &mut self.runs {
            if run.start >= at {
                run.start += count;
            }
        }
        self.text.insert(at, &other.text());
        self.runs.extend(other.runs.iter().map(|run| {
            let mut run = run.clone();
            run.start += at;
            run
        }));
        self.normalize();
    }

    /// Remove `len` chars starting at `start`, trimming runs.
    pub fn remove(&mut self, start: usize, len: usize) {
        let (start, end) = self.clip(start, len);
        if start >= end {
            return;
        }
        self.text.remove(start..end);
        let removed = end - start;
        let shift = |pos: usize| {
            if pos <= start {
                pos
            } else if pos >= end {
                pos - removed
            } else {
                start
            }
        };
        for run in &mut self.runs {
            let run_start = shift(run.start);
            let run_end = shift(run.end());
            run.start = run_start;
            run.len = run_end - run_start;
        }
        self.normalize();
    }

    /// Copy of the chars in `start..end`, with runs re-anchored at zero.
    pub fn slice(&self, start: usize, end: usize) -> Line {
        let end = end.min(self.len());
        let start = start.min(end);
        let runs = self
            .runs
            .iter()
            .filter_map(|run| {
                let s = run.start.max(start);
                let e = run.end().min(end);
                (s < e).then(|| FormatRun {
                    start: s - start,
                    len: e - s,
                    formats: run.formats,
                    meta: run.meta.clone(),
                })
            })
            .collect();
        Line {
            text: Rope::from(self.text.slice(start..end)),
            runs,
        }
    }

    /// Split the line at `at`, returning the right-hand part.
    pub fn split_off(&mut self, at: usize) -> Line {
        let len = self.len();
        let at = at.min(len);
        let right = self.slice(at, len);
        self.remove(at, len - at);
        right
    }

    /// Append another line to the end of this one.
    pub fn append_line(&mut self, other: Line) {
        let offset = self.len();
        let Line { text, runs } = other;
        self.text.append(text);
        self.runs.extend(runs.into_iter().map(|mut run| {
            run.start += offset;
            run
        }));
        self.normalize();
    }

    /// Add `tag` over `start..start + len`.
    pub fn add_format(&mut self, start: usize, len: usize, tag: Formats) {
        self.edit_formatting(start, len, |formats, _| formats.insert(tag));
    }

    /// Remove `tag` over `start..start + len`.
    pub fn remove_format(&mut self, start: usize, len: usize, tag: Formats) {
        self.edit_formatting(start, len, |formats, _| formats.remove(tag));
    }

    /// Remove every tag and all run metadata over `start..start + len`.
    pub fn strip_formatting(&mut self, start: usize, len: usize) {
        self.edit_formatting(start, len, |formats, meta| {
            *formats = Formats::empty();
            meta.clear();
        });
    }

    /// Whether every char of `start..start + len` carries `tag`.
    ///
    /// An empty range has no format.
    pub fn has_format(&self, start: usize, len: usize, tag: Formats) -> bool {
        let (start, end) = self.clip(start, len);
        if start >= end {
            return false;
        }
        let mut covered = start;
        for run in &self.runs {
            if run.end() <= covered {
                continue;
            }
            if run.start > covered || !run.formats.contains(tag) {
                return false;
            }
            covered = run.end();
            if covered >= end {
                return true;
            }
        }
        false
    }

    /// Rewrite the style of every char in `start..start + len`.
    ///
    /// Runs straddling the range edges are split first and unformatted gaps
    /// inside the range are filled, so `edit` sees uniform spans that lie
    /// entirely inside the range. The result is normalized.
    pub fn edit_formatting<F>(&mut self, start: usize, len: usize, mut edit: F)
    where
        F: FnMut(&mut Formats, &mut Meta),
    {
        let (start, end) = self.clip(start, len);
        if start >= end {
            return;
        }
        self.split_runs_at(start);
        self.split_runs_at(end);

        let mut gaps = Vec::new();
        let mut covered = start;
        for run in &self.runs {
            if run.end() <= start || run.start >= end {
                continue;
            }
            if run.start > covered {
                gaps.push(FormatRun::new(covered, run.start - covered, Formats::empty()));
            }
            covered = run.end();
        }
        if covered < end {
            gaps.push(FormatRun::new(covered, end - covered, Formats::empty()));
        }
        self.runs.extend(gaps);

        for run in &mut self.runs {
            if run.start >= start && run.end() <= end {
                edit(&mut run.formats, &mut run.meta);
            }
        }
        self.normalize();
    }

    /// Replace the runs wholesale. Returns `false` (leaving the line untouched)
    /// when a run reaches past the end of the text.
    pub(crate) fn replace_runs(&mut self, runs: Vec<FormatRun>) -> bool {
        let len = self.len();
        if runs.iter().any(|run| run.end() > len) {
            return false;
        }
        self.runs = runs;
        self.normalize();
        true
    }

    fn clip(&self, start: usize, len: usize) -> (usize, usize) {
        let total = self.len();
        let start = start.min(total);
        (start, start.saturating_add(len).min(total))
    }

    fn split_runs_at(&mut self, pos: usize) {
        let Some(index) = self
            .runs
            .iter()
            .position(|run| run.start < pos && pos < run.end())
        else {
            return;
        };
        let run = &mut self.runs[index];
        let mut right = run.clone();
        right.start = pos;
        right.len = run.end() - pos;
        run.len = pos - run.start;
        self.runs.insert(index + 1, right);
    }

    fn normalize(&mut self) {
        let total = self.len();
        let mut runs = std::mem::take(&mut self.runs);
        runs.retain_mut(|run| {
            if run.start >= total {
                return false;
            }
            run.len = run.len.min(total - run.start);
            run.len > 0 && !run.is_blank()
        });
        runs.sort_by_key(|run| run.start);

        let mut merged: Vec<FormatRun> = Vec::with_capacity(runs.len());
        for run in runs {
            if let Some(last) = merged.last_mut()
                && last.end() == run.start
                && last.same_style(&run)
            {
                last.len += run.len;
                continue;
            }
            merged.push(run);
        }
        self.runs = merged;
    }
}
