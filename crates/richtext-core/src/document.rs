//! Document model: blocks of formatted lines.
//!
//! A [`Document`] is an ordered list of [`Block`]s and always holds at least
//! one block. Each block has a [`BlockType`], an indent level, block metadata
//! and one or more [`Line`]s (soft line breaks within the block).
//!
//! Offsets inside a block ("block offsets") count the chars of every line plus
//! one unit for each separator between lines, so a block with lines `"ab"` and
//! `"cd"` has content size 5 and offset 3 is the start of `"cd"`.

use crate::config::{MAX_INDENT, clamp_indent};
use crate::line::{FormatRun, Formats, Line, Meta};
use std::fmt;

/// Kind of block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BlockType {
    /// Body paragraph.
    #[default]
    Paragraph,
    /// Heading level 1.
    Heading1,
    /// Heading level 2.
    Heading2,
    /// Heading level 3.
    Heading3,
    /// Numbered list item.
    NumberedList,
    /// Bulleted list item.
    BulletList,
    /// Block quote.
    Quote,
    /// Code block.
    Code,
    /// Equation.
    Equation,
    /// Diagram.
    Diagram,
    /// Application-defined block kind.
    Custom(String),
}

impl BlockType {
    /// Stable name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading1 => "h1",
            BlockType::Heading2 => "h2",
            BlockType::Heading3 => "h3",
            BlockType::NumberedList => "numbered-list",
            BlockType::BulletList => "bullet-list",
            BlockType::Quote => "quote",
            BlockType::Code => "code",
            BlockType::Equation => "equation",
            BlockType::Diagram => "diagram",
            BlockType::Custom(name) => name,
        }
    }

    /// Whether this is one of the heading levels.
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            BlockType::Heading1 | BlockType::Heading2 | BlockType::Heading3
        )
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, indentable unit of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    block_type: BlockType,
    indent: u8,
    meta: Meta,
    lines: Vec<Line>,
}

impl Default for Block {
    fn default() -> Self {
        Self::new(BlockType::Paragraph)
    }
}

impl Block {
    /// Create an empty block (one empty line).
    pub fn new(block_type: BlockType) -> Self {
        Self {
            block_type,
            indent: 0,
            meta: Meta::new(),
            lines: vec![Line::new()],
        }
    }

    /// Create a paragraph from plain text. `'\n'` starts a new line.
    pub fn paragraph(text: &str) -> Self {
        Self::with_text(BlockType::Paragraph, text)
    }

    /// Create a block of `block_type` from plain text. `'\n'` starts a new line.
    pub fn with_text(block_type: BlockType, text: &str) -> Self {
        Self::from_lines(block_type, text.split('\n').map(Line::plain).collect())
    }

    /// Create a block from lines. An empty list yields one empty line.
    pub fn from_lines(block_type: BlockType, lines: Vec<Line>) -> Self {
        let mut block = Self::new(block_type);
        if !lines.is_empty() {
            block.lines = lines;
        }
        block
    }

    /// Builder: set the indent level (clamped).
    pub fn indented(mut self, level: u8) -> Self {
        self.indent = level.min(MAX_INDENT);
        self
    }

    /// Builder: set a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Builder: append a line.
    pub fn with_line(mut self, line: Line) -> Self {
        if self.lines.len() == 1 && self.lines[0].is_empty() && !self.lines[0].is_formatted() {
            self.lines[0] = line;
        } else {
            self.lines.push(line);
        }
        self
    }

    /// Block type.
    pub fn block_type(&self) -> &BlockType {
        &self.block_type
    }

    /// Indent level in `0..=MAX_INDENT`.
    pub fn indent(&self) -> u8 {
        self.indent
    }

    /// Block metadata.
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Lines of the block (never empty).
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Chars plus inter-line separators.
    pub fn content_size(&self) -> usize {
        self.lines.iter().map(Line::len).sum::<usize>() + self.lines.len() - 1
    }

    /// Content size plus the open and close boundary tokens.
    pub fn node_size(&self) -> usize {
        self.content_size() + 2
    }

    /// Whether the block has no content.
    pub fn is_empty(&self) -> bool {
        self.content_size() == 0
    }

    /// Plain text, lines joined by `'\n'`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Map a block offset to `(line index, char in line)`.
    ///
    /// An offset on a separator resolves to the end of the line before it.
    /// Offsets past the end clamp to the end of the last line.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let mut remaining = offset;
        for (index, line) in self.lines.iter().enumerate() {
            if remaining <= line.len() {
                return (index, remaining);
            }
            remaining -= line.len() + 1;
        }
        let last = self.lines.len() - 1;
        (last, self.lines[last].len())
    }

    /// Block offset of the first char of line `index`.
    pub fn line_start(&self, index: usize) -> usize {
        self.lines
            .iter()
            .take(index)
            .map(|line| line.len() + 1)
            .sum()
    }

    /// Char at a block offset; separators read as `'\n'`.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset >= self.content_size() {
            return None;
        }
        let (line, ch) = self.locate(offset);
        Some(self.lines[line].char_at(ch).unwrap_or('\n'))
    }

    /// Set the block type.
    pub fn set_type(&mut self, block_type: BlockType) {
        self.block_type = block_type;
    }

    /// Set the indent, clamped to `0..=MAX_INDENT`.
    pub fn set_indent(&mut self, level: i32) {
        self.indent = clamp_indent(level);
    }

    /// Set (`Some`) or remove (`None`) a metadata key, returning the old value.
    pub fn set_meta(&mut self, key: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(value) => self.meta.insert(key.to_string(), value),
            None => self.meta.remove(key),
        }
    }

    /// Insert plain text at a block offset. `'\n'` splits the line.
    ///
    /// The first segment continues the formatting of the run it lands in or
    /// follows; later segments are unformatted.
    pub fn insert_text(&mut self, offset: usize, text: &str) {
        let (index, at) = self.locate(offset);
        let mut segments = text.split('\n');
        let first = segments.next().unwrap_or_default();
        let rest: Vec<Line> = segments.map(Line::plain).collect();
        if rest.is_empty() {
            self.lines[index].insert_text(at, first);
            return;
        }
        let tail = self.lines[index].split_off(at);
        self.lines[index].insert_text(at, first);
        self.splice_tail(index, rest, tail);
    }

    /// Insert formatted lines at a block offset, keeping their runs exactly.
    ///
    /// The first fragment line joins the line at the offset, the last one
    /// takes the remainder of that line.
    pub fn insert_lines(&mut self, offset: usize, fragment: &[Line]) {
        let Some((first, rest)) = fragment.split_first() else {
            return;
        };
        let (index, at) = self.locate(offset);
        if rest.is_empty() {
            self.lines[index].insert_line(at, first);
            return;
        }
        let tail = self.lines[index].split_off(at);
        self.lines[index].append_line(first.clone());
        self.splice_tail(index, rest.to_vec(), tail);
    }

    fn splice_tail(&mut self, index: usize, mut rest: Vec<Line>, tail: Line) {
        if let Some(last) = rest.last_mut() {
            last.append_line(tail);
        }
        let at = index + 1;
        self.lines.splice(at..at, rest);
    }

    /// Copy of the content in `start..end` as lines.
    pub fn fragment(&self, start: usize, end: usize) -> Vec<Line> {
        let end = end.min(self.content_size());
        let start = start.min(end);
        let (first_line, first_char) = self.locate(start);
        let (last_line, last_char) = self.locate(end);
        if first_line == last_line {
            return vec![self.lines[first_line].slice(first_char, last_char)];
        }
        let mut lines = Vec::with_capacity(last_line - first_line + 1);
        let first = &self.lines[first_line];
        lines.push(first.slice(first_char, first.len()));
        lines.extend(self.lines[first_line + 1..last_line].iter().cloned());
        lines.push(self.lines[last_line].slice(0, last_char));
        lines
    }

    /// Remove the content in `start..start + len`, merging lines across
    /// removed separators.
    pub fn remove(&mut self, start: usize, len: usize) {
        let end = start.saturating_add(len).min(self.content_size());
        let start = start.min(end);
        if start == end {
            return;
        }
        let (first_line, first_char) = self.locate(start);
        let (last_line, last_char) = self.locate(end);
        if first_line == last_line {
            self.lines[first_line].remove(first_char, last_char - first_char);
            return;
        }
        let tail = self.lines[last_line].split_off(last_char);
        let line = &mut self.lines[first_line];
        line.remove(first_char, line.len() - first_char);
        line.append_line(tail);
        self.lines.drain(first_line + 1..=last_line);
    }

    /// Copy of `start..end` as a block with the same type, indent and metadata.
    pub fn slice(&self, start: usize, end: usize) -> Block {
        Block {
            block_type: self.block_type.clone(),
            indent: self.indent,
            meta: self.meta.clone(),
            lines: self.fragment(start, end),
        }
    }

    /// Split at `offset`. The returned block keeps type and indent but starts
    /// without metadata.
    pub fn split_off(&mut self, offset: usize) -> Block {
        let size = self.content_size();
        let lines = self.fragment(offset, size);
        self.remove(offset, size.saturating_sub(offset));
        Block {
            block_type: self.block_type.clone(),
            indent: self.indent,
            meta: Meta::new(),
            lines,
        }
    }

    /// Append the content of `other`: its first line joins this block's last
    /// line. Type, indent and metadata of `other` are dropped.
    pub fn append(&mut self, other: Block) {
        let mut lines = other.lines.into_iter();
        if let Some(first) = lines.next()
            && let Some(last) = self.lines.last_mut()
        {
            last.append_line(first);
        }
        self.lines.extend(lines);
    }

    /// Whether every char of `start..start + len` carries `tag`.
    pub fn has_format(&self, start: usize, len: usize, tag: Formats) -> bool {
        let segments = self.segments(start, len);
        !segments.is_empty()
            && segments
                .iter()
                .all(|&(line, s, l)| self.lines[line].has_format(s, l, tag))
    }

    /// Add `tag` over a block range.
    pub fn add_format(&mut self, start: usize, len: usize, tag: Formats) {
        self.edit_formatting(start, len, |formats, _| formats.insert(tag));
    }

    /// Remove `tag` over a block range.
    pub fn remove_format(&mut self, start: usize, len: usize, tag: Formats) {
        self.edit_formatting(start, len, |formats, _| formats.remove(tag));
    }

    /// Rewrite the style of every char in a block range. See
    /// [`Line::edit_formatting`].
    pub fn edit_formatting<F>(&mut self, start: usize, len: usize, mut edit: F)
    where
        F: FnMut(&mut Formats, &mut Meta),
    {
        for (line, s, l) in self.segments(start, len) {
            self.lines[line].edit_formatting(s, l, &mut edit);
        }
    }

    /// Number of chars (separators excluded) in a block range.
    pub fn chars_in(&self, start: usize, len: usize) -> usize {
        self.segments(start, len).iter().map(|&(_, _, l)| l).sum()
    }

    /// Runs of every line, in line order.
    pub fn formatting(&self) -> Vec<Vec<FormatRun>> {
        self.lines.iter().map(|line| line.runs().to_vec()).collect()
    }

    /// Replace the runs of every line. Returns `false` without changing
    /// anything if the snapshot does not fit the lines.
    pub fn restore_formatting(&mut self, runs: Vec<Vec<FormatRun>>) -> bool {
        let fits = runs.len() == self.lines.len()
            && runs
                .iter()
                .zip(&self.lines)
                .all(|(runs, line)| runs.iter().all(|run| run.end() <= line.len()));
        if !fits {
            return false;
        }
        for (line, runs) in self.lines.iter_mut().zip(runs) {
            line.replace_runs(runs);
        }
        true
    }

    /// `(line, start, len)` pieces of a block range, skipping empty pieces.
    fn segments(&self, start: usize, len: usize) -> Vec<(usize, usize, usize)> {
        let end = start.saturating_add(len);
        let mut pieces = Vec::new();
        let mut line_start = 0;
        for (index, line) in self.lines.iter().enumerate() {
            let line_end = line_start + line.len();
            let s = start.max(line_start);
            let e = end.min(line_end);
            if s < e {
                pieces.push((index, s - line_start, e - s));
            }
            if line_end >= end {
                break;
            }
            line_start = line_end + 1;
        }
        pieces
    }
}

/// An ordered list of blocks. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Document {
    /// Create a document. An empty list yields a single empty paragraph.
    pub fn new(mut blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            blocks.push(Block::default());
        }
        Self { blocks }
    }

    /// Create a document of single-line paragraphs.
    pub fn from_paragraphs<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            texts
                .into_iter()
                .map(|text| Block::paragraph(text.as_ref()))
                .collect(),
        )
    }

    /// All blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Block at `index`.
    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document holds a single block without content.
    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1 && self.blocks[0].is_empty()
    }

    /// Plain text of each block.
    pub fn block_texts(&self) -> Vec<String> {
        self.blocks.iter().map(Block::text).collect()
    }

    pub(crate) fn block_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_mut(index)
    }

    pub(crate) fn insert_block(&mut self, index: usize, block: Block) {
        self.blocks.insert(index, block);
    }

    pub(crate) fn remove_block(&mut self, index: usize) -> Block {
        self.blocks.remove(index)
    }

    pub(crate) fn replace_block(&mut self, index: usize, block: Block) -> Block {
        std::mem::replace(&mut self.blocks[index], block)
    }

    /// Remove `count` blocks at `from` and reinsert them so the first lands at `to`.
    pub(crate) fn move_blocks(&mut self, from: usize, to: usize, count: usize) {
        let moved: Vec<Block> = self.blocks.drain(from..from + count).collect();
        self.blocks.splice(to..to, moved);
    }
}
