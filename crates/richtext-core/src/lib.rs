#![warn(missing_docs)]
//! Richtext Core - Headless Block Document Editing Engine
//!
//! # Overview
//!
//! `richtext-core` edits a structured rich-text document (a sequence of typed,
//! formatted blocks) through small invertible steps. It keeps the selection
//! positioned across edits, supports multi-level undo/redo, and offers a set
//! of editing commands (typing, backspace, line breaks, indent, block moves,
//! formatting, copy/paste) for a presentation layer to call.
//!
//! Rendering, input handling and persistence are left to the embedding
//! application.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Editor (EditCommand executor)              │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Commands (intent -> Transaction)           │
//! ├─────────────────────────────────────────────┤
//! │  EditorState + History                      │  ← Apply / undo / redo
//! ├─────────────────────────────────────────────┤
//! │  Transaction (steps + selection)            │
//! ├─────────────────────────────────────────────┤
//! │  Steps (invertible) + StepMap / Mapping     │  ← Edit algebra
//! ├─────────────────────────────────────────────┤
//! │  Position addressing (flat offsets)         │
//! ├─────────────────────────────────────────────┤
//! │  Document / Block / Line / FormatRun        │  ← Data model
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Using the Editor
//!
//! ```rust
//! use richtext_core::{Document, EditCommand, Editor, Selection};
//!
//! let mut editor = Editor::new(Document::from_paragraphs(["Hello World"]));
//! editor.set_selection(Selection::cursor(0, 5));
//!
//! editor.execute(EditCommand::SplitBlock).unwrap();
//! assert_eq!(editor.doc().block_texts(), ["Hello", " World"]);
//! assert_eq!(editor.selection(), Selection::cursor(1, 0));
//!
//! editor.execute(EditCommand::Undo).unwrap();
//! assert_eq!(editor.doc().block_texts(), ["Hello World"]);
//! ```
//!
//! ## Using State and Commands Directly
//!
//! ```rust
//! use richtext_core::{commands, Document, EditorState, History, Selection};
//!
//! let doc = Document::from_paragraphs(["Hello"]);
//! let mut state = EditorState::new(doc, Selection::cursor(0, 5));
//! let mut history = History::new();
//!
//! if let Some(tr) = commands::insert_text(&state, "!") {
//!     let inverse = state.apply(&tr).unwrap();
//!     history.push(inverse);
//! }
//! assert_eq!(state.doc().block_texts(), ["Hello!"]);
//!
//! history.undo(&mut state).unwrap();
//! assert_eq!(state.doc().block_texts(), ["Hello"]);
//! ```
//!
//! # Module Description
//!
//! - [`line`] - Formatted lines and the format algebra
//! - [`document`] - Blocks and documents
//! - [`position`] - Flat position addressing
//! - [`mapping`] - Step maps and position mapping
//! - [`step`] - Invertible document steps
//! - [`transaction`] - Step batches
//! - [`selection`] - Cursor and selection
//! - [`state`] - Live editor state
//! - [`history`] - Undo/redo
//! - [`commands`] - Editing commands
//! - [`editor`] - Command executor
//!
//! # Logging
//!
//! The crate emits `tracing` events (transaction application, undo/redo,
//! rollbacks). Install any subscriber to see them.

pub mod commands;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod history;
pub mod line;
pub mod mapping;
pub mod position;
pub mod selection;
pub mod state;
pub mod step;
pub mod transaction;

pub use config::{DEFAULT_HISTORY_LIMIT, EditorConfig, LINK_META_KEY, MAX_INDENT};
pub use document::{Block, BlockType, Document};
pub use editor::{EditCommand, Editor};
pub use error::StepError;
pub use history::History;
pub use line::{FormatRun, Formats, Line, Meta};
pub use mapping::{Bias, Mapping, StepMap};
pub use position::{Boundary, ResolvedPos};
pub use selection::{Position, Selection, SelectionDirection};
pub use state::EditorState;
pub use step::{Step, StepOutcome, TextContent};
pub use transaction::{Transaction, TransactionResult};
