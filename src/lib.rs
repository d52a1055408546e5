//! Sprite-sheet tile extraction and square tile map painting
//!
//! A sheet is sliced into fixed-size tiles with blank cells discarded; tiles
//! are then painted onto a square map that can be resized, cleared, undone
//! one step and exported as space-separated text.

#![forbid(unsafe_code)]

/// Editing session state and undo history
pub mod editor;
/// Input/output operations and error handling
pub mod io;
/// Tile extraction, palette and map grid
pub mod spatial;

pub use editor::{EditorConfig, EditorState, UndoMode};
pub use io::error::{EditorError, Result};
