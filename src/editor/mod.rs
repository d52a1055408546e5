//! Editing session state and undo history

/// Single-step placement undo
pub mod history;
/// Owned editor state and user action handlers
pub mod state;

pub use history::{PlacementHistory, UndoMode};
pub use state::{EditorConfig, EditorState};
