//! Line-based edit scripts driving an [`EditorState`]
//!
//! One command per line; `#` starts a comment and blank lines are skipped:
//!
//! ```text
//! select 3
//! paint 10
//! paint 2 4
//! erase 11
//! resize 16
//! clear
//! undo
//! ```

use std::str::FromStr;

use crate::editor::state::EditorState;
use crate::io::error::{EditorError, Result};
use crate::spatial::tiles::TileId;

/// A single user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select a palette tile
    Select(TileId),
    /// Paint the selected tile at a row-major cell index
    Paint(usize),
    /// Paint the selected tile at `(row, col)`
    PaintAt(usize, usize),
    /// Empty one cell
    Erase(usize),
    /// Change the map side length
    Resize(usize),
    /// Empty every cell
    Clear,
    /// Undo the most recent paint
    Undo,
}

impl Command {
    /// Run the command against the editor
    ///
    /// # Errors
    ///
    /// Propagates the error of the matching editor operation
    pub fn apply(self, state: &mut EditorState) -> Result<()> {
        match self {
            Self::Select(id) => state.select_tile(id),
            Self::Paint(index) => state.paint_cell(index).map(drop),
            Self::PaintAt(row, col) => state.paint_at(row, col).map(drop),
            Self::Erase(index) => state.erase_cell(index),
            Self::Resize(size) => state.resize(size),
            Self::Clear => {
                state.clear_all();
                Ok(())
            }
            Self::Undo => {
                if state.undo().is_none() {
                    log::debug!("nothing to undo");
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| "empty command".to_string())?;
        let args = words
            .map(|word| {
                word.parse::<usize>()
                    .map_err(|e| format!("'{word}' is not a non-negative integer: {e}"))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        match (name, args.as_slice()) {
            ("select", &[id]) => Ok(Self::Select(id)),
            ("paint", &[index]) => Ok(Self::Paint(index)),
            ("paint", &[row, col]) => Ok(Self::PaintAt(row, col)),
            ("erase", &[index]) => Ok(Self::Erase(index)),
            ("resize", &[size]) => Ok(Self::Resize(size)),
            ("clear", &[]) => Ok(Self::Clear),
            ("undo", &[]) => Ok(Self::Undo),
            ("select" | "paint" | "erase" | "resize" | "clear" | "undo", _) => Err(format!(
                "wrong number of arguments for '{name}' ({} given)",
                args.len()
            )),
            _ => Err(format!("unknown command '{name}'")),
        }
    }
}

/// Parse a whole script, skipping blank lines and `#` comments
///
/// # Errors
///
/// Returns `InvalidCommand` naming the first line that does not parse
pub fn parse_script(text: &str) -> Result<Vec<Command>> {
    text.lines()
        .enumerate()
        .filter_map(|(number, line)| {
            let content = line.split_once('#').map_or(line, |(before, _)| before).trim();
            (!content.is_empty()).then_some((number + 1, content))
        })
        .map(|(line, content)| {
            content
                .parse::<Command>()
                .map_err(|reason| EditorError::InvalidCommand { line, reason })
        })
        .collect()
}

/// Apply commands in order, stopping at the first failure
///
/// Returns the number of commands applied.
///
/// # Errors
///
/// Propagates the first command error; earlier commands stay applied
pub fn run_script(state: &mut EditorState, commands: &[Command]) -> Result<usize> {
    for command in commands {
        command.apply(state)?;
    }
    Ok(commands.len())
}
