//! Plain-text map export and import
//!
//! The format is one token per cell in row-major order, separated by single
//! spaces, with empty cells written as empty tokens and no trailing newline.

use std::io::Write;
use std::path::Path;

use crate::io::error::{Result, file_system_error};
use crate::spatial::grid::GridModel;

/// Serialize the grid to the bytes of its text form
pub fn export(grid: &GridModel) -> Vec<u8> {
    grid.to_text().into_bytes()
}

/// Stream the exported bytes into `writer`
///
/// # Errors
///
/// Returns `FileSystem` if writing or flushing fails
pub fn export_to<W: Write>(grid: &GridModel, writer: &mut W) -> Result<()> {
    writer.write_all(&export(grid))?;
    writer.flush()?;
    Ok(())
}

/// Write the exported map to `path`, creating parent directories as needed
///
/// # Errors
///
/// Returns `FileSystem` if the directory or file cannot be written
pub fn write_map(grid: &GridModel, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }
    std::fs::write(path, export(grid)).map_err(|e| file_system_error(path, "write map", e))?;
    log::debug!(
        "exported {} of {} cells to '{}'",
        grid.filled_count(),
        grid.len(),
        path.display()
    );
    Ok(())
}

/// Load a previously exported map
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read, or the parse errors of
/// [`GridModel::from_text`]
pub fn read_map(path: &Path) -> Result<GridModel> {
    let text =
        std::fs::read_to_string(path).map_err(|e| file_system_error(path, "read map", e))?;
    GridModel::from_text(&text)
}
