//! Square tile map stored as a flat row-major cell vector
//!
//! Cells hold `Option<TileId>`, so an empty cell can never be mistaken for
//! tile zero. Cells are not validated against any palette: a map keeps its
//! references even after a different sheet is loaded.

use crate::io::configuration::{EXPORT_SEPARATOR, MAX_MAP_SIZE};
use crate::io::error::{EditorError, Result};
use crate::spatial::tiles::TileId;

/// Square grid of optional tile references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    size: usize,
    cells: Vec<Option<TileId>>,
}

impl GridModel {
    /// Create an empty `size` x `size` grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if `size` is zero or larger than `MAX_MAP_SIZE`
    pub fn new(size: usize) -> Result<Self> {
        let cell_count = checked_cell_count(size)?;
        Ok(Self {
            size,
            cells: vec![None; cell_count],
        })
    }

    /// Side length of the grid
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (`size * size`)
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, a grid has at least one cell
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Option<TileId>] {
        &self.cells
    }

    /// Read one cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `index` is outside the grid
    pub fn cell(&self, index: usize) -> Result<Option<TileId>> {
        self.cells
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_bounds(index))
    }

    /// Put a tile reference into a cell, replacing whatever was there
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `index` is outside the grid
    pub fn place(&mut self, index: usize, tile: TileId) -> Result<()> {
        *self.cell_mut(index)? = Some(tile);
        Ok(())
    }

    /// Empty a cell; already-empty cells are left as they are
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `index` is outside the grid
    pub fn clear_cell(&mut self, index: usize) -> Result<()> {
        *self.cell_mut(index)? = None;
        Ok(())
    }

    /// Change the side length of the grid
    ///
    /// The flat store is truncated to its first `new_size * new_size` entries
    /// when shrinking and padded with empty cells when growing. Cells are not
    /// remapped by row and column, so a shrunk map keeps the leading cells of
    /// the old row-major order rather than its top-left corner.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if `new_size` is zero or larger than
    /// `MAX_MAP_SIZE`; the grid is left unchanged
    pub fn resize(&mut self, new_size: usize) -> Result<()> {
        let cell_count = checked_cell_count(new_size)?;
        log::debug!(
            "resizing map from {0}x{0} to {new_size}x{new_size}",
            self.size
        );
        self.cells.resize(cell_count, None);
        self.size = new_size;
        Ok(())
    }

    /// Empty every cell without changing the size
    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    /// Convert a `(row, col)` coordinate into a row-major cell index
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if either coordinate is outside the grid
    pub fn index_of(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.size && col < self.size {
            Ok(row * self.size + col)
        } else {
            Err(self.out_of_bounds(row.saturating_mul(self.size).saturating_add(col)))
        }
    }

    /// Convert a row-major cell index into `(row, col)`
    pub const fn position_of(&self, index: usize) -> Option<(usize, usize)> {
        if index < self.cells.len() {
            Some((index / self.size, index % self.size))
        } else {
            None
        }
    }

    /// Index of the last cell holding `tile`, scanning in row-major order
    pub fn last_index_of(&self, tile: TileId) -> Option<usize> {
        self.cells.iter().rposition(|&cell| cell == Some(tile))
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Render every cell as a token joined by single spaces
    ///
    /// Empty cells become empty tokens, so `[1, _, 2, _]` renders as
    /// `"1  2 "`. No trailing newline is added.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.cells.len() * 2);
        for (index, cell) in self.cells.iter().enumerate() {
            if index > 0 {
                text.push(EXPORT_SEPARATOR);
            }
            if let Some(tile) = cell {
                text.push_str(&tile.to_string());
            }
        }
        text
    }

    /// Parse text produced by [`GridModel::to_text`] back into a grid
    ///
    /// The token count must be a perfect square; the square root becomes the
    /// grid size. A single trailing newline is tolerated.
    ///
    /// # Errors
    ///
    /// Returns `MalformedMap` if a token is not empty or a tile identifier,
    /// or if the token count is not a perfect square, and `InvalidSize` if
    /// the implied size exceeds `MAX_MAP_SIZE`
    pub fn from_text(text: &str) -> Result<Self> {
        let body = text
            .strip_suffix("\r\n")
            .or_else(|| text.strip_suffix('\n'))
            .unwrap_or(text);

        let cells = body
            .split(EXPORT_SEPARATOR)
            .enumerate()
            .map(|(token, value)| {
                if value.is_empty() {
                    Ok(None)
                } else {
                    value
                        .parse::<TileId>()
                        .map(Some)
                        .map_err(|e| EditorError::MalformedMap {
                            token,
                            reason: format!("'{value}' is not a tile identifier: {e}"),
                        })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let size = cells.len().isqrt();
        if size * size != cells.len() {
            return Err(EditorError::MalformedMap {
                token: cells.len(),
                reason: format!("{} cells do not form a square map", cells.len()),
            });
        }
        checked_cell_count(size)?;

        Ok(Self { size, cells })
    }

    fn cell_mut(&mut self, index: usize) -> Result<&mut Option<TileId>> {
        let cells = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or(EditorError::OutOfBounds { index, cells })
    }

    const fn out_of_bounds(&self, index: usize) -> EditorError {
        EditorError::OutOfBounds {
            index,
            cells: self.cells.len(),
        }
    }
}

impl Default for GridModel {
    fn default() -> Self {
        let size = crate::io::configuration::DEFAULT_MAP_SIZE;
        Self {
            size,
            cells: vec![None; size * size],
        }
    }
}

// Validates a side length and returns the matching cell count
const fn checked_cell_count(size: usize) -> Result<usize> {
    if size == 0 || size > MAX_MAP_SIZE {
        return Err(EditorError::InvalidSize {
            size,
            max: MAX_MAP_SIZE,
        });
    }
    Ok(size * size)
}
