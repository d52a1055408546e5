//! Single-step undo for tile placements

use crate::spatial::grid::GridModel;
use crate::spatial::tiles::TileId;

/// Strategy used to find the cell an undo should clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UndoMode {
    /// Clear the last cell (row-major) holding the remembered tile
    ///
    /// When the same tile was painted in several places this may clear a
    /// different cell than the one painted most recently.
    #[default]
    LastOccurrence,
    /// Clear the remembered cell, provided it still holds the remembered tile
    ExactCell,
}

/// A successful paint remembered for undo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Row-major cell index that was painted
    pub index: usize,
    /// Tile that was painted
    pub tile: TileId,
}

/// Remembers the most recent placement
#[derive(Debug, Clone, Default)]
pub struct PlacementHistory {
    last: Option<Placement>,
    mode: UndoMode,
}

impl PlacementHistory {
    /// Create an empty history using `mode` for undo
    pub const fn new(mode: UndoMode) -> Self {
        Self { last: None, mode }
    }

    /// Undo strategy in use
    pub const fn mode(&self) -> UndoMode {
        self.mode
    }

    /// Remembered placement, if any
    pub const fn last(&self) -> Option<Placement> {
        self.last
    }

    /// Remember a placement, replacing any earlier one
    pub const fn record(&mut self, index: usize, tile: TileId) {
        self.last = Some(Placement { index, tile });
    }

    /// Forget the remembered placement
    pub const fn clear(&mut self) {
        self.last = None;
    }

    /// Clear the cell matching the remembered placement
    ///
    /// Returns the cleared index and forgets the placement. When nothing is
    /// remembered, or no cell matches any more, nothing changes and `None` is
    /// returned.
    pub fn undo(&mut self, grid: &mut GridModel) -> Option<usize> {
        let placement = self.last?;
        let index = match self.mode {
            UndoMode::LastOccurrence => grid.last_index_of(placement.tile)?,
            UndoMode::ExactCell => {
                let current = grid.cell(placement.index).ok()?;
                (current == Some(placement.tile)).then_some(placement.index)?
            }
        };

        grid.clear_cell(index).ok()?;
        self.last = None;
        log::debug!("undid tile {} at cell {index}", placement.tile);
        Some(index)
    }
}
