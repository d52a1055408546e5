//! Editor state owning the palette, map and undo history
//!
//! Each handler takes `&mut self` and either completes or returns an error
//! without touching state, so a failed action never leaves a partial edit.

use crate::editor::history::{PlacementHistory, UndoMode};
use crate::io::configuration::DEFAULT_MAP_SIZE;
use crate::io::error::Result;
use crate::io::export;
use crate::io::image::SourceImage;
use crate::spatial::grid::GridModel;
use crate::spatial::palette::Palette;
use crate::spatial::tiles::{ExtractionConfig, TileExtractor, TileId};

/// Settings fixed when the editor is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Side length of the initial map
    pub map_size: usize,
    /// Tile slicing parameters
    pub extraction: ExtractionConfig,
    /// Strategy used by undo
    pub undo_mode: UndoMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            map_size: DEFAULT_MAP_SIZE,
            extraction: ExtractionConfig::default(),
            undo_mode: UndoMode::default(),
        }
    }
}

/// Everything a tile editing session needs
#[derive(Debug, Clone)]
pub struct EditorState {
    extractor: TileExtractor,
    palette: Palette,
    grid: GridModel,
    history: PlacementHistory,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            extractor: TileExtractor::default(),
            palette: Palette::new(),
            grid: GridModel::default(),
            history: PlacementHistory::default(),
        }
    }
}

impl EditorState {
    /// Create an editor with an empty palette and an empty map
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if the configured map size is not accepted
    pub fn new(config: EditorConfig) -> Result<Self> {
        Ok(Self {
            extractor: TileExtractor::new(config.extraction),
            palette: Palette::new(),
            grid: GridModel::new(config.map_size)?,
            history: PlacementHistory::new(config.undo_mode),
        })
    }

    /// Slice a sheet and replace the palette with its tiles
    ///
    /// Returns the number of tiles extracted.
    pub fn load_image(&mut self, image: &SourceImage) -> usize {
        self.load_image_with(image, |_| {})
    }

    /// Like [`EditorState::load_image`], reporting scanned cells to `on_cell`
    pub fn load_image_with(&mut self, image: &SourceImage, on_cell: impl FnMut(usize)) -> usize {
        let tiles = self.extractor.extract_with(image, on_cell);
        let count = tiles.len();
        self.palette.load(tiles);
        log::info!(
            "loaded {count} tiles from {}x{} sheet",
            image.width(),
            image.height()
        );
        count
    }

    /// Decode image bytes and load them as the new palette
    ///
    /// # Errors
    ///
    /// Returns `Decode` if the bytes are not a readable image; the current
    /// palette is kept
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        let image = SourceImage::decode(bytes)?;
        Ok(self.load_image(&image))
    }

    /// Select the tile used by subsequent paints
    ///
    /// # Errors
    ///
    /// Returns `InvalidTile` if `id` is not in the palette
    pub fn select_tile(&mut self, id: TileId) -> Result<()> {
        self.palette.select(id)
    }

    /// Paint the selected tile into a cell and remember it for undo
    ///
    /// Returns the painted tile, or `None` without changes when no tile is
    /// selected.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `index` is outside the map
    pub fn paint_cell(&mut self, index: usize) -> Result<Option<TileId>> {
        let Some(tile) = self.palette.selected() else {
            log::debug!("ignoring paint at cell {index}: no tile selected");
            return Ok(None);
        };
        self.grid.place(index, tile)?;
        self.history.record(index, tile);
        Ok(Some(tile))
    }

    /// Paint the selected tile at a `(row, col)` coordinate
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate is outside the map
    pub fn paint_at(&mut self, row: usize, col: usize) -> Result<Option<TileId>> {
        let index = self.grid.index_of(row, col)?;
        self.paint_cell(index)
    }

    /// Empty a single cell
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `index` is outside the map
    pub fn erase_cell(&mut self, index: usize) -> Result<()> {
        self.grid.clear_cell(index)
    }

    /// Change the map side length, truncating or padding the flat cell store
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if `size` is not accepted; the map is unchanged
    pub fn resize(&mut self, size: usize) -> Result<()> {
        self.grid.resize(size)
    }

    /// Empty every cell of the map
    pub fn clear_all(&mut self) {
        self.grid.clear_all();
    }

    /// Undo the most recent paint, returning the cleared cell
    pub fn undo(&mut self) -> Option<usize> {
        self.history.undo(&mut self.grid)
    }

    /// Exported text form of the map
    pub fn export(&self) -> Vec<u8> {
        export::export(&self.grid)
    }

    /// Replace the map with one parsed from exported text
    ///
    /// # Errors
    ///
    /// Returns the parse errors of [`GridModel::from_text`]; the current map
    /// is kept
    pub fn import_map(&mut self, text: &str) -> Result<()> {
        self.grid = GridModel::from_text(text)?;
        Ok(())
    }

    /// Replace the map wholesale
    pub fn set_grid(&mut self, grid: GridModel) {
        self.grid = grid;
    }

    /// Current palette
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Current map
    pub const fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Undo history
    pub const fn history(&self) -> &PlacementHistory {
        &self.history
    }

    /// Extraction settings
    pub const fn extraction(&self) -> ExtractionConfig {
        self.extractor.config()
    }
}
