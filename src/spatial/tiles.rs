//! Tile extraction from sprite sheets
//!
//! Slices a source image into non-overlapping square cells, scanned row by
//! row. Cells whose colour channels are all near black are dropped, and the
//! survivors receive dense identifiers in scan order.

use ndarray::{Array3, ArrayView3, Axis, Slice};

use crate::io::configuration::{EMPTY_TOLERANCE, TILE_SIZE};
use crate::io::image::SourceImage;

/// Dense tile identifier, assigned in scan order starting at zero
pub type TileId = usize;

/// A square block of pixels cut from a sprite sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    origin: [usize; 2],
    pixels: Array3<u8>,
}

impl Tile {
    /// Create a tile from its identifier, source cell and RGBA pixels
    pub const fn new(id: TileId, origin: [usize; 2], pixels: Array3<u8>) -> Self {
        Self { id, origin, pixels }
    }

    /// Identifier used by grid cells to reference this tile
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Cell of the source sheet this tile came from, as `[row, col]`
    pub const fn origin(&self) -> [usize; 2] {
        self.origin
    }

    /// Pixel buffer with shape `(size, size, 4)`
    pub const fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    /// Side length in pixels
    pub fn size(&self) -> usize {
        self.pixels.dim().0
    }

    /// The same tile under a different identifier
    pub fn with_id(self, id: TileId) -> Self {
        Self { id, ..self }
    }
}

/// Parameters controlling how a sheet is sliced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Side length of each cell in pixels
    pub tile_size: usize,
    /// Highest RGB channel value still treated as blank
    pub empty_tolerance: u8,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            empty_tolerance: EMPTY_TOLERANCE,
        }
    }
}

/// Slices sprite sheets into tiles according to an [`ExtractionConfig`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TileExtractor {
    config: ExtractionConfig,
}

impl TileExtractor {
    /// Create an extractor with the given configuration
    pub const fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Configuration used by this extractor
    pub const fn config(&self) -> ExtractionConfig {
        self.config
    }

    /// Extract every non-empty tile from the image
    pub fn extract(&self, image: &SourceImage) -> Vec<Tile> {
        self.extract_with(image, |_| {})
    }

    /// Extract tiles, reporting the number of cells scanned after each cell
    ///
    /// Cells beyond the last whole row or column are ignored. A zero tile
    /// size or an image smaller than one tile produces no tiles.
    pub fn extract_with(
        &self,
        image: &SourceImage,
        mut on_cell: impl FnMut(usize),
    ) -> Vec<Tile> {
        let ExtractionConfig {
            tile_size,
            empty_tolerance,
        } = self.config;
        let (rows, cols) = grid_dimensions(image.width(), image.height(), tile_size);
        let pixels = image.pixels();

        let mut tiles = Vec::new();
        let mut dropped = 0usize;
        for row in 0..rows {
            for col in 0..cols {
                let top = row * tile_size;
                let left = col * tile_size;
                let mut cell = pixels.view();
                cell.slice_axis_inplace(Axis(0), Slice::from(top..top + tile_size));
                cell.slice_axis_inplace(Axis(1), Slice::from(left..left + tile_size));

                if is_empty_cell(cell, empty_tolerance) {
                    log::trace!("dropping blank cell at row {row}, col {col}");
                    dropped += 1;
                } else {
                    // Identifiers stay dense because skipped cells never reach this point
                    tiles.push(Tile::new(tiles.len(), [row, col], cell.to_owned()));
                }

                on_cell(row * cols + col + 1);
            }
        }

        log::debug!(
            "extracted {} tiles from {rows}x{cols} cells ({dropped} blank)",
            tiles.len()
        );
        tiles
    }
}

/// Extract tiles with an explicit tile size and blank tolerance
pub fn extract(image: &SourceImage, tile_size: usize, empty_tolerance: u8) -> Vec<Tile> {
    TileExtractor::new(ExtractionConfig {
        tile_size,
        empty_tolerance,
    })
    .extract(image)
}

/// Number of whole `(rows, cols)` cells that fit in an image
pub const fn grid_dimensions(width: usize, height: usize, tile_size: usize) -> (usize, usize) {
    match (height.checked_div(tile_size), width.checked_div(tile_size)) {
        (Some(rows), Some(cols)) => (rows, cols),
        _ => (0, 0),
    }
}

/// Check whether every pixel's red, green and blue channels are within tolerance
///
/// Alpha is ignored, so a fully transparent white pixel still counts as content.
/// Views with fewer than three channels are checked on the channels they have.
pub fn is_empty_cell(cell: ArrayView3<'_, u8>, tolerance: u8) -> bool {
    cell.lanes(Axis(2))
        .into_iter()
        .all(|pixel| pixel.iter().take(3).all(|&channel| channel <= tolerance))
}
