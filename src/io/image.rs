//! Sprite-sheet decoding and PNG rendering of tiles and maps

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array3;

use crate::io::configuration::MAX_PREVIEW_SIDE;
use crate::io::error::{EditorError, Result, WithPath, file_system_error, invalid_parameter};
use crate::spatial::grid::GridModel;
use crate::spatial::palette::Palette;
use crate::spatial::tiles::Tile;

/// Number of channels in every decoded pixel
const CHANNELS: usize = 4;

/// Decoded RGBA bitmap used as extraction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pixels: Array3<u8>,
}

impl SourceImage {
    /// Decode an in-memory PNG (or any format the `image` crate detects)
    ///
    /// # Errors
    ///
    /// Returns `Decode` if the bytes are not a readable image
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)?;
        Self::from_rgba(decoded.to_rgba8())
    }

    /// Load and decode an image file
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be read and `Decode` if it is
    /// not a readable image
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| file_system_error(path, "read image", e))?;
        Self::decode(&bytes).with_path(path)
    }

    /// Wrap an RGBA image buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the buffer length does not match its
    /// dimensions
    pub fn from_rgba(image: RgbaImage) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let pixels = Array3::from_shape_vec((height, width, CHANNELS), image.into_raw())
            .map_err(|e| EditorError::InvalidSourceData {
                reason: format!("RGBA buffer does not match {width}x{height}: {e}"),
            })?;
        Ok(Self { pixels })
    }

    /// Wrap a `(height, width, 4)` pixel array
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the last axis is not four channels wide
    pub fn from_pixels(pixels: Array3<u8>) -> Result<Self> {
        let channels = pixels.dim().2;
        if channels != CHANNELS {
            return Err(EditorError::InvalidSourceData {
                reason: format!("expected {CHANNELS} channels per pixel, found {channels}"),
            });
        }
        Ok(Self { pixels })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// RGBA value at `(x, y)`, or `None` outside the image
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        let channel = |c: usize| self.pixels.get((y, x, c)).copied();
        Some([channel(0)?, channel(1)?, channel(2)?, channel(3)?])
    }

    /// Raw pixel array with shape `(height, width, 4)`
    pub const fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }
}

/// Convert a tile's pixel buffer into an image the presentation layer can draw
///
/// # Errors
///
/// Returns `InvalidSourceData` if the tile buffer is not square RGBA
pub fn tile_to_image(tile: &Tile) -> Result<RgbaImage> {
    let (height, width, channels) = tile.pixels().dim();
    let raw: Vec<u8> = tile.pixels().iter().copied().collect();
    (channels == CHANNELS)
        .then(|| ImageBuffer::from_raw(width as u32, height as u32, raw))
        .flatten()
        .ok_or_else(|| EditorError::InvalidSourceData {
            reason: format!("tile {} is not a {width}x{height} RGBA buffer", tile.id()),
        })
}

/// Draw the map using the palette's tiles
///
/// Each cell becomes a `tile_size` square. Empty cells and cells referencing
/// tiles missing from the palette stay transparent.
///
/// # Errors
///
/// Returns `InvalidParameter` if the rendered side would exceed
/// `MAX_PREVIEW_SIDE` pixels, or propagates tile conversion errors
pub fn render_grid(grid: &GridModel, palette: &Palette, tile_size: usize) -> Result<RgbaImage> {
    let side = grid
        .size()
        .checked_mul(tile_size)
        .filter(|&side| side <= MAX_PREVIEW_SIDE)
        .and_then(|side| u32::try_from(side).ok())
        .ok_or_else(|| {
            invalid_parameter(
                "preview_side",
                &format!("{}x{tile_size}px", grid.size()),
                &format!("rendered map must be at most {MAX_PREVIEW_SIDE} pixels wide"),
            )
        })?;

    let mut canvas: RgbaImage = ImageBuffer::from_pixel(side, side, Rgba([0, 0, 0, 0]));
    let mut stale = 0usize;

    for (index, cell) in grid.cells().iter().enumerate() {
        let (Some(id), Some((row, col))) = (*cell, grid.position_of(index)) else {
            continue;
        };
        let Ok(tile) = palette.get(id) else {
            stale += 1;
            continue;
        };
        let tile_image = tile_to_image(tile)?;
        image::imageops::replace(
            &mut canvas,
            &tile_image,
            (col * tile_size) as i64,
            (row * tile_size) as i64,
        );
    }

    if stale > 0 {
        log::warn!("{stale} cells reference tiles missing from the palette");
    }
    Ok(canvas)
}

/// Write every palette tile to `dir` as `tile_<id>.png`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a tile cannot be saved
pub fn export_tiles(palette: &Palette, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(palette.len());
    for tile in palette.tiles() {
        let path = dir.join(format!("tile_{}.png", tile.id()));
        save_png(&tile_to_image(tile)?, &path)?;
        written.push(path);
    }
    log::debug!("wrote {} tiles to '{}'", written.len(), dir.display());
    Ok(written)
}

/// Save an image, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    image.save(path).map_err(|e| EditorError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
