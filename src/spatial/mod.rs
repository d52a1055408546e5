//! Spatial data structures for tiles and maps
//!
//! This module contains spatial-related functionality including:
//! - Tile extraction from sprite sheets
//! - The tile palette and its selection
//! - The square map grid

/// Square map grid of tile references
pub mod grid;
/// Ordered tile collection with selection
pub mod palette;
/// Tile data structures and extraction
pub mod tiles;

pub use grid::GridModel;
pub use palette::Palette;
pub use tiles::{Tile, TileExtractor, TileId};
