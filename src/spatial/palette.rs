//! Ordered tile collection with a single active selection

use crate::io::error::{EditorError, Result};
use crate::spatial::tiles::{Tile, TileId};

/// Tiles available for painting plus the currently selected one
#[derive(Debug, Clone, Default)]
pub struct Palette {
    tiles: Vec<Tile>,
    selected: Option<TileId>,
}

impl Palette {
    /// Create an empty palette with nothing selected
    pub const fn new() -> Self {
        Self {
            tiles: Vec::new(),
            selected: None,
        }
    }

    /// Replace every tile and clear the selection
    ///
    /// Tiles are renumbered `0..tiles.len()` in the order given, so lookups
    /// by identifier always agree with [`Tile::id`].
    pub fn load(&mut self, tiles: Vec<Tile>) {
        let mut renumbered = 0usize;
        self.tiles = tiles
            .into_iter()
            .enumerate()
            .map(|(id, tile)| {
                if tile.id() == id {
                    tile
                } else {
                    renumbered += 1;
                    tile.with_id(id)
                }
            })
            .collect();
        if renumbered > 0 {
            log::debug!("renumbered {renumbered} palette tiles");
        }
        self.selected = None;
    }

    /// Make `id` the only selected tile
    ///
    /// # Errors
    ///
    /// Returns `InvalidTile` if `id` is not in the palette; the previous
    /// selection is kept
    pub fn select(&mut self, id: TileId) -> Result<()> {
        self.get(id)?;
        self.selected = Some(id);
        Ok(())
    }

    /// Currently selected tile identifier, if any
    pub const fn selected(&self) -> Option<TileId> {
        self.selected
    }

    /// Look up a tile by identifier
    ///
    /// # Errors
    ///
    /// Returns `InvalidTile` if `id` is not in the palette
    pub fn get(&self, id: TileId) -> Result<&Tile> {
        self.tiles.get(id).ok_or(EditorError::InvalidTile {
            id,
            palette_len: self.tiles.len(),
        })
    }

    /// Check whether `id` refers to a tile in this palette
    pub fn contains(&self, id: TileId) -> bool {
        id < self.tiles.len()
    }

    /// All tiles in identifier order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check whether the palette holds no tiles
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
