//! Tilesets, tiles, terrains and tile animations.

use tmx_common::terrain::{BOTTOM_LEFT, BOTTOM_RIGHT, NO_TERRAIN, TOP_LEFT, TOP_RIGHT};
use tmx_common::TerrainCorners;

use crate::{Image, ObjectGroup, Properties};

/// Handle to a tile: the position of its tileset in the map and the
/// position of the tile in that tileset.
///
/// The tileset index doubles as the tile's back-reference to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileRef {
    pub tileset: usize,
    pub tile: usize,
}

impl TileRef {
    #[inline]
    pub const fn new(tileset: usize, tile: usize) -> Self {
        Self { tileset, tile }
    }
}

/// One frame of a tile animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Tile shown during this frame; may be in any tileset of the map.
    pub tile: TileRef,
    /// Frame duration in milliseconds.
    pub duration: u32,
}

impl Frame {
    pub fn new(tile: TileRef, duration: u32) -> Self {
        Self { tile, duration }
    }
}

/// Ordered animation frames, owned by a tile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    pub frames: Vec<Frame>,
}

impl Animation {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Total duration of one loop in milliseconds.
    pub fn total_duration(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.duration)).sum()
    }
}

/// A single tile.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    /// Local id within the owning tileset. Rewritten by [`crate::Map::finalize_ids`].
    pub id: u32,
    pub tile_type: String,
    pub probability: f64,
    pub image: Option<Image>,
    /// Terrain corners as positions in the owning tileset's terrain list.
    pub terrain: TerrainCorners,
    pub animation: Option<Animation>,
    pub properties: Properties,
    /// Collision shapes attached to this tile.
    pub collision: Option<ObjectGroup>,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            id: 0,
            tile_type: String::new(),
            probability: 1.0,
            image: None,
            terrain: NO_TERRAIN,
            animation: None,
            properties: Properties::new(),
            collision: None,
        }
    }
}

impl Tile {
    /// Tile drawn from the given image file.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            image: Some(Image::new(source)),
            ..Self::default()
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.image.as_ref().map(|image| image.source.as_str())
    }

    pub fn width(&self) -> Option<u32> {
        self.image.as_ref().and_then(|image| image.width)
    }

    pub fn height(&self) -> Option<u32> {
        self.image.as_ref().and_then(|image| image.height)
    }

    pub fn top_left_terrain(&self) -> Option<usize> {
        self.corner(TOP_LEFT)
    }

    pub fn top_right_terrain(&self) -> Option<usize> {
        self.corner(TOP_RIGHT)
    }

    pub fn bottom_left_terrain(&self) -> Option<usize> {
        self.corner(BOTTOM_LEFT)
    }

    pub fn bottom_right_terrain(&self) -> Option<usize> {
        self.corner(BOTTOM_RIGHT)
    }

    pub fn set_top_left_terrain(&mut self, terrain: Option<usize>) {
        self.set_corner(TOP_LEFT, terrain);
    }

    pub fn set_top_right_terrain(&mut self, terrain: Option<usize>) {
        self.set_corner(TOP_RIGHT, terrain);
    }

    pub fn set_bottom_left_terrain(&mut self, terrain: Option<usize>) {
        self.set_corner(BOTTOM_LEFT, terrain);
    }

    pub fn set_bottom_right_terrain(&mut self, terrain: Option<usize>) {
        self.set_corner(BOTTOM_RIGHT, terrain);
    }

    /// Replace the animation with the given frames.
    pub fn set_animation(&mut self, frames: impl IntoIterator<Item = Frame>) {
        self.animation = Some(Animation::new(frames));
    }

    fn corner(&self, slot: usize) -> Option<usize> {
        self.terrain[slot].map(|index| index as usize)
    }

    fn set_corner(&mut self, slot: usize, terrain: Option<usize>) {
        self.terrain[slot] = terrain.map(|index| index as u32);
    }
}

/// A terrain type, used for auto-tiling.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terrain {
    pub name: String,
    /// Position in the owning tileset's terrain list.
    pub index: u32,
    /// Representative tile, as a position in the owning tileset.
    pub tile: Option<usize>,
    pub properties: Properties,
}

impl Terrain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named, ordered collection of tiles sharing one global id range.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tileset {
    pub name: String,
    /// Global id of the first tile. Rewritten by [`crate::Map::finalize_ids`].
    pub first_gid: u32,
    /// Path of an external tileset file, if the tileset was not embedded.
    pub source: Option<String>,
    pub tile_width: u32,
    pub tile_height: u32,
    pub spacing: u32,
    pub margin: u32,
    pub columns: Option<u32>,
    pub offset_x: i32,
    pub offset_y: i32,
    pub properties: Properties,
    terrains: Vec<Terrain>,
    tiles: Vec<Tile>,
}

impl Tileset {
    pub fn new(name: impl Into<String>, tile_width: u32, tile_height: u32) -> Self {
        Self {
            name: name.into(),
            first_gid: 1,
            source: None,
            tile_width,
            tile_height,
            spacing: 0,
            margin: 0,
            columns: None,
            offset_x: 0,
            offset_y: 0,
            properties: Properties::new(),
            terrains: Vec::new(),
            tiles: Vec::new(),
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Mutable access to the tiles. Tiles cannot be removed through the
    /// slice, which keeps every [`TileRef`] valid.
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn tile(&self, position: usize) -> Option<&Tile> {
        self.tiles.get(position)
    }

    pub fn tile_mut(&mut self, position: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(position)
    }

    /// Append a tile and return its position.
    pub fn add_tile(&mut self, tile: Tile) -> usize {
        self.tiles.push(tile);
        self.tiles.len() - 1
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Position of the tile whose local id is `id`.
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.id == id)
    }

    pub fn terrains(&self) -> &[Terrain] {
        &self.terrains
    }

    pub fn terrains_mut(&mut self) -> &mut [Terrain] {
        &mut self.terrains
    }

    pub fn terrain(&self, position: usize) -> Option<&Terrain> {
        self.terrains.get(position)
    }

    /// Append a terrain, set its index to its position and return it.
    pub fn add_terrain(&mut self, mut terrain: Terrain) -> usize {
        let position = self.terrains.len();
        terrain.index = position as u32;
        self.terrains.push(terrain);
        position
    }

    /// Terrain on one corner of a tile in this tileset.
    pub fn corner_terrain(&self, tile: usize, corner: usize) -> Option<&Terrain> {
        let index = self.tiles.get(tile)?.terrain.get(corner).copied().flatten()?;
        self.terrains.get(index as usize)
    }

    /// Recompute tile ids and terrain indices from their positions.
    pub(crate) fn renumber(&mut self) {
        for (position, terrain) in self.terrains.iter_mut().enumerate() {
            terrain.index = position as u32;
        }
        for (position, tile) in self.tiles.iter_mut().enumerate() {
            tile.id = position as u32;
        }
    }
}
