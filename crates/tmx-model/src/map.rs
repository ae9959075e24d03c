//! The map aggregate.

use tmx_common::Colour;

use crate::{
    Group, ImageLayer, ObjectGroup, Orientation, Properties, RenderOrder, Tile, TileLayer,
    TileRef, Tileset,
};

/// A tile map: the root of the model.
///
/// Grid and tile sizes are fixed at construction and never below 1.
/// Tilesets are append-only so that every [`TileRef`] handed out stays valid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Map {
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    pub orientation: Orientation,
    pub render_order: RenderOrder,
    pub hex_side_length: Option<u32>,
    pub background: Option<Colour>,
    pub version: String,
    pub tiled_version: Option<String>,
    pub next_object_id: u32,
    pub properties: Properties,
    tilesets: Vec<Tileset>,
    pub tile_layers: Vec<TileLayer>,
    pub image_layers: Vec<ImageLayer>,
    pub object_groups: Vec<ObjectGroup>,
    pub groups: Vec<Group>,
}

impl Default for Map {
    fn default() -> Self {
        Self::new(20, 20, 32, 32)
    }
}

impl Map {
    pub const DEFAULT_VERSION: &'static str = "1.0";

    /// New orthogonal map. Sizes below 1 are clamped to 1.
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            tile_width: tile_width.max(1),
            tile_height: tile_height.max(1),
            orientation: Orientation::Orthogonal,
            render_order: RenderOrder::RightDown,
            hex_side_length: None,
            background: None,
            version: Self::DEFAULT_VERSION.to_string(),
            tiled_version: None,
            next_object_id: 1,
            properties: Properties::new(),
            tilesets: Vec::new(),
            tile_layers: Vec::new(),
            image_layers: Vec::new(),
            object_groups: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_render_order(mut self, render_order: RenderOrder) -> Self {
        self.render_order = render_order;
        self
    }

    pub fn with_background(mut self, background: Colour) -> Self {
        self.background = Some(background);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn tilesets(&self) -> &[Tileset] {
        &self.tilesets
    }

    pub fn tilesets_mut(&mut self) -> &mut [Tileset] {
        &mut self.tilesets
    }

    pub fn tileset(&self, index: usize) -> Option<&Tileset> {
        self.tilesets.get(index)
    }

    pub fn tileset_mut(&mut self, index: usize) -> Option<&mut Tileset> {
        self.tilesets.get_mut(index)
    }

    /// Append a tileset and return its index.
    pub fn add_tileset(&mut self, tileset: Tileset) -> usize {
        self.tilesets.push(tileset);
        self.tilesets.len() - 1
    }

    /// Append an empty tileset using the map's tile size.
    pub fn new_tileset(&mut self, name: impl Into<String>) -> &mut Tileset {
        let tileset = Tileset::new(name, self.tile_width, self.tile_height);
        let index = self.add_tileset(tileset);
        &mut self.tilesets[index]
    }

    pub fn tile(&self, tile: TileRef) -> Option<&Tile> {
        self.tilesets.get(tile.tileset)?.tile(tile.tile)
    }

    pub fn tile_mut(&mut self, tile: TileRef) -> Option<&mut Tile> {
        self.tilesets.get_mut(tile.tileset)?.tile_mut(tile.tile)
    }

    /// Global id of a tile: its local id plus its tileset's first global id.
    pub fn global_id(&self, tile: TileRef) -> Option<u32> {
        let tileset = self.tilesets.get(tile.tileset)?;
        let local = tileset.tile(tile.tile)?.id;
        Some(tileset.first_gid + local)
    }

    /// Find the tile with the given global id. Id 0 never matches.
    pub fn tile_by_global_id(&self, gid: u32) -> Option<TileRef> {
        if gid == 0 {
            return None;
        }
        self.tilesets
            .iter()
            .enumerate()
            .filter(|(_, ts)| ts.first_gid <= gid)
            .find_map(|(index, ts)| {
                ts.position_of(gid - ts.first_gid)
                    .map(|position| TileRef::new(index, position))
            })
    }

    /// Append an empty tile layer sized to the map.
    pub fn new_tile_layer(&mut self, name: impl Into<String>) -> &mut TileLayer {
        let layer = TileLayer::new(name, self.width, self.height);
        self.tile_layers.push(layer);
        let last = self.tile_layers.len() - 1;
        &mut self.tile_layers[last]
    }

    pub fn new_image_layer(&mut self, name: impl Into<String>) -> &mut ImageLayer {
        self.image_layers.push(ImageLayer::new(name));
        let last = self.image_layers.len() - 1;
        &mut self.image_layers[last]
    }

    pub fn new_object_group(&mut self, name: impl Into<String>) -> &mut ObjectGroup {
        self.object_groups.push(ObjectGroup::new(name));
        let last = self.object_groups.len() - 1;
        &mut self.object_groups[last]
    }

    /// Highest id of any object in the map's object groups, including those
    /// nested in groups.
    pub fn max_object_id(&self) -> Option<u32> {
        let mut max = self
            .object_groups
            .iter()
            .filter_map(ObjectGroup::max_object_id)
            .max();
        for group in &self.groups {
            group.walk(&mut |g| {
                let nested = g.object_groups.iter().filter_map(ObjectGroup::max_object_id).max();
                max = max.max(nested);
            });
        }
        max
    }

    /// Recompute ids from the current in-memory order.
    ///
    /// Each tileset's `first_gid` becomes one plus the number of tiles in all
    /// preceding tilesets, tile ids and terrain indices become their
    /// positions, and `next_object_id` is raised past the highest object id.
    /// Running it twice without structural changes yields the same ids.
    pub fn finalize_ids(&mut self) {
        let mut next_gid = 1u32;
        for tileset in &mut self.tilesets {
            tileset.first_gid = next_gid;
            tileset.renumber();
            next_gid += tileset.tile_count() as u32;
        }

        if let Some(max) = self.max_object_id() {
            self.next_object_id = self.next_object_id.max(max + 1);
        }
        self.next_object_id = self.next_object_id.max(1);
    }
}
