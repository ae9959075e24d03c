//! In-memory model of a TMX tile map.
//!
//! A [`Map`] owns its [`Tileset`]s and layers. Tilesets own their [`Tile`]s
//! and [`Terrain`]s. Everything that points across the graph (layer cells,
//! animation frames, terrain corners, object tiles) holds a plain index
//! handle such as [`TileRef`] instead of a live reference, so the model has
//! no ownership cycles and can be cloned, compared and sent between threads.
//!
//! Handles stay valid because tiles, terrains and tilesets are only ever
//! appended, never removed or reordered through the public API.
//!
//! # Example
//!
//! ```
//! use tmx_model::{Map, Tile, Tileset};
//!
//! let mut map = Map::new(2, 2, 16, 16);
//! let mut tileset = Tileset::new("terrain", 16, 16);
//! let grass = tileset.add_tile(Tile::new("grass.png"));
//! let ts = map.add_tileset(tileset);
//!
//! let grass = tmx_model::TileRef::new(ts, grass);
//! map.new_tile_layer("ground").put(0, 0, Some(grass));
//!
//! map.finalize_ids();
//! assert_eq!(map.global_id(grass), Some(1));
//! ```

mod layer;
mod map;
mod object;
mod property;
mod tileset;
mod types;

pub use layer::{Group, Image, ImageLayer, TileLayer};
pub use map::Map;
pub use object::{Object, ObjectGroup, Shape, Text};
pub use property::{Properties, Property, PropertyValue};
pub use tileset::{Animation, Frame, Terrain, Tile, TileRef, Tileset};
pub use types::{
    DrawOrder, HAlign, Orientation, PropertyType, RenderOrder, StaggerAxis, StaggerIndex, VAlign,
};

pub use tmx_common::{Colour, Point, TerrainCorners};
