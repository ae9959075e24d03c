//! TMX - tile map reading and writing library.
//!
//! This crate provides a unified interface to the TMX crates.
//!
//! # Crates
//!
//! - [`tmx_common`] - Scalar text codecs (colours, point lists, terrain corners, tile data)
//! - [`tmx_xml`] - Generic XML element tree
//! - [`tmx_model`] - In-memory map model
//! - [`tmx_codec`] - Document tree, reference resolver and writer
//!
//! # Example
//!
//! ```no_run
//! use tmx::prelude::*;
//!
//! let data = std::fs::read("village.tmx")?;
//! let mut map = tmx::decode(&data)?;
//! println!("{} tilesets, {} tile layers", map.tilesets().len(), map.tile_layers.len());
//!
//! let options = WriteOptions::default().with_encoding(DataEncoding::Base64);
//! std::fs::write("village-copy.tmx", tmx::encode_with(&mut map, &options)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use tmx_codec as codec;
pub use tmx_common as common;
pub use tmx_model as model;
pub use tmx_xml as xml;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tmx_codec::{Codec, DataEncoding, WriteOptions};
    pub use tmx_common::{Colour, Point};
    pub use tmx_model::{
        Animation, Frame, Group, Image, ImageLayer, Map, Object, ObjectGroup, Orientation,
        Properties, Property, PropertyValue, RenderOrder, Shape, Terrain, Text, Tile, TileLayer,
        TileRef, Tileset,
    };
}

// Re-export the entry points at the crate root
pub use tmx_codec::{decode, encode, encode_with, Error, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
