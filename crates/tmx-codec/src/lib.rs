//! Bidirectional codec between TMX documents and the [`tmx_model`] map.
//!
//! Decoding runs in three steps: the XML is parsed into an element tree,
//! the tree is read into typed document nodes ([`doc`]), and the nodes are
//! inflated into a [`Map`]. Inflation resolves every numeric reference
//! (global tile ids, terrain indices) through a [`ResolveContext`] that
//! lives only for that one decode, so concurrent decodes never share state.
//!
//! Encoding reverses the steps. It first renumbers the map with
//! [`Map::finalize_ids`] so that global ids are contiguous from 1, then
//! deflates the map into document nodes and serializes them.
//!
//! # Example
//!
//! ```
//! use tmx_codec::{Codec, DataEncoding, WriteOptions};
//!
//! let xml = br#"<map width="2" height="1" tilewidth="8" tileheight="8">
//!   <tileset firstgid="1" name="t"><tile id="0"><image source="a.png"/></tile></tileset>
//!   <layer name="l"><data encoding="csv">1,0</data></layer>
//! </map>"#;
//!
//! let codec = Codec::new();
//! let mut map = codec.decode(xml)?;
//! assert_eq!(map.tile_layers[0].tile_count(), 1);
//!
//! let codec = Codec::with_options(WriteOptions::default().with_encoding(DataEncoding::Base64));
//! let bytes = codec.encode(&mut map)?;
//! assert_eq!(codec.decode(&bytes)?, map);
//! # Ok::<(), tmx_codec::Error>(())
//! ```

mod deflate;
pub mod doc;
mod error;
mod inflate;
mod options;

pub use deflate::deflate;
pub use error::{Error, Result};
pub use inflate::{inflate, ResolveContext, MAX_EXTERNAL_TILES, MAX_LAYER_CELLS};
pub use options::{DataEncoding, WriteOptions};

use tmx_model::Map;
use tmx_xml::Element;

use doc::{MapNode, Node};

/// Decode a TMX document.
pub fn decode(data: &[u8]) -> Result<Map> {
    let root = Element::parse(data)?;
    let doc = MapNode::from_element(&root)?;
    inflate(&doc)
}

/// Encode a map with default options. Renumbers the map's ids first.
pub fn encode(map: &mut Map) -> Result<Vec<u8>> {
    encode_with(map, &WriteOptions::default())
}

/// Encode a map. Renumbers the map's ids first.
pub fn encode_with(map: &mut Map, options: &WriteOptions) -> Result<Vec<u8>> {
    map.finalize_ids();
    let doc = deflate(map, options);
    Ok(doc.to_element().to_xml_bytes(&options.writer_config())?)
}

/// A decoder and encoder bound to one set of write options.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    options: WriteOptions,
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    pub fn decode(&self, data: &[u8]) -> Result<Map> {
        decode(data)
    }

    pub fn encode(&self, map: &mut Map) -> Result<Vec<u8>> {
        encode_with(map, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmx_model::{
        Colour, Frame, Orientation, Shape, StaggerAxis, StaggerIndex, Terrain, Tile, TileRef,
        Tileset,
    };

    const VILLAGE: &[u8] = include_bytes!("../testdata/village.tmx");

    #[test]
    fn test_decode_village() {
        let map = decode(VILLAGE).unwrap();
        assert_eq!((map.width(), map.height()), (4, 3));
        assert_eq!(
            map.orientation,
            Orientation::Staggered {
                axis: StaggerAxis::Y,
                index: StaggerIndex::Odd
            }
        );
        assert_eq!(map.background, Some(Colour::rgb(0x2E, 0x34, 0x40)));
        assert_eq!(map.properties.len(), 7);
        assert_eq!(
            map.properties.get("intro").and_then(|p| p.as_str()),
            Some("Welcome, traveller.\nMind the river.")
        );

        let ground = &map.tilesets()[0];
        assert_eq!(ground.tile_count(), 3);
        assert_eq!(ground.terrains()[1].tile, Some(2));
        assert_eq!(ground.corner_terrain(1, 1).map(|t| t.name.as_str()), Some("water"));

        // The water animation cycles through itself and a tile of another tileset.
        let frames = &ground.tiles()[2].animation.as_ref().unwrap().frames;
        assert_eq!(
            frames,
            &[
                Frame::new(TileRef::new(0, 2), 200),
                Frame::new(TileRef::new(1, 1), 150)
            ]
        );

        let rock = TileRef::new(1, 0);
        assert_eq!(map.tile_layers[0].get(3, 2), Some(rock));
        assert_eq!(map.tile_layers[0].get(0, 2), None);
        assert_eq!(map.object_groups[0].objects[1].tile, Some(rock));
        assert_eq!(map.groups[0].tile_layers[0].get(1, 1), Some(TileRef::new(1, 1)));
        assert_eq!(map.groups[0].groups[0].object_groups[0].objects[0].shape.name(), "polygon");
    }

    #[test]
    fn test_round_trip_is_stable() {
        let mut first = decode(VILLAGE).unwrap();
        let bytes = encode(&mut first).unwrap();
        let second = decode(&bytes).unwrap();
        assert_eq!(second, first);

        let mut second = second;
        assert_eq!(encode(&mut second).unwrap(), bytes);
    }

    #[test]
    fn test_round_trip_base64() {
        let codec = Codec::with_options(WriteOptions::default().with_encoding(DataEncoding::Base64));
        let mut first = codec.decode(VILLAGE).unwrap();
        let bytes = codec.encode(&mut first).unwrap();

        let xml = String::from_utf8(bytes.clone()).unwrap();
        assert!(xml.contains(r#"encoding="base64""#));
        assert_eq!(codec.decode(&bytes).unwrap(), first);
    }

    #[test]
    fn test_alpha_is_not_written() {
        let xml = br##"<map width="1" height="1" tilewidth="8" tileheight="8" backgroundcolor="#80102030"/>"##;
        let mut map = decode(xml).unwrap();
        assert_eq!(map.background, Some(Colour::rgba(0x10, 0x20, 0x30, 0x80)));

        let again = decode(&encode(&mut map).unwrap()).unwrap();
        assert_eq!(again.background, Some(Colour::rgb(0x10, 0x20, 0x30)));
    }

    #[test]
    fn test_empty_cells_in_csv() {
        let xml = br#"<map width="2" height="2" tilewidth="8" tileheight="8">
  <tileset firstgid="140" name="t"><tile id="0"><image source="a.png"/></tile></tileset>
  <layer name="l"><data encoding="csv">0,0,
140,0</data></layer>
</map>"#;
        let mut map = decode(xml).unwrap();
        assert_eq!(map.tile_layers[0].get(0, 1), Some(TileRef::new(0, 0)));

        let xml = String::from_utf8(encode(&mut map).unwrap()).unwrap();
        assert!(xml.contains("0,0,\n1,0"), "{xml}");
    }

    #[test]
    fn test_external_tileset_keeps_id_range() {
        let xml = br#"<map width="2" height="1" tilewidth="8" tileheight="8">
  <tileset firstgid="1" source="shared.tsx"/>
  <tileset firstgid="101" name="local"><tile id="0"><image source="a.png"/></tile></tileset>
  <layer name="l"><data encoding="csv">50,101</data></layer>
</map>"#;
        let mut map = decode(xml).unwrap();
        assert_eq!(map.tilesets()[0].tile_count(), 100);
        assert_eq!(map.tile_layers[0].get(0, 0), Some(TileRef::new(0, 49)));
        assert_eq!(map.tile_layers[0].get(1, 0), Some(TileRef::new(1, 0)));

        let bytes = encode(&mut map).unwrap();
        let xml = String::from_utf8(bytes.clone()).unwrap();
        assert!(xml.contains(r#"tilecount="100""#), "{xml}");
        assert!(xml.contains("50,101"), "{xml}");

        let again = decode(&bytes).unwrap();
        let first_gids: Vec<u32> = again.tilesets().iter().map(|ts| ts.first_gid).collect();
        assert!(first_gids.windows(2).all(|pair| pair[0] < pair[1]), "{first_gids:?}");
        assert_eq!(first_gids, [1, 101]);
        assert_eq!(again, map);
    }

    #[test]
    fn test_oversized_sizes_are_errors() {
        let xml = br#"<map width="4000000000" height="4000000000" tilewidth="8" tileheight="8">
  <layer name="l"/>
</map>"#;
        assert!(matches!(
            decode(xml),
            Err(Error::LimitExceeded { limit, .. }) if limit == MAX_LAYER_CELLS
        ));

        let xml = br#"<map width="1" height="1" tilewidth="8" tileheight="8">
  <tileset firstgid="1" source="huge.tsx" tilecount="4000000000"/>
</map>"#;
        assert!(matches!(
            decode(xml),
            Err(Error::LimitExceeded { requested: 4_000_000_000, .. })
        ));
    }

    #[test]
    fn test_built_map_gets_contiguous_ids() {
        let mut map = Map::new(3, 1, 16, 16);

        let mut first = Tileset::new("first", 16, 16);
        for name in ["a", "b", "c", "d", "e"] {
            first.add_tile(Tile::new(format!("{name}.png")));
        }
        let first = map.add_tileset(first);

        let mut second = Tileset::new("second", 16, 16);
        let shore = second.add_terrain(Terrain::new("shore"));
        let mut tiles = Vec::new();
        for name in ["x", "y", "z"] {
            tiles.push(second.add_tile(Tile::new(format!("{name}.png"))));
        }
        second.tile_mut(tiles[2]).unwrap().set_bottom_right_terrain(Some(shore));
        let second = map.add_tileset(second);

        let layer = map.new_tile_layer("ground");
        layer.put(0, 0, Some(TileRef::new(first, 4)));
        layer.put(2, 0, Some(TileRef::new(second, 2)));

        let bytes = encode(&mut map).unwrap();
        let xml = String::from_utf8(bytes.clone()).unwrap();
        assert!(xml.contains(r#"firstgid="6""#), "{xml}");
        assert!(xml.contains("5,0,8"), "{xml}");
        assert!(xml.contains(r#"terrain=",,,0""#), "{xml}");

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.tilesets()[1].first_gid, 6);
        assert_eq!(decoded.tile_layers[0].get(2, 0), Some(TileRef::new(1, 2)));
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode(b"<map"), Err(Error::Xml(_))));
        assert!(matches!(decode(b""), Err(Error::Xml(tmx_xml::Error::NoRoot))));

        let compressed = br#"<map width="1" height="1" tilewidth="8" tileheight="8">
  <layer name="l"><data encoding="base64" compression="zlib">eJw=</data></layer>
</map>"#;
        assert!(matches!(decode(compressed), Err(Error::UnsupportedCompression(c)) if c == "zlib"));
    }

    #[test]
    fn test_shapes_survive() {
        let mut map = decode(VILLAGE).unwrap();
        let map = decode(&encode(&mut map).unwrap()).unwrap();
        let objects = &map.object_groups[0].objects;
        assert_eq!(objects[0].shape, Shape::Point);
        assert!(!objects[2].visible);
        match &objects[4].shape {
            Shape::Text(text) => {
                assert_eq!(text.contents, "Village of Ash");
                assert!(text.wrap && text.bold && text.kerning);
                assert_eq!(text.pixel_size, 12);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }
}
