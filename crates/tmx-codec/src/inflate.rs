//! Read direction: document tree to map model.
//!
//! Tiles may be referenced before they are read: a terrain names a tile of
//! its own tileset, an animation frame may name a tile of a later tileset.
//! Inflation therefore runs in two phases over the tilesets:
//!
//! 1. Every tileset, terrain and tile is allocated in document order and
//!    registered in a [`ResolveContext`] (tiles by global id, terrains by
//!    tileset and index). Deferred fields are queued.
//! 2. The queue is drained and each deferred reference is resolved through
//!    the context.
//!
//! Layers and object groups are inflated afterwards, with every tile known.
//! References that do not resolve are dropped and logged at debug level.

use std::hash::BuildHasherDefault;

use hashbrown::HashMap as FastHashMap;
use log::{debug, warn};
use rustc_hash::FxHasher;
use tmx_common::grid::{self, TileGrid, EMPTY_CELL};
use tmx_common::terrain::{decode_terrain, NO_TERRAIN};
use tmx_common::{points, Colour, TerrainCorners};
use tmx_model::{
    Animation, DrawOrder, Frame, Group, HAlign, Image, ImageLayer, Map, Object, ObjectGroup,
    Orientation, Properties, Property, PropertyType, PropertyValue, RenderOrder, Shape, Terrain,
    Text, Tile, TileLayer, TileRef, Tileset, VAlign,
};

use crate::doc::{
    DataNode, FrameNode, GroupNode, ImageLayerNode, ImageNode, MapNode, ObjectGroupNode,
    ObjectNode, PropertyNode, ShapeNode, TextNode, TileLayerNode, TilesetNode,
};
use crate::{Error, Result};

type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Largest tile layer, in cells, a decode will allocate.
pub const MAX_LAYER_CELLS: u64 = 1 << 24;

/// Largest id range an external tileset may claim.
pub const MAX_EXTERNAL_TILES: u32 = 1 << 20;

/// Lookup tables for one decode. Never shared between documents.
#[derive(Debug, Default)]
pub struct ResolveContext {
    tiles: FxHashMap<u32, TileRef>,
    terrains: FxHashMap<(usize, u32), usize>,
}

impl ResolveContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tile under its global id. The first registration wins.
    pub fn register_tile(&mut self, gid: u32, tile: TileRef) {
        if self.tiles.contains_key(&gid) {
            debug!("duplicate global tile id {gid}; keeping the first tile");
            return;
        }
        self.tiles.insert(gid, tile);
    }

    /// Register a terrain under its index within its tileset.
    pub fn register_terrain(&mut self, tileset: usize, index: u32, position: usize) {
        self.terrains.insert((tileset, index), position);
    }

    /// Tile with the given global id. Id 0 is the empty cell and never resolves.
    pub fn tile(&self, gid: u32) -> Option<TileRef> {
        if gid == EMPTY_CELL {
            return None;
        }
        self.tiles.get(&gid).copied()
    }

    /// Position of a terrain in its tileset's terrain list.
    pub fn terrain(&self, tileset: usize, index: u32) -> Option<usize> {
        self.terrains.get(&(tileset, index)).copied()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn terrain_count(&self) -> usize {
        self.terrains.len()
    }
}

/// A tile whose references wait for phase 2.
struct PendingTile<'a> {
    tile: TileRef,
    corners: TerrainCorners,
    frames: Option<&'a [FrameNode]>,
    collision: Option<&'a ObjectGroupNode>,
}

/// A terrain whose representative tile waits for phase 2.
struct PendingTerrain {
    tileset: usize,
    position: usize,
    first_gid: u32,
    tile: Option<i64>,
}

#[derive(Default)]
struct Pending<'a> {
    tiles: Vec<PendingTile<'a>>,
    terrains: Vec<PendingTerrain>,
}

/// Build a map from a document tree.
pub fn inflate(doc: &MapNode) -> Result<Map> {
    let mut map = Map::new(doc.width, doc.height, doc.tile_width, doc.tile_height);
    map.orientation = match doc.orientation.as_deref() {
        None => Orientation::default(),
        Some(name) => Orientation::from_attributes(
            name,
            doc.stagger_axis.as_deref(),
            doc.stagger_index.as_deref(),
        )
        .unwrap_or_else(|| {
            warn!("unknown orientation {name:?}; using orthogonal");
            Orientation::default()
        }),
    };
    map.render_order =
        parse_or_default(doc.render_order.as_deref(), RenderOrder::parse, "render order");
    map.hex_side_length = doc.hex_side_length;
    map.background = decode_colour(doc.background_color.as_deref())?;
    if let Some(version) = &doc.version {
        map.version = version.clone();
    }
    map.tiled_version = doc.tiled_version.clone();
    map.next_object_id = doc.next_object_id.unwrap_or(1);
    map.properties = inflate_properties(&doc.properties)?;

    let mut ctx = ResolveContext::new();
    let mut pending = Pending::default();

    for (position, node) in doc.tilesets.iter().enumerate() {
        let next_gid = doc.tilesets.get(position + 1).map(|next| next.first_gid);
        allocate_tileset(&mut map, node, next_gid, &mut ctx, &mut pending)?;
    }
    debug!(
        "registered {} tiles and {} terrains in {} tilesets",
        ctx.tile_count(),
        ctx.terrain_count(),
        map.tilesets().len()
    );

    for terrain in &pending.terrains {
        resolve_terrain(&mut map, &ctx, terrain);
    }
    for tile in pending.tiles {
        resolve_tile(&mut map, &ctx, tile)?;
    }

    let (width, height) = (map.width(), map.height());
    map.tile_layers = doc
        .layers
        .iter()
        .map(|node| inflate_tile_layer(node, width, height, &ctx))
        .collect::<Result<_>>()?;
    map.image_layers = doc
        .image_layers
        .iter()
        .map(inflate_image_layer)
        .collect::<Result<_>>()?;
    map.object_groups = doc
        .object_groups
        .iter()
        .map(|node| inflate_object_group(node, &ctx))
        .collect::<Result<_>>()?;
    map.groups = doc
        .groups
        .iter()
        .map(|node| inflate_group(node, width, height, &ctx))
        .collect::<Result<_>>()?;

    Ok(map)
}

/// Phase 1 for one tileset: allocate terrains and tiles and register them.
fn allocate_tileset<'a>(
    map: &mut Map,
    node: &'a TilesetNode,
    next_gid: Option<u32>,
    ctx: &mut ResolveContext,
    pending: &mut Pending<'a>,
) -> Result<()> {
    if let Some(source) = &node.source {
        warn!("tileset {source:?} is external; only its reference and id range are kept");
    }

    let index = map.tilesets().len();
    let mut tileset = Tileset::new(
        node.name.as_str(),
        node.tile_width.unwrap_or(map.tile_width()),
        node.tile_height.unwrap_or(map.tile_height()),
    );
    tileset.first_gid = node.first_gid;
    tileset.source = node.source.clone();
    tileset.spacing = node.spacing.unwrap_or(0);
    tileset.margin = node.margin.unwrap_or(0);
    tileset.columns = node.columns;
    if let Some(offset) = node.tile_offset {
        tileset.offset_x = offset.x;
        tileset.offset_y = offset.y;
    }
    tileset.properties = inflate_properties(&node.properties)?;

    let terrains = node.terrain_types.iter().flat_map(|t| &t.terrains);
    for (declared, terrain_node) in terrains.enumerate() {
        let mut terrain = Terrain::new(terrain_node.name.as_str());
        terrain.properties = inflate_properties(&terrain_node.properties)?;
        let position = tileset.add_terrain(terrain);
        ctx.register_terrain(index, declared as u32, position);
        pending.terrains.push(PendingTerrain {
            tileset: index,
            position,
            first_gid: node.first_gid,
            tile: terrain_node.tile,
        });
    }

    if node.source.is_some() && node.tiles.is_empty() {
        let span = external_span(node, next_gid)?;
        for id in 0..span {
            let tile_ref = TileRef::new(index, tileset.add_tile(Tile { id, ..Tile::default() }));
            ctx.register_tile(node.first_gid.saturating_add(id), tile_ref);
        }
    }

    for tile_node in &node.tiles {
        let tile = Tile {
            id: tile_node.id,
            tile_type: tile_node.tile_type.clone().unwrap_or_default(),
            probability: tile_node.probability.unwrap_or(1.0),
            image: tile_node.image.as_ref().map(inflate_image).transpose()?,
            properties: inflate_properties(&tile_node.properties)?,
            ..Tile::default()
        };
        let tile_ref = TileRef::new(index, tileset.add_tile(tile));
        ctx.register_tile(node.first_gid.saturating_add(tile_node.id), tile_ref);

        // A malformed segment leaves the remaining corners absent; see `decode_terrain`.
        let corners = tile_node
            .terrain
            .as_deref()
            .map_or(NO_TERRAIN, decode_terrain);
        pending.tiles.push(PendingTile {
            tile: tile_ref,
            corners,
            frames: tile_node.animation.as_ref().map(|a| a.frames.as_slice()),
            collision: tile_node.collision.as_ref(),
        });
    }

    map.add_tileset(tileset);
    Ok(())
}

/// Number of global ids claimed by an external tileset: its `tilecount`, or
/// the gap up to the next tileset's `firstgid`.
fn external_span(node: &TilesetNode, next_gid: Option<u32>) -> Result<u32> {
    let span = node
        .tile_count
        .or_else(|| next_gid.map(|next| next.saturating_sub(node.first_gid)));
    let Some(span) = span else {
        warn!(
            "external tileset {:?} has no tile count; its tiles do not resolve",
            node.source.as_deref().unwrap_or_default()
        );
        return Ok(0);
    };
    if span > MAX_EXTERNAL_TILES {
        return Err(Error::LimitExceeded {
            what: "external tileset tile count",
            requested: u64::from(span),
            limit: u64::from(MAX_EXTERNAL_TILES),
        });
    }
    Ok(span)
}

/// Phase 2: point a terrain at its representative tile in the same tileset.
fn resolve_terrain(map: &mut Map, ctx: &ResolveContext, pending: &PendingTerrain) {
    let Some(local) = pending.tile.filter(|&id| id >= 0) else {
        return;
    };
    let resolved = u32::try_from(local)
        .ok()
        .and_then(|local| ctx.tile(pending.first_gid.saturating_add(local)))
        .filter(|tile| tile.tileset == pending.tileset)
        .map(|tile| tile.tile);
    if resolved.is_none() {
        debug!("terrain tile {local} does not resolve; dropping it");
    }
    if let Some(terrain) = map
        .tileset_mut(pending.tileset)
        .and_then(|ts| ts.terrains_mut().get_mut(pending.position))
    {
        terrain.tile = resolved;
    }
}

/// Phase 2: resolve terrain corners, animation frames and collision tiles.
fn resolve_tile(map: &mut Map, ctx: &ResolveContext, pending: PendingTile<'_>) -> Result<()> {
    let tileset = pending.tile.tileset;
    let terrain = pending.corners.map(|corner| {
        let index = corner?;
        let position = ctx.terrain(tileset, index);
        if position.is_none() {
            debug!("terrain corner {index} does not resolve; leaving it empty");
        }
        position.map(|p| p as u32)
    });

    let animation = pending.frames.map(|frames| {
        Animation::new(frames.iter().filter_map(|frame| {
            let tile = ctx.tile(frame.tile_id);
            if tile.is_none() {
                debug!("animation frame tile {} does not resolve; dropping it", frame.tile_id);
            }
            tile.map(|tile| Frame::new(tile, frame.duration))
        }))
    });

    let collision = pending
        .collision
        .map(|group| inflate_object_group(group, ctx))
        .transpose()?;

    if let Some(tile) = map.tile_mut(pending.tile) {
        tile.terrain = terrain;
        tile.animation = animation;
        tile.collision = collision;
    }
    Ok(())
}

fn inflate_tile_layer(
    node: &TileLayerNode,
    width: u32,
    height: u32,
    ctx: &ResolveContext,
) -> Result<TileLayer> {
    let (width, height) = (node.width.unwrap_or(width), node.height.unwrap_or(height));
    let cells = u64::from(width.max(1)) * u64::from(height.max(1));
    if cells > MAX_LAYER_CELLS {
        return Err(Error::LimitExceeded {
            what: "tile layer cell count",
            requested: cells,
            limit: MAX_LAYER_CELLS,
        });
    }
    let mut layer = TileLayer::new(node.name.as_str(), width, height);
    layer.opacity = node.opacity.unwrap_or(1.0);
    layer.visible = node.visible.unwrap_or(true);
    layer.offset_x = node.offset_x.unwrap_or(0.0);
    layer.offset_y = node.offset_y.unwrap_or(0.0);
    layer.properties = inflate_properties(&node.properties)?;

    let Some(data) = &node.data else {
        return Ok(layer);
    };
    let grid = decode_data(data, layer.width())?;
    for (y, row) in grid.iter().enumerate() {
        for (x, &gid) in row.iter().enumerate() {
            if gid == EMPTY_CELL {
                continue;
            }
            match ctx.tile(gid) {
                Some(tile) => {
                    if !layer.put(x as u32, y as u32, Some(tile)) {
                        debug!("layer {:?}: cell ({x}, {y}) is outside the layer", layer.name);
                    }
                }
                None => debug!("layer {:?}: tile {gid} does not resolve", layer.name),
            }
        }
    }
    Ok(layer)
}

/// Decode the rows of global ids held by a `<data>` block.
pub(crate) fn decode_data(data: &DataNode, width: u32) -> Result<TileGrid> {
    if let Some(compression) = &data.compression {
        return Err(Error::UnsupportedCompression(compression.clone()));
    }
    match data.encoding.as_deref() {
        Some("csv") => Ok(grid::decode_csv(&data.text)?),
        Some("base64") => Ok(grid::decode_base64(&data.text)?),
        Some(other) => Err(Error::UnsupportedEncoding(other.to_string())),
        None if !data.tiles.is_empty() => Ok(data
            .tiles
            .chunks(width.max(1) as usize)
            .map(|row| row.iter().map(|tile| tile.gid).collect())
            .collect()),
        None => Ok(grid::decode_csv(&data.text)?),
    }
}

fn inflate_image(node: &ImageNode) -> Result<Image> {
    Ok(Image {
        source: node.source.clone(),
        format: node.format.clone(),
        width: node.width,
        height: node.height,
        transparent: decode_colour(node.trans.as_deref())?,
    })
}

fn inflate_image_layer(node: &ImageLayerNode) -> Result<ImageLayer> {
    let mut layer = ImageLayer::new(node.name.as_str());
    layer.opacity = node.opacity.unwrap_or(1.0);
    layer.visible = node.visible.unwrap_or(true);
    layer.offset_x = node.offset_x.unwrap_or(0.0);
    layer.offset_y = node.offset_y.unwrap_or(0.0);
    layer.properties = inflate_properties(&node.properties)?;
    layer.image = node.image.as_ref().map(inflate_image).transpose()?;
    Ok(layer)
}

fn inflate_object_group(node: &ObjectGroupNode, ctx: &ResolveContext) -> Result<ObjectGroup> {
    Ok(ObjectGroup {
        name: node.name.clone(),
        colour: decode_colour(node.color.as_deref())?,
        opacity: node.opacity.unwrap_or(1.0),
        visible: node.visible.unwrap_or(true),
        offset_x: node.offset_x.unwrap_or(0.0),
        offset_y: node.offset_y.unwrap_or(0.0),
        draw_order: parse_or_default(node.draw_order.as_deref(), DrawOrder::parse, "draw order"),
        properties: inflate_properties(&node.properties)?,
        objects: node
            .objects
            .iter()
            .map(|object| inflate_object(object, ctx))
            .collect::<Result<_>>()?,
    })
}

fn inflate_object(node: &ObjectNode, ctx: &ResolveContext) -> Result<Object> {
    let tile = node.gid.filter(|&gid| gid != EMPTY_CELL).and_then(|gid| {
        let tile = ctx.tile(gid);
        if tile.is_none() {
            debug!("object tile {gid} does not resolve; dropping it");
        }
        tile
    });

    let shape = match &node.shape {
        ShapeNode::Rectangle => Shape::Rectangle,
        ShapeNode::Ellipse => Shape::Ellipse,
        ShapeNode::Point => Shape::Point,
        ShapeNode::Polygon { points } => Shape::Polygon {
            points: points::decode_points(points)?,
        },
        ShapeNode::Polyline { points } => Shape::Polyline {
            points: points::decode_points(points)?,
        },
        ShapeNode::Text(text) => Shape::Text(inflate_text(text)?),
    };

    Ok(Object {
        id: node.id.unwrap_or(0),
        name: node.name.clone().unwrap_or_default(),
        object_type: node.object_type.clone().unwrap_or_default(),
        tile,
        x: node.x.unwrap_or(0.0),
        y: node.y.unwrap_or(0.0),
        width: node.width.unwrap_or(0.0),
        height: node.height.unwrap_or(0.0),
        rotation: node.rotation.unwrap_or(0.0),
        visible: node.visible.unwrap_or(true),
        properties: inflate_properties(&node.properties)?,
        shape,
    })
}

fn inflate_text(node: &TextNode) -> Result<Text> {
    let defaults = Text::default();
    Ok(Text {
        font_family: node
            .font_family
            .clone()
            .filter(|family| !family.is_empty())
            .unwrap_or(defaults.font_family),
        pixel_size: node
            .pixel_size
            .filter(|&size| size > 0)
            .unwrap_or(defaults.pixel_size),
        colour: decode_colour(node.color.as_deref())?.unwrap_or(defaults.colour),
        wrap: node.wrap.unwrap_or(defaults.wrap),
        bold: node.bold.unwrap_or(defaults.bold),
        italic: node.italic.unwrap_or(defaults.italic),
        underline: node.underline.unwrap_or(defaults.underline),
        strikeout: node.strikeout.unwrap_or(defaults.strikeout),
        kerning: node.kerning.unwrap_or(defaults.kerning),
        halign: parse_or_default(node.halign.as_deref(), HAlign::parse, "horizontal alignment"),
        valign: parse_or_default(node.valign.as_deref(), VAlign::parse, "vertical alignment"),
        contents: node.contents.clone(),
    })
}

fn inflate_group(
    node: &GroupNode,
    width: u32,
    height: u32,
    ctx: &ResolveContext,
) -> Result<Group> {
    let mut group = Group::new(node.name.as_str());
    group.opacity = node.opacity.unwrap_or(1.0);
    group.visible = node.visible.unwrap_or(true);
    group.offset_x = node.offset_x.unwrap_or(0.0);
    group.offset_y = node.offset_y.unwrap_or(0.0);
    group.properties = inflate_properties(&node.properties)?;
    group.tile_layers = node
        .layers
        .iter()
        .map(|layer| inflate_tile_layer(layer, width, height, ctx))
        .collect::<Result<_>>()?;
    group.image_layers = node
        .image_layers
        .iter()
        .map(inflate_image_layer)
        .collect::<Result<_>>()?;
    group.object_groups = node
        .object_groups
        .iter()
        .map(|objects| inflate_object_group(objects, ctx))
        .collect::<Result<_>>()?;
    group.groups = node
        .groups
        .iter()
        .map(|nested| inflate_group(nested, width, height, ctx))
        .collect::<Result<_>>()?;
    Ok(group)
}

pub(crate) fn inflate_properties(nodes: &[PropertyNode]) -> Result<Properties> {
    nodes.iter().map(inflate_property).collect()
}

/// Decode one property.
///
/// A missing type tag means string. An unknown tag is read as a string.
/// Booleans are true only for `true` (or `1`). An empty colour value is
/// transparent black.
fn inflate_property(node: &PropertyNode) -> Result<Property> {
    let raw = node.raw_value();
    let kind = match node.property_type.as_deref() {
        None | Some("") => PropertyType::String,
        Some(tag) => PropertyType::parse(tag).unwrap_or_else(|| {
            warn!(
                "property {:?} has unknown type {tag:?}; reading it as a string",
                node.name
            );
            PropertyType::String
        }),
    };
    let invalid = || Error::InvalidProperty {
        name: node.name.clone(),
        kind,
        value: raw.to_string(),
    };

    let value = match kind {
        PropertyType::String => PropertyValue::String(raw.to_string()),
        PropertyType::File => PropertyValue::File(raw.to_string()),
        PropertyType::Int => PropertyValue::Int(raw.trim().parse().map_err(|_| invalid())?),
        PropertyType::Float => PropertyValue::Float(raw.trim().parse().map_err(|_| invalid())?),
        PropertyType::Bool => PropertyValue::Bool(matches!(raw.trim(), "true" | "1")),
        PropertyType::Colour if raw.trim().is_empty() => {
            PropertyValue::Colour(Colour::rgba(0, 0, 0, 0))
        }
        PropertyType::Colour => {
            PropertyValue::Colour(Colour::decode(raw.trim()).map_err(|_| invalid())?)
        }
    };
    Ok(Property::with_value(node.name.as_str(), value))
}

fn decode_colour(value: Option<&str>) -> Result<Option<Colour>> {
    Ok(value.map(Colour::decode).transpose()?)
}

/// Parse an enumerated attribute; unknown values fall back to the default.
fn parse_or_default<T: Default>(
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
    what: &str,
) -> T {
    match value {
        None => T::default(),
        Some(raw) => parse(raw).unwrap_or_else(|| {
            warn!("unknown {what} {raw:?}; using the default");
            T::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Node;
    use tmx_xml::Element;

    fn parse(xml: &str) -> Result<Map> {
        let root = Element::parse_str(xml)?;
        inflate(&MapNode::from_element(&root)?)
    }

    const TWO_TILESETS: &str = r#"
<map width="2" height="2" tilewidth="16" tileheight="16">
  <tileset firstgid="1" name="first">
    <terraintypes>
      <terrain name="grass" tile="1"/>
      <terrain name="sand" tile="-1"/>
    </terraintypes>
    <tile id="0" terrain="0,1,,x"/>
    <tile id="1" terrain="0,0,0,5">
      <animation>
        <frame tileid="3" duration="100"/>
        <frame tileid="99" duration="50"/>
        <frame tileid="1" duration="75"/>
      </animation>
    </tile>
  </tileset>
  <tileset firstgid="3" name="second">
    <terraintypes>
      <terrain name="rock" tile="7"/>
    </terraintypes>
    <tile id="0" terrain="0,0,1,1"/>
  </tileset>
  <layer name="ground">
    <data encoding="csv">1,0,&#xA;3,42</data>
  </layer>
</map>"#;

    #[test]
    fn test_resolve_across_tilesets() {
        let map = parse(TWO_TILESETS).unwrap();
        assert_eq!(map.tilesets().len(), 2);

        let first = &map.tilesets()[0];
        assert_eq!(first.terrains()[0].tile, Some(1));
        assert_eq!(first.terrains()[1].tile, None);

        let tile0 = first.tile(0).unwrap();
        assert_eq!(tile0.terrain, [Some(0), Some(1), None, None]);
        let tile1 = first.tile(1).unwrap();
        // Corner 5 does not exist in this tileset.
        assert_eq!(tile1.terrain, [Some(0), Some(0), Some(0), None]);

        // Terrain ids are scoped per tileset.
        let second = &map.tilesets()[1];
        assert_eq!(second.tile(0).unwrap().terrain, [Some(0), Some(0), None, None]);
        assert_eq!(second.terrains()[0].tile, None);
    }

    #[test]
    fn test_unresolved_frames_dropped_in_order() {
        let map = parse(TWO_TILESETS).unwrap();
        let animation = map.tilesets()[0].tile(1).unwrap().animation.as_ref().unwrap();
        assert_eq!(
            animation.frames,
            [
                Frame::new(TileRef::new(1, 0), 100),
                Frame::new(TileRef::new(0, 0), 75),
            ]
        );
        assert!(map.tilesets()[0].tile(0).unwrap().animation.is_none());
    }

    #[test]
    fn test_layer_cells() {
        let map = parse(TWO_TILESETS).unwrap();
        let layer = &map.tile_layers[0];
        assert_eq!(layer.get(0, 0), Some(TileRef::new(0, 0)));
        assert_eq!(layer.get(1, 0), None);
        assert_eq!(layer.get(0, 1), Some(TileRef::new(1, 0)));
        // Global id 42 is not defined.
        assert_eq!(layer.get(1, 1), None);
        assert!(layer.visible);
        assert_eq!(layer.opacity, 1.0);
    }

    #[test]
    fn test_contexts_are_independent() {
        let other = r#"
<map width="1" height="1" tilewidth="8" tileheight="8">
  <layer name="l"><data encoding="csv">3</data></layer>
</map>"#;
        parse(TWO_TILESETS).unwrap();
        let map = parse(other).unwrap();
        assert_eq!(map.tile_layers[0].get(0, 0), None);
    }

    #[test]
    fn test_compression_rejected() {
        let xml = r#"
<map width="1" height="1" tilewidth="8" tileheight="8">
  <layer name="l"><data encoding="base64" compression="zlib">eJwzBAAAMgAy</data></layer>
</map>"#;
        assert!(matches!(
            parse(xml),
            Err(Error::UnsupportedCompression(c)) if c == "zlib"
        ));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let data = DataNode {
            encoding: Some("hex".to_string()),
            ..DataNode::default()
        };
        assert!(matches!(
            decode_data(&data, 1),
            Err(Error::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_unencoded_tile_children() {
        let xml = r#"
<map width="2" height="2" tilewidth="8" tileheight="8">
  <tileset firstgid="1" name="t"><tile id="0"/><tile id="1"/></tileset>
  <layer name="l" width="2" height="2">
    <data><tile gid="2"/><tile gid="0"/><tile/><tile gid="1"/></data>
  </layer>
</map>"#;
        let map = parse(xml).unwrap();
        let layer = &map.tile_layers[0];
        assert_eq!(layer.get(0, 0), Some(TileRef::new(0, 1)));
        assert_eq!(layer.get(1, 1), Some(TileRef::new(0, 0)));
        assert_eq!(layer.tile_count(), 2);
    }

    #[test]
    fn test_malformed_grid_fails() {
        let xml = r#"
<map width="2" height="1" tilewidth="8" tileheight="8">
  <layer name="l"><data encoding="csv">1,x</data></layer>
</map>"#;
        assert!(matches!(
            parse(xml),
            Err(Error::Scalar(tmx_common::Error::InvalidTileId(id))) if id == "x"
        ));
    }

    #[test]
    fn test_malformed_points_fail() {
        let xml = r#"
<map width="1" height="1" tilewidth="8" tileheight="8">
  <objectgroup><object id="1"><polygon points="0,0 1"/></object></objectgroup>
</map>"#;
        assert!(matches!(
            parse(xml),
            Err(Error::Scalar(tmx_common::Error::InvalidPoint(_)))
        ));
    }

    #[test]
    fn test_short_colour_fails() {
        let xml = r##"<map width="1" height="1" tilewidth="8" tileheight="8" backgroundcolor="#FFF"/>"##;
        assert!(matches!(
            parse(xml),
            Err(Error::Scalar(tmx_common::Error::InvalidColour { .. }))
        ));
    }

    #[test]
    fn test_map_attributes() {
        let xml = r##"
<map version="1.2" orientation="staggered" staggeraxis="y" staggerindex="odd"
     renderorder="left-up" width="0" height="3" tilewidth="8" tileheight="8"
     backgroundcolor="#80FF0000" nextobjectid="9"/>"##;
        let map = parse(xml).unwrap();
        assert_eq!(map.width(), 1);
        assert_eq!(map.version, "1.2");
        assert_eq!(map.render_order, RenderOrder::LeftUp);
        assert_eq!(
            map.orientation.stagger_axis(),
            Some(tmx_model::StaggerAxis::Y)
        );
        assert_eq!(map.background, Some(Colour::rgba(255, 0, 0, 0x80)));
        assert_eq!(map.next_object_id, 9);
    }

    #[test]
    fn test_unknown_enums_fall_back() {
        let xml = r#"<map orientation="hexagonal" renderorder="up" width="1" height="1" tilewidth="8" tileheight="8"/>"#;
        let map = parse(xml).unwrap();
        assert_eq!(map.orientation, Orientation::Orthogonal);
        assert_eq!(map.render_order, RenderOrder::RightDown);
    }

    fn property(ty: Option<&str>, value: &str) -> PropertyNode {
        PropertyNode {
            name: "p".to_string(),
            property_type: ty.map(str::to_string),
            value: Some(value.to_string()),
            text: String::new(),
        }
    }

    #[test]
    fn test_property_types() {
        let p = inflate_property(&property(Some("int"), "-12")).unwrap();
        assert_eq!(p.as_int(), Some(-12));
        let p = inflate_property(&property(Some("float"), "2.5")).unwrap();
        assert_eq!(p.as_float(), Some(2.5));
        let p = inflate_property(&property(Some("bool"), "true")).unwrap();
        assert_eq!(p.as_bool(), Some(true));
        let p = inflate_property(&property(Some("bool"), "yes")).unwrap();
        assert_eq!(p.as_bool(), Some(false));
        let p = inflate_property(&property(Some("color"), "#ff102030")).unwrap();
        assert_eq!(p.as_colour(), Some(Colour::rgb(0x10, 0x20, 0x30)));
        let p = inflate_property(&property(Some("color"), "")).unwrap();
        assert_eq!(p.as_colour(), Some(Colour::rgba(0, 0, 0, 0)));
        let p = inflate_property(&property(Some("file"), "a.png")).unwrap();
        assert_eq!(p.as_file(), Some("a.png"));
        let p = inflate_property(&property(None, "plain")).unwrap();
        assert_eq!(p.as_str(), Some("plain"));
    }

    #[test]
    fn test_unknown_property_type_is_string() {
        let p = inflate_property(&property(Some("object"), "12")).unwrap();
        assert_eq!(p.property_type(), PropertyType::String);
        assert_eq!(p.as_str(), Some("12"));
    }

    #[test]
    fn test_invalid_property_value() {
        assert!(matches!(
            inflate_property(&property(Some("int"), "twelve")),
            Err(Error::InvalidProperty { kind: PropertyType::Int, .. })
        ));
        assert!(matches!(
            inflate_property(&property(Some("color"), "#12")),
            Err(Error::InvalidProperty { kind: PropertyType::Colour, .. })
        ));
    }

    #[test]
    fn test_duplicate_property_last_wins() {
        let props = inflate_properties(&[property(None, "a"), property(Some("int"), "3")]).unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("p").and_then(Property::as_int), Some(3));
    }

    #[test]
    fn test_objects() {
        let xml = r##"
<map width="1" height="1" tilewidth="8" tileheight="8">
  <tileset firstgid="1" name="t"><tile id="0"/></tileset>
  <objectgroup name="things" color="#00ff00" draworder="index" visible="0">
    <object id="1" gid="1" x="4" y="8.5"/>
    <object id="2" gid="77" rotation="45"><ellipse/></object>
    <object id="3"><text pixelsize="0" color="#ff0000" halign="justify">Hello</text></object>
  </objectgroup>
</map>"##;
        let map = parse(xml).unwrap();
        let group = &map.object_groups[0];
        assert_eq!(group.colour, Some(Colour::rgb(0, 255, 0)));
        assert_eq!(group.draw_order, DrawOrder::Index);
        assert!(!group.visible);

        assert_eq!(group.objects[0].tile, Some(TileRef::new(0, 0)));
        assert_eq!(group.objects[0].y, 8.5);
        assert_eq!(group.objects[1].tile, None);
        assert_eq!(group.objects[1].shape, Shape::Ellipse);

        match &group.objects[2].shape {
            Shape::Text(text) => {
                assert_eq!(text.pixel_size, 16);
                assert_eq!(text.colour, Colour::rgb(255, 0, 0));
                assert_eq!(text.halign, HAlign::Left);
                assert_eq!(text.contents, "Hello");
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_tile_collision_resolves_gids() {
        let xml = r#"
<map width="1" height="1" tilewidth="8" tileheight="8">
  <tileset firstgid="1" name="a">
    <tile id="0">
      <objectgroup><object id="1" gid="2"/></objectgroup>
    </tile>
  </tileset>
  <tileset firstgid="2" name="b"><tile id="0"/></tileset>
</map>"#;
        let map = parse(xml).unwrap();
        let collision = map.tilesets()[0].tile(0).unwrap().collision.as_ref().unwrap();
        assert_eq!(collision.objects[0].tile, Some(TileRef::new(1, 0)));
    }
}
