//! Write direction: map model to document tree.
//!
//! Deflation reads ids straight from the model, so it expects
//! [`Map::finalize_ids`] to have run first. Tile handles are written as
//! global ids, terrain handles as indices; no lookup table is needed.

use log::debug;
use tmx_common::grid::{self, TileGrid, EMPTY_CELL};
use tmx_common::{points, terrain, Colour};
use tmx_model::{
    DrawOrder, Group, HAlign, Image, ImageLayer, Map, Object, ObjectGroup, Properties, Property,
    PropertyValue, Shape, Text, Tile, TileLayer, TileRef, Tileset, VAlign,
};

use crate::doc::{
    AnimationNode, DataNode, FrameNode, GroupNode, ImageLayerNode, ImageNode, MapNode,
    ObjectGroupNode, ObjectNode, PropertyNode, ShapeNode, TerrainNode, TerrainTypesNode,
    TextNode, TileLayerNode, TileNode, TileOffsetNode, TilesetNode,
};
use crate::{DataEncoding, WriteOptions};

/// Build the document tree for a finalized map.
pub fn deflate(map: &Map, options: &WriteOptions) -> MapNode {
    let writer = Deflater { map, options };
    MapNode {
        version: Some(map.version.clone()),
        tiled_version: map.tiled_version.clone(),
        orientation: Some(map.orientation.as_str().to_string()),
        render_order: Some(map.render_order.as_str().to_string()),
        width: map.width(),
        height: map.height(),
        tile_width: map.tile_width(),
        tile_height: map.tile_height(),
        hex_side_length: map.hex_side_length,
        stagger_axis: map.orientation.stagger_axis().map(|a| a.as_str().to_string()),
        stagger_index: map.orientation.stagger_index().map(|i| i.as_str().to_string()),
        background_color: map.background.map(|c| c.encode()),
        next_object_id: Some(map.next_object_id),
        properties: deflate_properties(&map.properties),
        tilesets: map.tilesets().iter().map(|ts| writer.tileset(ts)).collect(),
        layers: map.tile_layers.iter().map(|l| writer.tile_layer(l)).collect(),
        image_layers: map.image_layers.iter().map(deflate_image_layer).collect(),
        object_groups: map.object_groups.iter().map(|g| writer.object_group(g)).collect(),
        groups: map.groups.iter().map(|g| writer.group(g)).collect(),
    }
}

struct Deflater<'a> {
    map: &'a Map,
    options: &'a WriteOptions,
}

impl Deflater<'_> {
    fn gid(&self, tile: TileRef) -> Option<u32> {
        let gid = self.map.global_id(tile);
        if gid.is_none() {
            debug!("tile {tile:?} is not in the map; writing it as empty");
        }
        gid
    }

    fn tileset(&self, tileset: &Tileset) -> TilesetNode {
        // External tiles live in the referenced file; only the id range is written.
        if tileset.source.is_some() {
            return TilesetNode {
                first_gid: tileset.first_gid,
                source: tileset.source.clone(),
                tile_count: Some(tileset.tile_count() as u32),
                ..TilesetNode::default()
            };
        }

        let terrains: Vec<_> = tileset
            .terrains()
            .iter()
            .map(|terrain| TerrainNode {
                name: terrain.name.clone(),
                tile: Some(
                    terrain
                        .tile
                        .and_then(|position| tileset.tile(position))
                        .map_or(-1, |tile| i64::from(tile.id)),
                ),
                properties: deflate_properties(&terrain.properties),
            })
            .collect();

        let offset = (tileset.offset_x != 0 || tileset.offset_y != 0).then_some(TileOffsetNode {
            x: tileset.offset_x,
            y: tileset.offset_y,
        });

        TilesetNode {
            first_gid: tileset.first_gid,
            source: tileset.source.clone(),
            name: tileset.name.clone(),
            tile_width: Some(tileset.tile_width),
            tile_height: Some(tileset.tile_height),
            spacing: non_zero(tileset.spacing),
            margin: non_zero(tileset.margin),
            tile_count: Some(tileset.tile_count() as u32),
            columns: tileset.columns,
            tile_offset: offset,
            properties: deflate_properties(&tileset.properties),
            terrain_types: (!terrains.is_empty()).then_some(TerrainTypesNode { terrains }),
            tiles: tileset.tiles().iter().map(|tile| self.tile(tile)).collect(),
        }
    }

    fn tile(&self, tile: &Tile) -> TileNode {
        let corners = terrain::encode_terrain(&tile.terrain);
        TileNode {
            id: tile.id,
            tile_type: non_empty(&tile.tile_type),
            terrain: (!corners.is_empty()).then_some(corners),
            probability: (tile.probability != 1.0).then_some(tile.probability),
            properties: deflate_properties(&tile.properties),
            image: tile.image.as_ref().map(deflate_image),
            collision: tile.collision.as_ref().map(|g| self.object_group(g)),
            animation: tile.animation.as_ref().map(|animation| AnimationNode {
                frames: animation
                    .frames
                    .iter()
                    .filter_map(|frame| {
                        self.gid(frame.tile).map(|tile_id| FrameNode {
                            tile_id,
                            duration: frame.duration,
                        })
                    })
                    .collect(),
            }),
        }
    }

    fn tile_layer(&self, layer: &TileLayer) -> TileLayerNode {
        let rows: TileGrid = layer
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.and_then(|tile| self.gid(tile)).unwrap_or(EMPTY_CELL))
                    .collect()
            })
            .collect();
        let text = match self.options.encoding {
            DataEncoding::Csv => grid::encode_csv(&rows),
            DataEncoding::Base64 => grid::encode_base64(&rows),
        };

        TileLayerNode {
            name: layer.name.clone(),
            width: Some(layer.width()),
            height: Some(layer.height()),
            opacity: non_default(layer.opacity, 1.0),
            visible: (!layer.visible).then_some(false),
            offset_x: non_default(layer.offset_x, 0.0),
            offset_y: non_default(layer.offset_y, 0.0),
            properties: deflate_properties(&layer.properties),
            data: Some(DataNode {
                encoding: Some(self.options.encoding.as_str().to_string()),
                compression: None,
                text,
                tiles: Vec::new(),
            }),
        }
    }

    fn object_group(&self, group: &ObjectGroup) -> ObjectGroupNode {
        ObjectGroupNode {
            name: group.name.clone(),
            color: group.colour.map(|c| c.encode()),
            opacity: non_default(group.opacity, 1.0),
            visible: (!group.visible).then_some(false),
            offset_x: non_default(group.offset_x, 0.0),
            offset_y: non_default(group.offset_y, 0.0),
            draw_order: (group.draw_order != DrawOrder::TopDown)
                .then(|| group.draw_order.as_str().to_string()),
            properties: deflate_properties(&group.properties),
            objects: group.objects.iter().map(|o| self.object(o)).collect(),
        }
    }

    fn object(&self, object: &Object) -> ObjectNode {
        ObjectNode {
            id: Some(object.id),
            name: non_empty(&object.name),
            object_type: non_empty(&object.object_type),
            gid: object.tile.and_then(|tile| self.gid(tile)),
            x: Some(object.x),
            y: Some(object.y),
            width: non_default(object.width, 0.0),
            height: non_default(object.height, 0.0),
            rotation: non_default(object.rotation, 0.0),
            visible: (!object.visible).then_some(false),
            properties: deflate_properties(&object.properties),
            shape: deflate_shape(&object.shape),
        }
    }

    fn group(&self, group: &Group) -> GroupNode {
        GroupNode {
            name: group.name.clone(),
            opacity: non_default(group.opacity, 1.0),
            visible: (!group.visible).then_some(false),
            offset_x: non_default(group.offset_x, 0.0),
            offset_y: non_default(group.offset_y, 0.0),
            properties: deflate_properties(&group.properties),
            layers: group.tile_layers.iter().map(|l| self.tile_layer(l)).collect(),
            image_layers: group.image_layers.iter().map(deflate_image_layer).collect(),
            object_groups: group.object_groups.iter().map(|g| self.object_group(g)).collect(),
            groups: group.groups.iter().map(|g| self.group(g)).collect(),
        }
    }
}

fn deflate_shape(shape: &Shape) -> ShapeNode {
    match shape {
        Shape::Rectangle => ShapeNode::Rectangle,
        Shape::Ellipse => ShapeNode::Ellipse,
        Shape::Point => ShapeNode::Point,
        Shape::Polygon { points } => ShapeNode::Polygon {
            points: points::encode_points(points),
        },
        Shape::Polyline { points } => ShapeNode::Polyline {
            points: points::encode_points(points),
        },
        Shape::Text(text) => ShapeNode::Text(deflate_text(text)),
    }
}

fn deflate_text(text: &Text) -> TextNode {
    TextNode {
        font_family: (text.font_family != Text::DEFAULT_FONT).then(|| text.font_family.clone()),
        pixel_size: (text.pixel_size != Text::DEFAULT_PIXEL_SIZE).then_some(text.pixel_size),
        wrap: text.wrap.then_some(true),
        color: (text.colour != Colour::BLACK).then(|| text.colour.encode()),
        bold: text.bold.then_some(true),
        italic: text.italic.then_some(true),
        underline: text.underline.then_some(true),
        strikeout: text.strikeout.then_some(true),
        kerning: (!text.kerning).then_some(false),
        halign: (text.halign != HAlign::Left).then(|| text.halign.as_str().to_string()),
        valign: (text.valign != VAlign::Top).then(|| text.valign.as_str().to_string()),
        contents: text.contents.clone(),
    }
}

fn deflate_image(image: &Image) -> ImageNode {
    ImageNode {
        source: image.source.clone(),
        format: image.format.clone(),
        width: image.width,
        height: image.height,
        trans: image.transparent.map(|c| c.encode()),
    }
}

fn deflate_image_layer(layer: &ImageLayer) -> ImageLayerNode {
    ImageLayerNode {
        name: layer.name.clone(),
        opacity: non_default(layer.opacity, 1.0),
        visible: (!layer.visible).then_some(false),
        offset_x: non_default(layer.offset_x, 0.0),
        offset_y: non_default(layer.offset_y, 0.0),
        properties: deflate_properties(&layer.properties),
        image: layer.image.as_ref().map(deflate_image),
    }
}

pub(crate) fn deflate_properties(properties: &Properties) -> Vec<PropertyNode> {
    properties.iter().map(deflate_property).collect()
}

/// Strings carry no type tag. Multi-line values go into character data.
fn deflate_property(property: &Property) -> PropertyNode {
    let value = match property.value() {
        PropertyValue::String(s) | PropertyValue::File(s) => s.clone(),
        PropertyValue::Int(v) => v.to_string(),
        PropertyValue::Float(v) => v.to_string(),
        PropertyValue::Bool(v) => v.to_string(),
        PropertyValue::Colour(c) => c.encode(),
    };
    let property_type = match property.value() {
        PropertyValue::String(_) => None,
        other => Some(other.property_type().as_str().to_string()),
    };

    let (value, text) = if value.contains('\n') {
        (None, value)
    } else {
        (Some(value), String::new())
    };
    PropertyNode {
        name: property.name().to_string(),
        property_type,
        value,
        text,
    }
}

fn non_zero(value: u32) -> Option<u32> {
    (value != 0).then_some(value)
}

fn non_default(value: f64, default: f64) -> Option<f64> {
    (value != default).then_some(value)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
