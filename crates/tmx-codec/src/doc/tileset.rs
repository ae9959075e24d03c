use tmx_xml::Element;

use super::{
    properties_element, read_child, read_children, read_properties, string_attribute, ImageNode,
    Node, ObjectGroupNode, PropertyNode,
};
use crate::Result;

/// `<tileset>`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TilesetNode {
    pub first_gid: u32,
    pub source: Option<String>,
    pub name: String,
    pub tile_width: Option<u32>,
    pub tile_height: Option<u32>,
    pub spacing: Option<u32>,
    pub margin: Option<u32>,
    pub tile_count: Option<u32>,
    pub columns: Option<u32>,
    pub tile_offset: Option<TileOffsetNode>,
    pub properties: Vec<PropertyNode>,
    pub terrain_types: Option<TerrainTypesNode>,
    pub tiles: Vec<TileNode>,
}

impl Node for TilesetNode {
    const TAG: &'static str = "tileset";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            first_gid: element.parse_attribute("firstgid")?.unwrap_or(1),
            source: string_attribute(element, "source"),
            name: element.attribute("name").unwrap_or_default().to_string(),
            tile_width: element.parse_attribute("tilewidth")?,
            tile_height: element.parse_attribute("tileheight")?,
            spacing: element.parse_attribute("spacing")?,
            margin: element.parse_attribute("margin")?,
            tile_count: element.parse_attribute("tilecount")?,
            columns: element.parse_attribute("columns")?,
            tile_offset: read_child(element)?,
            properties: read_properties(element)?,
            terrain_types: read_child(element)?,
            tiles: read_children(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .attr("firstgid", self.first_gid)
            .opt_attr("source", self.source.as_deref())
            .attr_unless("name", self.name.as_str(), "")
            .opt_attr("tilewidth", self.tile_width)
            .opt_attr("tileheight", self.tile_height)
            .opt_attr("spacing", self.spacing)
            .opt_attr("margin", self.margin)
            .opt_attr("tilecount", self.tile_count)
            .opt_attr("columns", self.columns)
            .opt_child(self.tile_offset.as_ref().map(Node::to_element))
            .opt_child(properties_element(&self.properties))
            .opt_child(self.terrain_types.as_ref().map(Node::to_element))
            .children(self.tiles.iter().map(Node::to_element))
    }
}

/// `<tileoffset x=".." y=".."/>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileOffsetNode {
    pub x: i32,
    pub y: i32,
}

impl Node for TileOffsetNode {
    const TAG: &'static str = "tileoffset";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            x: element.parse_attribute("x")?.unwrap_or(0),
            y: element.parse_attribute("y")?.unwrap_or(0),
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG).attr("x", self.x).attr("y", self.y)
    }
}

/// `<terraintypes>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerrainTypesNode {
    pub terrains: Vec<TerrainNode>,
}

impl Node for TerrainTypesNode {
    const TAG: &'static str = "terraintypes";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            terrains: read_children(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG).children(self.terrains.iter().map(Node::to_element))
    }
}

/// `<terrain name=".." tile=".."/>`
///
/// `tile` is a local tile id in the enclosing tileset; `-1` means none.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerrainNode {
    pub name: String,
    pub tile: Option<i64>,
    pub properties: Vec<PropertyNode>,
}

impl Node for TerrainNode {
    const TAG: &'static str = "terrain";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            name: element.attribute("name").unwrap_or_default().to_string(),
            tile: element.parse_attribute("tile")?,
            properties: read_properties(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .attr("name", &self.name)
            .opt_attr("tile", self.tile)
            .opt_child(properties_element(&self.properties))
    }
}

/// `<tile id="..">`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileNode {
    pub id: u32,
    pub tile_type: Option<String>,
    pub terrain: Option<String>,
    pub probability: Option<f64>,
    pub properties: Vec<PropertyNode>,
    pub image: Option<ImageNode>,
    pub collision: Option<ObjectGroupNode>,
    pub animation: Option<AnimationNode>,
}

impl Node for TileNode {
    const TAG: &'static str = "tile";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            id: element.parse_required("id")?,
            // Newer editors write `class` instead of `type`.
            tile_type: string_attribute(element, "type")
                .or_else(|| string_attribute(element, "class")),
            terrain: string_attribute(element, "terrain"),
            probability: element.parse_attribute("probability")?,
            properties: read_properties(element)?,
            image: read_child(element)?,
            collision: read_child(element)?,
            animation: read_child(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .attr("id", self.id)
            .opt_attr("type", self.tile_type.as_deref())
            .opt_attr("terrain", self.terrain.as_deref())
            .opt_attr("probability", self.probability)
            .opt_child(properties_element(&self.properties))
            .opt_child(self.image.as_ref().map(Node::to_element))
            .opt_child(self.collision.as_ref().map(Node::to_element))
            .opt_child(self.animation.as_ref().map(Node::to_element))
    }
}

/// `<animation>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnimationNode {
    pub frames: Vec<FrameNode>,
}

impl Node for AnimationNode {
    const TAG: &'static str = "animation";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            frames: read_children(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG).children(self.frames.iter().map(Node::to_element))
    }
}

/// `<frame tileid=".." duration=".."/>`; `tileid` is a global tile id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameNode {
    pub tile_id: u32,
    pub duration: u32,
}

impl Node for FrameNode {
    const TAG: &'static str = "frame";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            tile_id: element.parse_required("tileid")?,
            duration: element.parse_attribute("duration")?.unwrap_or(0),
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .attr("tileid", self.tile_id)
            .attr("duration", self.duration)
    }
}
