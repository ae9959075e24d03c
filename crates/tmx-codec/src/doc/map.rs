use tmx_xml::Element;

use super::{
    properties_element, read_children, read_properties, string_attribute, GroupNode,
    ImageLayerNode, Node, ObjectGroupNode, PropertyNode, TileLayerNode, TilesetNode,
};
use crate::Result;

/// `<map>`: the document root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapNode {
    pub version: Option<String>,
    pub tiled_version: Option<String>,
    pub orientation: Option<String>,
    pub render_order: Option<String>,
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub hex_side_length: Option<u32>,
    pub stagger_axis: Option<String>,
    pub stagger_index: Option<String>,
    pub background_color: Option<String>,
    pub next_object_id: Option<u32>,
    pub properties: Vec<PropertyNode>,
    pub tilesets: Vec<TilesetNode>,
    pub layers: Vec<TileLayerNode>,
    pub image_layers: Vec<ImageLayerNode>,
    pub object_groups: Vec<ObjectGroupNode>,
    pub groups: Vec<GroupNode>,
}

impl Node for MapNode {
    const TAG: &'static str = "map";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            version: string_attribute(element, "version"),
            tiled_version: string_attribute(element, "tiledversion"),
            orientation: string_attribute(element, "orientation"),
            render_order: string_attribute(element, "renderorder"),
            width: element.parse_required("width")?,
            height: element.parse_required("height")?,
            tile_width: element.parse_required("tilewidth")?,
            tile_height: element.parse_required("tileheight")?,
            hex_side_length: element.parse_attribute("hexsidelength")?,
            stagger_axis: string_attribute(element, "staggeraxis"),
            stagger_index: string_attribute(element, "staggerindex"),
            background_color: string_attribute(element, "backgroundcolor")
                .filter(|s| !s.is_empty()),
            next_object_id: element.parse_attribute("nextobjectid")?,
            properties: read_properties(element)?,
            tilesets: read_children(element)?,
            layers: read_children(element)?,
            image_layers: read_children(element)?,
            object_groups: read_children(element)?,
            groups: read_children(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .opt_attr("version", self.version.as_deref())
            .opt_attr("tiledversion", self.tiled_version.as_deref())
            .opt_attr("orientation", self.orientation.as_deref())
            .opt_attr("renderorder", self.render_order.as_deref())
            .attr("width", self.width)
            .attr("height", self.height)
            .attr("tilewidth", self.tile_width)
            .attr("tileheight", self.tile_height)
            .opt_attr("hexsidelength", self.hex_side_length)
            .opt_attr("staggeraxis", self.stagger_axis.as_deref())
            .opt_attr("staggerindex", self.stagger_index.as_deref())
            .opt_attr("backgroundcolor", self.background_color.as_deref())
            .opt_attr("nextobjectid", self.next_object_id)
            .opt_child(properties_element(&self.properties))
            .children(self.tilesets.iter().map(Node::to_element))
            .children(self.layers.iter().map(Node::to_element))
            .children(self.image_layers.iter().map(Node::to_element))
            .children(self.object_groups.iter().map(Node::to_element))
            .children(self.groups.iter().map(Node::to_element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_required_size() {
        let element = Element::parse_str(r#"<map width="4" height="4" tilewidth="8"/>"#).unwrap();
        assert!(matches!(
            MapNode::from_element(&element),
            Err(Error::Xml(tmx_xml::Error::MissingAttribute { attribute, .. })) if attribute == "tileheight"
        ));
    }

    #[test]
    fn test_invalid_size() {
        let element =
            Element::parse_str(r#"<map width="x" height="4" tilewidth="8" tileheight="8"/>"#)
                .unwrap();
        assert!(matches!(
            MapNode::from_element(&element),
            Err(Error::Xml(tmx_xml::Error::InvalidAttribute { .. }))
        ));
    }

    #[test]
    fn test_root_must_be_map() {
        let element = Element::parse_str(r#"<tileset name="t"/>"#).unwrap();
        assert!(matches!(
            MapNode::from_element(&element),
            Err(Error::Xml(tmx_xml::Error::UnexpectedElement { .. }))
        ));
    }

    #[test]
    fn test_interleaved_layers_grouped_by_kind() {
        let xml = r#"
<map width="1" height="1" tilewidth="8" tileheight="8">
  <layer name="a"/>
  <objectgroup name="o"/>
  <layer name="b"/>
  <imagelayer name="i"/>
</map>"#;
        let node = MapNode::from_element(&Element::parse_str(xml).unwrap()).unwrap();
        let names: Vec<_> = node.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(node.object_groups.len(), 1);
        assert_eq!(node.image_layers.len(), 1);
    }
}
