use tmx_xml::Element;

use super::{
    flag, properties_element, read_children, read_properties, ImageLayerNode, Node,
    ObjectGroupNode, PropertyNode, TileLayerNode,
};
use crate::Result;

/// `<group>`: nested layers and groups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupNode {
    pub name: String,
    pub opacity: Option<f64>,
    pub visible: Option<bool>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
    pub properties: Vec<PropertyNode>,
    pub layers: Vec<TileLayerNode>,
    pub image_layers: Vec<ImageLayerNode>,
    pub object_groups: Vec<ObjectGroupNode>,
    pub groups: Vec<GroupNode>,
}

impl Node for GroupNode {
    const TAG: &'static str = "group";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            name: element.attribute("name").unwrap_or_default().to_string(),
            opacity: element.parse_attribute("opacity")?,
            visible: element.bool_attribute("visible")?,
            offset_x: element.parse_attribute("offsetx")?,
            offset_y: element.parse_attribute("offsety")?,
            properties: read_properties(element)?,
            layers: read_children(element)?,
            image_layers: read_children(element)?,
            object_groups: read_children(element)?,
            groups: read_children(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .attr("name", &self.name)
            .opt_attr("opacity", self.opacity)
            .opt_attr("visible", self.visible.map(flag))
            .opt_attr("offsetx", self.offset_x)
            .opt_attr("offsety", self.offset_y)
            .opt_child(properties_element(&self.properties))
            .children(self.layers.iter().map(Node::to_element))
            .children(self.image_layers.iter().map(Node::to_element))
            .children(self.object_groups.iter().map(Node::to_element))
            .children(self.groups.iter().map(Node::to_element))
    }
}
