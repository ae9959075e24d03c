use tmx_xml::Element;

use super::{
    flag, properties_element, read_child, read_children, read_properties, string_attribute, Node,
    PropertyNode,
};
use crate::Result;

/// `<image source=".."/>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageNode {
    pub source: String,
    pub format: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Transparent colour, hex encoded.
    pub trans: Option<String>,
}

impl Node for ImageNode {
    const TAG: &'static str = "image";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            source: element.attribute("source").unwrap_or_default().to_string(),
            format: string_attribute(element, "format"),
            width: element.parse_attribute("width")?,
            height: element.parse_attribute("height")?,
            trans: string_attribute(element, "trans").filter(|s| !s.is_empty()),
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .opt_attr("format", self.format.as_deref())
            .attr("source", &self.source)
            .opt_attr("trans", self.trans.as_deref())
            .opt_attr("width", self.width)
            .opt_attr("height", self.height)
    }
}

/// `<layer>`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileLayerNode {
    pub name: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub opacity: Option<f64>,
    pub visible: Option<bool>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
    pub properties: Vec<PropertyNode>,
    pub data: Option<DataNode>,
}

impl Node for TileLayerNode {
    const TAG: &'static str = "layer";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            name: element.attribute("name").unwrap_or_default().to_string(),
            width: element.parse_attribute("width")?,
            height: element.parse_attribute("height")?,
            opacity: element.parse_attribute("opacity")?,
            visible: element.bool_attribute("visible")?,
            offset_x: element.parse_attribute("offsetx")?,
            offset_y: element.parse_attribute("offsety")?,
            properties: read_properties(element)?,
            data: read_child(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .attr("name", &self.name)
            .opt_attr("width", self.width)
            .opt_attr("height", self.height)
            .opt_attr("opacity", self.opacity)
            .opt_attr("visible", self.visible.map(flag))
            .opt_attr("offsetx", self.offset_x)
            .opt_attr("offsety", self.offset_y)
            .opt_child(properties_element(&self.properties))
            .opt_child(self.data.as_ref().map(Node::to_element))
    }
}

/// `<data>`: tile ids as CSV or base64 text, or as `<tile gid>` children
/// when no encoding is given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataNode {
    pub encoding: Option<String>,
    pub compression: Option<String>,
    pub text: String,
    pub tiles: Vec<DataTileNode>,
}

impl Node for DataNode {
    const TAG: &'static str = "data";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            encoding: string_attribute(element, "encoding").filter(|s| !s.is_empty()),
            compression: string_attribute(element, "compression").filter(|s| !s.is_empty()),
            text: element.text.clone(),
            tiles: read_children(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .opt_attr("encoding", self.encoding.as_deref())
            .opt_attr("compression", self.compression.as_deref())
            .text(self.text.clone())
            .children(self.tiles.iter().map(Node::to_element))
    }
}

/// `<tile gid=".."/>` inside an unencoded `<data>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataTileNode {
    pub gid: u32,
}

impl Node for DataTileNode {
    const TAG: &'static str = "tile";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            gid: element.parse_attribute("gid")?.unwrap_or(0),
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG).attr("gid", self.gid)
    }
}

/// `<imagelayer>`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageLayerNode {
    pub name: String,
    pub opacity: Option<f64>,
    pub visible: Option<bool>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
    pub properties: Vec<PropertyNode>,
    pub image: Option<ImageNode>,
}

impl Node for ImageLayerNode {
    const TAG: &'static str = "imagelayer";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            name: element.attribute("name").unwrap_or_default().to_string(),
            opacity: element.parse_attribute("opacity")?,
            visible: element.bool_attribute("visible")?,
            offset_x: element.parse_attribute("offsetx")?,
            offset_y: element.parse_attribute("offsety")?,
            properties: read_properties(element)?,
            image: read_child(element)?,
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
            .opt_child(self.image.as_ref().map(Node::to_element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_layer() {
        let xml = r#"
<layer name="ground" width="2" height="2" visible="0" opacity="0.5" offsetx="3" offsety="-1.5">
  <properties><property name="solid" type="bool" value="true"/></properties>
  <data encoding="csv">
1,0,
0,2
  </data>
</layer>"#;
        let node = TileLayerNode::from_element(&Element::parse_str(xml).unwrap()).unwrap();
        assert_eq!(node.visible, Some(false));
        assert_eq!(node.opacity, Some(0.5));
        assert_eq!(node.offset_x, Some(3.0));
        assert_eq!(node.offset_y, Some(-1.5));
        assert_eq!(node.properties.len(), 1);

        let data = node.data.unwrap();
        assert_eq!(data.encoding.as_deref(), Some("csv"));
        assert_eq!(data.text, "1,0,\n0,2");
        assert!(data.tiles.is_empty());
    }

    #[test]
    fn test_read_unencoded_data() {
        let xml = r#"<data><tile gid="3"/><tile/><tile gid="1"/></data>"#;
        let node = DataNode::from_element(&Element::parse_str(xml).unwrap()).unwrap();
        assert_eq!(node.encoding, None);
        let gids: Vec<_> = node.tiles.iter().map(|t| t.gid).collect();
        assert_eq!(gids, [3, 0, 1]);
    }

    #[test]
    fn test_write_visible_flag() {
        let node = ImageLayerNode {
            name: "sky".to_string(),
            visible: Some(false),
            image: Some(ImageNode {
                source: "sky.png".to_string(),
                ..ImageNode::default()
            }),
            ..ImageLayerNode::default()
        };
        let element = node.to_element();
        assert_eq!(element.attribute("visible"), Some("0"));
        assert_eq!(ImageLayerNode::from_element(&element).unwrap(), node);
    }
}
