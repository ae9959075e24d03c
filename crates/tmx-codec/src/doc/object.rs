use tmx_xml::Element;

use super::{
    flag, properties_element, read_children, read_properties, string_attribute, Node,
    PropertyNode,
};
use crate::Result;

/// `<objectgroup>`, used both as a layer and for tile collision shapes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectGroupNode {
    pub name: String,
    pub color: Option<String>,
    pub opacity: Option<f64>,
    pub visible: Option<bool>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
    pub draw_order: Option<String>,
    pub properties: Vec<PropertyNode>,
    pub objects: Vec<ObjectNode>,
}

impl Node for ObjectGroupNode {
    const TAG: &'static str = "objectgroup";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            name: element.attribute("name").unwrap_or_default().to_string(),
            color: string_attribute(element, "color").filter(|s| !s.is_empty()),
            opacity: element.parse_attribute("opacity")?,
            visible: element.bool_attribute("visible")?,
            offset_x: element.parse_attribute("offsetx")?,
            offset_y: element.parse_attribute("offsety")?,
            draw_order: string_attribute(element, "draworder"),
            properties: read_properties(element)?,
            objects: read_children(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .attr_unless("name", self.name.as_str(), "")
            .opt_attr("color", self.color.as_deref())
            .opt_attr("opacity", self.opacity)
            .opt_attr("visible", self.visible.map(flag))
            .opt_attr("offsetx", self.offset_x)
            .opt_attr("offsety", self.offset_y)
            .opt_attr("draworder", self.draw_order.as_deref())
            .opt_child(properties_element(&self.properties))
            .children(self.objects.iter().map(Node::to_element))
    }
}

/// `<object>`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectNode {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub object_type: Option<String>,
    pub gid: Option<u32>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub visible: Option<bool>,
    pub properties: Vec<PropertyNode>,
    pub shape: ShapeNode,
}

impl Node for ObjectNode {
    const TAG: &'static str = "object";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            id: element.parse_attribute("id")?,
            name: string_attribute(element, "name"),
            object_type: string_attribute(element, "type")
                .or_else(|| string_attribute(element, "class")),
            gid: element.parse_attribute("gid")?,
            x: element.parse_attribute("x")?,
            y: element.parse_attribute("y")?,
            width: element.parse_attribute("width")?,
            height: element.parse_attribute("height")?,
            rotation: element.parse_attribute("rotation")?,
            visible: element.bool_attribute("visible")?,
            properties: read_properties(element)?,
            shape: ShapeNode::from_object(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .opt_attr("id", self.id)
            .opt_attr("name", self.name.as_deref())
            .opt_attr("type", self.object_type.as_deref())
            .opt_attr("gid", self.gid)
            .opt_attr("x", self.x)
            .opt_attr("y", self.y)
            .opt_attr("width", self.width)
            .opt_attr("height", self.height)
            .opt_attr("rotation", self.rotation)
            .opt_attr("visible", self.visible.map(flag))
            .opt_child(properties_element(&self.properties))
            .opt_child(self.shape.to_element())
    }
}

/// The shape child of an `<object>`. No child means a rectangle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ShapeNode {
    #[default]
    Rectangle,
    Ellipse,
    Point,
    Polygon { points: String },
    Polyline { points: String },
    Text(TextNode),
}

impl ShapeNode {
    /// Pick the variant from the first recognised child of an object.
    fn from_object(object: &Element) -> Result<Self> {
        for child in &object.children {
            let shape = match child.tag.as_str() {
                "ellipse" => Self::Ellipse,
                "point" => Self::Point,
                "polygon" => Self::Polygon {
                    points: child.required_attribute("points")?.to_string(),
                },
                "polyline" => Self::Polyline {
                    points: child.required_attribute("points")?.to_string(),
                },
                "text" => Self::Text(TextNode::from_element(child)?),
                _ => continue,
            };
            return Ok(shape);
        }
        Ok(Self::Rectangle)
    }

    fn to_element(&self) -> Option<Element> {
        match self {
            Self::Rectangle => None,
            Self::Ellipse => Some(Element::new("ellipse")),
            Self::Point => Some(Element::new("point")),
            Self::Polygon { points } => Some(Element::new("polygon").attr("points", points)),
            Self::Polyline { points } => Some(Element::new("polyline").attr("points", points)),
            Self::Text(text) => Some(text.to_element()),
        }
    }
}

/// `<text>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextNode {
    pub font_family: Option<String>,
    pub pixel_size: Option<u32>,
    pub wrap: Option<bool>,
    pub color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikeout: Option<bool>,
    pub kerning: Option<bool>,
    pub halign: Option<String>,
    pub valign: Option<String>,
    pub contents: String,
}

impl Node for TextNode {
    const TAG: &'static str = "text";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            font_family: string_attribute(element, "fontfamily"),
            pixel_size: element.parse_attribute("pixelsize")?,
            wrap: element.bool_attribute("wrap")?,
            color: string_attribute(element, "color").filter(|s| !s.is_empty()),
            bold: element.bool_attribute("bold")?,
            italic: element.bool_attribute("italic")?,
            underline: element.bool_attribute("underline")?,
            strikeout: element.bool_attribute("strikeout")?,
            kerning: element.bool_attribute("kerning")?,
            halign: string_attribute(element, "halign"),
            valign: string_attribute(element, "valign"),
            contents: element.text.clone(),
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .opt_attr("fontfamily", self.font_family.as_deref())
            .opt_attr("pixelsize", self.pixel_size)
            .opt_attr("wrap", self.wrap.map(flag))
            .opt_attr("color", self.color.as_deref())
            .opt_attr("bold", self.bold.map(flag))
            .opt_attr("italic", self.italic.map(flag))
            .opt_attr("underline", self.underline.map(flag))
            .opt_attr("strikeout", self.strikeout.map(flag))
            .opt_attr("kerning", self.kerning.map(flag))
            .opt_attr("halign", self.halign.as_deref())
            .opt_attr("valign", self.valign.as_deref())
            .text(self.contents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_object(xml: &str) -> ObjectNode {
        ObjectNode::from_element(&Element::parse_str(xml).unwrap()).unwrap()
    }

    #[test]
    fn test_shape_from_child() {
        assert_eq!(
            parse_object(r#"<object id="1" x="0" y="0" width="8" height="8"/>"#).shape,
            ShapeNode::Rectangle
        );
        assert_eq!(
            parse_object(r#"<object id="2"><ellipse/></object>"#).shape,
            ShapeNode::Ellipse
        );
        assert_eq!(
            parse_object(r#"<object id="3"><polyline points="0,0 4,-2"/></object>"#).shape,
            ShapeNode::Polyline {
                points: "0,0 4,-2".to_string()
            }
        );

        let object = parse_object(
            r#"<object id="4"><properties/><text wrap="1" halign="center">Hi there</text></object>"#,
        );
        match object.shape {
            ShapeNode::Text(text) => {
                assert_eq!(text.wrap, Some(true));
                assert_eq!(text.halign.as_deref(), Some("center"));
                assert_eq!(text.contents, "Hi there");
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_polygon_requires_points() {
        let element = Element::parse_str(r#"<object><polygon/></object>"#).unwrap();
        assert!(ObjectNode::from_element(&element).is_err());
    }

    #[test]
    fn test_write_object() {
        let node = ObjectNode {
            id: Some(5),
            gid: Some(3),
            x: Some(1.5),
            y: Some(2.0),
            shape: ShapeNode::Polygon {
                points: "0,0 1,1".to_string(),
            },
            ..ObjectNode::default()
        };
        let element = node.to_element();
        assert_eq!(element.attribute("x"), Some("1.5"));
        assert_eq!(element.attribute("y"), Some("2"));
        assert_eq!(element.children[0].tag, "polygon");
        assert_eq!(ObjectNode::from_element(&element).unwrap(), node);
    }
}
