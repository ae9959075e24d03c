//! Document tree: one node type per TMX element.
//!
//! Nodes mirror the XML schema field for field. Required attributes are
//! plain fields, optional attributes and children are `Option`s, repeated
//! children are `Vec`s. Encoded values (colours, point lists, terrain
//! corners, tile data) are kept as their raw text; decoding them and
//! resolving the ids they contain is the job of the inflate pass.

mod group;
mod layer;
mod map;
mod object;
mod property;
mod tileset;

pub use group::GroupNode;
pub use layer::{DataNode, DataTileNode, ImageLayerNode, ImageNode, TileLayerNode};
pub use map::MapNode;
pub use object::{ObjectGroupNode, ObjectNode, ShapeNode, TextNode};
pub use property::{PropertiesNode, PropertyNode};
pub use tileset::{
    AnimationNode, FrameNode, TerrainNode, TerrainTypesNode, TileNode, TileOffsetNode, TilesetNode,
};

use tmx_xml::Element;

use crate::Result;

/// A document node that maps to exactly one XML element.
pub trait Node: Sized {
    /// Tag name of the element.
    const TAG: &'static str;

    /// Read the node from an element with tag [`Self::TAG`].
    fn from_element(element: &Element) -> Result<Self>;

    /// Build the element for this node.
    fn to_element(&self) -> Element;
}

/// Read every child with the node's tag, in document order.
pub(crate) fn read_children<T: Node>(element: &Element) -> Result<Vec<T>> {
    element.find_all(T::TAG).map(T::from_element).collect()
}

/// Read the first child with the node's tag.
pub(crate) fn read_child<T: Node>(element: &Element) -> Result<Option<T>> {
    element.find(T::TAG).map(T::from_element).transpose()
}

/// Read the properties of an element from its `<properties>` child.
pub(crate) fn read_properties(element: &Element) -> Result<Vec<PropertyNode>> {
    Ok(read_child::<PropertiesNode>(element)?
        .map(|node| node.properties)
        .unwrap_or_default())
}

/// The `<properties>` element for a list of properties, if non-empty.
pub(crate) fn properties_element(properties: &[PropertyNode]) -> Option<Element> {
    (!properties.is_empty()).then(|| {
        PropertiesNode {
            properties: properties.to_vec(),
        }
        .to_element()
    })
}

/// Owned copy of an optional attribute.
pub(crate) fn string_attribute(element: &Element, key: &str) -> Option<String> {
    element.attribute(key).map(str::to_string)
}

/// TMX writes booleans as `1` and `0`.
pub(crate) fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
