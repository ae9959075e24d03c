use tmx_xml::Element;

use super::{read_children, string_attribute, Node};
use crate::Result;

/// `<property name=".." type=".." value=".."/>`
///
/// Multi-line values are stored as character data instead of the `value`
/// attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyNode {
    pub name: String,
    pub property_type: Option<String>,
    pub value: Option<String>,
    pub text: String,
}

impl PropertyNode {
    /// The value attribute, or the character data when it is absent.
    pub fn raw_value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.text)
    }
}

impl Node for PropertyNode {
    const TAG: &'static str = "property";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            name: element.required_attribute("name")?.to_string(),
            property_type: string_attribute(element, "type"),
            value: string_attribute(element, "value"),
            text: element.text.clone(),
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .attr("name", &self.name)
            .opt_attr("type", self.property_type.as_deref())
            .opt_attr("value", self.value.as_deref())
            .text(self.text.clone())
    }
}

/// `<properties>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertiesNode {
    pub properties: Vec<PropertyNode>,
}

impl Node for PropertiesNode {
    const TAG: &'static str = "properties";

    fn from_element(element: &Element) -> Result<Self> {
        element.expect_tag(Self::TAG)?;
        Ok(Self {
            properties: read_children(element)?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG).children(self.properties.iter().map(Node::to_element))
    }
}
