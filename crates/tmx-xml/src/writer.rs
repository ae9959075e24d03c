//! Write an [`Element`] tree as XML text.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Element, Error, Result};

/// Output settings for [`Element::write_xml`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    /// Spaces per nesting level; `0` writes everything on one line.
    pub indent: usize,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` first.
    pub declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: true,
        }
    }
}

impl Element {
    /// Convert to XML bytes.
    pub fn to_xml_bytes(&self, config: &WriterConfig) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_xml(&mut output, config)?;
        Ok(output)
    }

    /// Convert to an XML string.
    pub fn to_xml_string(&self, config: &WriterConfig) -> Result<String> {
        let bytes = self.to_xml_bytes(config)?;
        String::from_utf8(bytes).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Write XML to a writer.
    pub fn write_xml<W: Write>(&self, writer: W, config: &WriterConfig) -> Result<()> {
        let mut xml_writer = if config.indent > 0 {
            Writer::new_with_indent(writer, b' ', config.indent)
        } else {
            Writer::new(writer)
        };

        if config.declaration {
            xml_writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }

        write_element(&mut xml_writer, self)
    }
}

/// Write a single element and its children.
fn write_element<W: Write>(writer: &mut Writer<W>, node: &Element) -> Result<()> {
    if node.tag.is_empty() {
        return Err(Error::Xml("element with empty tag name".to_string()));
    }

    let mut elem = BytesStart::new(node.tag.as_str());
    for (key, value) in &node.attributes {
        elem.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_empty() {
        writer
            .write_event(Event::Empty(elem))
            .map_err(|e| Error::Xml(e.to_string()))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::Xml(e.to_string()))?;

    if !node.text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&node.text)))
            .map_err(|e| Error::Xml(e.to_string()))?;
    }

    for child in &node.children {
        write_element(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(node.tag.as_str())))
        .map_err(|e| Error::Xml(e.to_string()))?;

    Ok(())
}
