//! Parse XML text into an [`Element`] tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Element, Error, Result};

impl Element {
    /// Parse XML bytes into an element tree rooted at the document element.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let xml_str = std::str::from_utf8(xml).map_err(Error::Utf8)?;
        Self::parse_str(xml_str)
    }

    /// Parse XML text into an element tree rooted at the document element.
    ///
    /// Declarations, comments and processing instructions are skipped.
    /// Whitespace-only text between elements is dropped and remaining text is
    /// trimmed and unescaped.
    pub fn parse_str(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    stack.push(start_element(&e)?);
                }
                Ok(Event::Empty(e)) => {
                    let node = start_element(&e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    if let Some(node) = stack.pop() {
                        attach(&mut stack, &mut root, node)?;
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(node) = stack.last_mut() {
                        let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                        if !text.trim().is_empty() {
                            node.text.push_str(&text);
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {} // Declarations, comments, doctype, PIs
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "parse error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::Xml(format!("unclosed element <{}>", open.tag)));
        }

        root.ok_or(Error::NoRoot)
    }
}

/// Build an element (without children) from a start or empty tag.
fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut node = Element::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

/// Attach a finished element to its parent, or make it the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, node: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_some() {
        return Err(Error::Xml(format!(
            "multiple root elements (second is <{}>)",
            node.tag
        )));
    } else {
        *root = Some(node);
    }
    Ok(())
}
