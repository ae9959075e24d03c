//! Labeled element tree.

use std::str::FromStr;

use crate::{Error, Result};

/// One XML element: tag, attributes in document order, character data and
/// child elements.
///
/// Construction uses a consuming builder style so trees can be written as
/// nested expressions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name of the element.
    pub tag: String,
    /// Attributes as key-value pairs.
    pub attributes: Vec<(String, String)>,
    /// Character data (trimmed, unescaped).
    pub text: String,
    /// Child elements.
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the character data of this element.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    /// Add an attribute only when a value is present.
    pub fn opt_attr<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    /// Add an attribute unless it equals its default value.
    pub fn attr_unless<V: ToString + PartialEq>(
        self,
        key: impl Into<String>,
        value: V,
        default: V,
    ) -> Self {
        if value == default {
            self
        } else {
            self.attr(key, value)
        }
    }

    /// Add a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Add a child element when present.
    pub fn opt_child(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    /// Add multiple children.
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Fail unless this element has the given tag.
    pub fn expect_tag(&self, tag: &str) -> Result<()> {
        if self.tag == tag {
            Ok(())
        } else {
            Err(Error::UnexpectedElement {
                expected: tag.to_string(),
                found: self.tag.clone(),
            })
        }
    }

    /// Raw value of an attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Raw value of an attribute that must be present.
    pub fn required_attribute(&self, key: &str) -> Result<&str> {
        self.attribute(key).ok_or_else(|| Error::MissingAttribute {
            element: self.tag.clone(),
            attribute: key.to_string(),
        })
    }

    /// Parse an optional attribute.
    ///
    /// Absent and empty attributes are both `None`.
    pub fn parse_attribute<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.attribute(key) {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| self.invalid(key, raw)),
        }
    }

    /// Parse an attribute that must be present.
    pub fn parse_required<T: FromStr>(&self, key: &str) -> Result<T> {
        let raw = self.required_attribute(key)?;
        raw.trim().parse().map_err(|_| self.invalid(key, raw))
    }

    /// Parse an optional flag attribute written as `0`/`1` (or `false`/`true`).
    pub fn bool_attribute(&self, key: &str) -> Result<Option<bool>> {
        match self.attribute(key).map(str::trim) {
            None | Some("") => Ok(None),
            Some("1") | Some("true") => Ok(Some(true)),
            Some("0") | Some("false") => Ok(Some(false)),
            Some(raw) => Err(self.invalid(key, raw)),
        }
    }

    /// First child with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All children with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    fn invalid(&self, key: &str, raw: &str) -> Error {
        Error::InvalidAttribute {
            element: self.tag.clone(),
            attribute: key.to_string(),
            value: raw.to_string(),
        }
    }
}
