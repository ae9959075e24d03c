//! Generic XML element tree for TMX documents.
//!
//! This crate turns XML bytes into a tree of labeled [`Element`]s (tag,
//! attributes, character data, children) and writes such a tree back out.
//! It knows nothing about the TMX schema; the codec layer maps elements to
//! typed document nodes using the attribute helpers on [`Element`].
//!
//! # Example
//!
//! ```
//! use tmx_xml::{Element, WriterConfig};
//!
//! let root = Element::new("map")
//!     .attr("width", "2")
//!     .child(Element::new("layer").attr("name", "ground"));
//!
//! let bytes = root.to_xml_bytes(&WriterConfig::default())?;
//! let parsed = Element::parse(&bytes)?;
//! assert_eq!(parsed, root);
//! # Ok::<(), tmx_xml::Error>(())
//! ```

mod element;
mod error;
mod reader;
mod writer;

pub use element::Element;
pub use error::{Error, Result};
pub use writer::WriterConfig;
