//! Error types for XML tree reading and writing.

use thiserror::Error;

/// Errors that can occur when parsing or writing an element tree, or when
/// reading typed values out of one.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Document has no root element.
    #[error("no root element found in XML")]
    NoRoot,

    /// Element had a different tag than required.
    #[error("expected <{expected}> element, found <{found}>")]
    UnexpectedElement { expected: String, found: String },

    /// Required attribute is absent.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// Attribute value could not be parsed as the expected type.
    #[error("<{element}> attribute '{attribute}' has invalid value {value:?}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },
}

/// Result type for XML tree operations.
pub type Result<T> = std::result::Result<T, Error>;
