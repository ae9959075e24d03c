//! Error types for tmx-codec.

use thiserror::Error;
use tmx_model::PropertyType;

/// Errors that can occur when decoding or encoding a map.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed document, missing or invalid attribute.
    #[error(transparent)]
    Xml(#[from] tmx_xml::Error),

    /// Malformed colour, point list or tile data.
    #[error(transparent)]
    Scalar(#[from] tmx_common::Error),

    /// Property value does not match its declared type.
    #[error("property {name:?} of type {kind} has invalid value {value:?}")]
    InvalidProperty {
        name: String,
        kind: PropertyType,
        value: String,
    },

    /// Tile data uses a compression this codec does not implement.
    #[error("unsupported tile data compression: {0}")]
    UnsupportedCompression(String),

    /// A size declared by the document is larger than the decoder allocates.
    #[error("{what} of {requested} exceeds the limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        requested: u64,
        limit: u64,
    },

    /// Tile data uses an unknown encoding.
    #[error("unsupported tile data encoding: {0}")]
    UnsupportedEncoding(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
