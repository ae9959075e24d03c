//! Error types for tmx-common.

use thiserror::Error;

/// Errors raised while decoding a scalar text encoding.
#[derive(Debug, Error)]
pub enum Error {
    /// Hex colour could not be decoded.
    #[error("invalid colour {value:?}: {reason}")]
    InvalidColour { value: String, reason: &'static str },

    /// Point token was not an `x,y` integer pair.
    #[error("invalid point {0:?}: expected an \"x,y\" integer pair")]
    InvalidPoint(String),

    /// Tile grid cell was not a tile id.
    #[error("invalid tile id {0:?} in tile data")]
    InvalidTileId(String),

    /// Base64 decoding error.
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
