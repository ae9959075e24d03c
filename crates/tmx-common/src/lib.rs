//! Common types and scalar codecs for TMX tile maps.
//!
//! The TMX format embeds several small text encodings inside XML attributes
//! and character data. This crate holds the stateless codecs for them:
//!
//! - [`Colour`] - `#RRGGBB` / `#AARRGGBB` hex colours
//! - [`Point`] and [`points`] - space separated `x,y` point lists
//! - [`terrain`] - four-corner terrain index strings
//! - [`grid`] - CSV and base64 tile id grids

mod colour;
mod error;

pub mod grid;
pub mod points;
pub mod terrain;

pub use colour::Colour;
pub use error::{Error, Result};
pub use points::Point;
pub use terrain::TerrainCorners;
