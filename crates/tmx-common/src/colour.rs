//! RGBA colour type and its hex text encoding.
//!
//! TMX stores colours as `#AARRGGBB` or `#RRGGBB`. Decoding accepts both;
//! encoding always writes `#RRGGBB`, so alpha does not survive a round trip.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// An 8-bit per channel RGBA colour.
///
/// # Text Encoding
///
/// - Decode: optional leading `#`, then 6 or 8 hex digits (any case). The
///   rightmost 6 digits are `RRGGBB`; a leading pair, if present, is alpha.
///   Without an alpha pair the colour is opaque (`a = 255`).
/// - Encode: `#RRGGBB`, uppercase. Alpha is never written.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque colour.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a colour with an explicit alpha channel.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with alpha forced to opaque.
    ///
    /// This is what a colour looks like after an encode/decode round trip.
    #[inline]
    pub const fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    /// Decode a hex colour string.
    pub fn decode(s: &str) -> Result<Self, Error> {
        s.parse()
    }

    /// Encode as `#RRGGBB`.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Debug for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Colour(#{:02X}{:02X}{:02X}{:02X})",
            self.a, self.r, self.g, self.b
        )
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Colour {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| Error::InvalidColour {
            value: s.to_string(),
            reason,
        };

        let hex = s.trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("non-hex digit"));
        }
        if hex.len() < 6 {
            return Err(invalid("expected at least 6 hex digits"));
        }
        if hex.len() != 6 && hex.len() != 8 {
            return Err(invalid("expected 6 or 8 hex digits"));
        }

        // All bytes are ASCII hex digits, so byte offsets are char boundaries.
        let channel = |start: usize| -> Result<u8, Error> {
            u8::from_str_radix(&hex[start..start + 2], 16).map_err(|_| invalid("non-hex digit"))
        };

        let n = hex.len();
        Ok(Self {
            r: channel(n - 6)?,
            g: channel(n - 4)?,
            b: channel(n - 2)?,
            a: if n == 8 { channel(0)? } else { 255 },
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Colour {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Colour {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
