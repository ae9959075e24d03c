//! Write options.

use std::fmt;
use std::str::FromStr;

use tmx_xml::WriterConfig;

use crate::Error;

/// Encoding of layer tile data on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataEncoding {
    /// Comma separated global ids, one row per line.
    #[default]
    Csv,
    /// The CSV text, base64 encoded.
    Base64,
}

impl DataEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Base64 => "base64",
        }
    }
}

impl fmt::Display for DataEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "base64" => Ok(Self::Base64),
            other => Err(Error::UnsupportedEncoding(other.to_string())),
        }
    }
}

/// Options controlling how a map is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level; `0` disables indentation.
    pub indent: usize,
    /// Tile data encoding.
    pub encoding: DataEncoding,
    /// Emit the XML declaration.
    pub declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            encoding: DataEncoding::Csv,
            declaration: true,
        }
    }
}

impl WriteOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_encoding(mut self, encoding: DataEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    pub(crate) fn writer_config(&self) -> WriterConfig {
        WriterConfig {
            indent: self.indent,
            declaration: self.declaration,
        }
    }
}
