//! Enumerated attribute values.
//!
//! Each type parses from and prints to the exact token used in TMX files.

use std::fmt;

/// Stagger axis of a staggered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StaggerAxis {
    #[default]
    X,
    Y,
}

impl StaggerAxis {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

/// Which rows or columns of a staggered map are shifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StaggerIndex {
    #[default]
    Even,
    Odd,
}

impl StaggerIndex {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "even" => Some(Self::Even),
            "odd" => Some(Self::Odd),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Even => "even",
            Self::Odd => "odd",
        }
    }
}

/// Map projection.
///
/// Stagger settings only exist for staggered maps, so they live inside that
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    #[default]
    Orthogonal,
    Isometric,
    Staggered {
        axis: StaggerAxis,
        index: StaggerIndex,
    },
}

impl Orientation {
    /// Staggered orientation with default axis (`x`) and index (`even`).
    pub const STAGGERED: Self = Self::Staggered {
        axis: StaggerAxis::X,
        index: StaggerIndex::Even,
    };

    /// Build from the `orientation`, `staggeraxis` and `staggerindex`
    /// attribute values. Unknown stagger values fall back to their defaults;
    /// an unknown orientation is `None`.
    pub fn from_attributes(
        orientation: &str,
        stagger_axis: Option<&str>,
        stagger_index: Option<&str>,
    ) -> Option<Self> {
        match orientation {
            "orthogonal" => Some(Self::Orthogonal),
            "isometric" => Some(Self::Isometric),
            "staggered" => Some(Self::Staggered {
                axis: stagger_axis.and_then(StaggerAxis::parse).unwrap_or_default(),
                index: stagger_index.and_then(StaggerIndex::parse).unwrap_or_default(),
            }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orthogonal => "orthogonal",
            Self::Isometric => "isometric",
            Self::Staggered { .. } => "staggered",
        }
    }

    pub fn stagger_axis(&self) -> Option<StaggerAxis> {
        match self {
            Self::Staggered { axis, .. } => Some(*axis),
            _ => None,
        }
    }

    pub fn stagger_index(&self) -> Option<StaggerIndex> {
        match self {
            Self::Staggered { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Order in which tiles are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RenderOrder {
    #[default]
    RightDown,
    RightUp,
    LeftDown,
    LeftUp,
}

impl RenderOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "right-down" => Some(Self::RightDown),
            "right-up" => Some(Self::RightUp),
            "left-down" => Some(Self::LeftDown),
            "left-up" => Some(Self::LeftUp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RightDown => "right-down",
            Self::RightUp => "right-up",
            Self::LeftDown => "left-down",
            Self::LeftUp => "left-up",
        }
    }
}

/// Drawing order of objects in an object group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DrawOrder {
    #[default]
    TopDown,
    Index,
}

impl DrawOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "topdown" => Some(Self::TopDown),
            "index" => Some(Self::Index),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopDown => "topdown",
            Self::Index => "index",
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HAlign {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VAlign {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

/// Type tag of a custom property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PropertyType {
    #[default]
    String,
    Int,
    Float,
    Bool,
    #[cfg_attr(feature = "serde", serde(rename = "color"))]
    Colour,
    File,
}

impl PropertyType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            "color" => Some(Self::Colour),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Colour => "color",
            Self::File => "file",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(
    StaggerAxis,
    StaggerIndex,
    Orientation,
    RenderOrder,
    DrawOrder,
    HAlign,
    VAlign,
    PropertyType,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_attributes() {
        assert_eq!(
            Orientation::from_attributes("isometric", None, None),
            Some(Orientation::Isometric)
        );
        assert_eq!(
            Orientation::from_attributes("staggered", Some("y"), Some("odd")),
            Some(Orientation::Staggered {
                axis: StaggerAxis::Y,
                index: StaggerIndex::Odd
            })
        );
        assert_eq!(
            Orientation::from_attributes("staggered", Some("z"), None),
            Some(Orientation::STAGGERED)
        );
        assert_eq!(Orientation::from_attributes("hexagonal", None, None), None);
    }

    #[test]
    fn test_stagger_accessors() {
        assert_eq!(Orientation::Orthogonal.stagger_axis(), None);
        assert_eq!(Orientation::STAGGERED.stagger_index(), Some(StaggerIndex::Even));
    }

    #[test]
    fn test_tokens_round_trip() {
        for order in [
            RenderOrder::RightDown,
            RenderOrder::RightUp,
            RenderOrder::LeftDown,
            RenderOrder::LeftUp,
        ] {
            assert_eq!(RenderOrder::parse(order.as_str()), Some(order));
        }
        for ty in [
            PropertyType::String,
            PropertyType::Int,
            PropertyType::Float,
            PropertyType::Bool,
            PropertyType::Colour,
            PropertyType::File,
        ] {
            assert_eq!(PropertyType::parse(&ty.to_string()), Some(ty));
        }
        assert_eq!(PropertyType::parse("object"), None);
    }
}
