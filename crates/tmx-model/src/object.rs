//! Object groups and the objects they hold.

use tmx_common::{Colour, Point};

use crate::{DrawOrder, HAlign, Properties, TileRef, VAlign};

/// Geometry of an object. Which variant applies is decided by which child
/// element the object carries; no child means a rectangle.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Shape {
    #[default]
    Rectangle,
    Ellipse,
    Point,
    Polygon { points: Vec<Point> },
    Polyline { points: Vec<Point> },
    Text(Text),
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Point => "point",
            Self::Polygon { .. } => "polygon",
            Self::Polyline { .. } => "polyline",
            Self::Text(_) => "text",
        }
    }

    /// Vertices of a polygon or polyline, relative to the object position.
    pub fn points(&self) -> Option<&[Point]> {
        match self {
            Self::Polygon { points } | Self::Polyline { points } => Some(points),
            _ => None,
        }
    }
}

/// A text object's content and formatting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text {
    pub font_family: String,
    pub pixel_size: u32,
    pub colour: Colour,
    pub wrap: bool,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
    pub kerning: bool,
    pub halign: HAlign,
    pub valign: VAlign,
    pub contents: String,
}

impl Text {
    pub const DEFAULT_FONT: &'static str = "sans-serif";
    pub const DEFAULT_PIXEL_SIZE: u32 = 16;

    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            ..Self::default()
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self {
            font_family: Self::DEFAULT_FONT.to_string(),
            pixel_size: Self::DEFAULT_PIXEL_SIZE,
            colour: Colour::BLACK,
            wrap: false,
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
            kerning: true,
            halign: HAlign::Left,
            valign: VAlign::Top,
            contents: String::new(),
        }
    }
}

/// A free-placed object.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Object {
    pub id: u32,
    pub name: String,
    pub object_type: String,
    /// Tile drawn for a tile object.
    pub tile: Option<TileRef>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    pub visible: bool,
    pub properties: Properties,
    pub shape: Shape,
}

impl Default for Object {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            object_type: String::new(),
            tile: None,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            visible: true,
            properties: Properties::new(),
            shape: Shape::Rectangle,
        }
    }
}

impl Object {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }
}

/// A layer of objects, also used for per-tile collision shapes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectGroup {
    pub name: String,
    pub colour: Option<Colour>,
    pub opacity: f64,
    pub visible: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub draw_order: DrawOrder,
    pub properties: Properties,
    pub objects: Vec<Object>,
}

impl Default for ObjectGroup {
    fn default() -> Self {
        Self {
            name: String::new(),
            colour: None,
            opacity: 1.0,
            visible: true,
            offset_x: 0.0,
            offset_y: 0.0,
            draw_order: DrawOrder::TopDown,
            properties: Properties::new(),
            objects: Vec::new(),
        }
    }
}

impl ObjectGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Highest object id in the group, if any.
    pub fn max_object_id(&self) -> Option<u32> {
        self.objects.iter().map(|o| o.id).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_points() {
        let shape = Shape::Polygon {
            points: vec![Point::new(0, 0), Point::new(4, -2)],
        };
        assert_eq!(shape.points().map(<[Point]>::len), Some(2));
        assert_eq!(shape.name(), "polygon");
        assert!(Shape::Ellipse.points().is_none());
    }

    #[test]
    fn test_text_defaults() {
        let text = Text::new("hello");
        assert_eq!(text.font_family, "sans-serif");
        assert_eq!(text.pixel_size, 16);
        assert!(text.kerning);
        assert_eq!(text.colour, Colour::BLACK);
    }

    #[test]
    fn test_max_object_id() {
        let mut group = ObjectGroup::new("things");
        assert_eq!(group.max_object_id(), None);
        group.objects.push(Object::new(3, 0.0, 0.0));
        group.objects.push(Object::new(11, 1.0, 1.0).with_shape(Shape::Point));
        assert_eq!(group.max_object_id(), Some(11));
    }
}
