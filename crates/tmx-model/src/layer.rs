//! Tile layers, image layers and groups.

use tmx_common::Colour;

use crate::{ObjectGroup, Properties, TileRef};

/// Reference to an image file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Image {
    pub source: String,
    pub format: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Colour treated as transparent.
    pub transparent: Option<Colour>,
}

impl Image {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// A dense grid of tile references, stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileLayer {
    pub name: String,
    pub opacity: f64,
    pub visible: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub properties: Properties,
    width: u32,
    height: u32,
    cells: Vec<Option<TileRef>>,
}

impl TileLayer {
    /// Empty layer of the given size. Sizes below 1 are clamped to 1.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            name: name.into(),
            opacity: 1.0,
            visible: true,
            offset_x: 0.0,
            offset_y: 0.0,
            properties: Properties::new(),
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Tile at `(x, y)`; `None` for an empty cell or out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<TileRef> {
        self.index(x, y).and_then(|i| self.cells[i])
    }

    /// Set the tile at `(x, y)`. Returns `false` if out of bounds.
    pub fn put(&mut self, x: u32, y: u32, tile: Option<TileRef>) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = tile;
                true
            }
            None => false,
        }
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Option<TileRef>] {
        &self.cells
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<TileRef>]> {
        self.cells.chunks(self.width as usize)
    }

    /// Number of non-empty cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// A layer showing a single image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageLayer {
    pub name: String,
    pub opacity: f64,
    pub visible: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub properties: Properties,
    pub image: Option<Image>,
}

impl ImageLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            opacity: 1.0,
            visible: true,
            offset_x: 0.0,
            offset_y: 0.0,
            properties: Properties::new(),
            image: None,
        }
    }
}

/// A named container of layers and nested groups.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    pub name: String,
    pub opacity: f64,
    pub visible: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub properties: Properties,
    pub tile_layers: Vec<TileLayer>,
    pub image_layers: Vec<ImageLayer>,
    pub object_groups: Vec<ObjectGroup>,
    pub groups: Vec<Group>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            opacity: 1.0,
            visible: true,
            offset_x: 0.0,
            offset_y: 0.0,
            properties: Properties::new(),
            tile_layers: Vec::new(),
            image_layers: Vec::new(),
            object_groups: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Number of layers in this group and all nested groups.
    pub fn layer_count(&self) -> usize {
        self.tile_layers.len()
            + self.image_layers.len()
            + self.object_groups.len()
            + self.groups.iter().map(Group::layer_count).sum::<usize>()
    }

    /// Visit this group and every nested group, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Group)) {
        visit(self);
        for group in &self.groups {
            group.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_layer_bounds() {
        let mut layer = TileLayer::new("ground", 3, 2);
        assert_eq!(layer.cells().len(), 6);
        assert!(layer.put(2, 1, Some(TileRef::new(0, 4))));
        assert!(!layer.put(3, 0, Some(TileRef::new(0, 0))));
        assert!(!layer.put(0, 2, None));

        assert_eq!(layer.get(2, 1), Some(TileRef::new(0, 4)));
        assert_eq!(layer.get(0, 0), None);
        assert_eq!(layer.get(9, 9), None);
        assert_eq!(layer.cells()[5], Some(TileRef::new(0, 4)));
        assert_eq!(layer.tile_count(), 1);
    }

    #[test]
    fn test_tile_layer_rows() {
        let mut layer = TileLayer::new("l", 2, 3);
        layer.put(1, 2, Some(TileRef::new(1, 1)));
        let rows: Vec<_> = layer.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], &[None, Some(TileRef::new(1, 1))]);
    }

    #[test]
    fn test_tile_layer_clamped() {
        let layer = TileLayer::new("l", 0, 0);
        assert_eq!((layer.width(), layer.height()), (1, 1));
    }

    #[test]
    fn test_group_layer_count() {
        let mut inner = Group::new("inner");
        inner.image_layers.push(ImageLayer::new("sky"));
        let mut outer = Group::new("outer");
        outer.tile_layers.push(TileLayer::new("a", 1, 1));
        outer.groups.push(inner);
        assert_eq!(outer.layer_count(), 2);

        let mut names = Vec::new();
        outer.walk(&mut |g| names.push(g.name.as_str()));
        assert_eq!(names, ["outer", "inner"]);
    }
}
