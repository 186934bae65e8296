use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coord::Coordinate;
use crate::error::{Error, Result};

/// Global tile identifier. `0` conventionally marks an empty cell.
pub type TileId = u32;

/// Tile id reported for empty cells and unknown layers.
pub const EMPTY_TILE: TileId = 0;

/// Grid topology of a tile map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Orthogonal,
    Hexagonal,
    Isometric,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Orientation::Orthogonal => "orthogonal",
            Orientation::Hexagonal => "hexagonal",
            Orientation::Isometric => "isometric",
        };
        f.write_str(value)
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "orthogonal" => Ok(Orientation::Orthogonal),
            "hexagonal" => Ok(Orientation::Hexagonal),
            "isometric" => Ok(Orientation::Isometric),
            _ => Err(Error::UnknownOrientation {
                value: value.to_string(),
            }),
        }
    }
}

/// Read-only view of a tile map consumed by the path finder.
///
/// Implementations are expected to answer every query in constant time and
/// without side effects. Engines that already own their map data implement
/// this trait directly; [`TileMap`] is the in-memory implementation shipped
/// with the crate.
pub trait TileMapSource {
    fn orientation(&self) -> Orientation;

    /// Map width in cells.
    fn width(&self) -> i32;

    /// Map height in cells.
    fn height(&self) -> i32;

    /// Layer names in stacking order.
    fn layers(&self) -> Vec<String>;

    /// Tile id at `coord` on `layer`; [`EMPTY_TILE`] for empty cells, unknown
    /// layers and out-of-range coordinates.
    fn tile_id_at(&self, layer: &str, coord: Coordinate) -> TileId;

    fn has_layer(&self, layer: &str) -> bool {
        self.layers().iter().any(|name| name == layer)
    }

    fn contains(&self, coord: Coordinate) -> bool {
        coord.within(self.width(), self.height())
    }
}

impl<T: TileMapSource + ?Sized> TileMapSource for &T {
    fn orientation(&self) -> Orientation {
        (**self).orientation()
    }

    fn width(&self) -> i32 {
        (**self).width()
    }

    fn height(&self) -> i32 {
        (**self).height()
    }

    fn layers(&self) -> Vec<String> {
        (**self).layers()
    }

    fn tile_id_at(&self, layer: &str, coord: Coordinate) -> TileId {
        (**self).tile_id_at(layer, coord)
    }

    fn has_layer(&self, layer: &str) -> bool {
        (**self).has_layer(layer)
    }
}

/// A single named layer of row-major tile ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    pub tiles: Vec<TileId>,
}

/// Serialized form of a [`TileMap`].
#[derive(Debug, Clone, Deserialize)]
struct TileMapDocument {
    orientation: Orientation,
    width: i32,
    height: i32,
    #[serde(default)]
    layers: Vec<TileLayer>,
}

/// In-memory tile map with any number of stacked layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    orientation: Orientation,
    width: i32,
    height: i32,
    layers: Vec<TileLayer>,
    index: HashMap<String, usize>,
}

impl TileMap {
    /// Create an empty map without layers.
    pub fn new(orientation: Orientation, width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidMap {
                message: format!("dimensions must be positive, got {width}x{height}"),
            });
        }
        Ok(Self {
            orientation,
            width,
            height,
            layers: Vec::new(),
            index: HashMap::new(),
        })
    }

    /// Append a layer filled with `fill`.
    pub fn with_filled_layer(self, name: impl Into<String>, fill: TileId) -> Result<Self> {
        let tiles = vec![fill; self.cell_count()];
        self.with_layer(name, tiles)
    }

    /// Append a layer from row-major tile ids.
    pub fn with_layer(mut self, name: impl Into<String>, tiles: Vec<TileId>) -> Result<Self> {
        self.push_layer(TileLayer {
            name: name.into(),
            tiles,
        })?;
        Ok(self)
    }

    /// Overwrite a single tile. Returns `false` when the layer is unknown or
    /// the coordinate lies outside the map.
    pub fn set_tile(&mut self, layer: &str, coord: Coordinate, tile: TileId) -> bool {
        let Some(offset) = self.offset(coord) else {
            return false;
        };
        match self.index.get(layer) {
            Some(&layer_index) => {
                self.layers[layer_index].tiles[offset] = tile;
                true
            }
            None => false,
        }
    }

    /// Parse a map from its JSON document form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: TileMapDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Borrow the layers in stacking order.
    pub fn tile_layers(&self) -> &[TileLayer] {
        &self.layers
    }

    /// Distinct non-empty tile ids used anywhere on the map, ascending.
    pub fn distinct_tile_ids(&self) -> Vec<TileId> {
        self.layers
            .iter()
            .flat_map(|layer| layer.tiles.iter().copied())
            .filter(|&tile| tile != EMPTY_TILE)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn from_document(document: TileMapDocument) -> Result<Self> {
        let mut map = Self::new(document.orientation, document.width, document.height)?;
        for layer in document.layers {
            map.push_layer(layer)?;
        }
        Ok(map)
    }

    fn push_layer(&mut self, layer: TileLayer) -> Result<()> {
        if self.index.contains_key(&layer.name) {
            return Err(Error::InvalidMap {
                message: format!("duplicate layer name '{}'", layer.name),
            });
        }
        if layer.tiles.len() != self.cell_count() {
            return Err(Error::InvalidMap {
                message: format!(
                    "layer '{}' has {} tiles, expected {} ({}x{})",
                    layer.name,
                    layer.tiles.len(),
                    self.cell_count(),
                    self.width,
                    self.height
                ),
            });
        }
        self.index.insert(layer.name.clone(), self.layers.len());
        self.layers.push(layer);
        Ok(())
    }

    fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn offset(&self, coord: Coordinate) -> Option<usize> {
        coord
            .within(self.width, self.height)
            .then(|| coord.y as usize * self.width as usize + coord.x as usize)
    }
}

impl TileMapSource for TileMap {
    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn layers(&self) -> Vec<String> {
        self.layers.iter().map(|layer| layer.name.clone()).collect()
    }

    fn tile_id_at(&self, layer: &str, coord: Coordinate) -> TileId {
        let Some(offset) = self.offset(coord) else {
            return EMPTY_TILE;
        };
        self.index
            .get(layer)
            .map(|&layer_index| self.layers[layer_index].tiles[offset])
            .unwrap_or(EMPTY_TILE)
    }

    fn has_layer(&self, layer: &str) -> bool {
        self.index.contains_key(layer)
    }
}

/// Load a [`TileMap`] from a JSON document on disk.
pub fn load_tile_map(path: &Path) -> Result<TileMap> {
    debug!(path = %path.display(), "loading tile map");
    let contents = fs::read_to_string(path)?;
    let map = TileMap::from_json_str(&contents)?;
    debug!(
        orientation = %map.orientation,
        width = map.width,
        height = map.height,
        layers = map.layers.len(),
        "tile map loaded"
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TileMap {
        TileMap::new(Orientation::Orthogonal, 3, 2)
            .and_then(|map| map.with_layer("ground", vec![1, 2, 3, 4, 5, 6]))
            .expect("valid map")
    }

    #[test]
    fn tiles_are_row_major() {
        let map = sample();
        assert_eq!(map.tile_id_at("ground", Coordinate::new(0, 0)), 1);
        assert_eq!(map.tile_id_at("ground", Coordinate::new(2, 0)), 3);
        assert_eq!(map.tile_id_at("ground", Coordinate::new(0, 1)), 4);
        assert_eq!(map.tile_id_at("ground", Coordinate::new(2, 1)), 6);
    }

    #[test]
    fn unknown_layers_and_outside_cells_read_as_empty() {
        let map = sample();
        assert_eq!(map.tile_id_at("walls", Coordinate::new(0, 0)), EMPTY_TILE);
        assert_eq!(map.tile_id_at("ground", Coordinate::new(3, 0)), EMPTY_TILE);
        assert_eq!(map.tile_id_at("ground", Coordinate::new(0, -1)), EMPTY_TILE);
    }

    #[test]
    fn rejects_mismatched_layer_length() {
        let error = TileMap::new(Orientation::Orthogonal, 2, 2)
            .and_then(|map| map.with_layer("ground", vec![1, 2, 3]))
            .expect_err("short layer");
        assert!(format!("{error}").contains("has 3 tiles, expected 4"));
    }

    #[test]
    fn rejects_duplicate_layers() {
        let error = sample()
            .with_filled_layer("ground", 0)
            .expect_err("duplicate name");
        assert!(format!("{error}").contains("duplicate layer name 'ground'"));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(TileMap::new(Orientation::Hexagonal, 0, 4).is_err());
        assert!(TileMap::new(Orientation::Hexagonal, 4, -1).is_err());
    }

    #[test]
    fn set_tile_updates_known_layers_only() {
        let mut map = sample();
        assert!(map.set_tile("ground", Coordinate::new(1, 1), 42));
        assert_eq!(map.tile_id_at("ground", Coordinate::new(1, 1)), 42);
        assert!(!map.set_tile("walls", Coordinate::new(1, 1), 42));
        assert!(!map.set_tile("ground", Coordinate::new(9, 9), 42));
    }

    #[test]
    fn json_document_keeps_layer_order() {
        let json = r#"{
            "orientation": "isometric",
            "width": 2,
            "height": 1,
            "layers": [
                { "name": "ground", "tiles": [1, 1] },
                { "name": "objects", "tiles": [0, 9] }
            ]
        }"#;
        let map = TileMap::from_json_str(json).expect("valid document");
        assert_eq!(map.orientation(), Orientation::Isometric);
        assert_eq!(map.layers(), vec!["ground".to_string(), "objects".to_string()]);
        assert_eq!(map.distinct_tile_ids(), vec![1, 9]);
        assert_eq!(map.tile_id_at("objects", Coordinate::new(1, 0)), 9);
    }

    #[test]
    fn orientation_parses_case_insensitively() {
        assert_eq!("Hexagonal".parse::<Orientation>().unwrap(), Orientation::Hexagonal);
        assert!("triangular".parse::<Orientation>().is_err());
    }
}
