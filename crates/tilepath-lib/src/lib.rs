//! tilepath library entry points.
//!
//! This crate finds shortest routes between cells of a layered tile map
//! using A* with per-layer terrain rules and orthogonal, isometric or
//! hexagonal connectivity. Map data reaches the engine through the
//! [`TileMapSource`] trait; [`TileMap`] is an in-memory implementation that
//! can be loaded from a small JSON document. Higher-level consumers (the CLI)
//! should only depend on the items exported here.
//!
//! # Example
//!
//! ```
//! use tilepath_lib::{Coordinate, Directions, Orientation, PathFinder, TileMap};
//!
//! let map = TileMap::new(Orientation::Orthogonal, 5, 5)?
//!     .with_filled_layer("ground", 1)?;
//! let finder = PathFinder::for_map(&map, Directions::Four)?;
//! let route = finder.find_path_avoiding(Coordinate::new(0, 0), Coordinate::new(4, 4), [2]);
//! assert_eq!(route.len(), 9);
//! # Ok::<(), tilepath_lib::Error>(())
//! ```

#![deny(warnings)]

pub mod connectivity;
pub mod coord;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod map;
pub mod output;
pub mod path;
pub mod terrain;

pub use connectivity::{Connectivity, Directions};
pub use coord::Coordinate;
pub use error::{Error, Result};
pub use frontier::{ClosedSet, OpenSet, SearchNode};
pub use heuristic::Heuristic;
pub use map::{load_tile_map, Orientation, TileId, TileLayer, TileMap, TileMapSource, EMPTY_TILE};
pub use output::{render_grid, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{PathFinder, SearchLimits, SearchOutcome, SearchStatus};
pub use terrain::{LayerFilter, TerrainFilter, TerrainRule, TerrainRuleKind};
