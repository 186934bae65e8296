//! Terrain classification against walkable or obstacle tile ids.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::coord::Coordinate;
use crate::map::{TileId, TileMapSource};

/// Tile-id rule applied to every inspected layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerrainRule {
    /// Blocked when any inspected layer holds one of these ids.
    Avoid(HashSet<TileId>),
    /// Open only when every inspected layer holds one of these ids.
    Require(HashSet<TileId>),
}

impl TerrainRule {
    pub fn avoid(obstacles: impl IntoIterator<Item = TileId>) -> Self {
        TerrainRule::Avoid(obstacles.into_iter().collect())
    }

    pub fn require(walkable: impl IntoIterator<Item = TileId>) -> Self {
        TerrainRule::Require(walkable.into_iter().collect())
    }

    pub fn kind(&self) -> TerrainRuleKind {
        match self {
            TerrainRule::Avoid(_) => TerrainRuleKind::Obstacles,
            TerrainRule::Require(_) => TerrainRuleKind::Walkable,
        }
    }

    fn accepts(&self, tiles: impl IntoIterator<Item = TileId>) -> bool {
        let mut tiles = tiles.into_iter();
        match self {
            TerrainRule::Avoid(obstacles) => !tiles.any(|tile| obstacles.contains(&tile)),
            TerrainRule::Require(walkable) => tiles.all(|tile| walkable.contains(&tile)),
        }
    }
}

impl Default for TerrainRule {
    /// No obstacles at all.
    fn default() -> Self {
        TerrainRule::Avoid(HashSet::new())
    }
}

/// Label for the active rule, used in logs and route summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainRuleKind {
    Obstacles,
    Walkable,
}

/// Requested layer names; empty means every layer of the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerFilter {
    names: Vec<String>,
}

impl LayerFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolve the filter against `map`, keeping the caller's order.
    ///
    /// Names the map does not know are dropped with a warning.
    pub fn resolve<M: TileMapSource + ?Sized>(&self, map: &M) -> Vec<String> {
        if self.is_all() {
            return map.layers();
        }
        self.names
            .iter()
            .filter(|name| {
                let known = map.has_layer(name);
                if !known {
                    warn!(layer = %name, "ignoring unknown tile layer");
                }
                known
            })
            .cloned()
            .collect()
    }
}

/// Per-request traversability check.
///
/// Borrows the map, the resolved layer list and the rule; the goal cell of
/// the active search is always traversable when inside the map.
pub struct TerrainFilter<'a, M: ?Sized> {
    map: &'a M,
    layers: &'a [String],
    rule: &'a TerrainRule,
    goal: Coordinate,
}

impl<'a, M: TileMapSource + ?Sized> TerrainFilter<'a, M> {
    pub fn new(map: &'a M, layers: &'a [String], rule: &'a TerrainRule, goal: Coordinate) -> Self {
        Self {
            map,
            layers,
            rule,
            goal,
        }
    }

    /// Whether `coord` may be entered.
    pub fn is_traversable(&self, coord: Coordinate) -> bool {
        if !self.map.contains(coord) {
            return false;
        }
        if coord == self.goal {
            return true;
        }
        self.rule.accepts(
            self.layers
                .iter()
                .map(|layer| self.map.tile_id_at(layer, coord)),
        )
    }
}
