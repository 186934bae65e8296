use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::connectivity::{Connectivity, Directions};
use crate::coord::Coordinate;
use crate::error::Result;
use crate::frontier::{ClosedSet, OpenSet, SearchNode};
use crate::heuristic::Heuristic;
use crate::map::{Orientation, TileId, TileMapSource};
use crate::terrain::{LayerFilter, TerrainFilter, TerrainRule};

/// Flat cost of every step, diagonal and hex steps included.
const STEP_COST: u32 = 1;

/// Optional bounds on a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop after expanding this many nodes without reaching the goal.
    pub max_expansions: Option<usize>,
}

/// Terminal state of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// The goal was extracted from the frontier.
    Found,
    /// The frontier emptied without reaching the goal.
    Exhausted,
    /// [`SearchLimits::max_expansions`] was hit first.
    ExpansionLimit,
}

/// Route plus statistics for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    /// `start..=goal` when found, empty otherwise.
    pub route: Vec<Coordinate>,
    /// Cost from start recorded on the settled goal node.
    pub cost: Option<u32>,
    /// Nodes taken off the frontier and expanded.
    pub expanded: usize,
    /// Settled nodes moved back to the frontier after a cheaper path appeared.
    pub reopened: usize,
}

impl SearchOutcome {
    fn unreachable(status: SearchStatus, expanded: usize, reopened: usize) -> Self {
        Self {
            status,
            route: Vec::new(),
            cost: None,
            expanded,
            reopened,
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }
}

/// A* path finder over a [`TileMapSource`].
///
/// The map and configuration are shared read-only between requests. Every
/// request builds its own [`OpenSet`] and [`ClosedSet`]; nothing carries over
/// from one call to the next.
pub struct PathFinder<'m, M: TileMapSource + ?Sized> {
    map: &'m M,
    connectivity: Connectivity,
    layer_filter: LayerFilter,
    layers: Vec<String>,
    heuristic: Heuristic,
    limits: SearchLimits,
}

impl<'m, M: TileMapSource + ?Sized> PathFinder<'m, M> {
    /// Create a finder for `map`, validating `directions` against
    /// `orientation`. All layers are inspected until [`Self::set_layers`]
    /// narrows the selection.
    pub fn new(map: &'m M, orientation: Orientation, directions: Directions) -> Result<Self> {
        let connectivity = Connectivity::new(orientation, directions)?;
        let layer_filter = LayerFilter::all();
        let layers = layer_filter.resolve(map);
        Ok(Self {
            map,
            connectivity,
            layer_filter,
            layers,
            heuristic: Heuristic::default(),
            limits: SearchLimits::default(),
        })
    }

    /// Create a finder using the map's own orientation.
    pub fn for_map(map: &'m M, directions: Directions) -> Result<Self> {
        Self::new(map, map.orientation(), directions)
    }

    /// Builder form of [`Self::set_layers`].
    pub fn with_layers(mut self, filter: LayerFilter) -> Self {
        self.apply_layer_filter(filter);
        self
    }

    /// Replace the default truncated-Euclidean estimate.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replace the inspected layers; an empty list selects every layer.
    pub fn set_layers<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply_layer_filter(LayerFilter::only(names));
    }

    fn apply_layer_filter(&mut self, filter: LayerFilter) {
        self.layers = filter.resolve(self.map);
        self.layer_filter = filter;
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn layer_filter(&self) -> &LayerFilter {
        &self.layer_filter
    }

    /// Layers inspected by the terrain filter, in inspection order.
    pub fn inspected_layers(&self) -> &[String] {
        &self.layers
    }

    /// Shortest route avoiding cells where any inspected layer holds one of
    /// `obstacles`. Empty when the goal cannot be reached.
    pub fn find_path_avoiding<I>(
        &self,
        start: Coordinate,
        goal: Coordinate,
        obstacles: I,
    ) -> Vec<Coordinate>
    where
        I: IntoIterator<Item = TileId>,
    {
        self.find_path_with(start, goal, &TerrainRule::avoid(obstacles))
            .route
    }

    /// Shortest route through cells where every inspected layer holds one of
    /// `walkable`. Empty when the goal cannot be reached.
    pub fn find_path_using<I>(
        &self,
        start: Coordinate,
        goal: Coordinate,
        walkable: I,
    ) -> Vec<Coordinate>
    where
        I: IntoIterator<Item = TileId>,
    {
        self.find_path_with(start, goal, &TerrainRule::require(walkable))
            .route
    }

    /// Run a single search and report the route with statistics.
    pub fn find_path_with(
        &self,
        start: Coordinate,
        goal: Coordinate,
        rule: &TerrainRule,
    ) -> SearchOutcome {
        if !self.map.contains(start) || !self.map.contains(goal) {
            debug!(%start, %goal, "start or goal outside the map");
            return SearchOutcome::unreachable(SearchStatus::Exhausted, 0, 0);
        }

        let terrain = TerrainFilter::new(self.map, &self.layers, rule, goal);
        let mut open = OpenSet::new();
        let mut closed = ClosedSet::new();
        let mut lineage = Lineage::new();
        let mut expanded = 0usize;
        let mut reopened = 0usize;

        open.insert(SearchNode::start(start, self.heuristic.estimate(start, goal)));

        while let Some(current) = open.pop_min() {
            if current.coord == goal {
                let route = lineage.route_to(&current);
                debug!(
                    %start,
                    %goal,
                    rule = ?rule.kind(),
                    steps = route.len() - 1,
                    expanded,
                    reopened,
                    "route found"
                );
                return SearchOutcome {
                    status: SearchStatus::Found,
                    route,
                    cost: Some(current.g()),
                    expanded,
                    reopened,
                };
            }

            if let Some(limit) = self.limits.max_expansions {
                if expanded >= limit {
                    warn!(%start, %goal, limit, "expansion limit reached before the goal");
                    return SearchOutcome::unreachable(
                        SearchStatus::ExpansionLimit,
                        expanded,
                        reopened,
                    );
                }
            }

            expanded += 1;
            lineage.record(&current);
            trace!(coord = %current.coord, g = current.g(), f = current.f(), "expanding");

            for candidate in self.connectivity.neighbors(current.coord) {
                if !terrain.is_traversable(candidate) {
                    continue;
                }

                let g = current.g() + STEP_COST;
                let h = self.heuristic.estimate(candidate, goal);
                let node = SearchNode::reached(candidate, g, h, current.coord);

                let known_cost = open
                    .get(candidate)
                    .or_else(|| closed.get(candidate))
                    .map(SearchNode::f);
                if known_cost.is_some_and(|f| f <= node.f()) {
                    continue;
                }

                if closed.remove(candidate).is_some() {
                    reopened += 1;
                    open.insert(node);
                } else if !open.update(node) {
                    open.insert(node);
                }
            }

            closed.insert(current);
        }

        debug!(%start, %goal, rule = ?rule.kind(), expanded, "no route");
        SearchOutcome::unreachable(SearchStatus::Exhausted, expanded, reopened)
    }
}

/// Parent of every expanded node version, keyed by coordinate and the `g`
/// it was expanded with.
///
/// A reopened cell is expanded again with a lower `g`. Routes follow
/// `(parent, g - STEP_COST)` so they stay exactly `g` steps long.
struct Lineage {
    parents: HashMap<(Coordinate, u32), Option<Coordinate>>,
}

impl Lineage {
    fn new() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }

    fn record(&mut self, node: &SearchNode) {
        self.parents.insert((node.coord, node.g()), node.parent());
    }

    /// Coordinates from the start to `goal`, in order.
    fn route_to(&self, goal: &SearchNode) -> Vec<Coordinate> {
        let mut path = vec![goal.coord];
        let mut g = goal.g();
        let mut parent = goal.parent();
        while let Some(coord) = parent {
            path.push(coord);
            g = g.saturating_sub(STEP_COST);
            parent = self.parents.get(&(coord, g)).copied().flatten();
        }
        path.reverse();
        path
    }
}
