//! Per-search node registries.
//!
//! [`OpenSet`] holds discovered cells waiting for expansion and
//! [`ClosedSet`] holds settled cells. Both are keyed by [`Coordinate`] and are
//! created fresh for every path request.

use std::collections::{BTreeSet, HashMap};

use crate::coord::Coordinate;

/// Cost bookkeeping for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub coord: Coordinate,
    g: u32,
    h: u32,
    f: u32,
    parent: Option<Coordinate>,
}

impl SearchNode {
    /// Root node of a search: `g = 0`, no parent.
    pub fn start(coord: Coordinate, h: u32) -> Self {
        Self {
            coord,
            g: 0,
            h,
            f: h,
            parent: None,
        }
    }

    /// Node reached from `parent` with cost-from-start `g`.
    pub fn reached(coord: Coordinate, g: u32, h: u32, parent: Coordinate) -> Self {
        Self {
            coord,
            g,
            h,
            f: g + h,
            parent: Some(parent),
        }
    }

    /// Cost from start.
    pub fn g(&self) -> u32 {
        self.g
    }

    /// Estimated cost to goal.
    pub fn h(&self) -> u32 {
        self.h
    }

    /// `g + h`.
    pub fn f(&self) -> u32 {
        self.f
    }

    pub fn parent(&self) -> Option<Coordinate> {
        self.parent
    }

    fn key(&self) -> FrontierKey {
        FrontierKey {
            f: self.f,
            h: self.h,
            x: self.coord.x,
            y: self.coord.y,
        }
    }
}

/// Ordering used for extraction: lowest `f`, then `h`, then `x`, then `y`.
/// Field order matters for the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierKey {
    f: u32,
    h: u32,
    x: i32,
    y: i32,
}

impl FrontierKey {
    fn coord(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

/// Frontier of discovered but unsettled cells.
///
/// Nodes live in a coordinate map; a sorted index over [`FrontierKey`]
/// provides deterministic extract-min and in-place priority updates.
#[derive(Debug, Default)]
pub struct OpenSet {
    nodes: HashMap<Coordinate, SearchNode>,
    order: BTreeSet<FrontierKey>,
}

impl OpenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, coord: Coordinate) -> Option<&SearchNode> {
        self.nodes.get(&coord)
    }

    /// Insert `node`, replacing any node already held for its coordinate.
    pub fn insert(&mut self, node: SearchNode) {
        if let Some(previous) = self.nodes.insert(node.coord, node) {
            self.order.remove(&previous.key());
        }
        self.order.insert(node.key());
    }

    /// Overwrite the costs and parent of an existing entry. Returns `false`
    /// when the coordinate is not in the frontier.
    pub fn update(&mut self, node: SearchNode) -> bool {
        match self.nodes.get_mut(&node.coord) {
            Some(existing) => {
                self.order.remove(&existing.key());
                *existing = node;
                self.order.insert(node.key());
                true
            }
            None => false,
        }
    }

    /// Remove and return the node with the smallest extraction key.
    pub fn pop_min(&mut self) -> Option<SearchNode> {
        let key = self.order.pop_first()?;
        self.nodes.remove(&key.coord())
    }

    pub fn remove(&mut self, coord: Coordinate) -> Option<SearchNode> {
        let node = self.nodes.remove(&coord)?;
        self.order.remove(&node.key());
        Some(node)
    }
}

/// Settled cells.
#[derive(Debug, Default)]
pub struct ClosedSet {
    nodes: HashMap<Coordinate, SearchNode>,
}

impl ClosedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, coord: Coordinate) -> Option<&SearchNode> {
        self.nodes.get(&coord)
    }

    pub fn insert(&mut self, node: SearchNode) {
        self.nodes.insert(node.coord, node);
    }

    pub fn remove(&mut self, coord: Coordinate) -> Option<SearchNode> {
        self.nodes.remove(&coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn total_cost_tracks_components() {
        let start = SearchNode::start(c(0, 0), 7);
        assert_eq!((start.g(), start.h(), start.f()), (0, 7, 7));
        assert_eq!(start.parent(), None);

        let next = SearchNode::reached(c(1, 0), 1, 6, c(0, 0));
        assert_eq!(next.f(), 7);
        assert_eq!(next.parent(), Some(c(0, 0)));
    }

    #[test]
    fn pops_by_cost_then_heuristic_then_position() {
        let mut open = OpenSet::new();
        open.insert(SearchNode::reached(c(5, 5), 4, 2, c(0, 0))); // f 6, h 2
        open.insert(SearchNode::reached(c(3, 1), 2, 4, c(0, 0))); // f 6, h 4
        open.insert(SearchNode::reached(c(1, 9), 5, 1, c(0, 0))); // f 6, h 1
        open.insert(SearchNode::reached(c(1, 2), 5, 1, c(0, 0))); // f 6, h 1
        open.insert(SearchNode::reached(c(0, 0), 1, 3, c(0, 0))); // f 4

        let order: Vec<_> = std::iter::from_fn(|| open.pop_min())
            .map(|node| node.coord)
            .collect();
        assert_eq!(order, vec![c(0, 0), c(1, 2), c(1, 9), c(5, 5), c(3, 1)]);
        assert!(open.is_empty());
    }

    #[test]
    fn update_reprioritises_in_place() {
        let mut open = OpenSet::new();
        open.insert(SearchNode::reached(c(1, 0), 3, 3, c(0, 0)));
        open.insert(SearchNode::reached(c(2, 0), 2, 3, c(0, 0)));

        assert!(open.update(SearchNode::reached(c(1, 0), 1, 3, c(9, 9))));
        assert_eq!(open.len(), 2);

        let first = open.pop_min().expect("non-empty");
        assert_eq!(first.coord, c(1, 0));
        assert_eq!(first.parent(), Some(c(9, 9)));
        assert!(!open.update(SearchNode::reached(c(7, 7), 1, 1, c(0, 0))));
    }

    #[test]
    fn remove_drops_index_entry() {
        let mut open = OpenSet::new();
        open.insert(SearchNode::reached(c(1, 0), 1, 1, c(0, 0)));
        open.insert(SearchNode::reached(c(2, 0), 2, 2, c(0, 0)));

        assert!(open.remove(c(1, 0)).is_some());
        assert!(open.remove(c(1, 0)).is_none());
        assert_eq!(open.pop_min().map(|node| node.coord), Some(c(2, 0)));
        assert_eq!(open.pop_min(), None);
    }

    #[test]
    fn closed_set_supports_reopening() {
        let mut closed = ClosedSet::new();
        closed.insert(SearchNode::start(c(0, 0), 3));
        assert_eq!(closed.get(c(0, 0)).map(SearchNode::f), Some(3));
        assert!(closed.remove(c(0, 0)).is_some());
        assert!(closed.get(c(0, 0)).is_none());
        assert!(closed.is_empty());
    }
}
