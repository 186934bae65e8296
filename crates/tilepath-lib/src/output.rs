use std::collections::HashSet;
use std::fmt::Write;

use serde::Serialize;

use crate::connectivity::Directions;
use crate::coord::Coordinate;
use crate::heuristic::Heuristic;
use crate::map::{Orientation, TileMapSource};
use crate::path::{PathFinder, SearchOutcome, SearchStatus};
use crate::terrain::{TerrainFilter, TerrainRule, TerrainRuleKind};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    /// Single line of `x,y` pairs joined by arrows.
    Compact,
}

/// Step taken along a route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub x: i32,
    pub y: i32,
}

/// Structured, serialisable view of a single search.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub status: SearchStatus,
    pub orientation: Orientation,
    pub directions: Directions,
    pub heuristic: Heuristic,
    pub rule: TerrainRuleKind,
    pub start: Coordinate,
    pub goal: Coordinate,
    pub hops: usize,
    pub expanded: usize,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Summarise `outcome` as produced by `finder` for `start -> goal`.
    pub fn from_outcome<M: TileMapSource + ?Sized>(
        finder: &PathFinder<'_, M>,
        rule: &TerrainRule,
        start: Coordinate,
        goal: Coordinate,
        outcome: &SearchOutcome,
    ) -> Self {
        let steps = outcome
            .route
            .iter()
            .enumerate()
            .map(|(index, coord)| RouteStep {
                index,
                x: coord.x,
                y: coord.y,
            })
            .collect::<Vec<_>>();

        Self {
            status: outcome.status,
            orientation: finder.connectivity().orientation(),
            directions: finder.connectivity().directions(),
            heuristic: finder.heuristic(),
            rule: rule.kind(),
            start,
            goal,
            hops: outcome.route.len().saturating_sub(1),
            expanded: outcome.expanded,
            steps,
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Compact => self.render_compact(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {} directions, heuristic: {})",
            self.start, self.goal, self.hops, self.directions, self.heuristic
        );
        if !self.is_found() {
            let _ = writeln!(buffer, "No route ({} nodes expanded)", self.expanded);
            return buffer;
        }
        for step in &self.steps {
            let _ = writeln!(buffer, "{:>3}: ({}, {})", step.index, step.x, step.y);
        }
        buffer
    }

    fn render_compact(&self) -> String {
        let joined = self
            .steps
            .iter()
            .map(|step| format!("{},{}", step.x, step.y))
            .collect::<Vec<_>>()
            .join(" -> ");
        format!("{joined}\n")
    }
}

/// Draw the map with the route overlaid.
///
/// `S` start, `G` goal, `*` route, `#` blocked under `rule`, `.` open.
pub fn render_grid<M: TileMapSource + ?Sized>(
    finder: &PathFinder<'_, M>,
    map: &M,
    rule: &TerrainRule,
    summary: &RouteSummary,
) -> String {
    let route: HashSet<Coordinate> = summary
        .steps
        .iter()
        .map(|step| Coordinate::new(step.x, step.y))
        .collect();
    let terrain = TerrainFilter::new(map, finder.inspected_layers(), rule, summary.goal);

    let mut buffer = String::new();
    for y in 0..map.height() {
        for x in 0..map.width() {
            let coord = Coordinate::new(x, y);
            let cell = if coord == summary.start {
                'S'
            } else if coord == summary.goal {
                'G'
            } else if route.contains(&coord) {
                '*'
            } else if terrain.is_traversable(coord) {
                '.'
            } else {
                '#'
            };
            buffer.push(cell);
        }
        buffer.push('\n');
    }
    buffer
}
