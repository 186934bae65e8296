//! `route` subcommand: search for a path between two cells.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use tilepath_lib::{
    load_tile_map, Coordinate, Directions, Error as LibError, Heuristic, LayerFilter, Orientation,
    PathFinder, RouteSummary, SearchLimits, TerrainRule, TileId, TileMapSource,
};

use tilepath_cli::config::resolve_map_path;
use tilepath_cli::output::OutputFormat;

#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Start cell as `x,y`.
    #[arg(long = "from", allow_hyphen_values = true)]
    pub from: Coordinate,

    /// Goal cell as `x,y`.
    #[arg(long = "to", allow_hyphen_values = true)]
    pub to: Coordinate,

    /// Treat the map as this orientation instead of the one it declares.
    #[arg(long)]
    pub orientation: Option<Orientation>,

    /// Neighbour count: 4 or 8 for orthogonal and isometric maps, 6 for
    /// hexagonal maps. Defaults to 6 on hexagonal maps and 4 otherwise.
    #[arg(long)]
    pub directions: Option<u32>,

    /// Tile ids that block movement (comma separated).
    #[arg(long, value_delimiter = ',', conflicts_with = "walkable")]
    pub avoid: Vec<TileId>,

    /// Only these tile ids may be entered (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub walkable: Vec<TileId>,

    /// Restrict terrain checks to the named layer. Repeatable.
    #[arg(long = "layer")]
    pub layers: Vec<String>,

    /// Distance estimate: euclidean, manhattan, chebyshev, hex or zero.
    #[arg(long)]
    pub heuristic: Option<Heuristic>,

    /// Give up after expanding this many nodes.
    #[arg(long)]
    pub max_expansions: Option<usize>,
}

impl RouteArgs {
    fn directions_for(&self, orientation: Orientation) -> Result<Directions> {
        let count = self.directions.unwrap_or(match orientation {
            Orientation::Hexagonal => 6,
            Orientation::Orthogonal | Orientation::Isometric => 4,
        });
        Ok(Directions::try_from(count)?)
    }

    fn terrain_rule(&self) -> TerrainRule {
        if self.walkable.is_empty() {
            TerrainRule::avoid(self.avoid.iter().copied())
        } else {
            TerrainRule::require(self.walkable.iter().copied())
        }
    }
}

pub fn handle_route(map_arg: Option<&Path>, format: OutputFormat, args: &RouteArgs) -> Result<()> {
    let map_path = resolve_map_path(map_arg)?;
    let map = load_tile_map(&map_path)
        .with_context(|| format!("failed to load tile map from {}", map_path.display()))?;

    let orientation = args.orientation.unwrap_or(map.orientation());
    let directions = args.directions_for(orientation)?;
    let mut finder =
        PathFinder::new(&map, orientation, directions)?.with_limits(SearchLimits {
            max_expansions: args.max_expansions,
        });
    if !args.layers.is_empty() {
        finder = finder.with_layers(LayerFilter::only(args.layers.iter().cloned()));
    }
    if let Some(heuristic) = args.heuristic {
        finder = finder.with_heuristic(heuristic);
    }

    let rule = args.terrain_rule();
    let outcome = finder.find_path_with(args.from, args.to, &rule);
    info!(
        status = ?outcome.status,
        expanded = outcome.expanded,
        reopened = outcome.reopened,
        "search finished"
    );

    let summary = RouteSummary::from_outcome(&finder, &rule, args.from, args.to, &outcome);
    format.render_route(&finder, &map, &rule, &summary)?;

    if !summary.is_found() {
        return Err(LibError::RouteNotFound {
            start: args.from,
            goal: args.to,
        }
        .into());
    }
    Ok(())
}
